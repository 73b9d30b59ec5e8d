// crates/matcha-core/src/config.rs

//! Deployment settings for the engine.
//!
//! The tag combination policy and the top-picks threshold differ between
//! deployments of the directory; both are fixed here per deployment rather
//! than guessed. Every field has a default so an empty TOML file is valid.
//!
//! ```rust
//! use matcha_core::config::{EngineConfig, TagCombineMode};
//!
//! let cfg = EngineConfig::from_toml_str(r#"
//!     top_picks_threshold = 4.8
//!     tag_mode = "all-of"
//!
//!     [map]
//!     zoom = 13
//! "#).unwrap();
//! assert_eq!(cfg.tag_mode, TagCombineMode::AllOf);
//! assert_eq!(cfg.map.zoom, 13);
//! assert_eq!(cfg.map.single_marker_zoom, 15);
//! ```

use crate::error::{DirectoryError, Result};
use crate::i18n::Language;
use crate::model::Rating;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TOP_PICKS_THRESHOLD: f64 = 4.6;

/// How selected tags combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagCombineMode {
    /// The entry carries at least one selected tag.
    #[default]
    AnyOf,
    /// The entry carries every selected tag.
    AllOf,
}

/// Display order of the visible entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Rating descending (unrated last), then name.
    #[default]
    RatingThenName,
    /// Name only, rating ignored.
    NameOnly,
}

/// Tile source handed to the map surface once at init.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayer {
    pub url: String,
    pub max_zoom: u8,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 19,
            attribution: "© OpenStreetMap".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Default region view `[lat, lng]` (central Paris).
    pub center: [f64; 2],
    pub zoom: u8,
    /// Zoom used when exactly one marker is visible.
    pub single_marker_zoom: u8,
    /// Fraction of the bounds size added on every side when fitting.
    pub fit_padding: f64,
    pub tiles: TileLayer,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [48.8566, 2.3522],
            zoom: 12,
            single_marker_zoom: 15,
            fit_padding: 0.25,
            tiles: TileLayer::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub top_picks_threshold: f64,
    pub tag_mode: TagCombineMode,
    pub sort_mode: SortMode,
    /// Let the search box match translated tag labels as well as raw keys.
    pub search_tag_labels: bool,
    pub default_language: Language,
    pub map: MapConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_picks_threshold: DEFAULT_TOP_PICKS_THRESHOLD,
            tag_mode: TagCombineMode::default(),
            sort_mode: SortMode::default(),
            search_tag_labels: true,
            default_language: Language::default(),
            map: MapConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: EngineConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            DirectoryError::NotFound(format!("Config not found at {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=Rating::MAX).contains(&self.top_picks_threshold) {
            return Err(DirectoryError::Config(format!(
                "top_picks_threshold {} is outside 0..=5",
                self.top_picks_threshold
            )));
        }
        let m = &self.map;
        if !m.fit_padding.is_finite() || m.fit_padding < 0.0 {
            return Err(DirectoryError::Config(format!(
                "map.fit_padding {} must be a non-negative number",
                m.fit_padding
            )));
        }
        if !(-90.0..=90.0).contains(&m.center[0]) || !(-180.0..=180.0).contains(&m.center[1]) {
            return Err(DirectoryError::Config(format!(
                "map.center {:?} is not a valid coordinate",
                m.center
            )));
        }
        if m.zoom > m.tiles.max_zoom || m.single_marker_zoom > m.tiles.max_zoom {
            return Err(DirectoryError::Config(format!(
                "map zoom levels must not exceed tiles.max_zoom ({})",
                m.tiles.max_zoom
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(EngineConfig::from_toml_str("top_picks_threshold = 6.0").is_err());
        assert!(EngineConfig::from_toml_str("[map]\nfit_padding = -0.1").is_err());
        assert!(EngineConfig::from_toml_str("[map]\nsingle_marker_zoom = 22").is_err());
    }

    #[test]
    fn rejects_unknown_enum_values() {
        let err = EngineConfig::from_toml_str(r#"tag_mode = "some-of""#).unwrap_err();
        assert!(matches!(err, DirectoryError::Config(_)));
    }

    #[test]
    fn parses_language_and_sort() {
        let cfg = EngineConfig::from_toml_str(
            "default_language = \"fr\"\nsort_mode = \"name-only\"\nsearch_tag_labels = false",
        )
        .unwrap();
        assert_eq!(cfg.default_language, Language::Fr);
        assert_eq!(cfg.sort_mode, SortMode::NameOnly);
        assert!(!cfg.search_tag_labels);
    }
}
