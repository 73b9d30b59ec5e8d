// crates/matcha-core/src/model/mod.rs
pub mod convert;

use crate::i18n::Language;
use crate::zone::{classify, Zone};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Shown in place of a missing or malformed name.
pub const UNNAMED: &str = "(unnamed)";

/// Sort sentinel for an absent rating; below every valid rating.
pub const UNRATED_SENTINEL: f64 = -1.0;

/// Stable identity of an entry: its position in the loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(pub u32);

/// A facet key as stored on an entry. Comparison is lower-cased.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag(String);

impl Tag {
    pub fn new(key: &str) -> Self {
        Tag(key.to_string())
    }

    /// The key exactly as given in the source data.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl Eq for Tag {}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Tag::new(s)
    }
}

/// A rating in `[0, 5]`, or no rating at all.
///
/// "Unrated" is not "rated 0": unrated entries sort after every rated one,
/// are removed by "hide unrated" and never reach a minimum threshold.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating(Option<f64>);

impl Rating {
    pub const MAX: f64 = 5.0;

    pub fn unrated() -> Self {
        Rating(None)
    }

    /// Accepts finite values in `[0, 5]`; anything else is unrated.
    pub fn new(value: f64) -> Self {
        if value.is_finite() && (0.0..=Self::MAX).contains(&value) {
            // fold -0.0 into 0.0 so total_cmp sees one zero
            Rating(Some(value + 0.0))
        } else {
            Rating(None)
        }
    }

    pub fn value(self) -> Option<f64> {
        self.0
    }

    pub fn is_rated(self) -> bool {
        self.0.is_some()
    }

    pub fn at_least(self, threshold: f64) -> bool {
        self.0.is_some_and(|r| r >= threshold)
    }

    /// Descending-order key with unrated below every valid rating.
    pub fn sort_key(self) -> f64 {
        self.0.unwrap_or(UNRATED_SENTINEL)
    }

    /// Higher ratings first.
    pub fn cmp_desc(self, other: Self) -> Ordering {
        other.sort_key().total_cmp(&self.sort_key())
    }
}

/// Latitude / longitude, both present or the entry is not mappable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Coordinates { lat, lng })
    }
}

/// Free-text notes with optional per-language variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notes {
    pub base: Option<String>,
    pub localized: HashMap<Language, String>,
}

impl Notes {
    pub fn plain(text: &str) -> Self {
        Notes {
            base: Some(text.to_string()),
            localized: HashMap::new(),
        }
    }

    pub fn with(mut self, lang: Language, text: &str) -> Self {
        self.localized.insert(lang, text.to_string());
        self
    }

    /// Preferred language, then the base note, then nothing.
    pub fn resolve(&self, lang: Language) -> Option<&str> {
        self.localized
            .get(&lang)
            .or(self.base.as_ref())
            .map(String::as_str)
    }

    /// Every variant, for search. Languages are visited in a fixed order.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.base.iter().map(String::as_str).chain(
            Language::ALL
                .into_iter()
                .filter_map(move |l| self.localized.get(&l).map(String::as_str)),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_none() && self.localized.is_empty()
    }
}

/// One point of interest. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    /// [`UNNAMED`] when the source had no usable name; see `unnamed`.
    pub name: String,
    /// Set when `name` is the placeholder rather than real data.
    #[serde(default)]
    pub unnamed: bool,
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub rating: Rating,
    pub price: Option<String>,
    pub tags: Vec<Tag>,
    pub notes: Notes,
    pub link: Option<String>,
}

impl Entry {
    /// Minimal entry used by builders and tests.
    pub fn new(id: u32, name: &str, address: &str) -> Self {
        let unnamed = name.trim().is_empty();
        Entry {
            id: EntryId(id),
            name: if unnamed {
                UNNAMED.to_string()
            } else {
                name.to_string()
            },
            unnamed,
            address: address.to_string(),
            coordinates: None,
            rating: Rating::unrated(),
            price: None,
            tags: Vec::new(),
            notes: Notes::default(),
            link: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Rating::new(rating);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| Tag::new(t)).collect();
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Coordinates::new(lat, lng);
        self
    }

    pub fn with_notes(mut self, notes: Notes) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_price(mut self, price: &str) -> Self {
        self.price = Some(price.to_string());
        self
    }

    pub fn zone(&self) -> Option<Zone> {
        classify(&self.address)
    }

    /// Lower-cased tag keys.
    pub fn tag_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.tags.iter().map(Tag::key)
    }

    pub fn has_tag(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.tags.iter().any(|t| t.key() == key)
    }
}
