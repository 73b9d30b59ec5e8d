// crates/matcha-core/src/state.rs

//! # Filter State Manager
//!
//! One [`FilterState`] per session, changed only through [`reduce`]. The
//! [`FilterStore`] wraps the reducer and fires exactly one notification per
//! dispatched action; listeners run the full recompute pipeline.

use crate::config::TagCombineMode;
use crate::text::normalize_query;
use crate::zone::Zone;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Zone selector value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneFilter {
    #[default]
    All,
    Zone(Zone),
}

impl fmt::Display for ZoneFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneFilter::All => f.write_str("all"),
            ZoneFilter::Zone(z) => write!(f, "{z}"),
        }
    }
}

impl FromStr for ZoneFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") || s.trim().is_empty() {
            return Ok(ZoneFilter::All);
        }
        s.parse().map(ZoneFilter::Zone)
    }
}

/// The complete set of user-selected criteria. Every field always holds a
/// concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Trimmed, lower-cased; empty means no text filter.
    pub text_query: String,
    pub top_picks: bool,
    pub hide_unrated: bool,
    pub zone: ZoneFilter,
    /// Lower-cased facet keys.
    pub selected_tags: BTreeSet<String>,
    pub tag_mode: TagCombineMode,
}

impl FilterState {
    pub fn new(tag_mode: TagCombineMode) -> Self {
        FilterState {
            tag_mode,
            ..Default::default()
        }
    }

    /// Number of chip-style filters in effect: top picks plus each selected
    /// tag. The search box, "hide unrated" and the zone selector are
    /// independent controls and are not counted.
    pub fn active_count(&self) -> usize {
        usize::from(self.top_picks) + self.selected_tags.len()
    }

    pub fn is_tag_selected(&self, key: &str) -> bool {
        self.selected_tags.contains(&key.to_lowercase())
    }
}

/// One user intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Action {
    SetQuery(String),
    SetTopPicks(bool),
    ToggleTopPicks,
    SetHideUnrated(bool),
    SetZone(ZoneFilter),
    SetTag(String, bool),
    ToggleTag(String),
    /// Clears top picks and selected tags only.
    ClearAll,
}

/// Pure transition: the next state for `action`.
pub fn reduce(state: &FilterState, action: &Action) -> FilterState {
    let mut next = state.clone();
    match action {
        Action::SetQuery(q) => next.text_query = normalize_query(q),
        Action::SetTopPicks(on) => next.top_picks = *on,
        Action::ToggleTopPicks => next.top_picks = !state.top_picks,
        Action::SetHideUnrated(on) => next.hide_unrated = *on,
        Action::SetZone(z) => next.zone = *z,
        Action::SetTag(key, on) => {
            let key = key.trim().to_lowercase();
            if key.is_empty() {
                return next;
            }
            if *on {
                next.selected_tags.insert(key);
            } else {
                next.selected_tags.remove(&key);
            }
        }
        Action::ToggleTag(key) => {
            let key = key.trim().to_lowercase();
            if key.is_empty() {
                return next;
            }
            if !next.selected_tags.remove(&key) {
                next.selected_tags.insert(key);
            }
        }
        Action::ClearAll => {
            next.top_picks = false;
            next.selected_tags.clear();
        }
    }
    next
}

type Listener = Box<dyn FnMut(&FilterState)>;

/// Owns the session's filter state and notifies subscribers on change.
pub struct FilterStore {
    state: FilterState,
    listeners: Vec<Listener>,
}

impl FilterStore {
    pub fn new(initial: FilterState) -> Self {
        Self {
            state: initial,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FilterState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply `action` and notify every listener once.
    pub fn dispatch(&mut self, action: &Action) -> &FilterState {
        self.state = reduce(&self.state, action);
        log::debug!("dispatch {action:?} -> {} active filter(s)", self.state.active_count());
        for listener in &mut self.listeners {
            listener(&self.state);
        }
        &self.state
    }
}

impl fmt::Debug for FilterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
