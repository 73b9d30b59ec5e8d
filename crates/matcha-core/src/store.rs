// crates/matcha-core/src/store.rs

//! # Entry Store
//!
//! The immutable collection of entries for the session. It starts out
//! [`LoadStatus::Loading`], is filled exactly once, and behaves as an empty
//! collection until (and unless) that fill succeeds.

use crate::error::Result;
use crate::loader;
use crate::model::{Entry, EntryId};
use crate::zone::Zone;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    /// The load failed; the store stays empty for the session.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct EntryStore {
    entries: Vec<Entry>,
    status: LoadStatus,
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::loading()
    }
}

impl EntryStore {
    /// A store whose data has not arrived yet.
    pub fn loading() -> Self {
        Self {
            entries: Vec::new(),
            status: LoadStatus::Loading,
        }
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            status: LoadStatus::Ready,
        }
    }

    /// Complete a pending load. Only the first call has an effect; returns
    /// whether this call filled the store.
    pub fn fill(&mut self, result: Result<Vec<Entry>>) -> bool {
        if self.status != LoadStatus::Loading {
            log::warn!("entry store already settled ({:?}); ignoring reload", self.status);
            return false;
        }
        match result {
            Ok(entries) => {
                log::info!("entry store ready with {} entries", entries.len());
                self.entries = entries;
                self.status = LoadStatus::Ready;
            }
            Err(e) => {
                log::error!("failed to load entries: {e}");
                self.status = LoadStatus::Failed(e.to_string());
            }
        }
        true
    }

    /// Load from a file; a failure yields an empty, failed store.
    pub fn load_from_path(path: impl AsRef<Path>) -> Self {
        let mut store = Self::loading();
        store.fill(loader::load_entries(path));
        store
    }

    /// Parse an in-memory JSON document; a failure yields an empty store.
    pub fn from_json_str(json: &str) -> Self {
        let mut store = Self::loading();
        store.fill(loader::parse_entries(json));
        store
    }

    #[cfg(feature = "fetch")]
    pub fn fetch(url: &str) -> Self {
        let mut store = Self::loading();
        store.fill(loader::fetch_entries(url));
        store
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }

    /// The entries, or nothing while loading / after a failure.
    pub fn entries(&self) -> &[Entry] {
        match self.status {
            LoadStatus::Ready => &self.entries,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries().iter().find(|e| e.id == id)
    }

    /// Zones present in the store with their entry counts, ascending.
    pub fn zone_counts(&self) -> Vec<(Zone, usize)> {
        let mut counts: BTreeMap<Zone, usize> = BTreeMap::new();
        for zone in self.entries().iter().filter_map(Entry::zone) {
            *counts.entry(zone).or_default() += 1;
        }
        counts.into_iter().collect()
    }

    pub fn rated_count(&self) -> usize {
        self.entries().iter().filter(|e| e.rating.is_rated()).count()
    }

    pub fn mapped_count(&self) -> usize {
        self.entries()
            .iter()
            .filter(|e| e.coordinates.is_some())
            .count()
    }
}
