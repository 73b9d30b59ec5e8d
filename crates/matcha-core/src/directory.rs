// crates/matcha-core/src/directory.rs

//! The recompute pipeline: store → predicate → rank → present.
//!
//! [`Directory`] is driven through `&mut self`, so one recompute always
//! finishes before the next input is accepted.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::filter::{self, MatchContext};
use crate::i18n::{LabelResolver, Language, MemoryPreferences, Preferences};
use crate::model::{Entry, EntryId};
use crate::rank;
use crate::state::{Action, FilterState, FilterStore};
use crate::store::EntryStore;
use crate::view::{
    ListSurface, MapSurface, MarkerHandle, Presentation, RowHandle, SummarySurface,
    ViewSynchronizer,
};
use crate::zone::Zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the entry store; recomputes render an empty view.
    Loading,
    Idle,
    Recomputing,
}

pub struct Directory {
    store: EntryStore,
    filters: FilterStore,
    config: EngineConfig,
    labels: LabelResolver,
    language: Language,
    prefs: Box<dyn Preferences>,
    views: ViewSynchronizer,
    last: Option<Presentation>,
    phase: Phase,
}

impl Directory {
    /// A headless directory with in-memory preferences.
    pub fn new(store: EntryStore, config: EngineConfig) -> Self {
        let filters = FilterStore::new(FilterState::new(config.tag_mode));
        let views = ViewSynchronizer::headless(config.map.clone());
        let phase = if store.is_loading() {
            Phase::Loading
        } else {
            Phase::Idle
        };
        Self {
            store,
            filters,
            language: config.default_language,
            config,
            labels: LabelResolver::new(),
            prefs: Box::new(MemoryPreferences::default()),
            views,
            last: None,
            phase,
        }
    }

    /// Attach real surfaces; the map is initialised immediately.
    pub fn with_surfaces(
        mut self,
        list: Box<dyn ListSurface>,
        map: Box<dyn MapSurface>,
        summary: Box<dyn SummarySurface>,
    ) -> Self {
        self.views = ViewSynchronizer::new(list, map, summary, self.config.map.clone());
        self
    }

    /// Use persistent preferences; a stored language overrides the
    /// configured default.
    pub fn with_preferences(mut self, prefs: Box<dyn Preferences>) -> Self {
        if let Some(lang) = prefs.language() {
            self.language = lang;
        }
        self.prefs = prefs;
        self
    }

    /// Display `lang` without remembering it in the preferences.
    pub fn with_language(mut self, lang: Language) -> Self {
        self.language = lang;
        self
    }

    pub fn with_labels(mut self, labels: LabelResolver) -> Self {
        self.labels = labels;
        self
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn filters(&self) -> &FilterState {
        self.filters.state()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn labels(&self) -> &LabelResolver {
        &self.labels
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The most recent presentation, if any recompute has run.
    pub fn presentation(&self) -> Option<&Presentation> {
        self.last.as_ref()
    }

    /// Observe filter changes (e.g. to mirror them into a URL).
    pub fn subscribe(&mut self, listener: impl FnMut(&FilterState) + 'static) {
        self.filters.subscribe(listener);
    }

    /// Complete a pending load and render the result.
    pub fn fill(&mut self, result: Result<Vec<Entry>>) -> &Presentation {
        self.store.fill(result);
        self.recompute()
    }

    /// Apply one user action and run the pipeline.
    pub fn dispatch(&mut self, action: Action) -> &Presentation {
        self.filters.dispatch(&action);
        self.recompute()
    }

    /// Switch the display language, persist it, and re-render.
    pub fn set_language(&mut self, lang: Language) -> &Presentation {
        self.language = lang;
        self.prefs.set_language(lang);
        self.recompute()
    }

    /// Ordered visible entries for the current state.
    pub fn visible(&self) -> Vec<&Entry> {
        visible_entries(
            &self.store,
            self.filters.state(),
            &self.config,
            &self.labels,
            self.language,
        )
    }

    /// Run the full pipeline and push the result to every surface.
    pub fn recompute(&mut self) -> &Presentation {
        self.phase = Phase::Recomputing;

        let state = self.filters.state();
        let visible = visible_entries(
            &self.store,
            state,
            &self.config,
            &self.labels,
            self.language,
        );
        let presentation = self
            .views
            .present(&visible, state, &self.labels, self.language);

        log::debug!(
            "recompute: {} of {} entries visible, {} marker(s)",
            presentation.rows.len(),
            self.store.len(),
            presentation.markers.len()
        );

        self.phase = if self.store.is_loading() {
            Phase::Loading
        } else {
            Phase::Idle
        };
        self.last.insert(presentation)
    }

    pub fn hover_row(&mut self, row: RowHandle) -> Option<MarkerHandle> {
        self.views.hover_row(row)
    }

    pub fn hover_entry(&mut self, entry: EntryId) -> Option<MarkerHandle> {
        self.views.hover_entry(entry)
    }

    pub fn click_marker(&mut self, marker: MarkerHandle) -> Option<RowHandle> {
        self.views.click_marker(marker)
    }

    /// Zones present in the store, for the zone selector.
    pub fn zone_counts(&self) -> Vec<(Zone, usize)> {
        self.store.zone_counts()
    }
}

fn match_context<'a>(
    config: &EngineConfig,
    labels: &'a LabelResolver,
    lang: Language,
) -> MatchContext<'a> {
    MatchContext {
        top_picks_threshold: config.top_picks_threshold,
        tag_labels: config.search_tag_labels.then_some((labels, lang)),
    }
}

/// Filter then rank.
fn visible_entries<'e>(
    store: &'e EntryStore,
    state: &FilterState,
    config: &EngineConfig,
    labels: &LabelResolver,
    lang: Language,
) -> Vec<&'e Entry> {
    let ctx = match_context(config, labels, lang);
    let mut visible = filter::apply(store.entries(), state, &ctx);
    rank::rank(&mut visible, config.sort_mode);
    visible
}

impl std::fmt::Debug for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory")
            .field("entries", &self.store.len())
            .field("filters", self.filters.state())
            .field("language", &self.language)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
