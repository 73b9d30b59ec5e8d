// crates/matcha-core/src/filter.rs

//! # Filter Predicate Engine
//!
//! Turns a [`FilterState`] into a single predicate over entries. Only the
//! criteria that are switched on are compiled in, so an inactive control is
//! a pass-through rather than a default-exclude.

use crate::config::TagCombineMode;
use crate::i18n::{Language, LabelResolver};
use crate::model::Entry;
use crate::state::{FilterState, ZoneFilter};
use crate::text::fold_key;
use crate::zone::Zone;

/// Everything a predicate needs besides the filter state.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    pub top_picks_threshold: f64,
    /// When set, text search also matches tag labels in this language.
    pub tag_labels: Option<(&'a LabelResolver, Language)>,
}

impl Default for MatchContext<'_> {
    fn default() -> Self {
        Self {
            top_picks_threshold: crate::config::DEFAULT_TOP_PICKS_THRESHOLD,
            tag_labels: None,
        }
    }
}

#[derive(Debug, Clone)]
enum Criterion {
    MinRating(f64),
    Rated,
    InZone(Zone),
    AnyTag(Vec<String>),
    AllTags(Vec<String>),
    /// Folded query.
    Text(String),
}

/// The conjunction of every active criterion.
#[derive(Debug, Clone)]
pub struct Predicate<'a> {
    criteria: Vec<Criterion>,
    ctx: MatchContext<'a>,
}

impl<'a> Predicate<'a> {
    pub fn compile(state: &FilterState, ctx: &MatchContext<'a>) -> Self {
        let mut criteria = Vec::new();
        if state.top_picks {
            criteria.push(Criterion::MinRating(ctx.top_picks_threshold));
        }
        if state.hide_unrated {
            criteria.push(Criterion::Rated);
        }
        if let ZoneFilter::Zone(z) = state.zone {
            criteria.push(Criterion::InZone(z));
        }
        if !state.selected_tags.is_empty() {
            let keys = state.selected_tags.iter().cloned().collect();
            criteria.push(match state.tag_mode {
                TagCombineMode::AnyOf => Criterion::AnyTag(keys),
                TagCombineMode::AllOf => Criterion::AllTags(keys),
            });
        }
        let q = fold_key(state.text_query.trim());
        if !q.is_empty() {
            criteria.push(Criterion::Text(q));
        }
        Self {
            criteria,
            ctx: *ctx,
        }
    }

    /// True when no criterion is active.
    pub fn is_pass_through(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        self.criteria.iter().all(|c| self.check(c, entry))
    }

    fn check(&self, criterion: &Criterion, entry: &Entry) -> bool {
        match criterion {
            Criterion::MinRating(t) => entry.rating.at_least(*t),
            Criterion::Rated => entry.rating.is_rated(),
            Criterion::InZone(z) => entry.zone() == Some(*z),
            Criterion::AnyTag(keys) => keys.iter().any(|k| entry.has_tag(k)),
            Criterion::AllTags(keys) => keys.iter().all(|k| entry.has_tag(k)),
            Criterion::Text(q) => haystack(entry, &self.ctx).contains(q.as_str()),
        }
    }
}

/// Folded search text: name, address, every note variant, raw tag keys and,
/// when configured, their display labels.
pub fn haystack(entry: &Entry, ctx: &MatchContext<'_>) -> String {
    let mut parts: Vec<String> = vec![entry.name.clone(), entry.address.clone()];
    parts.extend(entry.notes.variants().map(str::to_string));
    for tag in &entry.tags {
        parts.push(tag.as_str().to_string());
        if let Some((labels, lang)) = ctx.tag_labels {
            parts.push(labels.facet(tag.as_str(), lang));
        }
    }
    fold_key(&parts.join(" "))
}

/// Single-shot form of [`Predicate::matches`].
pub fn matches(entry: &Entry, state: &FilterState, ctx: &MatchContext<'_>) -> bool {
    Predicate::compile(state, ctx).matches(entry)
}

/// Visible subset of `entries` in input order.
pub fn apply<'e>(
    entries: &'e [Entry],
    state: &FilterState,
    ctx: &MatchContext<'_>,
) -> Vec<&'e Entry> {
    let predicate = Predicate::compile(state, ctx);
    entries.iter().filter(|e| predicate.matches(e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Notes;
    use crate::state::{reduce, Action};

    fn store() -> Vec<Entry> {
        vec![
            Entry::new(0, "Aoi", "3 Rue Saint-Honoré, 75001 Paris")
                .with_rating(4.8)
                .with_tags(&["ceremonial"]),
            Entry::new(1, "Béa", "8 Rue Oberkampf, 75011 Paris")
                .with_rating(4.8)
                .with_tags(&["To-Go"])
                .with_notes(Notes::plain("Oat latte").with(Language::Fr, "Latte à l'avoine")),
            Entry::new(2, "Cerise", "Lyon"),
            Entry::new(3, "Dango", "2 Rue X, 75011 Paris").with_rating(0.0),
        ]
    }

    fn names(state: &FilterState, ctx: &MatchContext<'_>) -> Vec<String> {
        let entries = store();
        apply(&entries, state, ctx)
            .into_iter()
            .map(|e| e.name.clone())
            .collect()
    }

    fn with(actions: &[Action]) -> FilterState {
        actions
            .iter()
            .fold(FilterState::default(), |s, a| reduce(&s, a))
    }

    #[test]
    fn default_state_passes_everything() {
        let ctx = MatchContext::default();
        assert!(Predicate::compile(&FilterState::default(), &ctx).is_pass_through());
        assert_eq!(names(&FilterState::default(), &ctx).len(), 4);
    }

    #[test]
    fn top_picks_requires_a_rating() {
        let s = with(&[Action::SetTopPicks(true)]);
        assert_eq!(names(&s, &MatchContext::default()), ["Aoi", "Béa"]);

        let strict = MatchContext {
            top_picks_threshold: 4.9,
            ..Default::default()
        };
        assert!(names(&s, &strict).is_empty());

        let zero = MatchContext {
            top_picks_threshold: 0.0,
            ..Default::default()
        };
        // rated 0 passes a 0 threshold, unrated never does
        assert_eq!(names(&s, &zero), ["Aoi", "Béa", "Dango"]);
    }

    #[test]
    fn hide_unrated_keeps_zero_ratings() {
        let s = with(&[Action::SetHideUnrated(true)]);
        assert_eq!(names(&s, &MatchContext::default()), ["Aoi", "Béa", "Dango"]);
    }

    #[test]
    fn zone_filter_excludes_zoneless() {
        let s = with(&[Action::SetZone("11".parse().unwrap())]);
        assert_eq!(names(&s, &MatchContext::default()), ["Béa", "Dango"]);
    }

    #[test]
    fn tag_modes() {
        let any = with(&[
            Action::SetTag("ceremonial".into(), true),
            Action::SetTag("to-go".into(), true),
        ]);
        assert_eq!(names(&any, &MatchContext::default()), ["Aoi", "Béa"]);

        let mut all = any.clone();
        all.tag_mode = TagCombineMode::AllOf;
        assert!(names(&all, &MatchContext::default()).is_empty());
    }

    #[test]
    fn text_matches_notes_in_every_language() {
        let ctx = MatchContext::default();
        assert_eq!(names(&with(&[Action::SetQuery("AVOINE".into())]), &ctx), ["Béa"]);
        assert_eq!(names(&with(&[Action::SetQuery("oat".into())]), &ctx), ["Béa"]);
        // accent-insensitive
        assert_eq!(names(&with(&[Action::SetQuery("bea".into())]), &ctx), ["Béa"]);
        assert_eq!(names(&with(&[Action::SetQuery("honore".into())]), &ctx), ["Aoi"]);
    }

    #[test]
    fn text_matches_tag_labels_when_enabled() {
        let labels = LabelResolver::new();
        let s = with(&[Action::SetQuery("à emporter".into())]);
        assert!(names(&s, &MatchContext::default()).is_empty());

        let ctx = MatchContext {
            tag_labels: Some((&labels, Language::Fr)),
            ..Default::default()
        };
        assert_eq!(names(&s, &ctx), ["Béa"]);
        // raw keys always match
        assert_eq!(names(&with(&[Action::SetQuery("to-go".into())]), &ctx), ["Béa"]);
    }

    #[test]
    fn criteria_combine_conjunctively() {
        let s = with(&[
            Action::SetHideUnrated(true),
            Action::SetZone("11".parse().unwrap()),
            Action::SetQuery("latte".into()),
        ]);
        assert_eq!(names(&s, &MatchContext::default()), ["Béa"]);
        let e = &store()[3];
        assert!(!matches(e, &s, &MatchContext::default()));
    }
}
