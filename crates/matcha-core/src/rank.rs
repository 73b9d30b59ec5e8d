// crates/matcha-core/src/rank.rs

//! # Ranking Engine
//!
//! Deterministic display order. Sorting is stable, so the only entries that
//! keep their relative input order are true duplicates (same rating, names
//! equal under collation).

use crate::config::SortMode;
use crate::model::Entry;
use crate::text::collate;
use std::cmp::Ordering;

/// Ordering of two entries under `mode`.
pub fn compare(a: &Entry, b: &Entry, mode: SortMode) -> Ordering {
    match mode {
        SortMode::RatingThenName => a
            .rating
            .cmp_desc(b.rating)
            .then_with(|| collate(&a.name, &b.name)),
        SortMode::NameOnly => collate(&a.name, &b.name),
    }
}

/// Sort the visible entries in place.
pub fn rank(entries: &mut [&Entry], mode: SortMode) {
    entries.sort_by(|a, b| compare(a, b, mode));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(entries: &[Entry], mode: SortMode) -> Vec<&str> {
        let mut refs: Vec<&Entry> = entries.iter().collect();
        rank(&mut refs, mode);
        refs.into_iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn rating_desc_then_french_name_order() {
        let entries = vec![
            Entry::new(0, "Cerise", ""),
            Entry::new(1, "Béa", "").with_rating(4.8),
            Entry::new(2, "Aoi", "").with_rating(4.8),
            Entry::new(3, "Zen", "").with_rating(3.0),
            Entry::new(4, "Élan", "").with_rating(3.0),
            Entry::new(5, "Nul", "").with_rating(0.0),
        ];
        assert_eq!(
            order(&entries, SortMode::RatingThenName),
            ["Aoi", "Béa", "Élan", "Zen", "Nul", "Cerise"]
        );
    }

    #[test]
    fn name_only_ignores_rating() {
        let entries = vec![
            Entry::new(0, "cerise", "").with_rating(1.0),
            Entry::new(1, "Béa", ""),
            Entry::new(2, "Aoi", "").with_rating(5.0),
        ];
        assert_eq!(order(&entries, SortMode::NameOnly), ["Aoi", "Béa", "cerise"]);
    }

    #[test]
    fn duplicates_keep_input_order() {
        let entries = vec![
            Entry::new(0, "Umi", "A").with_rating(4.0),
            Entry::new(1, "UMI", "B").with_rating(4.0),
            Entry::new(2, "Umi", "C").with_rating(4.0),
        ];
        let mut refs: Vec<&Entry> = entries.iter().collect();
        rank(&mut refs, SortMode::RatingThenName);
        let addresses: Vec<_> = refs.iter().map(|e| e.address.as_str()).collect();
        assert_eq!(addresses, ["A", "B", "C"]);
    }

    #[test]
    fn unrated_sorts_after_zero() {
        let a = Entry::new(0, "A", "");
        let b = Entry::new(1, "B", "").with_rating(0.0);
        assert_eq!(compare(&a, &b, SortMode::RatingThenName), Ordering::Greater);
    }
}
