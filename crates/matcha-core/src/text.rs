// crates/matcha-core/src/text.rs

//! Text folding and collation helpers shared by search and ranking.

use std::cmp::Ordering;

/// Convert a string into a folded key suitable for matching and comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Béa` -> `Bea`, `Œuf` -> `OEuf`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use matcha_core::text::fold_key;
///
/// assert_eq!(fold_key("Béa"), "bea");
/// assert_eq!(fold_key("Crème BRÛLÉE"), "creme brulee");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Accent- and case-insensitive ordering of display names.
///
/// Approximates French collation at "base" strength: `Béa`, `bea` and `BEA`
/// compare equal, and accented names sort next to their unaccented siblings
/// instead of after `z`.
pub fn collate(a: &str, b: &str) -> Ordering {
    fold_key(a).cmp(&fold_key(b))
}

/// Trim and lower-case a user query the way the search box stores it.
pub fn normalize_query(q: &str) -> String {
    q.trim().to_lowercase()
}
