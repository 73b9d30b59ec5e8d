// crates/matcha-core/src/i18n.rs

//! # Locale / Label Resolver
//!
//! Maps stable facet keys and fixed UI string ids to display text for the
//! active language. Entries always store the raw keys; labels are resolved at
//! render and search time only.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// The fixed facet vocabulary offered by the filter panel.
pub const FACETS: [&str; 5] = ["work-friendly", "no-laptops", "to-go", "ceremonial", "flavoured"];

/// Preference key under which the chosen language is persisted.
pub const LANGUAGE_PREF_KEY: &str = "lang";

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Accepts bare codes and full tags (`"fr"`, `"FR"`, `"fr-CA"`, `"en_GB"`).
impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            _ => Err(format!("unsupported language: {s}")),
        }
    }
}

/// Fixed UI strings rendered by the surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiString {
    Filters,
    TopPicks,
    HideUnrated,
    AllZones,
    NoResults,
    MyRating,
    OpenInMaps,
    Unnamed,
    Remove,
}

impl UiString {
    pub const ALL: [UiString; 9] = [
        UiString::Filters,
        UiString::TopPicks,
        UiString::HideUnrated,
        UiString::AllZones,
        UiString::NoResults,
        UiString::MyRating,
        UiString::OpenInMaps,
        UiString::Unnamed,
        UiString::Remove,
    ];

    /// Stable identifier used by hosts to look a string up.
    pub fn key(self) -> &'static str {
        match self {
            UiString::Filters => "filters",
            UiString::TopPicks => "top_picks",
            UiString::HideUnrated => "hide_unrated",
            UiString::AllZones => "all_zones",
            UiString::NoResults => "no_results",
            UiString::MyRating => "my_rating",
            UiString::OpenInMaps => "open_in_maps",
            UiString::Unnamed => "unnamed",
            UiString::Remove => "remove",
        }
    }
}

/// Resolves facet keys and UI strings, falling back to English and then to
/// the raw key.
#[derive(Debug, Clone)]
pub struct LabelResolver {
    facets: HashMap<(Language, String), String>,
    fallback: Language,
}

impl Default for LabelResolver {
    fn default() -> Self {
        let mut facets = HashMap::new();
        let table: [(&str, &str, &str); 5] = [
            ("work-friendly", "Work-friendly", "Idéal pour travailler"),
            ("no-laptops", "No laptops", "Sans ordinateur"),
            ("to-go", "To go", "À emporter"),
            ("ceremonial", "Ceremonial", "Cérémonial"),
            ("flavoured", "Flavoured", "Aromatisé"),
        ];
        for (key, en, fr) in table {
            facets.insert((Language::En, key.to_string()), en.to_string());
            facets.insert((Language::Fr, key.to_string()), fr.to_string());
        }
        Self {
            facets,
            fallback: Language::En,
        }
    }
}

impl LabelResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or override a facet label.
    pub fn with_facet(mut self, lang: Language, key: &str, label: &str) -> Self {
        self.facets
            .insert((lang, key.to_lowercase()), label.to_string());
        self
    }

    /// Display label for a facet key. Unknown keys are shown as-is.
    pub fn facet(&self, key: &str, lang: Language) -> String {
        let key = key.to_lowercase();
        self.facets
            .get(&(lang, key.clone()))
            .or_else(|| self.facets.get(&(self.fallback, key.clone())))
            .cloned()
            .unwrap_or(key)
    }

    /// Every UI string for `lang`, keyed by [`UiString::key`], so a host can
    /// label its static controls in one go.
    pub fn ui_table(&self, lang: Language) -> BTreeMap<&'static str, &'static str> {
        UiString::ALL
            .into_iter()
            .map(|id| (id.key(), self.ui(id, lang)))
            .collect()
    }

    pub fn ui(&self, id: UiString, lang: Language) -> &'static str {
        match (id, lang) {
            (UiString::Filters, Language::En) => "Filters",
            (UiString::Filters, Language::Fr) => "Filtres",
            (UiString::TopPicks, Language::En) => "Top picks",
            (UiString::TopPicks, Language::Fr) => "Coups de cœur",
            (UiString::HideUnrated, Language::En) => "Hide unrated",
            (UiString::HideUnrated, Language::Fr) => "Masquer les non notés",
            (UiString::AllZones, Language::En) => "All arrondissements",
            (UiString::AllZones, Language::Fr) => "Tous les arrondissements",
            (UiString::NoResults, Language::En) => "No results.",
            (UiString::NoResults, Language::Fr) => "Aucun résultat.",
            (UiString::MyRating, Language::En) => "My rating",
            (UiString::MyRating, Language::Fr) => "Ma note",
            (UiString::OpenInMaps, Language::En) => "Open in Google Maps",
            (UiString::OpenInMaps, Language::Fr) => "Ouvrir dans Google Maps",
            (UiString::Unnamed, Language::En) => "(unnamed)",
            (UiString::Unnamed, Language::Fr) => "(sans nom)",
            (UiString::Remove, Language::En) => "Remove",
            (UiString::Remove, Language::Fr) => "Retirer",
        }
    }
}

/// Key-value storage for the few settings that outlive a session.
///
/// Only the language preference is persisted; filter state never is.
pub trait Preferences {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);

    fn language(&self) -> Option<Language> {
        self.get(LANGUAGE_PREF_KEY)?.parse().ok()
    }

    fn set_language(&mut self, lang: Language) {
        self.set(LANGUAGE_PREF_KEY, lang.code());
    }
}

/// In-memory preferences, used by tests and by hosts without storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences(HashMap<String, String>);

impl Preferences for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language_tags() {
        assert_eq!("fr-FR".parse::<Language>(), Ok(Language::Fr));
        assert_eq!("EN_gb".parse::<Language>(), Ok(Language::En));
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn facet_labels_fall_back() {
        let r = LabelResolver::new().with_facet(Language::En, "iced", "Iced");
        assert_eq!(r.facet("to-go", Language::Fr), "À emporter");
        assert_eq!(r.facet("TO-GO", Language::En), "To go");
        // no French label registered -> English
        assert_eq!(r.facet("iced", Language::Fr), "Iced");
        // unknown everywhere -> raw key
        assert_eq!(r.facet("rooftop", Language::Fr), "rooftop");
    }

    #[test]
    fn every_facet_has_both_languages() {
        let r = LabelResolver::new();
        for key in FACETS {
            for lang in Language::ALL {
                assert_ne!(r.facet(key, lang), key);
            }
        }
    }

    #[test]
    fn ui_table_covers_every_string() {
        let fr = LabelResolver::new().ui_table(Language::Fr);
        assert_eq!(fr.len(), UiString::ALL.len());
        assert_eq!(fr["hide_unrated"], "Masquer les non notés");
        assert_eq!(fr["remove"], "Retirer");
    }

    #[test]
    fn language_preference_round_trips_through_store() {
        let mut prefs = MemoryPreferences::default();
        assert_eq!(prefs.language(), None);
        prefs.set_language(Language::Fr);
        assert_eq!(prefs.get(LANGUAGE_PREF_KEY).as_deref(), Some("fr"));
        assert_eq!(prefs.language(), Some(Language::Fr));
    }
}
