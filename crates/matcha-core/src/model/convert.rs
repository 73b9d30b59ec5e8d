// crates/matcha-core/src/model/convert.rs
use super::{Coordinates, Entry, EntryId, Notes, Rating, Tag, UNNAMED};
use crate::i18n::Language;
use crate::raw::EntryRaw;
use serde_json::Value;

/// Prefix of the flat per-language note keys (`notes_fr`, `notes_en`).
const NOTES_PREFIX: &str = "notes_";

fn as_text(v: &Option<Value>) -> Option<String> {
    match v {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn as_number(v: &Option<Value>) -> Option<f64> {
    v.as_ref().and_then(Value::as_f64)
}

fn tags_from(v: Option<Value>) -> Vec<Tag> {
    match v {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(Tag::new)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![Tag::new(s.trim())],
        _ => Vec::new(),
    }
}

fn notes_from(notes: Option<Value>, extra: &std::collections::HashMap<String, Value>) -> Notes {
    let mut out = Notes::default();
    match notes {
        Some(Value::String(s)) if !s.trim().is_empty() => out.base = Some(s.trim().to_string()),
        Some(Value::Object(map)) => {
            for (k, v) in map {
                let Some(text) = v.as_str().map(str::trim).filter(|t| !t.is_empty()) else {
                    continue;
                };
                match k.parse::<Language>() {
                    Ok(lang) => {
                        out.localized.insert(lang, text.to_string());
                    }
                    Err(_) if k == "base" || k == "default" => out.base = Some(text.to_string()),
                    Err(_) => {}
                }
            }
        }
        _ => {}
    }
    for (k, v) in extra {
        let Some(code) = k.strip_prefix(NOTES_PREFIX) else {
            continue;
        };
        let (Ok(lang), Some(text)) = (code.parse::<Language>(), v.as_str()) else {
            continue;
        };
        if !text.trim().is_empty() {
            out.localized
                .entry(lang)
                .or_insert_with(|| text.trim().to_string());
        }
    }
    out
}

/// **Standard Converter:** Raw -> Entry.
///
/// Never fails: each malformed field becomes absent on its own, and a
/// missing name becomes [`UNNAMED`].
pub fn from_raw(id: u32, raw: EntryRaw) -> Entry {
    let name = as_text(&raw.name);
    if name.is_none() {
        log::debug!("entry #{id}: missing or non-string name, using placeholder");
    }

    let coordinates = match (as_number(&raw.lat), as_number(&raw.lng)) {
        (Some(lat), Some(lng)) => Coordinates::new(lat, lng),
        (None, None) => None,
        _ => {
            log::debug!("entry #{id}: partial coordinates, not mappable");
            None
        }
    };

    let rating = as_number(&raw.my_rating)
        .map(Rating::new)
        .unwrap_or_default();
    if raw.my_rating.as_ref().is_some_and(|v| !v.is_null()) && !rating.is_rated() {
        log::debug!("entry #{id}: rating {:?} treated as unrated", raw.my_rating);
    }

    let notes = notes_from(raw.notes, &raw.extra);

    Entry {
        id: EntryId(id),
        unnamed: name.is_none(),
        name: name.unwrap_or_else(|| UNNAMED.to_string()),
        address: as_text(&raw.address).unwrap_or_default(),
        coordinates,
        rating,
        price: as_text(&raw.price),
        tags: tags_from(raw.tags),
        notes,
        link: as_text(&raw.link),
    }
}

/// Convert a whole document, numbering entries in input order.
pub fn entries_from_raw(raw: Vec<EntryRaw>) -> Vec<Entry> {
    raw.into_iter()
        .enumerate()
        .map(|(i, r)| from_raw(i as u32, r))
        .collect()
}
