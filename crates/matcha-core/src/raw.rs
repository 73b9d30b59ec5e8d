// crates/matcha-core/src/raw.rs

//! Raw entry records as they come from `data.json`.
//!
//! Every field is kept as an untyped JSON value so that a single malformed
//! field (a string where a number belongs, a number where a name belongs)
//! never rejects the record. Typing happens in [`crate::model::convert`].

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Accepted spellings per field, preferred spelling first.
const NAME_KEYS: &[&str] = &["name"];
const ADDRESS_KEYS: &[&str] = &["address"];
const LAT_KEYS: &[&str] = &["lat", "latitude"];
const LNG_KEYS: &[&str] = &["lng", "lon", "longitude"];
const RATING_KEYS: &[&str] = &["my_rating", "rating"];
const PRICE_KEYS: &[&str] = &["price"];
const TAGS_KEYS: &[&str] = &["tags"];
const NOTES_KEYS: &[&str] = &["notes"];
const LINK_KEYS: &[&str] = &["link", "url"];

/// Raw entry structure from JSON.
///
/// Known field spellings:
/// ```json
/// {
///   "name": "Kodama",
///   "address": "12 Rue de Rivoli, 75004 Paris",
///   "lat": 48.85, "lng": 2.35,
///   "my_rating": 4.8,
///   "price": "€€",
///   "tags": ["ceremonial", "to-go"],
///   "notes": "Great usucha", "notes_fr": "Excellent usucha"
/// }
/// ```
///
/// A record may carry several spellings of one field (`rating` next to
/// `my_rating`); the preferred spelling with a non-null value wins.
#[derive(Debug, Default)]
pub struct EntryRaw {
    pub name: Option<Value>,
    pub address: Option<Value>,
    pub lat: Option<Value>,
    pub lng: Option<Value>,
    pub my_rating: Option<Value>,
    pub price: Option<Value>,
    pub tags: Option<Value>,
    /// Either a plain string or a `{ "en": "...", "fr": "..." }` object.
    pub notes: Option<Value>,
    pub link: Option<Value>,
    /// Catch-all for `notes_<lang>` variants and unknown keys.
    pub extra: HashMap<String, Value>,
}

/// Removes every spelling in `keys` from `obj` and keeps the first non-null one.
fn take_field(obj: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    let mut found = None;
    for key in keys {
        match obj.remove(*key) {
            Some(Value::Null) | None => {}
            Some(v) if found.is_none() => found = Some(v),
            Some(_) => log::debug!("ignoring duplicate spelling `{key}`"),
        }
    }
    found
}

impl EntryRaw {
    pub fn from_object(mut obj: Map<String, Value>) -> Self {
        EntryRaw {
            name: take_field(&mut obj, NAME_KEYS),
            address: take_field(&mut obj, ADDRESS_KEYS),
            lat: take_field(&mut obj, LAT_KEYS),
            lng: take_field(&mut obj, LNG_KEYS),
            my_rating: take_field(&mut obj, RATING_KEYS),
            price: take_field(&mut obj, PRICE_KEYS),
            tags: take_field(&mut obj, TAGS_KEYS),
            notes: take_field(&mut obj, NOTES_KEYS),
            link: take_field(&mut obj, LINK_KEYS),
            extra: obj.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for EntryRaw {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(EntryRaw::from_object)
    }
}

pub type EntriesRaw = Vec<EntryRaw>;

/// Split a JSON document into raw records, skipping array items that are not
/// objects. Returns the records and the number of skipped items.
pub fn split_records(doc: Value) -> (EntriesRaw, usize) {
    let items = match doc {
        Value::Array(items) => items,
        // a single object is treated as a one-entry list
        obj @ Value::Object(_) => vec![obj],
        _ => return (Vec::new(), 0),
    };

    let total = items.len();
    let records = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(obj) => Some(EntryRaw::from_object(obj)),
            _ => None,
        })
        .collect::<Vec<_>>();
    let skipped = total - records.len();
    (records, skipped)
}
