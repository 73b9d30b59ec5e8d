// crates/matcha-core/src/loader/fetch.rs
use crate::error::Result;
use crate::model::Entry;

/// Fetch `data.json` over HTTP with the blocking client.
///
/// The response body is always re-read, never served from a cache, matching
/// the browser page's `cache: "no-store"` fetch.
pub fn fetch_entries(url: &str) -> Result<Vec<Entry>> {
    log::info!("fetching entries from {url}");
    let client = reqwest::blocking::Client::builder().build()?;
    let body = client
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "no-store")
        .send()?
        .error_for_status()?
        .text()?;
    let entries = super::parse_entries(&body)?;
    log::info!("fetched {} entries", entries.len());
    Ok(entries)
}
