//! matcha-wasm: WebAssembly bindings for matcha-core
//!
//! Exposes one [`MatchaSession`] per page. The page hands over the entry
//! list (the JSON it fetched) and three callbacks that stand in for the list,
//! map and "applied filters" views. Every control on the page then calls a
//! session method, and the session re-renders all three views in one pass.
//!
//! Callback protocol
//! -----------------
//! Each callback receives `(kind, payload)`:
//! - list: `("render", { rows, empty_message })`, `("highlight", row)`
//! - map: `("init", { tiles, center, zoom })`, `("render", { markers, viewport })`,
//!   `("popup", marker)`
//! - summary: `("render", { active_count, chips, button_label })`
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { MatchaSession } from 'matcha-wasm';
//!
//! await init();
//! const data = await (await fetch('data.json', { cache: 'no-store' })).text();
//! const session = new MatchaSession(data, null, drawList, drawMap, drawChips);
//! session.recompute();
//!
//! topPicksToggle.onchange = () => session.toggle_top_picks();
//! searchBox.oninput = (e) => session.set_query(e.target.value);
//! langSelect.onchange = (e) => session.set_language(e.target.value);
//! ```
//!
//! Notes
//! -----
//! - Filter state lives only in the session; the language choice is kept in
//!   `localStorage` under `lang`.
//! - A document that fails to parse yields an empty, still interactive
//!   session rather than an error.

use js_sys::Function;
use matcha_core::prelude::*;
use serde::Serialize;
use std::result::Result;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

mod surfaces;

use crate::surfaces::{JsList, JsMap, JsSummary};

/// Forwards the `log` facade to the browser console.
#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        let msg = JsValue::from(format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            _ => web_sys::console::log_1(&msg),
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
static LOGGER: ConsoleLogger = ConsoleLogger;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
    web_sys::console::log_1(&"matcha-wasm ready".into());
}

/// `localStorage`-backed preferences.
#[cfg(target_arch = "wasm32")]
struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_arch = "wasm32")]
impl Preferences for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) {
        let stored = Self::storage().map(|s| s.set_item(key, value));
        if !matches!(stored, Some(Ok(()))) {
            log::warn!("could not persist preference {key}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn page_preferences() -> Box<dyn Preferences> {
    Box::new(LocalStorage)
}

#[cfg(not(target_arch = "wasm32"))]
fn page_preferences() -> Box<dyn Preferences> {
    Box::new(MemoryPreferences::default())
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[derive(Serialize)]
struct ZoneOption {
    zone: u8,
    count: usize,
}

#[wasm_bindgen]
pub struct MatchaSession {
    dir: Directory,
}

#[wasm_bindgen]
impl MatchaSession {
    /// `config_toml` may be null for the defaults. Missing callbacks are
    /// treated as views that ignore their updates.
    #[wasm_bindgen(constructor)]
    pub fn new(
        entries_json: &str,
        config_toml: Option<String>,
        list: Option<Function>,
        map: Option<Function>,
        summary: Option<Function>,
    ) -> Result<MatchaSession, JsValue> {
        let config = match config_toml {
            Some(text) => EngineConfig::from_toml_str(&text).map_err(js_error)?,
            None => EngineConfig::default(),
        };
        let store = EntryStore::from_json_str(entries_json);
        let dir = Directory::new(store, config)
            .with_preferences(page_preferences())
            .with_surfaces(
                Box::new(JsList(list)),
                Box::new(JsMap(map)),
                Box::new(JsSummary(summary)),
            );
        Ok(MatchaSession { dir })
    }

    /// Re-render every view for the current state.
    pub fn recompute(&mut self) {
        self.dir.recompute();
    }

    /// The last rendered presentation as a plain object.
    pub fn presentation(&self) -> Result<JsValue, JsValue> {
        to_value(&self.dir.presentation()).map_err(js_error)
    }

    /// Apply a serialized action, e.g. `{ type: "set-tag", value: ["to-go", true] }`.
    pub fn dispatch(&mut self, action: JsValue) -> Result<(), JsValue> {
        let action: Action = serde_wasm_bindgen::from_value(action).map_err(js_error)?;
        self.dir.dispatch(action);
        Ok(())
    }

    pub fn set_query(&mut self, query: &str) {
        self.dir.dispatch(Action::SetQuery(query.to_string()));
    }

    pub fn toggle_top_picks(&mut self) {
        self.dir.dispatch(Action::ToggleTopPicks);
    }

    pub fn set_hide_unrated(&mut self, on: bool) {
        self.dir.dispatch(Action::SetHideUnrated(on));
    }

    /// `null` or `undefined` selects all zones.
    pub fn set_zone(&mut self, zone: Option<u8>) -> Result<(), JsValue> {
        let filter = match zone {
            None => ZoneFilter::All,
            Some(n) => ZoneFilter::Zone(Zone::try_from(n).map_err(js_error)?),
        };
        self.dir.dispatch(Action::SetZone(filter));
        Ok(())
    }

    pub fn toggle_tag(&mut self, key: &str) {
        self.dir.dispatch(Action::ToggleTag(key.to_string()));
    }

    pub fn clear_all(&mut self) {
        self.dir.dispatch(Action::ClearAll);
    }

    /// Switch language (`"en"`, `"fr"`), remember it and re-render.
    pub fn set_language(&mut self, code: &str) -> Result<(), JsValue> {
        let lang: Language = code.parse().map_err(js_error)?;
        self.dir.set_language(lang);
        Ok(())
    }

    pub fn language(&self) -> String {
        self.dir.language().code().to_string()
    }

    pub fn active_count(&self) -> usize {
        self.dir.filters().active_count()
    }

    pub fn visible_count(&self) -> usize {
        self.dir.presentation().map_or(0, |p| p.rows.len())
    }

    /// Hovering list row `row`; returns the marker whose popup was opened.
    pub fn hover_row(&mut self, row: usize) -> Option<usize> {
        self.dir.hover_row(RowHandle(row)).map(|m| m.0)
    }

    /// Clicking marker `marker`; returns the highlighted row.
    pub fn click_marker(&mut self, marker: usize) -> Option<usize> {
        self.dir.click_marker(MarkerHandle(marker)).map(|r| r.0)
    }

    /// Zones present in the data, for the zone selector.
    pub fn zones(&self) -> Result<JsValue, JsValue> {
        let zones: Vec<ZoneOption> = self
            .dir
            .zone_counts()
            .into_iter()
            .map(|(z, count)| ZoneOption {
                zone: z.get(),
                count,
            })
            .collect();
        to_value(&zones).map_err(js_error)
    }

    /// Every fixed UI string in the current language, keyed like
    /// `top_picks` or `no_results`, for labelling static controls.
    pub fn ui_labels(&self) -> Result<JsValue, JsValue> {
        to_value(&self.dir.labels().ui_table(self.dir.language())).map_err(js_error)
    }

    /// Label for a facet key in the current language.
    pub fn label(&self, key: &str) -> String {
        self.dir.labels().facet(key, self.dir.language())
    }
}

/// Arrondissement for an address, if it carries a Paris postal code.
#[wasm_bindgen]
pub fn classify_address(address: &str) -> Option<u8> {
    matcha_core::zone::classify(address).map(Zone::get)
}
