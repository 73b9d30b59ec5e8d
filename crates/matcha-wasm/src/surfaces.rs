//! JS callbacks as view surfaces.

use js_sys::Function;
use matcha_core::config::TileLayer;
use matcha_core::model::Coordinates;
use matcha_core::view::{
    FilterSummary, ListRow, ListSurface, MapSurface, Marker, MarkerHandle, RowHandle,
    SummarySurface, Viewport,
};
use serde::Serialize;
use wasm_bindgen::JsValue;

/// Calls `callback(kind, payload)`; failures are logged, never raised.
fn emit<T: Serialize + ?Sized>(callback: &Option<Function>, kind: &str, payload: &T) {
    let Some(f) = callback else {
        return;
    };
    let payload = match serde_wasm_bindgen::to_value(payload) {
        Ok(v) => v,
        Err(e) => {
            log::error!("could not serialize {kind} payload: {e}");
            return;
        }
    };
    if let Err(e) = f.call2(&JsValue::NULL, &JsValue::from_str(kind), &payload) {
        log::warn!("{kind} callback threw: {e:?}");
    }
}

#[derive(Serialize)]
struct ListUpdate<'a> {
    rows: &'a [ListRow],
    empty_message: Option<&'a str>,
}

#[derive(Serialize)]
struct MapInit<'a> {
    tiles: &'a TileLayer,
    center: Coordinates,
    zoom: u8,
}

#[derive(Serialize)]
struct MapUpdate<'a> {
    markers: &'a [Marker],
    viewport: &'a Viewport,
}

pub struct JsList(pub Option<Function>);

impl ListSurface for JsList {
    fn render(&mut self, rows: &[ListRow], empty_message: Option<&str>) {
        emit(&self.0, "render", &ListUpdate { rows, empty_message });
    }

    fn highlight(&mut self, row: RowHandle) {
        emit(&self.0, "highlight", &row.0);
    }
}

pub struct JsMap(pub Option<Function>);

impl MapSurface for JsMap {
    fn init(&mut self, tiles: &TileLayer, center: Coordinates, zoom: u8) {
        emit(&self.0, "init", &MapInit { tiles, center, zoom });
    }

    fn render(&mut self, markers: &[Marker], viewport: &Viewport) {
        emit(&self.0, "render", &MapUpdate { markers, viewport });
    }

    fn open_popup(&mut self, marker: MarkerHandle) {
        emit(&self.0, "popup", &marker.0);
    }
}

pub struct JsSummary(pub Option<Function>);

impl SummarySurface for JsSummary {
    fn render(&mut self, summary: &FilterSummary) {
        emit(&self.0, "render", summary);
    }
}
