// crates/matcha-core/src/view.rs

//! # View Synchronizer
//!
//! Drives the list, map and summary surfaces from one ordered sequence of
//! visible entries, and resolves hover/click events between list rows and
//! map markers.
//!
//! Rows and markers are positional within one recompute only. Cross-view
//! lookups go through a [`ViewIndex`] keyed by [`EntryId`], rebuilt on every
//! [`ViewSynchronizer::present`], so a handle from an older cycle can never
//! resolve to the wrong entry: it either maps to the same entry or to nothing.

use crate::config::MapConfig;
use crate::config::TileLayer;
use crate::i18n::{LabelResolver, Language, UiString};
use crate::model::{Coordinates, Entry, EntryId, Rating};
use crate::state::{Action, FilterState};
use serde::Serialize;
use std::collections::HashMap;

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Position of a row in the current list rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RowHandle(pub usize);

/// Position of a marker in the current map rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerHandle(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagBadge {
    pub key: String,
    pub label: String,
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub entry: EntryId,
    pub row: RowHandle,
    pub name: String,
    pub address: String,
    /// Price or `—`.
    pub price: String,
    pub tags: Vec<TagBadge>,
    pub rating: Option<f64>,
    pub stars: String,
    pub link: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub address: String,
    pub rating_line: String,
}

/// One rendered map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub entry: EntryId,
    pub marker: MarkerHandle,
    /// The list row showing the same entry.
    pub row: RowHandle,
    pub position: Coordinates,
    pub popup: Popup,
}

/// Lat/lng rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn around(points: impl IntoIterator<Item = Coordinates>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let init = Bounds {
            south: first.lat,
            west: first.lng,
            north: first.lat,
            east: first.lng,
        };
        Some(it.fold(init, |b, p| Bounds {
            south: b.south.min(p.lat),
            west: b.west.min(p.lng),
            north: b.north.max(p.lat),
            east: b.east.max(p.lng),
        }))
    }

    /// Grow each side by `ratio` of the span on that axis.
    pub fn pad(self, ratio: f64) -> Self {
        let dlat = (self.north - self.south) * ratio;
        let dlng = (self.east - self.west) * ratio;
        Bounds {
            south: (self.south - dlat).max(-90.0),
            west: (self.west - dlng).max(-180.0),
            north: (self.north + dlat).min(90.0),
            east: (self.east + dlng).min(180.0),
        }
    }

    pub fn is_point(&self) -> bool {
        self.south == self.north && self.west == self.east
    }

    pub fn center(&self) -> Coordinates {
        Coordinates {
            lat: (self.south + self.north) / 2.0,
            lng: (self.west + self.east) / 2.0,
        }
    }
}

/// How the map should frame the current markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Viewport {
    /// No markers: the configured default region.
    Region { center: Coordinates, zoom: u8 },
    /// One marker (or several on the same spot).
    Centered { center: Coordinates, zoom: u8 },
    /// Fit these padded bounds.
    Fit { bounds: Bounds },
}

/// Viewport for a set of marker positions.
pub fn frame(positions: &[Coordinates], cfg: &MapConfig) -> Viewport {
    match Bounds::around(positions.iter().copied()) {
        None => Viewport::Region {
            center: Coordinates {
                lat: cfg.center[0],
                lng: cfg.center[1],
            },
            zoom: cfg.zoom,
        },
        Some(b) if b.is_point() => Viewport::Centered {
            center: b.center(),
            zoom: cfg.single_marker_zoom,
        },
        Some(b) => Viewport::Fit {
            bounds: b.pad(cfg.fit_padding),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "kebab-case")]
pub enum ChipKind {
    TopPicks,
    Tag(String),
}

/// A removable "applied filter" chip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chip {
    pub kind: ChipKind,
    pub label: String,
}

impl Chip {
    /// The action the originating control would dispatch to switch itself
    /// off.
    pub fn removal(&self) -> Action {
        match &self.kind {
            ChipKind::TopPicks => Action::SetTopPicks(false),
            ChipKind::Tag(key) => Action::SetTag(key.clone(), false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSummary {
    pub active_count: usize,
    pub chips: Vec<Chip>,
    /// `Filters` or `Filters (n)`.
    pub button_label: String,
}

impl FilterSummary {
    pub fn build(state: &FilterState, labels: &LabelResolver, lang: Language) -> Self {
        let mut chips = Vec::with_capacity(state.active_count());
        if state.top_picks {
            chips.push(Chip {
                kind: ChipKind::TopPicks,
                label: labels.ui(UiString::TopPicks, lang).to_string(),
            });
        }
        for key in &state.selected_tags {
            chips.push(Chip {
                kind: ChipKind::Tag(key.clone()),
                label: labels.facet(key, lang),
            });
        }
        let active_count = state.active_count();
        let base = labels.ui(UiString::Filters, lang);
        let button_label = if active_count > 0 {
            format!("{base} ({active_count})")
        } else {
            base.to_string()
        };
        Self {
            active_count,
            chips,
            button_label,
        }
    }
}

/// Everything rendered by one recompute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub rows: Vec<ListRow>,
    pub markers: Vec<Marker>,
    pub viewport: Viewport,
    pub summary: FilterSummary,
    /// Set when no entry is visible.
    pub empty_message: Option<String>,
}

impl Presentation {
    pub fn visible_ids(&self) -> Vec<EntryId> {
        self.rows.iter().map(|r| r.entry).collect()
    }
}

/// Entry identity ↔ row/marker handles for the current cycle.
#[derive(Debug, Clone, Default)]
pub struct ViewIndex {
    rows: Vec<EntryId>,
    markers: Vec<EntryId>,
    by_entry: HashMap<EntryId, (RowHandle, Option<MarkerHandle>)>,
}

impl ViewIndex {
    fn build(rows: &[ListRow], markers: &[Marker]) -> Self {
        let mut by_entry: HashMap<_, _> = rows.iter().map(|r| (r.entry, (r.row, None))).collect();
        for m in markers {
            if let Some(slot) = by_entry.get_mut(&m.entry) {
                slot.1 = Some(m.marker);
            }
        }
        Self {
            rows: rows.iter().map(|r| r.entry).collect(),
            markers: markers.iter().map(|m| m.entry).collect(),
            by_entry,
        }
    }

    pub fn entry_at_row(&self, row: RowHandle) -> Option<EntryId> {
        self.rows.get(row.0).copied()
    }

    pub fn entry_at_marker(&self, marker: MarkerHandle) -> Option<EntryId> {
        self.markers.get(marker.0).copied()
    }

    pub fn row_of(&self, entry: EntryId) -> Option<RowHandle> {
        self.by_entry.get(&entry).map(|(r, _)| *r)
    }

    pub fn marker_of(&self, entry: EntryId) -> Option<MarkerHandle> {
        self.by_entry.get(&entry).and_then(|(_, m)| *m)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The list collaborator.
pub trait ListSurface {
    /// Replace the list with `rows`; an empty slice comes with `empty_message`.
    fn render(&mut self, rows: &[ListRow], empty_message: Option<&str>);
    fn highlight(&mut self, row: RowHandle);
}

/// The map collaborator.
pub trait MapSurface {
    fn init(&mut self, tiles: &TileLayer, center: Coordinates, zoom: u8);
    fn render(&mut self, markers: &[Marker], viewport: &Viewport);
    fn open_popup(&mut self, marker: MarkerHandle);
}

/// The "applied filters" collaborator.
pub trait SummarySurface {
    fn render(&mut self, summary: &FilterSummary);
}

/// Surface that drops everything; for headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl ListSurface for NullSurface {
    fn render(&mut self, _rows: &[ListRow], _empty_message: Option<&str>) {}
    fn highlight(&mut self, _row: RowHandle) {}
}

impl MapSurface for NullSurface {
    fn init(&mut self, _tiles: &TileLayer, _center: Coordinates, _zoom: u8) {}
    fn render(&mut self, _markers: &[Marker], _viewport: &Viewport) {}
    fn open_popup(&mut self, _marker: MarkerHandle) {}
}

impl SummarySurface for NullSurface {
    fn render(&mut self, _summary: &FilterSummary) {}
}

/// `★★★★☆ 4.2`, or `—` when unrated.
pub fn star_text(rating: Rating) -> String {
    match rating.value() {
        None => "—".to_string(),
        Some(r) => {
            let full = (r.round() as usize).min(5);
            format!("{}{} {:.1}", "★".repeat(full), "☆".repeat(5 - full), r)
        }
    }
}

/// Google Maps search URL for an address.
pub fn maps_link(address: &str) -> String {
    format!("{MAPS_SEARCH_URL}{}", urlencoding::encode(address))
}

fn display_name(entry: &Entry, labels: &LabelResolver, lang: Language) -> String {
    if entry.unnamed {
        labels.ui(UiString::Unnamed, lang).to_string()
    } else {
        entry.name.clone()
    }
}

fn list_row(
    entry: &Entry,
    row: RowHandle,
    labels: &LabelResolver,
    lang: Language,
) -> ListRow {
    ListRow {
        entry: entry.id,
        row,
        name: display_name(entry, labels, lang),
        address: entry.address.clone(),
        price: entry.price.clone().unwrap_or_else(|| "—".to_string()),
        tags: entry
            .tags
            .iter()
            .map(|t| TagBadge {
                key: t.as_str().to_string(),
                label: labels.facet(t.as_str(), lang),
            })
            .collect(),
        rating: entry.rating.value(),
        stars: star_text(entry.rating),
        link: entry
            .link
            .clone()
            .unwrap_or_else(|| maps_link(&entry.address)),
        notes: entry.notes.resolve(lang).map(str::to_string),
    }
}

fn popup(entry: &Entry, labels: &LabelResolver, lang: Language) -> Popup {
    let rating = entry
        .rating
        .value()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "—".to_string());
    Popup {
        title: display_name(entry, labels, lang),
        address: entry.address.clone(),
        rating_line: format!("{}: {rating}", labels.ui(UiString::MyRating, lang)),
    }
}

/// Build the full presentation for an ordered visible sequence without
/// touching any surface.
pub fn build_presentation(
    ordered: &[&Entry],
    state: &FilterState,
    cfg: &MapConfig,
    labels: &LabelResolver,
    lang: Language,
) -> Presentation {
    let rows: Vec<ListRow> = ordered
        .iter()
        .enumerate()
        .map(|(i, e)| list_row(e, RowHandle(i), labels, lang))
        .collect();

    let markers: Vec<Marker> = ordered
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.coordinates.map(|pos| (i, *e, pos)))
        .enumerate()
        .map(|(m, (i, e, position))| Marker {
            entry: e.id,
            marker: MarkerHandle(m),
            row: RowHandle(i),
            position,
            popup: popup(e, labels, lang),
        })
        .collect();

    let positions: Vec<Coordinates> = markers.iter().map(|m| m.position).collect();
    let viewport = frame(&positions, cfg);
    let empty_message = rows
        .is_empty()
        .then(|| labels.ui(UiString::NoResults, lang).to_string());

    Presentation {
        rows,
        markers,
        viewport,
        summary: FilterSummary::build(state, labels, lang),
        empty_message,
    }
}

/// Sole owner of the three surfaces.
pub struct ViewSynchronizer {
    list: Box<dyn ListSurface>,
    map: Box<dyn MapSurface>,
    summary: Box<dyn SummarySurface>,
    map_config: MapConfig,
    index: ViewIndex,
}

impl ViewSynchronizer {
    /// Takes ownership of the surfaces and initialises the map with the tile
    /// layer and default region.
    pub fn new(
        list: Box<dyn ListSurface>,
        mut map: Box<dyn MapSurface>,
        summary: Box<dyn SummarySurface>,
        map_config: MapConfig,
    ) -> Self {
        let center = Coordinates {
            lat: map_config.center[0],
            lng: map_config.center[1],
        };
        map.init(&map_config.tiles, center, map_config.zoom);
        Self {
            list,
            map,
            summary,
            map_config,
            index: ViewIndex::default(),
        }
    }

    pub fn headless(map_config: MapConfig) -> Self {
        Self::new(
            Box::new(NullSurface),
            Box::new(NullSurface),
            Box::new(NullSurface),
            map_config,
        )
    }

    /// Render one recompute cycle to every surface.
    pub fn present(
        &mut self,
        ordered: &[&Entry],
        state: &FilterState,
        labels: &LabelResolver,
        lang: Language,
    ) -> Presentation {
        let p = build_presentation(ordered, state, &self.map_config, labels, lang);
        self.index = ViewIndex::build(&p.rows, &p.markers);
        self.list.render(&p.rows, p.empty_message.as_deref());
        self.map.render(&p.markers, &p.viewport);
        self.summary.render(&p.summary);
        p
    }

    pub fn index(&self) -> &ViewIndex {
        &self.index
    }

    /// Hovering a list row opens the matching marker popup, if the entry is
    /// on the map.
    pub fn hover_row(&mut self, row: RowHandle) -> Option<MarkerHandle> {
        let entry = self.index.entry_at_row(row)?;
        self.hover_entry(entry)
    }

    pub fn hover_entry(&mut self, entry: EntryId) -> Option<MarkerHandle> {
        let marker = self.index.marker_of(entry)?;
        self.map.open_popup(marker);
        Some(marker)
    }

    /// Clicking a marker highlights the matching list row.
    pub fn click_marker(&mut self, marker: MarkerHandle) -> Option<RowHandle> {
        let entry = self.index.entry_at_marker(marker)?;
        let row = self.index.row_of(entry)?;
        self.list.highlight(row);
        Some(row)
    }
}

impl std::fmt::Debug for ViewSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewSynchronizer")
            .field("map_config", &self.map_config)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
