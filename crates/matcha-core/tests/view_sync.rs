use matcha_core::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Log {
    init: Vec<(String, u8)>,
    lists: Vec<Vec<EntryId>>,
    empty_messages: Vec<Option<String>>,
    highlights: Vec<RowHandle>,
    markers: Vec<Vec<EntryId>>,
    viewports: Vec<Viewport>,
    popups: Vec<MarkerHandle>,
    summaries: Vec<FilterSummary>,
}

type Shared = Rc<RefCell<Log>>;

struct List(Shared);
struct Map(Shared);
struct Chips(Shared);

impl ListSurface for List {
    fn render(&mut self, rows: &[ListRow], empty_message: Option<&str>) {
        let mut log = self.0.borrow_mut();
        log.lists.push(rows.iter().map(|r| r.entry).collect());
        log.empty_messages.push(empty_message.map(str::to_string));
    }

    fn highlight(&mut self, row: RowHandle) {
        self.0.borrow_mut().highlights.push(row);
    }
}

impl MapSurface for Map {
    fn init(&mut self, tiles: &TileLayer, _center: Coordinates, zoom: u8) {
        self.0.borrow_mut().init.push((tiles.url.clone(), zoom));
    }

    fn render(&mut self, markers: &[Marker], viewport: &Viewport) {
        let mut log = self.0.borrow_mut();
        log.markers.push(markers.iter().map(|m| m.entry).collect());
        log.viewports.push(*viewport);
    }

    fn open_popup(&mut self, marker: MarkerHandle) {
        self.0.borrow_mut().popups.push(marker);
    }
}

impl SummarySurface for Chips {
    fn render(&mut self, summary: &FilterSummary) {
        self.0.borrow_mut().summaries.push(summary.clone());
    }
}

fn wired(entries: Vec<Entry>) -> (Directory, Shared) {
    let log: Shared = Rc::default();
    let store = EntryStore::from_entries(entries);
    let dir = Directory::new(store, EngineConfig::default()).with_surfaces(
        Box::new(List(Rc::clone(&log))),
        Box::new(Map(Rc::clone(&log))),
        Box::new(Chips(Rc::clone(&log))),
    );
    (dir, log)
}

fn spots() -> Vec<Entry> {
    vec![
        Entry::new(0, "Cerise", "75003 Paris").with_coordinates(48.86, 2.36),
        Entry::new(1, "Béa", "75011 Paris")
            .with_rating(4.8)
            .with_tags(&["to-go"]),
        Entry::new(2, "Aoi", "75001 Paris")
            .with_rating(4.8)
            .with_tags(&["ceremonial"])
            .with_coordinates(48.862, 2.336),
    ]
}

#[test]
fn map_is_initialised_once_with_tiles() {
    let (_dir, log) = wired(spots());
    let log = log.borrow();
    assert_eq!(log.init.len(), 1);
    assert_eq!(log.init[0].1, 12);
    assert!(log.init[0].0.contains("openstreetmap"));
}

#[test]
fn every_surface_sees_the_same_cycle() {
    let (mut dir, log) = wired(spots());
    dir.recompute();
    dir.dispatch(Action::SetTopPicks(true));

    let log = log.borrow();
    assert_eq!(log.lists.len(), 2);
    assert_eq!(log.markers.len(), 2);
    assert_eq!(log.summaries.len(), 2);

    assert_eq!(log.lists[0], [EntryId(2), EntryId(1), EntryId(0)]);
    // markers keep list order but skip the unmapped entry
    assert_eq!(log.markers[0], [EntryId(2), EntryId(0)]);
    assert!(matches!(log.viewports[0], Viewport::Fit { .. }));

    assert_eq!(log.lists[1], [EntryId(2), EntryId(1)]);
    assert_eq!(log.markers[1], [EntryId(2)]);
    assert!(matches!(log.viewports[1], Viewport::Centered { zoom: 15, .. }));
    assert_eq!(log.summaries[1].active_count, 1);
}

#[test]
fn no_markers_falls_back_to_default_region() {
    let (mut dir, log) = wired(spots());
    let p = dir.dispatch(Action::SetQuery("béa".into()));
    assert_eq!(p.rows.len(), 1);
    assert!(p.markers.is_empty());
    let expected = Viewport::Region {
        center: Coordinates {
            lat: 48.8566,
            lng: 2.3522,
        },
        zoom: 12,
    };
    assert_eq!(log.borrow().viewports.last(), Some(&expected));
}

#[test]
fn empty_result_renders_no_results() {
    let (mut dir, log) = wired(spots());
    dir.dispatch(Action::SetQuery("nothing like this".into()));
    let log = log.borrow();
    assert_eq!(log.lists.last().map(Vec::len), Some(0));
    assert_eq!(
        log.empty_messages.last().cloned().flatten().as_deref(),
        Some("No results.")
    );
}

#[test]
fn hover_and_click_resolve_through_entry_identity() {
    let (mut dir, log) = wired(spots());
    dir.recompute();

    // row 0 is Aoi, which is marker 0
    assert_eq!(dir.hover_row(RowHandle(0)), Some(MarkerHandle(0)));
    // row 1 is Béa, which has no marker
    assert_eq!(dir.hover_row(RowHandle(1)), None);
    // marker 1 is Cerise, shown in row 2
    assert_eq!(dir.click_marker(MarkerHandle(1)), Some(RowHandle(2)));
    assert_eq!(dir.hover_entry(EntryId(0)), Some(MarkerHandle(1)));

    // out-of-range handles are ignored
    assert_eq!(dir.hover_row(RowHandle(99)), None);
    assert_eq!(dir.click_marker(MarkerHandle(99)), None);

    let log = log.borrow();
    assert_eq!(log.popups, [MarkerHandle(0), MarkerHandle(1)]);
    assert_eq!(log.highlights, [RowHandle(2)]);
}

#[test]
fn handles_are_rebuilt_each_cycle() {
    let (mut dir, _log) = wired(spots());
    dir.recompute();
    assert_eq!(dir.click_marker(MarkerHandle(1)), Some(RowHandle(2)));

    dir.dispatch(Action::SetHideUnrated(true));
    // Cerise is gone; marker 1 no longer exists
    assert_eq!(dir.click_marker(MarkerHandle(1)), None);
    assert_eq!(dir.click_marker(MarkerHandle(0)), Some(RowHandle(0)));
    assert_eq!(dir.hover_entry(EntryId(0)), None);
}

#[test]
fn chip_removal_goes_through_the_control_path() {
    let (mut dir, log) = wired(spots());
    dir.dispatch(Action::SetTopPicks(true));
    let p = dir.dispatch(Action::SetTag("ceremonial".into(), true));
    assert_eq!(p.summary.button_label, "Filters (2)");
    let chips = p.summary.chips.clone();

    for chip in chips {
        dir.dispatch(chip.removal());
    }
    let state = dir.filters().clone();
    assert_eq!(state, FilterState::default());
    assert_eq!(log.borrow().summaries.last().map(|s| s.active_count), Some(0));
    assert_eq!(dir.presentation().unwrap().rows.len(), 3);
}

#[test]
fn failed_load_stays_interactive() {
    let log: Shared = Rc::default();
    let mut dir = Directory::new(EntryStore::from_json_str("{ broken"), EngineConfig::default())
        .with_surfaces(
            Box::new(List(Rc::clone(&log))),
            Box::new(Map(Rc::clone(&log))),
            Box::new(Chips(Rc::clone(&log))),
        );
    assert!(matches!(dir.store().status(), LoadStatus::Failed(_)));
    let p = dir.dispatch(Action::ToggleTopPicks);
    assert!(p.rows.is_empty());
    assert_eq!(p.summary.active_count, 1);
    assert!(matches!(p.viewport, Viewport::Region { .. }));
    assert_eq!(dir.phase(), Phase::Idle);
}

#[test]
fn listeners_hear_each_dispatch_once() {
    let (mut dir, _log) = wired(spots());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    dir.subscribe(move |s: &FilterState| sink.borrow_mut().push(s.top_picks));
    dir.dispatch(Action::ToggleTopPicks);
    dir.dispatch(Action::ToggleTopPicks);
    dir.set_language(Language::Fr);
    assert_eq!(*seen.borrow(), [true, false]);
}
