//! Terminal renditions of the three view surfaces.

use matcha_core::config::TileLayer;
use matcha_core::model::Coordinates;
use matcha_core::view::{
    FilterSummary, ListRow, ListSurface, MapSurface, Marker, MarkerHandle, RowHandle,
    SummarySurface, Viewport,
};

/// Numbered list, one block per entry.
#[derive(Debug, Default)]
pub struct TerminalList;

impl ListSurface for TerminalList {
    fn render(&mut self, rows: &[ListRow], empty_message: Option<&str>) {
        if rows.is_empty() {
            println!("{}", empty_message.unwrap_or_default());
            return;
        }
        for r in rows {
            println!("{:>3}. {}  {}", r.row.0 + 1, r.name, r.stars);
            println!("     {} · {}", r.address, r.price);
            if !r.tags.is_empty() {
                let labels: Vec<&str> = r.tags.iter().map(|t| t.label.as_str()).collect();
                println!("     {}", labels.join(", "));
            }
            if let Some(notes) = &r.notes {
                println!("     \"{notes}\"");
            }
            println!("     {}", r.link);
        }
    }

    fn highlight(&mut self, row: RowHandle) {
        println!("> row {}", row.0 + 1);
    }
}

/// Describes the framing instead of drawing tiles.
#[derive(Debug, Default)]
pub struct TerminalMap;

impl MapSurface for TerminalMap {
    fn init(&mut self, tiles: &TileLayer, center: Coordinates, zoom: u8) {
        log::debug!(
            "map tiles {} ({}), start at {:.4},{:.4} z{zoom}",
            tiles.url,
            tiles.attribution,
            center.lat,
            center.lng
        );
    }

    fn render(&mut self, markers: &[Marker], viewport: &Viewport) {
        let framing = match viewport {
            Viewport::Region { center, zoom } => {
                format!("default region {:.4},{:.4} z{zoom}", center.lat, center.lng)
            }
            Viewport::Centered { center, zoom } => {
                format!("centered on {:.4},{:.4} z{zoom}", center.lat, center.lng)
            }
            Viewport::Fit { bounds } => format!(
                "fit to {:.4},{:.4} .. {:.4},{:.4}",
                bounds.south, bounds.west, bounds.north, bounds.east
            ),
        };
        println!("\nMap: {} marker(s), {framing}", markers.len());
    }

    fn open_popup(&mut self, marker: MarkerHandle) {
        println!("> marker {}", marker.0 + 1);
    }
}

#[derive(Debug, Default)]
pub struct TerminalSummary;

impl SummarySurface for TerminalSummary {
    fn render(&mut self, summary: &FilterSummary) {
        if summary.chips.is_empty() {
            println!("[{}]", summary.button_label);
            return;
        }
        let chips: Vec<String> = summary.chips.iter().map(|c| format!("{} ×", c.label)).collect();
        println!("[{}] {}", summary.button_label, chips.join("  "));
    }
}
