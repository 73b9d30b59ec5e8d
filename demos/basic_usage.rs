//! Basic usage example for matcha-rs
//!
//! This example demonstrates how to:
//! - Load the bundled spot list
//! - Read the default ranking
//! - Switch the display language
//! - Inspect zones and statistics

use matcha_rs::loader::{default_data_dir, DEFAULT_DATASET_FILENAME};
use matcha_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== matcha-rs Basic Usage Example ===\n");

    // Load the directory
    println!("Loading spot list...");
    let path = default_data_dir().join(DEFAULT_DATASET_FILENAME);
    let config = EngineConfig::default();
    let store = EntryStore::load_from_path(&path);
    if let LoadStatus::Failed(reason) = store.status() {
        println!("✗ Could not load {}: {reason}", path.display());
    }
    let mut dir = Directory::new(store, config);
    println!("✓ {} entries loaded\n", dir.store().len());

    // Example 1: Default ranking
    println!("--- Example 1: Ranked list ---");
    for row in &dir.recompute().rows {
        println!("{}. {} {}", row.row.0 + 1, row.name, row.stars);
    }
    println!();

    // Example 2: Map framing follows the visible set
    println!("--- Example 2: Map framing ---");
    let p = dir.recompute();
    println!("{} marker(s), viewport {:?}", p.markers.len(), p.viewport);
    println!();

    // Example 3: Language switch
    println!("--- Example 3: French labels ---");
    let p = dir.set_language(Language::Fr);
    if let Some(row) = p.rows.first() {
        let tags: Vec<_> = row.tags.iter().map(|t| t.label.as_str()).collect();
        println!("{}: {}", row.name, tags.join(", "));
        if let Some(notes) = &row.notes {
            println!("  {notes}");
        }
    }
    println!();

    // Example 4: Zones present in the data
    println!("--- Example 4: Zones ---");
    for (zone, count) in dir.zone_counts() {
        println!("Zone {zone:>2}: {count} spot(s)");
    }
    println!();

    // Example 5: Statistics
    println!("--- Example 5: Statistics ---");
    let store = dir.store();
    println!("Total entries: {}", store.len());
    println!("Rated: {}", store.rated_count());
    println!("On the map: {}", store.mapped_count());

    println!("\n=== Example completed successfully ===");
    Ok(())
}
