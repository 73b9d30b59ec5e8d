//! Advanced filtering example for matcha-rs
//!
//! This example demonstrates filter combinations, chips and cross-view
//! lookups between list rows and map markers.

use matcha_rs::prelude::*;
use matcha_rs::loader::{default_data_dir, DEFAULT_DATASET_FILENAME};

fn print_rows(p: &Presentation) {
    if let Some(msg) = &p.empty_message {
        println!("{msg}");
    }
    for row in &p.rows {
        println!("- {} ({}) {}", row.name, row.address, row.stars);
    }
    println!("[{}]\n", p.summary.button_label);
}

fn main() -> Result<()> {
    println!("=== matcha-rs Advanced Filtering Example ===\n");

    let path = default_data_dir().join(DEFAULT_DATASET_FILENAME);
    let config = EngineConfig::from_toml_str("tag_mode = \"any-of\"\ntop_picks_threshold = 4.6")?;
    let mut dir = Directory::new(EntryStore::load_from_path(path), config);

    // Example 1: Top picks
    println!("--- Example 1: Top picks ---");
    print_rows(dir.dispatch(Action::SetTopPicks(true)));

    // Example 2: Top picks that are also good to go (any-of with one tag)
    println!("--- Example 2: + to-go ---");
    print_rows(dir.dispatch(Action::SetTag("to-go".into(), true)));

    // Example 3: One arrondissement
    println!("--- Example 3: + zone 3 ---");
    print_rows(dir.dispatch(Action::SetZone("75003".parse().map_err(DirectoryError::Config)?)));

    // Example 4: Removing chips the way the page does
    println!("--- Example 4: remove every chip ---");
    let chips = dir.presentation().map(|p| p.summary.chips.clone()).unwrap_or_default();
    for chip in chips {
        println!("removing chip '{}'", chip.label);
        dir.dispatch(chip.removal());
    }
    print_rows(dir.dispatch(Action::SetZone(ZoneFilter::All)));

    // Example 5: Accent-insensitive search, also over French tag labels
    println!("--- Example 5: search 'a emporter' in French ---");
    dir.set_language(Language::Fr);
    print_rows(dir.dispatch(Action::SetQuery("a emporter".into())));

    // Example 6: Hover and click between list and map
    println!("--- Example 6: list <-> map ---");
    dir.dispatch(Action::SetQuery(String::new()));
    let rows = dir.presentation().map_or(0, |p| p.rows.len());
    for i in 0..rows {
        match dir.hover_row(RowHandle(i)) {
            Some(m) => println!("row {i} opens marker {}", m.0),
            None => println!("row {i} has no marker"),
        }
    }

    // Example 7: All-of versus any-of
    println!("\n--- Example 7: ceremonial + to-go, all-of ---");
    let strict = EngineConfig {
        tag_mode: TagCombineMode::AllOf,
        ..EngineConfig::default()
    };
    let mut strict_dir = Directory::new(
        EntryStore::load_from_path(default_data_dir().join(DEFAULT_DATASET_FILENAME)),
        strict,
    );
    strict_dir.dispatch(Action::SetTag("ceremonial".into(), true));
    print_rows(strict_dir.dispatch(Action::SetTag("to-go".into(), true)));

    println!("=== Example completed successfully ===");
    Ok(())
}
