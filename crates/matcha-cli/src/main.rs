//! matcha: terminal front-end for matcha-core
//!
//! Loads the spot list, applies the same filter controls as the web page
//! and prints the resulting list, map framing and applied-filter chips.
//!
//! Usage examples
//! --------------
//!
//! - Ranked list of everything
//!   $ matcha list
//!
//! - Top picks in the 11th that are good to go
//!   $ matcha list --top --zone 11 --tag to-go
//!
//! - Search in French, combining tags with all-of
//!   $ matcha --lang fr list -q "sans ordinateur" -t ceremonial -t to-go --mode all-of
//!
//! - Zones present in the data / data summary
//!   $ matcha zones
//!   $ matcha stats
//!
//! - Remember a language between runs
//!   $ matcha --prefs ~/.matcha.json lang fr
//!
//! Data source
//! -----------
//!
//! Without `--input` the CLI reads `data.json` from the `matcha-core` data
//! directory. `.json.gz` files are decompressed transparently; with the
//! `fetch` feature `--input` may also be an http(s) URL. Set `RUST_LOG` or
//! pass `-v` for diagnostics.
mod args;
mod prefs;
mod render;

use crate::args::{CliArgs, Commands, FilterArgs};
use crate::prefs::FilePreferences;
use crate::render::{TerminalList, TerminalMap, TerminalSummary};
use anyhow::Context;
use clap::Parser;
use matcha_core::loader::{default_data_dir, DEFAULT_DATASET_FILENAME};
use matcha_core::prelude::*;

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(log::LevelFilter::Info);
        }
        _ => {
            builder.filter_level(log::LevelFilter::Debug);
        }
    }
    builder.target(env_logger::Target::Stderr).init();
}

#[cfg(feature = "fetch")]
fn fetch_store(url: &str) -> anyhow::Result<EntryStore> {
    Ok(EntryStore::fetch(url))
}

#[cfg(not(feature = "fetch"))]
fn fetch_store(url: &str) -> anyhow::Result<EntryStore> {
    anyhow::bail!("cannot load {url}: rebuild matcha-cli with the `fetch` feature")
}

fn load_store(input: Option<&str>) -> anyhow::Result<EntryStore> {
    let store = match input {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => fetch_store(url)?,
        Some(path) => EntryStore::load_from_path(path),
        None => EntryStore::load_from_path(default_data_dir().join(DEFAULT_DATASET_FILENAME)),
    };
    if let LoadStatus::Failed(reason) = store.status() {
        eprintln!("warning: no entries loaded ({reason})");
    }
    Ok(store)
}

fn open_preferences(args: &CliArgs) -> anyhow::Result<Box<dyn Preferences>> {
    Ok(match &args.prefs {
        Some(path) => Box::new(
            FilePreferences::open(path)
                .with_context(|| format!("reading preferences {}", path.display()))?,
        ),
        None => Box::new(MemoryPreferences::default()),
    })
}

fn run_list(mut dir: Directory, filters: &FilterArgs) -> anyhow::Result<()> {
    for action in filters.actions() {
        dir.dispatch(action);
    }

    if filters.json {
        println!("{}", serde_json::to_string_pretty(dir.recompute())?);
        return Ok(());
    }

    // Surfaces are attached last so the list prints once, for the final state.
    let mut dir = dir.with_surfaces(
        Box::new(TerminalList),
        Box::new(TerminalMap),
        Box::new(TerminalSummary),
    );
    dir.recompute();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => EngineConfig::load_from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Commands::List(f) = &args.command {
        if let Some(mode) = f.mode {
            config.tag_mode = mode.into();
        }
        if let Some(sort) = f.sort {
            config.sort_mode = sort.into();
        }
    }

    let mut prefs = open_preferences(&args)?;

    if let Commands::Lang { code } = &args.command {
        match code.or(args.lang) {
            Some(lang) => {
                prefs.set_language(lang);
                if args.prefs.is_none() {
                    eprintln!("note: no --prefs file given, the choice is not remembered");
                }
                println!("{}", lang.code());
            }
            None => {
                let lang = prefs.language().unwrap_or(config.default_language);
                println!("{}", lang.code());
            }
        }
        return Ok(());
    }

    let store = load_store(args.input.as_deref())?;
    let mut dir = Directory::new(store, config).with_preferences(prefs);
    if let Some(lang) = args.lang {
        // for this run only; `matcha lang` is what remembers a choice
        dir = dir.with_language(lang);
    }

    match &args.command {
        Commands::List(filters) => run_list(dir, filters)?,

        Commands::Zones => {
            let zones = dir.zone_counts();
            if zones.is_empty() {
                println!("{}", dir.labels().ui(UiString::NoResults, dir.language()));
            } else {
                let all = dir.labels().ui(UiString::AllZones, dir.language());
                println!("{all} ({})", dir.store().len());
                for (zone, count) in zones {
                    println!("  {:>2}  750{:02}  {count}", zone.get(), zone.get());
                }
            }
        }

        Commands::Stats => {
            let store = dir.store();
            println!("Directory statistics:");
            println!("  Status: {:?}", store.status());
            println!("  Entries: {}", store.len());
            println!("  Rated: {}", store.rated_count());
            println!("  On the map: {}", store.mapped_count());
            println!("  Zones: {}", dir.zone_counts().len());
            println!("  Language: {}", dir.language());
        }

        // answered before loading
        Commands::Lang { .. } => {}
    }

    Ok(())
}
