use clap::{Args, Parser, Subcommand, ValueEnum};
use matcha_core::config::{SortMode, TagCombineMode};
use matcha_core::i18n::Language;
use matcha_core::state::{Action, ZoneFilter};
use std::path::PathBuf;

/// CLI arguments for matcha-cli
#[derive(Debug, Parser)]
#[command(
    name = "matcha",
    version,
    about = "Browse, filter and rank the matcha spot directory from the terminal"
)]
pub struct CliArgs {
    /// Path to the entry list (.json or .json.gz); an http(s) URL with the `fetch` feature
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<String>,

    /// Engine settings (TOML)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Preferences file; the chosen language is remembered here
    #[arg(long = "prefs", global = true)]
    pub prefs: Option<PathBuf>,

    /// Display language for this run (en, fr)
    #[arg(short = 'l', long = "lang", global = true)]
    pub lang: Option<Language>,

    /// More logging (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the filtered, ranked list with map framing and applied filters
    List(FilterArgs),

    /// List the zones present in the data with their entry counts
    Zones,

    /// Show a summary of the loaded data
    Stats,

    /// Show the remembered language, or remember a new one
    Lang {
        /// Language to store (en, fr)
        code: Option<Language>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    AnyOf,
    AllOf,
}

impl From<ModeArg> for TagCombineMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::AnyOf => TagCombineMode::AnyOf,
            ModeArg::AllOf => TagCombineMode::AllOf,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Rating,
    Name,
}

impl From<SortArg> for SortMode {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Rating => SortMode::RatingThenName,
            SortArg::Name => SortMode::NameOnly,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Free-text search over name, address, notes and tags
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,

    /// Only entries rated at or above the top-picks threshold
    #[arg(long = "top")]
    pub top: bool,

    /// Hide entries without a rating
    #[arg(long = "hide-unrated")]
    pub hide_unrated: bool,

    /// Arrondissement (1-20, or a postal code such as 75011)
    #[arg(short = 'z', long = "zone")]
    pub zone: Option<ZoneFilter>,

    /// Facet to select; repeat for several
    #[arg(short = 't', long = "tag")]
    pub tags: Vec<String>,

    /// How several tags combine (overrides the config file)
    #[arg(long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// Ordering (overrides the config file)
    #[arg(long = "sort", value_enum)]
    pub sort: Option<SortArg>,

    /// Print the presentation as JSON instead of text
    #[arg(long = "json")]
    pub json: bool,
}

impl FilterArgs {
    /// The user actions these flags stand for, in control order.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(q) = &self.query {
            actions.push(Action::SetQuery(q.clone()));
        }
        if self.top {
            actions.push(Action::SetTopPicks(true));
        }
        if self.hide_unrated {
            actions.push(Action::SetHideUnrated(true));
        }
        if let Some(zone) = self.zone {
            actions.push(Action::SetZone(zone));
        }
        actions.extend(self.tags.iter().map(|t| Action::SetTag(t.clone(), true)));
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matcha_core::zone::Zone;

    #[test]
    fn list_flags_become_actions() {
        let args = CliArgs::parse_from([
            "matcha", "--lang", "fr", "list", "--top", "-z", "75011", "-t", "to-go", "-t",
            "ceremonial", "--mode", "all-of",
        ]);
        assert_eq!(args.lang, Some(Language::Fr));
        let Commands::List(f) = args.command else {
            panic!("expected list");
        };
        assert!(matches!(f.mode, Some(ModeArg::AllOf)));
        assert_eq!(
            f.actions(),
            [
                Action::SetTopPicks(true),
                Action::SetZone(ZoneFilter::Zone(Zone::new(11).unwrap())),
                Action::SetTag("to-go".into(), true),
                Action::SetTag("ceremonial".into(), true),
            ]
        );
    }

    #[test]
    fn rejects_unknown_language() {
        assert!(CliArgs::try_parse_from(["matcha", "--lang", "de", "stats"]).is_err());
    }
}
