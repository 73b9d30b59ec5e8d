// crates/matcha-core/src/lib.rs

//! # matcha-core
//!
//! Filter, rank and view-synchronization engine for a browsable directory of
//! matcha spots. A fixed collection of entries plus the user's filter
//! selections deterministically produce one ordered visible sequence, which
//! drives the list view, the map markers and the "applied filters" summary.
//!
//! ```rust
//! use matcha_core::prelude::*;
//!
//! let store = EntryStore::from_json_str(r#"[
//!     {"name": "Aoi", "address": "75001 Paris", "my_rating": 4.8, "tags": ["ceremonial"]},
//!     {"name": "Béa", "address": "75011 Paris", "my_rating": 4.8, "tags": ["to-go"]},
//!     {"name": "Cerise", "address": "75003 Paris"}
//! ]"#);
//! let mut dir = Directory::new(store, EngineConfig::default());
//!
//! let names: Vec<_> = dir.recompute().rows.iter().map(|r| r.name.clone()).collect();
//! assert_eq!(names, ["Aoi", "Béa", "Cerise"]);
//!
//! let p = dir.dispatch(Action::SetTopPicks(true));
//! assert_eq!(p.rows.len(), 2);
//! assert_eq!(p.summary.button_label, "Filters (1)");
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod filter;
pub mod i18n;
pub mod loader;
pub mod model;
pub mod rank;
#[doc(hidden)]
pub mod raw;
pub mod state;
pub mod store;
pub mod text;
pub mod view;
pub mod zone;

pub use crate::error::{DirectoryError, Result};

pub mod prelude {
    pub use crate::config::{EngineConfig, MapConfig, SortMode, TagCombineMode, TileLayer};
    pub use crate::directory::{Directory, Phase};
    pub use crate::error::{DirectoryError, Result};
    pub use crate::i18n::{LabelResolver, Language, MemoryPreferences, Preferences, UiString};
    pub use crate::model::{Coordinates, Entry, EntryId, Notes, Rating, Tag};
    pub use crate::state::{Action, FilterState, ZoneFilter};
    pub use crate::store::{EntryStore, LoadStatus};
    pub use crate::view::{
        FilterSummary, ListRow, ListSurface, MapSurface, Marker, MarkerHandle, Presentation,
        RowHandle, SummarySurface, Viewport,
    };
    pub use crate::zone::{classify, Zone};
}
