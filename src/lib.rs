//! Workspace facade: re-exports `matcha-core` so the demos can use
//! `matcha_rs::prelude::*`.
pub use matcha_core::*;
