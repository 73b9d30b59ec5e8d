//! matcha-cli
//! ==========
//!
//! Command-line front-end for the `matcha-core` spot directory.
//!
//! This crate primarily provides a binary (`matcha`). The library target only
//! carries this overview so that it renders in the generated docs.
//!
//! Basic usage:
//!
//! ```text
//! matcha --help
//! matcha list --top --zone 11
//! matcha --lang fr list -q "à emporter"
//! matcha zones
//! matcha stats
//! ```
//!
//! For programmatic access use the [`matcha-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
