// crates/matcha-core/src/error.rs
use thiserror::Error;

/// Errors surfaced by the loading and configuration layers.
///
/// The filter/rank/present pipeline itself never fails: malformed data
/// degrades to absent fields and an unavailable store behaves as an empty
/// one. Only the edges (I/O, parsing, configuration) report errors.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Data not found: {0}")]
    NotFound(String),

    #[cfg(feature = "fetch")]
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),
}

impl From<toml::de::Error> for DirectoryError {
    fn from(e: toml::de::Error) -> Self {
        DirectoryError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
