//! Content loading error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading articles from disk.
///
/// Every variant names the offending file so a build failure points
/// straight at the source to fix.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("missing `+++` front matter fences in `{0}`")]
    MissingFrontMatter(PathBuf),

    #[error("front matter parsing error in `{0}`")]
    FrontMatter(PathBuf, #[source] toml::de::Error),

    #[error("missing required field `{field}` in `{path}`")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("invalid date `{date}` in `{path}`")]
    InvalidDate { path: PathBuf, date: String },
}
