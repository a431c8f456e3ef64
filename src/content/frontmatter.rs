//! TOML front matter parsing.
//!
//! Article sources open with a TOML block between `+++` fences:
//!
//! ```text
//! +++
//! title = "Hello World"
//! date = "2024-06-15"
//! tags = ["rust"]
//! +++
//!
//! Markdown body...
//! ```

use super::{article::Author, error::ContentError};
use serde::Deserialize;
use std::path::Path;

/// Front matter fence line.
const FENCE: &str = "+++";

/// Metadata block at the top of an article source.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrontMatter {
    /// Headline (required).
    pub title: String,

    /// Last-updated date, `YYYY-MM-DD` or RFC 3339 `...T..:..:..Z` (required).
    pub date: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub canonical: Option<String>,

    #[serde(default)]
    pub authors: Vec<Author>,
}

/// Parse a source file into front matter and markdown body.
pub fn parse<'a>(source: &'a str, path: &Path) -> Result<(FrontMatter, &'a str), ContentError> {
    let (matter, body) =
        split(source).ok_or_else(|| ContentError::MissingFrontMatter(path.to_path_buf()))?;
    let matter = toml::from_str(matter)
        .map_err(|err| ContentError::FrontMatter(path.to_path_buf(), err))?;
    Ok((matter, body))
}

/// Split on the `+++` fences. The opening fence must be the first line and
/// the closing fence must sit on its own line.
fn split(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix(FENCE)?;
    let rest = rest.strip_prefix('\n')?;

    if let Some(end) = rest.find("\n+++\n") {
        Some((&rest[..end], &rest[end + 5..]))
    } else {
        rest.strip_suffix("\n+++").map(|matter| (matter, ""))
    }
}
