//! Article and author records.

use super::{error::ContentError, frontmatter, markdown};
use crate::utils::date::DateTimeUtc;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Attribution on an article: display name plus a profile/homepage link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Author {
    pub name: String,
    pub url: String,
}

/// One loaded article, immutable for the duration of a build.
///
/// `body` holds the rendered HTML of the markdown source and is inserted
/// into the article template unescaped; everything else is plain text and
/// escaped by the template engine.
#[derive(Debug, Clone)]
pub struct Article {
    /// File stem of the source, used to build `/{id}` URLs and edit links.
    pub id: String,

    /// Headline text.
    pub title: String,

    /// Rendered HTML body (trusted markup).
    pub body: String,

    /// Authors in byline order.
    pub authors: Vec<Author>,

    /// Preferred URL for this article when it is published elsewhere too.
    pub canonical: Option<String>,

    /// Free-text labels for grouping on the index and tag pages.
    pub tags: Vec<String>,

    /// Last-updated instant from the front matter.
    pub date: DateTimeUtc,
}

impl Article {
    /// Build an article from one markdown source file.
    ///
    /// Validates the caller contract up front: a missing title or an
    /// unparseable date is an error here, never malformed HTML later.
    pub fn from_source(path: &Path, id: &str, source: &str) -> Result<Self, ContentError> {
        let (matter, body) = frontmatter::parse(source, path)?;

        if id.is_empty() {
            return Err(ContentError::MissingField {
                path: path.to_path_buf(),
                field: "id",
            });
        }
        if matter.title.trim().is_empty() {
            return Err(ContentError::MissingField {
                path: path.to_path_buf(),
                field: "title",
            });
        }

        let date =
            DateTimeUtc::parse(&matter.date).ok_or_else(|| ContentError::InvalidDate {
                path: path.to_path_buf(),
                date: matter.date.clone(),
            })?;

        Ok(Self {
            id: id.to_string(),
            title: matter.title,
            body: markdown::render_markdown(body),
            authors: matter.authors,
            canonical: matter.canonical,
            tags: matter.tags,
            date,
        })
    }
}
