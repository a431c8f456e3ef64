//! Page context records passed to the templates.
//!
//! Each renderer receives one of these composites, serialized into the
//! template context. They borrow from the loaded content and the site
//! config, and live only for the duration of a single render call.

use crate::{
    config::SiteConfig,
    content::{Article, Author, TagIndex},
};
use serde::Serialize;

/// Global site fields shared by every page.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Site<'a> {
    /// Site name shown in the top navigation.
    pub name: &'a str,

    /// Base URL of the article sources (no trailing slash).
    /// When set, article pages link to `{source_url}/articles/{id}.md`.
    pub source_url: Option<&'a str>,
}

impl<'a> Site<'a> {
    pub fn from_config(config: &'a SiteConfig) -> Self {
        Self {
            name: &config.base.title,
            source_url: config.base.source_url.as_deref(),
        }
    }
}

/// Context for a single article page.
#[derive(Debug, Serialize)]
pub(super) struct ArticlePage<'a> {
    pub site: Site<'a>,
    pub id: &'a str,
    pub title: &'a str,
    pub canonical: Option<&'a str>,
    pub authors: &'a [Author],
    pub last_updated: String,
    pub last_updated_on: String,
    pub body: &'a str,
}

impl<'a> ArticlePage<'a> {
    pub fn new(site: Site<'a>, article: &'a Article) -> Self {
        Self {
            site,
            id: &article.id,
            title: &article.title,
            canonical: article.canonical.as_deref(),
            authors: &article.authors,
            last_updated: article.date.to_rfc3339(),
            last_updated_on: article.date.to_display(),
            body: &article.body,
        }
    }
}

/// One row in an article listing (index page or tag page).
#[derive(Debug, Serialize)]
pub(super) struct ArticleEntry<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub last_updated: String,
    pub last_updated_in: String,
}

impl<'a> ArticleEntry<'a> {
    pub fn new(article: &'a Article) -> Self {
        Self {
            id: &article.id,
            title: &article.title,
            last_updated: article.date.to_rfc3339(),
            last_updated_in: article.date.to_month_year(),
        }
    }

    pub fn from_articles(articles: impl IntoIterator<Item = &'a Article>) -> Vec<Self> {
        articles.into_iter().map(Self::new).collect()
    }
}

/// Context for the home page.
#[derive(Debug, Serialize)]
pub(super) struct IndexPage<'a> {
    pub name: &'a str,
    pub tags: &'a TagIndex,
    pub articles: Vec<ArticleEntry<'a>>,
}

/// Context for a single tag's listing page.
#[derive(Debug, Serialize)]
pub(super) struct TagPage<'a> {
    pub site: Site<'a>,
    pub name: &'a str,
    pub articles: Vec<ArticleEntry<'a>>,
}
