//! Page rendering.
//!
//! Three stateless render functions, each bound to one fixed template:
//! article page, home page, and per-tag listing page. Every call is a pure
//! function from (content, site fields) to an HTML string; the caller owns
//! writing the result to disk.
//!
//! Templates are bundled into the binary and compiled exactly once into a
//! process-wide [`Tera`] set, safe for concurrent reads from parallel
//! render calls. Every context field is HTML-escaped on insertion except
//! the pre-rendered article body, which is trusted markup.

mod page;

pub use page::Site;

use crate::content::{Article, TagIndex};
use page::{ArticleEntry, ArticlePage, IndexPage, TagPage};
use serde::Serialize;
use std::sync::LazyLock;
use tera::{Context, Tera};
use thiserror::Error;

const ARTICLE_TEMPLATE: &str = include_str!("../embed/templates/article.html");
const INDEX_TEMPLATE: &str = include_str!("../embed/templates/index.html");
const TAG_TEMPLATE: &str = include_str!("../embed/templates/tag.html");

/// Precompiled template set, built on first use and never mutated.
///
/// A template that fails to compile aborts the process: the templates ship
/// inside the binary, so a compile failure is a packaging defect and no
/// page must ever be rendered from a partially-built set.
static TEMPLATES: LazyLock<Tera> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates([
        ("article.html", ARTICLE_TEMPLATE),
        ("index.html", INDEX_TEMPLATE),
        ("tag.html", TAG_TEMPLATE),
    ])
    .expect("bundled page templates must compile");
    tera.set_escape_fn(escape_html);
    tera
});

/// Rendering errors.
///
/// These surface caller-contract violations (a context that cannot be
/// serialized) or template evaluation failures. A failed render aborts
/// that page only; other pages are unaffected.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to build context for `{name}`")]
    Context {
        name: &'static str,
        #[source]
        source: tera::Error,
    },

    #[error("failed to render `{name}`")]
    Template {
        name: &'static str,
        #[source]
        source: tera::Error,
    },
}

/// Render a single article page.
pub fn render_article(site: Site<'_>, article: &Article) -> Result<String, RenderError> {
    render("article.html", &ArticlePage::new(site, article))
}

/// Render the home page: tag navigation plus the full article listing.
///
/// Articles render in the given order (the caller sorts, newest first).
/// Tag links render in lexicographic order, one per [`TagIndex`] key.
pub fn render_index(
    name: &str,
    tags: &TagIndex,
    articles: &[Article],
) -> Result<String, RenderError> {
    let page = IndexPage {
        name,
        tags,
        articles: ArticleEntry::from_articles(articles.iter()),
    };
    render("index.html", &page)
}

/// Render one tag's listing page.
///
/// Structurally the index page scoped to a single tag: the tag name is the
/// headline and only the given (pre-filtered) articles appear. No tag
/// navigation is emitted.
pub fn render_tag(
    site: Site<'_>,
    name: &str,
    articles: &[&Article],
) -> Result<String, RenderError> {
    let page = TagPage {
        site,
        name,
        articles: ArticleEntry::from_articles(articles.iter().copied()),
    };
    render("tag.html", &page)
}

fn render<T: Serialize>(name: &'static str, page: &T) -> Result<String, RenderError> {
    let context =
        Context::from_serialize(page).map_err(|source| RenderError::Context { name, source })?;
    TEMPLATES
        .render(name, &context)
        .map_err(|source| RenderError::Template { name, source })
}

/// HTML entity escaping applied to every substituted field.
///
/// Replaces the engine's default escaper, which also rewrites `/` and
/// would mangle URLs in `href` attributes.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
