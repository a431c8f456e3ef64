//! Site building orchestration.
//!
//! Coordinates content loading, page rendering, and feed generation.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── load_articles() ──► parse + render every markdown article
//!     │
//!     ├── rayon::join
//!     │       ├── write_pages() ──► index + article pages + tag pages
//!     │       └── build_feed()  ──► feed.atom
//!     │
//!     └── log_build_result()
//! ```
//!
//! Every page render is independent, so article and tag pages render in
//! parallel. A failed render aborts only that page; every failure is
//! logged and the build reports an error at the end if any page failed.

use crate::{
    config::SiteConfig,
    content::{self, Article, TagIndex},
    generator::feed::build_feed,
    log,
    render::{self, Site},
    utils::minify::minify_page,
};
use anyhow::{Context, Result, anyhow, bail};
use rayon::prelude::*;
use std::{fs, path::Path};

/// Build the entire site into the output directory.
///
/// If `config.build.clean` is true, clears the output directory first.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;

    prepare_output(output, config.build.clean)?;

    let articles = content::load_articles(config)?;
    log!("content"; "loaded {} articles", articles.len());

    let tags = content::tag_index(&articles);

    let (pages_result, feed_result) = rayon::join(
        || write_pages(config, &articles, &tags),
        || build_feed(config, &articles),
    );

    pages_result?;
    feed_result?;

    log_build_result(output)
}

/// Render and write every page: home, one per article, one per tag.
///
/// Pages are independent, so one failed page never blocks the others:
/// every page is attempted, failures are logged, and the build reports
/// an error at the end if any page failed.
fn write_pages(config: &SiteConfig, articles: &[Article], tags: &TagIndex) -> Result<()> {
    let site = Site::from_config(config);
    let output = &config.build.output;

    let index_error = render::render_index(&config.base.title, tags, articles)
        .map_err(anyhow::Error::from)
        .and_then(|html| write_page(&output.join("index.html"), &html, config))
        .err()
        .map(|e| anyhow!("index: {e:#}"));

    let article_errors = articles.par_iter().filter_map(|article| {
        render::render_article(site, article)
            .map_err(anyhow::Error::from)
            .and_then(|html| {
                write_page(&output.join(&article.id).join("index.html"), &html, config)
            })
            .err()
            .map(|e| anyhow!("article `{}`: {e:#}", article.id))
    });

    let tag_errors = tags.par_iter().filter_map(|(tag, _)| {
        let tagged = content::articles_for_tag(articles, tag);
        render::render_tag(site, tag, &tagged)
            .map_err(anyhow::Error::from)
            .and_then(|html| {
                write_page(&output.join("tags").join(tag).join("index.html"), &html, config)
            })
            .err()
            .map(|e| anyhow!("tag `{tag}`: {e:#}"))
    });

    let errors: Vec<_> = article_errors
        .chain(tag_errors)
        .collect::<Vec<_>>()
        .into_iter()
        .chain(index_error)
        .collect();

    if !errors.is_empty() {
        for error in &errors {
            log!("error"; "{error:#}");
        }
        bail!("{} page(s) failed to build", errors.len());
    }

    log!("build"; "wrote {} pages", 1 + articles.len() + tags.len());
    Ok(())
}

/// Minify (when enabled) and write one rendered page.
fn write_page(path: &Path, html: &str, config: &SiteConfig) -> Result<()> {
    let bytes = minify_page(html, config);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Ensure the output directory exists, clearing it first when requested.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
    Ok(())
}

/// Log build result based on output directory contents
fn log_build_result(output: &Path) -> Result<()> {
    let file_count = fs::read_dir(output)?.filter_map(Result::ok).count();

    if file_count == 0 {
        log!("warn"; "output is empty, check if content/articles has .md files");
    } else {
        log!("build"; "done");
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_article(dir: &Path, id: &str, date: &str, tags: &[&str]) {
        let tags = tags
            .iter()
            .map(|t| format!("\"{t}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let source = format!(
            "+++\ntitle = \"Title of {id}\"\ndate = \"{date}\"\ntags = [{tags}]\n+++\n\nBody of {id}.\n"
        );
        fs::write(dir.join(format!("{id}.md")), source).unwrap();
    }

    fn site_fixture(root: &Path) -> SiteConfig {
        let articles_dir = root.join("content/articles");
        fs::create_dir_all(&articles_dir).unwrap();
        write_article(&articles_dir, "newest", "2025-02-01", &["rust"]);
        write_article(&articles_dir, "oldest", "2024-01-01", &["rust", "notes"]);

        let mut config = SiteConfig::default();
        config.base.title = "Example Blog".to_string();
        config.build.content = root.join("content");
        config.build.output = root.join("public");
        config.build.feed.path = root.join("public/feed.atom");
        config
    }

    #[test]
    fn test_build_site_writes_all_pages() {
        let tmp = tempfile::tempdir().unwrap();
        let config = site_fixture(tmp.path());

        build_site(&config).unwrap();

        let output = &config.build.output;
        assert!(output.join("index.html").is_file());
        assert!(output.join("newest/index.html").is_file());
        assert!(output.join("oldest/index.html").is_file());
        assert!(output.join("tags/rust/index.html").is_file());
        assert!(output.join("tags/notes/index.html").is_file());
    }

    #[test]
    fn test_build_site_index_lists_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        let config = site_fixture(tmp.path());

        build_site(&config).unwrap();

        let index = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        let newest = index.find("/newest").unwrap();
        let oldest = index.find("/oldest").unwrap();
        assert!(newest < oldest);
    }

    #[test]
    fn test_build_site_feed_when_enabled() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = site_fixture(tmp.path());
        config.base.url = Some("https://example.com".to_string());
        config.build.feed.enable = true;

        build_site(&config).unwrap();

        let feed = fs::read_to_string(config.build.output.join("feed.atom")).unwrap();
        assert!(feed.contains("<feed"));
        assert!(feed.contains("Title of newest"));
    }

    #[test]
    fn test_build_site_clean_removes_stale_files() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = site_fixture(tmp.path());
        config.build.clean = true;

        fs::create_dir_all(&config.build.output).unwrap();
        let stale = config.build.output.join("stale.html");
        fs::write(&stale, "old").unwrap();

        build_site(&config).unwrap();

        assert!(!stale.exists());
        assert!(config.build.output.join("index.html").is_file());
    }

    #[test]
    fn test_build_site_without_clean_keeps_files() {
        let tmp = tempfile::tempdir().unwrap();
        let config = site_fixture(tmp.path());

        fs::create_dir_all(&config.build.output).unwrap();
        let kept = config.build.output.join("kept.html");
        fs::write(&kept, "still here").unwrap();

        build_site(&config).unwrap();

        assert!(kept.exists());
    }

    #[test]
    fn test_build_site_fails_without_articles_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.build.content = tmp.path().join("content");
        config.build.output = tmp.path().join("public");

        assert!(build_site(&config).is_err());
    }

    #[test]
    fn test_build_site_empty_articles_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        fs::create_dir_all(tmp.path().join("content/articles")).unwrap();
        config.build.content = tmp.path().join("content");
        config.build.output = tmp.path().join("public");
        config.build.feed.path = tmp.path().join("public/feed.atom");
        config.base.title = "Empty".to_string();

        build_site(&config).unwrap();

        let index = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        assert!(!index.contains(r#"class="index-article""#));
    }

    #[test]
    fn test_prepare_output_creates_missing_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a/b/public");

        prepare_output(&nested, false).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_write_page_creates_parent_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let config = SiteConfig::default();
        let path = tmp.path().join("deep/nested/index.html");

        write_page(&path, "<html></html>", &config).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_build_site_minified_output_is_smaller() {
        let tmp = tempfile::tempdir().unwrap();
        let config = site_fixture(tmp.path());
        build_site(&config).unwrap();
        let plain = fs::metadata(config.build.output.join("index.html")).unwrap().len();

        let tmp2 = tempfile::tempdir().unwrap();
        let mut config = site_fixture(tmp2.path());
        config.build.minify = true;
        build_site(&config).unwrap();
        let minified = fs::metadata(config.build.output.join("index.html")).unwrap().len();

        assert!(minified < plain);
    }

    #[test]
    fn test_log_build_result_empty_dir() {
        let tmp = tempfile::tempdir().unwrap();
        // Should not error on an empty output directory
        log_build_result(tmp.path()).unwrap();
    }

    #[test]
    fn test_log_build_result_missing_dir() {
        assert!(log_build_result(&PathBuf::from("/nonexistent/out")).is_err());
    }
}
