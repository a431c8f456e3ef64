//! Article loading and grouping.
//!
//! Articles are markdown files under `{content}/articles/`, each opening
//! with TOML front matter. This module discovers them, renders their
//! bodies to HTML, validates required fields, and derives the tag index
//! used by the home page.

mod article;
mod error;
mod frontmatter;
mod markdown;

pub use article::{Article, Author};
pub use error::ContentError;

use crate::config::SiteConfig;
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{collections::BTreeMap, fs, path::Path};
use walkdir::WalkDir;

/// Tag name to article count, ordered lexicographically by tag name.
pub type TagIndex = BTreeMap<String, usize>;

/// Load every article under `{content}/articles/`, newest first.
///
/// Ties on the date fall back to id order so repeated builds emit the
/// same listing.
pub fn load_articles(config: &SiteConfig) -> Result<Vec<Article>> {
    let articles_dir = config.build.content.join("articles");
    if !articles_dir.is_dir() {
        bail!(
            "articles directory not found: {}",
            articles_dir.display()
        );
    }

    let paths: Vec<_> = WalkDir::new(&articles_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();

    let mut articles = paths
        .par_iter()
        .map(|path| load_article(path))
        .collect::<Result<Vec<_>>>()?;

    articles.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    Ok(articles)
}

/// Load a single article source file.
fn load_article(path: &Path) -> Result<Article> {
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let source = fs::read_to_string(path)
        .map_err(|err| ContentError::Io(path.to_path_buf(), err))?;

    let article = Article::from_source(path, &id, &source)
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(article)
}

/// Count articles per tag.
pub fn tag_index(articles: &[Article]) -> TagIndex {
    let mut tags = TagIndex::new();
    for article in articles {
        for tag in &article.tags {
            *tags.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    tags
}

/// Articles carrying the given tag, in the input (newest-first) order.
pub fn articles_for_tag<'a>(articles: &'a [Article], tag: &str) -> Vec<&'a Article> {
    articles
        .iter()
        .filter(|article| article.tags.iter().any(|t| t == tag))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::DateTimeUtc;
    use std::path::PathBuf;

    fn write_article(dir: &Path, name: &str, date: &str, tags: &[&str]) {
        let tags = tags
            .iter()
            .map(|t| format!("\"{t}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let source = format!(
            "+++\ntitle = \"{name}\"\ndate = \"{date}\"\ntags = [{tags}]\n+++\n\nBody of {name}.\n"
        );
        fs::write(dir.join(format!("{name}.md")), source).unwrap();
    }

    fn config_with_content(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.content = root.to_path_buf();
        config
    }

    #[test]
    fn test_load_articles_sorted_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        let articles_dir = tmp.path().join("articles");
        fs::create_dir_all(&articles_dir).unwrap();

        write_article(&articles_dir, "old", "2023-01-10", &[]);
        write_article(&articles_dir, "new", "2024-06-15", &[]);
        write_article(&articles_dir, "mid", "2023-08-01", &[]);

        let articles = load_articles(&config_with_content(tmp.path())).unwrap();

        let ids: Vec<_> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_load_articles_same_date_sorted_by_id() {
        let tmp = tempfile::tempdir().unwrap();
        let articles_dir = tmp.path().join("articles");
        fs::create_dir_all(&articles_dir).unwrap();

        write_article(&articles_dir, "beta", "2024-01-01", &[]);
        write_article(&articles_dir, "alpha", "2024-01-01", &[]);

        let articles = load_articles(&config_with_content(tmp.path())).unwrap();

        let ids: Vec<_> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_load_articles_ignores_non_markdown() {
        let tmp = tempfile::tempdir().unwrap();
        let articles_dir = tmp.path().join("articles");
        fs::create_dir_all(&articles_dir).unwrap();

        write_article(&articles_dir, "only", "2024-01-01", &[]);
        fs::write(articles_dir.join("notes.txt"), "not an article").unwrap();

        let articles = load_articles(&config_with_content(tmp.path())).unwrap();
        assert_eq!(articles.len(), 1);
    }

    #[test]
    fn test_load_articles_missing_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let result = load_articles(&config_with_content(tmp.path()));

        assert!(result.is_err());
    }

    #[test]
    fn test_load_articles_error_names_file() {
        let tmp = tempfile::tempdir().unwrap();
        let articles_dir = tmp.path().join("articles");
        fs::create_dir_all(&articles_dir).unwrap();
        fs::write(articles_dir.join("broken.md"), "no front matter here").unwrap();

        let err = load_articles(&config_with_content(tmp.path())).unwrap_err();
        assert!(format!("{err:#}").contains("broken.md"));
    }

    #[test]
    fn test_load_article_renders_body() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("hello.md");
        fs::write(
            &path,
            "+++\ntitle = \"Hello\"\ndate = \"2024-06-15\"\n+++\n\n**bold** text\n",
        )
        .unwrap();

        let article = load_article(&path).unwrap();
        assert_eq!(article.id, "hello");
        assert!(article.body.contains("<strong>bold</strong>"));
        assert_eq!(article.date, DateTimeUtc::from_ymd(2024, 6, 15));
    }

    #[test]
    fn test_tag_index_counts() {
        let make = |id: &str, tags: &[&str]| Article {
            id: id.to_string(),
            title: id.to_string(),
            body: String::new(),
            authors: Vec::new(),
            canonical: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            date: DateTimeUtc::from_ymd(2024, 1, 1),
        };

        let articles = vec![
            make("a", &["rust", "blog"]),
            make("b", &["rust"]),
            make("c", &[]),
        ];

        let index = tag_index(&articles);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("rust"), Some(&2));
        assert_eq!(index.get("blog"), Some(&1));
    }

    #[test]
    fn test_tag_index_empty() {
        assert!(tag_index(&[]).is_empty());
    }

    #[test]
    fn test_articles_for_tag_preserves_order() {
        let make = |id: &str, tags: &[&str]| Article {
            id: id.to_string(),
            title: id.to_string(),
            body: String::new(),
            authors: Vec::new(),
            canonical: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            date: DateTimeUtc::from_ymd(2024, 1, 1),
        };

        let articles = vec![
            make("first", &["go"]),
            make("second", &["rust"]),
            make("third", &["go"]),
        ];

        let tagged = articles_for_tag(&articles, "go");
        let ids: Vec<_> = tagged.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "third"]);
    }

    #[test]
    fn test_load_article_missing_file() {
        let result = load_article(&PathBuf::from("/nonexistent/a.md"));
        assert!(result.is_err());
    }
}
