//! Site initialization module.
//!
//! Creates new site structure with default configuration.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Default config filename
const CONFIG_FILE: &str = "quill.toml";

/// Default site directory structure
const SITE_DIRS: &[&str] = &["content/articles"];

/// Starter article written into a fresh site
const SAMPLE_ARTICLE: &str = include_str!("embed/init/hello-world.md");

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Safety check: if no name was provided (init in current dir),
    // the directory must be completely empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `quill init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(root)?;
    init_default_config(root)?;
    init_sample_article(root)?;

    log!("init"; "created site at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Create site directory structure
fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `quill init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Write the starter article
fn init_sample_article(root: &Path) -> Result<()> {
    fs::write(
        root.join("content/articles/hello-world.md"),
        SAMPLE_ARTICLE,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_root(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.set_root(root);
        config
    }

    #[test]
    fn test_new_site_creates_structure() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("blog");
        let config = config_with_root(&root);

        new_site(&config, true).unwrap();

        assert!(root.join("quill.toml").is_file());
        assert!(root.join("content/articles/hello-world.md").is_file());
    }

    #[test]
    fn test_new_site_config_parses_back() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("blog");
        let config = config_with_root(&root);

        new_site(&config, true).unwrap();

        let written = SiteConfig::from_path(&root.join("quill.toml")).unwrap();
        assert_eq!(written.serve.port, 4141);
    }

    #[test]
    fn test_new_site_refuses_non_empty_dir_without_name() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("existing.txt"), "data").unwrap();
        let config = config_with_root(tmp.path());

        let result = new_site(&config, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_site_empty_dir_without_name() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_with_root(tmp.path());

        new_site(&config, false).unwrap();
        assert!(tmp.path().join("quill.toml").is_file());
    }

    #[test]
    fn test_new_site_refuses_existing_structure() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("blog");
        let config = config_with_root(&root);

        new_site(&config, true).unwrap();
        let result = new_site(&config, true);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_dir_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(is_dir_empty(tmp.path()).unwrap());
        assert!(is_dir_empty(&tmp.path().join("missing")).unwrap());

        fs::write(tmp.path().join("file"), "x").unwrap();
        assert!(!is_dir_empty(tmp.path()).unwrap());
    }

    #[test]
    fn test_sample_article_loads() {
        // The starter article must satisfy the article contract
        let article = crate::content::Article::from_source(
            Path::new("hello-world.md"),
            "hello-world",
            SAMPLE_ARTICLE,
        )
        .unwrap();

        assert_eq!(article.title, "Hello World");
        assert_eq!(article.tags, vec!["meta"]);
    }
}
