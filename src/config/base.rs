//! `[base]` section configuration.
//!
//! Contains basic site information like title, author, description, etc.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in quill.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "My Blog"
/// description = "A personal blog about Rust"
/// author = "Alice"
/// url = "https://myblog.com"
/// source_url = "https://github.com/alice/blog/blob/main"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site name shown in page navigation and the browser tab.
    pub title: String,

    /// Author name for the feed.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Author email for the feed.
    #[serde(default = "defaults::base::email")]
    #[educe(Default = defaults::base::email())]
    pub email: String,

    /// Site description, used as the feed subtitle.
    pub description: String,

    /// Base URL for absolute links in the feed.
    /// Required when `[build.feed].enable = true`.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// Base URL of the article sources, without a trailing slash.
    /// When set, every article page links `{source_url}/articles/{id}.md`
    /// for editing.
    #[serde(default = "defaults::base::source_url")]
    #[educe(Default = defaults::base::source_url())]
    pub source_url: Option<String>,

    /// BCP 47 language code for the feed (e.g., "en", "en-US").
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_base_config_full() {
        let config = r#"
            [base]
            title = "Example Blog"
            description = "Articles about systems programming"
            url = "https://blog.example.com"
            source_url = "https://github.com/alice/blog/blob/main"
            language = "en-US"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "Example Blog");
        assert_eq!(config.base.description, "Articles about systems programming");
        assert_eq!(config.base.url, Some("https://blog.example.com".to_string()));
        assert_eq!(
            config.base.source_url,
            Some("https://github.com/alice/blog/blob/main".to_string())
        );
        assert_eq!(config.base.language, "en-US");
    }

    #[test]
    fn test_base_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.author, "<YOUR_NAME>");
        assert_eq!(config.base.email, "user@noreply.quill");
        assert_eq!(config.base.language, "en");
        assert_eq!(config.base.url, None);
        assert_eq!(config.base.source_url, None);
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"
            unknown_field = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn test_base_config_author_email() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"
            author = "Alice"
            email = "alice@example.com"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.author, "Alice");
        assert_eq!(config.base.email, "alice@example.com");
    }

    #[test]
    fn test_base_config_empty_strings() {
        let config = r#"
            [base]
            title = ""
            description = ""
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "");
        assert_eq!(config.base.description, "");
    }

    #[test]
    fn test_base_config_unicode() {
        let config = r#"
            [base]
            title = "My Blog 🚀"
            description = "This is a blog with unicode"
            author = "René"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "My Blog 🚀");
        assert_eq!(config.base.author, "René");
    }
}
