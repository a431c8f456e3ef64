//! Atom feed generation.
//!
//! Writes an Atom 1.0 feed to `{output}/feed.atom`, matching the
//! `<link rel="alternate">` every rendered page carries in its head.
//!
//! # Feed Format
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <feed xmlns="http://www.w3.org/2005/Atom" xml:lang="en">
//!   <title>My Blog</title>
//!   <id>https://example.com/</id>
//!   <updated>2025-01-01T00:00:00Z</updated>
//!   <entry>
//!     <title>Hello World</title>
//!     <link href="https://example.com/hello-world"/>
//!     <updated>2025-01-01T00:00:00Z</updated>
//!   </entry>
//! </feed>
//! ```

use crate::{
    config::SiteConfig,
    content::{Article, Author},
    log,
    utils::minify::minify_xml,
};
use anyhow::{Context, Result};
use std::fs;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for Atom
const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// `<updated>` value for a feed with no articles
const EPOCH: &str = "1970-01-01T00:00:00Z";

// ============================================================================
// Public API
// ============================================================================

/// Build the Atom feed if enabled in config.
///
/// Uses the already-loaded articles instead of re-scanning the filesystem.
pub fn build_feed(config: &SiteConfig, articles: &[Article]) -> Result<()> {
    if config.build.feed.enable {
        let feed = Feed::from_articles(config, articles);
        feed.write(config)?;
    }
    Ok(())
}

// ============================================================================
// Feed Implementation
// ============================================================================

/// Atom feed data structure
struct Feed {
    title: String,
    subtitle: String,
    base_url: String,
    self_url: String,
    language: String,
    author: String,
    email: String,
    entries: Vec<Entry>,
}

/// Single entry in the feed
struct Entry {
    title: String,
    url: String,
    updated: String,
    authors: Vec<Author>,
}

impl Feed {
    /// Build the feed from loaded articles (already sorted newest first).
    fn from_articles(config: &SiteConfig, articles: &[Article]) -> Self {
        let base_url = config
            .base
            .url
            .as_deref()
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_string();
        let feed_name = config
            .build
            .feed
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "feed.atom".to_string());

        let entries = articles
            .iter()
            .map(|article| Entry {
                title: article.title.clone(),
                url: format!("{base_url}/{}", article.id),
                updated: article.date.to_rfc3339(),
                authors: article.authors.clone(),
            })
            .collect();

        Self {
            title: config.base.title.clone(),
            subtitle: config.base.description.clone(),
            self_url: format!("{base_url}/{feed_name}"),
            base_url,
            language: config.base.language.clone(),
            author: config.base.author.clone(),
            email: config.base.email.clone(),
            entries,
        }
    }

    /// Generate feed XML string.
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<feed xmlns="{ATOM_NS}" xml:lang="{}">"#,
            escape_xml(&self.language)
        ));
        xml.push('\n');

        xml.push_str(&format!("  <title>{}</title>\n", escape_xml(&self.title)));
        if !self.subtitle.is_empty() {
            xml.push_str(&format!(
                "  <subtitle>{}</subtitle>\n",
                escape_xml(&self.subtitle)
            ));
        }
        xml.push_str(&format!("  <id>{}/</id>\n", escape_xml(&self.base_url)));
        xml.push_str(&format!(
            "  <link href=\"{}/\"/>\n",
            escape_xml(&self.base_url)
        ));
        xml.push_str(&format!(
            "  <link href=\"{}\" rel=\"self\" type=\"application/atom+xml\"/>\n",
            escape_xml(&self.self_url)
        ));

        // Articles arrive newest first, so the first entry dates the feed
        let updated = self
            .entries
            .first()
            .map_or(EPOCH, |entry| entry.updated.as_str());
        xml.push_str(&format!("  <updated>{updated}</updated>\n"));

        if !self.author.is_empty() {
            xml.push_str("  <author>\n");
            xml.push_str(&format!("    <name>{}</name>\n", escape_xml(&self.author)));
            if !self.email.is_empty() {
                xml.push_str(&format!("    <email>{}</email>\n", escape_xml(&self.email)));
            }
            xml.push_str("  </author>\n");
        }
        xml.push_str("  <generator>quill</generator>\n");

        for entry in self.entries {
            xml.push_str("  <entry>\n");
            xml.push_str(&format!("    <title>{}</title>\n", escape_xml(&entry.title)));
            xml.push_str(&format!("    <id>{}</id>\n", escape_xml(&entry.url)));
            xml.push_str(&format!("    <link href=\"{}\"/>\n", escape_xml(&entry.url)));
            xml.push_str(&format!("    <updated>{}</updated>\n", entry.updated));
            for author in &entry.authors {
                xml.push_str("    <author>\n");
                xml.push_str(&format!("      <name>{}</name>\n", escape_xml(&author.name)));
                xml.push_str(&format!("      <uri>{}</uri>\n", escape_xml(&author.url)));
                xml.push_str("    </author>\n");
            }
            xml.push_str("  </entry>\n");
        }

        xml.push_str("</feed>\n");
        xml
    }

    /// Write the feed to its output file.
    fn write(self, config: &SiteConfig) -> Result<()> {
        let feed_path = config.build.feed.path.clone();
        let xml = self.into_xml();
        let xml = minify_xml(&xml, config);

        if let Some(parent) = feed_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&feed_path, xml.as_bytes())
            .with_context(|| format!("Failed to write feed to {}", feed_path.display()))?;

        log!("feed"; "{}", feed_path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================
