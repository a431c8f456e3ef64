//! Output minification.
//!
//! Minification is opt-in (`[build].minify`); both helpers return the
//! input untouched when it is off, so the default output matches the
//! templates byte for byte.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Minify a rendered HTML page when enabled.
pub fn minify_page<'a>(html: &'a str, config: &SiteConfig) -> Cow<'a, [u8]> {
    if !config.build.minify {
        return Cow::Borrowed(html.as_bytes());
    }

    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    Cow::Owned(minify_html::minify(html.as_bytes(), &cfg))
}

/// Minify feed XML when enabled, by stripping indentation and blank lines.
pub fn minify_xml<'a>(xml: &'a str, config: &SiteConfig) -> Cow<'a, str> {
    if !config.build.minify {
        return Cow::Borrowed(xml);
    }

    let stripped = xml
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("");
    Cow::Owned(stripped)
}
