//! Markdown to HTML conversion.
//!
//! Uses pulldown-cmark with GFM extensions (tables, strikethrough, task
//! lists). Raw HTML blocks pass through unchanged per the CommonMark spec,
//! which is what makes the rendered body trusted markup: sanitization is
//! the author's responsibility, not the renderer's.

use pulldown_cmark::{Options, Parser, html::push_html};

/// Render markdown to HTML.
pub fn render_markdown(content: &str) -> String {
    let options =
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS | Options::ENABLE_TABLES;
    let parser = Parser::new_ext(content, options);

    let mut html = String::with_capacity(content.len() * 2);
    push_html(&mut html, parser);
    html
}
