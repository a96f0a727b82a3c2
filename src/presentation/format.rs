//! Display formatting for dates and markdown bodies.

use pulldown_cmark::{html, Options, Parser};

use crate::catalog::ContentDate;

/// "November 5, 2025" (interviews).
pub fn format_long_date(date: &ContentDate) -> String {
    date.day().format("%B %-d, %Y").to_string()
}

/// "November 2025" (work and play).
pub fn format_month_year(date: &ContentDate) -> String {
    date.day().format("%B %Y").to_string()
}

/// Render authored markdown (`longDescription`, transcripts) to HTML.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Blank thumbnails mean "no image".
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
