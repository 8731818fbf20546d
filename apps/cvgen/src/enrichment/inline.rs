//! Inline markdown spans to HTML via pulldown-cmark. Block constructs are
//! neutralized first so a fragment always renders as inline content.

use once_cell::sync::Lazy;
use pulldown_cmark::{html, Event, Parser, Tag};
use regex::Regex;

static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").expect("valid link regex"));
static ORDERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,9})([.)])(\s|$)").expect("valid list marker regex"));
static LINK_DEFINITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[[^\]]*\]:").expect("valid link definition regex"));

/// Escapes a leading block marker (heading, quote, list, rule, fence, table,
/// link definition) so the parser keeps the fragment in one paragraph.
fn neutralize_block_start(text: &str) -> String {
    if let Some(c) = ORDERED_MARKER.captures(text) {
        return format!("{}\\{}", &c[1], &text[c[1].len()..]);
    }
    let mut chars = text.chars();
    let first = chars.next();
    let second = chars.next();
    let escape = match first {
        Some('#' | '>' | '-' | '+' | '=' | '|') => true,
        Some('*') => second.map_or(true, char::is_whitespace),
        Some('`') | Some('~') => text.starts_with("```") || text.starts_with("~~~"),
        Some('[') => LINK_DEFINITION.is_match(text),
        _ => false,
    };
    if escape {
        format!("\\{text}")
    } else {
        text.to_string()
    }
}

/// Renders `**bold**`, `*em*`/`_em_`, `` `code` `` and links; raw HTML in the
/// source is escaped rather than passed through. Surrounding whitespace is kept.
pub fn format_inline(text: &str) -> String {
    let body = text.trim();
    if body.is_empty() {
        return text.to_string();
    }
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];

    let source = neutralize_block_start(body);
    let events = Parser::new(&source).filter_map(|event| match event {
        Event::Start(Tag::Paragraph) | Event::End(Tag::Paragraph) => None,
        Event::Html(raw) => Some(Event::Text(raw)),
        other => Some(other),
    });
    let mut out = String::with_capacity(source.len() + 16);
    html::push_html(&mut out, events);
    format!("{leading}{}{trailing}", out.trim_end_matches('\n'))
}

/// Every `[text](url)` pair on a line.
pub fn links(text: &str) -> Vec<(String, String)> {
    LINK.captures_iter(text)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}

/// Comma-separated tag list, trimmed, empty entries dropped.
pub fn split_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
