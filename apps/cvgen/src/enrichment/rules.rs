//! Line-shape recognition. Each rule is a (name, matcher) pair; rules are tried
//! in table order and the first match wins, so the order below is the precedence.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::enrichment::inline;

/// The structural shape of one markdown line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineShape {
    Blank,
    /// `| a | b |`
    TableRow(Vec<String>),
    /// `### Title`
    EntityTitle(String),
    /// `> text`
    Quote(String),
    /// `* item` or `- item`
    ListItem(String),
    /// `_text_<br>`
    LocationBreak(String),
    /// `_org_ | _year_`
    OrgYear { org: String, year: String },
    /// `_text_`
    Italic(String),
    /// `*text*`
    Emphasis(String),
    /// `**label**rest`
    BoldLabel { label: String, rest: String },
    /// A line made only of `[text](url)` links separated by `|`.
    Links(Vec<(String, String)>),
    Text(String),
}

type Matcher = fn(&str) -> Option<LineShape>;

static LOCATION_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^_([^_]+)_\s*<br\s*/?>$").expect("valid location regex"));
static ORG_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^_([^_]+)_\s*\|\s*_([^_]+)_$").expect("valid org/year regex"));
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^_([^_]+)_$").expect("valid italic regex"));
static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*([^*\s][^*]*)\*$").expect("valid emphasis regex"));
static BOLD_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\*([^*]+)\*\*(.*)$").expect("valid bold regex"));
static LINKS_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[[^\]]+\]\([^)\s]+\)(\s*\|\s*\[[^\]]+\]\([^)\s]+\))*$")
        .expect("valid links regex")
});

/// Precedence order. `ListItem` precedes `Emphasis` so `* a*` stays a bullet;
/// the specific italic shapes precede the plain one.
pub const LINE_RULES: &[(&str, Matcher)] = &[
    ("blank", match_blank),
    ("table_row", match_table_row),
    ("entity_title", match_entity_title),
    ("quote", match_quote),
    ("list_item", match_list_item),
    ("location_break", match_location_break),
    ("org_year", match_org_year),
    ("italic", match_italic),
    ("emphasis", match_emphasis),
    ("bold_label", match_bold_label),
    ("links", match_links),
];

pub fn classify_line(line: &str) -> LineShape {
    let trimmed = line.trim();
    for (name, matcher) in LINE_RULES {
        if let Some(shape) = matcher(trimmed) {
            trace!(rule = *name, "line matched");
            return shape;
        }
    }
    LineShape::Text(trimmed.to_string())
}

fn match_blank(line: &str) -> Option<LineShape> {
    line.is_empty().then_some(LineShape::Blank)
}

fn match_table_row(line: &str) -> Option<LineShape> {
    if line.len() < 2 || !line.starts_with('|') || !line.ends_with('|') {
        return None;
    }
    let inner = &line[1..line.len() - 1];
    Some(LineShape::TableRow(
        inner.split('|').map(|c| c.trim().to_string()).collect(),
    ))
}

fn match_entity_title(line: &str) -> Option<LineShape> {
    line.strip_prefix("### ")
        .map(|t| LineShape::EntityTitle(t.trim().to_string()))
}

fn match_quote(line: &str) -> Option<LineShape> {
    line.strip_prefix("> ")
        .or_else(|| (line == ">").then_some(""))
        .map(|t| LineShape::Quote(t.trim().to_string()))
}

fn match_list_item(line: &str) -> Option<LineShape> {
    line.strip_prefix("* ")
        .or_else(|| line.strip_prefix("- "))
        .map(|t| LineShape::ListItem(t.trim().to_string()))
}

fn match_location_break(line: &str) -> Option<LineShape> {
    LOCATION_BREAK
        .captures(line)
        .map(|c| LineShape::LocationBreak(c[1].trim().to_string()))
}

fn match_org_year(line: &str) -> Option<LineShape> {
    ORG_YEAR.captures(line).map(|c| LineShape::OrgYear {
        org: c[1].trim().to_string(),
        year: c[2].trim().to_string(),
    })
}

fn match_italic(line: &str) -> Option<LineShape> {
    ITALIC
        .captures(line)
        .map(|c| LineShape::Italic(c[1].trim().to_string()))
}

fn match_emphasis(line: &str) -> Option<LineShape> {
    EMPHASIS
        .captures(line)
        .map(|c| LineShape::Emphasis(c[1].trim().to_string()))
}

fn match_bold_label(line: &str) -> Option<LineShape> {
    BOLD_LABEL.captures(line).map(|c| LineShape::BoldLabel {
        label: c[1].trim().to_string(),
        rest: c[2].to_string(),
    })
}

fn match_links(line: &str) -> Option<LineShape> {
    LINKS_ONLY
        .is_match(line)
        .then(|| LineShape::Links(inline::links(line)))
}
