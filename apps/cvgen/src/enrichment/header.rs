//! Header block recognition: everything before the first `## ` heading.
//!
//! Lines are matched independently of their order. Any line that matches no
//! rule is kept verbatim inside the header.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::enrichment::html::{escape, Element, Node};
use crate::enrichment::inline::{format_inline, links};
use crate::enrichment::rules::{classify_line, LineShape};

/// Lines longer than this that match nothing else are read as a summary paragraph.
pub const SUMMARY_MIN_CHARS: usize = 50;

static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)\s]+)\)$").expect("valid image regex"));
static NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^# \*\*([^*]+)\*\*$").expect("valid name regex"));
static LANGUAGES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\*\*([^*]+\([^)]+\)[^*]*)\*\*$").expect("valid languages regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Phone,
    Email,
    CodeHost,
    Network,
    /// A segment without a channel glyph, kept as plain text.
    Other,
}

impl ContactKind {
    /// Glyphs are matched without the emoji variation selector so `✉` and `✉️` both count.
    const GLYPHS: [(char, ContactKind); 4] = [
        ('📞', ContactKind::Phone),
        ('✉', ContactKind::Email),
        ('🔗', ContactKind::CodeHost),
        ('💼', ContactKind::Network),
    ];

    fn detect(segment: &str) -> Option<(char, ContactKind)> {
        Self::GLYPHS
            .iter()
            .copied()
            .find(|(glyph, _)| segment.contains(*glyph))
    }

    fn icon(&self) -> Option<(&'static str, &'static str)> {
        match self {
            ContactKind::Phone => Some(("assets/icons/phone.png", "Phone")),
            ContactKind::Email => Some(("assets/icons/email.png", "Email")),
            ContactKind::CodeHost => Some(("assets/icons/github.png", "GitHub")),
            ContactKind::Network => Some(("assets/icons/linkedin.png", "LinkedIn")),
            ContactKind::Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactChannel {
    pub kind: ContactKind,
    pub text: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderBlock {
    pub photo: Option<(String, String)>,
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub address: Option<String>,
    pub contact: Vec<ContactChannel>,
    pub languages: Option<String>,
    pub summary: Vec<String>,
    /// Lines no rule recognized, in source order.
    pub passthrough: Vec<String>,
}

type HeaderRule = fn(&mut HeaderBlock, &str) -> bool;

/// Tried in order; the first rule returning true consumes the line.
const HEADER_RULES: &[HeaderRule] = &[
    take_photo,
    take_name,
    take_tagline,
    take_marked_summary,
    take_address,
    take_contact,
    take_languages,
    take_long_line_as_summary,
];

fn take_photo(block: &mut HeaderBlock, line: &str) -> bool {
    match IMAGE.captures(line) {
        Some(c) if block.photo.is_none() => {
            block.photo = Some((c[1].to_string(), c[2].to_string()));
            true
        }
        _ => false,
    }
}

fn take_name(block: &mut HeaderBlock, line: &str) -> bool {
    match NAME.captures(line) {
        Some(c) if block.name.is_none() => {
            block.name = Some(c[1].trim().to_string());
            true
        }
        _ => false,
    }
}

fn take_tagline(block: &mut HeaderBlock, line: &str) -> bool {
    match classify_line(line) {
        LineShape::EntityTitle(t) if block.tagline.is_none() => {
            block.tagline = Some(t);
            true
        }
        _ => false,
    }
}

fn take_marked_summary(block: &mut HeaderBlock, line: &str) -> bool {
    match classify_line(line) {
        LineShape::Quote(text) if !text.is_empty() => {
            block.summary.push(text);
            true
        }
        _ => false,
    }
}

fn take_address(block: &mut HeaderBlock, line: &str) -> bool {
    match classify_line(line) {
        LineShape::Italic(text) if block.address.is_none() => {
            block.address = Some(text);
            true
        }
        _ => false,
    }
}

fn take_contact(block: &mut HeaderBlock, line: &str) -> bool {
    if ContactKind::detect(line).is_none() {
        return false;
    }
    for segment in line.split('|') {
        let (kind, text) = match ContactKind::detect(segment) {
            Some((glyph, kind)) => (kind, segment.replace(glyph, "").replace('\u{FE0F}', "")),
            None => (ContactKind::Other, segment.to_string()),
        };
        let text = text.trim().to_string();
        if text.is_empty() {
            continue;
        }
        let channel = match links(&text).into_iter().next() {
            Some((label, href)) => ContactChannel {
                kind,
                text: label,
                href: Some(href),
            },
            None => ContactChannel {
                kind,
                text,
                href: None,
            },
        };
        block.contact.push(channel);
    }
    true
}

fn take_languages(block: &mut HeaderBlock, line: &str) -> bool {
    match LANGUAGES.captures(line) {
        Some(c) if block.languages.is_none() => {
            block.languages = Some(c[1].trim().to_string());
            true
        }
        _ => false,
    }
}

/// Fallback for hand-written documents without the `> ` marker. Can misread a
/// long address or tagline variant that lacks its usual markup.
fn take_long_line_as_summary(block: &mut HeaderBlock, line: &str) -> bool {
    let looks_plain = !line.starts_with("**") && !line.starts_with('_') && !line.starts_with('#');
    if looks_plain && line.chars().count() > SUMMARY_MIN_CHARS {
        block.summary.push(line.to_string());
        return true;
    }
    false
}

pub fn parse_header(lines: &[&str]) -> HeaderBlock {
    let mut block = HeaderBlock::default();
    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if !HEADER_RULES.iter().any(|rule| rule(&mut block, line)) {
            block.passthrough.push(raw.to_string());
        }
    }
    block
}

fn contact_node(channel: &ContactChannel) -> Vec<Node> {
    let body: Node = match &channel.href {
        Some(href) => Element::inline("a").attr("href", href).text(&channel.text).into(),
        None => Node::Text(escape(&channel.text)),
    };
    match channel.kind.icon() {
        Some((src, alt)) => {
            let icon = Element::void("img")
                .attr("src", src)
                .class("cv-contact-icon icon")
                .attr("alt", alt);
            vec![icon.into(), Node::Html(" ".into()), body]
        }
        None => vec![Element::inline("span").class("cv-contact-text").child(body).into()],
    }
}

pub fn render_header(block: &HeaderBlock) -> Element {
    let mut info = Element::block("div").class("cv-header-info");

    if let Some(name) = &block.name {
        info.push(
            Element::block("h1")
                .class("cv-name")
                .id("cv-name")
                .child(Element::inline("strong").text(name)),
        );
    }
    if let Some(tagline) = &block.tagline {
        info.push(
            Element::block("h3")
                .class("cv-tagline")
                .id("cv-tagline")
                .html(format_inline(tagline)),
        );
    }
    if let Some(address) = &block.address {
        info.push(
            Element::block("p")
                .class("cv-address")
                .id("cv-address")
                .child(Element::inline("em").text(address)),
        );
    }
    if !block.contact.is_empty() {
        let mut contact = Element::block("div")
            .class("cv-contact inline-contact")
            .id("cv-contact");
        for (i, channel) in block.contact.iter().enumerate() {
            if i > 0 {
                contact.push(Node::Html(" | ".into()));
            }
            for node in contact_node(channel) {
                contact.push(node);
            }
        }
        info.push(contact);
    }
    if let Some(languages) = &block.languages {
        info.push(
            Element::block("p")
                .class("cv-languages")
                .id("cv-languages")
                .child(Element::inline("strong").text(languages)),
        );
    }
    for paragraph in &block.summary {
        info.push(
            Element::block("div").class("cv-executive-summary-inline").child(
                Element::block("p")
                    .class("cv-executive-summary-text")
                    .html(format_inline(paragraph)),
            ),
        );
    }
    for line in &block.passthrough {
        info.push(Node::Raw(line.clone()));
    }

    let mut header = Element::block("div").class("cv-header").child(info);
    if let Some((alt, src)) = &block.photo {
        header.push(
            Element::block("div").class("cv-profile-container").child(
                Element::void("img")
                    .attr("src", src)
                    .attr("alt", alt)
                    .class("cv-profile-pic profile-pic"),
            ),
        );
    }
    header
}
