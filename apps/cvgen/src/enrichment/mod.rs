//! Turns generated (or hand-edited) CV markdown into HTML
//! carrying the `cv-*` role markers the stylesheets target.
//!
//! The input is split on `## ` headings. Text before the first heading is the
//! header block; each heading's title picks the section kind. Lines the
//! recognizers do not understand are passed through unchanged.

pub mod entries;
pub mod header;
pub mod html;
pub mod inline;
pub mod rules;
pub mod skills;

use tracing::debug;

use crate::enrichment::entries::{parse_entities, render_entities, EntityKind, EntitySection};
use crate::enrichment::header::{parse_header, render_header, HeaderBlock};
use crate::enrichment::html::{Element, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Skills,
    Experience,
    Projects,
    Education,
    Certifications,
    Generic,
}

impl SectionKind {
    /// Case-insensitive keyword match on the section title.
    pub fn classify(title: &str) -> Self {
        let t = title.to_lowercase();
        let kind = if t.contains("training") || t.contains("certification") {
            SectionKind::Certifications
        } else if t.contains("skill") {
            SectionKind::Skills
        } else if t.contains("experience") || t.contains("work") {
            SectionKind::Experience
        } else if t.contains("project") {
            SectionKind::Projects
        } else if t.contains("education") {
            SectionKind::Education
        } else {
            SectionKind::Generic
        };
        debug!("Section {title:?} classified as {kind:?}");
        kind
    }

    fn entity_kind(&self) -> Option<EntityKind> {
        match self {
            SectionKind::Experience => Some(EntityKind::Experience),
            SectionKind::Projects => Some(EntityKind::Project),
            SectionKind::Education => Some(EntityKind::Education),
            SectionKind::Certifications => Some(EntityKind::Certification),
            SectionKind::Skills | SectionKind::Generic => None,
        }
    }

    fn css_class(&self, title: &str) -> String {
        match self {
            SectionKind::Skills => "cv-skills".into(),
            SectionKind::Experience => "cv-experience".into(),
            SectionKind::Projects => "cv-projects".into(),
            SectionKind::Education => "cv-education".into(),
            SectionKind::Certifications => "cv-certifications".into(),
            SectionKind::Generic => format!("cv-{}", slug(title)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Entities(EntitySection),
    /// Skills and generic sections keep their source lines.
    Lines(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedSection {
    pub title: String,
    pub kind: SectionKind,
    pub body: SectionBody,
}

/// Parsed form of a CV document, before HTML emission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnrichedDocument {
    pub header: Option<HeaderBlock>,
    pub sections: Vec<EnrichedSection>,
}

impl EnrichedDocument {
    /// Titles of every entity recognized under an entity heading, in document order.
    pub fn entity_titles(&self) -> Vec<String> {
        self.sections
            .iter()
            .filter_map(|s| match &s.body {
                SectionBody::Entities(e) => Some(e.entities.iter().map(|e| e.title.clone())),
                SectionBody::Lines(_) => None,
            })
            .flatten()
            .collect()
    }
}

/// Lowercase, non-alphanumerics collapsed to single dashes.
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

fn section_title(line: &str) -> Option<&str> {
    let title = line.trim_start().strip_prefix("## ")?;
    Some(title.trim())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownEnricher;

impl MarkdownEnricher {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, markdown: &str) -> EnrichedDocument {
        let lines: Vec<&str> = markdown.lines().collect();
        let first_section = lines
            .iter()
            .position(|l| section_title(l).is_some())
            .unwrap_or(lines.len());

        let head = &lines[..first_section];
        let header = head
            .iter()
            .any(|l| !l.trim().is_empty())
            .then(|| parse_header(head));

        let mut sections = Vec::new();
        let mut rest = &lines[first_section..];
        while let Some((first, tail)) = rest.split_first() {
            let title = section_title(first).unwrap_or_default().to_string();
            let end = tail
                .iter()
                .position(|l| section_title(l).is_some())
                .unwrap_or(tail.len());
            let body_lines = &tail[..end];
            let kind = SectionKind::classify(&title);
            let body = match kind.entity_kind() {
                Some(entity_kind) => SectionBody::Entities(parse_entities(body_lines, entity_kind)),
                None => SectionBody::Lines(body_lines.iter().map(|l| l.to_string()).collect()),
            };
            sections.push(EnrichedSection { title, kind, body });
            rest = &tail[end..];
        }

        EnrichedDocument { header, sections }
    }

    pub fn render(&self, doc: &EnrichedDocument) -> String {
        let mut out = Vec::new();
        if let Some(header) = &doc.header {
            out.push(render_header(header).render());
            out.push(String::new());
        }

        let mut main = Element::block("div").class("cv-main-content");
        for section in &doc.sections {
            main.push(render_section(section));
        }
        if !doc.sections.is_empty() {
            out.push(main.render());
        }
        out.join("\n")
    }

    pub fn enrich(&self, markdown: &str) -> String {
        let doc = self.parse(markdown);
        debug!(
            "Enriching document: header={}, {} sections",
            doc.header.is_some(),
            doc.sections.len()
        );
        self.render(&doc)
    }
}

fn render_section(section: &EnrichedSection) -> Element {
    let class = format!("cv-section {}", section.kind.css_class(&section.title));
    let mut element = Element::block("section").class(&class).child(
        Element::block("h2")
            .class("cv-section-header")
            .id(&slug(&section.title))
            .text(&section.title),
    );

    let nodes: Vec<Node> = match (&section.body, section.kind.entity_kind()) {
        (SectionBody::Entities(entities), Some(kind)) => render_entities(entities, kind),
        (SectionBody::Lines(lines), _) if section.kind == SectionKind::Skills => {
            let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
            skills::render_skills(&lines)
        }
        (SectionBody::Lines(lines), _) => lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .cloned()
            .map(Node::Raw)
            .collect(),
        (SectionBody::Entities(_), None) => Vec::new(),
    };
    for node in nodes {
        element.push(node);
    }
    element
}

/// One-shot convenience over [`MarkdownEnricher::enrich`].
pub fn enrich_markdown(markdown: &str) -> String {
    MarkdownEnricher::new().enrich(markdown)
}
