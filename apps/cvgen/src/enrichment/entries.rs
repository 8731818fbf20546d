//! Entity sections (experience, projects, education, certifications).
//!
//! Each `### ` line opens an entity. The walker is positional: italic lines
//! directly under a title are dates (or organization/year for certifications),
//! italic lines after the body are skills tags.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::enrichment::html::{Element, Node};
use crate::enrichment::inline::{format_inline, split_tags};
use crate::enrichment::rules::{classify_line, LineShape};
use crate::enrichment::slug;

static REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*·\s*_([^_]+)_\s*$").expect("valid reference regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Experience,
    Project,
    Education,
    Certification,
}

/// The role-marker vocabulary for one entity kind.
struct Vocabulary {
    item: &'static str,
    id_prefix: &'static str,
    title: &'static str,
    location: &'static str,
    period: &'static str,
    role: &'static str,
    list: &'static str,
    list_item: &'static str,
}

impl EntityKind {
    fn vocabulary(&self) -> Vocabulary {
        match self {
            EntityKind::Experience => Vocabulary {
                item: "cv-experience-item",
                id_prefix: "cv-exp",
                title: "cv-company-name",
                location: "cv-company-location",
                period: "cv-company-period",
                role: "cv-position-title",
                list: "cv-achievements",
                list_item: "cv-achievement",
            },
            EntityKind::Project => Vocabulary {
                item: "cv-project-item",
                id_prefix: "cv-project",
                title: "cv-project-name",
                location: "cv-project-location",
                period: "cv-project-period",
                role: "cv-project-role",
                list: "cv-project-descriptions",
                list_item: "cv-project-description",
            },
            EntityKind::Education => Vocabulary {
                item: "cv-education-item",
                id_prefix: "cv-edu",
                title: "cv-institution-name",
                location: "cv-education-location",
                period: "cv-education-period",
                role: "cv-degree-title",
                list: "cv-education-achievements",
                list_item: "cv-education-achievement",
            },
            EntityKind::Certification => Vocabulary {
                item: "cv-certification-item",
                id_prefix: "cv-cert",
                title: "cv-certification-name",
                location: "cv-certification-org",
                period: "cv-certification-year",
                role: "cv-certification-title",
                list: "cv-certification-points",
                list_item: "cv-certification-point",
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Role {
    pub title: String,
    pub reference: Option<String>,
    /// Unrecognized trailing markdown after the bold title, e.g. `, Major in X`.
    pub rest: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub title: String,
    /// Location, or organization for certifications.
    pub location: Option<String>,
    /// Date range, or year for certifications.
    pub period: Option<String>,
    pub role: Option<Role>,
    pub links: Vec<(String, String)>,
    pub highlight: Option<String>,
    pub labeled: Vec<(String, String)>,
    pub items: Vec<String>,
    pub description: Vec<String>,
    pub tags: Vec<String>,
    pub passthrough: Vec<String>,
}

impl Entity {
    fn new(title: String) -> Self {
        Self {
            title,
            location: None,
            period: None,
            role: None,
            links: Vec::new(),
            highlight: None,
            labeled: Vec::new(),
            items: Vec::new(),
            description: Vec::new(),
            tags: Vec::new(),
            passthrough: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntitySection {
    /// Lines before the first entity title, kept verbatim.
    pub preamble: Vec<String>,
    pub entities: Vec<Entity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Directly under the title: dates and locations expected.
    Heading,
    Body,
}

fn is_year(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

fn parse_role(label: String, rest: &str) -> Role {
    match REFERENCE.captures(rest) {
        Some(c) => Role {
            title: label,
            reference: Some(c[1].trim().to_string()),
            rest: String::new(),
        },
        None => Role {
            title: label,
            reference: None,
            rest: rest.to_string(),
        },
    }
}

/// Applies one classified line to the open entity.
fn accept(entity: &mut Entity, stage: &mut Stage, kind: EntityKind, raw: &str, shape: LineShape) {
    match shape {
        LineShape::Blank => {}
        LineShape::LocationBreak(location)
            if *stage == Stage::Heading && entity.location.is_none() =>
        {
            entity.location = Some(location);
        }
        LineShape::OrgYear { org, year }
            if *stage == Stage::Heading && entity.location.is_none() && entity.period.is_none() =>
        {
            entity.location = Some(org);
            entity.period = Some(year);
        }
        LineShape::Italic(text)
            if *stage == Stage::Heading
                && kind == EntityKind::Certification
                && !is_year(&text)
                && entity.location.is_none() =>
        {
            entity.location = Some(text);
        }
        LineShape::Italic(text)
            if *stage == Stage::Heading
                && entity.period.is_none()
                && (kind != EntityKind::Certification || is_year(&text)) =>
        {
            entity.period = Some(text);
        }
        LineShape::LocationBreak(_) | LineShape::OrgYear { .. } if *stage == Stage::Heading => {
            entity.passthrough.push(raw.to_string());
        }
        LineShape::Italic(text)
            if *stage == Stage::Heading && kind == EntityKind::Certification && !is_year(&text) =>
        {
            entity.passthrough.push(raw.to_string());
        }
        LineShape::Italic(text) => {
            *stage = Stage::Body;
            entity.tags.extend(split_tags(&text));
        }
        LineShape::BoldLabel { label, rest } => {
            *stage = Stage::Body;
            // `**Label:** text` is a detail line, never the role
            let is_detail = label.ends_with(':') || rest.trim_start().starts_with(':');
            if entity.role.is_none() && entity.items.is_empty() && !is_detail {
                entity.role = Some(parse_role(label, &rest));
            } else {
                let text = rest.trim_start().trim_start_matches(':').trim();
                entity
                    .labeled
                    .push((label.trim_end_matches(':').to_string(), text.to_string()));
            }
        }
        LineShape::Links(links) => {
            *stage = Stage::Body;
            entity.links.extend(links);
        }
        LineShape::Emphasis(text) if entity.highlight.is_none() => {
            *stage = Stage::Body;
            entity.highlight = Some(text);
        }
        LineShape::ListItem(text) => {
            *stage = Stage::Body;
            entity.items.push(text);
        }
        LineShape::Text(text) if kind == EntityKind::Certification => {
            *stage = Stage::Body;
            entity.description.push(text);
        }
        _ => {
            *stage = Stage::Body;
            entity.passthrough.push(raw.to_string());
        }
    }
}

pub fn parse_entities(lines: &[&str], kind: EntityKind) -> EntitySection {
    let mut section = EntitySection::default();
    let mut stage = Stage::Heading;

    for raw in lines {
        let shape = classify_line(raw);
        if let LineShape::EntityTitle(title) = shape {
            section.entities.push(Entity::new(title));
            stage = Stage::Heading;
            continue;
        }
        match section.entities.last_mut() {
            Some(entity) => accept(entity, &mut stage, kind, raw, shape),
            None if shape == LineShape::Blank => {}
            None => section.preamble.push(raw.to_string()),
        }
    }
    section
}

fn tags_node(tags: &[String]) -> Element {
    let mut div = Element::block("div").class("cv-skills-tags skills-tags");
    for tag in tags {
        div.push(Element::inline("span").class("cv-skill-tag skill-tag").text(tag));
    }
    div
}

fn link_class(label: &str) -> &'static str {
    match label.to_lowercase().as_str() {
        "github" => "cv-project-link cv-github-link",
        "demo" => "cv-project-link cv-demo-link",
        _ => "cv-project-link cv-website-link",
    }
}

fn role_node(role: &Role, vocab: &Vocabulary) -> Element {
    let mut p = Element::block("p")
        .class(vocab.role)
        .child(Element::inline("strong").text(&role.title));
    if let Some(reference) = &role.reference {
        p.push(Node::Html(" ".into()));
        p.push(
            Element::inline("span")
                .class("cv-reference")
                .html("· ")
                .child(Element::inline("em").text(reference)),
        );
    }
    if !role.rest.is_empty() {
        p.push(Node::Html(format_inline(&role.rest)));
    }
    p
}

fn render_entity(entity: &Entity, kind: EntityKind) -> Element {
    let vocab = kind.vocabulary();
    let id = format!("{}-{}", vocab.id_prefix, slug(&entity.title));
    let mut item = Element::block("div").class(vocab.item).id(&id);

    let mut header = Element::block("div")
        .class("cv-entry-header")
        .child(Element::block("h3").class(vocab.title).html(format_inline(&entity.title)));
    if let Some(location) = &entity.location {
        header.push(
            Element::inline("span")
                .class(vocab.location)
                .child(Element::inline("em").text(location)),
        );
    }
    let period = entity.period.as_ref().map(|p| {
        Element::inline("span")
            .class(vocab.period)
            .child(Element::inline("em").text(p))
    });

    // With a role line the date sits beside it, otherwise beside the title.
    match &entity.role {
        Some(role) => {
            item.push(header);
            let mut position = Element::block("div")
                .class("cv-position-header")
                .child(role_node(role, &vocab));
            if let Some(period) = period {
                position.push(period);
            }
            item.push(position);
        }
        None => {
            if let Some(period) = period {
                header.push(period);
            }
            item.push(header);
        }
    }

    if !entity.links.is_empty() {
        let mut p = Element::block("p").class("cv-project-links");
        for (i, (label, url)) in entity.links.iter().enumerate() {
            if i > 0 {
                p.push(Node::Html(" | ".into()));
            }
            p.push(
                Element::inline("a")
                    .attr("href", url)
                    .class(link_class(label))
                    .text(label),
            );
        }
        item.push(p);
    }

    if let Some(highlight) = &entity.highlight {
        let class = match kind {
            EntityKind::Education => "cv-education-highlight",
            _ => "cv-entry-highlight",
        };
        item.push(
            Element::block("div")
                .class(class)
                .child(Element::inline("em").html(format_inline(highlight))),
        );
    }

    for (label, rest) in &entity.labeled {
        item.push(
            Element::block("p")
                .class("cv-entry-detail")
                .child(Element::inline("strong").text(&format!("{label}:")))
                .html(format!(" {}", format_inline(rest))),
        );
    }

    if !entity.items.is_empty() {
        let mut list = Element::block("ul").class(vocab.list);
        for text in &entity.items {
            list.push(
                Element::block("li")
                    .class(vocab.list_item)
                    .html(format_inline(text)),
            );
        }
        item.push(list);
    }

    if !entity.description.is_empty() {
        let mut description = Element::block("div").class("cv-certification-description");
        for text in &entity.description {
            description.push(
                Element::block("p")
                    .class("cv-certification-desc-text")
                    .html(format_inline(text)),
            );
        }
        item.push(description);
    }

    if !entity.tags.is_empty() {
        item.push(tags_node(&entity.tags));
    }

    for line in &entity.passthrough {
        item.push(Node::Raw(line.clone()));
    }
    item
}

/// Entity nodes for a section body, preamble lines first.
pub fn render_entities(section: &EntitySection, kind: EntityKind) -> Vec<Node> {
    let mut nodes: Vec<Node> = section.preamble.iter().cloned().map(Node::Raw).collect();
    nodes.extend(
        section
            .entities
            .iter()
            .map(|e| Node::from(render_entity(e, kind))),
    );
    nodes
}
