use crate::generation::content_selector::{select_entries, select_variant};
use crate::generation::markdown::{Block, MarkdownDoc};
use crate::models::{ProjectEntry, ProjectLinks};
use crate::versions::VersionProfile;

pub const PROJECTS_TITLE: &str = "Projects";

const LINK_SEPARATOR: &str = " | ";

#[derive(Debug, Clone)]
pub struct SelectedProject<'a> {
    pub entry: &'a ProjectEntry,
    pub descriptions: Vec<String>,
    pub skills_tags: String,
}

/// Projects surviving selection. Always empty for executive layouts; projects
/// without descriptions for the version are dropped.
pub fn select_projects<'a>(
    entries: &'a [ProjectEntry],
    profile: &VersionProfile,
) -> Vec<SelectedProject<'a>> {
    if profile.is_executive() {
        return Vec::new();
    }

    select_entries(entries, profile)
        .into_iter()
        .filter_map(|entry| {
            let descriptions = select_variant(&entry.descriptions, &profile.name);
            (!descriptions.is_empty()).then(|| SelectedProject {
                entry,
                descriptions,
                skills_tags: select_variant(&entry.skills_tags, &profile.name),
            })
        })
        .collect()
}

/// `[GitHub](…) | [Demo](…) | [Website](…)` in that fixed order.
pub fn links_line(links: &ProjectLinks) -> Option<String> {
    let labelled = [
        ("GitHub", &links.github),
        ("Demo", &links.demo),
        ("Website", &links.website),
    ];
    let parts: Vec<String> = labelled
        .iter()
        .filter_map(|(label, url)| {
            url.as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(|u| format!("[{label}]({u})"))
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join(LINK_SEPARATOR))
}

pub fn generate_projects(entries: &[ProjectEntry], profile: &VersionProfile) -> String {
    let selected = select_projects(entries, profile);
    if selected.is_empty() {
        return String::new();
    }

    let mut doc = MarkdownDoc::new();
    doc.paragraph(Block::Section(PROJECTS_TITLE.to_string()));

    for project in selected {
        let entry = project.entry;
        doc.push(Block::Title(entry.name.clone()));
        if !entry.period.trim().is_empty() {
            doc.push(Block::Italic(entry.period.clone()));
        }
        doc.blank();

        if let Some(links) = links_line(&entry.links) {
            doc.paragraph(Block::Text(links));
        }

        for description in project.descriptions {
            doc.push(Block::Dash(description));
        }
        doc.blank();

        if !project.skills_tags.trim().is_empty() {
            doc.paragraph(Block::Italic(project.skills_tags));
        }
    }

    doc.render()
}
