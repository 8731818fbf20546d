use std::cmp::{Ordering, Reverse};

use crate::generation::content_selector::{select_entries, ContentEntry};
use crate::generation::markdown::{Block, MarkdownDoc};
use crate::models::Certification;
use crate::versions::VersionProfile;

pub const CERTIFICATIONS_TITLE: &str = "Training & Certifications";

/// Priority ascending, then most recent year first. Undated entries sort last
/// within their priority.
fn certification_order(a: &Certification, b: &Certification) -> Ordering {
    a.priority()
        .cmp(&b.priority())
        .then_with(|| Reverse(a.year).cmp(&Reverse(b.year)))
}

pub fn select_certifications<'a>(
    certifications: &'a [Certification],
    profile: &VersionProfile,
) -> Vec<&'a Certification> {
    if !profile.show_certifications {
        return Vec::new();
    }
    let mut selected = select_entries(certifications, profile);
    // stable: equal keys keep source order
    selected.sort_by(|a, b| certification_order(a, b));
    selected
}

fn org_year_line(cert: &Certification) -> Option<String> {
    let org = cert.organization.trim();
    match (org.is_empty(), cert.year) {
        (false, Some(year)) => Some(format!("_{org}_ | _{year}_")),
        (false, None) => Some(format!("_{org}_")),
        (true, Some(year)) => Some(format!("_{year}_")),
        (true, None) => None,
    }
}

pub fn generate_certifications(
    certifications: &[Certification],
    profile: &VersionProfile,
) -> String {
    let selected = select_certifications(certifications, profile);
    if selected.is_empty() {
        return String::new();
    }

    let mut doc = MarkdownDoc::new();
    doc.paragraph(Block::Section(CERTIFICATIONS_TITLE.to_string()));

    for cert in selected {
        doc.push(Block::Title(cert.name.clone()));
        if let Some(line) = org_year_line(cert) {
            doc.push(Block::Text(line));
        }
        doc.blank();

        if let Some(description) = cert
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
        {
            doc.paragraph(Block::Text(description.to_string()));
        }
    }

    doc.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::versions::VersionRegistry;
    use serde_json::json;

    fn certs(value: serde_json::Value) -> Vec<Certification> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_priority_then_recent_year() {
        let registry = VersionRegistry::default();
        let data = certs(json!([
            {"name": "P2-2020", "priority": 2, "year": 2020},
            {"name": "P1-2021", "priority": 1, "year": 2021},
            {"name": "P1-2019", "priority": 1, "year": 2019}
        ]));
        let order: Vec<(u32, Option<u32>)> =
            select_certifications(&data, registry.get("firmware").unwrap())
                .iter()
                .map(|c| (c.priority(), c.year))
                .collect();
        assert_eq!(order, vec![(1, Some(2021)), (1, Some(2019)), (2, Some(2020))]);
    }

    #[test]
    fn test_undated_sorts_last_within_priority() {
        let registry = VersionRegistry::default();
        let data = certs(json!([
            {"name": "Undated"},
            {"name": "Dated", "year": 2018}
        ]));
        let names: Vec<&str> = select_certifications(&data, registry.get("ai").unwrap())
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Dated", "Undated"]);
    }

    #[test]
    fn test_hidden_when_flag_off() {
        let registry = VersionRegistry::default();
        let data = certs(json!([{"name": "Scrum Master", "year": 2020}]));
        assert_eq!(
            generate_certifications(&data, registry.get("executive").unwrap()),
            ""
        );
    }

    #[test]
    fn test_rendered_shape() {
        let registry = VersionRegistry::default();
        let data = certs(json!([
            {
                "name": "Certified ScrumMaster",
                "organization": "Scrum Alliance",
                "year": 2020,
                "description": "Agile delivery for firmware teams."
            },
            {"name": "Internal Only", "versions": ["consulting"]}
        ]));
        assert_eq!(
            generate_certifications(&data, registry.get("ai").unwrap()),
            "## Training & Certifications\n\n### Certified ScrumMaster\n_Scrum Alliance_ | _2020_\n\nAgile delivery for firmware teams."
        );
    }
}
