//! Skills section. Executive layouts get one line per category; technical
//! layouts get a comparison table, or labeled paragraphs once the category
//! count makes a table unreadable.

use crate::generation::content_selector::{is_selected, select_variant};
use crate::generation::markdown::{join_inline, title_case, Block, MarkdownDoc, SKILL_BULLET};
use crate::models::{ExecutiveSkills, SkillsInput, SkillsInputV1, SkillsInputV2};
use crate::versions::VersionProfile;

pub const SKILLS_TITLE: &str = "Skills";

/// Largest category count still rendered as a table.
pub const MAX_TABLE_COLUMNS: usize = 6;

const LANGUAGES_HEADER: &str = "Languages & Core Tech";
const DOMAIN_HEADER: &str = "Domain Expertise";
const TOOLS_HEADER: &str = "Tools & Management";

/// One rendered column: header plus items in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillColumn {
    pub header: String,
    pub items: Vec<String>,
}

pub fn generate_skills(skills: &SkillsInput, profile: &VersionProfile) -> String {
    let mut doc = MarkdownDoc::new();
    doc.paragraph(Block::Section(SKILLS_TITLE.to_string()));

    if profile.is_executive() {
        executive_lines(&mut doc, skills.executive(), profile);
    } else {
        let columns = technical_columns(skills, profile);
        if columns.len() > MAX_TABLE_COLUMNS {
            labeled_paragraphs(&mut doc, &columns);
        } else {
            skills_table(&mut doc, &columns);
        }
    }

    doc.render()
}

/// Number of categories/columns the section renders for a profile.
pub fn column_count(skills: &SkillsInput, profile: &VersionProfile) -> usize {
    if profile.is_executive() {
        skills.executive().len()
    } else {
        technical_columns(skills, profile).len()
    }
}

fn executive_lines(doc: &mut MarkdownDoc, categories: &ExecutiveSkills, profile: &VersionProfile) {
    for (category, skills) in categories.iter() {
        let items: Vec<String> = skills
            .iter()
            .map(|s| match s.metric.as_deref().map(str::trim) {
                Some(metric) if profile.show_metrics && !metric.is_empty() => {
                    format!("{} ({metric})", s.skill)
                }
                _ => s.skill.clone(),
            })
            .collect();
        doc.paragraph(Block::Bold {
            text: title_case(category),
            suffix: format!(": {}", join_inline(&items)),
        });
    }
}

pub fn technical_columns(skills: &SkillsInput, profile: &VersionProfile) -> Vec<SkillColumn> {
    match skills {
        SkillsInput::V1(v1) => legacy_columns(v1, &profile.name),
        SkillsInput::V2(v2) => dynamic_columns(v2, profile),
    }
}

/// The fixed three buckets of the legacy shape. Columns are kept even when empty.
fn legacy_columns(v1: &SkillsInputV1, version: &str) -> Vec<SkillColumn> {
    let technical = &v1.technical;

    let mut languages = select_variant(&technical.programming_languages, version);
    languages.extend(select_variant(&technical.core_technologies, version));

    let domain = select_variant(&technical.domain_expertise, version);
    let domain_header = domain
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DOMAIN_HEADER.to_string());
    let mut domain_items = domain.skills;
    domain_items.extend(domain.secondary_skills);

    let mut tools = select_variant(&technical.tools_platforms, version);
    tools.extend(select_variant(&technical.project_management, version));

    vec![
        SkillColumn {
            header: LANGUAGES_HEADER.to_string(),
            items: languages,
        },
        SkillColumn {
            header: domain_header,
            items: domain_items,
        },
        SkillColumn {
            header: TOOLS_HEADER.to_string(),
            items: tools,
        },
    ]
}

/// Selected categories with a non-empty item list for the version, in source order.
fn dynamic_columns(v2: &SkillsInputV2, profile: &VersionProfile) -> Vec<SkillColumn> {
    v2.categories
        .iter()
        .filter(|c| is_selected(*c, profile))
        .filter_map(|c| {
            let items = select_variant(&c.items, &profile.name);
            (!items.is_empty()).then(|| SkillColumn {
                header: c.name.clone(),
                items,
            })
        })
        .collect()
}

fn skills_table(doc: &mut MarkdownDoc, columns: &[SkillColumn]) {
    let row_count = columns.iter().map(|c| c.items.len()).max().unwrap_or(0);
    if row_count == 0 {
        return;
    }

    let rows = (0..row_count)
        .map(|i| {
            columns
                .iter()
                .map(|c| {
                    c.items
                        .get(i)
                        .map(|item| format!("{SKILL_BULLET} {item}"))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    doc.push(Block::Table {
        headers: columns.iter().map(|c| c.header.clone()).collect(),
        rows,
    });
}

fn labeled_paragraphs(doc: &mut MarkdownDoc, columns: &[SkillColumn]) {
    for column in columns {
        doc.paragraph(Block::Bold {
            text: column.header.clone(),
            suffix: format!(": {}", join_inline(&column.items)),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::versions::VersionRegistry;
    use serde_json::json;

    fn legacy() -> SkillsInput {
        serde_json::from_value(json!({
            "executive": {
                "leadership_impact": [
                    {"skill": "Team Leadership", "metric": "7+ Direct Reports"},
                    {"skill": "Hiring"}
                ],
                "technical_strategy": [{"skill": "Roadmaps"}]
            },
            "technical": {
                "programming_languages": {"firmware": ["C", "C++"]},
                "domain_expertise": {"firmware": {"skills": ["ML"]}},
                "tools_platforms": {"firmware": []}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_technical_table_pads_short_columns() {
        let registry = VersionRegistry::default();
        let md = generate_skills(&legacy(), registry.get("firmware").unwrap());
        let rows: Vec<&str> = md.lines().filter(|l| l.starts_with("| ✓")).collect();
        assert_eq!(rows.len(), 2, "one row per item of the longest column:\n{md}");
        assert_eq!(rows[0], "| ✓ C | ✓ ML |  |");
        assert_eq!(rows[1], "| ✓ C++ |  |  |");
        assert!(md.contains("| **Languages & Core Tech** | **Domain Expertise** | **Tools & Management** |"));
    }

    #[test]
    fn test_executive_lines_with_metrics() {
        let registry = VersionRegistry::default();
        let md = generate_skills(&legacy(), registry.get("executive").unwrap());
        assert_eq!(
            md,
            "## Skills\n\n**Leadership Impact**: Team Leadership (7+ Direct Reports) • Hiring\n\n**Technical Strategy**: Roadmaps"
        );
    }

    #[test]
    fn test_metrics_hidden_when_flag_off() {
        let registry = VersionRegistry::default();
        let mut exec = registry.get("executive").unwrap().clone();
        exec.show_metrics = false;
        let md = generate_skills(&legacy(), &exec);
        assert!(md.contains("**Leadership Impact**: Team Leadership • Hiring"));
    }

    #[test]
    fn test_required_header_survives_empty_input() {
        let registry = VersionRegistry::default();
        let md = generate_skills(&SkillsInput::default(), registry.get("ai").unwrap());
        assert_eq!(md, "## Skills");
    }

    fn dynamic(count: usize) -> SkillsInput {
        let categories: Vec<_> = (1..=count)
            .map(|i| json!({"name": format!("Cat {i}"), "items": {"ai,consulting": [format!("item{i}")]}}))
            .collect();
        serde_json::from_value(json!({ "categories": categories })).unwrap()
    }

    #[test]
    fn test_dynamic_table_up_to_six_columns() {
        let registry = VersionRegistry::default();
        let ai = registry.get("ai").unwrap();
        let md = generate_skills(&dynamic(6), ai);
        assert!(md.contains("| **Cat 1** |"), "six categories stay a table:\n{md}");
        assert_eq!(column_count(&dynamic(6), ai), 6);
    }

    #[test]
    fn test_dynamic_paragraphs_above_six_columns() {
        let registry = VersionRegistry::default();
        let md = generate_skills(&dynamic(7), registry.get("consulting").unwrap());
        assert!(!md.contains('|'), "seven categories must not render a table:\n{md}");
        assert!(md.contains("**Cat 7**: item7"));
    }

    #[test]
    fn test_dynamic_drops_unselected_and_empty_categories() {
        let registry = VersionRegistry::default();
        let skills: SkillsInput = serde_json::from_value(json!({
            "categories": [
                {"name": "Embedded", "items": {"firmware": ["RTOS"]}},
                {"name": "Data", "items": {"ai": ["Pandas"]}},
                {"name": "Cloud", "versions": ["ai"], "items": {"firmware": ["AWS"]}},
                {"name": "Deep", "priority": 3, "items": {"firmware": ["Yocto"]}}
            ]
        }))
        .unwrap();
        let firmware = registry.get("firmware").unwrap();
        let headers: Vec<String> = technical_columns(&skills, firmware)
            .into_iter()
            .map(|c| c.header)
            .collect();
        assert_eq!(headers, vec!["Embedded", "Deep"]);

        let general = registry.get("general").unwrap();
        assert!(technical_columns(&skills, general).is_empty());
    }
}
