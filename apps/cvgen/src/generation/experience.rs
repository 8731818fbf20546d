use crate::generation::content_selector::{is_selected, select_entries, select_variant};
use crate::generation::markdown::{Block, MarkdownDoc};
use crate::models::{Achievement, AchievementKind, ExperienceEntry};
use crate::versions::VersionProfile;

pub const EXPERIENCE_TITLE: &str = "Work Experience";

/// An experience entry after selection, ready to render.
#[derive(Debug, Clone)]
pub struct SelectedExperience<'a> {
    pub entry: &'a ExperienceEntry,
    pub position: String,
    pub skills_tags: String,
    pub achievements: Vec<&'a str>,
}

fn achievement_visible(achievement: &Achievement, profile: &VersionProfile) -> bool {
    is_selected(achievement, profile)
        && (achievement.kind != AchievementKind::BusinessImpact || profile.show_business_impact)
}

/// Entries surviving selection, in source order. Entries left with no
/// achievements are dropped.
pub fn select_experience<'a>(
    entries: &'a [ExperienceEntry],
    profile: &VersionProfile,
) -> Vec<SelectedExperience<'a>> {
    select_entries(entries, profile)
        .into_iter()
        .filter_map(|entry| {
            let achievements: Vec<&str> = entry
                .achievements
                .iter()
                .filter(|a| achievement_visible(a, profile))
                .map(|a| a.text.as_str())
                .collect();
            if achievements.is_empty() {
                return None;
            }

            let position = select_variant(&entry.position_variants, &profile.name);
            Some(SelectedExperience {
                entry,
                position: if position.trim().is_empty() {
                    entry.position_base.clone()
                } else {
                    position
                },
                skills_tags: select_variant(&entry.skills_tags, &profile.name),
                achievements,
            })
        })
        .collect()
}

pub fn generate_experience(entries: &[ExperienceEntry], profile: &VersionProfile) -> String {
    let mut doc = MarkdownDoc::new();
    doc.paragraph(Block::Section(EXPERIENCE_TITLE.to_string()));

    for selected in select_experience(entries, profile) {
        let entry = selected.entry;
        doc.push(Block::Title(entry.company.clone()));
        if !entry.location.trim().is_empty() {
            doc.push(Block::ItalicBreak(entry.location.clone()));
        }
        if !entry.period.trim().is_empty() {
            doc.push(Block::Italic(entry.period.clone()));
        }
        doc.blank();

        let reference = entry
            .reference
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());
        if !selected.position.trim().is_empty() {
            doc.paragraph(Block::Bold {
                text: selected.position.clone(),
                suffix: reference.map(|r| format!(" · _{r}_")).unwrap_or_default(),
            });
        } else if let Some(r) = reference {
            // no position to hang it on
            doc.paragraph(Block::Text(format!("· _{r}_")));
        }

        for text in &selected.achievements {
            doc.push(Block::Bullet(text.to_string()));
        }
        doc.blank();

        if !selected.skills_tags.trim().is_empty() {
            doc.paragraph(Block::Italic(selected.skills_tags.clone()));
        }
    }

    doc.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::versions::VersionRegistry;
    use serde_json::json;

    fn entries(value: serde_json::Value) -> Vec<ExperienceEntry> {
        serde_json::from_value(value).unwrap()
    }

    fn scenario() -> Vec<ExperienceEntry> {
        entries(json!([{
            "company": "Acme",
            "location": "Lausanne, CH",
            "period": "2019 - 2023",
            "versions": ["firmware", "ai"],
            "position_base": "Engineer",
            "achievements": [
                {"text": "A", "versions": ["firmware"], "priority": 1},
                {"text": "B", "versions": ["all"], "priority": 2}
            ]
        }]))
    }

    #[test]
    fn test_achievements_filtered_per_version() {
        let registry = VersionRegistry::default();
        let data = scenario();

        let firmware = select_experience(&data, registry.get("firmware").unwrap());
        assert_eq!(firmware.len(), 1);
        assert_eq!(firmware[0].achievements, vec!["A", "B"]);

        let ai = select_experience(&data, registry.get("ai").unwrap());
        assert_eq!(ai[0].achievements, vec!["B"]);
    }

    #[test]
    fn test_entry_without_surviving_achievements_is_dropped() {
        let registry = VersionRegistry::default();
        let exec = registry.get("executive").unwrap();
        // open membership so only priority can exclude
        let mut open = scenario();
        open[0].versions.clear();
        open[0].achievements[0].versions = vec!["all".to_string()];
        open[0].achievements[0].priority = Some(2);

        let md = generate_experience(&open, exec);
        assert_eq!(md, "## Work Experience");
        assert!(!md.contains("Acme"));
    }

    #[test]
    fn test_rendered_shape() {
        let registry = VersionRegistry::default();
        let data = entries(json!([{
            "company": "Acme",
            "location": "Lausanne, CH",
            "period": "2019 - 2023",
            "reference": "Reference available",
            "position_base": "Engineer",
            "position_variants": {"firmware": "Firmware Lead"},
            "skills_tags": {"firmware,ai": "C, RTOS"},
            "achievements": [{"text": "Shipped **3** products"}]
        }]));
        let md = generate_experience(&data, registry.get("firmware").unwrap());
        assert_eq!(
            md,
            "## Work Experience\n\n### Acme\n_Lausanne, CH_<br>\n_2019 - 2023_\n\n**Firmware Lead** · _Reference available_\n\n* Shipped **3** products\n\n_C, RTOS_"
        );

        let general = generate_experience(&data, registry.get("general").unwrap());
        assert!(general.contains("**Engineer** · _Reference available_"));
        assert!(!general.contains("_C, RTOS_"));
    }

    #[test]
    fn test_reference_kept_without_position() {
        let registry = VersionRegistry::default();
        let data = entries(json!([{
            "company": "Acme",
            "reference": "Reference available",
            "achievements": [{"text": "Wrote drivers"}]
        }]));
        let md = generate_experience(&data, registry.get("firmware").unwrap());
        assert!(md.contains("\n· _Reference available_\n"), "{md}");
        assert!(!md.contains("**"));

        let html = crate::enrichment::enrich_markdown(&md);
        assert!(html.contains("Reference available"), "{html}");
    }

    #[test]
    fn test_business_impact_gated_by_flag() {
        let registry = VersionRegistry::default();
        let data = entries(json!([{
            "company": "Acme",
            "achievements": [
                {"text": "Grew revenue 20%", "type": "business_impact"},
                {"text": "Wrote drivers"}
            ]
        }]));
        let firmware = select_experience(&data, registry.get("firmware").unwrap());
        assert_eq!(firmware[0].achievements, vec!["Wrote drivers"]);
        let consulting = select_experience(&data, registry.get("consulting").unwrap());
        assert_eq!(consulting[0].achievements.len(), 2);
    }

    #[test]
    fn test_source_order_preserved() {
        let registry = VersionRegistry::default();
        let data = entries(json!([
            {"company": "Later", "priority": 2, "achievements": [{"text": "x"}]},
            {"company": "Earlier", "priority": 1, "achievements": [{"text": "y"}]}
        ]));
        let selected = select_experience(&data, registry.get("ai").unwrap());
        let companies: Vec<&str> = selected.iter().map(|s| s.entry.company.as_str()).collect();
        assert_eq!(companies, vec!["Later", "Earlier"]);
    }
}
