use crate::generation::content_selector::{includes, select_entries, select_variant};
use crate::generation::markdown::{join_inline, Block, MarkdownDoc};
use crate::models::EducationEntry;
use crate::versions::VersionProfile;

pub const EDUCATION_TITLE: &str = "Education";

const COURSEWORK_LABEL: &str = "Key Coursework:";

/// Notable achievements and practical experience merged, each filtered by version.
pub fn education_bullets<'a>(entry: &'a EducationEntry, version: &str) -> Vec<&'a str> {
    let notable = entry
        .notable_achievements
        .iter()
        .filter(|a| includes(&a.versions, version))
        .map(|a| a.achievement.as_str());
    let practical = entry
        .practical_experience
        .iter()
        .filter(|p| includes(&p.versions, version))
        .map(|p| p.description.as_str());
    notable.chain(practical).collect()
}

fn display_institution(entry: &EducationEntry) -> &str {
    entry
        .institution_full
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(&entry.institution)
}

fn date_range(entry: &EducationEntry) -> String {
    match (entry.start_date.trim(), entry.end_date.trim()) {
        ("", "") => String::new(),
        (start, "") => start.to_string(),
        ("", end) => end.to_string(),
        (start, end) => format!("{start} - {end}"),
    }
}

fn degree_suffix(entry: &EducationEntry) -> String {
    let major = entry.major.as_deref().map(str::trim).filter(|m| !m.is_empty());
    let field = entry
        .field_of_study
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty());
    match (major, field) {
        (Some(major), _) => format!(", Major in {major}"),
        (None, Some(field)) => format!(", {field}"),
        (None, None) => String::new(),
    }
}

pub fn generate_education(entries: &[EducationEntry], profile: &VersionProfile) -> String {
    let selected = select_entries(entries, profile);
    if selected.is_empty() {
        return String::new();
    }

    let version = profile.name.as_str();
    let mut doc = MarkdownDoc::new();
    doc.paragraph(Block::Section(EDUCATION_TITLE.to_string()));

    for entry in selected {
        doc.push(Block::Title(display_institution(entry).to_string()));
        if !entry.location.trim().is_empty() {
            doc.push(Block::ItalicBreak(entry.location.clone()));
        }
        let dates = date_range(entry);
        if !dates.is_empty() {
            doc.push(Block::Italic(dates));
        }
        doc.blank();

        if !entry.degree.trim().is_empty() {
            doc.paragraph(Block::Bold {
                text: entry.degree.clone(),
                suffix: degree_suffix(entry),
            });
        }

        let highlight = select_variant(&entry.technical_highlights, version);
        if !highlight.trim().is_empty() {
            doc.paragraph(Block::Emphasis(highlight));
        }

        let coursework = select_variant(&entry.relevant_coursework, version);
        if !coursework.is_empty() {
            doc.paragraph(Block::Bold {
                text: COURSEWORK_LABEL.to_string(),
                suffix: format!(" {}", join_inline(&coursework)),
            });
        }

        let bullets = education_bullets(entry, version);
        for bullet in &bullets {
            doc.push(Block::Bullet(bullet.to_string()));
        }
        if !bullets.is_empty() {
            doc.blank();
        }
    }

    doc.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::versions::VersionRegistry;
    use serde_json::json;

    fn education() -> Vec<EducationEntry> {
        serde_json::from_value(json!([{
            "institution": "EPFL",
            "institution_full": "Swiss Federal Institute of Technology (EPFL)",
            "degree": "Master of Science",
            "major": "Robotics",
            "start_date": "2014",
            "end_date": "2016",
            "location": "Lausanne, Switzerland",
            "technical_highlights": {"ai": "Thesis on reinforcement learning"},
            "relevant_coursework": {"ai,consulting": ["Machine Learning", "Computer Vision"]},
            "notable_achievements": [
                {"achievement": "Graduated with honours", "versions": ["all"]},
                {"achievement": "Teaching assistant", "versions": ["firmware"]}
            ],
            "practical_experience": [
                {"description": "Built a quadruped controller", "versions": ["ai"]}
            ]
        }]))
        .unwrap()
    }

    #[test]
    fn test_education_full_shape() {
        let registry = VersionRegistry::default();
        let md = generate_education(&education(), registry.get("ai").unwrap());
        assert_eq!(
            md,
            "## Education\n\n\
             ### Swiss Federal Institute of Technology (EPFL)\n\
             _Lausanne, Switzerland_<br>\n\
             _2014 - 2016_\n\n\
             **Master of Science**, Major in Robotics\n\n\
             *Thesis on reinforcement learning*\n\n\
             **Key Coursework:** Machine Learning • Computer Vision\n\n\
             * Graduated with honours\n\
             * Built a quadruped controller"
        );
    }

    #[test]
    fn test_bullets_merged_and_filtered_independently() {
        let entries = education();
        assert_eq!(
            education_bullets(&entries[0], "firmware"),
            vec!["Graduated with honours", "Teaching assistant"]
        );
        assert_eq!(
            education_bullets(&entries[0], "general"),
            vec!["Graduated with honours"]
        );
    }

    #[test]
    fn test_short_name_used_without_full_name() {
        let registry = VersionRegistry::default();
        let mut entries = education();
        entries[0].institution_full = None;
        let md = generate_education(&entries, registry.get("general").unwrap());
        assert!(md.contains("### EPFL\n"));
        assert!(!md.contains("Key Coursework"));
    }

    #[test]
    fn test_no_entries_is_empty_string() {
        let registry = VersionRegistry::default();
        assert_eq!(generate_education(&[], registry.get("ai").unwrap()), "");
    }
}
