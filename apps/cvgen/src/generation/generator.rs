//! Runs the section generators for one version and joins
//! their output in the fixed section order.
//!
//! Order: header, executive summary, skills, experience, projects, education,
//! certifications. Downstream styling depends on this sequence.

use std::sync::{Arc, OnceLock};

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::certifications::{generate_certifications, select_certifications};
use crate::generation::content_selector::select_entries;
use crate::generation::education::generate_education;
use crate::generation::experience::{generate_experience, select_experience};
use crate::generation::header::{
    generate_executive_summary, generate_header, resolve_tagline, PersonalHeader,
};
use crate::generation::projects::{generate_projects, select_projects};
use crate::generation::skills::{column_count, generate_skills};
use crate::models::ContentBundle;
use crate::versions::{VersionProfile, VersionRegistry};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Markdown for one version. Derived on demand, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDocument {
    pub version: String,
    pub markdown: String,
}

/// What a version would contain, without rendering it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectionSummary {
    pub version: String,
    pub layout: String,
    pub tagline: String,
    pub skills_shape: String,
    pub skills_columns: usize,
    pub experiences: usize,
    pub projects: usize,
    pub education: usize,
    pub certifications: usize,
}

/// Lazily computed, read-only after first use. Holds only version-independent
/// header fields; taglines and summaries are resolved per call.
#[derive(Debug, Default)]
pub struct PersonalInfoCache {
    header: OnceLock<PersonalHeader>,
}

impl PersonalInfoCache {
    pub fn get_or_init(&self, content: &ContentBundle) -> &PersonalHeader {
        self.header.get_or_init(|| {
            debug!("Computing personal header for {}", content.personal.name.full);
            PersonalHeader::from_personal(&content.personal)
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

/// Joins the section outputs in order, skipping empty optional sections.
pub fn assemble_document(
    content: &ContentBundle,
    header: &PersonalHeader,
    profile: &VersionProfile,
) -> String {
    let sections = [
        ("header", generate_header(header, &content.personal, profile)),
        (
            "executive_summary",
            generate_executive_summary(&content.personal, profile),
        ),
        ("skills", generate_skills(&content.skills, profile)),
        ("experience", generate_experience(&content.experience, profile)),
        ("projects", generate_projects(&content.projects, profile)),
        ("education", generate_education(&content.education, profile)),
        (
            "certifications",
            generate_certifications(&content.personal.certifications, profile),
        ),
    ];

    let mut parts = Vec::with_capacity(sections.len());
    for (name, markdown) in sections {
        debug!("{} [{}]: {} bytes", profile.name, name, markdown.len());
        if !markdown.is_empty() {
            parts.push(markdown);
        }
    }

    let mut document = parts.join("\n\n");
    document.push('\n');
    document
}

/// Names of every entity the version renders under an entity heading:
/// companies, projects, institutions, certifications.
pub fn selected_entity_names(content: &ContentBundle, profile: &VersionProfile) -> Vec<String> {
    let mut names: Vec<String> = select_experience(&content.experience, profile)
        .iter()
        .map(|e| e.entry.company.clone())
        .collect();
    names.extend(
        select_projects(&content.projects, profile)
            .iter()
            .map(|p| p.entry.name.clone()),
    );
    names.extend(select_entries(&content.education, profile).iter().map(|e| {
        e.institution_full
            .clone()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| e.institution.clone())
    }));
    names.extend(
        select_certifications(&content.personal.certifications, profile)
            .iter()
            .map(|c| c.name.clone()),
    );
    names
}

/// Owns one content snapshot and the registry; builds documents per version.
#[derive(Debug)]
pub struct DocumentAssembler {
    content: Arc<ContentBundle>,
    registry: Arc<VersionRegistry>,
    personal_cache: PersonalInfoCache,
}

impl DocumentAssembler {
    pub fn new(content: Arc<ContentBundle>, registry: Arc<VersionRegistry>) -> Self {
        Self {
            content,
            registry,
            personal_cache: PersonalInfoCache::default(),
        }
    }

    pub fn registry(&self) -> &VersionRegistry {
        &self.registry
    }

    pub fn content(&self) -> &ContentBundle {
        &self.content
    }

    /// Builds one version. Unknown versions are an error; everything else
    /// degrades to defaults.
    pub fn build(&self, version: &str) -> Result<GeneratedDocument, AppError> {
        let profile = self.registry.get(version)?;
        let header = self.personal_cache.get_or_init(&self.content);
        let markdown = assemble_document(&self.content, header, profile);
        info!(
            "Built {} version ({} layout, {} bytes)",
            profile.name,
            profile.layout.as_str(),
            markdown.len()
        );
        Ok(GeneratedDocument {
            version: profile.name.clone(),
            markdown,
        })
    }

    /// Builds a single version or, for `all`, every version in registry order.
    pub fn build_all(&self, selector: &str) -> Result<Vec<GeneratedDocument>, AppError> {
        self.registry
            .resolve_targets(selector)?
            .iter()
            .map(|profile| self.build(&profile.name))
            .collect()
    }

    pub fn check(&self, version: &str) -> Result<SelectionSummary, AppError> {
        let profile = self.registry.get(version)?;
        let content = &self.content;
        Ok(SelectionSummary {
            version: profile.name.clone(),
            layout: profile.layout.as_str().to_string(),
            tagline: resolve_tagline(&content.personal, profile),
            skills_shape: content.skills.shape_name().to_string(),
            skills_columns: column_count(&content.skills, profile),
            experiences: select_experience(&content.experience, profile).len(),
            projects: select_projects(&content.projects, profile).len(),
            education: select_entries(&content.education, profile).len(),
            certifications: select_certifications(&content.personal.certifications, profile)
                .len(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn sample_content() -> ContentBundle {
        serde_json::from_value(json!({
            "personal": {
                "name": {"full": "Ada Lovelace"},
                "contact": {"phone": "+44 20 0000", "email": "ada@example.org", "github": "ada"},
                "languages": [{"language": "English", "proficiency": "Native"}],
                "taglines": {"firmware": "Engine Programmer"},
                "executive_summary": {"executive": "Two decades of leading engineering organisations across embedded and AI."},
                "certifications": [
                    {"name": "Certified ScrumMaster", "organization": "Scrum Alliance", "year": 2020},
                    {"name": "Safety Case Training", "priority": 2, "year": 2018}
                ]
            },
            "skills": {
                "executive": {"leadership_impact": [{"skill": "Team Leadership", "metric": "7 reports"}]},
                "technical": {
                    "programming_languages": {"firmware": ["C"], "ai": ["Python"]},
                    "tools_platforms": {"firmware,ai": ["Git"]}
                }
            },
            "experience": [
                {
                    "company": "Acme Robotics",
                    "location": "Lausanne",
                    "period": "2019 - 2023",
                    "position_base": "Engineer",
                    "achievements": [
                        {"text": "Led a team of 7", "priority": 1},
                        {"text": "Wrote DMA drivers", "versions": ["firmware"], "priority": 2}
                    ]
                },
                {
                    "company": "Babbage & Co",
                    "versions": ["ai"],
                    "achievements": [{"text": "Trained models"}]
                }
            ],
            "projects": [
                {"name": "Loom", "period": "2022", "descriptions": {"firmware,ai": ["Pattern engine"]}}
            ],
            "education": [
                {"institution": "EPFL", "degree": "MSc", "start_date": "2014", "end_date": "2016"}
            ]
        }))
        .unwrap()
    }

    fn assembler() -> DocumentAssembler {
        DocumentAssembler::new(
            Arc::new(sample_content()),
            Arc::new(VersionRegistry::default()),
        )
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("missing {needle:?} in:\n{haystack}"))
    }

    #[test]
    fn test_section_order_is_fixed() {
        let doc = assembler().build("firmware").unwrap();
        let md = &doc.markdown;
        let order = [
            position(md, "# **Ada Lovelace**"),
            position(md, "## Skills"),
            position(md, "## Work Experience"),
            position(md, "## Projects"),
            position(md, "## Education"),
            position(md, "## Training & Certifications"),
        ];
        assert!(order.windows(2).all(|w| w[0] < w[1]), "sections out of order:\n{md}");
        assert!(md.ends_with('\n'));
    }

    #[test]
    fn test_executive_summary_sits_between_header_and_skills() {
        let md = assembler().build("executive").unwrap().markdown;
        let summary = position(&md, "> Two decades");
        assert!(position(&md, "# **Ada Lovelace**") < summary);
        assert!(summary < position(&md, "## Skills"));
        assert!(!md.contains("## Projects"));
        assert!(!md.contains("## Training & Certifications"));
    }

    #[test]
    fn test_unknown_version_propagates() {
        let err = assembler().build("astronaut").unwrap_err();
        assert!(matches!(err, AppError::UnknownVersion(v) if v == "astronaut"));
    }

    #[test]
    fn test_build_all_in_registry_order() {
        let docs = assembler().build_all("all").unwrap();
        let versions: Vec<&str> = docs.iter().map(|d| d.version.as_str()).collect();
        assert_eq!(
            versions,
            vec!["firmware", "ai", "consulting", "executive", "general"]
        );
    }

    #[test]
    fn test_personal_cache_is_reused_across_versions() {
        let assembler = assembler();
        let first = assembler.personal_cache.get_or_init(&assembler.content) as *const _;
        assembler.build("ai").unwrap();
        assembler.build("firmware").unwrap();
        let again = assembler.personal_cache.get_or_init(&assembler.content) as *const _;
        assert_eq!(first, again);

        // per-version fields are not cached
        let fw = assembler.build("firmware").unwrap().markdown;
        let ai = assembler.build("ai").unwrap().markdown;
        assert!(fw.contains("### Engine Programmer"));
        assert!(!ai.contains("### Engine Programmer"));
    }

    #[test]
    fn test_check_summary_counts() {
        let summary = assembler().check("ai").unwrap();
        assert_eq!(summary.layout, "technical");
        assert_eq!(summary.skills_shape, "v1");
        assert_eq!(summary.skills_columns, 3);
        assert_eq!(summary.experiences, 2);
        assert_eq!(summary.projects, 1);
        assert_eq!(summary.education, 1);
        assert_eq!(summary.certifications, 2);

        let exec = assembler().check("executive").unwrap();
        assert_eq!(exec.projects, 0);
        assert_eq!(exec.certifications, 0);
        assert_eq!(exec.experiences, 1, "only the priority-1 achievement survives");
        assert_eq!(exec.skills_columns, 1);
    }

    #[test]
    fn test_selected_entity_names() {
        let registry = VersionRegistry::default();
        let names = selected_entity_names(&sample_content(), registry.get("firmware").unwrap());
        assert_eq!(
            names,
            vec!["Acme Robotics", "Loom", "EPFL", "Certified ScrumMaster", "Safety Case Training"]
        );
    }
}
