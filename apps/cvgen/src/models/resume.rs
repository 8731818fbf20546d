use serde::{Deserialize, Serialize};

use crate::generation::content_selector::ContentEntry;
use crate::models::VariantMap;

/// Implements `ContentEntry` for a struct with `versions` and `priority` fields.
macro_rules! content_entry {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ContentEntry for $ty {
                fn versions(&self) -> &[String] {
                    &self.versions
                }

                fn declared_priority(&self) -> Option<u32> {
                    self.priority
                }
            }
        )+
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    #[default]
    Base,
    Metric,
    /// Shown only by versions with `show_business_impact`.
    BusinessImpact,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub text: String,
    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default, rename = "type")]
    pub kind: AchievementKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default)]
    pub position_base: String,
    #[serde(default)]
    pub position_variants: VariantMap<String>,
    #[serde(default)]
    pub skills_tags: VariantMap<String>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

/// Recognised project link types. Anything else in the source is dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLinks {
    pub github: Option<String>,
    pub demo: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub links: ProjectLinks,
    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default)]
    pub descriptions: VariantMap<Vec<String>>,
    #[serde(default)]
    pub skills_tags: VariantMap<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotableAchievement {
    pub achievement: String,
    #[serde(default)]
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticalExperience {
    pub description: String,
    #[serde(default)]
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub institution: String,
    pub institution_full: Option<String>,
    pub degree: String,
    pub major: Option<String>,
    pub field_of_study: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub versions: Vec<String>,
    pub priority: Option<u32>,
    #[serde(alias = "focus_areas")]
    pub technical_highlights: VariantMap<String>,
    pub relevant_coursework: VariantMap<Vec<String>>,
    pub notable_achievements: Vec<NotableAchievement>,
    pub practical_experience: Vec<PracticalExperience>,
}

content_entry!(Achievement, ExperienceEntry, ProjectEntry, EducationEntry);
