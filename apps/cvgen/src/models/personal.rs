use serde::{Deserialize, Serialize};

use crate::generation::content_selector::ContentEntry;
use crate::models::VariantMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonName {
    pub full: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Postal address as printed under the tagline.
    #[serde(alias = "formatted")]
    pub address: Option<String>,
    /// Code-host handle, rendered as `https://github.com/<handle>`.
    pub github: Option<String>,
    /// Network-profile handle, rendered as `https://linkedin.com/in/<handle>`.
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageSkill {
    pub language: String,
    pub proficiency: String,
}

/// A training or certification record, listed in the personal data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(default)]
    pub priority: Option<u32>,
}

impl ContentEntry for Certification {
    fn versions(&self) -> &[String] {
        &self.versions
    }

    fn declared_priority(&self) -> Option<u32> {
        self.priority
    }
}

/// Everything under the `personal:` key of the personal data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: PersonName,
    pub contact: Contact,
    pub languages: Vec<LanguageSkill>,
    pub taglines: VariantMap<String>,
    pub executive_summary: VariantMap<String>,
    pub profile_photo: Option<String>,
    pub certifications: Vec<Certification>,
}
