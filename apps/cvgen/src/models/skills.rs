//! Skills input. Two source shapes exist; which one a file uses is decided once, at
//! deserialization, by the presence of a top-level `categories` key.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::generation::content_selector::ContentEntry;
use crate::models::{OrderedMap, VariantMap};

/// Discriminant key of the dynamic (V2) skills shape.
pub const CATEGORIES_KEY: &str = "categories";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutiveSkill {
    pub skill: String,
    #[serde(default)]
    pub metric: Option<String>,
}

/// Category name (e.g. `leadership_impact`) -> skills, in source order.
pub type ExecutiveSkills = OrderedMap<Vec<ExecutiveSkill>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainExpertise {
    pub title: Option<String>,
    pub skills: Vec<String>,
    pub secondary_skills: Vec<String>,
}

/// Legacy fixed technical buckets, each keyed by version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalSkills {
    pub programming_languages: VariantMap<Vec<String>>,
    pub core_technologies: VariantMap<Vec<String>>,
    pub domain_expertise: VariantMap<DomainExpertise>,
    pub tools_platforms: VariantMap<Vec<String>>,
    pub project_management: VariantMap<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsInputV1 {
    pub executive: ExecutiveSkills,
    pub technical: TechnicalSkills,
}

/// One column of the dynamic technical layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    #[serde(default)]
    pub items: VariantMap<Vec<String>>,
    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(default)]
    pub priority: Option<u32>,
}

impl ContentEntry for SkillCategory {
    fn versions(&self) -> &[String] {
        &self.versions
    }

    fn declared_priority(&self) -> Option<u32> {
        self.priority
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsInputV2 {
    pub executive: ExecutiveSkills,
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SkillsInput {
    V1(SkillsInputV1),
    V2(SkillsInputV2),
}

impl Default for SkillsInput {
    fn default() -> Self {
        SkillsInput::V1(SkillsInputV1::default())
    }
}

impl SkillsInput {
    pub fn executive(&self) -> &ExecutiveSkills {
        match self {
            SkillsInput::V1(v1) => &v1.executive,
            SkillsInput::V2(v2) => &v2.executive,
        }
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            SkillsInput::V1(_) => "v1",
            SkillsInput::V2(_) => "v2",
        }
    }
}

impl<'de> Deserialize<'de> for SkillsInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(SkillsInput::default());
        }

        if value.get(CATEGORIES_KEY).is_some() {
            serde_json::from_value(value)
                .map(SkillsInput::V2)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(SkillsInput::V1)
                .map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_shape_detected() {
        let yaml = r#"
executive:
  leadership_impact:
    - skill: Technical Team Leadership
      metric: 7+ Direct Reports
technical:
  programming_languages:
    firmware: ["C/C++", "Python"]
"#;
        let skills: SkillsInput = serde_yaml::from_str(yaml).unwrap();
        match skills {
            SkillsInput::V1(v1) => {
                assert_eq!(v1.executive.len(), 1);
                assert_eq!(
                    v1.technical.programming_languages.get("firmware").unwrap(),
                    &vec!["C/C++".to_string(), "Python".to_string()]
                );
            }
            SkillsInput::V2(_) => panic!("expected legacy shape"),
        }
    }

    #[test]
    fn test_dynamic_shape_detected_by_categories_key() {
        let yaml = r#"
categories:
  - name: Embedded
    items:
      firmware: [RTOS, STM32]
  - name: Data
    versions: [ai]
    priority: 2
    items:
      "ai,consulting": [Pandas]
"#;
        let skills: SkillsInput = serde_yaml::from_str(yaml).unwrap();
        match skills {
            SkillsInput::V2(v2) => {
                assert_eq!(v2.categories.len(), 2);
                assert_eq!(v2.categories[1].priority(), 2);
                assert!(v2.executive.is_empty());
            }
            SkillsInput::V1(_) => panic!("expected dynamic shape"),
        }
    }

    #[test]
    fn test_executive_category_order_survives_discriminant_pass() {
        let yaml = r#"
executive:
  zz_last_alphabetically: []
  aa_first_alphabetically: []
"#;
        let skills: SkillsInput = serde_yaml::from_str(yaml).unwrap();
        let keys: Vec<&str> = skills.executive().keys().collect();
        assert_eq!(keys, vec!["zz_last_alphabetically", "aa_first_alphabetically"]);
    }

    #[test]
    fn test_null_document_is_empty_legacy() {
        let skills: SkillsInput = serde_yaml::from_str("~").unwrap();
        assert_eq!(skills.shape_name(), "v1");
    }
}
