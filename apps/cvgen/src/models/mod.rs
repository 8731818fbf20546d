pub mod ordered_map;
pub mod personal;
pub mod resume;
pub mod skills;

use serde::{Deserialize, Serialize};

pub use ordered_map::OrderedMap;
pub use personal::{Certification, Contact, LanguageSkill, PersonName, PersonalInfo};
pub use resume::{
    Achievement, AchievementKind, EducationEntry, ExperienceEntry, NotableAchievement,
    PracticalExperience, ProjectEntry, ProjectLinks,
};
pub use skills::{
    DomainExpertise, ExecutiveSkill, ExecutiveSkills, SkillCategory, SkillsInput, SkillsInputV1,
    SkillsInputV2, TechnicalSkills,
};

/// Version tag(s) -> version-specific value. Keys may join several tags with `,`.
pub type VariantMap<T> = OrderedMap<T>;

/// One immutable snapshot of all source content for a build invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentBundle {
    pub personal: PersonalInfo,
    pub skills: SkillsInput,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub education: Vec<EducationEntry>,
}
