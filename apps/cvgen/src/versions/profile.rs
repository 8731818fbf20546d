use serde::{Deserialize, Serialize};

/// Overall document shape for a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Multi-column skills table, every section rendered.
    Technical,
    /// Condensed: flat skill categories, no projects section.
    Executive,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Technical => "technical",
            Layout::Executive => "executive",
        }
    }
}

/// Selection policy for one named output variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionProfile {
    /// Filled from the registry key when loaded from a file.
    #[serde(default)]
    pub name: String,
    /// Legacy coarse-inclusion vocabulary. Subordinate to `versions`/`priority`.
    #[serde(default)]
    pub toggles: Vec<String>,
    /// Used only when the personal data has no tagline variant for this version.
    #[serde(default)]
    pub tagline: String,
    /// Entries with a priority above this ceiling are excluded.
    pub max_priority: u32,
    pub layout: Layout,
    #[serde(default)]
    pub show_metrics: bool,
    #[serde(default)]
    pub show_business_impact: bool,
    #[serde(default, alias = "executive_summary")]
    pub show_executive_summary: bool,
    #[serde(default = "default_true")]
    pub show_certifications: bool,
}

fn default_true() -> bool {
    true
}

impl VersionProfile {
    pub fn is_executive(&self) -> bool {
        self.layout == Layout::Executive
    }

    pub fn has_toggle(&self, toggle: &str) -> bool {
        self.toggles.iter().any(|t| t == toggle)
    }
}
