//! The static (or file-configured) set of version profiles.
//!
//! Lookups of an unknown version are a configuration error and propagate to the
//! caller of the pipeline; nothing downstream can run without a ceiling and layout.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::errors::AppError;
use crate::models::OrderedMap;
use crate::versions::profile::{Layout, VersionProfile};

/// Selector accepted by `resolve_targets` meaning every registered version.
pub const ALL_VERSIONS: &str = "all";

/// Ordered collection of version profiles. Registry order is the build order.
#[derive(Debug, Clone)]
pub struct VersionRegistry {
    profiles: Vec<VersionProfile>,
}

impl VersionRegistry {
    /// Builds a registry, rejecting duplicate names and zero priority ceilings.
    pub fn from_profiles(profiles: Vec<VersionProfile>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for profile in &profiles {
            if profile.name.trim().is_empty() {
                return Err(AppError::Validation(
                    "Version profile name cannot be empty".to_string(),
                ));
            }
            if profile.name == ALL_VERSIONS {
                return Err(AppError::Validation(format!(
                    "'{ALL_VERSIONS}' is reserved and cannot name a version"
                )));
            }
            if !seen.insert(profile.name.as_str()) {
                return Err(AppError::Validation(format!(
                    "Duplicate version profile '{}'",
                    profile.name
                )));
            }
            if profile.max_priority == 0 {
                return Err(AppError::Validation(format!(
                    "Version '{}' has max_priority 0; the ceiling must be at least 1",
                    profile.name
                )));
            }
        }
        Ok(Self { profiles })
    }

    /// Parses a YAML mapping of version name -> profile fields.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AppError> {
        let raw: OrderedMap<VersionProfile> = serde_yaml::from_str(yaml)?;
        let profiles = raw
            .iter()
            .map(|(name, profile)| VersionProfile {
                name: name.to_string(),
                ..profile.clone()
            })
            .collect();
        Self::from_profiles(profiles)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, AppError> {
        let yaml = std::fs::read_to_string(path)?;
        let registry = Self::from_yaml_str(&yaml)?;
        info!(
            "Loaded {} version profiles from {}",
            registry.profiles.len(),
            path.display()
        );
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Result<&VersionProfile, AppError> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| AppError::UnknownVersion(name.to_string()))
    }

    pub fn profiles(&self) -> &[VersionProfile] {
        &self.profiles
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    /// Resolves `all` to every profile in registry order, anything else to one profile.
    pub fn resolve_targets(&self, selector: &str) -> Result<Vec<&VersionProfile>, AppError> {
        if selector == ALL_VERSIONS {
            Ok(self.profiles.iter().collect())
        } else {
            Ok(vec![self.get(selector)?])
        }
    }
}

impl Default for VersionRegistry {
    /// The five built-in profiles: firmware, ai, consulting, executive, general.
    fn default() -> Self {
        let profile = |name: &str,
                       toggles: &[&str],
                       tagline: &str,
                       max_priority: u32,
                       layout: Layout,
                       flags: (bool, bool, bool, bool)| VersionProfile {
            name: name.to_string(),
            toggles: toggles.iter().map(|t| t.to_string()).collect(),
            tagline: tagline.to_string(),
            max_priority,
            layout,
            show_metrics: flags.0,
            show_business_impact: flags.1,
            show_executive_summary: flags.2,
            show_certifications: flags.3,
        };

        Self {
            profiles: vec![
                profile(
                    "firmware",
                    &["firmware", "technical", "detailed"],
                    "Senior Firmware Engineer | Software Architect | Technical Project Lead",
                    3,
                    Layout::Technical,
                    (true, false, false, true),
                ),
                profile(
                    "ai",
                    &["ai", "technical", "detailed"],
                    "Embedded Systems Engineer | Applied AI/ML Practitioner | Technical Lead",
                    3,
                    Layout::Technical,
                    (true, false, false, true),
                ),
                profile(
                    "consulting",
                    &["consulting", "ai", "businessfocus", "quantified"],
                    "Senior Embedded Systems Engineer | Applied AI/ML Practitioner | Technical Project Lead",
                    3,
                    Layout::Technical,
                    (true, true, false, true),
                ),
                profile(
                    "executive",
                    &["executive", "quantified", "onepage"],
                    "Senior Technical Leader | Cross-functional Engineering Manager",
                    1,
                    Layout::Executive,
                    (true, true, true, false),
                ),
                profile(
                    "general",
                    &["firmware", "ai", "general"],
                    "Embedded Systems Engineer | Applied AI/ML Practitioner | Technical Project Lead",
                    2,
                    Layout::Technical,
                    (false, false, false, true),
                ),
            ],
        }
    }
}
