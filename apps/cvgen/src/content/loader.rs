//! Reads the content directory into one immutable `ContentBundle`.
//!
//! A missing file yields that domain's empty default with a warning. A file
//! that exists but does not parse is an error.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::models::{ContentBundle, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, SkillsInput};

pub const PERSONAL_FILE: &str = "personal.yaml";
pub const SKILLS_FILE: &str = "skills.yaml";
pub const EXPERIENCE_FILE: &str = "experience.yaml";
pub const PROJECTS_FILE: &str = "projects.yaml";
pub const EDUCATION_FILE: &str = "education.yaml";

// ────────────────────────────────────────────────────────────────────────────
// File shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PersonalFile {
    personal: PersonalInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExperienceFile {
    experiences: Vec<ExperienceEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProjectsFile {
    projects: Vec<ProjectEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EducationFile {
    education: Vec<EducationEntry>,
}

// ────────────────────────────────────────────────────────────────────────────
// Loader
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ContentLoader {
    dir: PathBuf,
}

impl ContentLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load(&self) -> Result<ContentBundle, AppError> {
        if !self.dir.is_dir() {
            warn!(
                "Content directory {} does not exist; building from empty content",
                self.dir.display()
            );
        }

        let personal: PersonalFile = self.read_optional(PERSONAL_FILE)?;
        let skills: SkillsInput = self.read_optional(SKILLS_FILE)?;
        let experience: ExperienceFile = self.read_optional(EXPERIENCE_FILE)?;
        let projects: ProjectsFile = self.read_optional(PROJECTS_FILE)?;
        let education: EducationFile = self.read_optional(EDUCATION_FILE)?;

        let bundle = ContentBundle {
            personal: personal.personal,
            skills,
            experience: experience.experiences,
            projects: projects.projects,
            education: education.education,
        };
        info!(
            "Loaded content from {}: {} experiences, {} projects, {} education entries, skills {}",
            self.dir.display(),
            bundle.experience.len(),
            bundle.projects.len(),
            bundle.education.len(),
            bundle.skills.shape_name()
        );
        Ok(bundle)
    }

    fn read_optional<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T, AppError> {
        let path = self.dir.join(file);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("{} not found; using empty defaults", path.display());
                return Ok(T::default());
            }
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            warn!("{} is empty; using empty defaults", path.display());
            return Ok(T::default());
        }
        serde_yaml::from_str(&text).map_err(|e| {
            error!("Malformed content file {}: {e}", path.display());
            AppError::Yaml(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, file: &str, body: &str) {
        std::fs::write(dir.path().join(file), body).unwrap();
    }

    #[test]
    fn test_full_directory() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            PERSONAL_FILE,
            "personal:\n  name:\n    full: Ada Lovelace\n  taglines:\n    firmware: Engine Programmer\n",
        );
        write(
            &dir,
            SKILLS_FILE,
            "categories:\n  - name: Embedded\n    items:\n      firmware: [C, RTOS]\n",
        );
        write(
            &dir,
            EXPERIENCE_FILE,
            "experiences:\n  - company: Acme\n    achievements:\n      - text: Shipped it\n",
        );
        write(&dir, PROJECTS_FILE, "projects:\n  - name: Loom\n");
        write(&dir, EDUCATION_FILE, "education:\n  - institution: EPFL\n");

        let bundle = ContentLoader::new(dir.path()).load().unwrap();
        assert_eq!(bundle.personal.name.full, "Ada Lovelace");
        assert_eq!(bundle.skills.shape_name(), "v2");
        assert_eq!(bundle.experience[0].company, "Acme");
        assert_eq!(bundle.experience[0].achievements.len(), 1);
        assert_eq!(bundle.projects[0].name, "Loom");
        assert_eq!(bundle.education[0].institution, "EPFL");
    }

    #[test]
    fn test_missing_files_yield_defaults() {
        let dir = TempDir::new().unwrap();
        write(&dir, EXPERIENCE_FILE, "experiences:\n  - company: Acme\n");
        write(&dir, SKILLS_FILE, "");

        let bundle = ContentLoader::new(dir.path()).load().unwrap();
        assert_eq!(bundle.experience.len(), 1);
        assert!(bundle.projects.is_empty());
        assert!(bundle.education.is_empty());
        assert_eq!(bundle.skills.shape_name(), "v1");
        assert!(bundle.personal.name.full.is_empty());
    }

    #[test]
    fn test_missing_directory_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let bundle = ContentLoader::new(dir.path().join("nope")).load().unwrap();
        assert!(bundle.experience.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, PROJECTS_FILE, "projects: [unclosed\n");
        let err = ContentLoader::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, AppError::Yaml(_)), "got {err:?}");
    }
}
