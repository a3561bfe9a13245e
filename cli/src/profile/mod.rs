//! # Folio Profile Facts
//!
//! File: cli/src/profile/mod.rs
//!
//! ## Overview
//!
//! The static, read-only record of biographical and project data that the
//! response templates draw from. A profile is loaded once at startup (from a
//! TOML file or the bundled sample) and handed to the matcher by value; nothing
//! mutates it afterwards.
//!
//! ## Examples
//!
//! ```rust
//! use folio::profile::ProfileFacts;
//!
//! let profile = ProfileFacts::sample().expect("bundled sample parses");
//! profile.validate().expect("bundled sample is valid");
//! assert!(!profile.projects.is_empty());
//! ```
//!
use crate::core::error::{FolioError, Result};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// The profile shipped with the binary, used when no profile path is configured.
const SAMPLE_PROFILE: &str = include_str!("../../profiles/sample.toml");

/// Biographical facts substituted into response templates.
///
/// Field order matters for `toml` serialization: plain values first, then tables.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileFacts {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub education: Education,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub technologies: Vec<TechGroup>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub interests: Vec<Interest>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Education {
    pub university: String,
    #[serde(default)]
    pub high_school: String,
    pub status: String,
    #[serde(default)]
    pub focus: String,
}

/// A spoken language and proficiency level ("Native", "Professional", ...).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Language {
    pub name: String,
    pub level: String,
}

/// A named group of technologies, e.g. "Backend" → Node.js, Python.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TechGroup {
    pub area: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub tech: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Interest {
    pub area: String,
    #[serde(default)]
    pub details: String,
}

impl ProfileFacts {
    /// Parses a profile from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse profile TOML")
    }

    /// Loads a profile from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading profile from: {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid profile file: {}", path.display()))
    }

    /// The bundled sample profile.
    pub fn sample() -> Result<Self> {
        debug!("Using bundled sample profile");
        Self::from_toml(SAMPLE_PROFILE)
    }

    /// Loads `path` when given, otherwise the bundled sample, and validates the result.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let profile = match path {
            Some(p) => Self::load(p)?,
            None => Self::sample()?,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Checks the fields every template relies on. Empty optional sections only warn.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(anyhow!(FolioError::Profile(
                "'name' must not be empty.".to_string()
            )));
        }
        if !self.email.contains('@') {
            return Err(anyhow!(FolioError::Profile(format!(
                "'email' does not look like an address: '{}'",
                self.email
            ))));
        }
        if self.education.university.trim().is_empty() {
            return Err(anyhow!(FolioError::Profile(
                "'education.university' must not be empty.".to_string()
            )));
        }

        let sections = [
            ("languages", self.languages.is_empty()),
            ("technologies", self.technologies.is_empty()),
            ("projects", self.projects.is_empty()),
            ("interests", self.interests.is_empty()),
        ];
        for (section, empty) in sections {
            if empty {
                warn!("Profile section '{}' is empty; its answers will be sparse.", section);
            }
        }
        Ok(())
    }

    /// Comma-separated project names, used by the identity answer.
    pub fn project_names(&self) -> String {
        self.projects
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
