//! # Folio Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements the configuration system for Folio, handling loading,
//! merging, validation, and access to configuration data. It supports a multi-level
//! configuration approach that combines defaults, user settings, project-specific
//! overrides and an explicit `--config` file.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Explicit file passed with `--config` (or `FOLIO_CONFIG`)
//! 2. Project-specific `.folio.toml` in current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! Each file is read as a `ConfigLayer` whose fields are all optional, so a
//! higher-precedence file can set a value back to its default. Paths in a file
//! are expanded (`~` to home directory) and relative paths are anchored at the
//! directory holding that file. Keyword lists are normalized to lowercase
//! before validation.
//!
//! ## Examples
//!
//! ```toml
//! [chat]
//! thinking_delay_ms = 250
//!
//! [matcher]
//! min_input_len = 2
//! [matcher.extra_keywords]
//! skills = ["rust", "tokio"]
//!
//! [profile]
//! path = "~/portfolio/profile.toml"
//! ```
//!
//! The configuration is loaded once per command execution and passed
//! to the modules that need it.
//!
use crate::core::error::{FolioError, Result};
use crate::matcher::Topic;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Settings for the interactive chat session (`folio chat`).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Simulated "thinking" delay before each assistant reply, in milliseconds.
    #[serde(default = "default_thinking_delay_ms")]
    pub thinking_delay_ms: u64,
    /// Label printed in front of assistant turns.
    #[serde(default = "default_assistant_label")]
    pub assistant_label: String,
    /// Label printed in front of user turns.
    #[serde(default = "default_user_label")]
    pub user_label: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: default_thinking_delay_ms(),
            assistant_label: default_assistant_label(),
            user_label: default_user_label(),
        }
    }
}

/// Settings for the response matcher.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MatcherConfig {
    /// Inputs shorter than this (in characters, after trimming) get the clarification prompt.
    #[serde(default = "default_min_input_len")]
    pub min_input_len: usize,
    /// Additional keywords per topic group, appended after the built-in ones.
    #[serde(default)]
    pub extra_keywords: BTreeMap<String, Vec<String>>,
    /// Directory holding `<topic>.tera` files that replace built-in templates (can use ~).
    #[serde(default)]
    pub templates_dir: Option<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_input_len: default_min_input_len(),
            extra_keywords: BTreeMap::new(),
            templates_dir: None,
        }
    }
}

/// Where to find the profile facts.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    /// Path to a profile TOML file (can use ~). The bundled sample is used when unset.
    #[serde(default)]
    pub path: Option<String>,
}

fn default_thinking_delay_ms() -> u64 {
    500
}
fn default_assistant_label() -> String {
    "Assistant".to_string()
}
fn default_user_label() -> String {
    "You".to_string()
}
fn default_min_input_len() -> usize {
    2
}

/// One configuration file as written. Unset fields leave lower layers untouched.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    #[serde(default)]
    pub chat: ChatLayer,
    #[serde(default)]
    pub matcher: MatcherLayer,
    #[serde(default)]
    pub profile: ProfileLayer,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChatLayer {
    pub thinking_delay_ms: Option<u64>,
    pub assistant_label: Option<String>,
    pub user_label: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MatcherLayer {
    pub min_input_len: Option<usize>,
    #[serde(default)]
    pub extra_keywords: BTreeMap<String, Vec<String>>,
    pub templates_dir: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileLayer {
    pub path: Option<String>,
}

const PROJECT_CONFIG_FILENAME: &str = ".folio.toml";

/// Loads the merged configuration. `explicit` is the `--config` path, if any.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let user_config = load_user_config()?;
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let project_config = match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            Some(load_config_from_path(&path)?)
        }
        None => {
            debug!("No project configuration file (.folio.toml) found in current directory or ancestors.");
            None
        }
    };
    let explicit_config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        None => None,
    };

    let mut merged = merge_configs(Config::default(), user_config);
    merged = merge_configs(merged, project_config);
    merged = merge_configs(merged, explicit_config);
    normalize_config(&mut merged);
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn load_user_config() -> Result<Option<ConfigLayer>> {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "Folio", "folio") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

/// Walks up from `start` looking for `.folio.toml`, stopping at a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

/// Reads one configuration file. Relative paths inside it are resolved against
/// the file's own directory.
pub fn load_config_from_path(path: &Path) -> Result<ConfigLayer> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let mut layer: ConfigLayer = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    anchor_layer_paths(&mut layer, base_dir);
    Ok(layer)
}

fn anchor_layer_paths(layer: &mut ConfigLayer, base_dir: &Path) {
    if let Some(path) = layer.profile.path.as_mut() {
        *path = anchor_path(path, base_dir);
        debug!("Resolved profile path: {}", path);
    }
    if let Some(dir) = layer.matcher.templates_dir.as_mut() {
        *dir = anchor_path(dir, base_dir);
        debug!("Resolved templates directory: {}", dir);
    }
}

/// Expands `~`, then joins a still-relative path onto `base_dir`.
fn anchor_path(raw: &str, base_dir: &Path) -> String {
    let expanded = shellexpand::tilde(raw).into_owned();
    let path = Path::new(&expanded);
    if path.is_absolute() {
        expanded
    } else {
        base_dir.join(path).to_string_lossy().into_owned()
    }
}

/// Overlays the fields `overlay` sets onto `base`.
fn merge_configs(base: Config, overlay: Option<ConfigLayer>) -> Config {
    let overlay = match overlay {
        Some(o) => o,
        None => return base,
    };
    let mut merged = base;

    if let Some(delay) = overlay.chat.thinking_delay_ms {
        merged.chat.thinking_delay_ms = delay;
    }
    if let Some(label) = overlay.chat.assistant_label {
        merged.chat.assistant_label = label;
    }
    if let Some(label) = overlay.chat.user_label {
        merged.chat.user_label = label;
    }
    if let Some(min) = overlay.matcher.min_input_len {
        merged.matcher.min_input_len = min;
    }
    for (topic, keywords) in overlay.matcher.extra_keywords {
        merged.matcher.extra_keywords.insert(topic, keywords);
    }
    if overlay.matcher.templates_dir.is_some() {
        merged.matcher.templates_dir = overlay.matcher.templates_dir;
    }
    if overlay.profile.path.is_some() {
        merged.profile.path = overlay.profile.path;
    }
    merged
}

fn normalize_config(config: &mut Config) {
    for keywords in config.matcher.extra_keywords.values_mut() {
        for keyword in keywords.iter_mut() {
            *keyword = keyword.trim().to_lowercase();
        }
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.matcher.min_input_len == 0 {
        return Err(anyhow!(FolioError::Config(
            "matcher.min_input_len must be at least 1.".to_string()
        )));
    }
    for (name, keywords) in &config.matcher.extra_keywords {
        let topic = Topic::from_str(name).map_err(|_| {
            anyhow!(FolioError::Config(format!(
                "Unknown topic '{}' in matcher.extra_keywords.",
                name
            )))
        })?;
        if !topic.accepts_keywords() {
            return Err(anyhow!(FolioError::Config(format!(
                "Topic '{}' is not a keyword group and cannot take extra keywords.",
                name
            ))));
        }
        if keywords.iter().any(|k| k.is_empty()) {
            return Err(anyhow!(FolioError::Config(format!(
                "Empty keyword in matcher.extra_keywords.{}.",
                name
            ))));
        }
    }
    if let Some(dir) = &config.matcher.templates_dir {
        let dir = Path::new(dir);
        if !dir.is_dir() {
            return Err(anyhow!(FolioError::Config(format!(
                "Configured templates directory '{}' is not a directory.",
                dir.display()
            ))));
        }
    }
    Ok(())
}
