//! # Folio Response Matcher
//!
//! File: cli/src/matcher/mod.rs
//!
//! ## Overview
//!
//! Maps free-text input to exactly one canned reply about the profile owner.
//! The input is trimmed and lowercased, then tested against an ordered list of
//! rules (see `rules.rs`); the first rule that fires picks the topic, and the
//! topic's pre-rendered response is returned. Nothing matched means the topic
//! menu fallback.
//!
//! The matcher is deterministic and has no interior state: the same input
//! always yields byte-identical output, and `respond` cannot fail. All fallible
//! work (regex compilation, template rendering) happens in `ResponseMatcher::new`.
//!
//! ## Examples
//!
//! ```rust
//! use folio::matcher::{MatcherOptions, ResponseMatcher, Topic};
//! use folio::profile::ProfileFacts;
//!
//! let profile = ProfileFacts::sample().unwrap();
//! let matcher = ResponseMatcher::new(&profile, &MatcherOptions::default()).unwrap();
//!
//! assert_eq!(matcher.classify("How do I contact you?"), Topic::Contact);
//! assert!(matcher.respond("contact").contains(&profile.email));
//! ```
//!
use crate::core::config::MatcherConfig;
use crate::core::error::{FolioError, Result};
use crate::core::templating::ResponseTemplates;
use crate::profile::ProfileFacts;
use anyhow::anyhow;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

pub mod rules;

pub use rules::{KeywordRule, Trigger};

/// Category of a canned answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Opening line of a chat session. Never selected by a rule.
    Welcome,
    Clarify,
    Greeting,
    Everything,
    Identity,
    Contact,
    Education,
    Skills,
    Languages,
    Projects,
    Interests,
    Fallback,
}

impl Topic {
    pub const ALL: [Topic; 12] = [
        Topic::Welcome,
        Topic::Clarify,
        Topic::Greeting,
        Topic::Everything,
        Topic::Identity,
        Topic::Contact,
        Topic::Education,
        Topic::Skills,
        Topic::Languages,
        Topic::Projects,
        Topic::Interests,
        Topic::Fallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Welcome => "welcome",
            Topic::Clarify => "clarify",
            Topic::Greeting => "greeting",
            Topic::Everything => "everything",
            Topic::Identity => "identity",
            Topic::Contact => "contact",
            Topic::Education => "education",
            Topic::Skills => "skills",
            Topic::Languages => "languages",
            Topic::Projects => "projects",
            Topic::Interests => "interests",
            Topic::Fallback => "fallback",
        }
    }

    /// Whether the topic is a substring keyword group (and so can take extra keywords).
    pub fn accepts_keywords(&self) -> bool {
        rules::KEYWORD_GROUPS.iter().any(|(t, _)| t == self)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = FolioError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or(FolioError::UnknownTopic {
                name: s.to_string(),
            })
    }
}

/// Construction options for [`ResponseMatcher`].
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherOptions {
    pub min_input_len: usize,
    pub extra_keywords: BTreeMap<Topic, Vec<String>>,
    pub templates_dir: Option<PathBuf>,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            min_input_len: 2,
            extra_keywords: BTreeMap::new(),
            templates_dir: None,
        }
    }
}

impl MatcherOptions {
    /// Converts the `[matcher]` config section, resolving topic names.
    pub fn from_config(config: &MatcherConfig) -> Result<Self> {
        let mut extra_keywords = BTreeMap::new();
        for (name, words) in &config.extra_keywords {
            let topic = Topic::from_str(name)?;
            if !topic.accepts_keywords() {
                return Err(anyhow!(FolioError::Config(format!(
                    "Topic '{}' is not a keyword group.",
                    topic
                ))));
            }
            extra_keywords.insert(topic, words.clone());
        }
        Ok(Self {
            min_input_len: config.min_input_len,
            extra_keywords,
            templates_dir: config.templates_dir.as_ref().map(PathBuf::from),
        })
    }
}

/// Trims and lowercases input before rule evaluation.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Ordered-rule responder over a fixed profile.
#[derive(Debug, Clone)]
pub struct ResponseMatcher {
    rules: Vec<KeywordRule>,
    responses: BTreeMap<Topic, String>,
}

impl ResponseMatcher {
    /// Builds the rule list and renders every topic's response against `profile`.
    pub fn new(profile: &ProfileFacts, options: &MatcherOptions) -> Result<Self> {
        let rules = rules::build_rules(options.min_input_len, &options.extra_keywords)?;
        let templates = match &options.templates_dir {
            Some(dir) => ResponseTemplates::with_overrides(dir)?,
            None => ResponseTemplates::builtin()?,
        };
        let responses = templates.render_all(profile)?;
        info!(
            "Response matcher ready for '{}' with {} rules",
            profile.name,
            rules.len()
        );
        Ok(Self { rules, responses })
    }

    /// The topic that answers `input`.
    pub fn classify(&self, input: &str) -> Topic {
        let normalized = normalize(input);
        let topic = self
            .rules
            .iter()
            .find(|rule| rule.trigger.matches(&normalized))
            .map(|rule| rule.topic)
            .unwrap_or(Topic::Fallback);
        debug!("Classified {:?} as {}", normalized, topic);
        topic
    }

    /// Returns the single canned response for `input`.
    pub fn respond(&self, input: &str) -> String {
        self.response_for(self.classify(input)).to_string()
    }

    /// The pre-rendered response for `topic`.
    pub fn response_for(&self, topic: Topic) -> &str {
        // Every topic is rendered in `new`.
        &self.responses[&topic]
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }
}
