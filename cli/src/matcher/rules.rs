//! # Folio Matcher Rules
//!
//! File: cli/src/matcher/rules.rs
//!
//! ## Overview
//!
//! The matcher's dispatch table: an ordered list of `(trigger, topic)` pairs.
//! Evaluation order is the order of this list, so priority is data rather than
//! a chain of conditionals and can be asserted directly in tests.
//!
//! Default order:
//! 1. `clarify` - input shorter than the minimum length
//! 2. `greeting` - the whole message is a greeting
//! 3. `everything` - contains "all" or "everything", or "tell ... me"
//! 4. keyword groups: identity, contact, education, skills, languages, projects, interests
//!
//! Anything left over falls through to `fallback`, which is not a rule.
//!
use super::Topic;
use crate::core::error::{FolioError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

/// Whole-message greeting, optionally followed by "there" and punctuation.
const GREETING_PATTERN: &str = r"^(?:good (?:morning|afternoon|evening)|hi+|hey+|hello+|yo|sup|hola|greetings|good|morning|afternoon|evening)(?:\s+there)?[\s!.?,]*$";

/// Second trigger of the `everything` rule ("tell me more", "tell me about yourself").
const AGGREGATE_PATTERN: &str = r"tell.*me";

/// Keyword groups in priority order, with their built-in keywords.
pub const KEYWORD_GROUPS: [(Topic, &[&str]); 8] = [
    (Topic::Everything, &["all", "everything"]),
    (Topic::Identity, &["who", "about"]),
    (Topic::Contact, &["contact", "email", "phone", "reach"]),
    (Topic::Education, &["education", "study", "university", "school"]),
    (Topic::Skills, &["skill", "certification", "tech", "stack"]),
    (Topic::Languages, &["language", "speak"]),
    (Topic::Projects, &["project", "work", "portfolio"]),
    (Topic::Interests, &["interest", "hobby", "passion"]),
];

/// The predicate half of a rule. Inputs are normalized (trimmed, lowercase) before testing.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// Fewer than this many characters.
    ShorterThan(usize),
    /// Regular expression over the whole normalized input.
    Pattern(Regex),
    /// Any of these substrings.
    Keywords(Vec<String>),
    /// Any of the nested triggers.
    Any(Vec<Trigger>),
}

impl Trigger {
    pub fn matches(&self, normalized: &str) -> bool {
        match self {
            Trigger::ShorterThan(min) => normalized.chars().count() < *min,
            Trigger::Pattern(re) => re.is_match(normalized),
            Trigger::Keywords(words) => words.iter().any(|w| normalized.contains(w.as_str())),
            Trigger::Any(triggers) => triggers.iter().any(|t| t.matches(normalized)),
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::ShorterThan(min) => write!(f, "shorter than {} chars", min),
            Trigger::Pattern(re) => write!(f, "pattern /{}/", re.as_str()),
            Trigger::Keywords(words) => write!(f, "contains any of: {}", words.join(", ")),
            Trigger::Any(triggers) => {
                for (i, trigger) in triggers.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{}", trigger)?;
                }
                Ok(())
            }
        }
    }
}

/// One entry of the dispatch table.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub topic: Topic,
    pub trigger: Trigger,
}

impl KeywordRule {
    pub fn new(topic: Topic, trigger: Trigger) -> Self {
        Self { topic, trigger }
    }
}

/// Builds the default rule list. `extra_keywords` are appended to their group's built-ins.
///
/// Extra keywords are trimmed and lowercased to match normalized input. An empty
/// keyword would match every input, so it is rejected.
pub fn build_rules(
    min_input_len: usize,
    extra_keywords: &BTreeMap<Topic, Vec<String>>,
) -> Result<Vec<KeywordRule>> {
    let greeting = Regex::new(GREETING_PATTERN).map_err(FolioError::from)?;
    let aggregate = Regex::new(AGGREGATE_PATTERN).map_err(FolioError::from)?;

    let mut rules = Vec::with_capacity(KEYWORD_GROUPS.len() + 2);
    rules.push(KeywordRule::new(
        Topic::Clarify,
        Trigger::ShorterThan(min_input_len),
    ));
    rules.push(KeywordRule::new(Topic::Greeting, Trigger::Pattern(greeting)));

    for (topic, builtin) in KEYWORD_GROUPS {
        let mut words: Vec<String> = builtin.iter().map(|w| w.to_string()).collect();
        for word in extra_keywords.get(&topic).into_iter().flatten() {
            let word = normalize_keyword(topic, word)?;
            if !words.contains(&word) {
                words.push(word);
            }
        }
        let trigger = if topic == Topic::Everything {
            Trigger::Any(vec![
                Trigger::Keywords(words),
                Trigger::Pattern(aggregate.clone()),
            ])
        } else {
            Trigger::Keywords(words)
        };
        rules.push(KeywordRule::new(topic, trigger));
    }
    Ok(rules)
}

fn normalize_keyword(topic: Topic, word: &str) -> Result<String> {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return Err(FolioError::Config(format!(
            "Empty extra keyword for topic '{}'.",
            topic
        ))
        .into());
    }
    Ok(word)
}
