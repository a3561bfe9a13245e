//! # Folio Response Templates
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Every canned answer is a Tera template rendered against the profile facts.
//! The built-in templates are compiled into the binary; a directory of
//! `<topic>.tera` files can replace any of them (see `matcher.templates_dir`).
//!
//! ## Architecture
//!
//! 1. Register the built-in template for each topic under the topic's name.
//! 2. Optionally scan an override directory and re-register matching topics.
//! 3. Build one `tera::Context` from the profile (plus the shared topic menu).
//! 4. Render every topic once. The matcher keeps the rendered strings, so
//!    template errors surface at startup and never while answering.
//!
//! Template names carry no `.html` suffix, so Tera's autoescaping stays off.
//!
use crate::core::error::{FolioError, Result};
use crate::matcher::Topic;
use crate::profile::ProfileFacts;
use anyhow::{anyhow, Context};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tera::Tera;
use tracing::{debug, info, warn};

/// File extension recognised in an override directory.
const TEMPLATE_EXTENSION: &str = ".tera";

/// Numbered topic list shared by the greeting and fallback answers.
pub const TOPIC_MENU: &str = "1. Background & Education 📚
2. Technical Skills & Certifications 💻
3. Projects & Experience 🚀
4. Languages & Communication 🌐
5. Interests & Specializations 🎯
6. Contact Information 📧";

const WELCOME: &str = r#"Hi! I'm {{ name }}'s AI assistant. How can I help you today?"#;

const CLARIFY: &str = r#"I didn't catch that. Could you please say more?"#;

const GREETING: &str = r#"Hi! I'm {{ name }}'s AI assistant. Here's what I can tell you about:

{{ topic_menu }}

What would you like to know about?"#;

const EVERYTHING: &str = r#"Here's everything about {{ name }}:

📚 Background & Education
• Currently studying at {{ education.university }}
{%- if education.high_school %}
• Previously at {{ education.high_school }}
{%- endif %}
• Status: {{ education.status }}
{%- if personality %}
• Personality: {{ personality }}
{%- endif %}

💻 Technical Skills & Certifications
{%- for cert in certifications %}
• {{ cert }}
{%- endfor %}
{%- for group in technologies %}
• {{ group.area }}: {{ group.items | join(sep=", ") }}
{%- endfor %}

🚀 Key Projects
{%- for project in projects %}
• {{ project.name }}
  Technologies: {{ project.tech | join(sep=", ") }}
{%- endfor %}

🌐 Languages
{%- for lang in languages %}
• {{ lang.name }}: {{ lang.level }}
{%- endfor %}

🎯 Main Interests
{%- for interest in interests %}
• {{ interest.area }}: {{ interest.details }}
{%- endfor %}

📧 Contact
• Email: {{ email }}
{%- if phone %}
• Phone: {{ phone }}
{%- endif %}
{%- if location %}
• Location: {{ location }}
{%- endif %}

Would you like to know more about any specific area?"#;

const IDENTITY: &str = r#"{{ name }} is a {{ education.status }} at {{ education.university }}
{%- if education.focus %}, specializing in {{ education.focus }}{% endif %}.
{%- if project_names %} With a passion for technology and innovation, {{ name }} has built projects including {{ project_names }}.{% endif %}"#;

const CONTACT: &str = r#"📧 Contact Information:
• Email: {{ email }}
{%- if phone %}
• Phone: {{ phone }}
{%- endif %}
{%- if location %}
• Location: {{ location }}
{%- endif %}

Feel free to reach out for collaboration or inquiries!"#;

const EDUCATION: &str = r#"📚 Educational Background:
• Currently at {{ education.university }}
{%- if education.high_school %}
• Previously at {{ education.high_school }}
{%- endif %}
• Status: {{ education.status }}
{%- if education.focus %}
• Focus: {{ education.focus }}
{%- endif %}"#;

const SKILLS: &str = r#"💻 Technical Skills & Certifications:
{%- if certifications %}

Certifications:
{%- for cert in certifications %}
• {{ cert }}
{%- endfor %}
{%- endif %}
{%- if technologies %}

Core Technologies:
{%- for group in technologies %}
• {{ group.area }}: {{ group.items | join(sep=", ") }}
{%- endfor %}
{%- endif %}"#;

const LANGUAGES: &str = r#"🌐 Language Proficiency:
{%- for lang in languages %}
• {{ lang.name }}: {{ lang.level }}
{%- endfor %}

This multilingual capability enables effective communication across diverse teams and international projects."#;

const PROJECTS: &str = r#"🚀 Notable Projects:
{%- for project in projects %}

{{ project.name }}
• Technologies: {{ project.tech | join(sep=", ") }}
{%- endfor %}

Each project showcases practical implementation of various technologies and problem-solving skills."#;

const INTERESTS: &str = r#"🎯 Areas of Interest:
{%- for interest in interests %}

{{ interest.area }}
• {{ interest.details }}
{%- endfor %}

These interests drive continuous learning and innovation in projects."#;

const FALLBACK: &str = r#"I can help you learn about {{ name }}. Here are some topics you can ask about:

{{ topic_menu }}

Just ask about any of these topics or type "tell me everything" to see all information!"#;

/// Built-in template source for a topic.
pub fn builtin_template(topic: Topic) -> &'static str {
    match topic {
        Topic::Welcome => WELCOME,
        Topic::Clarify => CLARIFY,
        Topic::Greeting => GREETING,
        Topic::Everything => EVERYTHING,
        Topic::Identity => IDENTITY,
        Topic::Contact => CONTACT,
        Topic::Education => EDUCATION,
        Topic::Skills => SKILLS,
        Topic::Languages => LANGUAGES,
        Topic::Projects => PROJECTS,
        Topic::Interests => INTERESTS,
        Topic::Fallback => FALLBACK,
    }
}

/// The set of per-topic templates, compiled into one Tera instance.
pub struct ResponseTemplates {
    tera: Tera,
}

impl ResponseTemplates {
    /// Compiles the built-in template for every topic.
    pub fn builtin() -> Result<Self> {
        let mut tera = Tera::default();
        for topic in Topic::ALL {
            tera.add_raw_template(topic.as_str(), builtin_template(topic))
                .map_err(|e| {
                    anyhow!(FolioError::Template { source: e })
                        .context(format!("Built-in template '{}' failed to compile", topic))
                })?;
        }
        Ok(Self { tera })
    }

    /// Built-in templates, with any `<topic>.tera` file in `dir` taking precedence.
    pub fn with_overrides(dir: &Path) -> Result<Self> {
        let mut templates = Self::builtin()?;
        info!("Loading template overrides from '{}'", dir.display());

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read templates directory '{}'", dir.display()))?;
        for entry_result in entries {
            let entry = match entry_result {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to access entry in '{}': {}", dir.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let Some(stem) = strip_template_extension(&file_name) else {
                debug!("Skipping non-template file: {}", path.display());
                continue;
            };
            let topic = match Topic::from_str(stem) {
                Ok(t) => t,
                Err(_) => {
                    warn!(
                        "Template '{}' does not name a known topic; ignoring it.",
                        path.display()
                    );
                    continue;
                }
            };
            let source = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template file '{}'", path.display()))?;
            templates
                .tera
                .add_raw_template(topic.as_str(), source.trim_end_matches('\n'))
                .map_err(|e| {
                    anyhow!(FolioError::Template { source: e }).context(format!(
                        "Tera compilation failed for template file '{}'",
                        path.display()
                    ))
                })?;
            info!("Template for '{}' overridden by '{}'", topic, path.display());
        }
        Ok(templates)
    }

    /// Renders a single topic against a prepared context.
    pub fn render(&self, topic: Topic, context: &tera::Context) -> Result<String> {
        self.tera.render(topic.as_str(), context).map_err(|e| {
            anyhow!(FolioError::Template { source: e })
                .context(format!("Tera rendering failed for topic '{}'", topic))
        })
    }

    /// Renders every topic against the profile.
    pub fn render_all(&self, profile: &ProfileFacts) -> Result<BTreeMap<Topic, String>> {
        let context = profile_context(profile)?;
        let mut rendered = BTreeMap::new();
        for topic in Topic::ALL {
            rendered.insert(topic, self.render(topic, &context)?);
        }
        debug!("Rendered {} response templates", rendered.len());
        Ok(rendered)
    }
}

/// Builds the template context: every profile field plus `topic_menu` and `project_names`.
pub fn profile_context(profile: &ProfileFacts) -> Result<tera::Context> {
    let mut context = tera::Context::from_serialize(profile).map_err(|e| {
        anyhow!(FolioError::Template { source: e })
            .context("Failed to create Tera context from profile")
    })?;
    // `personality` is skipped by serde when unset; keep it defined as null for `{% if %}`.
    context.insert("personality", &profile.personality);
    context.insert("topic_menu", TOPIC_MENU);
    context.insert("project_names", &profile.project_names());
    Ok(context)
}

/// Returns the file stem when `file_name` ends in `.tera` (any case).
fn strip_template_extension(file_name: &str) -> Option<&str> {
    let split = file_name.len().checked_sub(TEMPLATE_EXTENSION.len())?;
    if !file_name.is_char_boundary(split) {
        return None;
    }
    let (stem, ext) = file_name.split_at(split);
    (ext.eq_ignore_ascii_case(TEMPLATE_EXTENSION) && !stem.is_empty()).then_some(stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> ProfileFacts {
        ProfileFacts::sample().unwrap()
    }

    #[test]
    fn test_builtin_templates_render_for_sample() -> Result<()> {
        let rendered = ResponseTemplates::builtin()?.render_all(&sample())?;
        assert_eq!(rendered.len(), Topic::ALL.len());
        assert_eq!(
            rendered[&Topic::Welcome],
            "Hi! I'm Alex Rivera's AI assistant. How can I help you today?"
        );
        Ok(())
    }

    #[test]
    fn test_contact_lines_are_contiguous() -> Result<()> {
        let rendered = ResponseTemplates::builtin()?.render_all(&sample())?;
        assert_eq!(
            rendered[&Topic::Contact],
            "📧 Contact Information:\n\
             • Email: alex.rivera@example.com\n\
             • Phone: +1 555 0100\n\
             • Location: Lisbon, Portugal\n\
             \n\
             Feel free to reach out for collaboration or inquiries!"
        );
        Ok(())
    }

    #[test]
    fn test_optional_fields_are_omitted() -> Result<()> {
        let mut profile = sample();
        profile.phone.clear();
        profile.personality = None;
        profile.certifications.clear();

        let rendered = ResponseTemplates::builtin()?.render_all(&profile)?;
        assert!(!rendered[&Topic::Contact].contains("Phone"));
        assert!(!rendered[&Topic::Everything].contains("Personality"));
        assert!(!rendered[&Topic::Skills].contains("Certifications:"));
        assert!(rendered[&Topic::Skills].contains("• Backend: Node.js, Python, Django"));
        Ok(())
    }

    #[test]
    fn test_identity_mentions_projects() -> Result<()> {
        let rendered = ResponseTemplates::builtin()?.render_all(&sample())?;
        let identity = &rendered[&Topic::Identity];
        assert!(identity.starts_with(
            "Alex Rivera is a First Year Student at Lisbon Institute of Technology, specializing in"
        ));
        assert!(identity.contains("Web Security Scanner, AI Image Generator, Crimson Shop"));
        Ok(())
    }

    #[test]
    fn test_override_directory() -> Result<()> {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("contact.TERA"), "Write to {{ email }}\n").unwrap();
        fs::write(dir.path().join("weather.tera"), "Sunny").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let rendered = ResponseTemplates::with_overrides(dir.path())?.render_all(&sample())?;
        assert_eq!(rendered[&Topic::Contact], "Write to alex.rivera@example.com");
        assert!(rendered[&Topic::Skills].starts_with("💻 Technical Skills"));
        Ok(())
    }

    #[test]
    fn test_override_with_invalid_syntax() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("greeting.tera"), "Hello {{ name").unwrap();

        let result = ResponseTemplates::with_overrides(dir.path());
        let message = format!("{:#}", result.err().unwrap());
        assert!(message.contains("Tera compilation failed"));
        assert!(message.contains("greeting.tera"));
    }

    #[test]
    fn test_override_with_unknown_variable_fails_at_render() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("contact.tera"), "{{ fax }}").unwrap();

        let templates = ResponseTemplates::with_overrides(dir.path()).unwrap();
        assert!(templates.render_all(&sample()).is_err());
    }

    #[test]
    fn test_strip_template_extension() {
        assert_eq!(strip_template_extension("skills.tera"), Some("skills"));
        assert_eq!(strip_template_extension("Skills.TeRa"), Some("Skills"));
        assert_eq!(strip_template_extension(".tera"), None);
        assert_eq!(strip_template_extension("skills.txt"), None);
    }
}
