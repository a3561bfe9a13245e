//! # Folio Rules Command
//!
//! File: cli/src/commands/rules.rs
//!
//! `folio rules` prints the matcher's rules in evaluation order, including any
//! extra keywords from the configuration. The first rule that fires wins.
//!
use super::{AppContext, GlobalOpts};
use clap::Parser;
use folio::core::error::Result;
use folio::matcher::{KeywordRule, Topic};

#[derive(Parser, Debug)]
pub struct RulesArgs {}

pub async fn handle_rules(_args: RulesArgs, opts: &GlobalOpts) -> Result<()> {
    let ctx = AppContext::load(opts)?;
    let matcher = ctx.matcher()?;
    print!("{}", format_rules(matcher.rules()));
    Ok(())
}

fn format_rules(rules: &[KeywordRule]) -> String {
    let width = rules
        .iter()
        .map(|r| r.topic.as_str().len())
        .chain(std::iter::once(Topic::Fallback.as_str().len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("{:>2}  {:<width$} | Trigger\n", "#", "Topic", width = width));
    out.push_str(&format!("{:->2}--{:-<width$}-+-{:-<40}\n", "", "", "", width = width));
    for (i, rule) in rules.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}  {:<width$} | {}\n",
            i + 1,
            rule.topic.as_str(),
            rule.trigger,
            width = width
        ));
    }
    out.push_str(&format!(
        "{:>2}  {:<width$} | (no rule matched)\n",
        "-",
        Topic::Fallback.as_str(),
        width = width
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio::matcher::{MatcherOptions, ResponseMatcher};
    use folio::profile::ProfileFacts;

    #[test]
    fn test_format_lists_rules_in_order() {
        let profile = ProfileFacts::sample().unwrap();
        let matcher = ResponseMatcher::new(&profile, &MatcherOptions::default()).unwrap();
        let out = format_rules(matcher.rules());

        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[2].contains("clarify") && lines[2].contains("shorter than 2 chars"));
        assert!(lines[3].contains("greeting"));
        assert!(lines[5].contains("identity") && lines[5].contains("who, about"));
        assert!(lines.last().unwrap().contains("fallback"));

        let contact = out.find("contact").unwrap();
        let skills = out.find("| contains any of: skill").unwrap();
        assert!(contact < skills);
    }
}
