//! # Folio Profile Command Group
//!
//! File: cli/src/commands/profile.rs
//!
//! ## Overview
//!
//! `folio profile show` prints the resolved profile as TOML (a good starting
//! point for writing your own). `folio profile check` validates it and renders
//! every response template once, so template or data problems show up before
//! anyone chats.
//!
use super::{AppContext, GlobalOpts};
use clap::{Parser, Subcommand};
use folio::core::error::Result;
use folio::matcher::{ResponseMatcher, Topic};
use folio::profile::ProfileFacts;
use tracing::info;

#[derive(Parser, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    command: ProfileCommand,
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Print the resolved profile as TOML.
    Show,
    /// Validate the profile and render every response.
    Check,
}

pub async fn handle_profile(args: ProfileArgs, opts: &GlobalOpts) -> Result<()> {
    let ctx = AppContext::load(opts)?;
    match args.command {
        ProfileCommand::Show => {
            print!("{}", toml::to_string_pretty(&ctx.profile)?);
        }
        ProfileCommand::Check => {
            let matcher = ctx.matcher()?;
            println!("{}", summarize(&ctx.profile, &matcher));
        }
    }
    Ok(())
}

fn summarize(profile: &ProfileFacts, matcher: &ResponseMatcher) -> String {
    let rendered = Topic::ALL
        .iter()
        .filter(|t| !matcher.response_for(**t).is_empty())
        .count();
    info!("{} of {} responses rendered", rendered, Topic::ALL.len());
    format!(
        "Profile '{}' is valid.\n\
         {} project(s), {} language(s), {} interest(s), {} technology group(s), {} certification(s).\n\
         {} of {} responses rendered.",
        profile.name,
        profile.projects.len(),
        profile.languages.len(),
        profile.interests.len(),
        profile.technologies.len(),
        profile.certifications.len(),
        rendered,
        Topic::ALL.len()
    )
}
