//! # Folio Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One submodule per top-level command, each exposing an `...Args` struct for
//! Clap and a `handle_...` function that `main.rs` dispatches to:
//! - `ask`: answer a single question and exit
//! - `chat`: interactive session with a transcript and thinking delay
//! - `profile`: show or validate the profile facts
//! - `rules`: list matcher rules in evaluation order
//!
//! This module also holds the setup every command shares: the global
//! `--config`/`--profile` flags and the loading of config, profile and matcher.
//!
use clap::Args;
use folio::core::config::{self, Config};
use folio::core::error::Result;
use folio::matcher::{MatcherOptions, ResponseMatcher};
use folio::profile::ProfileFacts;
use std::path::PathBuf;
use tracing::debug;

pub mod ask;
pub mod chat;
pub mod profile;
pub mod rules;

/// Flags accepted by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Configuration file. Takes precedence over `.folio.toml` and the user config.
    #[arg(long, global = true, env = "FOLIO_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Profile TOML file. Defaults to `[profile] path`, then the bundled sample.
    #[arg(long, global = true, env = "FOLIO_PROFILE", value_name = "PATH")]
    pub profile: Option<PathBuf>,
}

/// Config and profile resolved for one command run.
pub struct AppContext {
    pub config: Config,
    pub profile: ProfileFacts,
}

impl AppContext {
    pub fn load(opts: &GlobalOpts) -> Result<Self> {
        let config = config::load_config(opts.config.as_deref())?;
        let profile_path: Option<PathBuf> = opts
            .profile
            .clone()
            .or_else(|| config.profile.path.as_ref().map(PathBuf::from));
        debug!("Profile path: {:?}", profile_path);
        let profile = ProfileFacts::resolve(profile_path.as_deref())?;
        Ok(Self { config, profile })
    }

    pub fn matcher(&self) -> Result<ResponseMatcher> {
        let options = MatcherOptions::from_config(&self.config.matcher)?;
        ResponseMatcher::new(&self.profile, &options)
    }
}
