//! # Folio Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the Folio CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to appropriate command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Ask a single question
//! folio ask what are your skills
//!
//! # Chat with a custom profile and more logging
//! folio -vv --profile ~/me.toml chat
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to appropriate command handler
//! 4. Format and display any errors that occur
//!
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "folio",
    about = "Scripted portfolio assistant",
    long_about = "Answers questions about a portfolio owner from a static profile,\n\
                  using ordered keyword rules and canned responses.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[command(flatten)]
    global: commands::GlobalOpts,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer one question and exit.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// Start an interactive chat session.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Show or validate the profile.
    #[command(alias = "p")]
    Profile(commands::profile::ProfileArgs),
    /// List matcher rules in evaluation order.
    Rules(commands::rules::RulesArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Ask(args) => commands::ask::handle_ask(args, &cli.global).await,
        Commands::Chat(args) => commands::chat::handle_chat(args, &cli.global).await,
        Commands::Profile(args) => commands::profile::handle_profile(args, &cli.global).await,
        Commands::Rules(args) => commands::rules::handle_rules(args, &cli.global).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
