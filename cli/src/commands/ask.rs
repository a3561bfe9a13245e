//! # Folio Ask Command
//!
//! File: cli/src/commands/ask.rs
//!
//! ## Overview
//!
//! `folio ask <TEXT...>` answers one question and exits. The words are joined
//! with single spaces before matching, so quoting is optional.
//!
//! ```bash
//! folio ask what are your skills
//! folio ask --topic "how can I reach you"     # prints: contact
//! folio ask --json tell me everything
//! ```
//!
use super::{AppContext, GlobalOpts};
use clap::Parser;
use folio::core::error::Result;
use folio::matcher::ResponseMatcher;
use serde_json::json;
use tracing::info;

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question to answer.
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub text: Vec<String>,

    /// Print only the name of the matched topic.
    #[arg(long, conflicts_with = "json")]
    pub topic: bool,

    /// Print `{"topic": ..., "response": ...}` as JSON.
    #[arg(long)]
    pub json: bool,
}

pub async fn handle_ask(args: AskArgs, opts: &GlobalOpts) -> Result<()> {
    let ctx = AppContext::load(opts)?;
    let matcher = ctx.matcher()?;
    println!("{}", render_answer(&matcher, &args)?);
    Ok(())
}

fn render_answer(matcher: &ResponseMatcher, args: &AskArgs) -> Result<String> {
    let question = args.text.join(" ");
    let topic = matcher.classify(&question);
    info!("Answering {:?} with topic '{}'", question, topic);

    if args.topic {
        return Ok(topic.to_string());
    }
    let response = matcher.response_for(topic);
    if args.json {
        let value = json!({ "topic": topic, "response": response });
        return Ok(serde_json::to_string_pretty(&value)?);
    }
    Ok(response.to_string())
}
