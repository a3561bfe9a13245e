//! # Folio Chat Command
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! `folio chat` runs an interactive session over stdin/stdout. Each line is
//! submitted to a `ChatSession`; the answer is printed once the thinking
//! delay has passed. `bye`, `exit`, `quit`, end of input or Ctrl-C end the
//! session, and any reply still pending at that point is cancelled.
//!
//! ```bash
//! folio chat
//! folio chat --delay-ms 0 < questions.txt
//! ```
//!
use super::{AppContext, GlobalOpts};
use anyhow::Context;
use clap::Parser;
use folio::chat::ChatSession;
use folio::core::error::{FolioError, Result};
use std::io::{IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

const EXIT_WORDS: [&str; 3] = ["bye", "exit", "quit"];

#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Thinking delay before each reply, in milliseconds. Overrides `[chat] thinking_delay_ms`.
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,
}

enum Waited {
    Reply(Option<String>),
    Interrupted,
}

pub async fn handle_chat(args: ChatArgs, opts: &GlobalOpts) -> Result<()> {
    let ctx = AppContext::load(opts)?;
    let matcher = Arc::new(ctx.matcher()?);
    let delay = Duration::from_millis(args.delay_ms.unwrap_or(ctx.config.chat.thinking_delay_ms));
    let assistant = ctx.config.chat.assistant_label.as_str();
    let user = ctx.config.chat.user_label.as_str();
    let interactive = std::io::stdout().is_terminal();

    let mut session = ChatSession::new(matcher, delay);
    if let Some(welcome) = session.transcript().last() {
        println!("{}: {}", assistant, welcome.text);
    }
    if interactive {
        println!("(type 'bye' to quit)");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            print!("{}: ", user);
            std::io::stdout().flush().context("Failed to flush stdout")?;
        }

        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read from stdin")?,
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };
        let Some(line) = line else {
            debug!("End of input");
            break;
        };

        let text = line.trim();
        if is_exit_word(text) {
            println!("{}: Goodbye!", assistant);
            break;
        }
        if let Err(e) = session.submit(&line) {
            match e.downcast_ref::<FolioError>() {
                Some(FolioError::EmptySubmission) => continue,
                _ => return Err(e),
            }
        }

        let waited = tokio::select! {
            turn = session.next_reply() => Waited::Reply(turn.map(|t| t.text.clone())),
            _ = tokio::signal::ctrl_c() => Waited::Interrupted,
        };
        match waited {
            Waited::Reply(Some(text)) => println!("{}: {}", assistant, text),
            Waited::Reply(None) => break,
            Waited::Interrupted => {
                println!();
                break;
            }
        }
    }

    session.close();
    info!(
        "Chat ended after {} turns",
        session.transcript().len()
    );
    Ok(())
}

fn is_exit_word(text: &str) -> bool {
    EXIT_WORDS.iter().any(|w| text.eq_ignore_ascii_case(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_words() {
        assert!(is_exit_word("bye"));
        assert!(is_exit_word("QUIT"));
        assert!(!is_exit_word("goodbye and thanks"));
        assert!(!is_exit_word(""));
    }

    #[test]
    fn test_parses_delay() {
        let args = ChatArgs::try_parse_from(["chat", "--delay-ms", "0"]).unwrap();
        assert_eq!(args.delay_ms, Some(0));
        let args = ChatArgs::try_parse_from(["chat"]).unwrap();
        assert_eq!(args.delay_ms, None);
    }
}
