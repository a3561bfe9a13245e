//! # Folio CLI Chat Integration Tests
//!
//! File: cli/tests/chat.rs
//!
//! ## Overview
//!
//! Drives `folio chat` through piped stdin. With stdout not being a terminal
//! the command prints no prompts, so the output is just the labelled turns.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_chat_answers_each_line_in_order() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["chat", "--delay-ms", "0"])
        .write_stdin("hello\n\n   \ncontact\nbye\n")
        .output()
        .expect("Failed to run folio chat");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let welcome = stdout
        .find("Assistant: Hi! I'm Alex Rivera's AI assistant. How can I help you today?")
        .expect("welcome line");
    let greeting = stdout.find("What would you like to know about?").expect("greeting");
    let contact = stdout.find("📧 Contact Information:").expect("contact");
    let goodbye = stdout.find("Assistant: Goodbye!").expect("goodbye");
    assert!(welcome < greeting && greeting < contact && contact < goodbye);
    // Blank lines are not submitted, so exactly two answers follow the welcome.
    assert_eq!(stdout.matches("Assistant: ").count(), 4);
}

#[test]
fn test_chat_ends_on_eof() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["chat", "--delay-ms", "0"])
        .write_stdin("skills\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Core Technologies:"));
}

#[test]
fn test_chat_uses_configured_labels() {
    let sandbox = Sandbox::new();
    sandbox.write(
        ".folio.toml",
        "[chat]\nthinking_delay_ms = 1\nassistant_label = \"Bot\"\n",
    );
    sandbox
        .cmd()
        .arg("chat")
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("Bot: Hi! I'm Alex Rivera's AI assistant.")
                .and(predicate::str::contains("Bot: Goodbye!")),
        );
}
