// SPDX-FileCopyrightText: 2026 Confab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `confab shell` command implementation.
//!
//! Launches an interactive REPL with a colored prompt and readline history.
//! Each line is submitted to the conversation actor as a draft; the REPL
//! then drains conversation events until that turn resolves and prints the
//! assistant's reply (or the failure text).

use std::sync::Arc;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use confab_config::ConfabConfig;
use confab_conversation::{ConversationActor, ConversationEvent, ConversationHandle};
use confab_core::{Author, ChatBackend, ConfabError, DeliveryStatus, Draft};
use confab_deepseek::DeepSeekClient;

/// Runs the `confab shell` interactive REPL.
pub async fn run_shell(config: ConfabConfig) -> Result<(), ConfabError> {
    let client = DeepSeekClient::new(
        config.deepseek.api_key.as_deref(),
        config.deepseek.model.clone(),
    );
    let backend: Arc<dyn ChatBackend> = Arc::new(client);

    let (handle, mut events) = ConversationActor::spawn(
        backend,
        &config.agent.system_prompt,
        &config.agent.welcome_message,
    );

    println!("{}", "confab shell".bold().green());
    println!("Type {} to exit.\n", "/quit".yellow());

    // The seed events (welcome, possibly the missing-credential warning)
    // are queued before the actor loop starts.
    while let Ok(event) = events.try_recv() {
        render_event(&config.agent.name, &event);
    }

    let mut rl = DefaultEditor::new()
        .map_err(|e| ConfabError::Internal(format!("failed to initialize readline: {e}")))?;

    let prompt = format!("{}> ", "you".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);
                if !submit_and_await(&config.agent.name, &handle, &mut events, trimmed).await {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

/// Submits one draft and drains events until its turn resolves.
///
/// Returns false when the event channel closes (the actor is gone).
async fn submit_and_await(
    agent_name: &str,
    handle: &ConversationHandle,
    events: &mut UnboundedReceiver<ConversationEvent>,
    text: &str,
) -> bool {
    handle.send(Draft::new(text));

    loop {
        match events.recv().await {
            Some(event @ ConversationEvent::Updated(_)) => {
                render_event(agent_name, &event);
                return true;
            }
            Some(event) => render_event(agent_name, &event),
            None => {
                debug!("conversation event channel closed");
                return false;
            }
        }
    }
}

/// Prints a conversation event the way a message list would render it.
fn render_event(agent_name: &str, event: &ConversationEvent) {
    let message = match event {
        ConversationEvent::Appended(msg) | ConversationEvent::Updated(msg) => msg,
    };

    match (&message.author, &message.status) {
        // The user's own line was just echoed by readline; skip it.
        (Author::User, _) => {}
        (Author::Assistant, DeliveryStatus::Sending) => {
            println!("{}", message.text.dimmed());
        }
        (Author::Assistant, DeliveryStatus::Sent) => {
            println!("{} {}", format!("{agent_name}:").cyan().bold(), message.text);
        }
        (Author::Assistant, DeliveryStatus::Error(_)) => {
            eprintln!("{}: {}", "error".red(), message.text);
        }
    }
}
