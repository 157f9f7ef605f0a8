// SPDX-FileCopyrightText: 2026 Confab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-owner actor around the conversation state machine.
//!
//! All mutation of the display list and transcript happens inside one tokio
//! task draining a command mailbox. Submitting a draft is fire-and-forget:
//! the actor appends the submitted-state entries, spawns an independent task
//! per turn for the network call, and that task re-enters the mailbox with
//! the outcome. Completions may arrive out of submission order; each
//! reconciles only its own placeholder.
//!
//! The actor holds only a weak mailbox sender, so it exits once the handle
//! and every in-flight turn are gone -- an in-flight call keeps the actor
//! alive until it is reconciled.

use std::sync::Arc;

use confab_core::{ChatBackend, ChatMessage, ConfabError, DisplayMessage, Draft, MessageId};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::conversation::Conversation;

/// Change notifications for the UI collaborator.
///
/// The display list only ever grows (`Appended`) or mutates a single
/// existing entry in place (`Updated`), so these two events fully describe
/// its evolution.
#[derive(Debug, Clone)]
pub enum ConversationEvent {
    Appended(DisplayMessage),
    Updated(DisplayMessage),
}

enum Command {
    Send(Draft),
    Resolve {
        placeholder: MessageId,
        draft: Draft,
        outcome: Result<String, ConfabError>,
    },
    Snapshot(oneshot::Sender<Vec<DisplayMessage>>),
    Transcript(oneshot::Sender<Vec<ChatMessage>>),
}

/// Cloneable handle for submitting drafts and querying state.
#[derive(Clone)]
pub struct ConversationHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl ConversationHandle {
    /// Submits a draft. Returns immediately; reconciliation happens later on
    /// the actor task. A whitespace-only draft is silently ignored there.
    pub fn send(&self, draft: Draft) {
        let _ = self.tx.send(Command::Send(draft));
    }

    /// Returns a snapshot of the current ordered display list.
    pub async fn snapshot(&self) -> Result<Vec<DisplayMessage>, ConfabError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Command::Snapshot(reply_tx))
            .map_err(|_| ConfabError::Internal("conversation actor is gone".into()))?;
        reply_rx
            .await
            .map_err(|_| ConfabError::Internal("conversation actor is gone".into()))
    }

    /// Returns a snapshot of the current API-shaped transcript.
    pub async fn transcript(&self) -> Result<Vec<ChatMessage>, ConfabError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Command::Transcript(reply_tx))
            .map_err(|_| ConfabError::Internal("conversation actor is gone".into()))?;
        reply_rx
            .await
            .map_err(|_| ConfabError::Internal("conversation actor is gone".into()))
    }
}

/// Owns the [`Conversation`] and serializes every mutation on its own task.
pub struct ConversationActor {
    conversation: Conversation,
    backend: Arc<dyn ChatBackend>,
    commands: mpsc::UnboundedReceiver<Command>,
    mailbox: mpsc::WeakUnboundedSender<Command>,
    events: mpsc::UnboundedSender<ConversationEvent>,
}

impl ConversationActor {
    /// Seeds the conversation, emits `Appended` events for the seed
    /// messages, and spawns the actor task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        backend: Arc<dyn ChatBackend>,
        system_prompt: &str,
        welcome_text: &str,
    ) -> (
        ConversationHandle,
        mpsc::UnboundedReceiver<ConversationEvent>,
    ) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let conversation =
            Conversation::new(system_prompt, welcome_text, backend.is_configured());
        for message in conversation.messages() {
            let _ = event_tx.send(ConversationEvent::Appended(message.clone()));
        }

        let actor = Self {
            conversation,
            backend,
            commands: command_rx,
            mailbox: command_tx.downgrade(),
            events: event_tx,
        };
        tokio::spawn(actor.run());

        (ConversationHandle { tx: command_tx }, event_rx)
    }

    async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            match command {
                Command::Send(draft) => self.handle_send(draft),
                Command::Resolve {
                    placeholder,
                    draft,
                    outcome,
                } => self.handle_resolve(placeholder, draft, outcome),
                Command::Snapshot(reply) => {
                    let _ = reply.send(self.conversation.messages().to_vec());
                }
                Command::Transcript(reply) => {
                    let _ = reply.send(self.conversation.transcript().to_vec());
                }
            }
        }
        debug!("conversation actor finished");
    }

    fn handle_send(&mut self, draft: Draft) {
        let Some(submission) = self.conversation.submit(draft) else {
            return;
        };

        self.emit(ConversationEvent::Appended(submission.user_message.clone()));
        self.emit(ConversationEvent::Appended(
            submission.placeholder_message.clone(),
        ));

        // The strong sender moved into the task keeps the actor alive until
        // this turn is reconciled, even if the handle is dropped meanwhile.
        let Some(mailbox) = self.mailbox.upgrade() else {
            return;
        };
        let backend = Arc::clone(&self.backend);
        tokio::spawn(async move {
            let outcome = backend.send_chat(&submission.transcript).await;
            let _ = mailbox.send(Command::Resolve {
                placeholder: submission.placeholder,
                draft: submission.draft,
                outcome,
            });
        });
    }

    fn handle_resolve(
        &mut self,
        placeholder: MessageId,
        draft: Draft,
        outcome: Result<String, ConfabError>,
    ) {
        if let Some(updated) = self.conversation.resolve(&placeholder, draft, outcome) {
            self.emit(ConversationEvent::Updated(updated));
        }
    }

    fn emit(&self, event: ConversationEvent) {
        // A dropped event receiver means no one is rendering; state stays
        // authoritative in the conversation either way.
        let _ = self.events.send(event);
    }
}
