// SPDX-FileCopyrightText: 2026 Confab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The pure conversation state machine.
//!
//! [`Conversation`] owns the two authoritative lists: the UI-shaped display
//! messages and the API-shaped transcript. It is synchronous and has no
//! knowledge of the network; the actor layer in [`crate::actor`] drives it
//! and handles async completion.
//!
//! Per-turn lifecycle on the placeholder: `Sending` at submission, then a
//! single in-place resolution to `Sent` (reply) or `Error` (typed failure).
//! Both are terminal. The transcript gains the user entry at submission and
//! the assistant entry only on success; a failed turn never enters the
//! model's context.

use confab_core::{
    Author, ChatMessage, ChatRole, ConfabError, DeliveryStatus, DisplayMessage, Draft, MessageId,
};
use tracing::debug;

/// Fixed text shown on a placeholder while its network call is outstanding.
pub const PLACEHOLDER_TEXT: &str = "awaiting reply";

/// Display-only warning appended at startup when no credential is available.
pub const MISSING_CREDENTIAL_WARNING: &str = "No API key detected. Set the DEEPSEEK_API_KEY \
     environment variable or add deepseek.api_key to confab.toml before sending messages.";

/// The result of accepting a non-empty draft: everything the async layer
/// needs to run the turn and reconcile it later.
#[derive(Debug)]
pub struct Submission {
    /// Identity of the placeholder to reconcile when the call completes.
    pub placeholder: MessageId,
    /// The original draft, carried into `Error` status for a future retry.
    pub draft: Draft,
    /// Transcript snapshot at submission time, including the just-appended
    /// user entry. Later-arriving unrelated turns do not change it.
    pub transcript: Vec<ChatMessage>,
    /// The user message appended by this submission, for event emission.
    pub user_message: DisplayMessage,
    /// The placeholder appended by this submission, for event emission.
    pub placeholder_message: DisplayMessage,
}

/// Owns one display list and one transcript, kept consistent turn by turn.
///
/// Both lists are append-ordered; the only in-place mutation is the
/// text/status update of a placeholder in [`Conversation::resolve`].
#[derive(Debug)]
pub struct Conversation {
    display: Vec<DisplayMessage>,
    transcript: Vec<ChatMessage>,
}

impl Conversation {
    /// Creates a conversation seeded with the behavioral prime and a welcome
    /// assistant turn. The welcome text appears in both lists; the prime
    /// only in the transcript.
    ///
    /// When `backend_configured` is false, a display-only warning is
    /// appended so the user learns up front that sends will fail.
    pub fn new(system_prompt: &str, welcome_text: &str, backend_configured: bool) -> Self {
        let mut display = vec![DisplayMessage::new(
            MessageId::random(),
            Author::Assistant,
            DeliveryStatus::Sent,
            welcome_text,
        )];
        let transcript = vec![
            ChatMessage::new(ChatRole::System, system_prompt),
            ChatMessage::new(ChatRole::Assistant, welcome_text),
        ];

        if !backend_configured {
            display.push(DisplayMessage::new(
                MessageId::random(),
                Author::Assistant,
                DeliveryStatus::Sent,
                MISSING_CREDENTIAL_WARNING,
            ));
        }

        Self { display, transcript }
    }

    /// The live, ordered display message list.
    pub fn messages(&self) -> &[DisplayMessage] {
        &self.display
    }

    /// The API-shaped transcript.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Accepts a draft and moves the turn into its submitted state.
    ///
    /// Empty-after-trim drafts are ignored: no state change, and `None`
    /// tells the caller not to issue a network call. Otherwise the user
    /// message (status `Sent`, id from the draft or freshly generated) and a
    /// `Sending` placeholder are appended atomically, and the user entry
    /// joins the transcript.
    pub fn submit(&mut self, draft: Draft) -> Option<Submission> {
        let text = draft.text.trim();
        if text.is_empty() {
            debug!("ignoring empty draft");
            return None;
        }

        let user_id = draft.id.clone().unwrap_or_else(MessageId::random);
        let user_message =
            DisplayMessage::new(user_id, Author::User, DeliveryStatus::Sent, text);
        self.display.push(user_message.clone());
        self.transcript.push(ChatMessage::new(ChatRole::User, text));

        let placeholder_message = DisplayMessage::new(
            MessageId::random(),
            Author::Assistant,
            DeliveryStatus::Sending,
            PLACEHOLDER_TEXT,
        );
        let placeholder = placeholder_message.id.clone();
        self.display.push(placeholder_message.clone());

        debug!(placeholder = %placeholder.0, "turn submitted");

        Some(Submission {
            placeholder,
            draft,
            transcript: self.transcript.clone(),
            user_message,
            placeholder_message,
        })
    }

    /// Reconciles a completed turn into its placeholder.
    ///
    /// On success the reply joins the transcript and the placeholder becomes
    /// a `Sent` assistant message carrying the reply text. On failure the
    /// placeholder becomes `Error` (retaining the original draft) with a
    /// human-readable description; the transcript is untouched.
    ///
    /// Lookup is by identity; an unknown placeholder is a no-op. Returns the
    /// updated message for event emission.
    pub fn resolve(
        &mut self,
        placeholder: &MessageId,
        draft: Draft,
        outcome: Result<String, ConfabError>,
    ) -> Option<DisplayMessage> {
        let index = self.display.iter().position(|m| &m.id == placeholder)?;
        let existing = &self.display[index];

        // Only text and status change; identity, authorship, timestamp, and
        // metadata are carried over unchanged.
        let updated = match outcome {
            Ok(reply) => {
                self.transcript
                    .push(ChatMessage::new(ChatRole::Assistant, reply.clone()));
                DisplayMessage {
                    id: existing.id.clone(),
                    author: existing.author,
                    status: DeliveryStatus::Sent,
                    created_at: existing.created_at,
                    text: reply,
                    metadata: existing.metadata.clone(),
                }
            }
            Err(error) => {
                debug!(placeholder = %placeholder.0, error = %error, "turn failed");
                DisplayMessage {
                    id: existing.id.clone(),
                    author: existing.author,
                    status: DeliveryStatus::Error(draft),
                    created_at: existing.created_at,
                    text: format!("failed: {error}"),
                    metadata: existing.metadata.clone(),
                }
            }
        };

        self.display[index] = updated.clone();
        Some(updated)
    }
}
