// SPDX-FileCopyrightText: 2026 Confab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend trait for remote chat-completion providers.

use async_trait::async_trait;

use crate::error::ConfabError;
use crate::types::ChatMessage;

/// A remote chat endpoint capable of completing a transcript.
///
/// Implementations are stateless per call: `send_chat` is a pure function of
/// (credential, transcript), retains nothing between calls, performs no
/// retries, and returns every failure as a typed [`ConfabError`] value.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Whether a credential is available, without attempting a call.
    ///
    /// When this returns `false`, every `send_chat` fails with
    /// [`ConfabError::MissingCredential`] before any network activity.
    fn is_configured(&self) -> bool;

    /// Sends the full ordered transcript and returns the assistant's reply
    /// text, trimmed of surrounding whitespace.
    async fn send_chat(&self, transcript: &[ChatMessage]) -> Result<String, ConfabError>;
}
