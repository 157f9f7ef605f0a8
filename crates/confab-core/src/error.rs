// SPDX-FileCopyrightText: 2026 Confab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Confab chat front-end.

use thiserror::Error;

/// The primary error type used across the Confab workspace.
///
/// The first four variants form the chat-call taxonomy: every failure of a
/// single backend call maps onto exactly one of them, and each renders
/// distinct display text so the conversation layer can surface a specific
/// message rather than a generic failure.
#[derive(Debug, Error)]
pub enum ConfabError {
    /// No API credential is configured. Raised before any network activity.
    #[error("no API key configured: pass one explicitly or set the DEEPSEEK_API_KEY environment variable")]
    MissingCredential,

    /// The transport did not yield a well-formed HTTP response, or the
    /// success body failed to decode.
    #[error("invalid response from server: {0}")]
    InvalidResponse(String),

    /// The server answered with a non-2xx status. The body is preserved
    /// verbatim for the caller to surface.
    #[error("server error ({status}): {body}")]
    ServerError { status: u16, body: String },

    /// The model returned no choices, or a reply that was empty after
    /// trimming.
    #[error("the model returned an empty reply")]
    EmptyReply,

    /// Configuration errors (invalid TOML, unknown fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
