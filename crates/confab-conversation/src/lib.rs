// SPDX-FileCopyrightText: 2026 Confab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation orchestration core for Confab.
//!
//! Two layers: [`conversation::Conversation`] is the pure state machine
//! owning the display list and the API-shaped transcript;
//! [`actor::ConversationActor`] wraps it in a single-owner tokio task,
//! dispatches one fire-and-forget backend call per submitted turn, and
//! publishes change events for the rendering layer.

pub mod actor;
pub mod conversation;

pub use actor::{ConversationActor, ConversationEvent, ConversationHandle};
pub use conversation::{Conversation, MISSING_CREDENTIAL_WARNING, PLACEHOLDER_TEXT, Submission};
