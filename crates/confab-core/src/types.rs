// SPDX-FileCopyrightText: 2026 Confab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared between the backend client and the conversation
//! orchestrator.
//!
//! Two message shapes coexist deliberately. [`ChatMessage`] is the
//! API-shaped transcript entry sent to the model on every call;
//! [`DisplayMessage`] is the UI-shaped entry shown to the user, with its own
//! identity space and delivery status. The two lists are related but not
//! isomorphic: in-flight placeholders and failed turns exist only on the
//! display side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a display message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generates a fresh random identifier.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Role of a transcript entry, as the wire protocol spells it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One entry of the API-shaped transcript.
///
/// The transcript is append-only and strictly ordered: exactly one `system`
/// entry first, then `user`/`assistant` entries as they occur. Entries are
/// never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Who a display message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    /// The person typing into this client.
    User,
    /// The remote model.
    Assistant,
}

/// Delivery status of a display message.
///
/// `Error` carries the original draft so a later retry remains possible
/// even though no retry is issued automatically. `Sent` and `Error` are
/// terminal per turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// A network call for this entry is still outstanding.
    Sending,
    Sent,
    Error(Draft),
}

/// One entry of the UI-shaped message list.
///
/// `id` is unique within the list for the lifetime of the conversation. The
/// list is append-ordered; the only in-place mutation is the text/status
/// update of a placeholder when its turn resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage {
    pub id: MessageId,
    pub author: Author,
    pub status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
    pub text: String,
    /// Renderer-owned extras (attachments, reactions). Opaque to the core.
    pub metadata: Option<serde_json::Value>,
}

impl DisplayMessage {
    /// Builds a new message with a current timestamp and no metadata.
    pub fn new(id: MessageId, author: Author, status: DeliveryStatus, text: impl Into<String>) -> Self {
        Self {
            id,
            author,
            status,
            created_at: Utc::now(),
            text: text.into(),
            metadata: None,
        }
    }
}

/// An outgoing draft as submitted by the UI collaborator.
///
/// The optional `id` is reused for the user's display message when given,
/// so the UI can pre-assign identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub id: Option<MessageId>,
    pub text: String,
}

impl Draft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }

    pub fn with_id(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            text: text.into(),
        }
    }
}
