// SPDX-FileCopyrightText: 2026 Confab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Confab chat front-end.
//!
//! This crate provides the shared message types, the error taxonomy, and
//! the [`ChatBackend`] trait that remote providers implement. The
//! conversation orchestrator and the DeepSeek client both build on it.

pub mod backend;
pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use backend::ChatBackend;
pub use error::ConfabError;
pub use types::{
    Author, ChatMessage, ChatRole, DeliveryStatus, DisplayMessage, Draft, MessageId,
};
