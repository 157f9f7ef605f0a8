// SPDX-FileCopyrightText: 2026 Confab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DeepSeek chat-completions backend for Confab.
//!
//! Implements [`confab_core::ChatBackend`] for the DeepSeek API: credential
//! resolution, request construction, and response/error decoding. Stateless
//! per call, single attempt, every failure a typed value.

pub mod client;
pub mod types;

pub use client::{CREDENTIAL_ENV, DeepSeekClient};
