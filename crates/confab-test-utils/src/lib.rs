// SPDX-FileCopyrightText: 2026 Confab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Confab workspace.
//!
//! Provides [`MockBackend`], a scriptable `ChatBackend` implementation for
//! driving the conversation orchestrator without network access.

pub mod mock_backend;

pub use mock_backend::MockBackend;
