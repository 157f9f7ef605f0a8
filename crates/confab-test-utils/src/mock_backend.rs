// SPDX-FileCopyrightText: 2026 Confab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat backend for deterministic testing.
//!
//! `MockBackend` implements `ChatBackend` with pre-scripted outcomes,
//! enabling fast, CI-runnable tests without external API calls. An optional
//! gate queue lets a test hold individual calls open and release them in a
//! chosen order, for out-of-order completion tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, oneshot};

use confab_core::{ChatBackend, ChatMessage, ChatRole, ConfabError};

/// A mock backend that returns pre-scripted outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty, in echo
/// mode the reply names the last user entry of the transcript ("echo:
/// <text>"); otherwise a default "mock reply" text is returned.
pub struct MockBackend {
    configured: bool,
    echo: bool,
    outcomes: Arc<Mutex<VecDeque<Result<String, ConfabError>>>>,
    gates: Arc<Mutex<VecDeque<oneshot::Receiver<()>>>>,
    calls: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Create a configured mock with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            configured: true,
            echo: false,
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            gates: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock pre-loaded with successful replies.
    pub fn with_replies(replies: Vec<&str>) -> Self {
        Self::with_outcomes(replies.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    /// Create a mock pre-loaded with arbitrary outcomes.
    pub fn with_outcomes(outcomes: Vec<Result<String, ConfabError>>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from(outcomes))),
            ..Self::new()
        }
    }

    /// Create a mock that reports no credential and fails every call with
    /// `MissingCredential`.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Create a mock whose default reply echoes the last user entry, so a
    /// reply identifies the prompt that produced it.
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::new()
        }
    }

    /// Queue an outcome at the end of the script.
    pub async fn push_outcome(&self, outcome: Result<String, ConfabError>) {
        self.outcomes.lock().await.push_back(outcome);
    }

    /// Add a gate for the next un-gated call, in call-arrival order.
    ///
    /// The corresponding `send_chat` waits until the returned sender fires
    /// (or is dropped) before producing its outcome.
    pub async fn add_gate(&self) -> oneshot::Sender<()> {
        let (release, wait) = oneshot::channel();
        self.gates.lock().await.push_back(wait);
        release
    }

    /// Number of `send_chat` calls observed, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send_chat(&self, transcript: &[ChatMessage]) -> Result<String, ConfabError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.configured {
            return Err(ConfabError::MissingCredential);
        }

        let gate = self.gates.lock().await.pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if let Some(outcome) = self.outcomes.lock().await.pop_front() {
            return outcome;
        }

        if self.echo {
            let last_user = transcript
                .iter()
                .rev()
                .find(|m| m.role == ChatRole::User)
                .map(|m| m.content.as_str())
                .unwrap_or("<no user entry>");
            return Ok(format!("echo: {last_user}"));
        }

        Ok("mock reply".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(user_text: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::new(ChatRole::System, "prime"),
            ChatMessage::new(ChatRole::User, user_text),
        ]
    }

    #[tokio::test]
    async fn scripted_outcomes_pop_in_order() {
        let mock = MockBackend::new();
        mock.push_outcome(Ok("first".into())).await;
        mock.push_outcome(Err(ConfabError::EmptyReply)).await;

        assert_eq!(mock.send_chat(&transcript("a")).await.unwrap(), "first");
        assert!(matches!(
            mock.send_chat(&transcript("b")).await.unwrap_err(),
            ConfabError::EmptyReply
        ));
        // Exhausted script falls back to the default reply.
        assert_eq!(mock.send_chat(&transcript("c")).await.unwrap(), "mock reply");
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn echo_mode_names_the_prompt() {
        let mock = MockBackend::echoing();
        let reply = mock.send_chat(&transcript("what is rust?")).await.unwrap();
        assert_eq!(reply, "echo: what is rust?");
    }

    #[tokio::test]
    async fn unconfigured_mock_fails_every_call() {
        let mock = MockBackend::unconfigured();
        assert!(!mock.is_configured());
        assert!(matches!(
            mock.send_chat(&transcript("a")).await.unwrap_err(),
            ConfabError::MissingCredential
        ));
    }

    #[tokio::test]
    async fn gated_call_waits_for_release() {
        let mock = Arc::new(MockBackend::with_replies(vec!["gated"]));
        let release = mock.add_gate().await;

        let call = {
            let mock = Arc::clone(&mock);
            tokio::spawn(async move { mock.send_chat(&transcript("a")).await })
        };

        // The call is parked on the gate until we release it.
        release.send(()).unwrap();
        assert_eq!(call.await.unwrap().unwrap(), "gated");
    }
}
