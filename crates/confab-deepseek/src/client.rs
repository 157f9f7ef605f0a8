// SPDX-FileCopyrightText: 2026 Confab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the DeepSeek chat-completions API.
//!
//! Provides [`DeepSeekClient`] which handles credential resolution, request
//! construction, and response/error decoding. Each call is a single attempt:
//! retry policy belongs to the caller.

use async_trait::async_trait;
use confab_core::{ChatBackend, ChatMessage, ConfabError};
use tracing::debug;

use crate::types::{ChatRequest, ChatResponse};

/// Base URL for the DeepSeek chat-completions API.
const API_BASE_URL: &str = "https://api.deepseek.com/v1/chat/completions";

/// Environment variable consulted when no explicit API key is supplied.
pub const CREDENTIAL_ENV: &str = "DEEPSEEK_API_KEY";

/// HTTP client for DeepSeek API communication.
///
/// A client without a credential is still constructible so the conversation
/// layer can start and warn the user; every `send_chat` on it fails with
/// [`ConfabError::MissingCredential`] before any network activity.
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl DeepSeekClient {
    /// Creates a new DeepSeek API client.
    ///
    /// The credential is resolved in precedence order: the explicit value
    /// (trimmed; empty treated as absent), then [`CREDENTIAL_ENV`] (same
    /// trimming), else absent.
    pub fn new(api_key: Option<&str>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: resolve_credential(api_key),
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Returns the model identifier sent on every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }
}

#[async_trait]
impl ChatBackend for DeepSeekClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send_chat(&self, transcript: &[ChatMessage]) -> Result<String, ConfabError> {
        let Some(api_key) = &self.api_key else {
            return Err(ConfabError::MissingCredential);
        };

        let payload = ChatRequest {
            model: &self.model,
            messages: transcript,
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ConfabError::InvalidResponse(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        debug!(status = %status, messages = transcript.len(), "chat completion response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConfabError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| {
            ConfabError::InvalidResponse(format!("failed to read response body: {e}"))
        })?;
        let decoded: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            ConfabError::InvalidResponse(format!("failed to parse API response: {e}"))
        })?;

        // Only the first choice is consulted; later choices are ignored.
        let Some(choice) = decoded.choices.into_iter().next() else {
            return Err(ConfabError::EmptyReply);
        };

        let reply = choice.message.content.trim();
        if reply.is_empty() {
            return Err(ConfabError::EmptyReply);
        }
        Ok(reply.to_string())
    }
}

/// Resolves the bearer credential: explicit value, then environment, then
/// absent. Both sources are trimmed, with empty treated as absent.
fn resolve_credential(explicit: Option<&str>) -> Option<String> {
    if let Some(key) = explicit {
        let trimmed = key.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }

    std::env::var(CREDENTIAL_ENV).ok().and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_core::ChatRole;
    use serial_test::serial;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> DeepSeekClient {
        DeepSeekClient::new(Some("test-api-key"), "deepseek-chat")
            .with_base_url(base_url.to_string())
    }

    fn test_transcript() -> Vec<ChatMessage> {
        vec![
            ChatMessage::new(ChatRole::System, "You are a test assistant."),
            ChatMessage::new(ChatRole::User, "Hello"),
        ]
    }

    #[tokio::test]
    async fn send_chat_returns_trimmed_first_choice() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": "  hi there  "}},
                {"message": {"role": "assistant", "content": "ignored"}},
            ]
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let reply = client.send_chat(&test_transcript()).await.unwrap();
        assert_eq!(reply, "hi there");
    }

    #[tokio::test]
    async fn send_chat_fails_on_empty_choices() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.send_chat(&test_transcript()).await.unwrap_err();
        assert!(matches!(err, ConfabError::EmptyReply), "got: {err}");
    }

    #[tokio::test]
    async fn send_chat_fails_on_whitespace_only_reply() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "   \n\t "}}]
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.send_chat(&test_transcript()).await.unwrap_err();
        assert!(matches!(err, ConfabError::EmptyReply), "got: {err}");
    }

    #[tokio::test]
    async fn send_chat_preserves_server_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.send_chat(&test_transcript()).await.unwrap_err();
        match err {
            ConfabError::ServerError { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("expected ServerError, got: {other}"),
        }
    }

    #[tokio::test]
    async fn send_chat_fails_on_malformed_success_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.send_chat(&test_transcript()).await.unwrap_err();
        assert!(matches!(err, ConfabError::InvalidResponse(_)), "got: {err}");
    }

    #[tokio::test]
    async fn send_chat_sends_bearer_auth_and_full_transcript() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "ok"}}]
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "model": "deepseek-chat",
                "messages": [
                    {"role": "system", "content": "You are a test assistant."},
                    {"role": "user", "content": "Hello"},
                ],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.send_chat(&test_transcript()).await;
        assert!(result.is_ok(), "request shape should match: {result:?}");
    }

    #[tokio::test]
    #[serial]
    async fn unconfigured_client_never_touches_the_network() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        // No explicit key, no env key.
        unsafe { std::env::remove_var(CREDENTIAL_ENV) };
        let client = DeepSeekClient::new(None, "deepseek-chat")
            .with_base_url(server.uri());
        assert!(!client.is_configured());

        let err = client.send_chat(&test_transcript()).await.unwrap_err();
        assert!(matches!(err, ConfabError::MissingCredential), "got: {err}");
    }

    #[test]
    #[serial]
    fn explicit_credential_is_trimmed() {
        unsafe { std::env::remove_var(CREDENTIAL_ENV) };
        let client = DeepSeekClient::new(Some("  sk-explicit  "), "deepseek-chat");
        assert!(client.is_configured());
        assert_eq!(client.api_key.as_deref(), Some("sk-explicit"));
    }

    #[test]
    #[serial]
    fn blank_explicit_credential_falls_back_to_env() {
        unsafe { std::env::set_var(CREDENTIAL_ENV, " sk-from-env ") };
        let client = DeepSeekClient::new(Some("   "), "deepseek-chat");
        assert_eq!(client.api_key.as_deref(), Some("sk-from-env"));
        unsafe { std::env::remove_var(CREDENTIAL_ENV) };
    }

    #[test]
    #[serial]
    fn blank_env_credential_is_absent() {
        unsafe { std::env::set_var(CREDENTIAL_ENV, "   ") };
        let client = DeepSeekClient::new(None, "deepseek-chat");
        assert!(!client.is_configured());
        unsafe { std::env::remove_var(CREDENTIAL_ENV) };
    }
}
