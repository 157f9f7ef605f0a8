// SPDX-FileCopyrightText: 2026 Confab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the DeepSeek chat-completions API.

use confab_core::ChatMessage;
use serde::{Deserialize, Serialize};

/// Request body: the fixed model identifier plus the full transcript.
///
/// The model is stateless across calls; it only knows what this transcript
/// carries.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
}

/// Success response body: `{"choices": [{"message": {...}}, ...]}`.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

/// The assistant message inside a choice. The role is part of the required
/// wire shape even though only the content is consumed.
#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub role: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_core::ChatRole;

    #[test]
    fn request_serializes_model_and_messages() {
        let transcript = vec![
            ChatMessage::new(ChatRole::System, "prime"),
            ChatMessage::new(ChatRole::User, "hello"),
        ];
        let request = ChatRequest {
            model: "deepseek-chat",
            messages: &transcript,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "deepseek-chat",
                "messages": [
                    {"role": "system", "content": "prime"},
                    {"role": "user", "content": "hello"},
                ],
            })
        );
    }

    #[test]
    fn response_without_message_field_fails_to_decode() {
        let body = r#"{"choices":[{"text":"hi"}]}"#;
        assert!(serde_json::from_str::<ChatResponse>(body).is_err());
    }
}
