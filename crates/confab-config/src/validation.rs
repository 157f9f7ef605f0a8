// SPDX-FileCopyrightText: 2026 Confab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for values serde cannot check.

use confab_core::ConfabError;

use crate::model::ConfabConfig;

const KNOWN_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validates a deserialized config.
///
/// Returns all problems at once so the user can fix them in one pass.
pub fn validate_config(config: &ConfabConfig) -> Result<(), Vec<ConfabError>> {
    let mut errors = Vec::new();

    let level = config.agent.log_level.trim().to_ascii_lowercase();
    if !KNOWN_LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfabError::Config(format!(
            "agent.log_level `{}` is not one of {KNOWN_LOG_LEVELS:?}",
            config.agent.log_level
        )));
    }

    if config.deepseek.model.trim().is_empty() {
        errors.push(ConfabError::Config(
            "deepseek.model must not be empty".to_string(),
        ));
    }

    if config.agent.system_prompt.trim().is_empty() {
        errors.push(ConfabError::Config(
            "agent.system_prompt must not be empty".to_string(),
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
