use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion-provider credentials.
///
/// Both keys are optional; when both are present Groq wins (it serves
/// the same chat-completions wire format with much lower latency).
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default, skip_serializing)]
    pub openai_api_key: String,
    #[serde(default, skip_serializing)]
    pub groq_api_key: String,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field(
                "openai_api_key",
                &redact(&self.openai_api_key),
            )
            .field("groq_api_key", &redact(&self.groq_api_key))
            .finish()
    }
}

fn redact(key: &str) -> &'static str {
    if key.is_empty() {
        "<unset>"
    } else {
        "[REDACTED]"
    }
}

impl LlmConfig {
    pub fn is_configured(&self) -> bool {
        !self.openai_api_key.is_empty() || !self.groq_api_key.is_empty()
    }
}
