use crate::backend::CompletionBackend;
use crate::config::LlmConfig;
use crate::context::ContextLog;

/// Sentinel returned when a session never recorded any context.
pub const NO_CONTEXT_SUMMARY: &str = "No call context available";

/// Sentinel returned when neither provider key is configured.
pub const NOT_CONFIGURED_SUMMARY: &str = "LLM service not configured. Please add API keys.";

const SYSTEM_PROMPT: &str = "You are an AI assistant that creates concise call summaries for \
     warm transfers. Summarize the key points, customer needs, and context that would be \
     helpful for the next agent.";

const SUMMARY_MAX_TOKENS: u32 = 200;
const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Accumulates call context and produces warm-transfer summaries.
///
/// Summarization never fails: every degraded path (no context, no
/// backend, provider error) yields a descriptive summary string.
pub struct SummaryService {
    contexts: ContextLog,
    backend: Option<CompletionBackend>,
}

impl SummaryService {
    pub fn new(config: LlmConfig) -> Self {
        let backend = if !config.groq_api_key.is_empty() {
            Some(CompletionBackend::groq(config.groq_api_key))
        } else if !config.openai_api_key.is_empty() {
            Some(CompletionBackend::openai(config.openai_api_key))
        } else {
            tracing::warn!("no completion provider configured, summaries will be placeholders");
            None
        };
        Self {
            contexts: ContextLog::new(),
            backend,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Appends a context line for the session.
    pub fn add_context(&self, session_id: &str, message: &str) {
        self.contexts.append(session_id, message);
    }

    /// Drops a session's context once the call has ended.
    pub fn discard_context(&self, session_id: &str) {
        self.contexts.discard(session_id);
    }

    /// Generates the warm-transfer summary for a session.
    pub async fn summarize(&self, session_id: &str) -> String {
        let Some(context) = self.contexts.joined(session_id) else {
            return NO_CONTEXT_SUMMARY.to_string();
        };

        let Some(backend) = &self.backend else {
            return NOT_CONFIGURED_SUMMARY.to_string();
        };

        let user_prompt =
            format!("Please summarize this call context for a warm transfer:\n\n{context}");

        match backend
            .complete(
                SYSTEM_PROMPT,
                &user_prompt,
                SUMMARY_MAX_TOKENS,
                SUMMARY_TEMPERATURE,
            )
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(session_id, "failed to generate summary: {}", e);
                format!("Failed to generate summary: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_context_yields_the_exact_sentinel() {
        let service = SummaryService::new(LlmConfig::default());
        assert_eq!(service.summarize("s1").await, "No call context available");
    }

    #[tokio::test]
    async fn context_without_backend_yields_not_configured() {
        let service = SummaryService::new(LlmConfig::default());
        service.add_context("s1", "customer wants refund");
        assert_eq!(
            service.summarize("s1").await,
            "LLM service not configured. Please add API keys."
        );
    }

    #[tokio::test]
    async fn discarded_context_reverts_to_no_context() {
        let service = SummaryService::new(LlmConfig::default());
        service.add_context("s1", "a");
        service.discard_context("s1");
        assert_eq!(service.summarize("s1").await, NO_CONTEXT_SUMMARY);
    }

    #[test]
    fn groq_wins_when_both_keys_are_present() {
        let service = SummaryService::new(LlmConfig {
            openai_api_key: "sk-openai".into(),
            groq_api_key: "gsk-groq".into(),
        });
        assert!(service.is_enabled());
        // Groq's model is selected for the shared wire format.
        assert_eq!(
            service.backend.as_ref().unwrap().model(),
            "llama-3.1-8b-instant"
        );
    }

    #[test]
    fn openai_alone_is_enough() {
        let service = SummaryService::new(LlmConfig {
            openai_api_key: "sk-openai".into(),
            groq_api_key: String::new(),
        });
        assert_eq!(service.backend.as_ref().unwrap().model(), "gpt-3.5-turbo");
    }
}
