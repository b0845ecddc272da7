//! Call summarization for warm transfers.
//!
//! Accumulates free-text context lines per call and, on demand, asks an
//! OpenAI-compatible completion backend for a short agent-facing
//! summary. Summarization is never fatal: missing context, a missing
//! backend, and provider failures all come back as descriptive summary
//! strings rather than errors.

pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod service;

pub use backend::CompletionBackend;
pub use config::LlmConfig;
pub use context::ContextLog;
pub use error::SummaryError;
pub use service::{SummaryService, NOT_CONFIGURED_SUMMARY, NO_CONTEXT_SUMMARY};
