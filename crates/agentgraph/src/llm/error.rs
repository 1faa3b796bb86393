//! LLM call errors.

use thiserror::Error;

/// Errors returned by `LlmClient` implementations.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// API returned an error (4xx/5xx or a business error).
    #[error("api error: {0}")]
    ApiError(String),

    /// Rate limited (429).
    #[error("rate limit: {0}")]
    RateLimit(String),

    /// Authentication failed (401/403) or no key configured.
    #[error("auth failed: {0}")]
    Auth(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// Response could not be parsed.
    #[error("parsing failed: {0}")]
    Parsing(String),
}
