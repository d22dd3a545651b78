// src/error.rs
//! Typed failure taxonomy for the analysis pipeline.
//!
//! Every stage returns `Result<_, AnalyzeError>`; the HTTP boundary maps each
//! variant to a status code and `{"error": ...}` body, the CLI prints the
//! same body on stdout. Nothing in the pipeline panics on bad input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    /// Normalization stripped everything; nothing left to score.
    #[error("No valid text content found")]
    EmptyContent,

    /// Model or tokenizer artifact missing/unreadable.
    #[error("Model not loaded")]
    ModelUnavailable,

    /// Missing or malformed request field.
    #[error("{0}")]
    InvalidInput(String),

    /// URL could not be resolved into text.
    #[error("{0}")]
    SourceResolution(String),

    /// Scorer invocation or content fetch exceeded the request timeout.
    #[error("Request timed out")]
    Timeout,

    /// Catch-all; logged with full context, surfaced as a generic message.
    #[error("Server error: {0}")]
    Unexpected(String),
}

impl AnalyzeError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::SourceResolution(msg.into())
    }
}
