//! Error handling and custom error types
//!
//! Provides unified error handling across the analysis pipeline using thiserror.

use crate::models::AnalysisMode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Media error: {0}")]
    Media(String),

    #[error("Gemini API error (status {status}): {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("No usable model output: {0}")]
    Envelope(String),

    #[error("Failed to decode analysis: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Mode {0:?} cannot be used for image analysis")]
    UnsupportedMode(AnalysisMode),
}

impl Error {
    /// True when the provider answered successfully but produced no content,
    /// e.g. because of safety filtering.
    pub fn is_refusal(&self) -> bool {
        matches!(self, Error::Envelope(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
