//! Generative-AI integration for appliance diagnosis
//!
//! Packages captured media into Gemini `generateContent` requests and decodes
//! the model's JSON reply into an [`AnalysisResult`](crate::models::AnalysisResult).

pub mod gemini;
pub mod mock;
pub mod service;

pub use gemini::GeminiHttpClient;
pub use mock::MockTransport;
pub use service::AnalysisService;

use crate::Result;
use async_trait::async_trait;
use gemini::types::GenerateContentRequest;

/// Sends one request body to the provider and returns the raw response body.
///
/// Implementations make exactly one attempt.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn send(&self, request: &GenerateContentRequest) -> Result<Vec<u8>>;
}
