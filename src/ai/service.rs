//! Analysis facade composing prompt selection, media encoding, transport and
//! decoding.

use super::gemini::{decode, request};
use super::{AnalysisTransport, GeminiHttpClient};
use crate::media::{self, AUDIO_MIME_TYPE, IMAGE_MIME_TYPE};
use crate::models::{AnalysisMode, AnalysisResult, Config, Language, MediaPayload};
use crate::{prompts, Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Explicitly constructed analysis service.
///
/// Holds no state besides its transport. Overlapping calls are not
/// coordinated; callers that need at most one analysis in flight must
/// enforce that themselves. Dropping a returned future abandons the call.
pub struct AnalysisService {
    transport: Box<dyn AnalysisTransport>,
}

impl AnalysisService {
    pub fn with_transport(transport: Box<dyn AnalysisTransport>) -> Self {
        Self { transport }
    }

    /// Build a Gemini-backed service from environment configuration.
    pub fn from_config(config: &Config) -> Self {
        info!("Analysis provider: Gemini (model: {})", config.gemini_model);
        Self::with_transport(Box::new(GeminiHttpClient::from_config(config)))
    }

    /// Analyze a photo of a spare part or an error display.
    pub async fn analyze_image(
        &self,
        image_bytes: &[u8],
        mode: AnalysisMode,
        language: Language,
    ) -> Result<AnalysisResult> {
        ensure_image_mode(mode)?;
        let payload = media::encode(image_bytes, IMAGE_MIME_TYPE)?;
        self.analyze(payload, mode, language).await
    }

    /// Analyze a sound recording. Always resolves to an error diagnosis.
    pub async fn analyze_audio(
        &self,
        audio_bytes: &[u8],
        language: Language,
    ) -> Result<AnalysisResult> {
        let payload = media::encode(audio_bytes, AUDIO_MIME_TYPE)?;
        self.analyze(payload, AnalysisMode::Audio, language).await
    }

    pub async fn analyze_image_file(
        &self,
        path: impl AsRef<Path>,
        mode: AnalysisMode,
        language: Language,
    ) -> Result<AnalysisResult> {
        ensure_image_mode(mode)?;
        let payload = media::encode_file(path, IMAGE_MIME_TYPE).await?;
        self.analyze(payload, mode, language).await
    }

    pub async fn analyze_audio_file(
        &self,
        path: impl AsRef<Path>,
        language: Language,
    ) -> Result<AnalysisResult> {
        let payload = media::encode_file(path, AUDIO_MIME_TYPE).await?;
        self.analyze(payload, AnalysisMode::Audio, language).await
    }

    async fn analyze(
        &self,
        payload: MediaPayload,
        mode: AnalysisMode,
        language: Language,
    ) -> Result<AnalysisResult> {
        debug!(
            "Analyzing {} ({} base64 chars) in {:?} mode, language {}",
            payload.mime_type,
            payload.base64_data.len(),
            mode,
            language
        );

        let request = request::build(prompts::template(mode, language), payload);
        let raw = self.transport.send(&request).await?;
        let result = decode::decode(&raw, mode.defaults_to_error())?;

        info!(
            "Analysis complete: {} (confidence: {})",
            result.variant_name(),
            result.confidence()
        );
        Ok(result)
    }
}

fn ensure_image_mode(mode: AnalysisMode) -> Result<()> {
    match mode {
        AnalysisMode::Part | AnalysisMode::ErrorCode => Ok(()),
        AnalysisMode::Audio => Err(Error::UnsupportedMode(mode)),
    }
}
