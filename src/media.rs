//! Inline media encoding
//!
//! Turns captured image or audio bytes into a base64 payload tagged with a
//! MIME type. Bytes are expected to be resized/compressed by the capture side.

use crate::models::MediaPayload;
use crate::{Error, Result};
use base64::Engine as _;
use std::path::Path;

pub const IMAGE_MIME_TYPE: &str = "image/jpeg";
pub const AUDIO_MIME_TYPE: &str = "audio/mp3";

pub fn encode(bytes: &[u8], mime_type: &str) -> Result<MediaPayload> {
    if bytes.is_empty() {
        return Err(Error::Media("media is empty".to_string()));
    }
    if mime_type.trim().is_empty() {
        return Err(Error::Media("no MIME type declared".to_string()));
    }

    tracing::debug!("Encoding {} bytes of {}", bytes.len(), mime_type);

    Ok(MediaPayload {
        mime_type: mime_type.to_string(),
        base64_data: base64::engine::general_purpose::STANDARD.encode(bytes),
    })
}

/// Read a captured file and encode it. Unreadable files surface as media errors.
pub async fn encode_file(path: impl AsRef<Path>, mime_type: &str) -> Result<MediaPayload> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        tracing::error!("Failed to read media file {}: {}", path.display(), e);
        Error::Media(format!("could not read {}: {}", path.display(), e))
    })?;
    encode(&bytes, mime_type)
}
