use super::types::{Content, GenerateContentRequest, GenerationConfig, InlineData, Part};
use crate::models::MediaPayload;

const JSON_MIME_TYPE: &str = "application/json";

/// Compose a single-turn request: the instruction text, then the inline media.
pub fn build(prompt: &str, payload: MediaPayload) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![
                Part::Text {
                    text: prompt.to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: payload.mime_type,
                        data: payload.base64_data,
                    },
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: Some(JSON_MIME_TYPE.to_string()),
        },
    }
}
