//! Decoding of Gemini replies into analysis results.
//!
//! The model is asked for raw JSON but may still wrap it in markdown fences,
//! omit the `type` discriminator, or leave out detail fields. Decoding runs in
//! four stages, each with its own failure:
//!
//! 1. [`unwrap_envelope`] pulls the first text part out of the response
//!    ([`Error::Envelope`] when there is none).
//! 2. [`strip_fences`] removes leading/trailing code fences.
//! 3. [`parse_raw`] reads the permissive shape ([`Error::Decode`] on invalid
//!    JSON or a missing `confidence`).
//! 4. [`resolve`] picks the variant and fills in placeholders.

use super::types::GenerateContentResponse;
use crate::models::{AnalysisResult, ErrorDiagnosis, PartIdentification};
use crate::{Error, Result};
use serde::Deserialize;

const FENCE: &str = "```";

pub const UNKNOWN_ERROR_CODE: &str = "Unknown Error";
pub const NO_DESCRIPTION: &str = "No description available";
pub const UNKNOWN_PART: &str = "Unknown Part";
pub const NO_PRICE_RANGE: &str = "N/A";

/// Both schemas' fields on one structure. Only `confidence` is mandatory.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysis {
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub part_name: Option<String>,
    pub likely_models: Option<Vec<String>>,
    pub search_query: Option<String>,
    pub estimated_price_range: Option<String>,

    pub error_code: Option<String>,
    pub description: Option<String>,
    pub possible_causes: Option<Vec<String>>,
    pub suggested_fixes: Option<Vec<String>>,

    pub confidence: String,
}

pub fn decode(raw: &[u8], default_to_error: bool) -> Result<AnalysisResult> {
    let text = unwrap_envelope(raw)?;
    let cleaned = strip_fences(&text);
    if cleaned.len() != text.trim().len() {
        tracing::warn!("Model wrapped its JSON in markdown fences");
    }
    let parsed = parse_raw(&cleaned)?;
    Ok(resolve(parsed, default_to_error))
}

/// Extract the first candidate's first text part.
pub fn unwrap_envelope(raw: &[u8]) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_slice(raw).map_err(|e| {
        tracing::error!(
            "Failed to parse Gemini response: {}\nBody: {}",
            e,
            String::from_utf8_lossy(raw)
        );
        Error::Envelope(format!("unrecognized response structure: {}", e))
    })?;

    let Some(candidate) = response.candidates.first() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(Error::Envelope(format!("no content in response ({})", reason)));
    };

    candidate
        .content
        .as_ref()
        .and_then(|content| content.parts.iter().find_map(|p| p.text.clone()))
        .ok_or_else(|| {
            let reason = candidate.finish_reason.as_deref().unwrap_or("no text part");
            Error::Envelope(format!("no content in response ({})", reason))
        })
}

/// Remove markdown code fences around the model's JSON and trim whitespace.
///
/// Runs to a fixed point, so applying it twice gives the same result as once.
pub fn strip_fences(text: &str) -> String {
    let mut current = text.trim();
    loop {
        let before = current.len();

        if let Some(rest) = current.strip_prefix(FENCE) {
            current = strip_language_tag(rest).trim();
        }
        if let Some(rest) = current.strip_suffix(FENCE) {
            current = rest.trim();
        }

        if current.len() == before {
            return current.to_string();
        }
    }
}

fn strip_language_tag(text: &str) -> &str {
    match text.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &text[4..],
        _ => text,
    }
}

pub fn parse_raw(text: &str) -> Result<RawAnalysis> {
    serde_json::from_str(text).map_err(|e| {
        tracing::error!("Failed to parse analysis JSON: {}\nText: {}", e, text);
        Error::Decode(e.to_string())
    })
}

/// Resolve the permissive shape into one result variant, defaulting
/// missing detail fields.
pub fn resolve(raw: RawAnalysis, default_to_error: bool) -> AnalysisResult {
    let tagged_error = raw.kind.as_deref() == Some("error");

    if tagged_error || default_to_error {
        if !tagged_error {
            tracing::warn!(
                "Response type {:?} resolved as error diagnosis by mode default",
                raw.kind
            );
        }
        AnalysisResult::Error(ErrorDiagnosis {
            error_code: raw
                .error_code
                .unwrap_or_else(|| UNKNOWN_ERROR_CODE.to_string()),
            description: raw.description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            possible_causes: raw.possible_causes.unwrap_or_default(),
            suggested_fixes: raw.suggested_fixes.unwrap_or_default(),
            confidence: raw.confidence,
        })
    } else {
        AnalysisResult::Part(PartIdentification {
            part_name: raw.part_name.unwrap_or_else(|| UNKNOWN_PART.to_string()),
            likely_models: raw.likely_models.unwrap_or_default(),
            search_query: raw.search_query.unwrap_or_default(),
            estimated_price_range: raw
                .estimated_price_range
                .unwrap_or_else(|| NO_PRICE_RANGE.to_string()),
            confidence: raw.confidence,
        })
    }
}
