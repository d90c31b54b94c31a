//! Data models and structures
//!
//! Defines the analysis modes, languages, media payloads and the tagged
//! analysis result handed to callers, plus environment configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which diagnostic task is requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMode {
    Part,
    ErrorCode,
    Audio,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 3] = [
        AnalysisMode::Part,
        AnalysisMode::ErrorCode,
        AnalysisMode::Audio,
    ];

    /// Whether a response without a `type` discriminator resolves to an
    /// error diagnosis.
    pub fn defaults_to_error(self) -> bool {
        matches!(self, AnalysisMode::ErrorCode | AnalysisMode::Audio)
    }
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "part" => Ok(AnalysisMode::Part),
            "error-code" | "error" => Ok(AnalysisMode::ErrorCode),
            "audio" => Ok(AnalysisMode::Audio),
            other => Err(format!(
                "Invalid mode '{}'. Expected one of: part, error-code, audio",
                other
            )),
        }
    }
}

/// Prompt language. Only affects wording, never the response schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "de")]
    German,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::German, Language::English];

    pub fn code(self) -> &'static str {
        match self {
            Language::German => "de",
            Language::English => "en",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::German => "Deutsch",
            Language::English => "English",
        }
    }

    /// Pick a language from a system locale identifier such as `de_DE.UTF-8`.
    /// Anything that does not mention German falls back to English.
    pub fn from_locale(locale: &str) -> Self {
        if locale.to_ascii_lowercase().contains("de") {
            Language::German
        } else {
            Language::English
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "de" | "german" | "deutsch" => Ok(Language::German),
            "en" | "english" => Ok(Language::English),
            other => Err(format!("Invalid language '{}'. Expected: de, en", other)),
        }
    }
}

/// Base64 media attached inline to a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPayload {
    pub mime_type: String,
    pub base64_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartIdentification {
    pub part_name: String,
    pub likely_models: Vec<String>,
    pub search_query: String,
    pub estimated_price_range: String,
    pub confidence: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDiagnosis {
    pub error_code: String,
    pub description: String,
    pub possible_causes: Vec<String>,
    pub suggested_fixes: Vec<String>,
    pub confidence: String,
}

/// Result of one analysis: exactly one of the two shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnalysisResult {
    Part(PartIdentification),
    Error(ErrorDiagnosis),
}

impl AnalysisResult {
    pub fn confidence(&self) -> &str {
        match self {
            AnalysisResult::Part(part) => &part.confidence,
            AnalysisResult::Error(diagnosis) => &diagnosis.confidence,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            AnalysisResult::Part(_) => "part",
            AnalysisResult::Error(_) => "error",
        }
    }
}

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| crate::Error::Config("GEMINI_API_KEY not set".to_string()))?;

        Ok(Self {
            gemini_api_key,
            gemini_model: lookup("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: lookup("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
        })
    }
}
