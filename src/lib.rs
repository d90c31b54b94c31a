//! Appliance diagnosis from photos and sound recordings
//!
//! Sends a captured image or audio clip of a malfunctioning coffee machine to
//! Gemini with a mode- and language-specific prompt and decodes the reply into
//! either a spare-part identification or an error diagnosis.

pub mod ai;
pub mod error;
pub mod links;
pub mod media;
pub mod models;
pub mod prompts;

pub use ai::{AnalysisService, AnalysisTransport};
pub use error::{Error, Result};
pub use models::{AnalysisMode, AnalysisResult, Language};
