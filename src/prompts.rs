use crate::models::{AnalysisMode, Language};

pub const PART_DE: &str = include_str!("../data/prompts/part_de.txt");
pub const PART_EN: &str = include_str!("../data/prompts/part_en.txt");
pub const ERROR_CODE_DE: &str = include_str!("../data/prompts/error_code_de.txt");
pub const ERROR_CODE_EN: &str = include_str!("../data/prompts/error_code_en.txt");
pub const AUDIO_DE: &str = include_str!("../data/prompts/audio_de.txt");
pub const AUDIO_EN: &str = include_str!("../data/prompts/audio_en.txt");

/// Instruction template for a mode and language.
pub fn template(mode: AnalysisMode, language: Language) -> &'static str {
    match (mode, language) {
        (AnalysisMode::Part, Language::German) => PART_DE,
        (AnalysisMode::Part, Language::English) => PART_EN,
        (AnalysisMode::ErrorCode, Language::German) => ERROR_CODE_DE,
        (AnalysisMode::ErrorCode, Language::English) => ERROR_CODE_EN,
        (AnalysisMode::Audio, Language::German) => AUDIO_DE,
        (AnalysisMode::Audio, Language::English) => AUDIO_EN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_cells() -> Vec<(AnalysisMode, Language)> {
        AnalysisMode::ALL
            .into_iter()
            .flat_map(|mode| Language::ALL.into_iter().map(move |language| (mode, language)))
            .collect()
    }

    #[test]
    fn test_prompts_are_non_empty() {
        for (mode, language) in all_cells() {
            assert!(
                !template(mode, language).trim().is_empty(),
                "empty template for {:?}/{:?}",
                mode,
                language
            );
        }
    }

    #[test]
    fn test_prompts_are_distinct() {
        let templates: HashSet<&str> = all_cells()
            .into_iter()
            .map(|(mode, language)| template(mode, language))
            .collect();
        assert_eq!(templates.len(), 6);
    }

    #[test]
    fn test_audio_differs_from_error_code() {
        for language in Language::ALL {
            assert_ne!(
                template(AnalysisMode::Audio, language),
                template(AnalysisMode::ErrorCode, language)
            );
        }
    }

    #[test]
    fn test_schema_discriminator_per_mode() {
        for language in Language::ALL {
            assert!(template(AnalysisMode::Part, language).contains("\"type\": \"part\""));
            assert!(template(AnalysisMode::ErrorCode, language).contains("\"type\": \"error\""));
            assert!(template(AnalysisMode::Audio, language).contains("\"type\": \"error\""));
        }
    }

    #[test]
    fn test_every_template_requires_confidence() {
        for (mode, language) in all_cells() {
            assert!(template(mode, language).contains("\"confidence\""));
        }
    }
}
