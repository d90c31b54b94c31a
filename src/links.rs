//! Follow-up search links for a finished analysis
//!
//! Plain URL construction for the presentation layer: a shopping search for
//! an identified part and a community forum search for either result.

use crate::models::{AnalysisResult, PartIdentification};
use reqwest::Url;

const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";
const COMMUNITY_SITES: &str = "site:reddit.com OR site:kaffee-netz.de";

fn google_search(params: &[(&str, &str)]) -> Url {
    Url::parse_with_params(GOOGLE_SEARCH_URL, params).expect("static search URL is valid")
}

/// Shopping search for a part, falling back to its name when the model gave
/// no search query.
pub fn shopping_search_url(part: &PartIdentification) -> Url {
    let query = if part.search_query.trim().is_empty() {
        part.part_name.as_str()
    } else {
        part.search_query.as_str()
    };
    google_search(&[("tbm", "shop"), ("q", query)])
}

pub fn community_search_url(result: &AnalysisResult) -> Url {
    let query = match result {
        AnalysisResult::Part(part) => format!("{} {} problem", COMMUNITY_SITES, part.part_name),
        AnalysisResult::Error(diagnosis) => format!(
            "{} {} {}",
            COMMUNITY_SITES, diagnosis.error_code, diagnosis.description
        ),
    };
    google_search(&[("q", query.as_str())])
}
