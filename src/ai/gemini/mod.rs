pub mod client;
pub mod decode;
pub mod request;
pub mod types;

pub use client::GeminiHttpClient;

#[cfg(test)]
pub(crate) mod test_support {
    use wiremock::matchers::{method, path_regex};
    use wiremock::MockBuilder;

    pub const GENERATE_CONTENT_PATH_REGEX: &str = r"^/v1beta/models/[^/]+:generateContent$";

    pub fn post_path_regex(path: &str) -> MockBuilder {
        wiremock::Mock::given(method("POST")).and(path_regex(path))
    }

    /// Wrap model text in a minimal `generateContent` envelope.
    pub fn envelope(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": text }]
                }
            }]
        })
    }
}
