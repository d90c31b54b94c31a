use super::types::GenerateContentRequest;
use crate::ai::AnalysisTransport;
use crate::models::{Config, DEFAULT_GEMINI_BASE_URL};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Gemini REST transport: one `generateContent` POST per analysis.
pub struct GeminiHttpClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example `gemini-2.5-flash`);
    /// a `models/` prefix is stripped.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: Client) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.gemini_api_key.clone(), config.gemini_model.clone())
            .with_base_url(config.gemini_base_url.clone())
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl AnalysisTransport for GeminiHttpClient {
    async fn send(&self, request: &GenerateContentRequest) -> Result<Vec<u8>> {
        tracing::debug!("Sending generateContent request to Gemini ({})", self.model);

        let response = self
            .client
            .post(self.generate_content_url())
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Gemini: {}", e);
                e
            })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            tracing::error!("Gemini API error (status {}): {}", status, body);
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::request;
    use crate::ai::gemini::test_support;
    use crate::models::MediaPayload;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "gemini-2.5-flash";

    fn make_client(server: &MockServer, api_key: &str, model: &str) -> GeminiHttpClient {
        GeminiHttpClient::new(api_key.to_string(), model.to_string()).with_base_url(server.uri())
    }

    fn sample_request() -> GenerateContentRequest {
        request::build(
            "Identify the part",
            MediaPayload {
                mime_type: "image/jpeg".to_string(),
                base64_data: "/9j/4A==".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_send_returns_raw_body() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .and(query_param("key", "test-key"))
            .and(body_string_contains("\"inlineData\""))
            .and(body_string_contains("\"responseMimeType\":\"application/json\""))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"candidates\":[]}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", DEFAULT_MODEL);
        let body = client.send(&sample_request()).await.unwrap();
        assert_eq!(body, b"{\"candidates\":[]}");
    }

    #[tokio::test]
    async fn test_non_success_status_preserves_body_without_retry() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", DEFAULT_MODEL);
        let err = client.send(&sample_request()).await.unwrap_err();

        match err {
            Error::Http { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // Bind then release a port so nothing is listening on it.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = GeminiHttpClient::new("test-key".to_string(), DEFAULT_MODEL.to_string())
            .with_base_url(uri);
        let err = client.send(&sample_request()).await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[tokio::test]
    async fn test_strips_models_prefix_from_model_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(test_support::envelope("{}")))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", "models/gemini-2.5-flash");
        assert_eq!(client.model(), "gemini-2.5-flash");

        client.send(&sample_request()).await.unwrap();
    }

    #[test]
    fn test_from_config_uses_configured_endpoint() {
        let config = Config {
            gemini_api_key: "secret".to_string(),
            gemini_model: "gemini-2.5-pro".to_string(),
            gemini_base_url: "http://localhost:8080/".to_string(),
        };

        let client = GeminiHttpClient::from_config(&config);
        assert_eq!(
            client.generate_content_url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }
}
