use super::gemini::types::GenerateContentRequest;
use super::AnalysisTransport;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockReply {
    Body(Vec<u8>),
    Status(u16, String),
}

/// In-memory transport that replays canned replies and records requests.
///
/// Clones share state, so a test can keep one handle while the service owns
/// another.
#[derive(Clone)]
pub struct MockTransport {
    replies: Arc<Mutex<Vec<MockReply>>>,
    requests: Arc<Mutex<Vec<GenerateContentRequest>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue model text wrapped in a `generateContent` envelope.
    pub fn with_text_response(self, text: &str) -> Self {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": text }]
                }
            }]
        });
        self.with_raw_response(body.to_string().into_bytes())
    }

    /// Queue a raw response body returned as-is.
    pub fn with_raw_response(self, body: Vec<u8>) -> Self {
        self.replies.lock().unwrap().push(MockReply::Body(body));
        self
    }

    /// Queue a non-success HTTP status.
    pub fn with_status_response(self, status: u16, body: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Status(status, body.to_string()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<GenerateContentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisTransport for MockTransport {
    async fn send(&self, request: &GenerateContentRequest) -> Result<Vec<u8>> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.requests.lock().unwrap().push(request.clone());

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            // Default: a minimal answer that decodes in every mode
            return Ok(br#"{"candidates":[{"content":{"parts":[{"text":"{\"confidence\":\"Medium\"}"}]}}]}"#.to_vec());
        }

        let index = (*count - 1) % replies.len();
        match &replies[index] {
            MockReply::Body(body) => Ok(body.clone()),
            MockReply::Status(status, body) => Err(Error::Http {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}
