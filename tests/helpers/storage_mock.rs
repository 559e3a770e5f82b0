//! Mock object storage API
//!
//! A wiremock server standing in for the storage provider's signing endpoint.

use serde_json::json;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_SERVICE_KEY: &str = "test-service-key";
pub const TEST_BUCKET: &str = "event-photos";

pub struct StorageMockServer {
    pub server: MockServer,
}

impl StorageMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Sign one object, answering with a relative signed URL
    pub async fn mock_sign(&self, object_path: &str, token: &str) {
        let signed = format!("/object/sign/{}/{}?token={}", TEST_BUCKET, object_path, token);

        Mock::given(method("POST"))
            .and(path(format!("/object/sign/{}/{}", TEST_BUCKET, object_path)))
            .and(header("apikey", TEST_SERVICE_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "signedURL": signed })))
            .mount(&self.server)
            .await;
    }

    /// Fail every signing request with the given status
    pub async fn mock_sign_failure(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path_regex(r"^/object/sign/.*"))
            .respond_with(ResponseTemplate::new(status).set_body_string("storage unavailable"))
            .mount(&self.server)
            .await;
    }

    /// Reset all mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
