//! Mock transactional email API
//!
//! Stands in for the real email provider so dispatch behavior can be
//! asserted without network access.

use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nuqta::config::EmailConfig;

pub const TEST_API_KEY: &str = "test-api-key";

/// Mock server plus the email config pointed at it
pub struct EmailMockServer {
    pub server: MockServer,
}

impl EmailMockServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Email config targeting the mock endpoint
    pub fn config(&self) -> EmailConfig {
        EmailConfig {
            api_url: format!("{}/emails", self.server.uri()),
            api_key: TEST_API_KEY.to_string(),
            from_address: "Nuqta <no-reply@nuqta.test>".to_string(),
            timeout_seconds: 5,
            enabled: true,
        }
    }

    /// Accept every authorized POST with a success body
    pub async fn accept_all(&self) {
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(bearer_token(TEST_API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "email_123",
            })))
            .mount(&self.server)
            .await;
    }

    /// Reject every POST with the given status
    pub async fn reject_all(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }
}
