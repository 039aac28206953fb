//! # Resend Email Sender
//!
//! `POST /emails` with a JSON body of `{from, to, subject, text}`.

use crate::config::ResendConfig;
use async_trait::async_trait;
use jebs_core::{ApiError, ApiResult, EmailMessage, EmailSender};
use reqwest::Client;
use tracing::{error, info, instrument};

const PROVIDER: &str = "resend";

pub struct ResendEmailSender {
    config: ResendConfig,
    client: Client,
}

impl ResendEmailSender {
    pub fn new(config: ResendConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(config, client))
    }

    /// Create with a caller-supplied HTTP client
    pub fn with_client(config: ResendConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    #[instrument(skip(self, message), fields(to = ?message.to))]
    async fn send(&self, message: &EmailMessage) -> ApiResult<()> {
        let url = format!("{}/emails", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .json(message)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Resend API error: status={}, body={}", status, body);

            let text = if body.is_empty() {
                "Email send failed".to_string()
            } else {
                body
            };
            return Err(ApiError::provider(PROVIDER, text));
        }

        info!("Sent email: subject={:?}", message.subject);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn message() -> EmailMessage {
        EmailMessage {
            from: "Jeb's Website <noreply@resend.dev>".to_string(),
            to: vec!["jobs@jebs.example".to_string()],
            subject: "Employment Application - Jane Doe".to_string(),
            text: "New employment application submitted:\n\nfirstName: Jane".to_string(),
        }
    }

    fn sender(server: &MockServer) -> ResendEmailSender {
        ResendEmailSender::new(ResendConfig::new("re_test").with_api_base_url(server.uri()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_send_posts_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer re_test"))
            .and(body_json(json!({
                "from": "Jeb's Website <noreply@resend.dev>",
                "to": ["jobs@jebs.example"],
                "subject": "Employment Application - Jane Doe",
                "text": "New employment application submitted:\n\nfirstName: Jane"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "em_1"})))
            .expect(1)
            .mount(&server)
            .await;

        sender(&server).send(&message()).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_failure_carries_provider_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(
                ResponseTemplate::new(422).set_body_string(r#"{"message":"Invalid `to` field"}"#),
            )
            .mount(&server)
            .await;

        let err = sender(&server).send(&message()).await.unwrap_err();

        assert_eq!(err.public_message(), r#"{"message":"Invalid `to` field"}"#);
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_send_failure_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = sender(&server).send(&message()).await.unwrap_err();
        assert_eq!(err.public_message(), "Email send failed");
    }
}
