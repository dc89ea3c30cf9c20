use crate::domain::model::OutgoingEmail;
use crate::domain::ports::EmailSender;
use crate::utils::error::{ContactError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_API_BASE_URL: &str = "https://api.resend.com";

/// `EmailSender` backed by the Resend HTTP API (`POST /emails`).
#[derive(Debug, Clone)]
pub struct ResendClient {
    client: Client,
    api_base_url: String,
    api_key: String,
}

impl ResendClient {
    pub fn new(api_base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("contact-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, api_base_url, api_key))
    }

    pub fn with_client(
        client: Client,
        api_base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base_url: api_base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.api_base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, email: &OutgoingEmail) -> Result<serde_json::Value> {
        let url = self.emails_url();
        tracing::debug!("Making email API request to: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| ContactError::delivery(e.to_string()))?;

        let status = response.status();
        tracing::debug!("Email API response status: {}", status);

        let text = response
            .text()
            .await
            .map_err(|e| ContactError::delivery(e.to_string()))?;
        let payload: Option<serde_json::Value> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            // Resend 的錯誤格式為 {"statusCode":..,"name":..,"message":..}
            let message = payload
                .as_ref()
                .and_then(|body| body.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            return Err(ContactError::delivery(message));
        }

        Ok(payload.unwrap_or(serde_json::Value::Null))
    }
}
