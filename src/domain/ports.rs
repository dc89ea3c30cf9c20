use crate::domain::model::OutgoingEmail;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Transactional email capability.
///
/// Implementations return the provider's JSON payload on success and a
/// `ContactError::DeliveryError` carrying the provider or transport message
/// on failure. They must not retry.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<serde_json::Value>;
}

pub trait MailSettingsProvider: Send + Sync {
    fn from_email(&self) -> &str;
    fn to_email(&self) -> &str;
}
