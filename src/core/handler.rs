use crate::core::template::{render_body, render_subject};
use crate::domain::model::{ContactResponse, DebugInfo, InquiryRequest, OutgoingEmail, SubmissionState};
use crate::domain::ports::{EmailSender, MailSettingsProvider};
use crate::utils::error::{
    ContactError, Result, DELIVERY_FAILED_MESSAGE, MALFORMED_BODY_MESSAGE, MISSING_FIELDS_MESSAGE,
};
use chrono::{SecondsFormat, Utc};

/// Status code and JSON body produced for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactReply {
    pub status: u16,
    pub body: ContactResponse,
    pub state: SubmissionState,
}

impl ContactReply {
    pub fn sent(data: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: ContactResponse::sent(data),
            state: SubmissionState::Sent,
        }
    }

    /// 請求本文無法解析時的 400 回應
    pub fn malformed() -> Self {
        Self {
            status: 400,
            body: ContactResponse::rejected(MALFORMED_BODY_MESSAGE),
            state: SubmissionState::Rejected,
        }
    }

    pub fn from_error(err: &ContactError) -> Self {
        match err {
            ContactError::ValidationError { .. } | ContactError::SerializationError(_) => Self {
                status: 400,
                body: ContactResponse::rejected(err.user_friendly_message()),
                state: SubmissionState::Rejected,
            },
            // 同一表單重複送出：拒絕但不算投遞失敗
            ContactError::SubmissionInProgress => Self {
                status: err.status_code(),
                body: ContactResponse::rejected(err.user_friendly_message()),
                state: SubmissionState::Rejected,
            },
            _ => {
                let debug = DebugInfo {
                    error: err.detail(),
                    timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                };
                Self {
                    status: 500,
                    body: ContactResponse::failed(DELIVERY_FAILED_MESSAGE, debug),
                    state: SubmissionState::DeliveryFailed,
                }
            }
        }
    }
}

/// Validates an inquiry, renders the notification mail and hands it to the
/// email capability exactly once.
pub struct SubmissionHandler<E: EmailSender> {
    sender: E,
    from_email: String,
    to_email: String,
}

impl<E: EmailSender> SubmissionHandler<E> {
    pub fn new<M: MailSettingsProvider>(sender: E, settings: &M) -> Self {
        Self {
            sender,
            from_email: settings.from_email().to_string(),
            to_email: settings.to_email().to_string(),
        }
    }

    pub fn validate(&self, request: &InquiryRequest) -> Result<()> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            tracing::warn!("❌ Inquiry rejected, missing fields: {}", missing.join(", "));
            return Err(ContactError::validation(MISSING_FIELDS_MESSAGE));
        }
        Ok(())
    }

    pub fn build_email(&self, request: &InquiryRequest) -> OutgoingEmail {
        OutgoingEmail {
            from: self.from_email.clone(),
            to: vec![self.to_email.clone()],
            subject: render_subject(request.facility.as_deref().unwrap_or_default()),
            text: render_body(request),
        }
    }

    /// Returns the provider payload, or a `ValidationError` / `DeliveryError`.
    pub async fn submit(&self, request: &InquiryRequest) -> Result<serde_json::Value> {
        self.validate(request)?;

        let email = self.build_email(request);
        tracing::debug!("Sending inquiry mail: {}", email.subject);

        // 不重試：失敗一律轉成 DeliveryError 交給呼叫端
        self.sender.send(&email).await.map_err(|e| match e {
            ContactError::DeliveryError { .. } => e,
            other => ContactError::delivery(other.detail()),
        })
    }

    pub async fn handle(&self, request: InquiryRequest) -> ContactReply {
        tracing::info!(
            "📨 Received inquiry from '{}'",
            request.facility.as_deref().unwrap_or("<missing facility>")
        );

        let reply = match self.submit(&request).await {
            Ok(data) => {
                tracing::info!("✅ Inquiry forwarded to {}", self.to_email);
                ContactReply::sent(data)
            }
            Err(e) => {
                if matches!(e, ContactError::DeliveryError { .. }) {
                    tracing::error!("Contact form error: {}", e);
                    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                }
                ContactReply::from_error(&e)
            }
        };

        tracing::debug!("Submission finished: {:?} ({})", reply.state, reply.status);
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct TestSettings;

    impl MailSettingsProvider for TestSettings {
        fn from_email(&self) -> &str {
            "noreply@wbrownie.com"
        }

        fn to_email(&self) -> &str {
            "shimoda@wbrownie.com"
        }
    }

    #[derive(Clone, Default)]
    struct MockSender {
        sent: Arc<Mutex<Vec<OutgoingEmail>>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl EmailSender for MockSender {
        async fn send(&self, email: &OutgoingEmail) -> Result<serde_json::Value> {
            self.sent.lock().await.push(email.clone());
            match &self.fail_with {
                Some(message) => Err(ContactError::delivery(message.clone())),
                None => Ok(json!({"id": "email_123"})),
            }
        }
    }

    fn complete_request() -> InquiryRequest {
        InquiryRequest {
            name: Some("田中".to_string()),
            facility: Some("○○病院".to_string()),
            phone: Some("045-000-0000".to_string()),
            email: Some("a@b.com".to_string()),
            service: Some("trial".to_string()),
            message: None,
        }
    }

    #[tokio::test]
    async fn test_handle_sends_once() {
        let sender = MockSender::default();
        let handler = SubmissionHandler::new(sender.clone(), &TestSettings);

        let reply = handler.handle(complete_request()).await;

        assert_eq!(reply.status, 200);
        assert_eq!(reply.state, SubmissionState::Sent);
        assert_eq!(reply.body, ContactResponse::sent(json!({"id": "email_123"})));

        let sent = sender.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, "noreply@wbrownie.com");
        assert_eq!(sent[0].to, vec!["shimoda@wbrownie.com".to_string()]);
        assert_eq!(sent[0].subject, "【医療白衣クリーニング】新しいお問い合わせ - ○○病院");
        assert!(sent[0].text.contains("希望内容: trial"));
    }

    #[tokio::test]
    async fn test_handle_rejects_without_sending() {
        let sender = MockSender::default();
        let handler = SubmissionHandler::new(sender.clone(), &TestSettings);

        for field in InquiryRequest::REQUIRED_FIELDS {
            let mut request = complete_request();
            match field {
                "name" => request.name = None,
                "facility" => request.facility = Some(String::new()),
                "phone" => request.phone = None,
                _ => request.email = Some(String::new()),
            }

            let reply = handler.handle(request).await;
            assert_eq!(reply.status, 400, "field {}", field);
            assert_eq!(reply.state, SubmissionState::Rejected);
            assert_eq!(reply.body, ContactResponse::rejected(MISSING_FIELDS_MESSAGE));
        }

        assert!(sender.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_only_field_is_sent() {
        let sender = MockSender::default();
        let handler = SubmissionHandler::new(sender.clone(), &TestSettings);

        let mut request = complete_request();
        request.name = Some(" ".to_string());

        let reply = handler.handle(request).await;

        assert_eq!(reply.status, 200);
        assert_eq!(reply.state, SubmissionState::Sent);
        let sent = sender.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].text.contains("ご担当者名:  \n"));
    }

    #[tokio::test]
    async fn test_handle_delivery_failure() {
        let sender = MockSender {
            fail_with: Some("network down".to_string()),
            ..Default::default()
        };
        let handler = SubmissionHandler::new(sender.clone(), &TestSettings);

        let reply = handler.handle(complete_request()).await;

        assert_eq!(reply.status, 500);
        assert_eq!(reply.state, SubmissionState::DeliveryFailed);
        assert_eq!(reply.body.error.as_deref(), Some(DELIVERY_FAILED_MESSAGE));
        let debug = reply.body.debug.expect("debug info");
        assert_eq!(debug.error, "network down");
        assert!(chrono::DateTime::parse_from_rfc3339(&debug.timestamp).is_ok());

        // 不重試
        assert_eq!(sender.sent.lock().await.len(), 1);
    }

    #[test]
    fn test_non_delivery_error_becomes_500() {
        let err = ContactError::MissingConfigError {
            field: "RESEND_API_KEY".to_string(),
        };
        let reply = ContactReply::from_error(&err);
        assert_eq!(reply.status, 500);
        assert_eq!(reply.state, SubmissionState::DeliveryFailed);
        assert!(reply.body.debug.is_some());
    }

    #[test]
    fn test_submission_in_progress_is_409_not_delivery_failure() {
        let reply = ContactReply::from_error(&ContactError::SubmissionInProgress);

        assert_eq!(reply.status, 409);
        assert_eq!(reply.state, SubmissionState::Rejected);
        assert_ne!(reply.body.error.as_deref(), Some(DELIVERY_FAILED_MESSAGE));
        assert!(reply.body.debug.is_none());
    }

    #[test]
    fn test_validation_error_is_400() {
        let reply = ContactReply::from_error(&ContactError::validation(MISSING_FIELDS_MESSAGE));

        assert_eq!(reply.status, 400);
        assert_eq!(reply.body, ContactResponse::rejected(MISSING_FIELDS_MESSAGE));
    }

    #[test]
    fn test_malformed_reply() {
        let reply = ContactReply::malformed();
        assert_eq!(reply.status, 400);
        assert_eq!(reply.body.error.as_deref(), Some(MALFORMED_BODY_MESSAGE));
    }
}
