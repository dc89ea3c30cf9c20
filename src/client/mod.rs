//! Form Collector: holds the contact form's fields, posts them to the
//! submission endpoint and turns the outcome into one [`Notification`].

pub mod guard;
pub mod notification;

pub use guard::SubmittingGuard;
pub use notification::{Notification, FALLBACK_PHONE};

use crate::domain::model::{InquiryRequest, ServiceIntent};
use crate::utils::error::{ContactError, Result, MISSING_FIELDS_MESSAGE};
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// Current contents of the form. Empty text means the user left it blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryDraft {
    pub name: String,
    pub facility: String,
    pub phone: String,
    pub email: String,
    pub service: Option<ServiceIntent>,
    pub message: String,
}

impl InquiryDraft {
    pub fn to_request(&self) -> InquiryRequest {
        let text = |value: &str| Some(value.to_string());
        InquiryRequest {
            name: text(&self.name),
            facility: text(&self.facility),
            phone: text(&self.phone),
            email: text(&self.email),
            service: self.service.map(|s| s.code().to_string()),
            message: (!self.message.is_empty()).then(|| self.message.clone()),
        }
    }
}

#[cfg(feature = "cli")]
impl From<crate::config::cli::FormArgs> for InquiryDraft {
    fn from(args: crate::config::cli::FormArgs) -> Self {
        Self {
            name: args.name,
            facility: args.facility,
            phone: args.phone,
            email: args.email,
            service: args.service,
            message: args.message.unwrap_or_default(),
        }
    }
}

pub struct FormCollector {
    client: Client,
    endpoint: String,
    draft: Mutex<InquiryDraft>,
    submitting: AtomicBool,
}

impl FormCollector {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            draft: Mutex::new(InquiryDraft::default()),
            submitting: AtomicBool::new(false),
        }
    }

    pub async fn fill(&self, draft: InquiryDraft) {
        *self.draft.lock().await = draft;
    }

    pub async fn draft(&self) -> InquiryDraft {
        self.draft.lock().await.clone()
    }

    /// True while an attempt is in flight; the submit control is disabled.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Runs one submission attempt.
    ///
    /// Errors only when the attempt cannot start: another attempt is in
    /// flight, or a required field is blank (nothing is sent in either case).
    /// Every attempt that reaches the network resolves into exactly one
    /// notification. The draft is cleared on success.
    pub async fn submit(&self) -> Result<Notification> {
        let _guard =
            SubmittingGuard::acquire(&self.submitting).ok_or(ContactError::SubmissionInProgress)?;

        let request = {
            let draft = self.draft.lock().await;
            let request = draft.to_request();
            let missing = request.missing_fields();
            if !missing.is_empty() {
                tracing::debug!("Form blocked, missing fields: {}", missing.join(", "));
                return Err(ContactError::validation(MISSING_FIELDS_MESSAGE));
            }
            request
        };

        let notification = self.post(&request).await;
        if notification.is_success() {
            *self.draft.lock().await = InquiryDraft::default();
        }

        Ok(notification)
    }

    async fn post(&self, request: &InquiryRequest) -> Notification {
        tracing::debug!("Posting inquiry to: {}", self.endpoint);

        let response = match self.client.post(&self.endpoint).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Inquiry request failed: {}", e);
                return Notification::TransportFailed {
                    detail: e.to_string(),
                };
            }
        };

        let status = response.status();
        let body = response.json::<serde_json::Value>().await;
        tracing::debug!("Inquiry response status: {}", status);

        match body {
            Ok(_) if status.is_success() => Notification::Accepted,
            Err(e) if status.is_success() => Notification::TransportFailed {
                detail: e.to_string(),
            },
            Ok(body) => Notification::ServerError {
                status: status.as_u16(),
                error: body
                    .get("error")
                    .and_then(|e| e.as_str())
                    .map(str::to_string),
            },
            Err(_) => Notification::ServerError {
                status: status.as_u16(),
                error: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_to_request() {
        let draft = InquiryDraft {
            name: "田中".to_string(),
            facility: "○○病院".to_string(),
            phone: "045-000-0000".to_string(),
            email: "a@b.com".to_string(),
            service: Some(ServiceIntent::Regular),
            message: String::new(),
        };

        let request = draft.to_request();
        assert_eq!(request.name.as_deref(), Some("田中"));
        assert_eq!(request.service.as_deref(), Some("regular"));
        assert_eq!(request.message, None);
        assert!(request.missing_fields().is_empty());
    }

    #[tokio::test]
    async fn test_submit_blocks_blank_required_fields() {
        // 不會發出請求，所以端點不需要存在
        let collector = FormCollector::new("http://127.0.0.1:9/api/contact");
        collector
            .fill(InquiryDraft {
                facility: "○○病院".to_string(),
                ..Default::default()
            })
            .await;

        let result = collector.submit().await;

        assert!(matches!(result, Err(ContactError::ValidationError { .. })));
        assert!(!collector.is_submitting());
        assert_eq!(collector.draft().await.facility, "○○病院");
    }
}
