use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One contact-form submission as it arrives on `POST /api/contact`.
///
/// Every field is optional at the wire level so that a missing required field
/// becomes a validation failure instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InquiryRequest {
    pub const REQUIRED_FIELDS: [&'static str; 4] = ["name", "facility", "phone", "email"];

    /// Names of required fields that are absent or empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let values = [&self.name, &self.facility, &self.phone, &self.email];
        Self::REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| !crate::utils::validation::is_present(value.as_deref()))
            .map(|(field, _)| *field)
            .collect()
    }
}

/// 表單上「希望内容」的選項
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ServiceIntent {
    Trial,
    Estimate,
    Regular,
    Other,
}

impl ServiceIntent {
    pub const ALL: [ServiceIntent; 4] = [
        ServiceIntent::Trial,
        ServiceIntent::Estimate,
        ServiceIntent::Regular,
        ServiceIntent::Other,
    ];

    /// Wire value sent in the `service` field.
    pub fn code(self) -> &'static str {
        match self {
            ServiceIntent::Trial => "trial",
            ServiceIntent::Estimate => "estimate",
            ServiceIntent::Regular => "regular",
            ServiceIntent::Other => "other",
        }
    }

    /// Label shown next to the option on the form.
    pub fn label(self) -> &'static str {
        match self {
            ServiceIntent::Trial => "無料トライアル体験",
            ServiceIntent::Estimate => "見積り依頼",
            ServiceIntent::Regular => "定期契約相談",
            ServiceIntent::Other => "その他",
        }
    }
}

impl fmt::Display for ServiceIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ServiceIntent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceIntent::ALL
            .into_iter()
            .find(|intent| intent.code() == s)
            .ok_or_else(|| format!("unknown service '{}'", s))
    }
}

/// Payload handed to the email provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugInfo {
    pub error: String,
    pub timestamp: String,
}

/// JSON body returned by the submission endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

impl ContactResponse {
    pub fn sent(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            debug: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            debug: None,
        }
    }

    pub fn failed(error: impl Into<String>, debug: DebugInfo) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            debug: Some(debug),
        }
    }
}

/// Lifecycle of a single submission on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Received,
    Rejected,
    Sent,
    DeliveryFailed,
}
