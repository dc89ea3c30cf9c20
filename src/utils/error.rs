use thiserror::Error;

/// 缺少必填欄位時回傳給客戶端的訊息
pub const MISSING_FIELDS_MESSAGE: &str = "必須項目が不足しています。";

/// 請求內容無法解析為 JSON 時的訊息
pub const MALFORMED_BODY_MESSAGE: &str = "リクエストの形式が正しくありません。";

/// 郵件發送失敗時回傳的通用訊息
pub const DELIVERY_FAILED_MESSAGE: &str = "メール送信中にサーバーでエラーが発生しました。";

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Email delivery failed: {message}")]
    DeliveryError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl ContactError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::DeliveryError {
            message: message.into(),
        }
    }

    /// HTTP status the submission endpoint answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ValidationError { .. } | Self::SerializationError(_) => 400,
            Self::SubmissionInProgress => 409,
            _ => 500,
        }
    }

    /// The underlying message without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::ValidationError { message }
            | Self::DeliveryError { message }
            | Self::ConfigError { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            Self::SerializationError(_) => MALFORMED_BODY_MESSAGE.to_string(),
            Self::DeliveryError { .. } | Self::HttpError(_) => DELIVERY_FAILED_MESSAGE.to_string(),
            Self::SubmissionInProgress => "送信中です。しばらくお待ちください。".to_string(),
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlError(_) => format!("設定エラー: {}", self),
            Self::IoError(e) => format!("入出力エラー: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } | Self::SerializationError(_) => {
                "Fill in name, facility, phone and email, then submit again"
            }
            Self::DeliveryError { .. } | Self::HttpError(_) => {
                "Check RESEND_API_KEY and the provider status; the inquiry was not delivered"
            }
            Self::SubmissionInProgress => "Wait for the current submission to finish",
            Self::MissingConfigError { .. } => {
                "Set the missing environment variable or add it to the TOML config"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } | Self::TomlError(_) => {
                "Fix the configuration value and restart"
            }
            Self::IoError(_) => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, ContactError>;
