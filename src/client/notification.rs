use std::fmt;

pub const FALLBACK_PHONE: &str = "045-701-6985";

/// The single message shown to the user once a submission attempt settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Accepted,
    /// Non-2xx response; `error` is the server's `error` text when it sent one.
    ServerError { status: u16, error: Option<String> },
    /// The request never completed, or a 2xx answer could not be read.
    TransportFailed { detail: String },
}

impl Notification {
    pub fn is_success(&self) -> bool {
        matches!(self, Notification::Accepted)
    }
}

fn write_phone_fallback(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
        f,
        "お手数ですが、お電話でお問い合わせください。\n📞 {}",
        FALLBACK_PHONE
    )
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Accepted => f.write_str(
                "✅ お問い合わせを受け付けました！\n\n24時間以内にご連絡いたします。\nありがとうございました。",
            ),
            Notification::ServerError { status, error } => {
                write!(f, "❌ エラーが発生しました ({})\n\n", status)?;
                if let Some(error) = error.as_deref().filter(|e| !e.is_empty()) {
                    write!(f, "エラー: {}\n\n", error)?;
                }
                write_phone_fallback(f)
            }
            Notification::TransportFailed { detail } => {
                let detail = if detail.is_empty() { "Unknown error" } else { detail.as_str() };
                write!(f, "❌ 送信に失敗しました。\n\nエラー詳細: {}\n\n", detail)?;
                write_phone_fallback(f)
            }
        }
    }
}
