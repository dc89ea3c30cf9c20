use crate::domain::model::InquiryRequest;

pub const SITE_NAME: &str = "医療白衣クリーニング";
pub const SERVICE_PLACEHOLDER: &str = "未選択";
pub const MESSAGE_PLACEHOLDER: &str = "なし";

/// 可選欄位：只有在確實有值（非 None 且非空字串）時才採用，否則使用預設文字
fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

pub fn render_subject(facility: &str) -> String {
    format!("【{}】新しいお問い合わせ - {}", SITE_NAME, facility)
}

/// Renders the plain-text notification body.
///
/// Required fields are expected to be validated already; anything still
/// absent renders as an empty value.
pub fn render_body(request: &InquiryRequest) -> String {
    let field = |value: &Option<String>| value.as_deref().unwrap_or_default().to_string();

    let lines = [
        "新しいお問い合わせが届きました。".to_string(),
        String::new(),
        "【お客様情報】".to_string(),
        format!("ご担当者名: {}", field(&request.name)),
        format!("施設名: {}", field(&request.facility)),
        format!("電話番号: {}", field(&request.phone)),
        format!("メールアドレス: {}", field(&request.email)),
        format!(
            "希望内容: {}",
            or_placeholder(request.service.as_deref(), SERVICE_PLACEHOLDER)
        ),
        String::new(),
        "【メッセージ】".to_string(),
        or_placeholder(request.message.as_deref(), MESSAGE_PLACEHOLDER).to_string(),
        String::new(),
        "---".to_string(),
        format!("このメールは{}サイトから自動送信されました。", SITE_NAME),
        String::new(),
    ];

    lines.join("\n")
}
