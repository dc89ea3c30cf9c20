use crate::utils::error::{ContactError, Result};
use std::net::SocketAddr;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ContactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ContactError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ContactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<()> {
    addr.parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|e| ContactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ContactError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ContactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 只檢查格式大致正確（有 @ 且前後不為空），實際可否投遞交給郵件服務判斷
pub fn validate_mailbox(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    // 允許 "名稱 <addr@example.com>" 形式
    let address = match (value.find('<'), value.rfind('>')) {
        (Some(start), Some(end)) if start < end => &value[start + 1..end],
        _ => value,
    };

    match address.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ContactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Not a mailbox address".to_string(),
        }),
    }
}

/// 有值且不是空字串才算「有填寫」，只有空白的文字仍算有填
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api_base_url", "https://api.resend.com").is_ok());
        assert!(validate_url("api_base_url", "http://127.0.0.1:9000").is_ok());
        assert!(validate_url("api_base_url", "").is_err());
        assert!(validate_url("api_base_url", "invalid-url").is_err());
        assert!(validate_url("api_base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        assert!(validate_socket_addr("bind_address", "0.0.0.0:3000").is_ok());
        assert!(validate_socket_addr("bind_address", "[::1]:8080").is_ok());
        assert!(validate_socket_addr("bind_address", "localhost").is_err());
    }

    #[test]
    fn test_validate_mailbox() {
        assert!(validate_mailbox("to_email", "shimoda@wbrownie.com").is_ok());
        assert!(validate_mailbox("from_email", "医療白衣 <noreply@wbrownie.com>").is_ok());
        assert!(validate_mailbox("to_email", "").is_err());
        assert!(validate_mailbox("to_email", "shimoda").is_err());
        assert!(validate_mailbox("to_email", "@wbrownie.com").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let key: Option<String> = None;
        let err = validate_required_field("RESEND_API_KEY", &key).unwrap_err();
        assert!(matches!(err, ContactError::MissingConfigError { field } if field == "RESEND_API_KEY"));

        let key = Some("re_123".to_string());
        assert_eq!(validate_required_field("RESEND_API_KEY", &key).unwrap(), "re_123");
    }

    #[test]
    fn test_is_present() {
        assert!(is_present(Some("田中")));
        assert!(is_present(Some("0")));
        assert!(!is_present(Some("")));
        assert!(is_present(Some("   ")));
        assert!(!is_present(None));
    }
}
