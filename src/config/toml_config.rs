use crate::utils::error::{ContactError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub mail: Option<MailSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind_address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailSection {
    pub api_base_url: Option<String>,
    pub api_key: Option<String>,
    pub from_email: Option<String>,
    pub to_email: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，`${VAR}` 以程序環境變數替換
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with(content, |name| std::env::var(name).ok())
    }

    pub fn from_toml_str_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let processed = Self::substitute_env_vars(content, lookup)?;
        Ok(toml::from_str(&processed)?)
    }

    /// 替換環境變數 (例如 ${RESEND_API_KEY})，找不到的保留原樣
    fn substitute_env_vars<F>(content: &str, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ContactError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn bind_address(&self) -> Option<&str> {
        self.server.as_ref()?.bind_address.as_deref()
    }

    pub fn api_base_url(&self) -> Option<&str> {
        self.mail.as_ref()?.api_base_url.as_deref()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.mail.as_ref()?.api_key.as_deref()
    }

    pub fn from_email(&self) -> Option<&str> {
        self.mail.as_ref()?.from_email.as_deref()
    }

    pub fn to_email(&self) -> Option<&str> {
        self.mail.as_ref()?.to_email.as_deref()
    }
}
