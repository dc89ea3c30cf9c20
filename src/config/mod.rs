#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

use crate::adapters::resend::DEFAULT_API_BASE_URL;
use crate::domain::ports::MailSettingsProvider;
use crate::utils::error::{ContactError, Result};
use crate::utils::validation::{self, Validate};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_FROM_EMAIL: &str = "noreply@wbrownie.com";
pub const DEFAULT_TO_EMAIL: &str = "shimoda@wbrownie.com";

pub const ENV_API_KEY: &str = "RESEND_API_KEY";
pub const ENV_TO_EMAIL: &str = "TO_EMAIL";
pub const ENV_FROM_EMAIL: &str = "FROM_EMAIL";
pub const ENV_API_URL: &str = "RESEND_API_URL";
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";

/// Resolved runtime configuration.
///
/// Precedence: environment variables, then the TOML file, then defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub bind_address: String,
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub from_email: String,
    pub to_email: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            from_email: DEFAULT_FROM_EMAIL.to_string(),
            to_email: DEFAULT_TO_EMAIL.to_string(),
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self::resolve(None, |name| std::env::var(name).ok())
    }

    pub fn from_env_and_file(file: Option<&TomlConfig>) -> Self {
        Self::resolve(file, |name| std::env::var(name).ok())
    }

    pub fn resolve<F>(file: Option<&TomlConfig>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // 空字串視同未設定
        let env = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let pick = |name: &str, from_file: Option<&str>, default: &str| {
            env(name)
                .or_else(|| from_file.map(str::to_string))
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            bind_address: pick(
                ENV_BIND_ADDRESS,
                file.and_then(TomlConfig::bind_address),
                DEFAULT_BIND_ADDRESS,
            ),
            api_base_url: pick(
                ENV_API_URL,
                file.and_then(TomlConfig::api_base_url),
                DEFAULT_API_BASE_URL,
            ),
            api_key: env(ENV_API_KEY)
                .or_else(|| file.and_then(TomlConfig::api_key).map(str::to_string)),
            from_email: pick(
                ENV_FROM_EMAIL,
                file.and_then(TomlConfig::from_email),
                DEFAULT_FROM_EMAIL,
            ),
            to_email: pick(
                ENV_TO_EMAIL,
                file.and_then(TomlConfig::to_email),
                DEFAULT_TO_EMAIL,
            ),
        }
    }

    pub fn api_key(&self) -> Result<&str> {
        validation::validate_required_field(ENV_API_KEY, &self.api_key).map(String::as_str)
    }
}

impl MailSettingsProvider for RelayConfig {
    fn from_email(&self) -> &str {
        &self.from_email
    }

    fn to_email(&self) -> &str {
        &self.to_email
    }
}

fn reject_unresolved(field_name: &str, value: &str) -> Result<()> {
    if value.contains("${") {
        return Err(ContactError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Unresolved environment placeholder".to_string(),
        });
    }
    Ok(())
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_socket_addr("bind_address", &self.bind_address)?;
        validation::validate_url("api_base_url", &self.api_base_url)?;

        let api_key = self.api_key()?;
        validation::validate_non_empty_string(ENV_API_KEY, api_key)?;
        reject_unresolved(ENV_API_KEY, api_key)?;

        validation::validate_mailbox("from_email", &self.from_email)?;
        validation::validate_mailbox("to_email", &self.to_email)?;
        reject_unresolved("to_email", &self.to_email)?;

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }
}
