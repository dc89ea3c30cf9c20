pub mod adapters;
pub mod api;
pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::ResendClient;
pub use crate::client::{FormCollector, InquiryDraft, Notification};
pub use crate::config::RelayConfig;
pub use crate::core::handler::{ContactReply, SubmissionHandler};
pub use crate::domain::model::{ContactResponse, InquiryRequest, ServiceIntent};
pub use crate::utils::error::{ContactError, Result};
