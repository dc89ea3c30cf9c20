pub mod handler;
pub mod template;

pub use crate::domain::model::{ContactResponse, InquiryRequest, OutgoingEmail, SubmissionState};
pub use crate::domain::ports::{EmailSender, MailSettingsProvider};
pub use crate::utils::error::Result;
