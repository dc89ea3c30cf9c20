use super::ApiState;
use crate::core::handler::ContactReply;
use crate::domain::model::InquiryRequest;
use crate::domain::ports::EmailSender;
use axum::{body::Bytes, extract::State};

/// POST /api/contact
///
/// 不看 Content-Type，本文一律當 JSON 解析
pub async fn submit_contact<E: EmailSender + 'static>(
    State(state): State<ApiState<E>>,
    body: Bytes,
) -> ContactReply {
    match serde_json::from_slice::<InquiryRequest>(&body) {
        Ok(request) => state.handler.handle(request).await,
        Err(e) => {
            tracing::warn!("❌ Unreadable inquiry body: {}", e);
            ContactReply::malformed()
        }
    }
}
