//! HTTP surface: `POST /api/contact`

mod handlers;

use crate::core::handler::{ContactReply, SubmissionHandler};
use crate::domain::ports::EmailSender;
use anyhow::Result;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const CONTACT_PATH: &str = "/api/contact";

/// Shared API state
pub struct ApiState<E: EmailSender> {
    pub handler: Arc<SubmissionHandler<E>>,
}

impl<E: EmailSender> ApiState<E> {
    pub fn new(handler: SubmissionHandler<E>) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

impl<E: EmailSender> Clone for ApiState<E> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl IntoResponse for ContactReply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

pub fn create_router<E: EmailSender + 'static>(handler: SubmissionHandler<E>) -> Router {
    Router::new()
        .route(CONTACT_PATH, post(handlers::submit_contact::<E>))
        .with_state(ApiState::new(handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Bind `bind_address` and serve until Ctrl-C.
pub async fn serve<E: EmailSender + 'static>(
    handler: SubmissionHandler<E>,
    bind_address: &str,
) -> Result<()> {
    let app = create_router(handler);

    let listener = TcpListener::bind(bind_address).await?;
    info!("🚀 Contact relay listening on {}{}", listener.local_addr()?, CONTACT_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Contact relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
