//! Web server module for receiving Signhost postbacks.
//!
//! This module provides a small web server that:
//! - Receives postbacks on `POST /postback`
//! - Verifies the Authorization header and the SHA-1 checksum
//! - Hands verified postbacks to the configured sink
//! - Returns 200 OK for every postback, valid or not

pub mod checksum;
pub mod handlers;
pub mod payload;
pub mod validator;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use checksum::{compute, constant_time_eq};
pub use handlers::{health, postback_webhook, AppState, HealthResponse, ACKNOWLEDGEMENT};
pub use payload::{parse_body, PostbackPayload};
pub use validator::{PostbackValidator, RejectionReason, Verdict};

/// Build the router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health))
        .route("/postback", post(postback_webhook))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
