//! Postback endpoint handlers.
//!
//! The postback handler always answers `200 OK`. Signhost treats any other
//! answer as a failed delivery and keeps retrying, so rejections are only
//! visible in the logs.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::PostbackError;
use crate::queue::{PostbackSink, VerifiedPostback};
use crate::web::payload::{parse_body, PostbackPayload};
use crate::web::validator::PostbackValidator;
use crate::Config;

/// Body of every postback response.
pub const ACKNOWLEDGEMENT: &str = "OK";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub validator: Arc<PostbackValidator>,
    pub sink: Arc<dyn PostbackSink>,
}

impl AppState {
    pub fn new(config: Config, sink: Arc<dyn PostbackSink>) -> Self {
        let validator = PostbackValidator::from_config(&config);
        Self {
            config: Arc::new(config),
            validator: Arc::new(validator),
            sink,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Signhost Postback
// =============================================================================

/// Signhost postback endpoint.
///
/// This endpoint:
/// 1. Parses the raw body (a malformed body is logged and acknowledged)
/// 2. Validates the Authorization header, the fields and the checksum
/// 3. Hands valid postbacks to the sink on a background task
/// 4. Returns 200 OK in every case
pub async fn postback_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());

    let payload = match body
        .map_err(|e| PostbackError::UnreadableBody(e.body_text()))
        .and_then(|bytes| parse_body(&bytes))
    {
        Ok(payload) => payload,
        Err(e) => {
            warn!(
                error = %e,
                has_authorization = authorization.is_some(),
                "postback_malformed_body"
            );
            return acknowledge();
        }
    };

    info!(
        transaction_id = %payload.id(),
        status = ?payload.status,
        has_authorization = authorization.is_some(),
        "postback_received"
    );

    let verdict = state.validator.validate(&payload, authorization);

    if !verdict.is_valid() {
        warn!(
            transaction_id = %payload.id(),
            reasons = %verdict.messages().join(", "),
            "postback_rejected"
        );
        return acknowledge();
    }

    info!(
        transaction_id = %payload.id(),
        status = payload.status(),
        "postback_accepted"
    );

    dispatch(state.sink.clone(), payload);

    acknowledge()
}

/// Deliver a verified postback without holding up the acknowledgement.
fn dispatch(sink: Arc<dyn PostbackSink>, payload: PostbackPayload) {
    let postback = VerifiedPostback::from(payload);

    tokio::spawn(async move {
        if let Err(e) = sink.deliver(&postback).await {
            error!(
                transaction_id = %postback.transaction_id,
                error = %e,
                "postback_delivery_failed"
            );
        }
    });
}

fn acknowledge() -> (StatusCode, &'static str) {
    (StatusCode::OK, ACKNOWLEDGEMENT)
}
