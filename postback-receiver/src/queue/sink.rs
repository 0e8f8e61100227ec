//! Downstream delivery of verified postbacks.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::types::VerifiedPostback;

/// Receives postbacks that passed validation.
///
/// Called off the request path: the sender has already been acknowledged
/// and a delivery failure does not change that.
#[async_trait]
pub trait PostbackSink: Send + Sync {
    async fn deliver(&self, postback: &VerifiedPostback) -> Result<()>;
}

/// Sink that only records the postback in the logs.
///
/// Used when no message broker is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl PostbackSink for LogSink {
    async fn deliver(&self, postback: &VerifiedPostback) -> Result<()> {
        info!(
            transaction_id = %postback.transaction_id,
            status = postback.status,
            field_count = postback.fields.len(),
            "postback_delivered"
        );
        Ok(())
    }
}
