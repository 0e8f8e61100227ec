//! Postback payload type and body parsing.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::PostbackError;

/// Signhost postback JSON payload.
///
/// Signhost posts the whole transaction object; only `Id`, `Status` and
/// `Checksum` take part in verification. Every field may be missing or
/// `null`, which is kept distinct from an empty value so the structural check
/// can report it. The remaining fields are kept in `extra`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostbackPayload {
    #[serde(default, rename = "Id")]
    pub id: Option<String>,
    #[serde(default, rename = "Status")]
    pub status: Option<i64>,
    #[serde(default, rename = "Checksum")]
    pub checksum: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PostbackPayload {
    /// Transaction id, or `""` when absent.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Status code, or `0` when absent.
    pub fn status(&self) -> i64 {
        self.status.unwrap_or_default()
    }

    /// Checksum, or `""` when absent.
    pub fn checksum(&self) -> &str {
        self.checksum.as_deref().unwrap_or_default()
    }

    /// Whether all fields needed for verification are present and non-empty.
    ///
    /// A status of `0` is a legitimate value and counts as present.
    pub fn has_required_fields(&self) -> bool {
        !self.id().is_empty() && self.status.is_some() && !self.checksum().is_empty()
    }
}

/// Parse a raw request body into a [`PostbackPayload`].
///
/// Invalid JSON, a JSON value other than an object, or fields of the wrong
/// type all yield [`PostbackError::MalformedBody`].
pub fn parse_body(body: &[u8]) -> Result<PostbackPayload, PostbackError> {
    Ok(serde_json::from_slice(body)?)
}
