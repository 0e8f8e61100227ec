//! Queue message types for verified postbacks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::web::payload::PostbackPayload;

/// Queue name for verified Signhost postbacks.
pub const POSTBACK_QUEUE: &str = "signhost_postbacks";

/// A postback that passed every check, ready for downstream processing.
///
/// The checksum is dropped; the remaining transaction fields are passed on
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedPostback {
    /// Signhost transaction id
    pub transaction_id: String,
    /// Signhost transaction status code
    pub status: i64,
    /// Remaining fields of the postback body
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl From<PostbackPayload> for VerifiedPostback {
    fn from(payload: PostbackPayload) -> Self {
        Self {
            transaction_id: payload.id().to_string(),
            status: payload.status(),
            fields: payload.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::payload::parse_body;

    #[test]
    fn test_from_payload_drops_checksum() {
        let body = br#"{"Id":"TXN123","Status":30,"Checksum":"abc","Reference":"order-7"}"#;
        let payload = parse_body(body).unwrap();

        let postback = VerifiedPostback::from(payload);

        assert_eq!(postback.transaction_id, "TXN123");
        assert_eq!(postback.status, 30);
        assert_eq!(
            postback.fields.get("Reference"),
            Some(&Value::from("order-7"))
        );
        assert!(!postback.fields.contains_key("Checksum"));
    }

    #[test]
    fn test_serialization() {
        let body = br#"{"Id":"TXN123","Status":0,"Checksum":"abc"}"#;
        let payload = parse_body(body).unwrap();
        let postback = VerifiedPostback::from(payload);
        let json = serde_json::to_string(&postback).unwrap();

        assert!(json.contains("\"transaction_id\":\"TXN123\""));
        assert!(json.contains("\"status\":0"));
        assert!(!json.contains("abc"));
    }
}
