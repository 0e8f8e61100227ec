//! Postback validation.
//!
//! Every postback goes through three checks, in order:
//!
//! 1. The `Authorization` header matches the configured token
//! 2. `Id`, `Status` and `Checksum` are present
//! 3. `Checksum` matches the SHA-1 computed with the shared secret
//!
//! All checks always run and each failing check contributes one reason to
//! the [`Verdict`]. The checksum check uses the payload defaults (`""`, `0`)
//! when fields are missing, so it still runs for incomplete payloads.

use std::fmt;

use tracing::debug;

use crate::web::checksum::{compute, constant_time_eq};
use crate::web::payload::PostbackPayload;
use crate::Config;

/// Why a postback was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    InvalidAuthorization,
    MissingRequiredFields,
    InvalidChecksum,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::InvalidAuthorization => "Invalid Authorization header",
            RejectionReason::MissingRequiredFields => "Missing required fields",
            RejectionReason::InvalidChecksum => "Invalid checksum",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated result of all checks for one postback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    reasons: Vec<RejectionReason>,
}

impl Verdict {
    /// A postback is valid when no check failed.
    pub fn is_valid(&self) -> bool {
        self.reasons.is_empty()
    }

    /// Rejection reasons in check order.
    pub fn reasons(&self) -> &[RejectionReason] {
        &self.reasons
    }

    /// Rejection reasons as their human-readable messages.
    pub fn messages(&self) -> Vec<&'static str> {
        self.reasons.iter().map(RejectionReason::as_str).collect()
    }

    fn reject(&mut self, reason: RejectionReason) {
        self.reasons.push(reason);
    }
}

/// Validates postbacks against the configured credentials.
#[derive(Clone)]
pub struct PostbackValidator {
    shared_secret: String,
    expected_auth_header: String,
}

impl PostbackValidator {
    pub fn new(shared_secret: impl Into<String>, expected_auth_header: impl Into<String>) -> Self {
        Self {
            shared_secret: shared_secret.into(),
            expected_auth_header: expected_auth_header.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.signhost_shared_secret.clone(),
            config.signhost_auth_header.clone(),
        )
    }

    /// Run all checks against a parsed payload.
    ///
    /// `authorization_header` is `None` when the request carried no
    /// (readable) `Authorization` header.
    pub fn validate(
        &self,
        payload: &PostbackPayload,
        authorization_header: Option<&str>,
    ) -> Verdict {
        let mut verdict = Verdict::default();

        let auth_ok = authorization_header
            .map(|provided| constant_time_eq(provided, &self.expected_auth_header))
            .unwrap_or(false);
        if !auth_ok {
            verdict.reject(RejectionReason::InvalidAuthorization);
        }

        if !payload.has_required_fields() {
            verdict.reject(RejectionReason::MissingRequiredFields);
        }

        let expected_checksum = compute(payload.id(), payload.status(), &self.shared_secret);
        if !constant_time_eq(payload.checksum(), &expected_checksum) {
            verdict.reject(RejectionReason::InvalidChecksum);
        }

        debug!(
            has_authorization = authorization_header.is_some(),
            auth_ok = auth_ok,
            checksum_length = payload.checksum().len(),
            reasons = verdict.reasons.len(),
            "postback_validated"
        );

        verdict
    }
}

impl fmt::Debug for PostbackValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostbackValidator")
            .field("shared_secret", &"<redacted>")
            .field("expected_auth_header", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::payload::parse_body;

    const SECRET: &str = "SECRET";
    const AUTH: &str = "Bearer postback-token";

    fn validator() -> PostbackValidator {
        PostbackValidator::new(SECRET, AUTH)
    }

    fn payload(id: Option<&str>, status: Option<i64>, checksum: Option<&str>) -> PostbackPayload {
        PostbackPayload {
            id: id.map(str::to_string),
            status,
            checksum: checksum.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_postback() {
        let checksum = compute("TXN123", 1, SECRET);
        let postback = payload(Some("TXN123"), Some(1), Some(&checksum));
        let verdict = validator().validate(&postback, Some(AUTH));

        assert!(verdict.is_valid());
        assert!(verdict.reasons().is_empty());
    }

    #[test]
    fn test_valid_postback_from_json() {
        let checksum = "43b6f313766f52e067444286628220a399709ead";
        let body = format!(r#"{{"Id":"TXN123","Status":1,"Checksum":"{}"}}"#, checksum);
        let postback = parse_body(body.as_bytes()).unwrap();
        let verdict = validator().validate(&postback, Some(AUTH));

        assert!(verdict.is_valid());
    }

    #[test]
    fn test_wrong_authorization_header() {
        let checksum = compute("TXN123", 1, SECRET);
        let verdict = validator().validate(
            &payload(Some("TXN123"), Some(1), Some(&checksum)),
            Some("Bearer wrong-token"),
        );

        assert!(!verdict.is_valid());
        assert_eq!(verdict.messages(), vec!["Invalid Authorization header"]);
    }

    #[test]
    fn test_missing_authorization_header() {
        let checksum = compute("TXN123", 1, SECRET);
        let postback = payload(Some("TXN123"), Some(1), Some(&checksum));
        let verdict = validator().validate(&postback, None);

        assert_eq!(verdict.reasons(), &[RejectionReason::InvalidAuthorization]);
    }

    #[test]
    fn test_authorization_header_prefix_is_rejected() {
        let checksum = compute("TXN123", 1, SECRET);
        let verdict = validator().validate(
            &payload(Some("TXN123"), Some(1), Some(&checksum)),
            Some("Bearer postback-token "),
        );

        assert_eq!(verdict.reasons(), &[RejectionReason::InvalidAuthorization]);
    }

    #[test]
    fn test_empty_id_fails_structure_and_checksum() {
        let checksum = compute("TXN123", 1, SECRET);
        let postback = payload(Some(""), Some(1), Some(&checksum));
        let verdict = validator().validate(&postback, Some(AUTH));

        assert_eq!(
            verdict.messages(),
            vec!["Missing required fields", "Invalid checksum"]
        );
    }

    #[test]
    fn test_empty_id_with_checksum_over_empty_id() {
        // The checksum check runs on the defaults; only the structural check fails
        let checksum = compute("", 1, SECRET);
        let postback = payload(Some(""), Some(1), Some(&checksum));
        let verdict = validator().validate(&postback, Some(AUTH));

        assert!(!verdict.is_valid());
        assert_eq!(verdict.messages(), vec!["Missing required fields"]);
    }

    #[test]
    fn test_missing_status_uses_zero_for_checksum() {
        let checksum = compute("TXN123", 0, SECRET);
        let postback = payload(Some("TXN123"), None, Some(&checksum));
        let verdict = validator().validate(&postback, Some(AUTH));

        assert_eq!(verdict.reasons(), &[RejectionReason::MissingRequiredFields]);
    }

    #[test]
    fn test_status_zero_is_valid() {
        let checksum = compute("TXN123", 0, SECRET);
        let postback = payload(Some("TXN123"), Some(0), Some(&checksum));
        let verdict = validator().validate(&postback, Some(AUTH));

        assert!(verdict.is_valid());
    }

    #[test]
    fn test_all_fields_missing_does_not_panic() {
        let postback = payload(None, None, None);
        let verdict = validator().validate(&postback, None);

        assert_eq!(
            verdict.reasons(),
            &[
                RejectionReason::InvalidAuthorization,
                RejectionReason::MissingRequiredFields,
                RejectionReason::InvalidChecksum,
            ]
        );
    }

    #[test]
    fn test_wrong_checksum() {
        let wrong = compute("TXN123", 2, SECRET);
        let postback = payload(Some("TXN123"), Some(1), Some(&wrong));
        let verdict = validator().validate(&postback, Some(AUTH));

        assert_eq!(verdict.messages(), vec!["Invalid checksum"]);
    }

    #[test]
    fn test_checksum_with_other_secret() {
        let checksum = compute("TXN123", 1, "OTHER");
        let postback = payload(Some("TXN123"), Some(1), Some(&checksum));
        let verdict = validator().validate(&postback, Some(AUTH));

        assert_eq!(verdict.reasons(), &[RejectionReason::InvalidChecksum]);
    }

    #[test]
    fn test_uppercase_checksum_is_rejected() {
        let checksum = compute("TXN123", 1, SECRET).to_uppercase();
        let postback = payload(Some("TXN123"), Some(1), Some(&checksum));
        let verdict = validator().validate(&postback, Some(AUTH));

        assert_eq!(verdict.reasons(), &[RejectionReason::InvalidChecksum]);
    }

    #[test]
    fn test_truncated_checksum_is_rejected() {
        let checksum = compute("TXN123", 1, SECRET);
        let verdict = validator().validate(
            &payload(Some("TXN123"), Some(1), Some(&checksum[..39])),
            Some(AUTH),
        );

        assert_eq!(verdict.reasons(), &[RejectionReason::InvalidChecksum]);
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let debug = format!("{:?}", validator());

        assert!(!debug.contains(SECRET));
        assert!(!debug.contains("postback-token"));
    }
}
