//! Signhost postback checksum calculation.
//!
//! Signhost signs every postback with a SHA-1 digest over the transaction id,
//! the status code and the shared secret:
//!
//! ```text
//! sha1_hex(Id + "||" + Status + "|" + SharedSecret)
//! ```
//!
//! Note the double pipe between the id and the status. The delimiters are part
//! of the wire contract and must be reproduced exactly.

use sha1::{Digest, Sha1};
use subtle::ConstantTimeEq;

/// Compute the expected checksum for a postback.
///
/// # Arguments
///
/// * `transaction_id` - The `Id` field of the postback
/// * `status` - The `Status` field, rendered in decimal
/// * `shared_secret` - The Signhost shared secret
///
/// # Returns
///
/// The lowercase hex SHA-1 digest (40 characters).
pub fn compute(transaction_id: &str, status: i64, shared_secret: &str) -> String {
    let checksum_input = format!("{}||{}|{}", transaction_id, status, shared_secret);

    let mut hasher = Sha1::new();
    hasher.update(checksum_input.as_bytes());

    hex::encode(hasher.finalize())
}

/// Constant-time string comparison to prevent timing attacks.
///
/// Lengths are checked first; for equal lengths every byte is compared,
/// whatever the position of the first difference.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.as_bytes().ct_eq(b.as_bytes()).into()
}
