//! Signhost postback receiver.
//!
//! Receives postbacks from the Signhost signing service, checks the
//! Authorization header and the SHA-1 checksum, and forwards verified
//! postbacks downstream. Every postback is acknowledged with `200 OK`.
//!
//! ## Architecture
//!
//! ```text
//! Signhost → POST /postback → PostbackValidator → PostbackSink → signhost_postbacks
//! ```

pub mod config;
pub mod error;
pub mod queue;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, PostbackError};
pub use queue::{LogSink, PostbackSink, Publisher, VerifiedPostback, POSTBACK_QUEUE};
pub use web::{router, AppState, PostbackPayload, PostbackValidator, RejectionReason, Verdict};
