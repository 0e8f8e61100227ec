//! Queue module for downstream postback delivery.
//!
//! This module provides:
//! - The message type for verified postbacks
//! - The `PostbackSink` seam the web handler delivers through
//! - A RabbitMQ publisher and a log-only sink implementing it
//!
//! ## Architecture
//!
//! ```text
//! Signhost → POST /postback → validator → PostbackSink → signhost_postbacks queue
//! ```

pub mod publisher;
pub mod sink;
pub mod types;

pub use publisher::Publisher;
pub use sink::{LogSink, PostbackSink};
pub use types::{VerifiedPostback, POSTBACK_QUEUE};
