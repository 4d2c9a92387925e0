//! Saveguard telemetry shared foundations.
//!
//! This crate provides the pieces every other sg-* crate leans on:
//! - Fatal error types with category classification
//! - Event identifier generation
//! - Canonical schema versioning

pub mod error;
pub mod id;

pub use error::{Error, ErrorCategory, Result};
pub use id::new_id;

/// Version stamped into canonical events that carry no explicit version.
pub const EVENT_VERSION: &str = "1.0.0";
