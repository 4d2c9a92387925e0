//! Saveguard event taxonomies and pure event utilities.
//!
//! This crate is the schema half of the telemetry pipeline:
//! - Canonical event shapes (the seven-tag versioned taxonomy)
//! - Legacy event shapes (the historical seventeen-tag taxonomy)
//! - A structural validator for arbitrary JSON payloads
//! - The trigger bitmask codec
//! - Risk score normalization and severity bucketing
//!
//! Everything here is pure: no I/O, no shared state, no panics on untrusted
//! input.

pub mod canonical;
pub mod legacy;
pub mod risk;
pub mod trigger;
pub mod validate;

pub use canonical::{
    CanonicalEvent, Envelope, IssueType, Outcome, PolicyState, ProtectionLevel, Resolution,
    Severity,
};
pub use legacy::LegacyEvent;
pub use risk::{normalize, normalize_batch, round1, round_to, severity_of, RiskScale};
pub use trigger::{decode, encode, Trigger};
pub use validate::{explain, validate};
