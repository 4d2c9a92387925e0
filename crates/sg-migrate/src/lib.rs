//! Legacy-to-canonical migration for Saveguard telemetry.
//!
//! - [`mapper`]: total per-tag mapping from legacy events to canonical
//!   events, with documented degradation and validator-checked output
//! - [`driver`]: batch orchestration over in-memory collections and whole
//!   JSON array files
//! - [`logging`]: the injected logging capability and tracing setup

pub mod driver;
pub mod logging;
pub mod mapper;

pub use driver::{migrate, migrate_file, unmapped_path, MigrationOutcome, MigrationReport};
pub use logging::{init_logging, MapperLog, NoopLog, TraceLog};
pub use mapper::LegacyMapper;
