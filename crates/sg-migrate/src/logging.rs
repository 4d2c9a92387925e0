//! Logging for the migration pipeline.
//!
//! The mapper reports degraded records through an injected capability rather
//! than a global conditional logger, so behavior is deterministic and tests
//! can run with the no-op implementation. The binary installs [`TraceLog`],
//! which forwards to `tracing`.
//!
//! stdout is reserved for the migration summary; all log output goes to
//! stderr. Filtering is controlled by the `SG_LOG` environment variable.

use tracing_subscriber::EnvFilter;

/// Capability for reporting per-record mapping diagnostics.
///
/// Implementations must not fail or block; a diagnostic is advisory and
/// never control flow.
pub trait MapperLog: Send + Sync {
    /// A legacy record could not be turned into a valid canonical event and
    /// was downgraded to "no mapping".
    fn degraded(&self, tag: &str, detail: &str);
}

/// Default implementation: discard diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl MapperLog for NoopLog {
    fn degraded(&self, _tag: &str, _detail: &str) {}
}

/// Forward diagnostics to `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceLog;

impl MapperLog for TraceLog {
    fn degraded(&self, tag: &str, detail: &str) {
        tracing::warn!(tag, detail, "legacy event downgraded to unmapped");
    }
}

/// Install the tracing subscriber for the CLI.
///
/// Logs go to stderr; `SG_LOG` overrides the default `warn` filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("SG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
