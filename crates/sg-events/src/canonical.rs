//! Canonical telemetry event shapes.
//!
//! The canonical taxonomy has exactly seven tags. Every event carries the
//! same envelope (`event_version`, `timestamp`) plus a per-tag `properties`
//! object; the tag is the sole discriminator and required property sets for
//! different tags never overlap.
//!
//! Wire shape:
//! ```json
//! {
//!   "event": "save_attempt",
//!   "event_version": "1.0.0",
//!   "timestamp": 1700000000000,
//!   "properties": { ... }
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sg_common::EVENT_VERSION;

/// Protection level applied to a watched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionLevel {
    Watch,
    Warn,
    Block,
}

impl ProtectionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectionLevel::Watch => "watch",
            ProtectionLevel::Warn => "warn",
            ProtectionLevel::Block => "block",
        }
    }
}

impl std::fmt::Display for ProtectionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Policy state for policy-change transitions.
///
/// Identical to [`ProtectionLevel`] plus `unprotected`, which is only legal
/// as the endpoint of a policy change (a file can be released from
/// protection, but no other event ever reports an unprotected file).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyState {
    Unprotected,
    Watch,
    Warn,
    Block,
}

impl From<ProtectionLevel> for PolicyState {
    fn from(level: ProtectionLevel) -> Self {
        match level {
            ProtectionLevel::Watch => PolicyState::Watch,
            ProtectionLevel::Warn => PolicyState::Warn,
            ProtectionLevel::Block => PolicyState::Block,
        }
    }
}

/// Risk severity bucket, totally ordered low < medium < high < critical.
///
/// Derived from a 0-10 risk score by [`crate::risk::severity_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a save attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Saved,
    Canceled,
    Blocked,
}

/// Classification of a detected issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Secret,
    Mock,
    Phantom,
}

/// How an issue was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Fixed,
    Ignored,
    Allowlisted,
}

fn default_event_version() -> String {
    EVENT_VERSION.to_string()
}

fn capture_time_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Shared envelope carried by every canonical event.
///
/// Both fields default when absent from the wire: `event_version` to the
/// current canonical version, `timestamp` to capture time. Absence is not a
/// validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default = "default_event_version")]
    pub event_version: String,
    #[serde(default = "capture_time_ms")]
    pub timestamp: i64,
}

impl Default for Envelope {
    fn default() -> Self {
        Envelope {
            event_version: default_event_version(),
            timestamp: capture_time_ms(),
        }
    }
}

impl Envelope {
    /// Envelope with the default version and an explicit timestamp.
    pub fn at(timestamp: i64) -> Self {
        Envelope {
            event_version: default_event_version(),
            timestamp,
        }
    }
}

/// Properties of a `save_attempt` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveAttemptProps {
    pub protection: ProtectionLevel,
    pub severity: Severity,
    pub file_kind: String,
    pub reason: String,
    pub ai_present: bool,
    pub ai_burst: bool,
    pub outcome: Outcome,
}

/// Properties of a `snapshot_created` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotCreatedProps {
    pub snapshot_id: String,
    pub protection: ProtectionLevel,
    pub file_kind: String,
    pub size_bytes: u64,
    /// Stored content matched existing content and was not duplicated.
    pub dedup_hit: bool,
    pub trigger: crate::trigger::Trigger,
}

/// Properties of a `session_finalized` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFinalizedProps {
    pub session_id: String,
    /// Set of triggers that fired during the session, bitmask-encoded.
    pub trigger_mask: u32,
    pub duration_ms: u64,
    pub files_count: u32,
    pub dedup_hits: u32,
}

/// Properties of an `issue_created` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueCreatedProps {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub file_kind: String,
    pub patterns: Vec<String>,
}

/// Properties of an `issue_resolved` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueResolvedProps {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub resolution: Resolution,
    pub time_to_resolve_ms: u64,
}

/// Properties of a `session_restored` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRestoredProps {
    pub time_to_restore_ms: u64,
    pub reason: String,
    pub files_restored: Vec<String>,
}

/// Properties of a `policy_changed` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyChangedProps {
    pub from: PolicyState,
    pub to: PolicyState,
    pub reason: String,
}

/// A canonical telemetry event.
///
/// Immutable once constructed; values pass through the pipeline and are
/// discarded or written out, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CanonicalEvent {
    SaveAttempt {
        #[serde(flatten)]
        envelope: Envelope,
        properties: SaveAttemptProps,
    },
    SnapshotCreated {
        #[serde(flatten)]
        envelope: Envelope,
        properties: SnapshotCreatedProps,
    },
    SessionFinalized {
        #[serde(flatten)]
        envelope: Envelope,
        properties: SessionFinalizedProps,
    },
    IssueCreated {
        #[serde(flatten)]
        envelope: Envelope,
        properties: IssueCreatedProps,
    },
    IssueResolved {
        #[serde(flatten)]
        envelope: Envelope,
        properties: IssueResolvedProps,
    },
    SessionRestored {
        #[serde(flatten)]
        envelope: Envelope,
        properties: SessionRestoredProps,
    },
    PolicyChanged {
        #[serde(flatten)]
        envelope: Envelope,
        properties: PolicyChangedProps,
    },
}

impl CanonicalEvent {
    /// Wire tag for this event.
    pub fn tag(&self) -> &'static str {
        match self {
            CanonicalEvent::SaveAttempt { .. } => "save_attempt",
            CanonicalEvent::SnapshotCreated { .. } => "snapshot_created",
            CanonicalEvent::SessionFinalized { .. } => "session_finalized",
            CanonicalEvent::IssueCreated { .. } => "issue_created",
            CanonicalEvent::IssueResolved { .. } => "issue_resolved",
            CanonicalEvent::SessionRestored { .. } => "session_restored",
            CanonicalEvent::PolicyChanged { .. } => "policy_changed",
        }
    }

    /// Shared envelope.
    pub fn envelope(&self) -> &Envelope {
        match self {
            CanonicalEvent::SaveAttempt { envelope, .. }
            | CanonicalEvent::SnapshotCreated { envelope, .. }
            | CanonicalEvent::SessionFinalized { envelope, .. }
            | CanonicalEvent::IssueCreated { envelope, .. }
            | CanonicalEvent::IssueResolved { envelope, .. }
            | CanonicalEvent::SessionRestored { envelope, .. }
            | CanonicalEvent::PolicyChanged { envelope, .. } => envelope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::Trigger;
    use serde_json::json;

    #[test]
    fn save_attempt_round_trips() {
        let event = CanonicalEvent::SaveAttempt {
            envelope: Envelope::at(1_700_000_000_000),
            properties: SaveAttemptProps {
                protection: ProtectionLevel::Block,
                severity: Severity::High,
                file_kind: "source".to_string(),
                reason: "risk_threshold".to_string(),
                ai_present: true,
                ai_burst: false,
                outcome: Outcome::Blocked,
            },
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "save_attempt");
        assert_eq!(value["timestamp"], 1_700_000_000_000_i64);
        assert_eq!(value["properties"]["outcome"], "blocked");
        let back: CanonicalEvent = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn envelope_defaults_apply_when_absent() {
        let value = json!({
            "event": "policy_changed",
            "properties": {
                "from": "watch",
                "to": "block",
                "reason": "manual_escalation"
            }
        });
        let event: CanonicalEvent = serde_json::from_value(value).unwrap();
        assert_eq!(event.envelope().event_version, "1.0.0");
        assert!(event.envelope().timestamp > 0);
    }

    #[test]
    fn issue_type_serializes_as_type() {
        let event = CanonicalEvent::IssueCreated {
            envelope: Envelope::at(1),
            properties: IssueCreatedProps {
                issue_type: IssueType::Mock,
                severity: Severity::Medium,
                file_kind: "source".to_string(),
                patterns: vec!["mock_server".to_string()],
            },
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["properties"]["type"], "mock");
    }

    #[test]
    fn snapshot_trigger_uses_wire_names() {
        let event = CanonicalEvent::SnapshotCreated {
            envelope: Envelope::at(2),
            properties: SnapshotCreatedProps {
                snapshot_id: "snap-0011aabbccdd".to_string(),
                protection: ProtectionLevel::Watch,
                file_kind: "config".to_string(),
                size_bytes: 2048,
                dedup_hit: true,
                trigger: Trigger::PreCommit,
            },
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["properties"]["trigger"], "pre-commit");
    }

    #[test]
    fn severity_is_totally_ordered() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }
}
