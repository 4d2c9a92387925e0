//! Legacy telemetry event shapes.
//!
//! The historical taxonomy predates the canonical one: seventeen ad-hoc
//! tags, camelCase property names, no envelope beyond a timestamp. Legacy
//! and canonical taxonomies are disjoint type systems connected only through
//! the mapper in sg-migrate.
//!
//! Wire shape: `{ "event": <tag>, "properties": {...}, "timestamp": <ms> }`.

use serde::{Deserialize, Serialize};

/// A legacy telemetry event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LegacyEvent {
    ProtectionAssigned {
        timestamp: i64,
        properties: ProtectionAssignedProps,
    },
    SaveBlocked {
        timestamp: i64,
        properties: SaveBlockedProps,
    },
    SaveWarned {
        timestamp: i64,
        properties: SaveWarnedProps,
    },
    BackupCreated {
        timestamp: i64,
        properties: BackupCreatedProps,
    },
    SessionEnd {
        timestamp: i64,
        properties: SessionEndProps,
    },
    PatternDetected {
        timestamp: i64,
        properties: PatternDetectedProps,
    },
    IssueDismissed {
        timestamp: i64,
        properties: IssueDismissedProps,
    },
    IssueFixed {
        timestamp: i64,
        properties: IssueFixedProps,
    },
    BackupRestored {
        timestamp: i64,
        properties: BackupRestoredProps,
    },
    ProtectionChanged {
        timestamp: i64,
        properties: ProtectionChangedProps,
    },
    ProtectionRemoved {
        timestamp: i64,
        properties: ProtectionRemovedProps,
    },
    ExtensionInstalled {
        timestamp: i64,
        properties: ExtensionInstalledProps,
    },
    ExtensionUpdated {
        timestamp: i64,
        properties: ExtensionUpdatedProps,
    },
    SettingsOpened {
        timestamp: i64,
        properties: SettingsOpenedProps,
    },
    DailySummary {
        timestamp: i64,
        properties: DailySummaryProps,
    },
    PerfSample {
        timestamp: i64,
        properties: PerfSampleProps,
    },
    ErrorReported {
        timestamp: i64,
        properties: ErrorReportedProps,
    },
}

impl LegacyEvent {
    /// Wire tag for this event.
    pub fn tag(&self) -> &'static str {
        match self {
            LegacyEvent::ProtectionAssigned { .. } => "protection_assigned",
            LegacyEvent::SaveBlocked { .. } => "save_blocked",
            LegacyEvent::SaveWarned { .. } => "save_warned",
            LegacyEvent::BackupCreated { .. } => "backup_created",
            LegacyEvent::SessionEnd { .. } => "session_end",
            LegacyEvent::PatternDetected { .. } => "pattern_detected",
            LegacyEvent::IssueDismissed { .. } => "issue_dismissed",
            LegacyEvent::IssueFixed { .. } => "issue_fixed",
            LegacyEvent::BackupRestored { .. } => "backup_restored",
            LegacyEvent::ProtectionChanged { .. } => "protection_changed",
            LegacyEvent::ProtectionRemoved { .. } => "protection_removed",
            LegacyEvent::ExtensionInstalled { .. } => "extension_installed",
            LegacyEvent::ExtensionUpdated { .. } => "extension_updated",
            LegacyEvent::SettingsOpened { .. } => "settings_opened",
            LegacyEvent::DailySummary { .. } => "daily_summary",
            LegacyEvent::PerfSample { .. } => "perf_sample",
            LegacyEvent::ErrorReported { .. } => "error_reported",
        }
    }

    /// Occurrence time, epoch milliseconds.
    pub fn timestamp(&self) -> i64 {
        match self {
            LegacyEvent::ProtectionAssigned { timestamp, .. }
            | LegacyEvent::SaveBlocked { timestamp, .. }
            | LegacyEvent::SaveWarned { timestamp, .. }
            | LegacyEvent::BackupCreated { timestamp, .. }
            | LegacyEvent::SessionEnd { timestamp, .. }
            | LegacyEvent::PatternDetected { timestamp, .. }
            | LegacyEvent::IssueDismissed { timestamp, .. }
            | LegacyEvent::IssueFixed { timestamp, .. }
            | LegacyEvent::BackupRestored { timestamp, .. }
            | LegacyEvent::ProtectionChanged { timestamp, .. }
            | LegacyEvent::ProtectionRemoved { timestamp, .. }
            | LegacyEvent::ExtensionInstalled { timestamp, .. }
            | LegacyEvent::ExtensionUpdated { timestamp, .. }
            | LegacyEvent::SettingsOpened { timestamp, .. }
            | LegacyEvent::DailySummary { timestamp, .. }
            | LegacyEvent::PerfSample { timestamp, .. }
            | LegacyEvent::ErrorReported { timestamp, .. } => *timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionAssignedProps {
    pub path: String,
    pub protection: String,
    /// Which onboarding flow assigned protection ("wizard", "auto", ...).
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBlockedProps {
    pub path: String,
    /// Risk score on the historical 0-100 scale.
    pub risk_score: f64,
    pub ai_assisted: bool,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWarnedProps {
    pub path: String,
    pub risk_score: f64,
    pub ai_assisted: bool,
    /// Whether the user acknowledged the warning and saved anyway.
    pub acknowledged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupCreatedProps {
    pub path: String,
    pub protection: String,
    pub size_bytes: u64,
    pub deduplicated: bool,
    pub trigger: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndProps {
    pub duration_ms: u64,
    pub file_count: u32,
    pub dedup_count: u32,
    pub triggers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDetectedProps {
    pub path: String,
    pub patterns: Vec<String>,
    pub risk_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDismissedProps {
    pub issue_type: String,
    /// What the user did: "fix", "ignore", "allowlist", ...
    pub action: String,
    /// How long the issue was open, milliseconds.
    pub open_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueFixedProps {
    pub issue_type: String,
    pub fix_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRestoredProps {
    pub files_restored: u32,
    /// Restore duration, milliseconds.
    pub duration: u64,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionChangedProps {
    pub path: String,
    pub from: String,
    pub to: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionRemovedProps {
    pub path: String,
    pub previous: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionInstalledProps {
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionUpdatedProps {
    pub from_version: String,
    pub to_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOpenedProps {
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummaryProps {
    pub saves_protected: u32,
    pub issues_found: u32,
    pub backups: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfSampleProps {
    pub op_name: String,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReportedProps {
    pub message: String,
    pub stack: Option<String>,
}
