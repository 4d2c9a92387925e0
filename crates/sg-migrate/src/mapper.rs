//! Legacy-to-canonical event mapping.
//!
//! [`LegacyMapper::map_event`] is a total, pure, per-tag dispatch: every
//! legacy tag has an explicit case, tags with no canonical equivalent return
//! `None` by design (their value lives in aggregate metrics outside this
//! core). Mapping is a deterministic record-to-record projection with
//! documented defaults for fields the legacy shape cannot supply.
//!
//! Every mapped result is re-checked through the validator before being
//! returned. A construction that would be invalid is reported through the
//! injected [`MapperLog`] and downgraded to `None`; `map_event` never
//! panics, never errors, and `None` is the sole failure signal.
//!
//! Default rules (one rule set, applied everywhere):
//! - `protection_assigned` maps with severity `low`, outcome `saved`
//! - unknown legacy protection strings parse to `watch`
//! - unknown legacy risk levels parse to `medium`
//! - unknown legacy triggers parse to `manual`
//! - unknown dismiss actions parse to `ignored`

use crate::logging::{MapperLog, NoopLog};
use sg_common::new_id;
use sg_events::canonical::{
    CanonicalEvent, Envelope, IssueCreatedProps, IssueResolvedProps, IssueType, Outcome,
    PolicyChangedProps, PolicyState, ProtectionLevel, Resolution, SaveAttemptProps,
    SessionFinalizedProps, SessionRestoredProps, Severity, SnapshotCreatedProps,
};
use sg_events::legacy::LegacyEvent;
use sg_events::risk::{normalize, severity_of, RiskScale};
use sg_events::trigger::{self, Trigger};
use sg_events::validate;

/// Maps legacy events onto the canonical taxonomy.
///
/// Stateless apart from the injected logging capability; construct one per
/// call site, there is no shared instance.
pub struct LegacyMapper {
    log: Box<dyn MapperLog>,
}

impl Default for LegacyMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl LegacyMapper {
    /// Mapper with the no-op logger.
    pub fn new() -> Self {
        LegacyMapper {
            log: Box::new(NoopLog),
        }
    }

    /// Mapper with an explicit logging capability.
    pub fn with_log(log: Box<dyn MapperLog>) -> Self {
        LegacyMapper { log }
    }

    /// Map one legacy event. `None` means no canonical equivalent.
    pub fn map_event(&self, legacy: &LegacyEvent) -> Option<CanonicalEvent> {
        let built = self.build(legacy)?;
        // Re-validate the construction; an enum or shape slip becomes "no
        // mapping", never a panic or error.
        let value = match serde_json::to_value(&built) {
            Ok(value) => value,
            Err(err) => {
                self.log.degraded(legacy.tag(), &err.to_string());
                return None;
            }
        };
        if let Some(message) = validate::explain(&value) {
            self.log.degraded(legacy.tag(), &message);
            return None;
        }
        Some(built)
    }

    fn build(&self, legacy: &LegacyEvent) -> Option<CanonicalEvent> {
        match legacy {
            // Onboarding assignments never involve AI context and always
            // represent a completed save.
            LegacyEvent::ProtectionAssigned {
                timestamp,
                properties,
            } => Some(CanonicalEvent::SaveAttempt {
                envelope: Envelope::at(*timestamp),
                properties: SaveAttemptProps {
                    protection: parse_protection(&properties.protection),
                    severity: Severity::Low,
                    file_kind: file_kind_of(&properties.path),
                    reason: "onboarding".to_string(),
                    ai_present: false,
                    ai_burst: false,
                    outcome: Outcome::Saved,
                },
            }),

            LegacyEvent::SaveBlocked {
                timestamp,
                properties,
            } => Some(CanonicalEvent::SaveAttempt {
                envelope: Envelope::at(*timestamp),
                properties: SaveAttemptProps {
                    protection: ProtectionLevel::Block,
                    severity: severity_of(normalize(properties.risk_score, RiskScale::Hundred)),
                    file_kind: file_kind_of(&properties.path),
                    reason: properties.reason.clone(),
                    ai_present: properties.ai_assisted,
                    ai_burst: false,
                    outcome: Outcome::Blocked,
                },
            }),

            LegacyEvent::SaveWarned {
                timestamp,
                properties,
            } => Some(CanonicalEvent::SaveAttempt {
                envelope: Envelope::at(*timestamp),
                properties: SaveAttemptProps {
                    protection: ProtectionLevel::Warn,
                    severity: severity_of(normalize(properties.risk_score, RiskScale::Hundred)),
                    file_kind: file_kind_of(&properties.path),
                    reason: "risk_warning".to_string(),
                    ai_present: properties.ai_assisted,
                    ai_burst: false,
                    outcome: if properties.acknowledged {
                        Outcome::Saved
                    } else {
                        Outcome::Canceled
                    },
                },
            }),

            // The legacy shape has no snapshot id; generate one.
            LegacyEvent::BackupCreated {
                timestamp,
                properties,
            } => Some(CanonicalEvent::SnapshotCreated {
                envelope: Envelope::at(*timestamp),
                properties: SnapshotCreatedProps {
                    snapshot_id: new_id(Some("snap")),
                    protection: parse_protection(&properties.protection),
                    file_kind: file_kind_of(&properties.path),
                    size_bytes: properties.size_bytes,
                    dedup_hit: properties.deduplicated,
                    trigger: parse_trigger(&properties.trigger),
                },
            }),

            // The legacy shape has no session id; generate a placeholder.
            // Unknown trigger names are skipped from the mask.
            LegacyEvent::SessionEnd {
                timestamp,
                properties,
            } => Some(CanonicalEvent::SessionFinalized {
                envelope: Envelope::at(*timestamp),
                properties: SessionFinalizedProps {
                    session_id: new_id(Some("session")),
                    trigger_mask: trigger::encode(
                        properties.triggers.iter().filter_map(|t| Trigger::parse(t)),
                    ),
                    duration_ms: properties.duration_ms,
                    files_count: properties.file_count,
                    dedup_hits: properties.dedup_count,
                },
            }),

            LegacyEvent::PatternDetected {
                timestamp,
                properties,
            } => Some(CanonicalEvent::IssueCreated {
                envelope: Envelope::at(*timestamp),
                properties: IssueCreatedProps {
                    issue_type: issue_type_of(&properties.patterns),
                    severity: parse_risk_level(&properties.risk_level),
                    file_kind: file_kind_of(&properties.path),
                    patterns: properties.patterns.clone(),
                },
            }),

            LegacyEvent::IssueDismissed {
                timestamp,
                properties,
            } => Some(CanonicalEvent::IssueResolved {
                envelope: Envelope::at(*timestamp),
                properties: IssueResolvedProps {
                    issue_type: self.issue_type_or_degrade(legacy, &properties.issue_type)?,
                    resolution: parse_resolution(&properties.action),
                    time_to_resolve_ms: properties.open_ms,
                },
            }),

            LegacyEvent::IssueFixed {
                timestamp,
                properties,
            } => Some(CanonicalEvent::IssueResolved {
                envelope: Envelope::at(*timestamp),
                properties: IssueResolvedProps {
                    issue_type: self.issue_type_or_degrade(legacy, &properties.issue_type)?,
                    resolution: Resolution::Fixed,
                    time_to_resolve_ms: properties.fix_ms,
                },
            }),

            // Only a count survives from the legacy shape; restored file
            // names are placeholders of matching arity.
            LegacyEvent::BackupRestored {
                timestamp,
                properties,
            } => Some(CanonicalEvent::SessionRestored {
                envelope: Envelope::at(*timestamp),
                properties: SessionRestoredProps {
                    time_to_restore_ms: properties.duration,
                    reason: if properties.success {
                        "user_initiated".to_string()
                    } else {
                        "crash_recovery".to_string()
                    },
                    files_restored: (1..=properties.files_restored)
                        .map(|n| format!("restored-{}", n))
                        .collect(),
                },
            }),

            LegacyEvent::ProtectionChanged {
                timestamp,
                properties,
            } => Some(CanonicalEvent::PolicyChanged {
                envelope: Envelope::at(*timestamp),
                properties: PolicyChangedProps {
                    from: parse_policy_state(&properties.from),
                    to: parse_policy_state(&properties.to),
                    reason: properties.reason.clone(),
                },
            }),

            LegacyEvent::ProtectionRemoved {
                timestamp,
                properties,
            } => Some(CanonicalEvent::PolicyChanged {
                envelope: Envelope::at(*timestamp),
                properties: PolicyChangedProps {
                    from: parse_policy_state(&properties.previous),
                    to: PolicyState::Unprotected,
                    reason: "protection_removed".to_string(),
                },
            }),

            // No canonical equivalent; these feed aggregate metrics outside
            // this core.
            LegacyEvent::ExtensionInstalled { .. }
            | LegacyEvent::ExtensionUpdated { .. }
            | LegacyEvent::SettingsOpened { .. }
            | LegacyEvent::DailySummary { .. }
            | LegacyEvent::PerfSample { .. }
            | LegacyEvent::ErrorReported { .. } => None,
        }
    }

    fn issue_type_or_degrade(&self, legacy: &LegacyEvent, raw: &str) -> Option<IssueType> {
        let parsed = parse_issue_type(raw);
        if parsed.is_none() {
            self.log
                .degraded(legacy.tag(), &format!("unrecognized issue type `{}`", raw));
        }
        parsed
    }
}

/// Parse a legacy protection string. Unknown values default to `watch`.
fn parse_protection(raw: &str) -> ProtectionLevel {
    match raw {
        "watch" | "monitor" => ProtectionLevel::Watch,
        "warn" | "warning" => ProtectionLevel::Warn,
        "block" | "strict" => ProtectionLevel::Block,
        _ => ProtectionLevel::Watch,
    }
}

/// Parse a legacy policy state string, including `unprotected` spellings.
fn parse_policy_state(raw: &str) -> PolicyState {
    match raw {
        "unprotected" | "none" | "off" => PolicyState::Unprotected,
        other => parse_protection(other).into(),
    }
}

/// Parse a legacy risk level. Unknown values default to `medium`.
fn parse_risk_level(raw: &str) -> Severity {
    match raw {
        "low" => Severity::Low,
        "medium" => Severity::Medium,
        "high" => Severity::High,
        "critical" => Severity::Critical,
        _ => Severity::Medium,
    }
}

/// Parse a legacy issue-type string. `None` for unrecognized types.
fn parse_issue_type(raw: &str) -> Option<IssueType> {
    match raw {
        "secret" => Some(IssueType::Secret),
        "mock" => Some(IssueType::Mock),
        "phantom" => Some(IssueType::Phantom),
        _ => None,
    }
}

/// Parse a legacy dismiss action. Unknown actions default to `ignored`.
fn parse_resolution(action: &str) -> Resolution {
    match action {
        "fix" | "fixed" => Resolution::Fixed,
        "allowlist" | "whitelist" => Resolution::Allowlisted,
        _ => Resolution::Ignored,
    }
}

/// Parse a legacy trigger name. Unknown names default to `manual`.
fn parse_trigger(raw: &str) -> Trigger {
    Trigger::parse(raw).unwrap_or(Trigger::Manual)
}

/// Classify an issue from its detected pattern list.
///
/// Patterns mentioning mocks/tests win over phantom/unused; anything else is
/// treated as a secret.
fn issue_type_of(patterns: &[String]) -> IssueType {
    if patterns
        .iter()
        .any(|p| p.contains("mock") || p.contains("test"))
    {
        IssueType::Mock
    } else if patterns
        .iter()
        .any(|p| p.contains("phantom") || p.contains("unused"))
    {
        IssueType::Phantom
    } else {
        IssueType::Secret
    }
}

/// Coarse file kind from a path.
fn file_kind_of(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    if name.contains(".env") {
        return "config".to_string();
    }
    let ext = name.rsplit('.').next().unwrap_or("");
    let kind = match ext {
        "rs" | "ts" | "tsx" | "js" | "jsx" | "py" | "go" | "java" | "c" | "cpp" | "rb" => "source",
        "json" | "yaml" | "yml" | "toml" | "ini" | "env" => "config",
        "md" | "txt" | "rst" => "doc",
        _ => "other",
    };
    kind.to_string()
}
