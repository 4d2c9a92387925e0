//! Structural validator for canonical events.
//!
//! The registry half of this module is declarative: per-tag tables of
//! required property names and primitive kinds, consumed by the checking
//! code. Validation is pure and total over arbitrary JSON: it never panics,
//! all failures surface as a diagnostic string. Unknown extra properties are
//! ignored (additive-compatible); missing required properties and wrong
//! primitive types fail deterministically. Absent `event_version` and
//! `timestamp` are not failures, they default at deserialization time.

use serde_json::Value;

/// The seven canonical event tags.
pub const CANONICAL_TAGS: [&str; 7] = [
    "save_attempt",
    "snapshot_created",
    "session_finalized",
    "issue_created",
    "issue_resolved",
    "session_restored",
    "policy_changed",
];

const PROTECTION_LEVELS: &[&str] = &["watch", "warn", "block"];
const POLICY_STATES: &[&str] = &["unprotected", "watch", "warn", "block"];
const SEVERITIES: &[&str] = &["low", "medium", "high", "critical"];
const OUTCOMES: &[&str] = &["saved", "canceled", "blocked"];
const ISSUE_TYPES: &[&str] = &["secret", "mock", "phantom"];
const RESOLUTIONS: &[&str] = &["fixed", "ignored", "allowlisted"];
const TRIGGERS: &[&str] = &["filewatch", "pre-commit", "manual", "idle-finalize"];

/// Primitive kind a required property must have.
#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Str,
    UInt,
    Bool,
    Enum(&'static [&'static str]),
    StrList,
}

/// One required property of a canonical tag.
struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

const SAVE_ATTEMPT: &[FieldSpec] = &[
    field("protection", FieldKind::Enum(PROTECTION_LEVELS)),
    field("severity", FieldKind::Enum(SEVERITIES)),
    field("file_kind", FieldKind::Str),
    field("reason", FieldKind::Str),
    field("ai_present", FieldKind::Bool),
    field("ai_burst", FieldKind::Bool),
    field("outcome", FieldKind::Enum(OUTCOMES)),
];

const SNAPSHOT_CREATED: &[FieldSpec] = &[
    field("snapshot_id", FieldKind::Str),
    field("protection", FieldKind::Enum(PROTECTION_LEVELS)),
    field("file_kind", FieldKind::Str),
    field("size_bytes", FieldKind::UInt),
    field("dedup_hit", FieldKind::Bool),
    field("trigger", FieldKind::Enum(TRIGGERS)),
];

const SESSION_FINALIZED: &[FieldSpec] = &[
    field("session_id", FieldKind::Str),
    field("trigger_mask", FieldKind::UInt),
    field("duration_ms", FieldKind::UInt),
    field("files_count", FieldKind::UInt),
    field("dedup_hits", FieldKind::UInt),
];

const ISSUE_CREATED: &[FieldSpec] = &[
    field("type", FieldKind::Enum(ISSUE_TYPES)),
    field("severity", FieldKind::Enum(SEVERITIES)),
    field("file_kind", FieldKind::Str),
    field("patterns", FieldKind::StrList),
];

const ISSUE_RESOLVED: &[FieldSpec] = &[
    field("type", FieldKind::Enum(ISSUE_TYPES)),
    field("resolution", FieldKind::Enum(RESOLUTIONS)),
    field("time_to_resolve_ms", FieldKind::UInt),
];

const SESSION_RESTORED: &[FieldSpec] = &[
    field("time_to_restore_ms", FieldKind::UInt),
    field("reason", FieldKind::Str),
    field("files_restored", FieldKind::StrList),
];

const POLICY_CHANGED: &[FieldSpec] = &[
    field("from", FieldKind::Enum(POLICY_STATES)),
    field("to", FieldKind::Enum(POLICY_STATES)),
    field("reason", FieldKind::Str),
];

fn required_fields(tag: &str) -> Option<&'static [FieldSpec]> {
    match tag {
        "save_attempt" => Some(SAVE_ATTEMPT),
        "snapshot_created" => Some(SNAPSHOT_CREATED),
        "session_finalized" => Some(SESSION_FINALIZED),
        "issue_created" => Some(ISSUE_CREATED),
        "issue_resolved" => Some(ISSUE_RESOLVED),
        "session_restored" => Some(SESSION_RESTORED),
        "policy_changed" => Some(POLICY_CHANGED),
        _ => None,
    }
}

/// True when `candidate` conforms to a canonical event shape.
pub fn validate(candidate: &Value) -> bool {
    explain(candidate).is_none()
}

/// None when `candidate` conforms; otherwise a human-readable diagnostic.
pub fn explain(candidate: &Value) -> Option<String> {
    let obj = match candidate.as_object() {
        Some(obj) => obj,
        None => return Some("event must be a JSON object".to_string()),
    };

    let tag = match obj.get("event") {
        None => return Some("missing `event` tag".to_string()),
        Some(Value::String(tag)) => tag.as_str(),
        Some(_) => return Some("`event` must be a string".to_string()),
    };

    // Any tag outside the canonical seven fails immediately, no further checks.
    let fields = match required_fields(tag) {
        Some(fields) => fields,
        None => return Some(format!("unknown event tag `{}`", tag)),
    };

    if let Some(version) = obj.get("event_version") {
        if !version.is_string() {
            return Some("`event_version` must be a string".to_string());
        }
    }
    if let Some(ts) = obj.get("timestamp") {
        if !ts.is_i64() && !ts.is_u64() {
            return Some("`timestamp` must be integer epoch milliseconds".to_string());
        }
    }

    let props = match obj.get("properties") {
        None => return Some(format!("missing `properties` for `{}`", tag)),
        Some(Value::Object(props)) => props,
        Some(_) => return Some("`properties` must be an object".to_string()),
    };

    for spec in fields {
        let value = match props.get(spec.name) {
            Some(value) => value,
            None => {
                return Some(format!(
                    "missing required property `{}` for `{}`",
                    spec.name, tag
                ))
            }
        };
        if let Some(message) = check_kind(spec, value) {
            return Some(message);
        }
    }

    None
}

fn check_kind(spec: &FieldSpec, value: &Value) -> Option<String> {
    match spec.kind {
        FieldKind::Str => {
            if !value.is_string() {
                return Some(format!("property `{}` must be a string", spec.name));
            }
        }
        FieldKind::UInt => {
            if !value.is_u64() {
                return Some(format!(
                    "property `{}` must be a non-negative integer",
                    spec.name
                ));
            }
        }
        FieldKind::Bool => {
            if !value.is_boolean() {
                return Some(format!("property `{}` must be a boolean", spec.name));
            }
        }
        FieldKind::Enum(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => {}
            _ => {
                return Some(format!(
                    "property `{}` must be one of {}",
                    spec.name,
                    allowed.join("|")
                ))
            }
        },
        FieldKind::StrList => match value.as_array() {
            Some(items) if items.iter().all(|v| v.is_string()) => {}
            _ => {
                return Some(format!(
                    "property `{}` must be an array of strings",
                    spec.name
                ))
            }
        },
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::CanonicalEvent;
    use serde_json::json;

    fn valid_samples() -> Vec<Value> {
        vec![
            json!({
                "event": "save_attempt",
                "timestamp": 1_700_000_000_000_i64,
                "properties": {
                    "protection": "block",
                    "severity": "high",
                    "file_kind": "source",
                    "reason": "risk_threshold",
                    "ai_present": true,
                    "ai_burst": false,
                    "outcome": "blocked"
                }
            }),
            json!({
                "event": "snapshot_created",
                "properties": {
                    "snapshot_id": "snap-00aa11bb22cc",
                    "protection": "watch",
                    "file_kind": "config",
                    "size_bytes": 4096,
                    "dedup_hit": false,
                    "trigger": "filewatch"
                }
            }),
            json!({
                "event": "session_finalized",
                "properties": {
                    "session_id": "session-deadbeef0011",
                    "trigger_mask": 5,
                    "duration_ms": 90_000,
                    "files_count": 12,
                    "dedup_hits": 4
                }
            }),
            json!({
                "event": "issue_created",
                "properties": {
                    "type": "secret",
                    "severity": "critical",
                    "file_kind": "config",
                    "patterns": ["aws_key"]
                }
            }),
            json!({
                "event": "issue_resolved",
                "properties": {
                    "type": "mock",
                    "resolution": "fixed",
                    "time_to_resolve_ms": 60_000
                }
            }),
            json!({
                "event": "session_restored",
                "properties": {
                    "time_to_restore_ms": 1500,
                    "reason": "user_initiated",
                    "files_restored": ["a.ts", "b.ts"]
                }
            }),
            json!({
                "event": "policy_changed",
                "properties": {
                    "from": "warn",
                    "to": "unprotected",
                    "reason": "user_override"
                }
            }),
        ]
    }

    #[test]
    fn every_canonical_tag_validates() {
        for sample in valid_samples() {
            assert!(
                validate(&sample),
                "{}: {:?}",
                sample["event"],
                explain(&sample)
            );
            assert_eq!(explain(&sample), None);
        }
    }

    #[test]
    fn validated_values_deserialize_to_typed_events() {
        for sample in valid_samples() {
            let event: CanonicalEvent = serde_json::from_value(sample.clone()).unwrap();
            assert_eq!(event.tag(), sample["event"].as_str().unwrap());
        }
    }

    #[test]
    fn unknown_tag_fails_immediately() {
        let value = json!({ "event": "save.attempted", "properties": {} });
        let message = explain(&value).unwrap();
        assert!(message.contains("unknown event tag"));
    }

    #[test]
    fn missing_required_property_fails() {
        let mut sample = valid_samples().remove(0);
        sample["properties"]
            .as_object_mut()
            .unwrap()
            .remove("outcome");
        let message = explain(&sample).unwrap();
        assert!(message.contains("outcome"));
        assert!(!validate(&sample));
    }

    #[test]
    fn wrong_primitive_type_fails() {
        let mut sample = valid_samples().remove(0);
        sample["properties"]["ai_present"] = json!("yes");
        assert!(explain(&sample).unwrap().contains("ai_present"));
    }

    #[test]
    fn out_of_enum_value_fails() {
        let mut sample = valid_samples().remove(0);
        sample["properties"]["severity"] = json!("extreme");
        assert!(explain(&sample).unwrap().contains("severity"));
    }

    #[test]
    fn extra_properties_are_ignored() {
        let mut sample = valid_samples().remove(0);
        sample["properties"]["legacy_session"] = json!("s-123");
        assert!(validate(&sample));
    }

    #[test]
    fn absent_envelope_fields_are_not_failures() {
        let value = json!({
            "event": "issue_resolved",
            "properties": {
                "type": "phantom",
                "resolution": "ignored",
                "time_to_resolve_ms": 10
            }
        });
        assert!(validate(&value));
    }

    #[test]
    fn wrong_envelope_types_fail() {
        let mut sample = valid_samples().remove(0);
        sample["timestamp"] = json!("yesterday");
        assert!(explain(&sample).unwrap().contains("timestamp"));
    }

    #[test]
    fn non_objects_fail_without_panicking() {
        assert!(!validate(&json!(null)));
        assert!(!validate(&json!([1, 2, 3])));
        assert!(!validate(&json!("save_attempt")));
        assert!(explain(&json!(42)).is_some());
    }
}
