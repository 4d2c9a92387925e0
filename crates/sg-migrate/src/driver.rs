//! Batch migration driver.
//!
//! A single deterministic pass: apply the mapper to each legacy event in
//! order, partition into mapped and unmapped buckets, preserve relative
//! order within each bucket, drop nothing. The file entry point reads a
//! whole JSON array, migrates, and writes the mapped output plus an
//! `-unmapped` sibling when any record had no canonical equivalent.
//!
//! The entire input array is held in memory for the run; very large inputs
//! need a streaming variant, which is future work.

use crate::mapper::LegacyMapper;
use serde_json::Value;
use sg_common::{Error, Result};
use sg_events::canonical::CanonicalEvent;
use sg_events::legacy::LegacyEvent;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of migrating an in-memory batch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MigrationOutcome {
    pub mapped: Vec<CanonicalEvent>,
    pub unmapped: Vec<LegacyEvent>,
}

/// Summary of a file-to-file migration run.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationReport {
    pub mapped: usize,
    pub unmapped: usize,
    pub output: PathBuf,
    /// Present only when unmapped events were written.
    pub unmapped_output: Option<PathBuf>,
}

/// Migrate a batch of legacy events, partitioning by mapping outcome.
pub fn migrate(mapper: &LegacyMapper, events: &[LegacyEvent]) -> MigrationOutcome {
    let mut outcome = MigrationOutcome::default();
    for event in events {
        match mapper.map_event(event) {
            Some(canonical) => outcome.mapped.push(canonical),
            None => outcome.unmapped.push(event.clone()),
        }
    }
    outcome
}

/// Sibling path for unmapped events: `events.json` -> `events-unmapped.json`.
pub fn unmapped_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("events");
    let name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}-unmapped.{}", stem, ext),
        None => format!("{}-unmapped", stem),
    };
    input.with_file_name(name)
}

/// Migrate a JSON array file of legacy events.
///
/// Fails fast (no partial output) when the input cannot be read, is not
/// valid JSON, or its top level is not an array. Records whose tag is not in
/// the legacy enumeration are routed to the unmapped bucket with their
/// original JSON preserved.
pub fn migrate_file(
    mapper: &LegacyMapper,
    input: &Path,
    output: &Path,
) -> Result<MigrationReport> {
    let raw = fs::read_to_string(input).map_err(|source| Error::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;
    let parsed: Value = serde_json::from_str(&raw).map_err(|source| Error::ParseJson {
        path: input.to_path_buf(),
        source,
    })?;
    let records = parsed.as_array().ok_or_else(|| Error::NotAnArray {
        path: input.to_path_buf(),
    })?;

    let mut mapped: Vec<Value> = Vec::new();
    let mut unmapped: Vec<Value> = Vec::new();
    for record in records {
        match serde_json::from_value::<LegacyEvent>(record.clone()) {
            Ok(legacy) => match mapper.map_event(&legacy) {
                Some(canonical) => {
                    let value =
                        serde_json::to_value(&canonical).map_err(|e| Error::Validation(e.to_string()))?;
                    mapped.push(value);
                }
                None => unmapped.push(record.clone()),
            },
            // Outside the legacy enumeration: keep the original record.
            Err(_) => unmapped.push(record.clone()),
        }
    }

    write_array(output, &mapped)?;
    let unmapped_output = if unmapped.is_empty() {
        None
    } else {
        let path = unmapped_path(input);
        write_array(&path, &unmapped)?;
        Some(path)
    };

    Ok(MigrationReport {
        mapped: mapped.len(),
        unmapped: unmapped.len(),
        output: output.to_path_buf(),
        unmapped_output,
    })
}

fn write_array(path: &Path, values: &[Value]) -> Result<()> {
    let body =
        serde_json::to_string_pretty(values).map_err(|e| Error::Validation(e.to_string()))?;
    fs::write(path, body).map_err(|source| Error::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sg_events::legacy::*;

    fn five_event_batch() -> Vec<LegacyEvent> {
        vec![
            LegacyEvent::SettingsOpened {
                timestamp: 1,
                properties: SettingsOpenedProps {
                    section: "general".into(),
                },
            },
            LegacyEvent::PatternDetected {
                timestamp: 2,
                properties: PatternDetectedProps {
                    path: "src/db.ts".into(),
                    patterns: vec!["aws_key".into()],
                    risk_level: "high".into(),
                },
            },
            LegacyEvent::PerfSample {
                timestamp: 3,
                properties: PerfSampleProps {
                    op_name: "scan".into(),
                    duration_ms: 8,
                },
            },
            LegacyEvent::BackupRestored {
                timestamp: 4,
                properties: BackupRestoredProps {
                    files_restored: 2,
                    duration: 900,
                    success: true,
                },
            },
            LegacyEvent::ErrorReported {
                timestamp: 5,
                properties: ErrorReportedProps {
                    message: "boom".into(),
                    stack: None,
                },
            },
        ]
    }

    #[test]
    fn partitions_preserving_order() {
        // 5 events, exactly 2 with canonical mappings.
        let outcome = migrate(&LegacyMapper::new(), &five_event_batch());
        assert_eq!(outcome.mapped.len(), 2);
        assert_eq!(outcome.unmapped.len(), 3);
        assert_eq!(outcome.mapped[0].tag(), "issue_created");
        assert_eq!(outcome.mapped[1].tag(), "session_restored");
        let unmapped_tags: Vec<&str> = outcome.unmapped.iter().map(|e| e.tag()).collect();
        assert_eq!(
            unmapped_tags,
            vec!["settings_opened", "perf_sample", "error_reported"]
        );
    }

    #[test]
    fn empty_batch_migrates_to_empty_buckets() {
        let outcome = migrate(&LegacyMapper::new(), &[]);
        assert!(outcome.mapped.is_empty());
        assert!(outcome.unmapped.is_empty());
    }

    #[test]
    fn unmapped_path_inserts_suffix_before_extension() {
        assert_eq!(
            unmapped_path(Path::new("/tmp/events.json")),
            Path::new("/tmp/events-unmapped.json")
        );
        assert_eq!(
            unmapped_path(Path::new("events")),
            Path::new("events-unmapped")
        );
    }

    #[test]
    fn file_migration_writes_both_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("events.json");
        let output = dir.path().join("canonical.json");
        let batch = serde_json::to_string(&five_event_batch()).unwrap();
        fs::write(&input, batch).unwrap();

        let report = migrate_file(&LegacyMapper::new(), &input, &output).unwrap();
        assert_eq!(report.mapped, 2);
        assert_eq!(report.unmapped, 3);
        assert_eq!(
            report.unmapped_output.as_deref(),
            Some(dir.path().join("events-unmapped.json").as_path())
        );

        let written: Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written.as_array().unwrap().len(), 2);
        assert!(sg_events::validate(&written[0]));

        let kept: Value = serde_json::from_str(
            &fs::read_to_string(report.unmapped_output.unwrap()).unwrap(),
        )
        .unwrap();
        assert_eq!(kept.as_array().unwrap().len(), 3);
        assert_eq!(kept[0]["event"], "settings_opened");
    }

    #[test]
    fn no_unmapped_file_when_everything_maps() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("events.json");
        let output = dir.path().join("out.json");
        let batch = json!([{
            "event": "backup_restored",
            "timestamp": 1,
            "properties": { "filesRestored": 1, "duration": 10, "success": true }
        }]);
        fs::write(&input, batch.to_string()).unwrap();

        let report = migrate_file(&LegacyMapper::new(), &input, &output).unwrap();
        assert_eq!(report.unmapped, 0);
        assert_eq!(report.unmapped_output, None);
        assert!(!unmapped_path(&input).exists());
    }

    #[test]
    fn unknown_tags_survive_in_the_unmapped_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("events.json");
        let output = dir.path().join("out.json");
        let batch = json!([{
            "event": "telemetry_opt_out",
            "timestamp": 1,
            "properties": { "reason": "privacy" }
        }]);
        fs::write(&input, batch.to_string()).unwrap();

        let report = migrate_file(&LegacyMapper::new(), &input, &output).unwrap();
        assert_eq!(report.mapped, 0);
        assert_eq!(report.unmapped, 1);
        let kept: Value = serde_json::from_str(
            &fs::read_to_string(report.unmapped_output.unwrap()).unwrap(),
        )
        .unwrap();
        assert_eq!(kept[0]["properties"]["reason"], "privacy");
    }

    #[test]
    fn non_array_input_fails_fast_with_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("events.json");
        let output = dir.path().join("out.json");
        fs::write(&input, r#"{"event": "session_end"}"#).unwrap();

        let err = migrate_file(&LegacyMapper::new(), &input, &output).unwrap_err();
        assert!(matches!(err, Error::NotAnArray { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("events.json");
        fs::write(&input, "[{").unwrap();

        let err =
            migrate_file(&LegacyMapper::new(), &input, &dir.path().join("out.json")).unwrap_err();
        assert!(matches!(err, Error::ParseJson { .. }));
    }

    #[test]
    fn missing_input_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = migrate_file(
            &LegacyMapper::new(),
            &dir.path().join("nope.json"),
            &dir.path().join("out.json"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ReadInput { .. }));
    }
}
