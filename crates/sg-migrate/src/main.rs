//! Saveguard telemetry migration CLI.
//!
//! `sg-migrate <input-file> <output-file>` reads a JSON array of legacy
//! events, converts every mappable event to the canonical taxonomy, and
//! writes the result to the output file. Events with no canonical
//! equivalent are kept in an `-unmapped` sibling of the input file.
//!
//! Exit codes are a two-value contract: 0 on success, 1 on any
//! unrecoverable error (missing arguments, unreadable input, malformed
//! JSON, non-array top level).

use clap::error::ErrorKind;
use clap::Parser;
use sg_migrate::{init_logging, migrate_file, LegacyMapper, TraceLog};
use std::path::PathBuf;
use std::process::exit;

/// Convert legacy Saveguard telemetry to the canonical event taxonomy.
#[derive(Parser)]
#[command(name = "sg-migrate", version, about)]
struct Cli {
    /// JSON array of legacy events.
    input: PathBuf,

    /// Destination for the canonical events.
    output: PathBuf,
}

fn main() {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            exit(code);
        }
    };

    let mapper = LegacyMapper::with_log(Box::new(TraceLog));
    match migrate_file(&mapper, &cli.input, &cli.output) {
        Ok(report) => {
            println!(
                "migrated {} events to {}",
                report.mapped,
                report.output.display()
            );
            if let Some(path) = &report.unmapped_output {
                println!(
                    "{} events had no canonical mapping; kept in {}",
                    report.unmapped,
                    path.display()
                );
            }
        }
        Err(err) => {
            eprintln!("error: {}", err);
            exit(1);
        }
    }
}
