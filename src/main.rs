//! lockstep CLI - build-target membership validator
//!
//! Usage: lockstep <COMMAND>
//!
//! Commands:
//!   check   Validate target membership against the configuration

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;

use lockstep::report::{CallbackSink, ConsoleSink, MessageKind, ReportMessage};
use lockstep::{Config, FsWalker, LockstepError, ProjectSnapshot};

/// lockstep - build-target membership validator
#[derive(Parser, Debug)]
#[command(name = "lockstep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output machine-readable JSON events
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (-v shows per-group diagnostics)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate target membership against the configuration
    Check {
        /// Path to the project snapshot JSON
        #[arg(short, long, default_value = "project.json")]
        project: PathBuf,

        /// Path to the membership configuration JSON
        #[arg(short, long, default_value = "lockstep.json")]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { project, config } => cmd_check(&project, &config, cli.json, cli.verbose),
    }
}

fn cmd_check(project: &Path, config: &Path, json: bool, verbose: u8) -> Result<()> {
    let snapshot = ProjectSnapshot::load(project)
        .with_context(|| format!("failed to load project snapshot {}", project.display()))?;
    let config = Config::load(config)
        .with_context(|| format!("failed to load configuration {}", config.display()))?;
    let walker = FsWalker::new();

    let result = if json {
        let mut out = std::io::stdout().lock();
        let mut sink = CallbackSink::new(|message: &ReportMessage| {
            let _ = writeln!(out, "{}", event_json(message));
        });
        lockstep::run_checks(&snapshot, &config, &walker, &mut sink)
    } else {
        let mut sink = ConsoleSink::new(verbose);
        lockstep::run_checks(&snapshot, &config, &walker, &mut sink)
    };

    match result {
        Ok(index) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "event": "complete",
                        "status": "ok",
                        "targets": index.len(),
                    })
                );
            } else {
                println!("{} {} target(s) in sync", pass_mark(), index.len());
            }
            Ok(())
        }
        Err(err) => {
            report_failure(&err, json);
            std::process::exit(1);
        }
    }
}

fn event_json(message: &ReportMessage) -> serde_json::Value {
    let kind = match message.kind {
        MessageKind::Progress => "progress",
        MessageKind::Diagnostic => "diagnostic",
        MessageKind::Warning => "warning",
    };
    serde_json::json!({ "event": kind, "message": message.text })
}

fn report_failure(err: &LockstepError, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "complete",
                "status": "error",
                "error": err.to_string(),
            })
        );
    } else {
        eprintln!("{} {err}", fail_mark());
    }
}

fn pass_mark() -> &'static str {
    if std::io::stdout().is_terminal() {
        "✓"
    } else {
        "ok:"
    }
}

fn fail_mark() -> &'static str {
    if std::io::stderr().is_terminal() {
        "✗"
    } else {
        "error:"
    }
}
