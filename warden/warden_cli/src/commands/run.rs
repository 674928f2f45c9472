//! The `run` command: execute a command script against a store.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use warden_access::AccessControlStore;
use warden_runtime::{snapshot, RunnerConfig, ScriptRunner};

/// Arguments for the run command
#[derive(Args)]
pub struct RunArgs {
    /// Path to the command script
    #[clap(long)]
    pub script: PathBuf,

    /// Optional runner configuration file (TOML)
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Snapshot to restore before the run (overrides the config path)
    #[clap(long)]
    pub load: Option<PathBuf>,

    /// Snapshot to write after the run (overrides the config path)
    #[clap(long)]
    pub save: Option<PathBuf>,

    /// Print registry state after every command
    #[clap(long)]
    pub echo_state: bool,
}

/// Implementation of the run command
pub fn execute_run(args: &RunArgs) -> Result<()> {
    let mut config = RunnerConfig::load(args.config.as_deref())?;

    // Layer command-line flags over the config file
    config.merge(RunnerConfig {
        snapshot_path: None,
        echo_state: args.echo_state,
        log_filter: String::new(),
        audit_capacity: 0,
    });
    crate::init_logging(&config.log_filter);

    // An explicit --load must exist; a configured snapshot path is only
    // restored when a file is already there
    let store = if let Some(path) = &args.load {
        AccessControlStore::from_snapshot(snapshot::load(path)?)
    } else if let Some(path) = &config.snapshot_path {
        if path.exists() {
            AccessControlStore::from_snapshot(snapshot::load(path)?)
        } else {
            AccessControlStore::new()
        }
    } else {
        AccessControlStore::new()
    };

    let script = fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script: {}", args.script.display()))?;

    let mut runner = ScriptRunner::new(store)
        .with_audit(config.audit_capacity)
        .echo_state(config.echo_state);

    let outcomes = runner.run_script(&script)?;
    for outcome in &outcomes {
        super::print_outcome(outcome);
    }

    if let Some(audit) = runner.audit() {
        debug!("recorded {} access check(s)", audit.len());
    }

    let save_path = args.save.clone().or_else(|| config.snapshot_path.clone());
    if let Some(path) = save_path {
        snapshot::save(&path, &runner.store().export())?;
    }

    Ok(())
}
