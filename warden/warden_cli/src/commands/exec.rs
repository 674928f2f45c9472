//! The `exec` command: apply a single command line to a store.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use warden_access::AccessControlStore;
use warden_runtime::{snapshot, Command, ScriptRunner};

/// Arguments for the exec command
#[derive(Args)]
pub struct ExecArgs {
    /// The command tokens, e.g. `CanAccess read alice file1`
    #[clap(required = true)]
    pub line: Vec<String>,

    /// Snapshot to restore before executing
    #[clap(long)]
    pub load: Option<PathBuf>,

    /// Snapshot to write after executing
    #[clap(long)]
    pub save: Option<PathBuf>,
}

/// Implementation of the exec command
pub fn execute_exec(args: &ExecArgs) -> Result<()> {
    crate::init_logging("info");

    let store = match &args.load {
        Some(path) => AccessControlStore::from_snapshot(snapshot::load(path)?),
        None => AccessControlStore::new(),
    };

    let line = args.line.join(" ");
    let Some(command) = Command::parse(1, &line)? else {
        bail!("Empty command line");
    };

    let mut runner = ScriptRunner::new(store);
    let outcome = runner.apply(1, command);
    super::print_outcome(&outcome);

    if let Some(path) = &args.save {
        snapshot::save(path, &runner.store().export())?;
    }

    Ok(())
}
