//! The `show` command: print the registries stored in a snapshot.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use warden_runtime::{report, snapshot};

/// Arguments for the show command
#[derive(Args)]
pub struct ShowArgs {
    /// Path to the snapshot file
    #[clap(long)]
    pub snapshot: PathBuf,
}

/// Implementation of the show command
pub fn execute_show(args: &ShowArgs) -> Result<()> {
    crate::init_logging("info");

    let snapshot = snapshot::load(&args.snapshot)?;
    print!("{}", report::render_all(&snapshot));

    Ok(())
}
