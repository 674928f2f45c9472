//! # Warden Runtime
//!
//! Peripheral collaborators around the access-control engine. The engine
//! itself ([`warden_access`]) never touches a file or parses a command;
//! everything that does lives here:
//!
//! - **script**: the line-oriented command interpreter and runner
//! - **snapshot**: persistence of the four registries at a caller path
//! - **report**: plain-text rendering of registry state
//! - **config**: runner configuration loading
//!
//! All I/O in this crate happens strictly before or after engine calls,
//! never during one.

pub mod config;
pub mod report;
pub mod script;
pub mod snapshot;

pub use config::{ConfigError, RunnerConfig};
pub use script::{Command, Outcome, OutcomeKind, ScriptError, ScriptRunner};
pub use snapshot::SnapshotError;
