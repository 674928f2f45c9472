//! Command implementations for the Warden CLI.

pub mod exec;
pub mod run;
pub mod show;

use warden_runtime::{Outcome, OutcomeKind};

/// Print one command outcome to stdout.
pub fn print_outcome(outcome: &Outcome) {
    match &outcome.kind {
        OutcomeKind::Applied(summary) => {
            println!("line {}: {}", outcome.line, summary);
        }
        OutcomeKind::Verdict { granted, summary } => {
            let verdict = if *granted { "ALLOW" } else { "DENY" };
            println!("line {}: {} {}", outcome.line, verdict, summary);
        }
        OutcomeKind::Rejected(err) => {
            println!("line {}: error: {}", outcome.line, err);
        }
    }

    if let Some(state) = &outcome.state {
        println!("{}", state);
    }
}
