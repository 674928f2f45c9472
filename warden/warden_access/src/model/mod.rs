//! Data model for the access-control engine.

mod groups;
mod rule;
mod snapshot;

pub use groups::GroupRegistry;
pub use rule::{RuleBook, RuleEntry};
pub use snapshot::Snapshot;
