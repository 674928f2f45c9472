mod audit;
mod engine;

pub use audit::{AuditEntry, AuditLog, AuditOutcome};
pub use engine::AccessChecker;
