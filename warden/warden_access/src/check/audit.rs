use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use warden_core::error::AccessError;
use warden_core::types::AccessQuery;

/// The recorded outcome of one access check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditOutcome {
    /// A rule satisfied the query.
    Granted,

    /// No rule satisfied the query.
    Denied,

    /// The query itself was invalid (unknown user or unknown object).
    Rejected(String),
}

/// An entry in the audit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// The query that was checked
    pub query: AccessQuery,

    /// How the check came out
    pub outcome: AuditOutcome,
}

/// A bounded log of access checks.
///
/// Entries beyond the configured capacity are dropped oldest-first.
#[derive(Debug)]
pub struct AuditLog {
    entries: VecDeque<AuditEntry>,
    max_entries: usize,
}

impl AuditLog {
    /// Creates a new audit log holding at most `max_entries` entries
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Records the outcome of an access check
    pub fn record(&mut self, query: &AccessQuery, result: &Result<bool, AccessError>) {
        let outcome = match result {
            Ok(true) => AuditOutcome::Granted,
            Ok(false) => AuditOutcome::Denied,
            Err(err) => AuditOutcome::Rejected(err.to_string()),
        };

        self.entries.push_back(AuditEntry {
            query: query.clone(),
            outcome,
        });

        // Trim to capacity, oldest first
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    /// Iterates over the recorded entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no checks have been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears all recorded entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The configured capacity
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_log() {
        let mut log = AuditLog::new(10);

        // Record some checks
        log.record(&AccessQuery::new("delete", "alice"), &Ok(true));
        log.record(&AccessQuery::new("delete", "bob"), &Ok(false));
        log.record(
            &AccessQuery::on_object("read", "alice", "ghost"),
            &Err(AccessError::UnknownObject("ghost".to_string())),
        );

        let entries: Vec<_> = log.entries().collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].outcome, AuditOutcome::Granted);
        assert_eq!(entries[1].outcome, AuditOutcome::Denied);
        assert!(matches!(entries[2].outcome, AuditOutcome::Rejected(_)));

        // Clear the entries
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_audit_log_max_entries() {
        let mut log = AuditLog::new(2);

        // Record more than the capacity
        for i in 0..5 {
            log.record(&AccessQuery::new(format!("op{}", i), "alice"), &Ok(false));
        }

        // Only the most recent entries are kept
        let entries: Vec<_> = log.entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].query.operation, "op3");
        assert_eq!(entries[1].query.operation, "op4");
    }
}
