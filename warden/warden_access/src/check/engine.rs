use warden_core::error::AccessError;
use warden_core::types::AccessQuery;

use super::audit::AuditLog;
use crate::store::AccessControlStore;

/// The access checking front-end
///
/// Wraps a store reference and decides [`AccessQuery`]s against it,
/// recording each check in an audit log when one is configured. The store
/// itself stays query-only; all bookkeeping lives here.
pub struct AccessChecker<'a> {
    /// The store to decide queries against
    store: &'a AccessControlStore,

    /// Optional audit log for recording access checks
    audit_log: Option<AuditLog>,
}

impl<'a> AccessChecker<'a> {
    /// Creates a new checker over the given store
    pub fn new(store: &'a AccessControlStore) -> Self {
        Self {
            store,
            audit_log: None,
        }
    }

    /// Creates a new checker with an audit log
    pub fn with_audit(store: &'a AccessControlStore, audit_log: AuditLog) -> Self {
        Self {
            store,
            audit_log: Some(audit_log),
        }
    }

    /// Decides a query and records the outcome if auditing is configured
    pub fn check(&mut self, query: &AccessQuery) -> Result<bool, AccessError> {
        let result = self.store.query(query);

        if let Some(audit_log) = &mut self.audit_log {
            audit_log.record(query, &result);
        }

        result
    }

    /// Gets a reference to the audit log, if one is configured
    pub fn audit_log(&self) -> Option<&AuditLog> {
        self.audit_log.as_ref()
    }

    /// Consumes the checker, returning the audit log so a caller can keep
    /// it across checkers with different store borrows
    pub fn into_audit_log(self) -> Option<AuditLog> {
        self.audit_log
    }
}
