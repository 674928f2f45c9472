//! # Warden Access
//!
//! This crate implements the Warden access-control decision engine. It owns
//! the four registries (users and credentials, user-groups, object-groups,
//! access rules) and answers whether a given user may perform a given
//! operation on a given object.
//!
//! Authorization is group-indirected: rules never name users or objects
//! directly. A rule grants an operation to a user-group, optionally scoped
//! to an object-group; an object-agnostic rule (no object-group) grants the
//! operation regardless of target. The decision is a logical OR over all
//! rules for the operation — any satisfying rule grants access, and there
//! is no deny rule.
//!
//! ## Core Components
//!
//! - **Model**: Rule entries, group registries, and the snapshot
//!   interchange type
//! - **Store**: [`AccessControlStore`], the owned engine with all mutation
//!   and query operations
//! - **Check**: [`AccessChecker`], a query front-end with an optional
//!   bounded audit log
//!
//! ## Usage Example
//!
//! ```rust
//! use warden_access::AccessControlStore;
//!
//! let mut store = AccessControlStore::new();
//!
//! // Register a user and place them in a group
//! store.register_user("alice", "pw1").unwrap();
//! store.add_user_to_group("alice", "admins").unwrap();
//!
//! // Grant "delete" to admins regardless of object
//! store.add_rule("delete", "admins", None).unwrap();
//!
//! assert!(store.can_access("delete", "alice", None).unwrap());
//! ```

pub mod check;
pub mod model;
pub mod store;

// Re-export commonly used types
pub use check::{AccessChecker, AuditEntry, AuditLog, AuditOutcome};
pub use model::{GroupRegistry, RuleBook, RuleEntry, Snapshot};
pub use store::AccessControlStore;
