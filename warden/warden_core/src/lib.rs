//! # Warden Core
//!
//! `warden_core` provides the fundamental building blocks for the Warden
//! access-control engine: error types and the shared access-query type used
//! throughout the workspace.
//!
//! ## Core Principles
//!
//! 1. **Group-indirected authorization**: users never appear in rules
//!    directly. A rule grants an operation to a user-group, optionally
//!    scoped to an object-group, and the decision algorithm resolves a
//!    user's memberships at query time.
//!
//! 2. **Allow-only rules**: there is no deny rule. A query is granted if
//!    any rule for the operation is satisfied, and denied otherwise.
//!
//! 3. **Explicit ownership**: the engine is an owned value constructed by
//!    the caller. There are no process-wide registries; independent
//!    instances coexist freely, which also keeps tests hermetic.
//!
//! ## Crate Structure
//!
//! - **error**: Error types for all Warden components
//! - **types**: Shared data structures, currently the access query

pub mod error;
pub mod types;

// Re-export key types for convenience
pub use error::{AccessError, Error, Result};
pub use types::AccessQuery;
