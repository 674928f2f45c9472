//! Access query data type.
//!
//! This module defines the query structure checked against the rule
//! registries to decide whether a user may perform an operation, optionally
//! on a specific object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A request to perform an operation, checked against the access rules.
///
/// The `object` field is optional: an object-less query is only satisfied
/// by object-agnostic rules, never by rules scoped to an object-group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessQuery {
    /// The operation name, matched exactly against the rule registry.
    pub operation: String,

    /// The name of the user performing the operation.
    pub user: String,

    /// The target object, if the operation applies to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
}

impl AccessQuery {
    /// Create an object-less query.
    ///
    /// # Arguments
    ///
    /// * `operation` - The operation name.
    /// * `user` - The user name.
    ///
    /// # Returns
    ///
    /// A query that only object-agnostic rules can satisfy.
    pub fn new(operation: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            user: user.into(),
            object: None,
        }
    }

    /// Create a query targeting a specific object.
    ///
    /// # Arguments
    ///
    /// * `operation` - The operation name.
    /// * `user` - The user name.
    /// * `object` - The target object name.
    pub fn on_object(
        operation: impl Into<String>,
        user: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            user: user.into(),
            object: Some(object.into()),
        }
    }
}

impl fmt::Display for AccessQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.object {
            Some(object) => write!(
                f,
                "user '{}' {} object '{}'",
                self.user, self.operation, object
            ),
            None => write!(f, "user '{}' {}", self.user, self.operation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let query = AccessQuery::new("delete", "alice");
        assert_eq!(query.operation, "delete");
        assert_eq!(query.user, "alice");
        assert_eq!(query.object, None);

        let query = AccessQuery::on_object("read", "alice", "file1");
        assert_eq!(query.object.as_deref(), Some("file1"));
    }

    #[test]
    fn test_display() {
        let query = AccessQuery::new("delete", "alice");
        assert_eq!(query.to_string(), "user 'alice' delete");

        let query = AccessQuery::on_object("read", "alice", "file1");
        assert_eq!(query.to_string(), "user 'alice' read object 'file1'");
    }

    #[test]
    fn test_serialization() {
        let query = AccessQuery::on_object("read", "alice", "file1");
        let serialized = serde_json::to_string(&query).unwrap();
        let deserialized: AccessQuery = serde_json::from_str(&serialized).unwrap();
        assert_eq!(query, deserialized);

        // Object-less queries omit the object field entirely
        let query = AccessQuery::new("delete", "alice");
        let serialized = serde_json::to_string(&query).unwrap();
        assert!(!serialized.contains("object"));
    }
}
