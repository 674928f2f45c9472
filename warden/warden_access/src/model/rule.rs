//! Access rule model.
//!
//! A rule grants an operation to a user-group, optionally scoped to an
//! object-group. Rules are kept per operation as an ordered list; adding
//! the same rule twice yields two entries, both redundant but harmless.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single grant: members of `user_group` may perform the operation this
/// entry is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    /// The user-group the grant targets.
    pub user_group: String,

    /// The object-group the grant is scoped to. `None` means the grant is
    /// object-agnostic: it applies regardless of target object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_group: Option<String>,
}

impl RuleEntry {
    /// Create a rule entry.
    pub fn new(user_group: impl Into<String>, object_group: Option<String>) -> Self {
        Self {
            user_group: user_group.into(),
            object_group,
        }
    }

    /// Create an object-agnostic entry.
    pub fn object_agnostic(user_group: impl Into<String>) -> Self {
        Self::new(user_group, None)
    }

    /// Create an entry scoped to an object-group.
    pub fn scoped(user_group: impl Into<String>, object_group: impl Into<String>) -> Self {
        Self::new(user_group, Some(object_group.into()))
    }

    /// Whether this entry applies regardless of target object.
    pub fn is_object_agnostic(&self) -> bool {
        self.object_group.is_none()
    }
}

impl fmt::Display for RuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.object_group {
            Some(group) => write!(
                f,
                "group '{}' on objects in '{}'",
                self.user_group, group
            ),
            None => write!(f, "group '{}' on any object", self.user_group),
        }
    }
}

/// The rule registry: operation name to ordered list of grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBook {
    rules: BTreeMap<String, Vec<RuleEntry>>,
}

impl RuleBook {
    /// Create an empty rule book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to an operation's rule list, creating the list if
    /// the operation is new. Returns the full updated list.
    pub fn append(&mut self, operation: &str, entry: RuleEntry) -> &[RuleEntry] {
        let entries = self.rules.entry(operation.to_string()).or_default();
        entries.push(entry);
        entries
    }

    /// The rule list for an operation, if any rules have been added for it.
    pub fn rules_for(&self, operation: &str) -> Option<&[RuleEntry]> {
        self.rules.get(operation).map(Vec::as_slice)
    }

    /// Iterate over (operation, rule list) pairs in operation-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<RuleEntry>)> {
        self.rules.iter()
    }

    /// Number of operations with at least one rule.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules have been added.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Clone the registry contents into a plain map for snapshot export.
    pub fn to_map(&self) -> BTreeMap<String, Vec<RuleEntry>> {
        self.rules.clone()
    }

    /// Rebuild a rule book from a snapshot map.
    pub fn from_map(rules: BTreeMap<String, Vec<RuleEntry>>) -> Self {
        Self { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_creates_list() {
        let mut book = RuleBook::new();
        assert!(book.rules_for("delete").is_none());

        let entries = book.append("delete", RuleEntry::object_agnostic("admins"));
        assert_eq!(entries.len(), 1);
        assert!(book.rules_for("delete").is_some());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut book = RuleBook::new();

        // Adding the same rule twice yields two entries
        book.append("read", RuleEntry::scoped("editors", "docs"));
        let entries = book.append("read", RuleEntry::scoped("editors", "docs"));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], entries[1]);
    }

    #[test]
    fn test_entry_display() {
        let entry = RuleEntry::object_agnostic("admins");
        assert_eq!(entry.to_string(), "group 'admins' on any object");

        let entry = RuleEntry::scoped("editors", "docs");
        assert_eq!(entry.to_string(), "group 'editors' on objects in 'docs'");
    }

    #[test]
    fn test_serialization() {
        let mut book = RuleBook::new();
        book.append("edit", RuleEntry::object_agnostic("admins"));
        book.append("edit", RuleEntry::scoped("editors", "docs"));

        let serialized = serde_json::to_string(&book).unwrap();
        let deserialized: RuleBook = serde_json::from_str(&serialized).unwrap();
        assert_eq!(book, deserialized);

        // Object-agnostic entries omit the object_group field
        assert!(serialized.contains("admins"));
    }
}
