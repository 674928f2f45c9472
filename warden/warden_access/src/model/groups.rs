//! Named membership sets.
//!
//! One registry type serves both user-groups and object-groups: the two
//! differ only in the user-existence precondition, which is enforced by the
//! store, not here. Groups are created implicitly on first membership add,
//! and membership insertion is idempotent.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A registry of named groups, each holding a duplicate-free set of member
/// names.
///
/// Backed by ordered maps so that exported snapshots serialize
/// deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRegistry {
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl GroupRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `member` into `group`, creating the group if it does not
    /// exist. Returns the group's current member set.
    pub fn add_member(&mut self, group: &str, member: &str) -> &BTreeSet<String> {
        let members = self.groups.entry(group.to_string()).or_default();
        members.insert(member.to_string());
        members
    }

    /// Whether a group with this name exists.
    pub fn contains_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// The member set of a group, if it exists.
    pub fn members(&self, group: &str) -> Option<&BTreeSet<String>> {
        self.groups.get(group)
    }

    /// The names of all groups that contain `member`.
    pub fn groups_containing(&self, member: &str) -> BTreeSet<&str> {
        self.groups
            .iter()
            .filter(|(_, members)| members.contains(member))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Whether `member` belongs to at least one group.
    pub fn contains_member(&self, member: &str) -> bool {
        self.groups.values().any(|members| members.contains(member))
    }

    /// Iterate over (group name, member set) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.groups.iter()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the registry has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Clone the registry contents into a plain map for snapshot export.
    pub fn to_map(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.groups.clone()
    }

    /// Rebuild a registry from a snapshot map.
    pub fn from_map(groups: BTreeMap<String, BTreeSet<String>>) -> Self {
        Self { groups }
    }
}
