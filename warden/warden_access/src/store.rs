//! The access-control store.
//!
//! [`AccessControlStore`] owns the four registries and exposes the
//! mutation operations (register user, group membership, rule definition)
//! and the queries (authenticate, access decision). It is a plain owned
//! value: construct as many independent instances as needed, mutate
//! through `&mut self`, and wrap in a lock externally if shared across
//! threads. There are no process-wide registries.
//!
//! Every mutation either fully succeeds or leaves the registries
//! unchanged: all validation happens before the first write.

use std::collections::{BTreeMap, BTreeSet};

use warden_core::error::AccessError;
use warden_core::types::AccessQuery;

use crate::model::{GroupRegistry, RuleBook, RuleEntry, Snapshot};

/// The access-control engine: users, user-groups, object-groups, and
/// access rules, with the group-indirected access decision.
#[derive(Debug, Clone, Default)]
pub struct AccessControlStore {
    /// User name to credential.
    users: BTreeMap<String, String>,

    /// Named sets of user names.
    user_groups: GroupRegistry,

    /// Named sets of object names. Objects exist only by virtue of
    /// membership here; there is no independent object registry.
    object_groups: GroupRegistry,

    /// Operation name to ordered rule list.
    rules: RuleBook,
}

impl AccessControlStore {
    /// Create a store with all four registries empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user with a credential.
    ///
    /// Fails with [`AccessError::AlreadyExists`] if the name is taken (the
    /// original credential is left unchanged) and with
    /// [`AccessError::EmptyCredential`] if the credential is empty (the
    /// user is not created).
    pub fn register_user(&mut self, name: &str, credential: &str) -> Result<(), AccessError> {
        if self.users.contains_key(name) {
            return Err(AccessError::AlreadyExists(name.to_string()));
        }
        if credential.is_empty() {
            return Err(AccessError::EmptyCredential);
        }
        self.users.insert(name.to_string(), credential.to_string());
        Ok(())
    }

    /// Validate a user's credential.
    ///
    /// Comparison is exact and case-sensitive — no hashing, deliberately
    /// pedagogical rather than production authentication. No side effects.
    pub fn authenticate(&self, name: &str, credential: &str) -> Result<(), AccessError> {
        match self.users.get(name) {
            None => Err(AccessError::UnknownUser(name.to_string())),
            Some(stored) if stored == credential => Ok(()),
            Some(_) => Err(AccessError::BadCredential(name.to_string())),
        }
    }

    /// Add a registered user to a user-group, creating the group if it
    /// does not exist. Insertion is idempotent. Returns the group's
    /// current member set.
    ///
    /// Fails with [`AccessError::UnknownUser`] if the user is not
    /// registered; the group is not created in that case.
    pub fn add_user_to_group(
        &mut self,
        user: &str,
        group: &str,
    ) -> Result<&BTreeSet<String>, AccessError> {
        if !self.users.contains_key(user) {
            return Err(AccessError::UnknownUser(user.to_string()));
        }
        Ok(self.user_groups.add_member(group, user))
    }

    /// Add an object to an object-group, creating the group if it does not
    /// exist. Objects are arbitrary strings with no registration
    /// precondition. Insertion is idempotent. Returns the group's current
    /// member set.
    pub fn add_object_to_group(&mut self, object: &str, group: &str) -> &BTreeSet<String> {
        self.object_groups.add_member(group, object)
    }

    /// Append an access rule for an operation: members of `user_group` may
    /// perform `operation`, scoped to objects in `object_group` when one
    /// is given and object-agnostic otherwise. Returns the full updated
    /// rule list for the operation.
    ///
    /// Both named groups must already exist; referential integrity is
    /// checked before any mutation. Duplicate rules are appended as-is.
    pub fn add_rule(
        &mut self,
        operation: &str,
        user_group: &str,
        object_group: Option<&str>,
    ) -> Result<&[RuleEntry], AccessError> {
        if !self.user_groups.contains_group(user_group) {
            return Err(AccessError::UnknownUserGroup(user_group.to_string()));
        }
        if let Some(group) = object_group {
            if !self.object_groups.contains_group(group) {
                return Err(AccessError::UnknownObjectGroup(group.to_string()));
            }
        }
        let entry = RuleEntry::new(user_group, object_group.map(str::to_string));
        Ok(self.rules.append(operation, entry))
    }

    /// Decide whether `user` may perform `operation`, optionally on
    /// `object`. Purely a query; no side effects.
    ///
    /// An operation with no rules is denied (`Ok(false)`), never an error
    /// — and this short-circuit precedes the object check. A query naming
    /// an object that belongs to no object-group fails with
    /// [`AccessError::UnknownObject`]; the asymmetry with unknown
    /// operations is intentional.
    ///
    /// An object-less query is satisfied only by object-agnostic rules.
    /// A query with an object is satisfied by any rule whose user-group
    /// contains the user and whose object-group either is absent or
    /// contains the object.
    pub fn can_access(
        &self,
        operation: &str,
        user: &str,
        object: Option<&str>,
    ) -> Result<bool, AccessError> {
        if !self.users.contains_key(user) {
            return Err(AccessError::UnknownUser(user.to_string()));
        }
        let Some(entries) = self.rules.rules_for(operation) else {
            return Ok(false);
        };
        let member_of = self.user_groups.groups_containing(user);

        match object {
            None => Ok(entries
                .iter()
                .any(|rule| {
                    rule.is_object_agnostic() && member_of.contains(rule.user_group.as_str())
                })),
            Some(object) => {
                if !self.object_groups.contains_member(object) {
                    return Err(AccessError::UnknownObject(object.to_string()));
                }
                Ok(entries.iter().any(|rule| {
                    let group_matches = member_of.contains(rule.user_group.as_str());
                    let object_matches = match &rule.object_group {
                        None => true,
                        Some(group) => self
                            .object_groups
                            .members(group)
                            .is_some_and(|members| members.contains(object)),
                    };
                    group_matches && object_matches
                }))
            }
        }
    }

    /// Decide an [`AccessQuery`]. Equivalent to [`Self::can_access`].
    pub fn query(&self, query: &AccessQuery) -> Result<bool, AccessError> {
        self.can_access(&query.operation, &query.user, query.object.as_deref())
    }

    /// The user registry (name to credential).
    pub fn users(&self) -> &BTreeMap<String, String> {
        &self.users
    }

    /// The user-group registry.
    pub fn user_groups(&self) -> &GroupRegistry {
        &self.user_groups
    }

    /// The object-group registry.
    pub fn object_groups(&self) -> &GroupRegistry {
        &self.object_groups
    }

    /// The rule registry.
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Export all four registries into a [`Snapshot`].
    pub fn export(&self) -> Snapshot {
        Snapshot {
            users: self.users.clone(),
            user_groups: self.user_groups.to_map(),
            object_groups: self.object_groups.to_map(),
            rules: self.rules.to_map(),
        }
    }

    /// Rebuild a store from a [`Snapshot`], restoring all four registries
    /// verbatim.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            users: snapshot.users,
            user_groups: GroupRegistry::from_map(snapshot.user_groups),
            object_groups: GroupRegistry::from_map(snapshot.object_groups),
            rules: RuleBook::from_map(snapshot.rules),
        }
    }
}
