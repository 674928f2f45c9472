//! Snapshot interchange type.
//!
//! The snapshot is the bulk export/import format for the four registries:
//! plain string-keyed maps, independent of the engine's internal
//! representation. Persistence collaborators serialize it to disk and
//! restore it verbatim before subsequent engine calls.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::RuleEntry;

/// A serializable image of the four registries.
///
/// All fields default to empty, so a partial snapshot (e.g. one written by
/// an older tool without rules) still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// User name to credential.
    #[serde(default)]
    pub users: BTreeMap<String, String>,

    /// User-group name to member user-names.
    #[serde(default)]
    pub user_groups: BTreeMap<String, BTreeSet<String>>,

    /// Object-group name to member object-names.
    #[serde(default)]
    pub object_groups: BTreeMap<String, BTreeSet<String>>,

    /// Operation name to ordered rule list.
    #[serde(default)]
    pub rules: BTreeMap<String, Vec<RuleEntry>>,
}

impl Snapshot {
    /// Whether the snapshot carries no state at all.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.user_groups.is_empty()
            && self.object_groups.is_empty()
            && self.rules.is_empty()
    }
}
