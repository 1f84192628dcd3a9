//! Group model.
//!
//! A group is a set of school ids pooled for reimbursement purposes.
//! Members are held in a sorted set so iteration order — and everything
//! derived from it, like display strings — is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::SchoolId;

/// A non-empty set of school ids forming one reimbursement group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    members: BTreeSet<SchoolId>,
}

impl Group {
    /// Creates a group containing a single school.
    pub fn singleton(id: SchoolId) -> Self {
        let mut members = BTreeSet::new();
        members.insert(id);
        Self { members }
    }

    /// Creates a group from an id collection.
    pub fn from_members(members: impl IntoIterator<Item = SchoolId>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    /// Whether `id` is a member.
    pub fn contains(&self, id: SchoolId) -> bool {
        self.members.contains(&id)
    }

    /// Member count.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = SchoolId> + '_ {
        self.members.iter().copied()
    }

    /// Union with another group, consuming it.
    pub fn absorb(&mut self, other: Group) {
        self.members.extend(other.members);
    }

    /// Union of two groups.
    pub fn merged_with(&self, other: &Group) -> Group {
        let mut merged = self.clone();
        merged.members.extend(other.members.iter().copied());
        merged
    }
}
