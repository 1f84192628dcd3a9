//! Partition model.
//!
//! A partition is the solution artifact of the merge search: an ordered
//! collection of disjoint, non-empty groups that jointly cover the full
//! school set. It is immutable once the search returns it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Group, School, SchoolId};

/// An ordered collection of disjoint groups covering the school set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    groups: Vec<Group>,
}

impl Partition {
    /// Creates a partition from a group list.
    pub fn from_groups(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// One singleton group per school, in input order.
    pub fn singletons(schools: &[School]) -> Self {
        Self {
            groups: schools.iter().map(|s| Group::singleton(s.id)).collect(),
        }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the partition has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The groups, in partition order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Index of the group containing `id`, if any.
    pub fn group_of(&self, id: SchoolId) -> Option<usize> {
        self.groups.iter().position(|g| g.contains(id))
    }

    /// Whether the groups are non-empty, pairwise disjoint, and jointly
    /// cover every school exactly once.
    pub fn covers(&self, schools: &[School]) -> bool {
        let mut seen = BTreeSet::new();
        for group in &self.groups {
            if group.is_empty() {
                return false;
            }
            for id in group.iter() {
                if !seen.insert(id) {
                    return false;
                }
            }
        }
        seen.len() == schools.len() && schools.iter().all(|s| seen.contains(&s.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schools() -> Vec<School> {
        vec![
            School::new(0, "A", 100, 0.5),
            School::new(1, "B", 200, 0.3),
            School::new(2, "C", 50, 0.8),
        ]
    }

    #[test]
    fn test_singletons_cover() {
        let schools = sample_schools();
        let partition = Partition::singletons(&schools);
        assert_eq!(partition.len(), 3);
        assert!(partition.covers(&schools));
        assert_eq!(partition.group_of(1), Some(1));
    }

    #[test]
    fn test_covers_rejects_overlap() {
        let schools = sample_schools();
        let partition = Partition::from_groups(vec![
            Group::from_members([0, 1]),
            Group::from_members([1, 2]),
        ]);
        assert!(!partition.covers(&schools));
    }

    #[test]
    fn test_covers_rejects_missing_member() {
        let schools = sample_schools();
        let partition =
            Partition::from_groups(vec![Group::from_members([0]), Group::from_members([2])]);
        assert!(!partition.covers(&schools));
    }

    #[test]
    fn test_covers_rejects_empty_group() {
        let schools = sample_schools();
        let partition = Partition::from_groups(vec![
            Group::from_members([0, 1, 2]),
            Group::from_members([]),
        ]);
        assert!(!partition.covers(&schools));
    }

    #[test]
    fn test_covers_rejects_foreign_id() {
        let schools = sample_schools();
        let partition = Partition::from_groups(vec![Group::from_members([0, 1, 9])]);
        assert!(!partition.covers(&schools));
    }

    #[test]
    fn test_empty_partition_covers_empty_set() {
        let partition = Partition::default();
        assert!(partition.is_empty());
        assert!(partition.covers(&[]));
    }
}
