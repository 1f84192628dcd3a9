//! Grouping domain models.
//!
//! Core data types for the grouping problem and its solutions.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `School` | One entity: enrollment + identified-student percentage |
//! | `Group` | A set of schools pooled for reimbursement |
//! | `Partition` | A complete, disjoint grouping of all schools |

mod group;
mod partition;
mod school;

pub use group::Group;
pub use partition::Partition;
pub use school::{School, SchoolId};
