//! Per-group derived metrics.
//!
//! Computes a group's enrollment-weighted ISP, reimbursement rate, and
//! total enrollment from its membership and the school set. Metrics are
//! derived on demand, never stored on the group.

use serde::{Deserialize, Serialize};

use crate::models::{Group, School};
use crate::rate::reimbursement_rate;

/// Aggregate metrics of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupMetrics {
    /// Enrollment-weighted mean ISP of the members (0 when enrollment is 0).
    pub weighted_isp: f64,
    /// Reimbursement rate at the weighted ISP (0 when enrollment is 0).
    pub rate: f64,
    /// Total enrollment over the members.
    pub enrollment: u64,
}

impl GroupMetrics {
    /// Computes metrics for `group` against the school set.
    ///
    /// Pure and deterministic. A group whose members have zero total
    /// enrollment yields all-zero metrics rather than dividing by zero.
    pub fn calculate(group: &Group, schools: &[School]) -> Self {
        let mut enrollment = 0u64;
        let mut identified = 0.0f64;
        for school in schools {
            if group.contains(school.id) {
                enrollment += school.enrollment;
                identified += school.identified_students();
            }
        }

        if enrollment == 0 {
            return Self {
                weighted_isp: 0.0,
                rate: 0.0,
                enrollment: 0,
            };
        }

        let weighted_isp = identified / enrollment as f64;
        Self {
            weighted_isp,
            rate: reimbursement_rate(weighted_isp),
            enrollment,
        }
    }

    /// This group's contribution to the overall weighted rate, given the
    /// grand total enrollment across all schools.
    pub fn contribution(&self, grand_enrollment: u64) -> f64 {
        if grand_enrollment == 0 {
            0.0
        } else {
            self.rate * self.enrollment as f64 / grand_enrollment as f64
        }
    }
}
