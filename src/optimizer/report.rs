//! Grouping summary report.
//!
//! Turns a final partition into one row per group plus aggregate fields —
//! the tabular contract that sheet writers and other consumers render.
//! No search logic lives here.

use serde::{Deserialize, Serialize};

use crate::models::{Partition, School};
use crate::optimizer::GroupMetrics;

/// Summary of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRow {
    /// 1-based group number, in partition order.
    pub group: usize,
    /// Member school names, joined ", " in input order.
    pub schools: String,
    /// Member count.
    pub school_count: usize,
    /// Total enrollment over members.
    pub enrollment: u64,
    /// Enrollment-weighted ISP.
    pub weighted_isp: f64,
    /// Reimbursement rate at the weighted ISP.
    pub rate: f64,
    /// Share of the grand enrollment, in `[0, 1]`.
    pub enrollment_share: f64,
    /// Contribution to the overall weighted rate (`rate × share`).
    pub contribution: f64,
}

/// Tabular summary of a final grouping.
///
/// `total_rate` is the sum of the row contributions and reproduces the
/// search engine's reported total within floating-point tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingReport {
    /// One row per group, in partition order.
    pub rows: Vec<GroupRow>,
    /// Number of schools across all groups.
    pub school_count: usize,
    /// Grand total enrollment.
    pub enrollment: u64,
    /// Overall enrollment-weighted reimbursement rate.
    pub total_rate: f64,
}

impl GroupingReport {
    /// Builds the report for a partition over the school set.
    pub fn build(partition: &Partition, schools: &[School]) -> Self {
        let grand_enrollment: u64 = schools.iter().map(|s| s.enrollment).sum();
        let mut rows = Vec::with_capacity(partition.len());
        let mut total_rate = 0.0;

        for (index, group) in partition.groups().iter().enumerate() {
            let metrics = GroupMetrics::calculate(group, schools);
            let names: Vec<&str> = schools
                .iter()
                .filter(|s| group.contains(s.id))
                .map(|s| s.name.as_str())
                .collect();
            let enrollment_share = if grand_enrollment == 0 {
                0.0
            } else {
                metrics.enrollment as f64 / grand_enrollment as f64
            };
            let contribution = metrics.contribution(grand_enrollment);
            total_rate += contribution;

            rows.push(GroupRow {
                group: index + 1,
                schools: names.join(", "),
                school_count: group.len(),
                enrollment: metrics.enrollment,
                weighted_isp: metrics.weighted_isp,
                rate: metrics.rate,
                enrollment_share,
                contribution,
            });
        }

        Self {
            rows,
            school_count: schools.len(),
            enrollment: grand_enrollment,
            total_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Group;

    fn sample_schools() -> Vec<School> {
        vec![
            School::new(0, "Lincoln", 100, 0.70),
            School::new(1, "Roosevelt", 100, 0.50),
            School::new(2, "Jefferson", 200, 0.20),
        ]
    }

    #[test]
    fn test_rows_per_group() {
        let schools = sample_schools();
        let partition = Partition::from_groups(vec![
            Group::from_members([0, 1]),
            Group::from_members([2]),
        ]);
        let report = GroupingReport::build(&partition, &schools);

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.school_count, 3);
        assert_eq!(report.enrollment, 400);

        let first = &report.rows[0];
        assert_eq!(first.group, 1);
        assert_eq!(first.schools, "Lincoln, Roosevelt");
        assert_eq!(first.school_count, 2);
        assert_eq!(first.enrollment, 200);
        assert!((first.weighted_isp - 0.60).abs() < 1e-12);
        assert!((first.rate - 4.52).abs() < 1e-12);
        assert!((first.enrollment_share - 0.5).abs() < 1e-12);
        assert!((first.contribution - 4.52 * 0.5).abs() < 1e-12);

        let second = &report.rows[1];
        assert_eq!(second.group, 2);
        assert_eq!(second.schools, "Jefferson");
        assert!((second.enrollment_share - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_total_is_contribution_sum() {
        let schools = sample_schools();
        let partition = Partition::singletons(&schools);
        let report = GroupingReport::build(&partition, &schools);

        let sum: f64 = report.rows.iter().map(|r| r.contribution).sum();
        assert!((report.total_rate - sum).abs() < 1e-12);

        let share_sum: f64 = report.rows.iter().map(|r| r.enrollment_share).sum();
        assert!((share_sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_enrollment_set() {
        let schools = vec![School::new(0, "Empty", 0, 0.9)];
        let partition = Partition::singletons(&schools);
        let report = GroupingReport::build(&partition, &schools);

        assert_eq!(report.enrollment, 0);
        assert_eq!(report.total_rate, 0.0);
        assert_eq!(report.rows[0].enrollment_share, 0.0);
        assert_eq!(report.rows[0].contribution, 0.0);
    }

    #[test]
    fn test_report_serializes() {
        let schools = sample_schools();
        let partition = Partition::singletons(&schools);
        let report = GroupingReport::build(&partition, &schools);

        let json = serde_json::to_string(&report).unwrap();
        let back: GroupingReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
