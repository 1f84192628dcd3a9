//! Greedy partition-merge search.
//!
//! # Algorithm
//!
//! 1. Start from the singleton partition (one group per school).
//! 2. Evaluate every unordered pair of groups; a pair's improvement is the
//!    change in the enrollment-weighted total rate if the two were merged.
//! 3. Apply the best strictly-improving merge — the first such pair in
//!    (i, j) enumeration order wins ties — and repeat.
//! 4. Stop at a local optimum, at a configured group-count target, or at
//!    the iteration cap.
//!
//! Pair evaluation works on per-group running sums (enrollment and
//! identified students), so a hypothetical merge costs O(1) instead of a
//! member rescan.
//!
//! # Complexity
//! O(g²) per iteration for g current groups.

use itertools::Itertools;
use tracing::debug;

use crate::models::{Group, Partition, School};
use crate::rate::reimbursement_rate;

/// Configuration for the merge search.
///
/// # Examples
///
/// ```
/// use cep_grouping::optimizer::MergeConfig;
///
/// let config = MergeConfig::default()
///     .with_max_groups(3)
///     .with_max_iterations(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Hard cap on search iterations (safeguard against non-termination).
    pub max_iterations: usize,

    /// Target group count. When set, the search keeps merging down to this
    /// many groups — applying non-improving merges if it must — and stops
    /// as soon as the target is reached. When unset, the search runs to a
    /// local optimum.
    pub max_groups: Option<usize>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_groups: None,
        }
    }
}

impl MergeConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_max_groups(mut self, n: usize) -> Self {
        self.max_groups = Some(n);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_groups == Some(0) {
            return Err("max_groups must be at least 1".into());
        }
        Ok(())
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// No pairwise merge improves the total (local optimum).
    Converged,
    /// The configured group-count target was reached.
    TargetReached,
    /// The iteration cap was exhausted before convergence.
    IterationLimit,
}

/// Result of a merge search run.
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Final grouping: disjoint, complete, no empty groups.
    pub partition: Partition,
    /// Enrollment-weighted total reimbursement rate of the final grouping.
    pub total_rate: f64,
    /// Number of search iterations performed.
    pub iterations: usize,
    /// Terminal state.
    pub termination: Termination,
}

/// Per-group running aggregates, kept in partition order. Merging two
/// entries adds their sums; no member rescan is needed.
#[derive(Debug, Clone)]
struct GroupState {
    group: Group,
    enrollment: u64,
    /// Σ isp × enrollment over members.
    identified: f64,
}

impl GroupState {
    fn seed(school: &School) -> Self {
        Self {
            group: Group::singleton(school.id),
            enrollment: school.enrollment,
            identified: school.identified_students(),
        }
    }

    /// rate × enrollment — this group's numerator in the weighted total.
    fn weighted_rate(&self) -> f64 {
        if self.enrollment == 0 {
            return 0.0;
        }
        reimbursement_rate(self.identified / self.enrollment as f64) * self.enrollment as f64
    }

    /// `weighted_rate` of the hypothetical union with `other`.
    fn merged_weighted_rate(&self, other: &GroupState) -> f64 {
        let enrollment = self.enrollment + other.enrollment;
        if enrollment == 0 {
            return 0.0;
        }
        let identified = self.identified + other.identified;
        reimbursement_rate(identified / enrollment as f64) * enrollment as f64
    }

    fn absorb(&mut self, other: GroupState) {
        self.group.absorb(other.group);
        self.enrollment += other.enrollment;
        self.identified += other.identified;
    }
}

/// Greedy best-improvement partition merger.
///
/// Deterministic: identical input and configuration produce the identical
/// merge sequence, final partition, and total. Ties on improvement fall to
/// the first pair in enumeration order; the merged group is appended at
/// the back of the partition, so later enumeration order is fixed too.
///
/// # Examples
///
/// ```
/// use cep_grouping::models::School;
/// use cep_grouping::optimizer::MergeOptimizer;
///
/// let schools = vec![
///     School::new(0, "North High", 100, 0.70),
///     School::new(1, "South High", 100, 0.50),
/// ];
///
/// let result = MergeOptimizer::new().optimize(&schools);
/// assert_eq!(result.partition.len(), 1);
/// assert!((result.total_rate - 4.52).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MergeOptimizer {
    config: MergeConfig,
}

impl MergeOptimizer {
    /// Creates an optimizer with the default configuration.
    pub fn new() -> Self {
        Self {
            config: MergeConfig::default(),
        }
    }

    /// Creates an optimizer with the given configuration.
    pub fn with_config(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Runs the merge search over the school set.
    ///
    /// An empty school set yields an empty partition with total 0. A
    /// school set whose total enrollment is 0 yields total 0 without any
    /// division error.
    pub fn optimize(&self, schools: &[School]) -> MergeResult {
        self.config.validate().expect("invalid MergeConfig");

        if schools.is_empty() {
            return MergeResult {
                partition: Partition::default(),
                total_rate: 0.0,
                iterations: 0,
                termination: Termination::Converged,
            };
        }

        let grand_enrollment: u64 = schools.iter().map(|s| s.enrollment).sum();
        let total_of = |weighted: f64| {
            if grand_enrollment == 0 {
                0.0
            } else {
                weighted / grand_enrollment as f64
            }
        };

        let mut groups: Vec<GroupState> = schools.iter().map(GroupState::seed).collect();
        // Numerator of the current total; the reported total divides it by
        // the grand enrollment.
        let mut weighted_total: f64 = groups.iter().map(GroupState::weighted_rate).sum();

        let mut iterations = 0usize;
        let termination = loop {
            if groups.len() <= 1 {
                break Termination::Converged;
            }
            if iterations >= self.config.max_iterations {
                break Termination::IterationLimit;
            }
            iterations += 1;

            // Best pair over all unordered (i, j); first encountered wins ties.
            let mut best: Option<(usize, usize, f64)> = None;
            for (i, j) in (0..groups.len()).tuple_combinations() {
                let delta = groups[i].merged_weighted_rate(&groups[j])
                    - groups[i].weighted_rate()
                    - groups[j].weighted_rate();
                if best.is_none_or(|(_, _, best_delta)| delta > best_delta) {
                    best = Some((i, j, delta));
                }
            }
            let Some((i, j, delta)) = best else {
                break Termination::Converged;
            };

            // Below a supplied target the merge is applied even when it
            // does not improve; otherwise only strict improvements count.
            let must_merge = self
                .config
                .max_groups
                .is_some_and(|target| groups.len() > target);
            if delta <= 0.0 && !must_merge {
                break Termination::Converged;
            }

            // Remove both groups and append their union at the back.
            let absorbed = groups.remove(j);
            let mut merged = groups.remove(i);
            merged.absorb(absorbed);
            weighted_total += delta;
            debug!(
                group_i = i,
                group_j = j,
                improvement = total_of(delta),
                groups = groups.len() + 1,
                total = total_of(weighted_total),
                "merge applied"
            );
            groups.push(merged);

            if let Some(target) = self.config.max_groups {
                if groups.len() <= target {
                    break Termination::TargetReached;
                }
            }
        };

        let partition = Partition::from_groups(groups.into_iter().map(|g| g.group).collect());
        let total_rate = total_of(weighted_total);
        debug!(
            ?termination,
            iterations,
            groups = partition.len(),
            total = total_rate,
            "merge search finished"
        );

        MergeResult {
            partition,
            total_rate,
            iterations,
            termination,
        }
    }
}
