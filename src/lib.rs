//! School grouping optimization for CEP reimbursement.
//!
//! Groups schools into reimbursement pools so that the enrollment-weighted
//! total reimbursement rate is maximized. Schools pool their identified
//! student percentages (ISP): a high-ISP school can lift its group over the
//! free-rate breakpoint, so the right grouping earns more than the same
//! schools standing alone.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `School`, `Group`, `Partition`
//! - **`normalize`**: Header alias resolution and value coercion into canonical records
//! - **`filter`**: District selection and listing (pre-processing)
//! - **`rate`**: The piecewise reimbursement rate function
//! - **`optimizer`**: Greedy merge search, group metrics, and the grouping report
//!
//! # Pipeline
//!
//! Raw table → [`normalize`](normalize::normalize) → `Vec<School>` →
//! (optional [`filter::by_district`]) → [`MergeOptimizer`](optimizer::MergeOptimizer)
//! → `Partition` → [`GroupingReport`](optimizer::GroupingReport).
//!
//! Reading tabular files and rendering result sheets are the caller's
//! concern, as are the exact solver-backed formulations of the same
//! assignment problem. The search here is a deterministic, single-threaded
//! local-search heuristic with no optimality guarantee.
//!
//! # Example
//!
//! ```
//! use cep_grouping::models::School;
//! use cep_grouping::optimizer::{GroupingReport, MergeOptimizer};
//!
//! let schools = vec![
//!     School::new(0, "North High", 100, 0.70).with_district("Metro"),
//!     School::new(1, "South High", 100, 0.50).with_district("Metro"),
//! ];
//!
//! let result = MergeOptimizer::new().optimize(&schools);
//! let report = GroupingReport::build(&result.partition, &schools);
//!
//! assert_eq!(result.partition.len(), 1);
//! assert!((report.total_rate - result.total_rate).abs() < 1e-9);
//! ```

pub mod filter;
pub mod models;
pub mod normalize;
pub mod optimizer;
pub mod rate;
