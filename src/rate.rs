//! Reimbursement rate model.
//!
//! Maps an enrollment-weighted ISP (identified student percentage) to a
//! per-student reimbursement rate. Two regimes: above the breakpoint every
//! student is reimbursed at the flat free rate; below it the free rate
//! (scaled by the 1.6x multiplier) is blended with the paid base rate.
//!
//! The exact solver-backed formulations of this problem use a three-regime
//! variant with a second breakpoint at 0.25. The heuristic keeps the
//! two-regime form; which of the two is the intended policy is an open
//! question tracked in DESIGN.md.

/// Weighted-ISP threshold above which a group earns the flat free rate.
pub const FREE_RATE_BREAKPOINT: f64 = 0.625;

/// Rate earned above [`FREE_RATE_BREAKPOINT`].
pub const FREE_RATE: f64 = 4.5;

/// Paid base rate blended in below the breakpoint.
pub const PAID_RATE: f64 = 0.5;

/// ISP multiplier applied in the blended regime.
pub const ISP_MULTIPLIER: f64 = 1.6;

/// Computes the reimbursement rate for an enrollment-weighted ISP.
///
/// Pure and total over all of `f64`; meaningful for `isp` in `[0, 1]`.
/// The blended branch exceeds [`FREE_RATE`] just below the breakpoint
/// (peaking at 4.6875 at `isp = 0.625`), so the function is not monotone
/// across the regime boundary.
///
/// # Examples
///
/// ```
/// use cep_grouping::rate::reimbursement_rate;
///
/// assert_eq!(reimbursement_rate(0.70), 4.5);
/// assert!((reimbursement_rate(0.50) - 3.85).abs() < 1e-12);
/// ```
pub fn reimbursement_rate(isp: f64) -> f64 {
    if isp > FREE_RATE_BREAKPOINT {
        FREE_RATE
    } else {
        FREE_RATE * (isp * ISP_MULTIPLIER) + PAID_RATE * (1.0 - isp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_above_breakpoint() {
        assert_eq!(reimbursement_rate(0.626), 4.5);
        assert_eq!(reimbursement_rate(0.70), 4.5);
        assert_eq!(reimbursement_rate(1.0), 4.5);
    }

    #[test]
    fn test_blended_below_breakpoint() {
        // rate(0) = paid rate only
        assert!((reimbursement_rate(0.0) - 0.5).abs() < 1e-12);
        // rate(0.5) = 4.5 * 0.8 + 0.5 * 0.5
        assert!((reimbursement_rate(0.5) - 3.85).abs() < 1e-12);
        // rate(0.25) = 4.5 * 0.4 + 0.5 * 0.75
        assert!((reimbursement_rate(0.25) - 2.175).abs() < 1e-12);
    }

    #[test]
    fn test_breakpoint_belongs_to_blended_branch() {
        // The comparison is strict, so 0.625 itself is blended — and the
        // blended branch peaks there, above the flat rate.
        assert!((reimbursement_rate(0.625) - 4.6875).abs() < 1e-12);
    }

    #[test]
    fn test_range_over_unit_interval() {
        for k in 0..=1000 {
            let isp = k as f64 / 1000.0;
            let rate = reimbursement_rate(isp);
            assert!(
                (0.5..=4.6875 + 1e-12).contains(&rate),
                "rate({isp}) = {rate} out of range"
            );
        }
    }

    #[test]
    fn test_scenario_values() {
        // The worked grouping example: 0.70 and 0.50 merge to 0.60.
        assert_eq!(reimbursement_rate(0.70), 4.5);
        assert!((reimbursement_rate(0.50) - 3.85).abs() < 1e-12);
        assert!((reimbursement_rate(0.60) - 4.52).abs() < 1e-12);
    }
}
