//! District-level pre-processing of a school set.
//!
//! Selecting one district's schools and listing the districts present are
//! performed before optimization. The search engine is indifferent to
//! whether it receives the full set or a filtered subset; ids are
//! preserved from normalization either way.

use thiserror::Error;

use crate::models::School;

/// District selection failure.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FilterError {
    /// No school belongs to the requested district.
    #[error("no schools match district '{district}'; available districts: {}", .available.join(", "))]
    NoMatch {
        /// The district that was requested.
        district: String,
        /// Districts actually present in the school set.
        available: Vec<String>,
    },
}

/// Sorted unique district names present in the school set.
pub fn districts(schools: &[School]) -> Vec<String> {
    let mut names: Vec<String> = schools.iter().map(|s| s.district.clone()).collect();
    names.sort();
    names.dedup();
    names
}

/// Selects the schools belonging to `district` (exact name match).
///
/// An empty selection is an error naming the districts that do exist, so
/// the condition surfaces before any search runs on an empty set.
pub fn by_district(schools: &[School], district: &str) -> Result<Vec<School>, FilterError> {
    let selected: Vec<School> = schools
        .iter()
        .filter(|s| s.district == district)
        .cloned()
        .collect();
    if selected.is_empty() {
        return Err(FilterError::NoMatch {
            district: district.to_string(),
            available: districts(schools),
        });
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schools() -> Vec<School> {
        vec![
            School::new(0, "A", 100, 0.5).with_district("Metro"),
            School::new(1, "B", 200, 0.3).with_district("North"),
            School::new(2, "C", 50, 0.8).with_district("Metro"),
            School::new(3, "D", 75, 0.6).with_district("North"),
        ]
    }

    #[test]
    fn test_districts_sorted_unique() {
        assert_eq!(districts(&sample_schools()), vec!["Metro", "North"]);
        assert!(districts(&[]).is_empty());
    }

    #[test]
    fn test_by_district_preserves_ids() {
        let schools = sample_schools();
        let metro = by_district(&schools, "Metro").unwrap();

        assert_eq!(metro.len(), 2);
        assert_eq!(metro[0].id, 0);
        assert_eq!(metro[1].id, 2);
    }

    #[test]
    fn test_by_district_no_match() {
        let schools = sample_schools();
        let err = by_district(&schools, "South").unwrap_err();

        match &err {
            FilterError::NoMatch {
                district,
                available,
            } => {
                assert_eq!(district, "South");
                assert_eq!(available, &["Metro", "North"]);
            }
        }
        assert!(err.to_string().contains("South"));
        assert!(err.to_string().contains("Metro"));
    }

    #[test]
    fn test_by_district_is_exact_match() {
        let schools = sample_schools();
        assert!(by_district(&schools, "metro").is_err());
    }
}
