//! School entity model.
//!
//! A school is the atomic unit of grouping: an enrollment count and an
//! identified-student percentage, owned by a district (LEA).

use serde::{Deserialize, Serialize};

/// School identifier, assigned 0-based by input row order during
/// normalization.
pub type SchoolId = u32;

/// A school record in canonical form.
///
/// Immutable once produced by normalization. `isp` is always a fraction in
/// `[0, 1]`, never a percent-scale number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    /// Stable identifier (input row order).
    pub id: SchoolId,
    /// Display name.
    pub name: String,
    /// Owning district (LEA) name.
    pub district: String,
    /// Enrolled student count.
    pub enrollment: u64,
    /// Identified student percentage, as a fraction of enrollment.
    pub isp: f64,
}

impl School {
    /// Creates a school record with an empty district.
    pub fn new(id: SchoolId, name: impl Into<String>, enrollment: u64, isp: f64) -> Self {
        Self {
            id,
            name: name.into(),
            district: String::new(),
            enrollment,
            isp,
        }
    }

    /// Sets the owning district.
    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = district.into();
        self
    }

    /// Identified student count (`isp × enrollment`), the numerator of
    /// every enrollment-weighted ISP aggregate.
    #[inline]
    pub fn identified_students(&self) -> f64 {
        self.isp * self.enrollment as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_school_builder() {
        let school = School::new(3, "Lincoln Elementary", 450, 0.625).with_district("Metro District");

        assert_eq!(school.id, 3);
        assert_eq!(school.name, "Lincoln Elementary");
        assert_eq!(school.district, "Metro District");
        assert_eq!(school.enrollment, 450);
        assert!((school.isp - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_identified_students() {
        let school = School::new(0, "A", 400, 0.5);
        assert!((school.identified_students() - 200.0).abs() < 1e-12);

        let empty = School::new(1, "B", 0, 0.9);
        assert_eq!(empty.identified_students(), 0.0);
    }

    #[test]
    fn test_school_serde_roundtrip() {
        let school = School::new(7, "Roosevelt High", 1200, 0.41).with_district("North LEA");
        let json = serde_json::to_string(&school).unwrap();
        let back: School = serde_json::from_str(&json).unwrap();
        assert_eq!(back, school);
    }
}
