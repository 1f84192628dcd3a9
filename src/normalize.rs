//! Schema normalization for raw school tables.
//!
//! Maps heterogeneous column headers onto the canonical record schema
//! {SCHOOL, LEA_NAME, ENROLLMENT, ISP} and coerces cell values. Each
//! canonical field resolves by a case-insensitive match against a declared
//! alias table, then by a punctuation-normalized fallback (uppercase,
//! spaces to underscores) against the canonical name itself.
//!
//! # ISP unit detection
//!
//! The ISP column's unit is read from its first cell. Text containing a
//! percent sign puts the whole column in percent-string form: the sign is
//! stripped and every value divided by 100. Otherwise the column is
//! numeric, and is rescaled by 100 only when its maximum exceeds 1. A
//! numeric column whose values were meant as percentages but all fall
//! below 1 (every school under 1% identified) is therefore read as
//! fractions — a known limitation of the unit heuristic.
//!
//! All checks run eagerly; the first failure aborts normalization and no
//! partial record set is produced. The input table is never modified.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{School, SchoolId};

/// Accepted header aliases per canonical field, checked in order.
/// Matching is case-insensitive (entries are stored uppercase).
const SCHOOL_ALIASES: &[&str] = &["SCHOOL", "SCHOOL NAME"];
const LEA_ALIASES: &[&str] = &[
    "LEA_NAME",
    "LEA NAME",
    "DISTRICT",
    "DISTRICT NAME",
    "SCHOOL DISTRICT",
];
const ENROLLMENT_ALIASES: &[&str] = &["ENROLLMENT", "STUDENT ENROLLMENT", "TOTAL ENROLLMENT"];
const ISP_ALIASES: &[&str] = &["ISP", "ISP %", "ISP%", "IDENTIFIED STUDENT PERCENTAGE"];

/// A cell value in a raw table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A numeric cell.
    Number(f64),
    /// A text cell.
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// A raw input table: header row plus data rows.
///
/// How the table got into memory (CSV, spreadsheet, JSON) is the caller's
/// concern; this crate only consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Column headers, as they appeared in the source.
    pub columns: Vec<String>,
    /// Data rows; each row's cells align with `columns`.
    pub rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    /// Creates a table with the given headers and no rows.
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a data row.
    pub fn with_row(mut self, row: Vec<RawValue>) -> Self {
        self.rows.push(row);
        self
    }
}

/// Normalization failure.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NormalizeError {
    /// A required canonical field has no matching column.
    #[error("required column '{field}' not found; available columns: {}", .available.join(", "))]
    MissingColumn {
        /// The canonical field that could not be resolved.
        field: &'static str,
        /// Headers that were present in the table.
        available: Vec<String>,
    },

    /// A row's cell count differs from the header count.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// An enrollment cell failed integer coercion.
    #[error("row {row}: invalid enrollment: {detail}")]
    InvalidEnrollment { row: usize, detail: String },

    /// An ISP cell failed fraction coercion.
    #[error("row {row}: invalid ISP: {detail}")]
    InvalidIsp { row: usize, detail: String },
}

/// Normalizes a raw table into canonical school records.
///
/// Ids are assigned 0-based in row order.
///
/// # Examples
///
/// ```
/// use cep_grouping::normalize::{normalize, RawTable};
///
/// let table = RawTable::new(["School Name", "District", "Enrollment", "ISP %"])
///     .with_row(vec!["Lincoln".into(), "Metro".into(), 450.into(), "62.5%".into()]);
///
/// let schools = normalize(&table).unwrap();
/// assert_eq!(schools[0].id, 0);
/// assert_eq!(schools[0].district, "Metro");
/// assert!((schools[0].isp - 0.625).abs() < 1e-12);
/// ```
pub fn normalize(table: &RawTable) -> Result<Vec<School>, NormalizeError> {
    let school_col = resolve_column(&table.columns, "SCHOOL", SCHOOL_ALIASES)?;
    let lea_col = resolve_column(&table.columns, "LEA_NAME", LEA_ALIASES)?;
    let enrollment_col = resolve_column(&table.columns, "ENROLLMENT", ENROLLMENT_ALIASES)?;
    let isp_col = resolve_column(&table.columns, "ISP", ISP_ALIASES)?;

    for (row_idx, row) in table.rows.iter().enumerate() {
        if row.len() != table.columns.len() {
            return Err(NormalizeError::RowWidth {
                row: row_idx,
                expected: table.columns.len(),
                found: row.len(),
            });
        }
    }

    let isps = coerce_isp_column(&table.rows, isp_col)?;

    let mut schools = Vec::with_capacity(table.rows.len());
    for (row_idx, row) in table.rows.iter().enumerate() {
        schools.push(School {
            id: row_idx as SchoolId,
            name: display_text(&row[school_col]),
            district: display_text(&row[lea_col]),
            enrollment: coerce_enrollment(&row[enrollment_col], row_idx)?,
            isp: isps[row_idx],
        });
    }
    Ok(schools)
}

/// Resolves a canonical field to a column index: alias table first (in
/// declaration order), then the punctuation-normalized fallback.
fn resolve_column(
    columns: &[String],
    canonical: &'static str,
    aliases: &[&str],
) -> Result<usize, NormalizeError> {
    for alias in aliases {
        if let Some(idx) = columns.iter().position(|c| c.to_uppercase() == *alias) {
            return Ok(idx);
        }
    }
    if let Some(idx) = columns
        .iter()
        .position(|c| c.to_uppercase().replace(' ', "_") == canonical)
    {
        return Ok(idx);
    }
    Err(NormalizeError::MissingColumn {
        field: canonical,
        available: columns.to_vec(),
    })
}

fn coerce_isp_column(rows: &[Vec<RawValue>], col: usize) -> Result<Vec<f64>, NormalizeError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    // Unit detection from the first cell only.
    let percent_strings = matches!(&rows[0][col], RawValue::Text(t) if t.contains('%'));

    let mut values = Vec::with_capacity(rows.len());
    for (row_idx, row) in rows.iter().enumerate() {
        let raw = match &row[col] {
            RawValue::Number(n) => *n,
            RawValue::Text(t) => {
                let trimmed = if percent_strings {
                    t.trim().trim_end_matches('%')
                } else {
                    t.trim()
                };
                trimmed.parse::<f64>().map_err(|_| NormalizeError::InvalidIsp {
                    row: row_idx,
                    detail: format!("'{t}' is not numeric"),
                })?
            }
        };
        values.push(raw);
    }

    if percent_strings {
        for v in &mut values {
            *v /= 100.0;
        }
    } else {
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if max > 1.0 {
            for v in &mut values {
                *v /= 100.0;
            }
        }
    }

    for (row_idx, v) in values.iter().enumerate() {
        if !v.is_finite() || !(0.0..=1.0).contains(v) {
            return Err(NormalizeError::InvalidIsp {
                row: row_idx,
                detail: format!("{v} is not a fraction in [0, 1]"),
            });
        }
    }
    Ok(values)
}

fn coerce_enrollment(value: &RawValue, row: usize) -> Result<u64, NormalizeError> {
    let n = match value {
        RawValue::Number(n) => *n,
        RawValue::Text(t) => t
            .trim()
            .parse::<f64>()
            .map_err(|_| NormalizeError::InvalidEnrollment {
                row,
                detail: format!("'{t}' is not numeric"),
            })?,
    };
    if !n.is_finite() {
        return Err(NormalizeError::InvalidEnrollment {
            row,
            detail: format!("{n} is not a finite count"),
        });
    }
    if n < 0.0 {
        return Err(NormalizeError::InvalidEnrollment {
            row,
            detail: format!("{n} is negative"),
        });
    }
    Ok(n.trunc() as u64)
}

/// Renders a cell as display text (numeric cells get their decimal form).
fn display_text(value: &RawValue) -> String {
    match value {
        RawValue::Text(t) => t.clone(),
        RawValue::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{}", *n as i64),
        RawValue::Number(n) => n.to_string(),
    }
}
