//! Data quality analysis
//!
//! Per-column missing-value counts, coarse type inference from sampled
//! values, and outlier flagging for numeric columns via the 1.5×IQR rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::table::{is_missing, Table};

/// How many non-missing values the type heuristic samples per column
const TYPE_SAMPLE_SIZE: usize = 50;

/// Coarse column type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Numeric,
    Date,
    Boolean,
    Categorical,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Numeric => write!(f, "numeric"),
            Self::Date => write!(f, "date"),
            Self::Boolean => write!(f, "boolean"),
            Self::Categorical => write!(f, "categorical"),
        }
    }
}

/// Quality findings for one column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnQuality {
    pub name: String,
    pub inferred_type: ColumnType,
    pub missing_count: usize,
    pub missing_pct: f64,
    /// Values lying strictly outside [Q1 - 1.5*IQR, Q3 + 1.5*IQR];
    /// empty for non-numeric columns
    pub outliers: Vec<f64>,
}

/// Quality findings for a whole table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub row_count: usize,
    pub columns: Vec<ColumnQuality>,
}

impl QualityReport {
    /// Analyze every column of a table
    pub fn analyze(table: &Table) -> Self {
        let row_count = table.row_count();
        let columns = table
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| analyze_column(name, &table.column(idx), row_count))
            .collect();

        Self { row_count, columns }
    }

    /// One log line per column, for the processing log
    pub fn summary_lines(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|col| {
                format!(
                    "Column '{}' ({}): {} missing ({:.1}%), {} outliers",
                    col.name,
                    col.inferred_type,
                    col.missing_count,
                    col.missing_pct,
                    col.outliers.len()
                )
            })
            .collect()
    }
}

fn analyze_column(name: &str, cells: &[Option<&str>], row_count: usize) -> ColumnQuality {
    let present: Vec<&str> = cells
        .iter()
        .filter_map(|cell| *cell)
        .filter(|cell| !is_missing(cell))
        .collect();

    let missing_count = row_count - present.len();
    let missing_pct = if row_count == 0 {
        0.0
    } else {
        missing_count as f64 / row_count as f64 * 100.0
    };

    let inferred_type = infer_type(&present);

    let outliers = match inferred_type {
        ColumnType::Integer | ColumnType::Numeric => {
            let values: Vec<f64> = present.iter().filter_map(|v| v.parse().ok()).collect();
            iqr_outliers(&values)
        }
        _ => Vec::new(),
    };

    ColumnQuality {
        name: name.to_string(),
        inferred_type,
        missing_count,
        missing_pct,
        outliers,
    }
}

/// Infer a coarse type tag from a sample of non-missing values
pub fn infer_type(values: &[&str]) -> ColumnType {
    let sample: Vec<&str> = values.iter().take(TYPE_SAMPLE_SIZE).copied().collect();
    if sample.is_empty() {
        return ColumnType::Categorical;
    }

    if sample.iter().all(|v| is_boolean(v)) {
        return ColumnType::Boolean;
    }
    if sample.iter().all(|v| v.parse::<i64>().is_ok()) {
        return ColumnType::Integer;
    }
    if sample.iter().all(|v| v.parse::<f64>().is_ok()) {
        return ColumnType::Numeric;
    }
    if sample.iter().all(|v| is_date(v)) {
        return ColumnType::Date;
    }
    ColumnType::Categorical
}

fn is_boolean(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "false" | "yes" | "no"
    )
}

fn is_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(value, "%m/%d/%Y").is_ok()
        || NaiveDate::parse_from_str(value, "%d/%m/%Y").is_ok()
}

/// Values strictly outside [Q1 - 1.5*IQR, Q3 + 1.5*IQR]
pub fn iqr_outliers(values: &[f64]) -> Vec<f64> {
    if values.len() < 4 {
        return Vec::new();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower = q1 - 1.5 * iqr;
    let upper = q3 + 1.5 * iqr;

    values
        .iter()
        .copied()
        .filter(|v| *v < lower || *v > upper)
        .collect()
}

/// Linearly interpolated quantile of a sorted slice
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
