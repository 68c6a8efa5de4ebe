/// GridView Record Model
///
/// Raw records arrive from the caller as loose key/value mappings. Before the
/// engine stores them they are normalized: every configured column is
/// guaranteed to be present (null and missing values become empty strings)
/// and each record is stamped with a unique, monotonically increasing id.
/// Fields outside the configured column set are kept as-is so that a later
/// column change can expose them again.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A scalar cell value.
///
/// The untagged serde representation maps directly onto JSON scalars:
/// `null` ⇒ `Null`, numbers ⇒ `Number`, strings ⇒ `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a renderer would display it: text verbatim, numbers in
    /// their shortest decimal form, null as the empty string.
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

/// Format a number the way a grid cell shows it: integral values without a
/// trailing `.0`, everything else in Rust's shortest-roundtrip form.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A record as supplied by the caller: column key to scalar value.
pub type RawRecord = HashMap<String, CellValue>;

/// A normalized record owned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Stable id, assigned at normalization time and never reused.
    pub id: String,
    /// Column key to scalar, with every configured column present.
    pub fields: HashMap<String, CellValue>,
}

impl Record {
    /// Returns the value for a column, if present.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column)
    }
}

/// Normalize a raw record against the configured columns.
///
/// Null or absent values for known columns are replaced with empty strings.
/// Values for keys outside `columns` are preserved unmodified. The id is
/// drawn from `counter`, which is incremented and must outlive any `clear`
/// of the record store so ids are never reassigned.
pub fn normalize(mut raw: RawRecord, columns: &[String], counter: &mut u64) -> Record {
    for column in columns {
        let value = raw.entry(column.clone()).or_insert(CellValue::Null);
        if value.is_null() {
            *value = CellValue::Text(String::new());
        }
    }

    let id = counter.to_string();
    *counter += 1;

    Record { id, fields: raw }
}
