/// GridView Sort Comparator
///
/// Builds a total order over normalized records from a single column key and
/// a direction flag. Numbers compare numerically, text lexicographically,
/// and null (or a missing field) sorts before everything else. Mixed-type
/// comparisons fall back to the values' display forms so the order stays
/// deterministic. Callers must pair the comparator with a stable sort so
/// equal keys keep their pre-sort relative order.

use crate::record::{CellValue, Record};
use serde::Serialize;
use std::cmp::Ordering;

/// The active sort configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortSpec {
    /// Column key to sort by, or `None` when no sort is active.
    pub field: Option<String>,
    /// True for descending order.
    pub descending: bool,
}

impl SortSpec {
    pub fn none() -> Self {
        SortSpec {
            field: None,
            descending: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.field.is_some()
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::none()
    }
}

/// Build a comparator over records for the given column and direction.
pub fn comparator(
    field: &str,
    descending: bool,
) -> impl Fn(&Record, &Record) -> Ordering + '_ {
    move |a, b| {
        let ordering = compare_cells(a.get(field), b.get(field));
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

fn compare_cells(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    let a_null = a.map_or(true, CellValue::is_null);
    let b_null = b.map_or(true, CellValue::is_null);

    match (a_null, b_null) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    match (a, b) {
        (Some(CellValue::Number(x)), Some(CellValue::Number(y))) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (Some(CellValue::Text(x)), Some(CellValue::Text(y))) => x.cmp(y),
        // Mixed types: compare display forms for a deterministic ordering
        (Some(x), Some(y)) => x.display().cmp(&y.display()),
        _ => Ordering::Equal,
    }
}
