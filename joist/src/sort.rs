//! Sort engine.
//!
//! Holds the single active sort directive and orders records by it. Sorting
//! is stable, and null or missing values always land after defined ones,
//! whichever way the directive points.

use std::cmp::Ordering;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::record::GridRecord;
use crate::value::CellValue;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Orient a comparison result.
    pub fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// The active (field, direction) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortDirective {
    /// Field name being sorted on.
    pub key: String,
    /// Direction of the sort.
    pub direction: SortDirection,
}

impl SortDirective {
    /// Ascending sort on a field.
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on a field.
    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Per-column sort indicator shown in the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortIndicator {
    Ascending,
    Descending,
    #[default]
    None,
}

impl SortIndicator {
    /// Header marker: `" ▲"`, `" ▼"`, or nothing.
    pub fn marker(self) -> &'static str {
        match self {
            SortIndicator::Ascending => " ▲",
            SortIndicator::Descending => " ▼",
            SortIndicator::None => "",
        }
    }
}

/// Sort engine state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    directive: Option<SortDirective>,
}

impl SortState {
    /// Create an unsorted state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state with an initial directive.
    pub fn with_directive(directive: SortDirective) -> Self {
        Self {
            directive: Some(directive),
        }
    }

    /// The active directive, if any.
    pub fn directive(&self) -> Option<&SortDirective> {
        self.directive.as_ref()
    }

    /// Handle a sort request for a column.
    ///
    /// Returns `true` if the directive changed. Requests on non-sortable or
    /// computed columns are ignored.
    pub fn request_sort<T>(&mut self, column: &Column<T>) -> bool {
        let Some(key) = column.sort_key() else {
            trace!("Sort request ignored for column '{}'", column.header);
            return false;
        };

        let next = match &self.directive {
            Some(current) if current.key == key => SortDirective {
                key: current.key.clone(),
                direction: current.direction.flipped(),
            },
            _ => SortDirective::ascending(key),
        };
        trace!("Sort directive: {} {:?}", next.key, next.direction);
        self.directive = Some(next);
        true
    }

    /// Drop the directive. Returns `true` if one was active.
    pub fn clear(&mut self) -> bool {
        self.directive.take().is_some()
    }

    /// Indicator for a column given the current directive.
    pub fn indicator<T>(&self, column: &Column<T>) -> SortIndicator {
        match (&self.directive, column.sort_key()) {
            (Some(directive), Some(key)) if directive.key == key => match directive.direction {
                SortDirection::Ascending => SortIndicator::Ascending,
                SortDirection::Descending => SortIndicator::Descending,
            },
            _ => SortIndicator::None,
        }
    }

    /// Order records by the current directive.
    pub fn apply<'a, T: GridRecord>(&self, records: &'a [T]) -> Vec<&'a T> {
        apply(records, self.directive())
    }
}

/// Compare two (possibly absent) field values under a direction.
///
/// Absent and null values compare greater than every defined value and are
/// never affected by direction.
pub fn compare_values(
    a: Option<&CellValue>,
    b: Option<&CellValue>,
    direction: SortDirection,
) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => direction.orient(a.compare(b)),
    }
}

/// Order records by a directive without touching the input.
///
/// With no directive the records come back in input order.
pub fn apply<'a, T: GridRecord>(records: &'a [T], directive: Option<&SortDirective>) -> Vec<&'a T> {
    let Some(directive) = directive else {
        return records.iter().collect();
    };

    // Read each key once; `sort_by` is stable so ties keep input order.
    let mut keyed: Vec<(Option<CellValue>, &'a T)> = records
        .iter()
        .map(|record| (record.field(&directive.key), record))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_values(a.as_ref(), b.as_ref(), directive.direction));
    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nulls_last_both_directions() {
        let one = CellValue::Int(1);
        let null = CellValue::Null;
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            assert_eq!(compare_values(Some(&null), Some(&one), direction), Ordering::Greater);
            assert_eq!(compare_values(None, Some(&one), direction), Ordering::Greater);
            assert_eq!(compare_values(Some(&one), None, direction), Ordering::Less);
            assert_eq!(compare_values(None, Some(&null), direction), Ordering::Equal);
        }
    }

    #[test]
    fn test_descending_reverses_defined_values() {
        let a = CellValue::Int(1);
        let b = CellValue::Int(2);
        assert_eq!(compare_values(Some(&a), Some(&b), SortDirection::Ascending), Ordering::Less);
        assert_eq!(compare_values(Some(&a), Some(&b), SortDirection::Descending), Ordering::Greater);
    }

    #[test]
    fn test_indicator_markers() {
        assert_eq!(SortIndicator::Ascending.marker(), " ▲");
        assert_eq!(SortIndicator::Descending.marker(), " ▼");
        assert_eq!(SortIndicator::None.marker(), "");
    }
}
