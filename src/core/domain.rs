use chrono::NaiveDateTime;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::{Measure, Row};

/// Order of a categorical domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CategoryOrder {
    #[default]
    FirstSeen,
    Sorted,
}

/// Min and max of the present values. Missing cells are skipped, not zeroed.
#[must_use]
pub fn measure_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = Measure>,
{
    values
        .into_iter()
        .filter_map(Measure::value)
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

#[must_use]
pub fn measure_max<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Measure>,
{
    measure_extent(values).map(|(_, max)| max)
}

/// Earliest and latest time key among `rows`.
#[must_use]
pub fn time_extent(rows: &[Row]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    rows.iter()
        .filter_map(|row| row.key.as_time())
        .fold(None, |acc, time| match acc {
            None => Some((time, time)),
            Some((min, max)) => Some((min.min(time), max.max(time))),
        })
}

/// Distinct key labels in the requested order.
#[must_use]
pub fn category_domain(rows: &[Row], order: CategoryOrder, date_format: &str) -> IndexSet<String> {
    let mut categories: IndexSet<String> =
        rows.iter().map(|row| row.key.label(date_format)).collect();
    if order == CategoryOrder::Sorted {
        categories.sort();
    }
    categories
}
