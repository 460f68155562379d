use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Outer pixel size of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One numeric cell that may be absent.
///
/// `Missing` is never coerced to `0.0` or `NaN` by the loader, so callers can
/// tell a real zero from a hole in the data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Measure {
    Present(f64),
    #[default]
    Missing,
}

/// Tri-state view of a [`Measure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureState {
    Present,
    Zero,
    Missing,
}

impl Measure {
    /// Wraps a finite value. Non-finite input becomes `Missing`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self::Present(value)
        } else {
            Self::Missing
        }
    }

    #[must_use]
    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::new)
    }

    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Present(value) if value.is_finite() => Some(value),
            _ => None,
        }
    }

    /// Value used for accumulation, where a hole counts as nothing.
    #[must_use]
    pub fn or_zero(self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    #[must_use]
    pub fn is_missing(self) -> bool {
        self.value().is_none()
    }

    #[must_use]
    pub fn state(self) -> MeasureState {
        match self.value() {
            None => MeasureState::Missing,
            Some(value) if value == 0.0 => MeasureState::Zero,
            Some(_) => MeasureState::Present,
        }
    }
}

/// Key identifying one observation: a category, a point in time, or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowKey {
    Category(String),
    Time(NaiveDateTime),
    Number(f64),
}

impl RowKey {
    /// Key for a calendar year, anchored at January 1, 00:00.
    pub fn year(year: i32) -> ChartResult<Self> {
        NaiveDate::from_ymd_opt(year, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self::Time)
            .ok_or_else(|| ChartError::InvalidData(format!("year {year} is out of range")))
    }

    #[must_use]
    pub fn category(name: impl Into<String>) -> Self {
        Self::Category(name.into())
    }

    #[must_use]
    pub fn as_time(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Time(time) => Some(*time),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Category(name) => Some(name),
            _ => None,
        }
    }

    /// Calendar year for time keys, or the integral value of numeric keys.
    #[must_use]
    pub fn calendar_year(&self) -> Option<i32> {
        match self {
            Self::Time(time) => Some(time.year()),
            Self::Number(value) if value.fract() == 0.0 && value.abs() < f64::from(i32::MAX) => {
                Some(*value as i32)
            }
            _ => None,
        }
    }

    /// Text used for category domains, axis labels and tooltip titles.
    #[must_use]
    pub fn label(&self, date_format: &str) -> String {
        match self {
            Self::Category(name) => name.clone(),
            Self::Time(time) => {
                let mut text = String::new();
                // Unknown strftime items fall back to ISO-8601.
                if write!(text, "{}", time.format(date_format)).is_err() {
                    return time.to_string();
                }
                text
            }
            Self::Number(value) => value.to_string(),
        }
    }
}

/// One loaded observation.
///
/// `values` is aligned with [`DataTable::measure_fields`] and `texts` with
/// [`DataTable::text_fields`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub key: RowKey,
    pub values: Vec<Measure>,
    #[serde(default)]
    pub texts: Vec<Option<String>>,
}

impl Row {
    #[must_use]
    pub fn new(key: RowKey, values: Vec<Measure>) -> Self {
        Self {
            key,
            values,
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_texts(mut self, texts: Vec<Option<String>>) -> Self {
        self.texts = texts;
        self
    }
}

/// Typed, column-ordered table produced by the loader.
///
/// Deserialized tables go through the same row checks as [`DataTable::push_row`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataTable")]
pub struct DataTable {
    key_field: String,
    measure_fields: IndexSet<String>,
    text_fields: IndexSet<String>,
    rows: Vec<Row>,
}

#[derive(Deserialize)]
struct RawDataTable {
    key_field: String,
    measure_fields: Vec<String>,
    #[serde(default)]
    text_fields: Vec<String>,
    #[serde(default)]
    rows: Vec<Row>,
}

impl TryFrom<RawDataTable> for DataTable {
    type Error = ChartError;

    fn try_from(raw: RawDataTable) -> ChartResult<Self> {
        let mut table =
            Self::new(raw.key_field, raw.measure_fields)?.with_text_fields(raw.text_fields)?;
        table.rows.reserve(raw.rows.len());
        for row in raw.rows {
            table.push_row(row)?;
        }
        Ok(table)
    }
}

impl DataTable {
    pub fn new<I, S>(key_field: impl Into<String>, measure_fields: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = IndexSet::new();
        for field in measure_fields {
            let field = field.into();
            if !fields.insert(field.clone()) {
                return Err(ChartError::Schema(format!(
                    "measure field `{field}` is declared twice"
                )));
            }
        }

        Ok(Self {
            key_field: key_field.into(),
            measure_fields: fields,
            text_fields: IndexSet::new(),
            rows: Vec::new(),
        })
    }

    pub fn with_text_fields<I, S>(mut self, text_fields: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in text_fields {
            let field = field.into();
            if self.measure_fields.contains(&field) || !self.text_fields.insert(field.clone()) {
                return Err(ChartError::Schema(format!(
                    "text field `{field}` is declared twice"
                )));
            }
        }
        Ok(self)
    }

    /// Appends a row after checking it matches the declared columns.
    pub fn push_row(&mut self, row: Row) -> ChartResult<()> {
        if row.values.len() != self.measure_fields.len() {
            return Err(ChartError::InvalidData(format!(
                "row has {} measures, table declares {}",
                row.values.len(),
                self.measure_fields.len()
            )));
        }
        if !row.texts.is_empty() && row.texts.len() != self.text_fields.len() {
            return Err(ChartError::InvalidData(format!(
                "row has {} text fields, table declares {}",
                row.texts.len(),
                self.text_fields.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn with_row(mut self, key: RowKey, values: Vec<Measure>) -> ChartResult<Self> {
        self.push_row(Row::new(key, values))?;
        Ok(self)
    }

    #[must_use]
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    #[must_use]
    pub fn measure_fields(&self) -> &IndexSet<String> {
        &self.measure_fields
    }

    #[must_use]
    pub fn text_fields(&self) -> &IndexSet<String> {
        &self.text_fields
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn measure_index(&self, field: &str) -> Option<usize> {
        self.measure_fields.get_index_of(field)
    }

    pub fn require_measure(&self, field: &str) -> ChartResult<usize> {
        self.measure_index(field).ok_or_else(|| {
            ChartError::InvalidData(format!("table has no measure column `{field}`"))
        })
    }

    /// Cell value, `Missing` when the row or field does not exist.
    #[must_use]
    pub fn measure(&self, row: usize, field: &str) -> Measure {
        self.measure_index(field)
            .and_then(|column| self.rows.get(row)?.values.get(column).copied())
            .unwrap_or(Measure::Missing)
    }

    #[must_use]
    pub fn text(&self, row: usize, field: &str) -> Option<&str> {
        let column = self.text_fields.get_index_of(field)?;
        self.rows.get(row)?.texts.get(column)?.as_deref()
    }

    pub fn series(&self, field: &str) -> ChartResult<Vec<Measure>> {
        let column = self.require_measure(field)?;
        Ok(self.rows.iter().map(|row| row.values[column]).collect())
    }

    /// Sum of the present values of `fields` at `row`; holes count as zero.
    pub fn row_total(&self, row: usize, fields: &[String]) -> ChartResult<f64> {
        let Some(data) = self.rows.get(row) else {
            return Err(ChartError::InvalidData(format!("row {row} is out of range")));
        };
        let mut total = 0.0;
        for field in fields {
            let column = self.require_measure(field)?;
            total += data.values[column].or_zero();
        }
        Ok(total)
    }
}
