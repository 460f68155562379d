use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::RowKey;
use crate::error::{ChartError, ChartResult};

/// How a text cell becomes a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldParser {
    /// Decimal number; thousands separators are accepted.
    Number,
    /// Number with an optional trailing `%`, divided by 100.
    Percent,
    /// Four-digit year, parsed to January 1 of that year.
    Year,
    /// Date or date-time in a `chrono` format string.
    Date { format: String },
    /// Free text, trimmed.
    Category,
}

/// Maps one source column to a semantic field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub column: String,
    pub field: String,
    pub parser: FieldParser,
}

impl ColumnSpec {
    /// Column whose field name equals its header name.
    #[must_use]
    pub fn new(column: impl Into<String>, parser: FieldParser) -> Self {
        let column = column.into();
        Self {
            field: column.clone(),
            column,
            parser,
        }
    }

    #[must_use]
    pub fn number(column: impl Into<String>) -> Self {
        Self::new(column, FieldParser::Number)
    }

    #[must_use]
    pub fn percent(column: impl Into<String>) -> Self {
        Self::new(column, FieldParser::Percent)
    }

    #[must_use]
    pub fn year(column: impl Into<String>) -> Self {
        Self::new(column, FieldParser::Year)
    }

    #[must_use]
    pub fn date(column: impl Into<String>, format: impl Into<String>) -> Self {
        Self::new(
            column,
            FieldParser::Date {
                format: format.into(),
            },
        )
    }

    #[must_use]
    pub fn category(column: impl Into<String>) -> Self {
        Self::new(column, FieldParser::Category)
    }

    /// Renames the semantic field, keeping the source column.
    #[must_use]
    pub fn as_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }
}

/// Declared layout of a tabular resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub key: ColumnSpec,
    #[serde(default)]
    pub measures: Vec<ColumnSpec>,
    #[serde(default)]
    pub texts: Vec<ColumnSpec>,
    #[serde(default = "default_delimiter")]
    pub delimiter: u8,
}

fn default_delimiter() -> u8 {
    b','
}

/// Column positions of a schema within one header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedColumns {
    pub key: usize,
    pub measures: Vec<usize>,
    pub texts: Vec<usize>,
}

impl TableSchema {
    #[must_use]
    pub fn new(key: ColumnSpec) -> Self {
        Self {
            key,
            measures: Vec::new(),
            texts: Vec::new(),
            delimiter: default_delimiter(),
        }
    }

    #[must_use]
    pub fn with_measure(mut self, spec: ColumnSpec) -> Self {
        self.measures.push(spec);
        self
    }

    #[must_use]
    pub fn with_measures<I>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = ColumnSpec>,
    {
        self.measures.extend(specs);
        self
    }

    #[must_use]
    pub fn with_text(mut self, spec: ColumnSpec) -> Self {
        self.texts.push(spec);
        self
    }

    /// Tab-separated input.
    #[must_use]
    pub fn tab_separated(mut self) -> Self {
        self.delimiter = b'\t';
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for spec in &self.measures {
            if !matches!(spec.parser, FieldParser::Number | FieldParser::Percent) {
                return Err(ChartError::Schema(format!(
                    "measure `{}` must use a numeric parser",
                    spec.field
                )));
            }
        }
        for spec in &self.texts {
            if spec.parser != FieldParser::Category {
                return Err(ChartError::Schema(format!(
                    "text field `{}` must use the category parser",
                    spec.field
                )));
            }
        }

        let mut fields: Vec<&str> = Vec::with_capacity(1 + self.measures.len() + self.texts.len());
        fields.push(&self.key.field);
        for spec in self.measures.iter().chain(&self.texts) {
            if fields.contains(&spec.field.as_str()) {
                return Err(ChartError::Schema(format!(
                    "field `{}` is declared twice",
                    spec.field
                )));
            }
            fields.push(&spec.field);
        }
        Ok(())
    }

    #[must_use]
    pub fn measure_fields(&self) -> Vec<String> {
        self.measures.iter().map(|spec| spec.field.clone()).collect()
    }

    #[must_use]
    pub fn text_fields(&self) -> Vec<String> {
        self.texts.iter().map(|spec| spec.field.clone()).collect()
    }

    /// Locates every declared column in `header`, before any row is read.
    pub(crate) fn resolve_header<S: AsRef<str>>(&self, header: &[S]) -> ChartResult<ResolvedColumns> {
        let find = |spec: &ColumnSpec| {
            header
                .iter()
                .position(|name| name.as_ref().trim() == spec.column)
                .ok_or_else(|| {
                    ChartError::Schema(format!("column `{}` is not in the header", spec.column))
                })
        };

        Ok(ResolvedColumns {
            key: find(&self.key)?,
            measures: self
                .measures
                .iter()
                .map(find)
                .collect::<ChartResult<Vec<_>>>()?,
            texts: self
                .texts
                .iter()
                .map(find)
                .collect::<ChartResult<Vec<_>>>()?,
        })
    }
}

/// Parses a decimal number, accepting `1,234.5` style grouping.
///
/// Empty, unparseable or non-finite text yields `None`.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = if trimmed.contains(',') {
        trimmed.replace(',', "").parse().ok()?
    } else {
        trimmed.parse().ok()?
    };
    value.is_finite().then_some(value)
}

#[must_use]
pub fn parse_percent(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let digits = trimmed.strip_suffix('%').unwrap_or(trimmed);
    parse_number(digits).map(|value| value / 100.0)
}

/// Parses a measure cell. Empty or bad text yields `None` (a missing value).
#[must_use]
pub fn parse_measure(text: &str, parser: &FieldParser) -> Option<f64> {
    match parser {
        FieldParser::Percent => parse_percent(text),
        _ => parse_number(text),
    }
}

/// Parses a key cell.
#[must_use]
pub fn parse_key(text: &str, parser: &FieldParser) -> Option<RowKey> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    match parser {
        FieldParser::Number => parse_number(trimmed).map(RowKey::Number),
        FieldParser::Percent => parse_percent(trimmed).map(RowKey::Number),
        FieldParser::Year => {
            let year: i32 = trimmed.parse().ok()?;
            RowKey::year(year).ok()
        }
        FieldParser::Date { format } => NaiveDateTime::parse_from_str(trimmed, format)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(trimmed, format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .map(RowKey::Time),
        FieldParser::Category => Some(RowKey::Category(trimmed.to_owned())),
    }
}
