use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::core::{DataTable, Measure, Row};
use crate::data::schema::{ColumnSpec, FieldParser, TableSchema, parse_key, parse_measure};
use crate::error::{ChartError, ChartResult};

/// Loads delimited text with a header row.
///
/// `resource` names the source in errors and log events.
pub fn load_csv_from_reader<R: Read>(
    reader: R,
    schema: &TableSchema,
    resource: &str,
) -> ChartResult<DataTable> {
    log_outcome(resource, read_csv(reader, schema, resource))
}

pub fn load_csv_str(text: &str, schema: &TableSchema) -> ChartResult<DataTable> {
    load_csv_from_reader(text.as_bytes(), schema, "<inline>")
}

pub fn load_csv_path(path: impl AsRef<Path>, schema: &TableSchema) -> ChartResult<DataTable> {
    let path = path.as_ref();
    let resource = path.display().to_string();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            return log_outcome(&resource, Err(ChartError::resource_load(&resource, err)));
        }
    };
    load_csv_from_reader(file, schema, &resource)
}

/// Loads a JSON array of flat records.
///
/// Numbers and numeric strings are both accepted; `null` is a missing value.
pub fn load_json_records_str(
    text: &str,
    schema: &TableSchema,
    resource: &str,
) -> ChartResult<DataTable> {
    log_outcome(resource, read_json_records(text, schema, resource))
}

fn log_outcome(resource: &str, result: ChartResult<DataTable>) -> ChartResult<DataTable> {
    match &result {
        Ok(table) => debug!(
            resource,
            rows = table.len(),
            measures = table.measure_fields().len(),
            "loaded table"
        ),
        Err(err) => warn!(resource, error = %err, "failed to load table"),
    }
    result
}

fn empty_table(schema: &TableSchema) -> ChartResult<DataTable> {
    schema.validate()?;
    DataTable::new(schema.key.field.clone(), schema.measure_fields())?
        .with_text_fields(schema.text_fields())
}

fn read_csv<R: Read>(reader: R, schema: &TableSchema, resource: &str) -> ChartResult<DataTable> {
    let mut table = empty_table(schema)?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(schema.delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header: Vec<String> = csv_reader
        .headers()
        .map_err(|err| ChartError::resource_load(resource, err))?
        .iter()
        .map(str::to_owned)
        .collect();
    let columns = schema.resolve_header(&header)?;

    for (index, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|err| ChartError::resource_load(resource, err))?;
        let row_number = index + 1;
        let cell = |position: usize| record.get(position).unwrap_or("");

        let key_text = cell(columns.key);
        let key = parse_key(key_text, &schema.key.parser).ok_or_else(|| ChartError::Parse {
            row: row_number,
            column: schema.key.column.clone(),
            value: key_text.to_owned(),
        })?;

        let values = schema
            .measures
            .iter()
            .zip(&columns.measures)
            .map(|(spec, &position)| text_measure(cell(position), spec, row_number))
            .collect();
        let texts = columns
            .texts
            .iter()
            .map(|&position| non_empty(cell(position)))
            .collect();

        table.push_row(Row::new(key, values).with_texts(texts))?;
    }

    Ok(table)
}

fn read_json_records(text: &str, schema: &TableSchema, resource: &str) -> ChartResult<DataTable> {
    let mut table = empty_table(schema)?;
    let records: Vec<Map<String, Value>> =
        serde_json::from_str(text).map_err(|err| ChartError::resource_load(resource, err))?;

    if let Some(first) = records.first() {
        let header: Vec<&str> = first.keys().map(String::as_str).collect();
        schema.resolve_header(&header)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row_number = index + 1;
        let key_text = record
            .get(&schema.key.column)
            .and_then(json_text)
            .unwrap_or_default();
        let key = parse_key(&key_text, &schema.key.parser).ok_or_else(|| ChartError::Parse {
            row: row_number,
            column: schema.key.column.clone(),
            value: key_text.clone(),
        })?;

        let values = schema
            .measures
            .iter()
            .map(|spec| match record.get(&spec.column) {
                Some(Value::Number(number)) if spec.parser != FieldParser::Percent => {
                    Measure::from_option(number.as_f64())
                }
                Some(value) => match json_text(value) {
                    Some(text) => text_measure(&text, spec, row_number),
                    None => Measure::Missing,
                },
                None => Measure::Missing,
            })
            .collect();
        let texts = schema
            .texts
            .iter()
            .map(|spec| {
                record
                    .get(&spec.column)
                    .and_then(json_text)
                    .and_then(|text| non_empty(&text))
            })
            .collect();

        table.push_row(Row::new(key, values).with_texts(texts))?;
    }

    Ok(table)
}

fn text_measure(text: &str, spec: &ColumnSpec, row_number: usize) -> Measure {
    let measure = Measure::from_option(parse_measure(text, &spec.parser));
    if measure.is_missing() && !text.trim().is_empty() {
        debug!(
            row = row_number,
            column = %spec.column,
            value = text,
            "unparseable measure treated as missing"
        );
    }
    measure
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
