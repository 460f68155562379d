//! Typed loading of tabular chart resources.

pub mod loader;
pub mod schema;

pub use loader::{load_csv_from_reader, load_csv_path, load_csv_str, load_json_records_str};
pub use schema::{
    ColumnSpec, FieldParser, TableSchema, parse_key, parse_measure, parse_number, parse_percent,
};
