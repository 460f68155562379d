use serde::{Deserialize, Serialize};

use crate::core::{DataTable, LinearScale, Vertex, XScale};
use crate::error::ChartResult;

/// Polyline for one series, split wherever a value is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    pub series: usize,
    pub segments: Vec<Vec<Vertex>>,
}

/// Projects `field` into line segments against its own `y_scale`.
///
/// Dual-axis charts call this once per series with the left or right scale.
pub fn project_line(
    table: &DataTable,
    field: &str,
    x_scale: &XScale,
    y_scale: &LinearScale,
    date_format: &str,
) -> ChartResult<LineGeometry> {
    let series = table.require_measure(field)?;
    let mut segments = Vec::new();
    let mut current: Vec<Vertex> = Vec::new();

    for data in table.rows() {
        let Some(x) = x_scale.key_position(&data.key, date_format)? else {
            continue;
        };
        match data.values[series].value() {
            Some(value) => current.push(Vertex {
                x,
                y: y_scale.map(value)?,
            }),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    Ok(LineGeometry { series, segments })
}
