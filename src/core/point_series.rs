use serde::{Deserialize, Serialize};

use crate::core::{DataTable, LinearScale, SqrtScale};
use crate::error::{ChartError, ChartResult};

/// Circle for one scatter or bubble row, in inner drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    pub row: usize,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

/// Size encoding for bubble charts.
#[derive(Debug, Clone, Copy)]
pub struct BubbleSize<'a> {
    pub field: &'a str,
    pub scale: SqrtScale,
}

/// Projects rows into circles.
///
/// Rows missing the x or y value are skipped. With `size`, a row missing the
/// size value keeps `default_radius`.
pub fn project_points(
    table: &DataTable,
    x_field: &str,
    y_field: &str,
    x_scale: &LinearScale,
    y_scale: &LinearScale,
    size: Option<BubbleSize<'_>>,
    default_radius: f64,
) -> ChartResult<Vec<PointGeometry>> {
    if !default_radius.is_finite() || default_radius <= 0.0 {
        return Err(ChartError::InvalidData(
            "point radius must be finite and > 0".to_owned(),
        ));
    }

    let x_column = table.require_measure(x_field)?;
    let y_column = table.require_measure(y_field)?;
    let size_column = size
        .map(|size| table.require_measure(size.field))
        .transpose()?;

    let mut points = Vec::with_capacity(table.len());
    for (row, data) in table.rows().iter().enumerate() {
        let (Some(x), Some(y)) = (data.values[x_column].value(), data.values[y_column].value())
        else {
            continue;
        };

        let radius = match (size, size_column) {
            (Some(size), Some(column)) => match data.values[column].value() {
                Some(value) => size.scale.map(value)?,
                None => default_radius,
            },
            _ => default_radius,
        };

        points.push(PointGeometry {
            row,
            cx: x_scale.map(x)?,
            cy: y_scale.map(y)?,
            radius,
        });
    }
    Ok(points)
}
