use serde::{Deserialize, Serialize};

use crate::core::{BandScale, DataTable, LinearScale, StackLayer};
use crate::error::{ChartError, ChartResult};

/// Pixel rectangle for one bar, in inner drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub row: usize,
    /// Index of the measure field the bar encodes.
    pub series: usize,
    pub x_left: f64,
    pub x_right: f64,
    pub y_top: f64,
    pub y_bottom: f64,
}

impl BarGeometry {
    #[must_use]
    pub fn width(self) -> f64 {
        self.x_right - self.x_left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y_bottom - self.y_top
    }
}

fn band_left(
    table: &DataTable,
    row: usize,
    x_scale: &BandScale,
    date_format: &str,
) -> Option<(usize, f64)> {
    let label = table.rows().get(row)?.key.label(date_format);
    let index = x_scale.index_of(&label)?;
    Some((index, x_scale.position_at(index)?))
}

/// One bar per row for `field`, spanning from zero to the value.
///
/// Rows with a missing value produce no bar.
pub fn project_bars(
    table: &DataTable,
    field: &str,
    x_scale: &BandScale,
    y_scale: &LinearScale,
    date_format: &str,
) -> ChartResult<Vec<BarGeometry>> {
    let series = table.require_measure(field)?;
    let baseline_y = y_scale.map(0.0)?;

    let mut bars = Vec::with_capacity(table.len());
    for (row, data) in table.rows().iter().enumerate() {
        let Some(value) = data.values[series].value() else {
            continue;
        };
        let Some((_, x_left)) = band_left(table, row, x_scale, date_format) else {
            continue;
        };
        let y_value = y_scale.map(value)?;
        bars.push(BarGeometry {
            row,
            series,
            x_left,
            x_right: x_left + x_scale.bandwidth(),
            y_top: y_value.min(baseline_y),
            y_bottom: y_value.max(baseline_y),
        });
    }
    Ok(bars)
}

/// Side-by-side bars for each row, one sub-band per field.
pub fn project_grouped_bars(
    table: &DataTable,
    fields: &[String],
    x_scale: &BandScale,
    y_scale: &LinearScale,
    date_format: &str,
) -> ChartResult<Vec<BarGeometry>> {
    if fields.is_empty() {
        return Err(ChartError::InvalidData(
            "grouped bars need at least one field".to_owned(),
        ));
    }

    let columns = fields
        .iter()
        .map(|field| table.require_measure(field))
        .collect::<ChartResult<Vec<_>>>()?;
    let baseline_y = y_scale.map(0.0)?;

    let mut bars = Vec::with_capacity(table.len() * fields.len());
    for (row, data) in table.rows().iter().enumerate() {
        let Some((band, _)) = band_left(table, row, x_scale, date_format) else {
            continue;
        };
        for (slot, &series) in columns.iter().enumerate() {
            let Some(value) = data.values[series].value() else {
                continue;
            };
            let (x_left, x_right) = x_scale.sub_band(band, slot, columns.len())?;
            let y_value = y_scale.map(value)?;
            bars.push(BarGeometry {
                row,
                series,
                x_left,
                x_right,
                y_top: y_value.min(baseline_y),
                y_bottom: y_value.max(baseline_y),
            });
        }
    }
    Ok(bars)
}

/// Stacked column segments from precomputed stack layers.
///
/// `series` on each bar is the layer position in `layers`. Missing cells
/// produce no segment.
pub fn project_stacked_columns(
    table: &DataTable,
    layers: &[StackLayer],
    x_scale: &BandScale,
    y_scale: &LinearScale,
    date_format: &str,
) -> ChartResult<Vec<BarGeometry>> {
    let mut bars = Vec::with_capacity(table.len() * layers.len());
    for row in 0..table.len() {
        let Some((_, x_left)) = band_left(table, row, x_scale, date_format) else {
            continue;
        };
        for (series, layer) in layers.iter().enumerate() {
            let Some(band) = layer.bands.get(row) else {
                continue;
            };
            if !band.is_drawable() {
                continue;
            }
            let y_lower = y_scale.map(band.lower)?;
            let y_upper = y_scale.map(band.upper)?;
            bars.push(BarGeometry {
                row,
                series,
                x_left,
                x_right: x_left + x_scale.bandwidth(),
                y_top: y_lower.min(y_upper),
                y_bottom: y_lower.max(y_upper),
            });
        }
    }
    Ok(bars)
}
