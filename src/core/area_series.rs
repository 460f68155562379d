use serde::{Deserialize, Serialize};

use crate::core::{DataTable, LinearScale, StackLayer, XScale};
use crate::error::ChartResult;

/// Vertex in inner drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

/// Closed outline of one stacked layer.
///
/// `polygon` runs along the upper bounds left to right, back along the lower
/// bounds right to left, and repeats the first vertex at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedAreaGeometry {
    pub series: usize,
    pub key: String,
    pub polygon: Vec<Vertex>,
}

impl StackedAreaGeometry {
    /// Upper edge of the band, one vertex per plotted row.
    #[must_use]
    pub fn upper_edge(&self) -> &[Vertex] {
        let plotted = self.polygon.len().saturating_sub(1) / 2;
        &self.polygon[..plotted]
    }
}

/// Projects stack layers into closed area polygons.
///
/// Missing cells have zero height, so the band pinches closed instead of
/// leaving a gap. Rows whose key cannot be placed on `x_scale` are skipped.
pub fn project_stacked_areas(
    table: &DataTable,
    layers: &[StackLayer],
    x_scale: &XScale,
    y_scale: &LinearScale,
    date_format: &str,
) -> ChartResult<Vec<StackedAreaGeometry>> {
    let mut xs = Vec::with_capacity(table.len());
    for (row, data) in table.rows().iter().enumerate() {
        if let Some(x) = x_scale.key_position(&data.key, date_format)? {
            xs.push((row, x));
        }
    }

    let mut areas = Vec::with_capacity(layers.len());
    for (series, layer) in layers.iter().enumerate() {
        if xs.is_empty() {
            areas.push(StackedAreaGeometry {
                series,
                key: layer.key.clone(),
                polygon: Vec::new(),
            });
            continue;
        }

        let mut upper = Vec::with_capacity(xs.len());
        let mut lower = Vec::with_capacity(xs.len());
        for &(row, x) in &xs {
            let Some(band) = layer.bands.get(row) else {
                continue;
            };
            upper.push(Vertex {
                x,
                y: y_scale.map(band.upper)?,
            });
            lower.push(Vertex {
                x,
                y: y_scale.map(band.lower)?,
            });
        }

        let mut polygon = Vec::with_capacity(upper.len() * 2 + 1);
        polygon.extend(upper.iter().copied());
        polygon.extend(lower.iter().rev().copied());
        if let Some(first) = polygon.first().copied() {
            polygon.push(first);
        }

        areas.push(StackedAreaGeometry {
            series,
            key: layer.key.clone(),
            polygon,
        });
    }
    Ok(areas)
}
