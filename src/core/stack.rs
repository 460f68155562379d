use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{DataTable, Measure};
use crate::error::{ChartError, ChartResult};

/// Order in which series are accumulated, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StackOrder {
    /// The caller's key order.
    #[default]
    Keys,
    /// The caller's key order, reversed.
    Reverse,
    /// Smallest series sum at the bottom; ties keep key order.
    Ascending,
    /// Largest series sum at the bottom; ties keep key order.
    Descending,
}

/// Baseline adjustment applied after accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StackOffset {
    /// Bands start at zero.
    #[default]
    None,
    /// Each row is normalized so its top band ends at 1.
    Expand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StackConfig {
    #[serde(default)]
    pub order: StackOrder,
    #[serde(default)]
    pub offset: StackOffset,
}

/// One series' band at one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackBand {
    pub lower: f64,
    pub upper: f64,
    /// Source cell, kept so a hole is not reported as a zero.
    pub value: Measure,
}

impl StackBand {
    #[must_use]
    pub fn height(self) -> f64 {
        self.upper - self.lower
    }

    /// Missing cells occupy no space and get no mark.
    #[must_use]
    pub fn is_drawable(self) -> bool {
        !self.value.is_missing()
    }

    /// True when `value` lies in `[min(lower, upper), max(lower, upper))`.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (lo, hi) = if self.lower <= self.upper {
            (self.lower, self.upper)
        } else {
            (self.upper, self.lower)
        };
        value >= lo && value < hi
    }
}

/// Bands of one series across all rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackLayer {
    pub key: String,
    /// Position in the accumulation order, 0 is the bottom layer.
    pub index: usize,
    pub bands: Vec<StackBand>,
}

/// Accumulates `keys` of `table` into layered bands.
///
/// Layers come back in `keys` order whatever the stacking order, and each
/// row's bands tile `[0, total]` without gaps (`[0, 1]` with
/// [`StackOffset::Expand`]). Missing cells add nothing.
pub fn stack(table: &DataTable, keys: &[String], config: StackConfig) -> ChartResult<Vec<StackLayer>> {
    let mut columns: SmallVec<[usize; 8]> = SmallVec::with_capacity(keys.len());
    for key in keys {
        let column = table.require_measure(key)?;
        if columns.contains(&column) {
            return Err(ChartError::InvalidData(format!(
                "stack key `{key}` is listed twice"
            )));
        }
        columns.push(column);
    }

    let order = stacking_order(table, &columns, config.order);
    let mut layers: Vec<StackLayer> = keys
        .iter()
        .map(|key| StackLayer {
            key: key.clone(),
            index: 0,
            bands: Vec::with_capacity(table.len()),
        })
        .collect();
    for (position, &layer) in order.iter().enumerate() {
        layers[layer].index = position;
    }

    let mut row_bands: SmallVec<[StackBand; 8]> = SmallVec::with_capacity(keys.len());
    for row in table.rows() {
        row_bands.clear();
        row_bands.resize(
            keys.len(),
            StackBand {
                lower: 0.0,
                upper: 0.0,
                value: Measure::Missing,
            },
        );

        let mut cumulative = 0.0;
        for &layer in &order {
            let value = row.values[columns[layer]];
            let lower = cumulative;
            cumulative += value.or_zero();
            row_bands[layer] = StackBand {
                lower,
                upper: cumulative,
                value,
            };
        }

        if config.offset == StackOffset::Expand && cumulative != 0.0 {
            for band in &mut row_bands {
                band.lower /= cumulative;
                band.upper /= cumulative;
            }
        }

        for (layer, band) in layers.iter_mut().zip(row_bands.iter()) {
            layer.bands.push(*band);
        }
    }

    trace!(
        layers = layers.len(),
        rows = table.len(),
        order = ?config.order,
        offset = ?config.offset,
        "stacked series"
    );
    Ok(layers)
}

fn stacking_order(table: &DataTable, columns: &[usize], order: StackOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..columns.len()).collect();
    match order {
        StackOrder::Keys => {}
        StackOrder::Reverse => indices.reverse(),
        StackOrder::Ascending | StackOrder::Descending => {
            let sums: Vec<f64> = columns
                .iter()
                .map(|&column| {
                    table
                        .rows()
                        .iter()
                        .map(|row| row.values[column].or_zero())
                        .sum()
                })
                .collect();
            if order == StackOrder::Ascending {
                indices.sort_by(|&a, &b| sums[a].total_cmp(&sums[b]));
            } else {
                indices.sort_by(|&a, &b| sums[b].total_cmp(&sums[a]));
            }
        }
    }
    indices
}

/// Lowest lower bound and highest upper bound over all layers.
#[must_use]
pub fn stack_extent(layers: &[StackLayer]) -> Option<(f64, f64)> {
    layers
        .iter()
        .flat_map(|layer| layer.bands.iter())
        .fold(None, |acc, band| {
            let lo = band.lower.min(band.upper);
            let hi = band.lower.max(band.upper);
            match acc {
                None => Some((lo, hi)),
                Some((min, max)) => Some((lo.min(min), hi.max(max))),
            }
        })
}

/// Layer whose band at `row` contains `value`, skipping missing cells.
#[must_use]
pub fn layer_at(layers: &[StackLayer], row: usize, value: f64) -> Option<usize> {
    layers.iter().position(|layer| {
        layer
            .bands
            .get(row)
            .is_some_and(|band| band.is_drawable() && band.contains(value))
    })
}
