use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DataTable, Measure, measure_extent};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, QuantizeScale};

/// Five-step sequential blues, light to dark.
pub const SEQUENTIAL_BLUES: [&str; 5] = ["#eff3ff", "#bdd7e7", "#6baed6", "#3182bd", "#08519c"];

/// How table rows are matched to map regions and colored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethConfig {
    /// Measure that drives the fill color.
    pub value_field: String,
    /// Text field holding the region id; `None` matches on the row key.
    #[serde(default)]
    pub region_field: Option<String>,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    #[serde(default = "default_no_data_color")]
    pub no_data_color: String,
}

impl ChoroplethConfig {
    #[must_use]
    pub fn new(value_field: impl Into<String>) -> Self {
        Self {
            value_field: value_field.into(),
            region_field: None,
            palette: default_palette(),
            no_data_color: default_no_data_color(),
        }
    }

    #[must_use]
    pub fn with_region_field(mut self, field: impl Into<String>) -> Self {
        self.region_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_palette<I, S>(mut self, palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_no_data_color(mut self, hex: impl Into<String>) -> Self {
        self.no_data_color = hex.into();
        self
    }
}

/// Fill assigned to one region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionFill {
    /// Matched table row, if any.
    pub row: Option<usize>,
    pub value: Measure,
    /// Quantize bucket; `None` for regions drawn in the no-data color.
    pub bucket: Option<usize>,
    pub color: Color,
}

/// Result of joining a table onto a set of regions.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethJoin {
    /// Fill per region id, in the order the regions were given.
    pub fills: IndexMap<String, RegionFill>,
    /// Color scale over the value extent; `None` when no value is present.
    pub scale: Option<QuantizeScale<Color>>,
}

impl ChoroplethJoin {
    /// Legend entries: bucket bounds with their color.
    #[must_use]
    pub fn legend(&self) -> Vec<(f64, f64, Color)> {
        let Some(scale) = &self.scale else {
            return Vec::new();
        };
        scale
            .thresholds()
            .into_iter()
            .filter_map(|(lo, hi)| Some((lo, hi, scale.map(lo)?)))
            .collect()
    }

    /// Regions left in the no-data color.
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.fills
            .iter()
            .filter(|(_, fill)| fill.bucket.is_none())
            .map(|(region, _)| region.as_str())
    }
}

/// Joins `table` onto `regions` and colors each region by quantized value.
///
/// Region ids match case-insensitively; the first row wins on duplicates.
/// Regions with no row or with a missing value get the no-data color.
pub fn join_regions<I, S>(
    table: &DataTable,
    regions: I,
    config: &ChoroplethConfig,
) -> ChartResult<ChoroplethJoin>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let value_column = table.require_measure(&config.value_field)?;
    let region_column = match &config.region_field {
        Some(field) => Some(
            table
                .text_fields()
                .get_index_of(field.as_str())
                .ok_or_else(|| ChartError::Schema(format!("unknown text field `{field}`")))?,
        ),
        None => None,
    };
    let palette = config
        .palette
        .iter()
        .map(|hex| Color::from_hex(hex))
        .collect::<ChartResult<Vec<_>>>()?;
    let no_data = Color::from_hex(&config.no_data_color)?;

    let mut rows_by_region: IndexMap<String, usize> = IndexMap::new();
    for (index, row) in table.rows().iter().enumerate() {
        let id = match region_column {
            Some(column) => row.texts.get(column).cloned().flatten(),
            None => row.key.as_category().map(str::to_owned),
        };
        if let Some(id) = id {
            rows_by_region.entry(id.to_lowercase()).or_insert(index);
        }
    }

    let values = table.rows().iter().map(|row| row.values[value_column]);
    let scale = measure_extent(values)
        .map(|extent| QuantizeScale::new(extent, palette))
        .transpose()?;

    let mut fills = IndexMap::new();
    for region in regions {
        let region = region.into();
        let row = rows_by_region.get(&region.to_lowercase()).copied();
        let value = row.map_or(Measure::Missing, |index| table.rows()[index].values[value_column]);
        let bucket = value
            .value()
            .zip(scale.as_ref())
            .and_then(|(value, scale)| scale.bucket(value));
        let color = bucket
            .zip(scale.as_ref())
            .and_then(|(_, scale)| value.value().and_then(|value| scale.map(value)))
            .unwrap_or(no_data);
        fills.insert(
            region,
            RegionFill {
                row,
                value,
                bucket,
                color,
            },
        );
    }

    debug!(
        regions = fills.len(),
        matched = fills.values().filter(|fill| fill.bucket.is_some()).count(),
        "joined choropleth regions"
    );
    Ok(ChoroplethJoin { fills, scale })
}

fn default_palette() -> Vec<String> {
    SEQUENTIAL_BLUES.iter().map(|hex| (*hex).to_owned()).collect()
}

fn default_no_data_color() -> String {
    "#cccccc".to_owned()
}
