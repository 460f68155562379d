use tracing::debug;

use crate::api::{AxisSide, ChartConfig, ChartKind};
use crate::core::{
    BandScale, BubbleSize, ChartLayout, DataTable, LinearScale, PointGeometry, SqrtScale,
    StackLayer, StackOffset, TimeScale, XScale, category_domain, measure_extent, measure_max,
    nice_domain, project_points, stack, stack_extent,
};
use crate::error::{ChartError, ChartResult};

/// Layout, scales and derived geometry for one loaded table.
///
/// Rebuilt from scratch on every load; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub layout: ChartLayout,
    pub table: DataTable,
    pub x_scale: XScale,
    pub y_scale: LinearScale,
    /// Right-hand value axis of dual-axis line charts.
    pub y_right: Option<LinearScale>,
    /// Stack layers in series order; empty for unstacked kinds.
    pub layers: Vec<StackLayer>,
    /// Projected circles of scatter and bubble charts.
    pub points: Vec<PointGeometry>,
}

impl ChartModel {
    pub fn build(config: &ChartConfig, layout: ChartLayout, table: DataTable) -> ChartResult<Self> {
        if table.is_empty() {
            return Err(ChartError::InvalidData("no rows to chart".to_owned()));
        }

        let fields = config.series_fields();
        for field in &fields {
            table.require_measure(field)?;
        }

        let layers = if config.kind.is_stacked() {
            stack(&table, &fields, config.stack)?
        } else {
            Vec::new()
        };

        let x_scale = build_x_scale(config, layout, &table)?;
        let y_scale = build_left_scale(config, layout, &table, &layers)?;
        let y_right = build_right_scale(config, layout, &table)?;

        let points = if config.kind.is_point() {
            project_point_marks(config, &table, &x_scale, &y_scale)?
        } else {
            Vec::new()
        };

        debug!(
            rows = table.len(),
            series = fields.len(),
            layers = layers.len(),
            inner_width = layout.inner_width,
            inner_height = layout.inner_height,
            "built chart model"
        );

        Ok(Self {
            layout,
            table,
            x_scale,
            y_scale,
            y_right,
            layers,
            points,
        })
    }

    /// Value scale a series is drawn against.
    #[must_use]
    pub fn scale_for(&self, axis: AxisSide) -> &LinearScale {
        match (axis, &self.y_right) {
            (AxisSide::Right, Some(scale)) => scale,
            _ => &self.y_scale,
        }
    }
}

fn required_field<'a>(field: Option<&'a String>, what: &str) -> ChartResult<&'a str> {
    field
        .map(String::as_str)
        .ok_or_else(|| ChartError::InvalidData(format!("chart has no {what} field")))
}

fn band_x_scale(config: &ChartConfig, layout: ChartLayout, table: &DataTable) -> ChartResult<XScale> {
    let categories = category_domain(table.rows(), config.category_order, &config.date_format);
    Ok(XScale::Band(BandScale::with_padding(
        categories,
        layout.x_range(),
        config.band_padding,
        config.band_padding,
    )?))
}

fn build_x_scale(config: &ChartConfig, layout: ChartLayout, table: &DataTable) -> ChartResult<XScale> {
    if config.kind.is_point() {
        let field = required_field(config.x_field.as_ref(), "x")?;
        let extent = measure_extent(table.series(field)?).unwrap_or((0.0, 1.0));
        let scale = LinearScale::new(extent, layout.x_range())?.nice(config.tick_count);
        return Ok(XScale::Linear(scale));
    }
    if config.kind.uses_bands() {
        return band_x_scale(config, layout, table);
    }

    // Lines and areas follow the key kind: dates, numbers, else categories.
    let rows = table.rows();
    if rows.iter().all(|row| row.key.as_time().is_some()) {
        let scale = TimeScale::from_times(
            rows.iter().filter_map(|row| row.key.as_time()),
            layout.x_range(),
        )?;
        return Ok(XScale::Time(scale));
    }
    if rows.iter().all(|row| row.key.as_number().is_some()) {
        let extent = rows
            .iter()
            .filter_map(|row| row.key.as_number())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
                (lo.min(value), hi.max(value))
            });
        return Ok(XScale::Linear(LinearScale::new(extent, layout.x_range())?));
    }
    band_x_scale(config, layout, table)
}

/// Value domain anchored at zero, so bars and stacks start from a baseline.
fn zero_based(extent: Option<(f64, f64)>, count: usize) -> (f64, f64) {
    match extent {
        Some((lo, hi)) => nice_domain(lo.min(0.0), hi.max(0.0), count),
        None => (0.0, 1.0),
    }
}

fn fields_extent(table: &DataTable, fields: &[&str]) -> ChartResult<Option<(f64, f64)>> {
    let mut extent: Option<(f64, f64)> = None;
    for field in fields {
        if let Some((lo, hi)) = measure_extent(table.series(field)?) {
            extent = Some(match extent {
                None => (lo, hi),
                Some((min, max)) => (min.min(lo), max.max(hi)),
            });
        }
    }
    Ok(extent)
}

fn build_left_scale(
    config: &ChartConfig,
    layout: ChartLayout,
    table: &DataTable,
    layers: &[StackLayer],
) -> ChartResult<LinearScale> {
    let count = config.tick_count;
    let domain = match config.kind {
        ChartKind::StackedColumn | ChartKind::StackedArea => {
            if config.stack.offset == StackOffset::Expand {
                (0.0, 1.0)
            } else {
                zero_based(stack_extent(layers), count)
            }
        }
        ChartKind::Bar | ChartKind::GroupedBar => {
            let fields: Vec<&str> = config.series.iter().map(|s| s.field.as_str()).collect();
            zero_based(fields_extent(table, &fields)?, count)
        }
        ChartKind::Line => {
            let fields: Vec<&str> = config
                .series
                .iter()
                .filter(|series| series.axis == AxisSide::Left)
                .map(|series| series.field.as_str())
                .collect();
            zero_based(fields_extent(table, &fields)?, count)
        }
        ChartKind::Scatter | ChartKind::Bubble => {
            let field = config.series[0].field.as_str();
            match measure_extent(table.series(field)?) {
                Some((lo, hi)) => nice_domain(lo, hi, count),
                None => (0.0, 1.0),
            }
        }
    };
    LinearScale::new(domain, layout.y_range())
}

fn build_right_scale(
    config: &ChartConfig,
    layout: ChartLayout,
    table: &DataTable,
) -> ChartResult<Option<LinearScale>> {
    let fields: Vec<&str> = config
        .series
        .iter()
        .filter(|series| series.axis == AxisSide::Right)
        .map(|series| series.field.as_str())
        .collect();
    if config.kind != ChartKind::Line || fields.is_empty() {
        return Ok(None);
    }
    let domain = zero_based(fields_extent(table, &fields)?, config.tick_count);
    LinearScale::new(domain, layout.y_range()).map(Some)
}

fn project_point_marks(
    config: &ChartConfig,
    table: &DataTable,
    x_scale: &XScale,
    y_scale: &LinearScale,
) -> ChartResult<Vec<PointGeometry>> {
    let XScale::Linear(x_linear) = x_scale else {
        return Err(ChartError::InvalidData(
            "point charts need a numeric x scale".to_owned(),
        ));
    };
    let x_field = required_field(config.x_field.as_ref(), "x")?;
    let y_field = config.series[0].field.as_str();

    let size = if config.kind == ChartKind::Bubble {
        let field = required_field(config.size_field.as_ref(), "size")?;
        let max = measure_max(table.series(field)?).unwrap_or(0.0);
        Some(BubbleSize {
            field,
            scale: SqrtScale::new(max.max(0.0), config.max_bubble_radius_px)?,
        })
    } else {
        None
    };

    project_points(
        table,
        x_field,
        y_field,
        x_linear,
        y_scale,
        size,
        config.point_radius_px,
    )
}
