use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::{CategoryOrder, LayoutConfig, StackConfig, StackOffset};
use crate::error::{ChartError, ChartResult};
use crate::format::ValueStyle;
use crate::interaction::HoverMode;
use crate::render::{Color, OrdinalColorScale, default_palette};

/// Visualization drawn by a chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    GroupedBar,
    StackedColumn,
    StackedArea,
    Line,
    Scatter,
    Bubble,
}

impl ChartKind {
    #[must_use]
    pub fn is_stacked(self) -> bool {
        matches!(self, Self::StackedColumn | Self::StackedArea)
    }

    #[must_use]
    pub fn is_point(self) -> bool {
        matches!(self, Self::Scatter | Self::Bubble)
    }

    #[must_use]
    pub fn uses_bands(self) -> bool {
        matches!(self, Self::Bar | Self::GroupedBar | Self::StackedColumn)
    }
}

/// Value axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisSide {
    #[default]
    Left,
    Right,
}

/// One plotted measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub field: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub axis: AxisSide,
    /// `#rrggbb`; falls back to the palette.
    #[serde(default)]
    pub color: Option<String>,
}

impl SeriesConfig {
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: None,
            axis: AxisSide::Left,
            color: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn on_axis(mut self, axis: AxisSide) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn with_color(mut self, hex: impl Into<String>) -> Self {
        self.color = Some(hex.into());
        self
    }

    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.field)
    }
}

/// Declarative setup of one chart instance.
///
/// Serializable so hosts can ship chart definitions next to their data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub series: Vec<SeriesConfig>,
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Measure plotted on x by scatter and bubble charts.
    #[serde(default)]
    pub x_field: Option<String>,
    /// Measure encoded as bubble area.
    #[serde(default)]
    pub size_field: Option<String>,
    #[serde(default)]
    pub stack: StackConfig,
    #[serde(default)]
    pub hover_mode: HoverMode,
    #[serde(default)]
    pub category_order: CategoryOrder,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
    #[serde(default)]
    pub value_style: ValueStyle,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_band_padding")]
    pub band_padding: f64,
    #[serde(default = "default_point_radius_px")]
    pub point_radius_px: f64,
    #[serde(default = "default_max_bubble_radius_px")]
    pub max_bubble_radius_px: f64,
    #[serde(default = "default_hover_distance_px")]
    pub hover_distance_px: f64,
    #[serde(default = "default_tooltip_offset_px")]
    pub tooltip_offset_px: f64,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    #[serde(default = "default_dim_alpha")]
    pub dim_alpha: f64,
    /// `#rrggbb` colors; empty means the ten-color category palette.
    #[serde(default)]
    pub palette: Vec<String>,
}

impl ChartConfig {
    #[must_use]
    pub fn new(kind: ChartKind, series: Vec<SeriesConfig>) -> Self {
        Self {
            kind,
            series,
            layout: LayoutConfig::default(),
            x_field: None,
            size_field: None,
            stack: StackConfig::default(),
            hover_mode: HoverMode::default(),
            category_order: CategoryOrder::default(),
            tick_count: default_tick_count(),
            value_style: ValueStyle::default(),
            date_format: default_date_format(),
            band_padding: default_band_padding(),
            point_radius_px: default_point_radius_px(),
            max_bubble_radius_px: default_max_bubble_radius_px(),
            hover_distance_px: default_hover_distance_px(),
            tooltip_offset_px: default_tooltip_offset_px(),
            font_size_px: default_font_size_px(),
            dim_alpha: default_dim_alpha(),
            palette: Vec::new(),
        }
    }

    /// Config plotting `fields` with default labels and colors.
    #[must_use]
    pub fn for_fields<I, S>(kind: ChartKind, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(kind, fields.into_iter().map(SeriesConfig::new).collect())
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_x_field(mut self, field: impl Into<String>) -> Self {
        self.x_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_size_field(mut self, field: impl Into<String>) -> Self {
        self.size_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: StackConfig) -> Self {
        self.stack = stack;
        self
    }

    #[must_use]
    pub fn with_hover_mode(mut self, mode: HoverMode) -> Self {
        self.hover_mode = mode;
        self
    }

    #[must_use]
    pub fn with_category_order(mut self, order: CategoryOrder) -> Self {
        self.category_order = order;
        self
    }

    #[must_use]
    pub fn with_value_style(mut self, style: ValueStyle) -> Self {
        self.value_style = style;
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
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
    pub fn series_fields(&self) -> Vec<String> {
        self.series.iter().map(|series| series.field.clone()).collect()
    }

    /// Number style for value-axis ticks; expanded stacks read as shares.
    #[must_use]
    pub fn axis_value_style(&self) -> ValueStyle {
        if self.kind.is_stacked() && self.stack.offset == StackOffset::Expand {
            ValueStyle::Percent { decimals: 0 }
        } else {
            self.value_style
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.layout.validate()?;

        if self.series.is_empty() {
            return Err(ChartError::InvalidData(
                "chart needs at least one series".to_owned(),
            ));
        }
        for (index, series) in self.series.iter().enumerate() {
            if self.series[..index]
                .iter()
                .any(|other| other.field == series.field)
            {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` is listed twice",
                    series.field
                )));
            }
            if series.axis == AxisSide::Right && self.kind != ChartKind::Line {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` uses the right axis, which only line charts have",
                    series.field
                )));
            }
            if let Some(hex) = &series.color {
                Color::from_hex(hex)?;
            }
        }

        if self.kind.is_point() && self.x_field.is_none() {
            return Err(ChartError::InvalidData(
                "scatter and bubble charts need an x field".to_owned(),
            ));
        }
        if self.kind == ChartKind::Bubble && self.size_field.is_none() {
            return Err(ChartError::InvalidData(
                "bubble charts need a size field".to_owned(),
            ));
        }

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ChartError::InvalidData(format!(
                "date format `{}` is not a valid strftime pattern",
                self.date_format
            )));
        }
        if matches!(self.kind, ChartKind::Bar | ChartKind::Scatter | ChartKind::Bubble)
            && self.series.len() != 1
        {
            return Err(ChartError::InvalidData(format!(
                "{:?} charts plot exactly one series",
                self.kind
            )));
        }

        if self.tick_count == 0 {
            return Err(ChartError::InvalidData(
                "tick count must be > 0".to_owned(),
            ));
        }
        if !self.band_padding.is_finite() || !(0.0..1.0).contains(&self.band_padding) {
            return Err(ChartError::InvalidData(
                "band padding must be in [0, 1)".to_owned(),
            ));
        }
        for (name, value) in [
            ("point radius", self.point_radius_px),
            ("max bubble radius", self.max_bubble_radius_px),
            ("font size", self.font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("hover distance", self.hover_distance_px),
            ("tooltip offset", self.tooltip_offset_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.dim_alpha.is_finite() || !(0.0..=1.0).contains(&self.dim_alpha) {
            return Err(ChartError::InvalidData(
                "dim alpha must be in [0, 1]".to_owned(),
            ));
        }

        self.resolve_palette().map(|_| ())
    }

    /// Per-series colors: explicit series colors first, then the palette.
    pub fn resolve_palette(&self) -> ChartResult<Vec<Color>> {
        let palette = if self.palette.is_empty() {
            default_palette()?
        } else {
            self.palette
                .iter()
                .map(|hex| Color::from_hex(hex))
                .collect::<ChartResult<Vec<_>>>()?
        };

        let scale = OrdinalColorScale::new(
            self.series.iter().map(|series| series.field.as_str()),
            palette,
        )?;
        self.series
            .iter()
            .enumerate()
            .map(|(index, series)| match &series.color {
                Some(hex) => Color::from_hex(hex),
                None => Ok(scale.color(&series.field).unwrap_or_else(|| scale.color_at(index))),
            })
            .collect()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }
}

fn default_tick_count() -> usize {
    10
}

fn default_date_format() -> String {
    "%Y".to_owned()
}

fn default_band_padding() -> f64 {
    0.1
}

fn default_point_radius_px() -> f64 {
    4.0
}

fn default_max_bubble_radius_px() -> f64 {
    30.0
}

fn default_hover_distance_px() -> f64 {
    8.0
}

fn default_tooltip_offset_px() -> f64 {
    12.0
}

fn default_font_size_px() -> f64 {
    12.0
}

fn default_dim_alpha() -> f64 {
    0.35
}
