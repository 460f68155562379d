use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

/// Minimum inner drawing size in pixels.
pub const MIN_INNER_SIZE_PX: f64 = 1.0;

/// Proportional sizing rules for a chart container.
///
/// Left/right margins are fractions of the width, top/bottom margins are
/// fractions of the derived height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f64,
    #[serde(default = "default_margin_top_ratio")]
    pub margin_top_ratio: f64,
    #[serde(default = "default_margin_right_ratio")]
    pub margin_right_ratio: f64,
    #[serde(default = "default_margin_bottom_ratio")]
    pub margin_bottom_ratio: f64,
    #[serde(default = "default_margin_left_ratio")]
    pub margin_left_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: default_aspect_ratio(),
            margin_top_ratio: default_margin_top_ratio(),
            margin_right_ratio: default_margin_right_ratio(),
            margin_bottom_ratio: default_margin_bottom_ratio(),
            margin_left_ratio: default_margin_left_ratio(),
        }
    }
}

impl LayoutConfig {
    #[must_use]
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.margin_top_ratio = top;
        self.margin_right_ratio = right;
        self.margin_bottom_ratio = bottom;
        self.margin_left_ratio = left;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "layout aspect ratio must be finite and > 0".to_owned(),
            ));
        }

        for (name, value) in [
            ("top", self.margin_top_ratio),
            ("right", self.margin_right_ratio),
            ("bottom", self.margin_bottom_ratio),
            ("left", self.margin_left_ratio),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "layout {name} margin ratio must be finite and >= 0"
                )));
            }
        }

        if self.margin_left_ratio + self.margin_right_ratio >= 1.0 {
            return Err(ChartError::InvalidData(
                "layout left + right margin ratios must be < 1".to_owned(),
            ));
        }
        if self.margin_top_ratio + self.margin_bottom_ratio >= 1.0 {
            return Err(ChartError::InvalidData(
                "layout top + bottom margin ratios must be < 1".to_owned(),
            ));
        }

        Ok(self)
    }
}

fn default_aspect_ratio() -> f64 {
    0.6
}

fn default_margin_top_ratio() -> f64 {
    0.1
}

fn default_margin_right_ratio() -> f64 {
    0.05
}

fn default_margin_bottom_ratio() -> f64 {
    0.15
}

fn default_margin_left_ratio() -> f64 {
    0.1
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Resolved pixel geometry for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub inner_width: f64,
    pub inner_height: f64,
    /// True when the container was too small to hold a drawing area and the
    /// inner size was clamped up to [`MIN_INNER_SIZE_PX`].
    pub degenerate: bool,
}

impl ChartLayout {
    /// Derives the layout from a measured container width.
    ///
    /// Never fails on small or zero widths: the inner area is clamped to at
    /// least one pixel and flagged as degenerate.
    #[must_use]
    pub fn from_container_width(container_width: f64, config: LayoutConfig) -> Self {
        let width = if container_width.is_finite() {
            container_width.max(0.0)
        } else {
            0.0
        };
        let height = width * config.aspect_ratio;

        let margins = Margins {
            top: height * config.margin_top_ratio,
            right: width * config.margin_right_ratio,
            bottom: height * config.margin_bottom_ratio,
            left: width * config.margin_left_ratio,
        };

        let raw_inner_width = width - margins.left - margins.right;
        let raw_inner_height = height - margins.top - margins.bottom;
        let degenerate = !raw_inner_width.is_finite()
            || !raw_inner_height.is_finite()
            || raw_inner_width < MIN_INNER_SIZE_PX
            || raw_inner_height < MIN_INNER_SIZE_PX;

        Self {
            width,
            height,
            margins,
            inner_width: raw_inner_width.max(MIN_INNER_SIZE_PX),
            inner_height: raw_inner_height.max(MIN_INNER_SIZE_PX),
            degenerate,
        }
    }

    /// Pixel range for an x axis.
    #[must_use]
    pub fn x_range(self) -> (f64, f64) {
        (0.0, self.inner_width)
    }

    /// Pixel range for a y axis, inverted so larger values plot higher.
    #[must_use]
    pub fn y_range(self) -> (f64, f64) {
        (self.inner_height, 0.0)
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        Viewport::new(
            self.width.round().max(1.0) as u32,
            self.height.round().max(1.0) as u32,
        )
    }

    /// SVG `viewBox` attribute for responsive scaling.
    #[must_use]
    pub fn view_box(self) -> String {
        let viewport = self.viewport();
        format!("0 0 {} {}", viewport.width, viewport.height)
    }

    /// Converts an outer (container) coordinate to inner drawing coordinates.
    #[must_use]
    pub fn to_inner(self, x: f64, y: f64) -> (f64, f64) {
        (x - self.margins.left, y - self.margins.top)
    }

    /// True when the inner coordinate lies inside the drawing area.
    #[must_use]
    pub fn contains_inner(self, x: f64, y: f64) -> bool {
        x.is_finite()
            && y.is_finite()
            && (0.0..=self.inner_width).contains(&x)
            && (0.0..=self.inner_height).contains(&y)
    }
}
