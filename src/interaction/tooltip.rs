use serde::{Deserialize, Serialize};

/// One `label: value` line of a tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipLine {
    pub label: String,
    pub value: String,
    /// Marks the line for the hovered series.
    #[serde(default)]
    pub emphasized: bool,
}

impl TooltipLine {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            emphasized: false,
        }
    }

    #[must_use]
    pub fn emphasized(mut self) -> Self {
        self.emphasized = true;
        self
    }
}

/// Text content of a tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub title: String,
    pub lines: Vec<TooltipLine>,
}

impl TooltipContent {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: TooltipLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Rough box size for a monospace-ish font, used for edge flipping.
    #[must_use]
    pub fn estimated_size(&self, font_size_px: f64, padding_px: f64) -> (f64, f64) {
        let widest = self
            .lines
            .iter()
            .map(|line| line.label.chars().count() + line.value.chars().count() + 2)
            .chain(std::iter::once(self.title.chars().count()))
            .max()
            .unwrap_or(0);
        let width = widest as f64 * font_size_px * 0.6 + padding_px * 2.0;
        let height = (self.lines.len() + 1) as f64 * font_size_px * 1.3 + padding_px * 2.0;
        (width, height)
    }
}

/// Top-left corner for a tooltip box near the pointer.
///
/// The box sits `offset_px` right of and below the pointer, flips to the
/// other side when it would cross the `bounds` edge, and never starts at a
/// negative coordinate.
#[must_use]
pub fn place_tooltip(
    pointer: (f64, f64),
    size: (f64, f64),
    bounds: (f64, f64),
    offset_px: f64,
) -> (f64, f64) {
    let axis = |pointer: f64, size: f64, bound: f64| {
        let after = pointer + offset_px;
        let position = if after + size > bound {
            pointer - offset_px - size
        } else {
            after
        };
        position.max(0.0)
    };
    (
        axis(pointer.0, size.0, bounds.0),
        axis(pointer.1, size.1, bounds.1),
    )
}
