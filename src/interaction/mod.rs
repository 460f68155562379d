pub mod tooltip;

use serde::{Deserialize, Serialize};

pub use hit_test::{
    resolve_band_row, resolve_grouped_slot, resolve_nearest_point, resolve_nearest_row,
    resolve_row_by_year, resolve_stack_layer,
};
pub use tooltip::{TooltipContent, TooltipLine, place_tooltip};

/// How a pointer x position is matched to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HoverMode {
    /// Exact key equality (same year or same category); gaps match nothing.
    #[default]
    ExactKey,
    /// Row drawn closest to the pointer.
    Nearest,
}

/// Hovered datum in inner drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverTarget {
    pub row: usize,
    /// Hovered series, when the chart resolves one (stacked, grouped, lines).
    pub series: Option<usize>,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

/// Tooltip as exposed to host applications, in outer coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TooltipState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub content: Option<TooltipContent>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    cursor: Option<(f64, f64)>,
    hover: Option<HoverTarget>,
    tooltip: TooltipState,
}

impl InteractionState {
    #[must_use]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    #[must_use]
    pub fn hover(&self) -> Option<HoverTarget> {
        self.hover
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// True when a mark for `(row, series)` should draw in highlighted style.
    ///
    /// With a hovered series only that series' mark is highlighted; otherwise
    /// every mark of the hovered row is.
    #[must_use]
    pub fn is_highlighted(&self, row: usize, series: Option<usize>) -> bool {
        match self.hover {
            Some(hover) if hover.row == row => match (hover.series, series) {
                (Some(hovered), Some(series)) => hovered == series,
                _ => true,
            },
            _ => false,
        }
    }

    /// True when any mark is highlighted, so others draw dimmed.
    #[must_use]
    pub fn has_highlight(&self) -> bool {
        self.hover.is_some()
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    /// Shows the tooltip for a resolved target at the given outer position.
    pub fn show(&mut self, target: HoverTarget, content: TooltipContent, position: (f64, f64)) {
        self.hover = Some(target);
        self.tooltip = TooltipState {
            visible: true,
            x: position.0,
            y: position.1,
            content: Some(content),
        };
    }

    /// Hides the tooltip and restores default mark styling.
    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
        self.hover = None;
        self.tooltip = TooltipState::default();
    }
}
