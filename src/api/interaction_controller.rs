use tracing::trace;

use crate::core::XScale;
use crate::interaction::{
    HoverMode, HoverTarget, place_tooltip, resolve_band_row, resolve_grouped_slot,
    resolve_nearest_point, resolve_nearest_row, resolve_row_by_year, resolve_stack_layer,
};
use crate::render::Renderer;

use super::{ChartInstance, ChartKind, ChartModel, TOOLTIP_PADDING_PX};

impl<R: Renderer> ChartInstance<R> {
    /// Handles a pointer move in outer container coordinates.
    ///
    /// Returns the hovered datum. When the pointer sits over the drawing
    /// area but nothing matches (a gap between plotted years, band padding)
    /// the previous tooltip is left as is and `None` is returned. Leaving
    /// the drawing area counts as a pointer exit.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<HoverTarget> {
        if !self.attached {
            return None;
        }
        let model = self.model.as_ref()?;
        self.interaction.on_pointer_move(x, y);

        let layout = model.layout;
        let (inner_x, inner_y) = layout.to_inner(x, y);
        if !layout.contains_inner(inner_x, inner_y) {
            self.interaction.on_pointer_leave();
            return None;
        }

        let target = self.resolve_hover(model, inner_x, inner_y)?;
        let content = self.tooltip_content(model, &target)?;
        let size = content.estimated_size(self.config.font_size_px, TOOLTIP_PADDING_PX);
        let position = place_tooltip(
            (x, y),
            size,
            (layout.width, layout.height),
            self.config.tooltip_offset_px,
        );
        trace!(row = target.row, series = ?target.series, "hover resolved");

        self.interaction.show(target, content, position);
        Some(target)
    }

    /// Hides the tooltip and restores default highlighting.
    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
    }

    fn resolve_hover(&self, model: &ChartModel, x: f64, y: f64) -> Option<HoverTarget> {
        let date_format = &self.config.date_format;
        let nearest = self.config.hover_mode == HoverMode::Nearest;

        match self.config.kind {
            ChartKind::Bar | ChartKind::GroupedBar | ChartKind::StackedColumn => {
                let band = model.x_scale.as_band()?;
                let (index, row) = if nearest {
                    let index = band.nearest_band(x)?;
                    let label = band.categories().get_index(index)?;
                    let row = model
                        .table
                        .rows()
                        .iter()
                        .position(|data| &data.key.label(date_format) == label)?;
                    (index, row)
                } else {
                    let row = resolve_band_row(&model.table, band, x, date_format)?;
                    (band.band_at(x)?, row)
                };
                let series = match self.config.kind {
                    ChartKind::GroupedBar => {
                        resolve_grouped_slot(band, index, self.config.series.len(), x)
                    }
                    ChartKind::StackedColumn => {
                        resolve_stack_layer(&model.layers, row, &model.y_scale, y)
                    }
                    _ => None,
                };
                Some(HoverTarget {
                    row,
                    series,
                    anchor_x: band.center_at(index)?,
                    anchor_y: y,
                })
            }
            ChartKind::StackedArea | ChartKind::Line => {
                let row = match (&model.x_scale, nearest) {
                    (XScale::Time(scale), false) => resolve_row_by_year(&model.table, scale, x),
                    (XScale::Band(scale), false) => {
                        resolve_band_row(&model.table, scale, x, date_format)
                    }
                    _ => resolve_nearest_row(&model.table, &model.x_scale, x, date_format),
                }?;
                let series = if self.config.kind == ChartKind::StackedArea {
                    resolve_stack_layer(&model.layers, row, &model.y_scale, y)
                } else {
                    None
                };
                let key = &model.table.rows().get(row)?.key;
                let anchor_x = model.x_scale.key_position(key, date_format).ok()??;
                Some(HoverTarget {
                    row,
                    series,
                    anchor_x,
                    anchor_y: y,
                })
            }
            ChartKind::Scatter | ChartKind::Bubble => {
                let index =
                    resolve_nearest_point(&model.points, x, y, self.config.hover_distance_px)?;
                let point = model.points.get(index)?;
                Some(HoverTarget {
                    row: point.row,
                    series: Some(0),
                    anchor_x: point.cx,
                    anchor_y: point.cy,
                })
            }
        }
    }
}
