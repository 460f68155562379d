use crate::core::{
    BandScale, BarGeometry, ChartLayout, project_bars, project_grouped_bars, project_line,
    project_stacked_areas, project_stacked_columns,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, PathPrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

use super::{ChartInstance, ChartKind, ChartModel, TOOLTIP_PADDING_PX};

const LINE_STROKE_PX: f64 = 2.0;
const LINE_MARKER_RADIUS_PX: f64 = 3.5;
const POINT_FILL_ALPHA: f64 = 0.75;

impl<R: Renderer> ChartInstance<R> {
    /// Frame the next render would draw, or `None` before a successful load.
    pub fn render_frame(&self) -> ChartResult<Option<RenderFrame>> {
        self.ensure_attached()?;
        self.model
            .as_ref()
            .map(|model| self.build_render_frame(model))
            .transpose()
    }

    pub(super) fn build_render_frame(&self, model: &ChartModel) -> ChartResult<RenderFrame> {
        let frame = RenderFrame::new(model.layout.viewport());
        let frame = self.append_axes(frame, model)?;
        let frame = match self.config.kind {
            ChartKind::Bar | ChartKind::GroupedBar | ChartKind::StackedColumn => {
                self.append_bars(frame, model)?
            }
            ChartKind::StackedArea => self.append_areas(frame, model)?,
            ChartKind::Line => self.append_lines(frame, model)?,
            ChartKind::Scatter | ChartKind::Bubble => self.append_points(frame, model),
        };
        Ok(self.append_tooltip(frame))
    }

    /// Series color, dimmed when another mark is highlighted.
    fn mark_color(&self, row: usize, slot: usize) -> Color {
        let base = self.colors[slot % self.colors.len()];
        if self.interaction.has_highlight() && !self.interaction.is_highlighted(row, Some(slot)) {
            base.with_alpha(base.alpha * self.config.dim_alpha)
        } else {
            base
        }
    }

    fn band_scale<'a>(&self, model: &'a ChartModel) -> ChartResult<&'a BandScale> {
        model.x_scale.as_band().ok_or_else(|| {
            ChartError::InvalidData(format!("{:?} charts need a band x scale", self.config.kind))
        })
    }

    fn append_bars(&self, mut frame: RenderFrame, model: &ChartModel) -> ChartResult<RenderFrame> {
        let band = self.band_scale(model)?;
        let date_format = &self.config.date_format;
        let fields = self.config.series_fields();

        let bars: Vec<BarGeometry> = match self.config.kind {
            ChartKind::GroupedBar => {
                let columns = fields
                    .iter()
                    .map(|field| model.table.require_measure(field))
                    .collect::<ChartResult<Vec<_>>>()?;
                project_grouped_bars(&model.table, &fields, band, &model.y_scale, date_format)?
                    .into_iter()
                    .filter_map(|bar| {
                        let slot = columns.iter().position(|&column| column == bar.series)?;
                        Some(BarGeometry {
                            series: slot,
                            ..bar
                        })
                    })
                    .collect()
            }
            ChartKind::StackedColumn => project_stacked_columns(
                &model.table,
                &model.layers,
                band,
                &model.y_scale,
                date_format,
            )?,
            _ => project_bars(&model.table, &fields[0], band, &model.y_scale, date_format)?
                .into_iter()
                .map(|bar| BarGeometry { series: 0, ..bar })
                .collect(),
        };

        let layout = model.layout;
        for bar in bars {
            frame = frame.with_rect(RectPrimitive::new(
                layout.margins.left + bar.x_left,
                layout.margins.top + bar.y_top,
                bar.width(),
                bar.height(),
                self.mark_color(bar.row, bar.series),
            ));
        }
        Ok(frame)
    }

    fn append_areas(&self, mut frame: RenderFrame, model: &ChartModel) -> ChartResult<RenderFrame> {
        let areas = project_stacked_areas(
            &model.table,
            &model.layers,
            &model.x_scale,
            &model.y_scale,
            &self.config.date_format,
        )?;
        let hovered_row = self.interaction.hover().map_or(0, |hover| hover.row);
        let layout = model.layout;

        for area in areas {
            if area.polygon.len() < 3 {
                continue;
            }
            let points = area
                .polygon
                .iter()
                .map(|vertex| offset(layout, vertex.x, vertex.y))
                .collect();
            frame = frame.with_path(PathPrimitive::polygon(
                points,
                self.mark_color(hovered_row, area.series),
            ));
        }
        Ok(frame)
    }

    fn append_lines(&self, mut frame: RenderFrame, model: &ChartModel) -> ChartResult<RenderFrame> {
        let layout = model.layout;
        let date_format = &self.config.date_format;
        let hover = self.interaction.hover();

        for (slot, series) in self.config.series.iter().enumerate() {
            let y_scale = model.scale_for(series.axis);
            let line = project_line(&model.table, &series.field, &model.x_scale, y_scale, date_format)?;
            let color = self.colors[slot % self.colors.len()];

            for segment in &line.segments {
                match segment.as_slice() {
                    [] => {}
                    // An isolated value between two gaps still gets a visible mark.
                    [single] => {
                        let (cx, cy) = offset(layout, single.x, single.y);
                        frame = frame.with_circle(CirclePrimitive::new(
                            cx,
                            cy,
                            LINE_MARKER_RADIUS_PX,
                            color,
                        ));
                    }
                    vertices => {
                        let points = vertices
                            .iter()
                            .map(|vertex| offset(layout, vertex.x, vertex.y))
                            .collect();
                        frame = frame.with_path(PathPrimitive::polyline(
                            points,
                            color,
                            LINE_STROKE_PX,
                        ));
                    }
                }
            }

            let Some(hover) = hover else {
                continue;
            };
            let Some(data) = model.table.rows().get(hover.row) else {
                continue;
            };
            let (Some(x), Some(value)) = (
                model.x_scale.key_position(&data.key, date_format)?,
                model.table.measure(hover.row, &series.field).value(),
            ) else {
                continue;
            };
            let (cx, cy) = offset(layout, x, y_scale.map(value)?);
            frame = frame.with_circle(CirclePrimitive::new(
                cx,
                cy,
                LINE_MARKER_RADIUS_PX,
                self.mark_color(hover.row, slot),
            ));
        }
        Ok(frame)
    }

    fn append_points(&self, mut frame: RenderFrame, model: &ChartModel) -> RenderFrame {
        let layout = model.layout;
        for point in &model.points {
            let (cx, cy) = offset(layout, point.cx, point.cy);
            let color = self.mark_color(point.row, 0);
            frame = frame.with_circle(CirclePrimitive::new(
                cx,
                cy,
                point.radius,
                color.with_alpha(color.alpha * POINT_FILL_ALPHA),
            ));
        }
        frame
    }

    fn append_tooltip(&self, mut frame: RenderFrame) -> RenderFrame {
        let tooltip = self.interaction.tooltip();
        let Some(content) = tooltip.content.as_ref().filter(|_| tooltip.visible) else {
            return frame;
        };

        let font_size = self.config.font_size_px;
        let (width, height) = content.estimated_size(font_size, TOOLTIP_PADDING_PX);
        frame = frame.with_rect(
            RectPrimitive::new(tooltip.x, tooltip.y, width, height, Color::rgba(1.0, 1.0, 1.0, 0.95))
                .with_stroke(Color::rgb(0.6, 0.6, 0.6), 1.0),
        );

        let left = tooltip.x + TOOLTIP_PADDING_PX;
        let line_height = font_size * 1.3;
        let mut baseline = tooltip.y + TOOLTIP_PADDING_PX + font_size;
        if !content.title.is_empty() {
            frame = frame.with_text(TextPrimitive::new(
                content.title.clone(),
                left,
                baseline,
                font_size,
                Color::rgb(0.1, 0.1, 0.1),
                TextHAlign::Left,
            ));
        }
        for line in &content.lines {
            baseline += line_height;
            let color = if line.emphasized {
                Color::rgb(0.0, 0.0, 0.0)
            } else {
                Color::rgb(0.35, 0.35, 0.35)
            };
            frame = frame.with_text(TextPrimitive::new(
                format!("{}: {}", line.label, line.value),
                left,
                baseline,
                font_size,
                color,
                TextHAlign::Left,
            ));
        }
        frame
    }
}

/// Inner drawing coordinate to outer frame coordinate.
fn offset(layout: ChartLayout, x: f64, y: f64) -> (f64, f64) {
    (layout.margins.left + x, layout.margins.top + y)
}
