use crate::core::{RowKey, XScale};
use crate::error::ChartResult;
use crate::format::{ValueStyle, format_value};
use crate::render::{Color, LinePrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

use super::{ChartInstance, ChartModel};

const AXIS_COLOR: Color = Color::rgb(0.2, 0.2, 0.2);
const GRID_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.08);
const TICK_LENGTH_PX: f64 = 6.0;
/// Horizontal room one x label needs, in multiples of the font size.
const X_LABEL_SLOT_EMS: f64 = 4.0;

impl<R: Renderer> ChartInstance<R> {
    pub(super) fn append_axes(
        &self,
        frame: RenderFrame,
        model: &ChartModel,
    ) -> ChartResult<RenderFrame> {
        let frame = self.append_x_axis(frame, model)?;
        let frame = self.append_value_axis(frame, model, false)?;
        if model.y_right.is_some() {
            return self.append_value_axis(frame, model, true);
        }
        Ok(frame)
    }

    /// Pixel x and label of every x tick, in inner coordinates.
    fn x_ticks(&self, model: &ChartModel) -> ChartResult<Vec<(f64, String)>> {
        let font_size = self.config.font_size_px;
        let max_labels = ((model.layout.inner_width / (font_size * X_LABEL_SLOT_EMS)).floor()
            as usize)
            .max(1);
        let date_format = &self.config.date_format;

        match &model.x_scale {
            XScale::Band(band) => {
                let stride = band.categories().len().div_ceil(max_labels).max(1);
                Ok(band
                    .categories()
                    .iter()
                    .enumerate()
                    .step_by(stride)
                    .filter_map(|(index, label)| Some((band.center_at(index)?, label.clone())))
                    .collect())
            }
            XScale::Time(time) => time
                .year_ticks(max_labels)?
                .into_iter()
                .map(|tick| Ok((time.map(tick)?, RowKey::Time(tick).label(date_format))))
                .collect(),
            XScale::Linear(linear) => linear
                .ticks(self.config.tick_count.min(max_labels))
                .into_iter()
                .map(|tick| Ok((linear.map(tick)?, format_value(tick, self.config.value_style))))
                .collect(),
        }
    }

    fn append_x_axis(&self, mut frame: RenderFrame, model: &ChartModel) -> ChartResult<RenderFrame> {
        let layout = model.layout;
        let left = layout.margins.left;
        let baseline = layout.margins.top + layout.inner_height;
        let font_size = self.config.font_size_px;

        frame = frame.with_line(LinePrimitive::new(
            left,
            baseline,
            left + layout.inner_width,
            baseline,
            1.0,
            AXIS_COLOR,
        ));
        for (x, label) in self.x_ticks(model)? {
            let x = left + x;
            frame = frame.with_line(LinePrimitive::new(
                x,
                baseline,
                x,
                baseline + TICK_LENGTH_PX,
                1.0,
                AXIS_COLOR,
            ));
            if label.is_empty() {
                continue;
            }
            frame = frame.with_text(TextPrimitive::new(
                label,
                x,
                baseline + TICK_LENGTH_PX + font_size,
                font_size,
                AXIS_COLOR,
                TextHAlign::Center,
            ));
        }
        Ok(frame)
    }

    /// Left value axis with grid lines, or the right axis of dual-axis lines.
    fn append_value_axis(
        &self,
        mut frame: RenderFrame,
        model: &ChartModel,
        right: bool,
    ) -> ChartResult<RenderFrame> {
        let scale = match (&model.y_right, right) {
            (Some(scale), true) => scale,
            _ => &model.y_scale,
        };
        let layout = model.layout;
        let top = layout.margins.top;
        let axis_x = if right {
            layout.margins.left + layout.inner_width
        } else {
            layout.margins.left
        };
        let font_size = self.config.font_size_px;
        let style: ValueStyle = self.config.axis_value_style();

        frame = frame.with_line(LinePrimitive::new(
            axis_x,
            top,
            axis_x,
            top + layout.inner_height,
            1.0,
            AXIS_COLOR,
        ));
        for tick in scale.ticks(self.config.tick_count) {
            let y = top + scale.map(tick)?;
            if !right {
                frame = frame.with_line(LinePrimitive::new(
                    layout.margins.left,
                    y,
                    layout.margins.left + layout.inner_width,
                    y,
                    1.0,
                    GRID_COLOR,
                ));
            }
            let (tick_end, label_x, align) = if right {
                (
                    axis_x + TICK_LENGTH_PX,
                    axis_x + TICK_LENGTH_PX + 2.0,
                    TextHAlign::Left,
                )
            } else {
                (
                    axis_x - TICK_LENGTH_PX,
                    axis_x - TICK_LENGTH_PX - 2.0,
                    TextHAlign::Right,
                )
            };
            frame = frame
                .with_line(LinePrimitive::new(axis_x, y, tick_end, y, 1.0, AXIS_COLOR))
                .with_text(TextPrimitive::new(
                    format_value(tick, style),
                    label_x,
                    y + font_size * 0.35,
                    font_size,
                    AXIS_COLOR,
                    align,
                ));
        }
        Ok(frame)
    }
}
