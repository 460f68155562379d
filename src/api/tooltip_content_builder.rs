use crate::core::StackOffset;
use crate::format::{format_measure, format_percent, format_value};
use crate::interaction::{HoverTarget, TooltipContent, TooltipLine};
use crate::render::Renderer;

use super::{ChartInstance, ChartModel};

impl<R: Renderer> ChartInstance<R> {
    /// Tooltip text for a hovered row.
    ///
    /// Missing cells read "No data"; stacked charts add a total line, and
    /// normalized stacks also show the hovered series' share of it.
    pub(super) fn tooltip_content(
        &self,
        model: &ChartModel,
        target: &HoverTarget,
    ) -> Option<TooltipContent> {
        let data = model.table.rows().get(target.row)?;
        let style = self.config.value_style;
        let mut content = TooltipContent::new(data.key.label(&self.config.date_format));

        for (field, text) in model.table.text_fields().iter().zip(&data.texts) {
            if let Some(text) = text {
                content = content.with_line(TooltipLine::new(field.clone(), text.clone()));
            }
        }

        if self.config.kind.is_point() {
            let axes = [self.config.x_field.as_deref(), Some(self.config.series[0].field.as_str())];
            let size = self.config.size_field.as_deref();
            for field in axes.into_iter().chain([size]).flatten() {
                let value = format_measure(model.table.measure(target.row, field), style);
                content = content.with_line(TooltipLine::new(field, value));
            }
            return Some(content);
        }

        for (slot, series) in self.config.series.iter().enumerate() {
            let value = format_measure(model.table.measure(target.row, &series.field), style);
            let line = TooltipLine::new(series.display_label(), value);
            content = content.with_line(if target.series == Some(slot) {
                line.emphasized()
            } else {
                line
            });
        }

        if self.config.kind.is_stacked() {
            let fields = self.config.series_fields();
            let total = model.table.row_total(target.row, &fields).ok()?;
            content = content.with_line(TooltipLine::new("Total", format_value(total, style)));

            let share = target
                .series
                .filter(|_| self.config.stack.offset == StackOffset::Expand && total != 0.0)
                .and_then(|slot| fields.get(slot))
                .and_then(|field| model.table.measure(target.row, field).value());
            if let Some(value) = share {
                content =
                    content.with_line(TooltipLine::new("Share", format_percent(value / total, 1)));
            }
        }

        Some(content)
    }
}
