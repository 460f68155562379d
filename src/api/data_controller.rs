use tracing::{debug, warn};

use crate::core::{ChartLayout, DataTable};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::{ChartInstance, ChartModel, Page, RenderStatus};

impl<R: Renderer> ChartInstance<R> {
    /// Replaces the chart data and rebuilds layout, scales and stack layers.
    ///
    /// On failure the chart is left unloaded and the renderer output is
    /// cleared, so the container shows nothing instead of stale marks.
    pub fn load(&mut self, table: DataTable) -> ChartResult<()> {
        self.ensure_attached()?;

        let layout = ChartLayout::from_container_width(self.container_width, self.config.layout);
        self.interaction = InteractionState::default();
        match ChartModel::build(&self.config, layout, table) {
            Ok(model) => {
                debug!(
                    container = %self.container_id,
                    rows = model.table.len(),
                    degenerate = layout.degenerate,
                    "loaded chart data"
                );
                self.model = Some(model);
                Ok(())
            }
            Err(err) => {
                warn!(container = %self.container_id, error = %err, "chart data rejected");
                self.model = None;
                self.renderer.clear();
                Err(err)
            }
        }
    }

    /// Applies the result of an asynchronous fetch that may resolve late.
    ///
    /// When the chart was torn down or its container left the page in the
    /// meantime the data is dropped with `Detached`. A failed fetch leaves
    /// the chart unloaded with a blank renderer and returns the load error.
    pub fn complete_load(
        &mut self,
        page: &Page,
        result: ChartResult<DataTable>,
    ) -> ChartResult<()> {
        self.ensure_attached()?;

        let Some(container) = page.container(&self.container_id) else {
            warn!(container = %self.container_id, "container vanished before data arrived");
            self.teardown();
            return Err(ChartError::Detached(self.container_id.clone()));
        };
        self.container_width = container.measured_width;

        match result {
            Ok(table) => self.load(table),
            Err(err) => {
                warn!(container = %self.container_id, error = %err, "chart data failed to load");
                self.model = None;
                self.interaction = InteractionState::default();
                self.renderer.clear();
                Err(err)
            }
        }
    }

    /// Builds a fresh frame and hands it to the renderer.
    pub fn render(&mut self) -> ChartResult<RenderStatus> {
        self.ensure_attached()?;

        let Some(model) = &self.model else {
            return Ok(RenderStatus::NotLoaded);
        };
        if model.layout.degenerate {
            warn!(
                container = %self.container_id,
                width = model.layout.width,
                height = model.layout.height,
                "container too small to draw chart"
            );
            return Ok(RenderStatus::SkippedDegenerate);
        }

        let frame = self.build_render_frame(model)?;
        let primitives = frame.primitive_count();
        self.renderer.render(&frame)?;
        debug!(container = %self.container_id, primitives, "rendered chart");
        Ok(RenderStatus::Rendered { primitives })
    }
}
