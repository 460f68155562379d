use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::{ChartConfig, ChartInstance, ChartModel, Page};

impl<R: Renderer> ChartInstance<R> {
    /// Binds a chart to the container `container_id` on `page`.
    ///
    /// The container width is measured once here and again on each
    /// [`ChartInstance::complete_load`].
    pub fn mount(
        page: &Page,
        container_id: &str,
        config: ChartConfig,
        renderer: R,
    ) -> ChartResult<Self> {
        let container = page
            .container(container_id)
            .ok_or_else(|| ChartError::MissingContainer(container_id.to_owned()))?;
        config.validate()?;
        let colors = config.resolve_palette()?;

        debug!(
            container = container_id,
            width = container.measured_width,
            kind = ?config.kind,
            "mounted chart"
        );

        Ok(Self {
            renderer,
            container_id: container_id.to_owned(),
            container_width: container.measured_width,
            config,
            colors,
            attached: true,
            model: None,
            interaction: InteractionState::default(),
        })
    }

    /// Detaches the chart and blanks its renderer. Later loads and renders
    /// fail with `Detached`.
    pub fn teardown(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        self.model = None;
        self.interaction = InteractionState::default();
        self.renderer.clear();
        debug!(container = %self.container_id, "tore down chart");
    }

    pub(super) fn ensure_attached(&self) -> ChartResult<()> {
        if self.attached {
            Ok(())
        } else {
            Err(ChartError::Detached(self.container_id.clone()))
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[must_use]
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    #[must_use]
    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> Option<&ChartModel> {
        self.model.as_ref()
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
