mod axis_scene_builder;
mod chart_model;
pub mod config;
mod data_controller;
mod engine_init;
mod interaction_controller;
pub mod page;
mod render_frame_builder;
mod tooltip_content_builder;

use serde::{Deserialize, Serialize};

use crate::interaction::InteractionState;
use crate::render::{Color, Renderer};

pub use chart_model::ChartModel;
pub use config::{AxisSide, ChartConfig, ChartKind, SeriesConfig};
pub use page::{Container, Page};

const TOOLTIP_PADDING_PX: f64 = 6.0;

/// Outcome of one [`ChartInstance::render`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderStatus {
    /// A frame was built and handed to the renderer.
    Rendered { primitives: usize },
    /// The container was too small to hold a drawing area.
    SkippedDegenerate,
    /// No data has been loaded yet, or the last load failed.
    NotLoaded,
}

/// One chart bound to one page container.
///
/// Owns everything a chart needs between calls: configuration, the loaded
/// table with its scales, and the hover state. Several instances can live on
/// the same page without sharing anything.
pub struct ChartInstance<R: Renderer> {
    renderer: R,
    container_id: String,
    container_width: f64,
    config: ChartConfig,
    colors: Vec<Color>,
    attached: bool,
    model: Option<ChartModel>,
    interaction: InteractionState,
}
