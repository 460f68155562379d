mod color_scale;
mod frame;
mod null_renderer;
mod primitives;
mod svg_backend;

pub use color_scale::{CATEGORY10, OrdinalColorScale, QuantizeScale, default_palette};
pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, RectPrimitive, TextHAlign,
    TextPrimitive,
};
pub use svg_backend::{SvgRenderStats, SvgRenderer};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code stays
/// isolated from scales, data and interaction.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    /// Drops the last drawn output, leaving the container blank.
    fn clear(&mut self);
}
