//! chart-pipeline: headless data-visualization pipeline.
//!
//! Tabular data flows through typed loading (`data`), scale and stack
//! computation (`core`), mark projection into renderer-agnostic frames
//! (`render`), and pure pointer hit-testing (`interaction`). `api` ties the
//! stages together behind a per-container `ChartInstance`.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod extensions;
pub mod format;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartInstance, ChartKind, Page, RenderStatus};
pub use error::{ChartError, ChartResult};
