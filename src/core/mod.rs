pub mod area_series;
pub mod band_scale;
pub mod bar_series;
pub mod domain;
pub mod layout;
pub mod line_series;
pub mod nice;
pub mod point_series;
pub mod scale;
pub mod stack;
pub mod time_scale;
pub mod types;
pub mod x_scale;

pub use area_series::{StackedAreaGeometry, Vertex, project_stacked_areas};
pub use band_scale::BandScale;
pub use bar_series::{BarGeometry, project_bars, project_grouped_bars, project_stacked_columns};
pub use domain::{CategoryOrder, category_domain, measure_extent, measure_max, time_extent};
pub use layout::{ChartLayout, LayoutConfig, Margins};
pub use line_series::{LineGeometry, project_line};
pub use nice::{nice_domain, nice_upper_bound, tick_increment, tick_step, ticks};
pub use point_series::{BubbleSize, PointGeometry, project_points};
pub use scale::{LinearScale, SqrtScale};
pub use stack::{
    StackBand, StackConfig, StackLayer, StackOffset, StackOrder, layer_at, stack, stack_extent,
};
pub use time_scale::{TimeScale, TimeUnit};
pub use types::{DataTable, Measure, MeasureState, Row, RowKey, Viewport};
pub use x_scale::XScale;
