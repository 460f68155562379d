//! Optional modules built on top of the core pipeline.
//!
//! Extensions depend on `core` and `render`, never the other way round.

pub mod choropleth;

pub use choropleth::{
    ChoroplethConfig, ChoroplethJoin, RegionFill, SEQUENTIAL_BLUES, join_regions,
};
