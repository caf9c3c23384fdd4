//! Clock face module
//!
//! Turns wall-clock time into hand positions, hand outlines and the layered
//! draw list a renderer paints.

pub mod geometry;
pub mod layers;
pub mod time_sampler;

// Re-export main types
pub use geometry::{ClockGeometry, Disk, HandKind, OverlapPolygons, OverlapRegion, Shape, Triangle};
pub use layers::{compose, Layer, LayerShape, Stroke, FRAME_BORDER};
pub use time_sampler::TimeComponents;
