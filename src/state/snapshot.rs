//! Read-only view of an engine, published after every applied tick

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lifecycle::LifecycleState;
use crate::clock::{compose, ClockGeometry, Layer, TimeComponents};
use crate::color::{ColorPalette, Hsb};
use crate::utils::geometry::{Point, Size, Vector};

/// Identity of one engine instance, handed out by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub generation: Generation,
    pub lifecycle: LifecycleState,
    pub canvas_size: Size,
    pub widget_size: f64,
    /// Widget center on the canvas
    pub position: Point,
    pub velocity: Vector,
    pub base_color: Hsb,
    pub palette: ColorPalette,
    pub time: TimeComponents,
    /// Hand outlines in widget-local coordinates
    pub hands: ClockGeometry,
    pub debug_text: String,
    pub tick_count: u64,
}

impl Snapshot {
    /// Paint-ordered layers for this frame
    pub fn layers(&self) -> Vec<Layer> {
        compose(&self.base_color, &self.palette, &self.hands)
    }

    /// Top-left corner of the widget on the canvas
    pub fn widget_origin(&self) -> Point {
        Point::new(
            self.position.x - self.widget_size / 2.0,
            self.position.y - self.widget_size / 2.0,
        )
    }
}
