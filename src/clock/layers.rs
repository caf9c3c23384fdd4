//! Back-to-front draw list for one clock frame

use serde::Serialize;

use super::geometry::{ClockGeometry, Disk, OverlapPolygons};
use crate::color::{ColorPalette, Hsb};
use crate::utils::geometry::Point;

/// Outline a renderer should fill
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LayerShape {
    /// Rounded square covering the whole widget
    Frame { size: f64, corner_radius: f64 },
    Disk(Disk),
    Polygon(Vec<Point>),
}

/// Outline drawn on top of a layer's fill
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Hsb,
    pub width: f64,
}

/// Neutral gray used for the widget frame border
pub const FRAME_BORDER: Hsb = Hsb {
    hue: 0.0,
    saturation: 0.0,
    brightness: 0.5,
};

/// Frame border width as a fraction of the frame corner radius
const FRAME_BORDER_RATIO: f64 = 1.0 / 6.5;

/// Hairline width of the triple-overlap pinstripe
const PINSTRIPE_WIDTH: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: &'static str,
    pub shape: LayerShape,
    pub fill: Hsb,
    pub stroke: Option<Stroke>,
}

/// Assemble the face in paint order. Empty overlap regions are skipped.
pub fn compose(base: &Hsb, palette: &ColorPalette, geometry: &ClockGeometry) -> Vec<Layer> {
    let overlaps: OverlapPolygons = geometry.overlaps();
    let corner_radius = geometry.clock_size * (1.0 - geometry.inset) / 2.0;

    let mut layers = vec![
        Layer {
            name: "frame",
            shape: LayerShape::Frame {
                size: geometry.clock_size,
                corner_radius,
            },
            fill: *base,
            stroke: Some(Stroke {
                color: FRAME_BORDER,
                width: corner_radius * FRAME_BORDER_RATIO,
            }),
        },
        Layer {
            name: "face",
            shape: LayerShape::Disk(Disk {
                center: geometry.center,
                radius: geometry.face_radius(),
            }),
            fill: palette.s_prime_color,
            stroke: None,
        },
        Layer {
            name: "seconds",
            shape: LayerShape::Disk(geometry.seconds_disk),
            fill: palette.s_color,
            stroke: None,
        },
        Layer {
            name: "minute",
            shape: LayerShape::Polygon(geometry.minute_hand.vertices()),
            fill: palette.m_prime_color,
            stroke: None,
        },
    ];

    let mut push_region = |name: &'static str, outline: Vec<Point>, fill: Hsb, stroke: Option<Stroke>| {
        if !outline.is_empty() {
            layers.push(Layer {
                name,
                shape: LayerShape::Polygon(outline),
                fill,
                stroke,
            });
        }
    };

    push_region("minute_seconds", overlaps.minute_seconds, palette.m_color, None);
    push_region("hour", geometry.hour_hand.vertices(), palette.h_prime_color, None);
    push_region("hour_seconds", overlaps.hour_seconds, palette.h_color, None);
    push_region("minute_hour", overlaps.minute_hour, palette.hm_color, None);
    push_region(
        "minute_hour_seconds",
        overlaps.minute_hour_seconds,
        palette.hm_prime_color,
        Some(Stroke {
            color: palette.triple_border(),
            width: PINSTRIPE_WIDTH,
        }),
    );

    layers.push(Layer {
        name: "center_dot",
        shape: LayerShape::Disk(Disk {
            center: geometry.center,
            radius: geometry.clock_size / 6.0,
        }),
        fill: Hsb::BLACK,
        stroke: None,
    });

    layers
}
