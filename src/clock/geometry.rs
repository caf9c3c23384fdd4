//! Hand polygons, the orbiting seconds disk, and their overlap regions
//!
//! All coordinates are local to the clock widget: the face center sits at
//! `(clock_size / 2, clock_size / 2)`, angle 0 points up and angles grow clockwise.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use super::TimeComponents;
use crate::utils::geometry::Point;

/// Segments used when a disk has to be treated as a polygon
pub const DISK_SEGMENTS: usize = 64;

const CONTAINS_EPSILON: f64 = 1e-9;

/// Anything that can answer a point-membership query
pub trait Shape {
    fn contains(&self, p: &Point) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandKind {
    Minute,
    Hour,
}

impl HandKind {
    /// Tip length divided by base half-width; larger means a narrower hand
    pub fn base_divisor(&self) -> f64 {
        match self {
            HandKind::Minute => 2.5,
            HandKind::Hour => 2.0,
        }
    }

    /// Tip length relative to the face diameter (`clock_size * inset`)
    fn length_divisor(&self) -> f64 {
        match self {
            HandKind::Minute => 2.0,
            HandKind::Hour => 2.5,
        }
    }
}

/// Isosceles hand triangle, tip outward and base across the face center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub tip: Point,
    pub base_left: Point,
    pub base_right: Point,
}

impl Triangle {
    pub fn hand(center: Point, radius: f64, angle: f64, kind: HandKind) -> Self {
        let base_radius = radius / kind.base_divisor();
        Self {
            tip: center.polar(radius, angle),
            base_left: center.polar(base_radius, angle + FRAC_PI_2),
            base_right: center.polar(base_radius, angle - FRAC_PI_2),
        }
    }

    pub fn vertices(&self) -> Vec<Point> {
        vec![self.tip, self.base_left, self.base_right]
    }
}

impl Shape for Triangle {
    fn contains(&self, p: &Point) -> bool {
        // A collapsed triangle covers nothing
        if polygon_area(&self.vertices()) <= CONTAINS_EPSILON {
            return false;
        }
        let d1 = cross(&self.tip, &self.base_left, p);
        let d2 = cross(&self.base_left, &self.base_right, p);
        let d3 = cross(&self.base_right, &self.tip, p);
        let has_neg = d1 < -CONTAINS_EPSILON || d2 < -CONTAINS_EPSILON || d3 < -CONTAINS_EPSILON;
        let has_pos = d1 > CONTAINS_EPSILON || d2 > CONTAINS_EPSILON || d3 > CONTAINS_EPSILON;
        !(has_neg && has_pos)
    }
}

/// Circle descriptor for the seconds indicator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    pub center: Point,
    pub radius: f64,
}

impl Disk {
    /// Inscribed regular polygon, counter-clockwise on screen
    pub fn to_polygon(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(3);
        (0..segments)
            .map(|i| self.center.polar(self.radius, 2.0 * PI * i as f64 / segments as f64))
            .collect()
    }
}

impl Shape for Disk {
    fn contains(&self, p: &Point) -> bool {
        self.center.distance_to(p) <= self.radius + CONTAINS_EPSILON
    }
}

/// Logical AND of any number of shapes
pub struct Intersection<'a>(pub Vec<&'a dyn Shape>);

impl Shape for Intersection<'_> {
    fn contains(&self, p: &Point) -> bool {
        self.0.iter().all(|shape| shape.contains(p))
    }
}

/// Regions painted in a different color from the rest of their hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlapRegion {
    MinuteSeconds,
    HourSeconds,
    MinuteHour,
    MinuteHourSeconds,
}

/// Convex outlines of every overlap region
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverlapPolygons {
    pub minute_seconds: Vec<Point>,
    pub hour_seconds: Vec<Point>,
    pub minute_hour: Vec<Point>,
    pub minute_hour_seconds: Vec<Point>,
}

/// Every shape needed to draw one frame of the clock face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockGeometry {
    pub clock_size: f64,
    pub inset: f64,
    pub center: Point,
    pub minute_angle: f64,
    pub hour_angle: f64,
    pub seconds_angle: f64,
    pub minute_hand: Triangle,
    pub hour_hand: Triangle,
    pub seconds_disk: Disk,
}

impl ClockGeometry {
    pub fn build(time: &TimeComponents, clock_size: f64, inset: f64) -> Self {
        let center = Point::new(clock_size / 2.0, clock_size / 2.0);
        let face = clock_size * inset;

        let minute_angle = (PI / 30.0) * time.minutes;
        let hour_angle = (PI / 6.0) * time.hours;
        let seconds_angle = (2.0 * PI / 60.0) * time.seconds;

        let minute_hand = Triangle::hand(
            center,
            face / HandKind::Minute.length_divisor(),
            minute_angle,
            HandKind::Minute,
        );
        let hour_hand = Triangle::hand(
            center,
            face / HandKind::Hour.length_divisor(),
            hour_angle,
            HandKind::Hour,
        );

        // The disk itself revolves: its center orbits at half its own radius
        let disk_radius = face / 3.0;
        let seconds_disk = Disk {
            center: center.polar(disk_radius / 2.0, seconds_angle),
            radius: disk_radius,
        };

        Self {
            clock_size,
            inset,
            center,
            minute_angle,
            hour_angle,
            seconds_angle,
            minute_hand,
            hour_hand,
            seconds_disk,
        }
    }

    pub fn hour_hand_radius(&self) -> f64 {
        self.clock_size * self.inset / HandKind::Hour.length_divisor()
    }

    pub fn face_radius(&self) -> f64 {
        self.clock_size * self.inset / 2.0
    }

    /// Mask test for one overlap region
    pub fn region_contains(&self, region: OverlapRegion, p: &Point) -> bool {
        let shapes: Vec<&dyn Shape> = match region {
            OverlapRegion::MinuteSeconds => vec![&self.minute_hand, &self.seconds_disk],
            OverlapRegion::HourSeconds => vec![&self.hour_hand, &self.seconds_disk],
            OverlapRegion::MinuteHour => vec![&self.minute_hand, &self.hour_hand],
            OverlapRegion::MinuteHourSeconds => {
                vec![&self.minute_hand, &self.hour_hand, &self.seconds_disk]
            }
        };
        Intersection(shapes).contains(p)
    }

    pub fn overlaps(&self) -> OverlapPolygons {
        let disk = self.seconds_disk.to_polygon(DISK_SEGMENTS);
        let minute = self.minute_hand.vertices();
        let hour = self.hour_hand.vertices();

        let minute_hour = clip_convex(&minute, &hour);
        let minute_hour_seconds = clip_convex(&minute_hour, &disk);

        OverlapPolygons {
            minute_seconds: clip_convex(&minute, &disk),
            hour_seconds: clip_convex(&hour, &disk),
            minute_hour,
            minute_hour_seconds,
        }
    }
}

fn cross(a: &Point, b: &Point, p: &Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Signed shoelace area; the sign gives the winding direction
pub fn signed_area(polygon: &[Point]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, a) in polygon.iter().enumerate() {
        let b = &polygon[(i + 1) % polygon.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

pub fn polygon_area(polygon: &[Point]) -> f64 {
    signed_area(polygon).abs()
}

/// Sutherland–Hodgman clip of `subject` against the convex polygon `clip`.
///
/// Either winding is accepted for `clip`. Returns an empty outline when the
/// shapes do not meet.
pub fn clip_convex(subject: &[Point], clip: &[Point]) -> Vec<Point> {
    if subject.len() < 3 || clip.len() < 3 {
        return Vec::new();
    }

    let winding = signed_area(clip).signum();
    if winding == 0.0 {
        return Vec::new();
    }
    let inside = |a: &Point, b: &Point, p: &Point| cross(a, b, p) * winding >= -CONTAINS_EPSILON;

    let mut output = subject.to_vec();
    for (i, edge_start) in clip.iter().enumerate() {
        let edge_end = &clip[(i + 1) % clip.len()];
        let input = std::mem::take(&mut output);
        if input.is_empty() {
            break;
        }

        for (j, current) in input.iter().enumerate() {
            let previous = &input[(j + input.len() - 1) % input.len()];
            let current_in = inside(edge_start, edge_end, current);
            let previous_in = inside(edge_start, edge_end, previous);

            if current_in {
                if !previous_in {
                    output.push(line_intersection(previous, current, edge_start, edge_end));
                }
                output.push(*current);
            } else if previous_in {
                output.push(line_intersection(previous, current, edge_start, edge_end));
            }
        }
    }

    if polygon_area(&output) <= CONTAINS_EPSILON {
        return Vec::new();
    }
    output
}

fn line_intersection(p1: &Point, p2: &Point, a: &Point, b: &Point) -> Point {
    let d1 = cross(a, b, p1);
    let d2 = cross(a, b, p2);
    let denom = d1 - d2;
    if denom.abs() < f64::EPSILON {
        return *p2;
    }
    let t = d1 / denom;
    Point::new(p1.x + (p2.x - p1.x) * t, p1.y + (p2.y - p1.y) * t)
}
