use crate::geometry::{Point, Vector};
use serde::Serialize;
use std::fmt::Write;

/// Number of straight segments used to approximate a curve for hit testing.
const HIT_SAMPLES: usize = 32;

/// A cubic Bézier curve in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicBezier {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

/// A small arrow placed along an edge, pointing along the curve direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrowGlyph {
    pub position: Point,
    /// Radians, measured from the positive x axis.
    pub angle: f64,
}

impl CubicBezier {
    /// The edge curve between two anchors: control points are pushed horizontally
    /// out of the source and into the target by `max(min_offset, ratio * distance)`.
    pub fn between(start: Point, end: Point, min_offset: f64, ratio: f64) -> Self {
        let offset = min_offset.max(ratio * start.distance_to(end));
        Self {
            start,
            control1: start + Vector::new(offset, 0.0),
            control2: end - Vector::new(offset, 0.0),
            end,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite()
            && self.control1.is_finite()
            && self.control2.is_finite()
            && self.end.is_finite()
    }

    /// The point at parameter `t` (clamped to `[0, 1]`).
    pub fn point_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }

    /// First derivative at parameter `t` (clamped to `[0, 1]`).
    pub fn tangent_at(&self, t: f64) -> Vector {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let d1 = self.control1 - self.start;
        let d2 = self.control2 - self.control1;
        let d3 = self.end - self.control2;
        d1 * (3.0 * u * u) + d2 * (6.0 * u * t) + d3 * (3.0 * t * t)
    }

    pub fn midpoint(&self) -> Point {
        self.point_at(0.5)
    }

    pub fn arrow_at(&self, t: f64) -> ArrowGlyph {
        ArrowGlyph {
            position: self.point_at(t),
            angle: self.tangent_at(t).angle(),
        }
    }

    /// Approximate shortest distance from `p` to the curve.
    pub fn distance_to(&self, p: Point) -> f64 {
        let mut best = f64::INFINITY;
        let mut previous = self.start;
        for i in 1..=HIT_SAMPLES {
            let current = self.point_at(i as f64 / HIT_SAMPLES as f64);
            best = best.min(distance_to_segment(p, previous, current));
            previous = current;
        }
        best
    }

    /// SVG path data, e.g. `M 0 0 C 100 0, 100 50, 200 50`.
    pub fn to_svg_path(&self) -> String {
        let mut path = String::new();
        let _ = write!(
            path,
            "M {} {} C {} {}, {} {}, {} {}",
            fmt_num(self.start.x),
            fmt_num(self.start.y),
            fmt_num(self.control1.x),
            fmt_num(self.control1.y),
            fmt_num(self.control2.x),
            fmt_num(self.control2.y),
            fmt_num(self.end.x),
            fmt_num(self.end.y),
        );
        path
    }
}

impl ArrowGlyph {
    /// Triangle vertices of an arrow of the given size, tip at `position`.
    pub fn triangle(&self, size: f64) -> [Point; 3] {
        let (sin, cos) = self.angle.sin_cos();
        let back = Vector::new(-cos, -sin) * size;
        let side = Vector::new(-sin, cos) * (size / 2.0);
        let base = self.position + back;
        [self.position, base + side, base - side]
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(a.lerp(b, t))
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{}", rounded)
    }
}
