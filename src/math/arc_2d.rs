//! Circular arc math in center / radius / start angle / sweep form.
//!
//! Sweep convention:
//! - `sweep > 0`: counter-clockwise arc
//! - `sweep < 0`: clockwise arc
use std::f64::consts::TAU;

use super::{Point2, Vector2, TOLERANCE};

/// Evaluates a point on an arc at parameter `t` (extrapolates outside `[0, 1]`).
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Computes the unit tangent direction on an arc at parameter `t`.
///
/// The tangent points in the direction of increasing `t`.
#[must_use]
pub fn arc_tangent_at(start_angle: f64, sweep: f64, t: f64) -> Vector2 {
    let angle = start_angle + sweep * t;
    let sign = if sweep >= 0.0 { 1.0 } else { -1.0 };
    // Tangent to circle at angle θ is (-sin θ, cos θ) for CCW; negate for CW.
    Vector2::new(-sign * angle.sin(), sign * angle.cos())
}

/// Angular offset from `start_angle` to `angle`, walked in the sweep's sense.
///
/// The result lies in `[0, 2π)` for a CCW sweep and `(-2π, 0]` for a CW one.
#[must_use]
pub fn sweep_between(start_angle: f64, angle: f64, ccw: bool) -> f64 {
    let delta = (angle - start_angle).rem_euclid(TAU);
    if ccw {
        delta
    } else if delta.abs() < TOLERANCE {
        0.0
    } else {
        delta - TAU
    }
}

/// Parameter of the direction `angle` on an arc, extrapolated outside `[0, 1]`.
///
/// Directions off the arc map to whichever end they are angularly closer to:
/// past the end gives `t > 1`, before the start gives `t < 0`.
#[must_use]
pub fn arc_param(angle: f64, start_angle: f64, sweep: f64) -> f64 {
    if sweep.abs() < TOLERANCE {
        return 0.0;
    }
    let delta = sweep_between(start_angle, angle, sweep > 0.0);
    let t = delta / sweep;
    if t <= 1.0 {
        return t;
    }
    let before = (delta - TAU.copysign(sweep)) / sweep;
    if -before < t - 1.0 {
        before
    } else {
        t
    }
}
