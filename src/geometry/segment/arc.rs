use crate::math::arc_2d::{arc_param, arc_point_at, arc_tangent_at, sweep_between};
use crate::math::{rotate_2d, Point2, Vector2, TOLERANCE};

use super::{Line, Projection};

/// A circular arc defined by center, radius, start angle and signed sweep.
///
/// `da > 0` runs counter-clockwise, `da < 0` clockwise. The sense is never
/// inferred from geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    /// Center.
    pub c: Point2,
    /// Radius.
    pub r: f64,
    /// Start angle.
    pub a0: f64,
    /// Signed sweep angle.
    pub da: f64,
}

impl Arc {
    #[must_use]
    pub fn new(c: Point2, r: f64, a0: f64, da: f64) -> Self {
        Self { c, r, a0, da }
    }

    /// Whether the arc runs counter-clockwise.
    #[must_use]
    pub fn ccw(&self) -> bool {
        self.da > 0.0
    }

    #[must_use]
    pub fn p0(&self) -> Point2 {
        self.lerp(0.0)
    }

    #[must_use]
    pub fn p1(&self) -> Point2 {
        self.lerp(1.0)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.r * self.da.abs()
    }

    /// Point at parameter `t`; extrapolates angularly outside `[0, 1]`.
    #[must_use]
    pub fn lerp(&self, t: f64) -> Point2 {
        arc_point_at(&self.c, self.r, self.a0, self.da, t)
    }

    /// Unit tangent at `t`, in the direction of travel.
    #[must_use]
    pub fn tangent(&self, t: f64) -> Vector2 {
        arc_tangent_at(self.a0, self.da, t)
    }

    /// Direction angle of the tangent at the start.
    #[must_use]
    pub fn angle(&self) -> f64 {
        let v = self.tangent(0.0);
        v.y.atan2(v.x)
    }

    /// Direction angle of the tangent at the end.
    #[must_use]
    pub fn angle_end(&self) -> f64 {
        let v = self.tangent(1.0);
        v.y.atan2(v.x)
    }

    /// Segment of length `size` perpendicular at `t`, on the right for positive sizes.
    ///
    /// Right is outward for a CCW arc and inward for a CW one.
    #[must_use]
    pub fn sized_normal(&self, t: f64, size: f64) -> Line {
        let p = self.lerp(t);
        let radial = p - self.c;
        let len = radial.norm();
        let radial = if len < TOLERANCE { radial } else { radial / len };
        let n = if self.ccw() { radial } else { -radial };
        Line::new(p, n * size)
    }

    #[must_use]
    pub fn normal(&self, t: f64) -> Line {
        self.sized_normal(t, 1.0)
    }

    /// Concentric copy; positive distances go right.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Arc {
        let r = if self.ccw() {
            self.r + distance
        } else {
            self.r - distance
        };
        Arc::new(self.c, r, self.a0, self.da)
    }

    /// Moves the start point along the circle, keeping the end point and the sense.
    pub fn set_p0(&mut self, p0: Point2) {
        let end = self.a0 + self.da;
        let dp = p0 - self.c;
        self.a0 = dp.y.atan2(dp.x);
        self.da = sweep_between(self.a0, end, self.ccw());
    }

    /// Moves the end point along the circle, keeping the start point and the sense.
    pub fn set_p1(&mut self, p1: Point2) {
        let dp = p1 - self.c;
        self.da = sweep_between(self.a0, dp.y.atan2(dp.x), self.ccw());
    }

    /// Rotates the arc counter-clockwise around its start point.
    pub fn rotate(&mut self, a: f64) {
        let p0 = self.p0();
        self.c = p0 + rotate_2d(&(self.c - p0), a);
        self.a0 += a;
    }

    #[must_use]
    pub fn opposite(&self) -> Arc {
        Arc::new(self.c, self.r, self.a0 + self.da, -self.da)
    }

    /// Projects `pt` onto the arc's circle.
    ///
    /// The lateral distance is positive on the left of the travel direction,
    /// toward the center for a CCW arc.
    #[must_use]
    pub fn project(&self, pt: &Point2) -> Projection {
        let dp = pt - self.c;
        let dist = dp.norm();
        let t = arc_param(dp.y.atan2(dp.x), self.a0, self.da);
        let distance = if self.ccw() {
            self.r - dist
        } else {
            dist - self.r
        };
        Projection {
            inside: t > 0.0 && t < 1.0,
            distance,
            t,
        }
    }

    /// Number of steps and parameter increment to flatten the arc at `step_angle`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn steps_by_angle(&self, step_angle: f64) -> (f64, usize) {
        let steps = ((self.da.abs() / step_angle).floor() as usize).max(1);
        (1.0 / steps as f64, steps)
    }

    /// Chords approximating the arc with `steps` pieces.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_lines(&self, steps: usize) -> Vec<Line> {
        let steps = steps.max(1);
        let dt = 1.0 / steps as f64;
        (0..steps)
            .map(|i| Line::from_points(self.lerp(i as f64 * dt), self.lerp((i + 1) as f64 * dt)))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    #[test]
    fn quarter_arc_length() {
        let a = Arc::new(Point2::origin(), 5.0, 0.0, FRAC_PI_2);
        assert!((a.length() - 5.0 * PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn normal_right_side_flips_with_sense() {
        let ccw = Arc::new(Point2::origin(), 2.0, 0.0, FRAC_PI_2);
        let n = ccw.normal(0.0);
        assert!((n.v - Vector2::new(1.0, 0.0)).norm() < 1e-12);
        let cw = Arc::new(Point2::origin(), 2.0, FRAC_PI_2, -FRAC_PI_2);
        let n = cw.normal(1.0);
        assert!((n.p - Point2::new(2.0, 0.0)).norm() < 1e-12);
        assert!((n.v - Vector2::new(-1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn offset_right_grows_ccw_and_shrinks_cw() {
        let ccw = Arc::new(Point2::origin(), 2.0, 0.0, FRAC_PI_2);
        assert!((ccw.offset(0.5).r - 2.5).abs() < 1e-12);
        assert!((ccw.opposite().offset(0.5).r - 1.5).abs() < 1e-12);
    }

    #[test]
    fn setters_keep_sense() {
        let mut a = Arc::new(Point2::origin(), 1.0, 0.0, -FRAC_PI_2);
        a.set_p1(Point2::new(-1.0, 0.0));
        assert!((a.da + PI).abs() < 1e-12);
        a.set_p0(Point2::new(0.0, 1.0));
        assert!((a.a0 - FRAC_PI_2).abs() < 1e-12);
        assert!((a.da + 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert!((a.p1() - Point2::new(-1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn projection_on_arc() {
        let a = Arc::new(Point2::origin(), 2.0, 0.0, FRAC_PI_2);
        let pr = a.project(&Point2::new(1.0, 1.0));
        assert!(pr.inside);
        assert!((pr.t - 0.5).abs() < 1e-12);
        assert!((pr.distance - (2.0 - 2f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn rotation_about_start() {
        let mut a = Arc::new(Point2::new(-1.0, 0.0), 1.0, 0.0, FRAC_PI_2);
        a.rotate(PI);
        assert!(a.p0().coords.norm() < 1e-12);
        assert!((a.c - Point2::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn flattening_preserves_ends() {
        let a = Arc::new(Point2::origin(), 1.0, 0.0, PI);
        let (_, steps) = a.steps_by_angle(0.104);
        let lines = a.as_lines(steps);
        assert_eq!(lines.len(), steps);
        assert!((lines[0].p0() - a.p0()).norm() < 1e-12);
        assert!((lines[steps - 1].p1() - a.p1()).norm() < 1e-12);
    }
}
