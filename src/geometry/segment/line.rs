use crate::math::{cross_2d, rotate_2d, Point2, Vector2, TOLERANCE};

use super::Projection;

/// A bounded straight segment `P(t) = p + t * v`, `t ∈ [0, 1]`.
///
/// `v` carries both direction and length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Start point.
    pub p: Point2,
    /// Direction and length.
    pub v: Vector2,
}

impl Line {
    /// Creates a line from a start point and a direction+length vector.
    #[must_use]
    pub fn new(p: Point2, v: Vector2) -> Self {
        Self { p, v }
    }

    /// Creates a line running from `p0` to `p1`.
    #[must_use]
    pub fn from_points(p0: Point2, p1: Point2) -> Self {
        Self { p: p0, v: p1 - p0 }
    }

    /// Start point.
    #[must_use]
    pub fn p0(&self) -> Point2 {
        self.p
    }

    /// End point.
    #[must_use]
    pub fn p1(&self) -> Point2 {
        self.p + self.v
    }

    /// Moves the start point, keeping the end point in place.
    pub fn set_p0(&mut self, p0: Point2) {
        let p1 = self.p1();
        self.p = p0;
        self.v = p1 - p0;
    }

    /// Moves the end point, keeping the start point in place.
    pub fn set_p1(&mut self, p1: Point2) {
        self.v = p1 - self.p;
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.v.norm()
    }

    /// Direction angle of the segment.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.v.y.atan2(self.v.x)
    }

    /// Unit direction, or zero for a degenerate segment.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        let len = self.length();
        if len < TOLERANCE {
            Vector2::zeros()
        } else {
            self.v / len
        }
    }

    /// Point at parameter `t`; extrapolates outside `[0, 1]`.
    #[must_use]
    pub fn lerp(&self, t: f64) -> Point2 {
        self.p + self.v * t
    }

    /// Perpendicular vector lying on the right side, same length as `v`.
    #[must_use]
    pub fn cross_z(&self) -> Vector2 {
        Vector2::new(self.v.y, -self.v.x)
    }

    /// Segment of length `size` perpendicular at `t`, on the right for positive sizes.
    #[must_use]
    pub fn sized_normal(&self, t: f64, size: f64) -> Line {
        let n = self.cross_z();
        let len = n.norm();
        let n = if len < TOLERANCE { n } else { n / len };
        Line::new(self.lerp(t), n * size)
    }

    /// Unit segment perpendicular at `t`, on the right side.
    #[must_use]
    pub fn normal(&self, t: f64) -> Line {
        self.sized_normal(t, 1.0)
    }

    /// Parallel copy; positive distances go right.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Line {
        let n = self.sized_normal(0.0, distance);
        Line::new(self.p + n.v, self.v)
    }

    /// Rotates `v` counter-clockwise around `p0`.
    pub fn rotate(&mut self, a: f64) {
        self.v = rotate_2d(&self.v, a);
    }

    /// Rotated copy, see [`Line::rotate`].
    #[must_use]
    pub fn rotated(mut self, a: f64) -> Line {
        self.rotate(a);
        self
    }

    /// Same segment walked backwards.
    #[must_use]
    pub fn opposite(&self) -> Line {
        Line::new(self.p + self.v, -self.v)
    }

    /// Segment of `length` starting at `lerp(t)`, continuing this direction.
    #[must_use]
    pub fn straight(&self, length: f64, t: f64) -> Line {
        Line::new(self.lerp(t), self.direction() * length)
    }

    /// Projects `pt` onto the supporting line.
    ///
    /// The lateral distance is positive on the left of the travel direction.
    #[must_use]
    pub fn project(&self, pt: &Point2) -> Projection {
        let dp = pt - self.p;
        let dl = self.length();
        if dl < TOLERANCE {
            return Projection {
                inside: dp.norm() < 1e-5,
                distance: 0.0,
                t: 0.0,
            };
        }
        let distance = cross_2d(&self.v, &dp) / dl;
        let t = self.v.dot(&dp) / (dl * dl);
        Projection {
            inside: t > 0.0 && t < 1.0,
            distance,
            t,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn endpoints_and_setters() {
        let mut l = Line::from_points(Point2::new(1.0, 1.0), Point2::new(3.0, 1.0));
        assert!((l.length() - 2.0).abs() < 1e-12);
        l.set_p0(Point2::new(0.0, 1.0));
        assert!((l.p1() - Point2::new(3.0, 1.0)).norm() < 1e-12);
        l.set_p1(Point2::new(0.0, 4.0));
        assert!((l.v - Vector2::new(0.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn normal_points_right() {
        let l = Line::new(Point2::origin(), Vector2::new(4.0, 0.0));
        let n = l.normal(0.5);
        assert!((n.p - Point2::new(2.0, 0.0)).norm() < 1e-12);
        assert!((n.v - Vector2::new(0.0, -1.0)).norm() < 1e-12);
        let n = l.sized_normal(0.0, -3.0);
        assert!((n.p1() - Point2::new(0.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn offset_goes_right() {
        let l = Line::new(Point2::origin(), Vector2::new(0.0, 2.0));
        let o = l.offset(1.5);
        assert!((o.p - Point2::new(1.5, 0.0)).norm() < 1e-12);
        assert!((o.v - l.v).norm() < 1e-12);
    }

    #[test]
    fn rotate_and_straight() {
        let l = Line::new(Point2::new(1.0, 0.0), Vector2::new(2.0, 0.0)).rotated(FRAC_PI_2);
        assert!((l.p1() - Point2::new(1.0, 2.0)).norm() < 1e-12);
        let s = l.straight(5.0, 1.0);
        assert!((s.p - Point2::new(1.0, 2.0)).norm() < 1e-12);
        assert!((s.length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn projection_distance_positive_on_left() {
        let l = Line::new(Point2::origin(), Vector2::new(4.0, 0.0));
        let pr = l.project(&Point2::new(1.0, 3.0));
        assert!(pr.inside);
        assert!((pr.distance - 3.0).abs() < 1e-12);
        assert!((pr.t - 0.25).abs() < 1e-12);
        let pr = l.project(&Point2::new(5.0, -1.0));
        assert!(!pr.inside);
        assert!((pr.distance + 1.0).abs() < 1e-12);
    }

    #[test]
    fn opposite_swaps_ends() {
        let l = Line::new(Point2::new(1.0, 2.0), Vector2::new(3.0, 0.0));
        let o = l.opposite();
        assert!((o.p0() - l.p1()).norm() < 1e-12);
        assert!((o.p1() - l.p0()).norm() < 1e-12);
    }
}
