mod arc;
mod line;
mod offset;

pub use arc::Arc;
pub use line::Line;

use crate::math::intersect_2d::{circle_circle_intersect_2d, line_circle_intersect_2d, line_line_intersect_2d};
use crate::math::{normalize_angle, Point2, Vector2};

/// Result of projecting a point onto a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Whether the foot of the projection falls strictly within `(0, 1)`.
    pub inside: bool,
    /// Signed lateral distance, positive on the left of the travel direction.
    pub distance: f64,
    /// Parameter of the foot of the projection.
    pub t: f64,
}

/// Outcome of an infinite intersection between two segments.
///
/// When `found` is false, `point` holds the best fallback: the start point for
/// parallel lines, or the closest point of the line to the circle center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub found: bool,
    pub point: Point2,
    /// Parameter of `point` on the segment `intersect` was called on.
    pub t: f64,
}

impl Intersection {
    /// The intersection point, only when one was found.
    #[must_use]
    pub fn hit(&self) -> Option<Point2> {
        self.found.then_some(self.point)
    }
}

/// A 2D parametric segment: either straight or circular.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Line),
    Arc(Arc),
}

impl From<Line> for Segment {
    fn from(line: Line) -> Self {
        Segment::Line(line)
    }
}

impl From<Arc> for Segment {
    fn from(arc: Arc) -> Self {
        Segment::Arc(arc)
    }
}

impl Segment {
    #[must_use]
    pub fn p0(&self) -> Point2 {
        match self {
            Segment::Line(l) => l.p0(),
            Segment::Arc(a) => a.p0(),
        }
    }

    #[must_use]
    pub fn p1(&self) -> Point2 {
        match self {
            Segment::Line(l) => l.p1(),
            Segment::Arc(a) => a.p1(),
        }
    }

    pub fn set_p0(&mut self, p: Point2) {
        match self {
            Segment::Line(l) => l.set_p0(p),
            Segment::Arc(a) => a.set_p0(p),
        }
    }

    pub fn set_p1(&mut self, p: Point2) {
        match self {
            Segment::Line(l) => l.set_p1(p),
            Segment::Arc(a) => a.set_p1(p),
        }
    }

    /// Chord vector from `p0` to `p1`; the direction vector for a line.
    #[must_use]
    pub fn v(&self) -> Vector2 {
        match self {
            Segment::Line(l) => l.v,
            Segment::Arc(a) => a.p1() - a.p0(),
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Segment::Line(l) => l.length(),
            Segment::Arc(a) => a.length(),
        }
    }

    #[must_use]
    pub fn lerp(&self, t: f64) -> Point2 {
        match self {
            Segment::Line(l) => l.lerp(t),
            Segment::Arc(a) => a.lerp(t),
        }
    }

    /// Direction angle at the start.
    #[must_use]
    pub fn angle(&self) -> f64 {
        match self {
            Segment::Line(l) => l.angle(),
            Segment::Arc(a) => a.angle(),
        }
    }

    /// Direction angle at the end.
    #[must_use]
    pub fn angle_end(&self) -> f64 {
        match self {
            Segment::Line(l) => l.angle(),
            Segment::Arc(a) => a.angle_end(),
        }
    }

    /// Turn from the end of `last` to the start of this segment, in `(-π, π]`.
    #[must_use]
    pub fn delta_angle(&self, last: &Segment) -> f64 {
        normalize_angle(self.angle() - last.angle_end())
    }

    #[must_use]
    pub fn sized_normal(&self, t: f64, size: f64) -> Line {
        match self {
            Segment::Line(l) => l.sized_normal(t, size),
            Segment::Arc(a) => a.sized_normal(t, size),
        }
    }

    #[must_use]
    pub fn normal(&self, t: f64) -> Line {
        self.sized_normal(t, 1.0)
    }

    /// Parallel copy; positive distances go right.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Segment {
        match self {
            Segment::Line(l) => l.offset(distance).into(),
            Segment::Arc(a) => a.offset(distance).into(),
        }
    }

    #[must_use]
    pub fn opposite(&self) -> Segment {
        match self {
            Segment::Line(l) => l.opposite().into(),
            Segment::Arc(a) => a.opposite().into(),
        }
    }

    /// Rotates counter-clockwise around the start point.
    pub fn rotate(&mut self, a: f64) {
        match self {
            Segment::Line(l) => l.rotate(a),
            Segment::Arc(arc) => arc.rotate(a),
        }
    }

    #[must_use]
    pub fn project(&self, pt: &Point2) -> Projection {
        match self {
            Segment::Line(l) => l.project(pt),
            Segment::Arc(a) => a.project(pt),
        }
    }

    /// Straight pieces approximating the segment; a line yields itself.
    #[must_use]
    pub fn as_lines(&self, step_angle: f64) -> Vec<Line> {
        match self {
            Segment::Line(l) => vec![*l],
            Segment::Arc(a) => {
                let (_, steps) = a.steps_by_angle(step_angle);
                a.as_lines(steps)
            }
        }
    }

    /// Intersection of the supporting curves, `t` measured on `self`.
    ///
    /// Line/line uses the cross-product determinant and fails when parallel.
    /// Any pairing with a circle solves the quadratic and keeps the root
    /// closest to the line start.
    #[must_use]
    pub fn intersect(&self, other: &Segment) -> Intersection {
        match (self, other) {
            (Segment::Line(a), Segment::Line(b)) => match line_line_intersect_2d(&a.p, &a.v, &b.p, &b.v) {
                Some((t, _)) => Intersection {
                    found: true,
                    point: a.lerp(t),
                    t,
                },
                None => Intersection {
                    found: false,
                    point: a.p,
                    t: 0.0,
                },
            },
            (Segment::Line(l), Segment::Arc(c)) => {
                let (found, t) = line_circle_hit(l, c);
                Intersection {
                    found,
                    point: l.lerp(t),
                    t,
                }
            }
            (Segment::Arc(c), Segment::Line(l)) => {
                let (found, t_line) = line_circle_hit(l, c);
                let point = l.lerp(t_line);
                Intersection {
                    found,
                    point,
                    t: c.project(&point).t,
                }
            }
            (Segment::Arc(a), Segment::Arc(b)) => {
                let best = circle_circle_intersect_2d(&a.c, a.r, &b.c, b.r)
                    .into_iter()
                    .map(|p| (p, a.project(&p).t))
                    .min_by(|x, y| out_of_range(x.1).total_cmp(&out_of_range(y.1)));
                match best {
                    Some((point, t)) => Intersection { found: true, point, t },
                    None => Intersection {
                        found: false,
                        point: a.p0(),
                        t: 0.0,
                    },
                }
            }
        }
    }

    /// All true crossings of the two bounded segments, as `(point, t_self, t_other)`.
    ///
    /// Both parameters must lie strictly within `(0, 1)`; touching at an end
    /// point does not count. Sorted by `t_self`.
    #[must_use]
    pub fn crossings(&self, other: &Segment) -> Vec<(Point2, f64, f64)> {
        let strictly_inside = |t: f64| t > 0.0 && t < 1.0;
        let mut hits: Vec<(Point2, f64, f64)> = match (self, other) {
            (Segment::Line(a), Segment::Line(b)) => line_line_intersect_2d(&a.p, &a.v, &b.p, &b.v)
                .map(|(t, u)| (a.lerp(t), t, u))
                .into_iter()
                .collect(),
            (Segment::Line(l), Segment::Arc(c)) => line_circle_intersect_2d(&l.p, &l.v, &c.c, c.r)
                .into_iter()
                .map(|t| {
                    let p = l.lerp(t);
                    (p, t, c.project(&p).t)
                })
                .collect(),
            (Segment::Arc(c), Segment::Line(l)) => line_circle_intersect_2d(&l.p, &l.v, &c.c, c.r)
                .into_iter()
                .map(|u| {
                    let p = l.lerp(u);
                    (p, c.project(&p).t, u)
                })
                .collect(),
            (Segment::Arc(a), Segment::Arc(b)) => circle_circle_intersect_2d(&a.c, a.r, &b.c, b.r)
                .into_iter()
                .map(|p| (p, a.project(&p).t, b.project(&p).t))
                .collect(),
        };
        hits.retain(|&(_, t, u)| strictly_inside(t) && strictly_inside(u));
        hits.sort_by(|x, y| x.1.total_cmp(&y.1));
        hits
    }

    /// First true crossing of the two bounded segments, see [`Segment::crossings`].
    #[must_use]
    pub fn intersect_ext(&self, other: &Segment) -> Option<(Point2, f64, f64)> {
        self.crossings(other).into_iter().next()
    }
}

/// Line parameter of the line/circle root closest to the line start, or of
/// the foot of the perpendicular from the center when the line misses.
fn line_circle_hit(line: &Line, arc: &Arc) -> (bool, f64) {
    let roots = line_circle_intersect_2d(&line.p, &line.v, &arc.c, arc.r);
    match roots
        .into_iter()
        .min_by(|a, b| a.abs().total_cmp(&b.abs()))
    {
        Some(t) => (true, t),
        None => (false, line.project(&arc.c).t),
    }
}

/// Distance of a parameter from the `[0, 1]` range.
fn out_of_range(t: f64) -> f64 {
    if t < 0.0 {
        -t
    } else if t > 1.0 {
        t - 1.0
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    fn line(px: f64, py: f64, vx: f64, vy: f64) -> Segment {
        Line::new(Point2::new(px, py), Vector2::new(vx, vy)).into()
    }

    // ── intersect ──

    #[test]
    fn perpendicular_lines_meet_at_midpoint() {
        let a = line(0.0, 0.0, 4.0, 0.0);
        let b = line(2.0, -2.0, 0.0, 4.0);
        let hit = a.intersect(&b);
        assert!(hit.found);
        assert_relative_eq!(hit.point.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(hit.point.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(hit.t, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn parallel_lines_do_not_meet() {
        let a = line(0.0, 0.0, 4.0, 0.0);
        let b = line(0.0, 1.0, -2.0, 0.0);
        assert!(a.intersect(&b).hit().is_none());
    }

    #[test]
    fn normal_passes_through_its_base_point() {
        let a = line(1.0, -2.0, 3.0, 5.0);
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            let n: Segment = a.normal(t).into();
            let hit = a.intersect(&n);
            assert!(hit.found);
            assert!((hit.point - a.lerp(t)).norm() < 1e-9, "t={t}");
        }
    }

    #[test]
    fn line_circle_keeps_root_nearest_line_start() {
        let l = line(-3.0, 0.0, 6.0, 0.0);
        let c: Segment = Arc::new(Point2::origin(), 1.0, 0.0, PI).into();
        let hit = l.intersect(&c);
        assert!(hit.found);
        assert_relative_eq!(hit.point.x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn line_missing_circle_falls_back_to_closest_point() {
        let l = line(-3.0, 2.0, 6.0, 0.0);
        let c: Segment = Arc::new(Point2::origin(), 1.0, 0.0, PI).into();
        let hit = l.intersect(&c);
        assert!(!hit.found);
        assert_relative_eq!(hit.point.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(hit.point.y, 2.0, epsilon = 1e-12);
    }

    // ── intersect_ext ──

    #[test]
    fn bounded_crossing_requires_both_params_inside() {
        let a = line(0.0, 0.0, 2.0, 2.0);
        let b = line(0.0, 2.0, 2.0, -2.0);
        let (p, t, u) = a.intersect_ext(&b).unwrap();
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(t, 0.5, epsilon = 1e-12);
        assert_relative_eq!(u, 0.5, epsilon = 1e-12);

        let short = line(0.0, 2.0, 0.5, -0.5);
        assert!(a.intersect_ext(&short).is_none());
    }

    #[test]
    fn line_crosses_arc_once_inside_its_sweep() {
        let a: Segment = Arc::new(Point2::origin(), 1.0, 0.0, PI).into();
        let l = line(-2.0, 0.5, 4.0, 0.0);
        let hits = l.crossings(&a);
        assert_eq!(hits.len(), 2);
        let below = line(-2.0, -0.5, 4.0, 0.0);
        assert!(below.crossings(&a).is_empty());
    }

    // ── primitives through the enum ──

    #[test]
    fn arc_length_through_segment() {
        let a: Segment = Arc::new(Point2::origin(), 5.0, 0.0, FRAC_PI_2).into();
        assert_relative_eq!(a.length(), 5.0 * PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn offset_round_trip() {
        let l = line(1.0, 2.0, 3.0, -1.0);
        let back = l.offset(0.75).offset(-0.75);
        assert!((back.p0() - l.p0()).norm() < 1e-12);
        assert!((back.v() - l.v()).norm() < 1e-12);

        for da in [FRAC_PI_2, -FRAC_PI_2] {
            let a: Segment = Arc::new(Point2::new(1.0, 1.0), 3.0, 0.3, da).into();
            let back = a.offset(1.25).offset(-1.25);
            assert!((back.p0() - a.p0()).norm() < 1e-12);
            assert!((back.p1() - a.p1()).norm() < 1e-12);
        }
    }

    #[test]
    fn delta_angle_is_normalized() {
        let a = line(0.0, 0.0, 1.0, 0.0);
        let b = line(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(b.delta_angle(&a), FRAC_PI_2, epsilon = 1e-12);
        let c = line(1.0, 0.0, -1.0, -1e-9);
        assert!(c.delta_angle(&a) > -PI && c.delta_angle(&a) <= PI);
    }
}
