use nalgebra::Isometry2;

use crate::error::{OperationError, Result};
use crate::geometry::{Edge, EdgeKind, Line, Segment};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Point2, Vector2};
use crate::operations::offset::OffsetChain;

use super::{BooleanOp, FLATTEN_STEP};

/// A closed loop of edges applied to pitches as a boolean operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Cutter {
    pub segs: Vec<Edge>,
    pub operation: BooleanOp,
}

impl Cutter {
    /// Wraps a closed loop, orienting it for `operation`.
    #[must_use]
    pub fn new(segs: Vec<Edge>, operation: BooleanOp) -> Self {
        let mut cutter = Self { segs, operation };
        cutter.ensure_direction();
        cutter
    }

    /// Builds a closed straight loop through `points`, every edge tagged `kind`.
    #[must_use]
    pub fn from_points(points: &[Point2], kind: EdgeKind, operation: BooleanOp) -> Self {
        let n = points.len();
        let segs = (0..n)
            .map(|i| Edge::new(Line::from_points(points[i], points[(i + 1) % n]), kind))
            .collect();
        Self::new(segs, operation)
    }

    /// Signed area of the flattened loop, positive when counter-clockwise.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let pts: Vec<Point2> = self
            .segs
            .iter()
            .flat_map(|e| e.seg.as_lines(FLATTEN_STEP))
            .map(|l| l.p0())
            .collect();
        signed_area_2d(&pts)
    }

    /// Orients the loop counter-clockwise for an intersection and clockwise
    /// for a difference.
    pub fn ensure_direction(&mut self) {
        let ccw = self.signed_area() > 0.0;
        if ccw == (self.operation == BooleanOp::Intersection) {
            return;
        }
        self.segs = self
            .segs
            .iter()
            .rev()
            .map(|e| Edge {
                seg: e.seg.opposite(),
                ..*e
            })
            .collect();
    }

    /// Moves the loop from the `from` frame into the `to` frame.
    pub fn change_coordsys(&mut self, from: &Isometry2<f64>, to: &Isometry2<f64>) {
        let tm = to.inverse() * from;
        let da = tm.rotation.angle();
        for e in &mut self.segs {
            e.seg = match e.seg {
                Segment::Line(l) => Line::new(tm * l.p, tm * l.v).into(),
                Segment::Arc(mut a) => {
                    a.c = tm * a.c;
                    a.a0 += da;
                    a.into()
                }
            };
        }
    }
}

/// One side of a parametric cutter outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutterPart {
    /// Turn from the previous side, radians.
    pub a0: f64,
    pub length: f64,
    /// Offset applied to this side, positive to the right.
    pub offset: f64,
    pub kind: EdgeKind,
}

impl Default for CutterPart {
    fn default() -> Self {
        Self {
            a0: std::f64::consts::FRAC_PI_2,
            length: 2.0,
            offset: 0.0,
            kind: EdgeKind::Side,
        }
    }
}

/// Builds a [`Cutter`] from a turtle description of its sides.
///
/// The last side always closes back onto the first point, its own length
/// and angle are ignored.
#[derive(Debug, Clone)]
pub struct CutterGenerator {
    pub origin: Point2,
    pub parts: Vec<CutterPart>,
    pub operation: BooleanOp,
}

impl CutterGenerator {
    #[must_use]
    pub fn new(parts: Vec<CutterPart>, operation: BooleanOp) -> Self {
        Self {
            origin: Point2::origin(),
            parts,
            operation,
        }
    }

    #[must_use]
    pub fn origin(mut self, origin: Point2) -> Self {
        self.origin = origin;
        self
    }

    /// Executes the generator.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for fewer than three sides.
    pub fn execute(&self) -> Result<Cutter> {
        if self.parts.len() < 3 {
            return Err(OperationError::InvalidInput(format!(
                "cutter needs at least 3 sides, got {}",
                self.parts.len()
            ))
            .into());
        }

        let first = &self.parts[0];
        let mut lines = Vec::with_capacity(self.parts.len());
        let mut last = Line::new(
            self.origin,
            Vector2::new(first.a0.cos(), first.a0.sin()) * first.length,
        );
        lines.push(last);
        for part in &self.parts[1..] {
            last = last.straight(part.length, 1.0).rotated(part.a0);
            lines.push(last);
        }
        if let Some(closing) = lines.last_mut() {
            closing.set_p1(self.origin);
        }

        let segs: Vec<Segment> = lines.into_iter().map(Segment::from).collect();
        let distances = self.parts.iter().map(|p| p.offset).collect();
        let offset = OffsetChain::with_distances(segs, distances)
            .closed(true)
            .execute()?;

        let edges = offset
            .into_iter()
            .zip(&self.parts)
            .map(|(seg, part)| Edge::new(seg, part.kind))
            .collect();
        Ok(Cutter::new(edges, self.operation))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::Arc;

    fn square_points() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ]
    }

    #[test]
    fn direction_follows_operation() {
        let inter = Cutter::from_points(&square_points(), EdgeKind::Side, BooleanOp::Intersection);
        assert!(inter.signed_area() > 0.0);
        let diff = Cutter::from_points(&square_points(), EdgeKind::Side, BooleanOp::Difference);
        assert!(diff.signed_area() < 0.0);
        for (i, e) in diff.segs.iter().enumerate() {
            let next = &diff.segs[(i + 1) % diff.segs.len()];
            assert!((e.seg.p1() - next.seg.p0()).norm() < 1e-12);
        }
    }

    #[test]
    fn generator_builds_a_closed_square() {
        let parts = vec![
            CutterPart { a0: 0.0, ..CutterPart::default() },
            CutterPart::default(),
            CutterPart::default(),
            CutterPart::default(),
        ];
        let cutter = CutterGenerator::new(parts, BooleanOp::Intersection)
            .execute()
            .unwrap();
        assert_eq!(cutter.segs.len(), 4);
        assert_relative_eq!(cutter.signed_area(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn generator_applies_per_side_offsets() {
        // clockwise square: the inside is on the right, negative offsets grow it
        let parts = vec![
            CutterPart { a0: 0.0, offset: -0.5, ..CutterPart::default() },
            CutterPart { a0: -FRAC_PI_2, offset: -0.5, ..CutterPart::default() },
            CutterPart { a0: -FRAC_PI_2, offset: -0.5, ..CutterPart::default() },
            CutterPart { a0: -FRAC_PI_2, offset: -0.5, ..CutterPart::default() },
        ];
        let cutter = CutterGenerator::new(parts, BooleanOp::Difference)
            .execute()
            .unwrap();
        assert_relative_eq!(cutter.signed_area(), -9.0, epsilon = 1e-9);
    }

    #[test]
    fn too_few_sides_is_rejected() {
        let gen = CutterGenerator::new(vec![CutterPart::default(); 2], BooleanOp::Difference);
        assert!(gen.execute().is_err());
    }

    #[test]
    fn change_coordsys_moves_lines_and_arcs() {
        let mut cutter = Cutter {
            segs: vec![
                Edge::new(Line::new(Point2::new(1.0, 0.0), Vector2::new(1.0, 0.0)), EdgeKind::Side),
                Edge::new(Arc::new(Point2::new(1.0, 0.0), 1.0, 0.0, PI), EdgeKind::Side),
            ],
            operation: BooleanOp::Difference,
        };
        let from = Isometry2::new(Vector2::new(0.0, 0.0), FRAC_PI_2);
        let to = Isometry2::new(Vector2::new(0.0, 1.0), 0.0);
        cutter.change_coordsys(&from, &to);

        // (1, 0) rotated a quarter turn is (0, 1), then seen from (0, 1)
        assert!((cutter.segs[0].seg.p0() - Point2::new(0.0, 0.0)).norm() < 1e-12);
        assert!((cutter.segs[0].seg.p1() - Point2::new(0.0, 1.0)).norm() < 1e-12);
        assert!((cutter.segs[1].seg.p0() - Point2::new(0.0, 1.0)).norm() < 1e-12);
    }
}
