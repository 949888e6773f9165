use crate::math::intersect_2d::{circle_circle_intersect_2d, line_line_intersect_2d};
use crate::math::Point2;

use super::{Arc, Line, Segment};

impl Segment {
    /// Offsets this segment and joins it to the already offset predecessor.
    ///
    /// `last` is trimmed or extended in place so that its end coincides with
    /// the start of the returned segment. When no valid corner exists (parallel
    /// lines, reflex corner, circles that do not meet) the pure offset is
    /// returned and `last` is left untouched.
    #[must_use]
    pub fn make_offset(&self, distance: f64, last: Option<&mut Segment>) -> Segment {
        let mut seg = self.offset(distance);
        let Some(last) = last else {
            return seg;
        };
        match (&mut seg, last) {
            (Segment::Line(line), Segment::Line(prev)) => join_line_line(prev, line),
            (Segment::Line(line), Segment::Arc(prev)) => join_arc_line(prev, line),
            (Segment::Arc(arc), Segment::Line(prev)) => join_line_arc(prev, arc),
            (Segment::Arc(arc), Segment::Arc(prev)) => join_arc_arc(prev, arc, &self.p0()),
        }
        seg
    }
}

fn join_line_line(prev: &mut Line, line: &mut Line) {
    let Some((t, u)) = line_line_intersect_2d(&prev.p, &prev.v, &line.p, &line.v) else {
        return;
    };
    // corner past this segment's end or before the previous start: no join
    if u > 1.0 || t < 0.0 {
        return;
    }
    let p = prev.lerp(t);
    line.set_p0(p);
    prev.set_p1(p);
}

fn join_arc_line(prev: &mut Arc, line: &mut Line) {
    let pr = line.project(&prev.c);
    let c = prev.r * prev.r - pr.distance * pr.distance;
    let foot = line.lerp(pr.t);
    let p0 = if c <= 0.0 {
        foot
    } else if pr.t > 0.0 {
        foot - line.direction() * c.sqrt()
    } else {
        foot + line.direction() * c.sqrt()
    };
    prev.set_p1(p0);
    line.set_p0(p0);
}

fn join_line_arc(prev: &mut Line, arc: &mut Arc) {
    let pr = prev.project(&arc.c);
    let c = arc.r * arc.r - pr.distance * pr.distance;
    let foot = prev.lerp(pr.t);
    let p0 = if c <= 0.0 {
        foot
    } else if pr.t > 1.0 {
        foot - prev.direction() * c.sqrt()
    } else {
        foot + prev.direction() * c.sqrt()
    };
    arc.set_p0(p0);
    prev.set_p1(p0);
}

fn join_arc_arc(prev: &mut Arc, arc: &mut Arc, reference: &Point2) {
    let axis = Line::new(prev.c, arc.c - prev.c);
    let side = axis.project(reference).distance;
    let candidates = circle_circle_intersect_2d(&prev.c, prev.r, &arc.c, arc.r);
    let Some(p) = candidates
        .iter()
        .find(|p| (axis.project(p).distance > 0.0) == (side > 0.0))
        .or_else(|| candidates.first())
        .copied()
    else {
        return;
    };
    prev.set_p1(p);
    arc.set_p0(p);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::math::Vector2;

    fn line(px: f64, py: f64, vx: f64, vy: f64) -> Segment {
        Line::new(Point2::new(px, py), Vector2::new(vx, vy)).into()
    }

    #[test]
    fn first_segment_is_a_pure_offset() {
        let s = line(0.0, 0.0, 4.0, 0.0);
        let o = s.make_offset(1.0, None);
        assert!((o.p0() - Point2::new(0.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn outer_corner_is_extended() {
        let a = line(0.0, 0.0, 4.0, 0.0);
        let b = line(4.0, 0.0, 0.0, 4.0);
        let mut oa = a.make_offset(1.0, None);
        let ob = b.make_offset(1.0, Some(&mut oa));
        assert!((oa.p1() - Point2::new(5.0, -1.0)).norm() < 1e-12);
        assert_eq!(oa.p1(), ob.p0());
        assert!((ob.p1() - Point2::new(5.0, 4.0)).norm() < 1e-12);
    }

    #[test]
    fn inner_corner_is_trimmed() {
        let a = line(0.0, 0.0, 4.0, 0.0);
        let b = line(4.0, 0.0, 0.0, 4.0);
        let mut oa = a.make_offset(-1.0, None);
        let ob = b.make_offset(-1.0, Some(&mut oa));
        assert!((ob.p0() - Point2::new(3.0, 1.0)).norm() < 1e-12);
        assert_eq!(oa.p1(), ob.p0());
    }

    #[test]
    fn corner_past_segment_end_is_not_joined() {
        // short second leg: the offset corner lies beyond its own end
        let a = line(0.0, 0.0, 4.0, 0.0);
        let b = line(4.0, 0.0, -0.5, 0.5);
        let mut oa = a.make_offset(-1.0, None);
        let before = oa;
        let ob = b.make_offset(-1.0, Some(&mut oa));
        assert_eq!(oa, before);
        assert_eq!(ob, b.offset(-1.0));
    }

    #[test]
    fn line_then_arc_join_lies_on_both() {
        let a = line(0.0, 0.0, 4.0, 0.0);
        let b: Segment = Arc::new(Point2::new(6.0, 0.0), 2.0, PI, -FRAC_PI_2).into();
        let mut oa = a.make_offset(-1.0, None);
        let ob = b.make_offset(-1.0, Some(&mut oa));
        assert_eq!(oa.p1(), ob.p0());
        let Segment::Arc(arc) = ob else {
            panic!("expected an arc");
        };
        assert!(((ob.p0() - arc.c).norm() - 3.0).abs() < 1e-9);
        assert!((ob.p0().y - 1.0).abs() < 1e-12);
        assert!(arc.da < 0.0, "sense is preserved");
        assert!((ob.p1() - Point2::new(6.0, 3.0)).norm() < 1e-9);
    }

    #[test]
    fn arc_then_line_join_lies_on_both() {
        let a: Segment = Arc::new(Point2::new(0.0, 2.0), 2.0, -FRAC_PI_2, FRAC_PI_2).into();
        let b = line(2.0, 2.0, -1.0, 3.0);
        let mut oa = a.make_offset(0.5, None);
        let ob = b.make_offset(0.5, Some(&mut oa));
        let Segment::Arc(arc) = oa else {
            panic!("expected an arc");
        };
        assert!(arc.da > 0.0);
        assert!((oa.p1() - ob.p0()).norm() < 1e-9);
        assert!(((ob.p0() - arc.c).norm() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn arc_then_arc_join_lies_on_both() {
        let a: Segment = Arc::new(Point2::origin(), 2.0, -FRAC_PI_2, FRAC_PI_2).into();
        let b: Segment = Arc::new(Point2::new(4.0, 0.0), 2.0, PI, -FRAC_PI_2).into();
        let mut oa = a.make_offset(-0.5, None);
        let ob = b.make_offset(-0.5, Some(&mut oa));
        assert!((oa.p1() - ob.p0()).norm() < 1e-9);
        let (Segment::Arc(pa), Segment::Arc(pb)) = (oa, ob) else {
            panic!("expected arcs");
        };
        assert!(((ob.p0() - pa.c).norm() - pa.r).abs() < 1e-9);
        assert!(((ob.p0() - pb.c).norm() - pb.r).abs() < 1e-9);
        assert!(pa.da > 0.0 && pb.da < 0.0);
    }
}
