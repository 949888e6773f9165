mod cutter;
mod intersections;

pub use cutter::{Cutter, CutterGenerator, CutterPart};
pub use intersections::get_intersections;

use crate::geometry::{Edge, Segment};
use crate::math::polygon_2d::winding_number_2d;
use crate::math::{cross_2d, Point2};

/// Angle step used to flatten arcs for point classification.
pub const FLATTEN_STEP: f64 = 0.104;

/// The type of boolean operation a cutter applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    /// Keep what lies outside the cutter.
    Difference,
    /// Keep what lies inside the cutter.
    Intersection,
}

/// Whether `pt` lies inside the closed loop `segs`.
///
/// Deterministic winding-number test over the loop, arcs flattened by
/// [`FLATTEN_STEP`]. The result does not depend on where the loop starts.
#[must_use]
pub fn inside(pt: &Point2, segs: &[Edge]) -> bool {
    let mut verts = Vec::with_capacity(segs.len());
    for e in segs {
        for l in e.seg.as_lines(FLATTEN_STEP) {
            verts.push(l.p0());
        }
    }
    verts.len() >= 3 && winding_number_2d(pt, &verts) != 0
}

/// Whether the loop `segs` is straight and turns the same way at every corner.
#[must_use]
pub fn is_convex(segs: &[Edge]) -> bool {
    let Some(last) = segs.last() else {
        return true;
    };
    let mut s0 = &last.seg;
    let mut sign = None;
    for e in segs {
        let s1 = &e.seg;
        if matches!(s1, Segment::Arc(_)) {
            return false;
        }
        let positive = cross_2d(&s0.v(), &s1.v()) > 0.0;
        match sign {
            None => sign = Some(positive),
            Some(s) if s != positive => return false,
            Some(_) => {}
        }
        s0 = s1;
    }
    true
}

/// A closed polygon that can be clipped by a [`Cutter`].
///
/// Implementors expose their boundary and hole storage; slicing rewrites the
/// boundary in place, so one polygon must not be sliced from two threads.
pub trait CutAblePolygon {
    /// Ordered boundary loop.
    fn segs(&self) -> &[Edge];

    /// Replaces the boundary loop.
    fn set_segs(&mut self, segs: Vec<Edge>);

    /// Registers a hole loop.
    fn add_hole(&mut self, hole: Vec<Edge>);

    /// Records the convexity of the current boundary.
    fn set_convex(&mut self, convex: bool);

    /// Whether `pt` lies inside the boundary.
    fn inside(&self, pt: &Point2) -> bool {
        inside(pt, self.segs())
    }

    /// Recomputes convexity after the boundary changed.
    fn update_convex(&mut self) {
        let convex = is_convex(self.segs());
        self.set_convex(convex);
    }

    /// Clips the boundary by `cutter`.
    ///
    /// Returns whether the polygon survives: `false` means the cutter removes
    /// it entirely. A cutter whose crossings cannot be walked (it loops, or
    /// grazes an odd number of times) leaves the boundary untouched and keeps it.
    fn slice(&mut self, cutter: &Cutter) -> bool {
        let keep_inside = cutter.operation == BooleanOp::Intersection;
        let segs = self.segs().to_vec();

        let own_inside: Vec<bool> = segs
            .iter()
            .map(|e| inside(&e.seg.p0(), &cutter.segs))
            .collect();
        let cutter_inside: Vec<bool> = cutter
            .segs
            .iter()
            .map(|e| inside(&e.seg.p0(), &segs))
            .collect();

        let mut store = Vec::new();
        let walked = if let Some(start) = own_inside.iter().position(|&f| f == keep_inside) {
            get_intersections(&segs, &cutter.segs, start, &mut store, true)
        } else if let Some(start) = cutter_inside.iter().position(|&f| f) {
            // the kept outline runs through the cutter corners inside the boundary
            get_intersections(&cutter.segs, &segs, start, &mut store, false)
        } else {
            tracing::debug!(keep_inside, "no vertex on the kept side of the cutter");
            return !keep_inside;
        };

        if !walked {
            tracing::warn!(
                boundary = segs.len(),
                cutter = cutter.segs.len(),
                "slice failed, cutter looped"
            );
            return true;
        }

        if store.is_empty() {
            // no crossing: nested or disjoint
            if own_inside.iter().all(|&f| f) {
                return keep_inside;
            }
            if cutter_inside.iter().all(|&f| f) {
                let mut hole = cutter.segs.clone();
                for e in &mut hole {
                    e.is_hole = true;
                }
                if keep_inside {
                    self.set_segs(hole);
                    self.update_convex();
                } else {
                    self.add_hole(hole);
                }
                return true;
            }
            return !keep_inside;
        }

        tracing::debug!(segments = store.len(), "boundary sliced");
        self.set_segs(store);
        self.update_convex();
        true
    }
}
