use crate::math::{lift, Point3};
use crate::roof::{ConstraintType, RoofGenerator};

/// Wire outline of a roof, as vertices and edges between them.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub verts: Vec<Point3>,
    pub edges: Vec<[usize; 2]>,
}

impl Draft {
    /// Appends a closed loop.
    fn add_loop(&mut self, points: Vec<Point3>) {
        let f = self.verts.len();
        let n = points.len();
        self.verts.extend(points);
        self.edges.extend((0..n).map(|i| [f + i, f + (i + 1) % n]));
    }
}

/// Pitch outlines and holes at their altitude, plus every slope hint at
/// ridge height.
#[must_use]
pub fn draft(roof: &RoofGenerator) -> Draft {
    let z = roof.z();
    let mut out = Draft::default();
    for (_, pan) in roof.pitches() {
        out.add_loop(pan.face_loop(z));
        for hole in pan.hole_loops(z) {
            out.add_loop(hole);
        }
    }
    for axis in roof.axes() {
        if axis.constraint_type == ConstraintType::Slope {
            let f = out.verts.len();
            out.verts.push(lift(&axis.seg.p0(), z));
            out.verts.push(lift(&axis.seg.p1(), z));
            out.edges.push([f, f + 1]);
        }
    }
    out
}
