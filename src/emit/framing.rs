use crate::geometry::{EdgeKind, Line, Segment};
use crate::math::{lift, Point2, TOLERANCE};
use crate::operations::boolean::inside;
use crate::roof::{RoofGenerator, RoofPolygon, Side};

use super::params::{BeamParams, RafterParams};
use super::{board_uv, material, quad_uv, steps_along, RoofMesh};

/// Ridge beam under every axis, half a beam per pitch.
///
/// Ends are closed where the pitch meets a gable or a triangular end; a
/// gable end overhangs by `beam.offset`.
pub fn beam_primary(roof: &RoofGenerator, beam: &BeamParams, mesh: &mut RoofMesh) {
    for (_, pan) in roof.pitches() {
        for (i, s) in pan.segs.iter().enumerate() {
            if s.kind == EdgeKind::Axis {
                ridge_beam(roof.z(), pan, i, beam, mesh);
            }
        }
    }
}

fn ridge_beam(z: f64, pan: &RoofPolygon, i: usize, beam: &BeamParams, mesh: &mut RoofMesh) {
    let s = &pan.segs[i].seg;
    let len = s.length();
    let s2 = s.offset(-0.5 * beam.width);
    let mut s0 = *pan.last_seg(i);
    let mut s1 = *pan.next_seg(i);

    let (s0_tri, s1_tri) = match pan.side {
        Side::Left => (pan.node_tri, pan.next_tri),
        Side::Right => (pan.next_tri, pan.node_tri),
    };

    let mut t0 = 0.0;
    if s0.kind == EdgeKind::Side && len > 0.0 {
        s0.seg = s0.seg.offset(beam.offset);
        t0 = -beam.offset / len;
    }
    let p0 = if s0_tri {
        t0 = 0.0;
        s2.p0()
    } else {
        match s2.intersect(&s0.seg).hit() {
            Some(p) => p,
            None => return,
        }
    };

    let mut t1 = 1.0;
    if s1.kind == EdgeKind::Side && len > 0.0 {
        s1.seg = s1.seg.offset(beam.offset);
        t1 = 1.0 + beam.offset / len;
    }
    let p1 = if s1_tri {
        t1 = 1.0;
        s2.p1()
    } else {
        match s2.intersect(&s1.seg).hit() {
            Some(p) => p,
            None => return,
        }
    };

    let alt = z + beam.altitude;
    let z0 = alt + pan.altitude(&p0);
    let z2 = alt + pan.altitude(&p1);
    let (a, b) = (s.lerp(t0), s.lerp(t1));
    let f = mesh.verts.len();
    mesh.verts.extend([
        lift(&p0, z0),
        lift(&a, z0),
        lift(&p1, z2),
        lift(&b, z2),
        lift(&p0, z0 - beam.height),
        lift(&a, z0 - beam.height),
        lift(&p1, z2 - beam.height),
        lift(&b, z2 - beam.height),
    ]);

    let mut faces = Vec::with_capacity(5);
    if s0_tri || s0.kind == EdgeKind::Side {
        faces.push(([4, 5, 1, 0], quad_uv()));
    }
    if s1_tri || s1.kind == EdgeKind::Side {
        faces.push(([2, 3, 7, 6], quad_uv()));
    }
    // outer side, top, bottom; the inner side meets the other half
    faces.push(([2, 6, 4, 0], board_uv()));
    faces.push(([0, 1, 3, 2], board_uv()));
    faces.push(([5, 4, 6, 7], board_uv()));
    for (face, uv) in faces {
        mesh.add_face(face.iter().map(|k| f + k).collect(), material::BEAM, uv);
    }
}

/// Rafters running from the axis down to the eave at regular spacing,
/// trimmed to the pitch boundary and kept out of its holes.
pub fn rafters(roof: &RoofGenerator, rafter: &RafterParams, mesh: &mut RoofMesh) {
    let start = (0.001 + 0.5 * rafter.width).max(rafter.start);
    for (_, pan) in roof.pitches() {
        let seg = pan.fake_axis();
        let len = seg.length();
        if len < TOLERANCE {
            continue;
        }
        let (tmin, tmax) = (pan.tmin, pan.tmax);
        let span = (tmax - tmin) * len;
        // nearest whole number of spacings
        let Some(n) = steps_along(span + 0.5 * rafter.spacing, rafter.spacing) else {
            tracing::warn!(spacing = rafter.spacing, "rafter spacing too small, no rafters");
            return;
        };
        let n = n.max(1);
        let t0 = tmin + (start - 0.5 * rafter.width) / len;
        let t1 = tmin + (start + 0.5 * rafter.width) / len;
        let tx = start / len;
        #[allow(clippy::cast_precision_loss)]
        let dt = ((tmax - tmin) - 2.0 * tx) / n as f64;

        for j in 0..=n {
            #[allow(clippy::cast_precision_loss)]
            let t = j as f64 * dt;
            let n0 = seg.sized_normal(t1 + t, -pan.ysize);
            let n1 = seg.sized_normal(t0 + t, -pan.ysize);
            for (ta, tb) in spans(pan, &n0, &n1) {
                let top = [n0.lerp(ta), n0.lerp(tb), n1.lerp(tb), n1.lerp(ta)]
                    .map(|p| lift(&p, roof.z() + rafter.altitude + pan.altitude(&p)));
                mesh.add_block(top, rafter.height, material::RAFTER);
            }
        }
    }
}

/// Parameter ranges along a rafter lying inside the pitch.
fn spans(pan: &RoofPolygon, n0: &Line, n1: &Line) -> Vec<(f64, f64)> {
    let centre: Segment = Line::from_points(
        Point2::from((n0.p0().coords + n1.p0().coords) * 0.5),
        Point2::from((n0.p1().coords + n1.p1().coords) * 0.5),
    )
    .into();

    let mut ts = vec![0.0, 1.0];
    for boundary in std::iter::once(&pan.segs).chain(&pan.holes) {
        for e in boundary {
            ts.extend(centre.crossings(&e.seg).into_iter().map(|(_, t, _)| t));
        }
    }
    ts.sort_by(f64::total_cmp);
    ts.dedup_by(|a, b| (*a - *b).abs() < TOLERANCE);

    ts.windows(2)
        .filter(|w| {
            let mid = centre.lerp(0.5 * (w[0] + w[1]));
            inside(&mid, &pan.segs) && !pan.holes.iter().any(|h| inside(&mid, h))
        })
        .map(|w| (w[0], w[1]))
        .collect()
}
