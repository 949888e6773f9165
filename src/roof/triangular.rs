use crate::error::Result;
use crate::geometry::{Edge, EdgeKind, Line};
use crate::math::{lift, Point2, Vector2, Vector3};
use crate::topology::{PitchId, PitchStore};

use super::axis::RoofAxis;
use super::node::RoofAxisNode;
use super::part::{AutoMode, Side};
use super::pitch::{RoofPolygon, BOTTOM};

/// Closes the free ends of flagged axes with a triangular hipped pitch.
///
/// A child roof hanging from a parent never gets a triangle at its start.
/// Returns the new pitches in node order.
pub(super) fn make_ends(
    store: &mut PitchStore,
    nodes: &[RoofAxisNode],
    axes: &[RoofAxis],
    is_t_child: bool,
) -> Result<Vec<PitchId>> {
    let mut tris = Vec::new();
    for node in nodes {
        let Some(root) = node.root_binding() else {
            continue;
        };
        if node.n_horizontal != 1 || !axes[root.axis_idx].triangular_end {
            continue;
        }
        let (Some(left), Some(right)) = (root.left, root.right) else {
            continue;
        };
        let tri = if root.reversed {
            close_end(store, left, right, true)?
        } else if !is_t_child {
            close_end(store, right, left, false)?
        } else {
            continue;
        };
        tris.push(tri);
    }
    if !tris.is_empty() {
        tracing::debug!(count = tris.len(), "triangular ends");
    }
    Ok(tris)
}

/// Builds the triangle between the side at the axis end of `a` and the
/// closing side of `b`, then trims both onto the new hips.
fn close_end(store: &mut PitchStore, a_id: PitchId, b_id: PitchId, at_next: bool) -> Result<PitchId> {
    let (a, b) = store.pair_mut(a_id, b_id)?;
    if at_next {
        a.next_tri = true;
        b.next_tri = true;
    } else {
        a.node_tri = true;
        b.node_tri = true;
    }
    let bi = b.last_idx();

    let s1 = a.segs[BOTTOM].seg;
    let s3 = b.segs[BOTTOM].seg;
    let p0 = s1.lerp(-a.width / s1.length());
    let p1 = a.segs[1].seg.p0();
    let p2 = s3.lerp(1.0 + b.width / s3.length());

    // plane through the ridge end and both extended eave corners
    let p3 = lift(&p0, -a.width * a.slope);
    let p4 = lift(&p1, 0.0);
    let p5 = lift(&p2, -b.width * b.slope);
    let n = (p3 - p4).normalize().cross(&(p5 - p4).normalize());
    let v = n.cross(&Vector3::z());
    let dz = n.cross(&v);

    let ridge = Line::new(p1, v.xy());
    let mut tri = RoofPolygon::with_axis(ridge.opposite(), Side::Right, 1.0, 1.0, AutoMode::Auto);
    tri.slope = -dz.z / Vector2::new(dz.x, dz.y).norm();
    tri.is_tri = true;
    tri.cross = Line::new(p1, p2 - p0).sized_normal(0.0, -1.0);
    tri.next_cross = a.cross;
    tri.last_cross = b.cross;
    tri.segs = vec![
        hip(p1, p2),
        Edge::new(Line::from_points(p2, p0), EdgeKind::Bottom),
        hip(p0, p1),
    ];

    if at_next {
        a.next_cross = tri.cross;
        b.next_cross = tri.cross;
    } else {
        a.last_cross = tri.cross;
        b.last_cross = tri.cross;
    }

    a.segs[1].seg.set_p1(p0);
    a.segs[1].kind = EdgeKind::LinkHip;
    a.segs[BOTTOM].seg.set_p0(p0);
    b.segs[bi].seg.set_p0(p2);
    b.segs[bi].kind = EdgeKind::LinkHip;
    b.segs[BOTTOM].seg.set_p1(p2);

    Ok(store.add_pitch(tri))
}

fn hip(p0: Point2, p1: Point2) -> Edge {
    Edge::new(Line::from_points(p0, p1), EdgeKind::LinkHip)
}
