use crate::error::Result;
use crate::geometry::EdgeKind;
use crate::math::{lift, Point3, Vector3, TOLERANCE};
use crate::roof::{RoofGenerator, RoofPolygon, Side};

use super::hip_models::HipShape;
use super::params::{BeamParams, EmitSettings, HipParams, TileParams};
use super::{material, quad_uv, steps_along, RoofMesh};

/// Finishing along shared edges: hip tiles on `LINK_HIP`, flashing strips
/// on `LINK_VALLEY`, ridge tiles along the axis of left pitches and a
/// secondary beam under every shared edge.
///
/// # Errors
///
/// Returns an error if a pitch references a neighbour missing from the store.
pub fn hips(roof: &RoofGenerator, settings: &EmitSettings, mesh: &mut RoofMesh) -> Result<()> {
    let hip = &settings.hips;
    let tiles = &settings.tiles;
    let shape = hip.model.shape(hip.size_x, hip.size_y, hip.size_z);
    let z = roof.z();
    let tiled = hip.enable && steps_along(1.0, hip.space_x).is_some();
    if hip.enable && !tiled {
        tracing::warn!(space_x = hip.space_x, "hip tile spacing too small, no hip tiles");
    }

    for (_, pan) in roof.pitches() {
        for (i, s) in pan.segs.iter().enumerate() {
            if s.is_link() && settings.beam.sec_enable {
                secondary_beam(z, pan, i, &settings.beam, mesh);
            }
            match s.kind {
                EdgeKind::LinkHip if tiled => hip_tiles(z, pan, i, &shape, hip, tiles, mesh),
                EdgeKind::LinkValley if hip.valley_enable => valley(z, pan, i, hip, tiles, mesh),
                EdgeKind::Axis if tiled && pan.side == Side::Left => {
                    let other_slope = match pan.other_side {
                        Some(id) => roof.pitch(id)?.slope,
                        None => pan.slope,
                    };
                    ridge(z, pan, i, other_slope, &shape, hip, tiles, mesh);
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// Copies `verts` into the frame `origin, vx, vy, vz`, shifted by `x` along
/// the hip and mirrored across it.
fn stamp(mesh: &mut RoofMesh, shape: &HipShape, verts: &[Point3], origin: &Point3, frame: &[Vector3; 3], x: f64) {
    let f = mesh.verts.len();
    let [vx, vy, vz] = frame;
    mesh.verts
        .extend(verts.iter().map(|p| origin + vx * (p.x + x) - vy * p.y + vz * p.z));
    for (face, uv) in shape.faces.iter().zip(&shape.uvs) {
        mesh.add_face(face.iter().map(|i| f + i).collect(), material::HIP, uv.clone());
    }
}

/// Tiles laid down the hip, from the ridge to the eave, by the pitch the
/// roof falls away from on the right of the hip.
fn hip_tiles(
    z: f64,
    pan: &RoofPolygon,
    i: usize,
    shape: &HipShape,
    hip: &HipParams,
    tiles: &TileParams,
    mesh: &mut RoofMesh,
) {
    let mut s = pan.segs[i].seg;
    let mut p0 = pan.last_seg(i).seg.p1();
    let mut p1 = pan.next_seg(i).seg.p0();
    let mut z0 = pan.altitude(&p0);
    let mut z1 = pan.altitude(&p1);
    if z1 > z0 {
        std::mem::swap(&mut p0, &mut p1);
        std::mem::swap(&mut z0, &mut z1);
        s = s.opposite();
    }
    let dz = pan.altitude(&s.sized_normal(0.0, 1.0).p1()) - z0;
    if dz >= 0.0 {
        return;
    }

    let dp = p1 - p0;
    let v = Vector3::new(dp.x, dp.y, z1 - z0);
    let space_x = v.norm() - tiles.border;
    if space_x <= TOLERANCE {
        return;
    }
    let vx = v.normalize();
    let vy = vx.cross(&Vector3::z());
    let vz = vy.cross(&vx);
    let origin = lift(&p0, z + z0) + vz * hip.altitude;

    let Some(steps) = steps_along(space_x, hip.space_x) else {
        return;
    };
    let n_x = steps + 1;
    #[allow(clippy::cast_precision_loss)]
    let dx = space_x / n_x as f64;

    let mut verts = shape.points.clone();
    for &k in shape.left {
        verts[k].z -= dz * verts[k].y;
    }
    for &k in shape.right {
        verts[k].z += dz * verts[k].y;
    }
    for k in 0..n_x {
        #[allow(clippy::cast_precision_loss)]
        let x = (k as f64 + 0.5) * dx;
        stamp(mesh, shape, &verts, &origin, &[vx, vy, vz], x);
    }
}

/// Flashing strip inside the pitch, `2 * couloir` wide along the valley.
fn valley(z: f64, pan: &RoofPolygon, i: usize, hip: &HipParams, tiles: &TileParams, mesh: &mut RoofMesh) {
    let s = &pan.segs[i].seg;
    let s0 = s.offset(-2.0 * tiles.couloir);
    let s1 = &pan.last_seg(i).seg;
    let s2 = &pan.next_seg(i).seg;
    let p0 = s0.intersect(s1).hit().unwrap_or_else(|| s0.p0());
    let p1 = s0.intersect(s2).hit().unwrap_or_else(|| s0.p1());

    let alt = z + hip.valley_altitude;
    let f = mesh.verts.len();
    mesh.verts
        .extend([s1.p1(), p0, p1, s2.p0()].map(|p| lift(&p, alt + pan.altitude(&p))));
    mesh.add_face(vec![f, f + 3, f + 2, f + 1], material::VALLEY, quad_uv());
}

/// Ridge tiles over the axis, wings bent to both pitch slopes.
#[allow(clippy::too_many_arguments)]
fn ridge(
    z: f64,
    pan: &RoofPolygon,
    i: usize,
    other_slope: f64,
    shape: &HipShape,
    hip: &HipParams,
    tiles: &TileParams,
    mesh: &mut RoofMesh,
) {
    let s = &pan.segs[i].seg;
    let len = s.length();
    if len < TOLERANCE {
        return;
    }
    let tmin = if pan.last_seg(i).kind == EdgeKind::Side { -tiles.side / len } else { 0.0 };
    let tmax = if pan.next_seg(i).kind == EdgeKind::Side { 1.0 + tiles.side / len } else { 1.0 };
    let s_len = (tmax - tmin) * len;

    let Some(steps) = steps_along(s_len, hip.space_x) else {
        return;
    };
    let n_obj = steps + 1;
    #[allow(clippy::cast_precision_loss)]
    let dx = s_len / n_obj as f64;

    let v = s.v().normalize();
    let vx = Vector3::new(v.x, v.y, 0.0);
    let vy = Vector3::new(v.y, -v.x, 0.0);
    let origin = lift(&s.lerp(tmin), z + hip.altitude);

    // tile thickness keeps the wings resting on the covering
    let rest = tiles.size_z / tiles.size_y;
    let mut verts = shape.points.clone();
    for &k in shape.left {
        verts[k].z += verts[k].y * (other_slope - rest);
    }
    for &k in shape.right {
        verts[k].z -= verts[k].y * (pan.slope - rest);
    }
    for k in 0..n_obj {
        #[allow(clippy::cast_precision_loss)]
        let x = (k as f64 + 0.5) * dx;
        stamp(mesh, shape, &verts, &origin, &[vx, vy, Vector3::z()], x);
    }
}

/// Beam under a shared edge, trimmed on both neighbours.
fn secondary_beam(z: f64, pan: &RoofPolygon, i: usize, beam: &BeamParams, mesh: &mut RoofMesh) {
    let s = &pan.segs[i].seg;
    let s0 = s.offset(-0.5 * beam.sec_width);
    let t_on = |other: &crate::geometry::Segment, default: f64| {
        let it = s0.intersect(other);
        if it.found {
            it.t
        } else {
            default
        }
    };
    let t0 = t_on(&pan.last_seg(i).seg, 0.0);
    let t1 = t_on(&pan.next_seg(i).seg, 1.0);

    let alt = z + beam.sec_altitude;
    let h = beam.sec_height;
    let f = mesh.verts.len();
    for (t, p) in [(t0, s.p0()), (t1, s.p1())] {
        let q = s0.lerp(t);
        let zq = alt + pan.altitude(&s.lerp(t));
        let zp = alt + pan.altitude(&p);
        mesh.verts.extend([
            lift(&q, zq),
            lift(&q, zq - h),
            lift(&p, zp),
            lift(&p, zp - h),
        ]);
    }
    for face in [
        [0, 4, 5, 1],
        [1, 5, 7, 3],
        [2, 3, 7, 6],
        [2, 6, 4, 0],
        [0, 1, 3, 2],
        [5, 4, 6, 7],
    ] {
        mesh.add_face(face.iter().map(|k| f + k).collect(), material::RAFTER, quad_uv());
    }
}
