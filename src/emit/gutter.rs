use std::f64::consts::PI;

use crate::geometry::{EdgeKind, Line};
use crate::math::{Point2, Point3, TOLERANCE};
use crate::roof::{neighbour, RoofGenerator, RoofPolygon};

use super::params::{FasciaParams, GutterParams};
use super::{eave_end, material, quad_uv, RoofMesh};

/// Half round gutters with a rolled lip, swept along every `BOTTOM` edge of
/// the outer boundaries. Ends meeting a gable are capped.
pub fn gutter(roof: &RoofGenerator, params: &GutterParams, fascia: &FasciaParams, mesh: &mut RoofMesh) {
    if params.segs == 0 {
        return;
    }
    for (_, pan) in roof.pitches() {
        for (i, s) in pan.segs.iter().enumerate() {
            if s.kind == EdgeKind::Bottom {
                sweep(roof.z(), pan, i, params, fascia, mesh);
            }
        }
    }
}

fn sweep(z: f64, pan: &RoofPolygon, i: usize, params: &GutterParams, fascia: &FasciaParams, mesh: &mut RoofMesh) {
    let s = &pan.segs[i].seg;
    let reach = params.dist + params.width;
    let s0 = s.offset(reach);
    let (start, _) = eave_end(pan, &pan.segs, i, false, reach, reach);
    let (end, _) = eave_end(pan, &pan.segs, i, true, reach, reach);
    let p0 = s0.intersect(&start).hit().unwrap_or_else(|| s0.p0());
    let p1 = s0.intersect(&end).hit().unwrap_or_else(|| s0.p1());

    let v0 = p0 - s.p0();
    let v1 = p1 - s.p1();
    if v0.norm() < TOLERANCE || v1.norm() < TOLERANCE {
        tracing::warn!(index = i, "gutter without width, skipped");
        return;
    }

    let f = mesh.verts.len();
    let n = params.segs;
    let df = 2 * n + 1;
    for (p, v) in [(s.p0(), v0), (s.p1(), v1)] {
        let scale = v.norm() / reach;
        let section = Line::new(p, v.normalize());
        mesh.verts.extend(profile(z, pan, &section, scale, params, fascia));
    }

    // shelf, then channel and lip
    mesh.add_face(vec![f + df, f, f + 1, f + df + 1], material::GUTTER, quad_uv());
    for k in 1..2 * n {
        let j = f + k;
        mesh.add_face(vec![j, j + df, j + df + 1, j + 1], material::GUTTER, quad_uv());
    }

    if neighbour(&pan.segs, i, false).kind == EdgeKind::Side {
        cap(mesh, f, n, false);
    }
    if neighbour(&pan.segs, i, true).kind == EdgeKind::Side {
        cap(mesh, f + df, n, true);
    }
}

/// Cross section at one end: the shelf point on the fascia, `n` points on the
/// half round channel, then `n` points rolling the outer lip.
fn profile(
    z: f64,
    pan: &RoofPolygon,
    section: &Line,
    scale: f64,
    params: &GutterParams,
    fascia: &FasciaParams,
) -> Vec<Point3> {
    let base = section.p0();
    let zt = z + fascia.altitude + pan.altitude(&base);
    let z0 = z + params.altitude + pan.altitude(&base);
    let z1 = z0 - 0.5 * params.width;
    let dz0 = -0.5 * params.width;
    let dz1 = -0.5 * params.boudin;

    let tt = scale * fascia.width;
    let t0 = scale * params.dist;
    let t1 = t0 + scale * 0.5 * params.width;
    let t2 = t1 + scale * 0.5 * params.width;
    let t3 = t2 + scale * 0.5 * params.boudin;

    let shelf = section.lerp(tt);
    let rim = section.lerp(t0);
    let channel = section.lerp(t1);
    let lip_in = section.lerp(t2);
    let lip = section.lerp(t3);

    let n = params.segs;
    let mut pts = Vec::with_capacity(2 * n + 1);
    pts.push(Point3::new(shelf.x, shelf.y, zt));

    #[allow(clippy::cast_precision_loss)]
    let nf = n as f64;
    let d = rim - channel;
    let da = PI / nf;
    for k in 0..n {
        #[allow(clippy::cast_precision_loss)]
        let a = k as f64 * da;
        pts.push(point(channel + d * a.cos(), z1 + dz0 * a.sin()));
    }
    let d = lip_in - lip;
    let da = -PI / (0.75 * nf);
    for k in 0..n {
        #[allow(clippy::cast_precision_loss)]
        let a = k as f64 * da;
        pts.push(point(lip + d * a.cos(), z1 + dz1 * a.sin()));
    }
    pts
}

fn point(p: Point2, z: f64) -> Point3 {
    Point3::new(p.x, p.y, z)
}

/// Closes the channel section starting at vertex `f + 1`.
fn cap(mesh: &mut RoofMesh, f: usize, n: usize, at_end: bool) {
    let n_faces = if n % 2 == 1 { (n - 1) / 2 } else { (n / 2).saturating_sub(1) };
    if n % 2 == 0 && n >= 2 {
        let (a, b, c) = (f + n_faces + 3, f + n_faces + 1, f + n_faces + 2);
        let tri = if at_end { vec![b, a, c] } else { vec![a, b, c] };
        mesh.add_face(
            tri,
            material::GUTTER,
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.5, -0.5)],
        );
    }
    for k in 0..n_faces {
        let j = f + 1 + k;
        let l = f + n - k;
        let quad = if at_end { vec![j, l + 1, l, j + 1] } else { vec![j + 1, l, l + 1, j] };
        mesh.add_face(quad, material::GUTTER, quad_uv());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::emit::tests::{corner_roof, single_roof};

    fn run(roof: &RoofGenerator, params: &GutterParams) -> RoofMesh {
        let mut mesh = RoofMesh::new();
        gutter(roof, params, &FasciaParams::default(), &mut mesh);
        mesh
    }

    // ── sweep ──

    #[test]
    fn straight_eave_gets_a_capped_gutter() {
        let roof = single_roof();
        let mesh = run(&roof, &GutterParams::default());
        // 6 segments: 13 points per section, 12 strips, 2 caps of 2 quads + 1 triangle
        let per_eave = 12 + 2 * 3;
        assert_eq!(mesh.faces.len(), 2 * per_eave);
        assert_eq!(mesh.verts.len(), 2 * 2 * 13);
        assert_eq!(mesh.count_material(material::GUTTER), mesh.faces.len());
    }

    #[test]
    fn channel_hangs_under_the_eave() {
        let roof = single_roof();
        let params = GutterParams::default();
        let mesh = run(&roof, &params);
        // first section: shelf then channel, eave altitude 3 - 1.5
        let section = &mesh.verts[0..13];
        assert_relative_eq!(section[0].z, 1.5 + 0.1, epsilon = 1e-9);
        let bottom = section[1..=6].iter().map(|p| p.z).fold(f64::MAX, f64::min);
        assert!(bottom < 1.5 - 0.5 * params.width);
        assert!(bottom >= 1.5 - params.width - 1e-9);
        // the channel lies outside the eave
        for p in &section[1..] {
            assert!(p.y.abs() > 3.0);
        }
    }

    #[test]
    fn odd_segments_skip_the_cap_triangle() {
        let roof = single_roof();
        let params = GutterParams {
            segs: 5,
            ..GutterParams::default()
        };
        let mesh = run(&roof, &params);
        let tris = mesh.faces.iter().filter(|f| f.len() == 3).count();
        assert_eq!(tris, 0);
        assert_eq!(mesh.faces.len(), 2 * (10 + 2 * 2));
    }

    #[test]
    fn linked_ends_stay_open() {
        let roof = corner_roof();
        let mesh = run(&roof, &GutterParams::default());
        // four eaves, each with a single gable end
        assert_eq!(mesh.faces.len(), 4 * (12 + 3));
    }
}
