use crate::geometry::{Edge, EdgeKind, Segment};
use crate::math::{lift, Point2};
use crate::operations::boolean::inside;
use crate::operations::offset::OffsetChain;
use crate::roof::{RoofGenerator, RoofPolygon};

use super::params::TileParams;
use super::tile_models::TileShape;
use super::{material, steps_along, RoofMesh};

/// Lays tiles in rows parallel to the ridge over every pitch.
///
/// Rows start at the ridge and run down past the eave by `border`; tiles
/// overhang gables by `side` and stop `couloir` short of valleys.
pub fn couverture(roof: &RoofGenerator, tiles: &TileParams, mesh: &mut RoofMesh) {
    if steps_along(1.0, tiles.space_x).is_none() || steps_along(1.0, tiles.space_y).is_none() {
        tracing::warn!(
            space_x = tiles.space_x,
            space_y = tiles.space_y,
            "tile spacing too small, no covering"
        );
        return;
    }
    let shape = tiles.model.shape();
    let uvs = shape.uvs();
    for (_, pan) in roof.pitches() {
        let before = mesh.faces.len();
        cover(roof.z(), pan, tiles, &shape, &uvs, mesh);
        tracing::trace!(faces = mesh.faces.len() - before, "pitch covered");
    }
}

/// Boundary the tile footprints must fall in.
fn tile_boundary(pan: &RoofPolygon, tiles: &TileParams) -> Vec<Edge> {
    let edges: Vec<&Edge> = pan.segs.iter().filter(|e| e.seg.length() > 0.0).collect();
    let segs: Vec<Segment> = edges.iter().map(|e| e.seg).collect();
    let distances = edges
        .iter()
        .map(|e| match e.kind {
            EdgeKind::LinkValley => -tiles.couloir,
            EdgeKind::Bottom => tiles.border,
            EdgeKind::Side => tiles.side,
            _ => 0.0,
        })
        .collect();
    match OffsetChain::with_distances(segs, distances).closed(true).execute() {
        Ok(offset) => offset
            .into_iter()
            .zip(edges)
            .map(|(seg, e)| Edge::new(seg, e.kind))
            .collect(),
        Err(err) => {
            tracing::warn!(%err, "tile boundary offset failed, using the pitch outline");
            pan.segs.clone()
        }
    }
}

fn cover(z: f64, pan: &RoofPolygon, tiles: &TileParams, shape: &TileShape, uvs: &[Vec<Point2>], mesh: &mut RoofMesh) {
    let boundary = tile_boundary(pan, tiles);
    let (sx, sy, sz) = (tiles.size_x, tiles.size_y, tiles.size_z);
    let (vx, vy, vz) = (pan.vx, pan.vy, pan.vz);
    let origin = lift(&pan.fake_axis().lerp(pan.tmax), z + tiles.altitude);

    let space_x = pan.xsize + 2.0 * tiles.side;
    let space_y = (tiles.border + pan.ysize) * (1.0 + pan.slope * pan.slope).sqrt();
    let (Some(steps_x), Some(steps_y)) = (steps_along(space_x, tiles.space_x), steps_along(space_y, tiles.space_y))
    else {
        return;
    };
    let n_x = steps_x + 1;
    let mut n_y = steps_y + 1;
    #[allow(clippy::cast_precision_loss)]
    let dx = if tiles.fit_x { space_x / n_x as f64 } else { tiles.space_x };
    #[allow(clippy::cast_precision_loss)]
    let dy = if tiles.fit_y { space_y / n_y as f64 } else { tiles.space_y };
    if tiles.alternate {
        n_y += 1;
    }
    let offset = if tiles.offset > 0.0 { -tiles.offset / 100.0 } else { 0.0 };

    let to_world = |lx: f64, ly: f64, lz: f64| origin + vx * lx + vy * ly + vz * lz;

    for k in 0..n_y {
        #[allow(clippy::cast_precision_loss)]
        let y = k as f64 * dy;
        let mut x0 = offset * dx - tiles.side;
        let mut nx = n_x;
        if tiles.alternate && k % 2 == 1 {
            x0 -= 0.5 * dx;
            nx += 1;
        }
        if tiles.offset > 0.0 {
            nx += 1;
        }
        for j in 0..nx {
            #[allow(clippy::cast_precision_loss)]
            let x = x0 + j as f64 * dx;
            let centre = to_world(x + 0.5 * sx, -y - 0.5 * sy, 0.0).xy();
            if !inside(&centre, &boundary) || pan.holes.iter().any(|h| inside(&centre, h)) {
                continue;
            }
            let f = mesh.verts.len();
            mesh.verts
                .extend(shape.points.iter().map(|p| to_world(sx * p.x + x, sy * p.y - y, sz * p.z)));
            let matid = material::TILE + (3 * j + 7 * k) % material::TILE_VARIANTS;
            for (face, uv) in shape.faces.iter().zip(uvs) {
                mesh.add_face(face.iter().map(|i| f + i).collect(), matid, uv.clone());
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::emit::tests::{corner_roof, single_roof};
    use crate::emit::TileModel;
    use crate::operations::boolean::{BooleanOp, Cutter};

    fn run(roof: &RoofGenerator, tiles: &TileParams) -> RoofMesh {
        let mut mesh = RoofMesh::new();
        couverture(roof, tiles, &mut mesh);
        mesh
    }

    fn tile_count(mesh: &RoofMesh, model: TileModel) -> usize {
        mesh.faces.len() / model.shape().faces.len()
    }

    // ── grid ──

    #[test]
    fn tiles_cover_the_pitches() {
        let roof = single_roof();
        let tiles = TileParams::default();
        let mesh = run(&roof, &tiles);
        assert!(!mesh.is_empty());
        assert_eq!(mesh.faces.len() % tiles.model.shape().faces.len(), 0);
        assert!(mesh
            .matids
            .iter()
            .all(|&m| (material::TILE..material::TILE + material::TILE_VARIANTS).contains(&m)));
        // both pitches are covered
        let left = mesh.verts.iter().filter(|p| p.y > 0.0).count();
        let right = mesh.verts.iter().filter(|p| p.y < 0.0).count();
        assert!(left > 0 && right > 0);
    }

    #[test]
    fn tiles_rest_above_the_pitch() {
        let roof = single_roof();
        let mesh = run(&roof, &TileParams::default());
        for p in &mesh.verts {
            assert!(p.z >= roof.z() - 0.5 * p.y.abs() - 1e-9);
        }
    }

    #[test]
    fn alternate_rows_are_staggered() {
        let roof = single_roof();
        let columns = |mesh: &RoofMesh| {
            let n = TileModel::Braas2.shape().points.len();
            let mut xs: Vec<i64> = mesh
                .verts
                .chunks(n)
                .map(|tile| {
                    #[allow(clippy::cast_possible_truncation)]
                    let x = (tile[16].x * 1e6).round() as i64;
                    x
                })
                .collect();
            xs.sort_unstable();
            xs.dedup();
            xs.len()
        };
        let plain = run(&roof, &TileParams::default());
        let alternate = run(
            &roof,
            &TileParams {
                alternate: true,
                ..TileParams::default()
            },
        );
        assert!(tile_count(&alternate, TileModel::Braas2) >= tile_count(&plain, TileModel::Braas2));
        assert!(columns(&alternate) > columns(&plain));
    }

    #[test]
    fn every_model_is_laid() {
        let roof = single_roof();
        for model in [
            TileModel::Braas1,
            TileModel::Eternit,
            TileModel::Lauze,
            TileModel::Roman,
            TileModel::Round,
            TileModel::Placeholder,
            TileModel::Ondulee,
            TileModel::Metal,
        ] {
            let mesh = run(
                &roof,
                &TileParams {
                    model,
                    ..TileParams::default()
                },
            );
            assert!(!mesh.is_empty(), "{model:?}");
            assert!(mesh.faces.iter().flatten().all(|&i| i < mesh.verts.len()));
        }
    }

    #[test]
    fn zero_spacing_lays_no_tiles() {
        let roof = single_roof();
        let tiles = TileParams {
            space_y: 0.0,
            ..TileParams::default()
        };
        assert!(run(&roof, &tiles).is_empty());
    }

    // ── clipping ──

    #[test]
    fn holes_stay_open() {
        let mut roof = single_roof();
        let cutter = Cutter::from_points(
            &[
                Point2::new(1.0, 1.0),
                Point2::new(3.0, 1.0),
                Point2::new(3.0, 2.0),
                Point2::new(1.0, 2.0),
            ],
            EdgeKind::Side,
            BooleanOp::Difference,
        );
        let full = tile_count(&run(&roof, &TileParams::default()), TileModel::Braas2);
        roof.cut(&[cutter]).unwrap();
        let tiles = TileParams::default();
        let mesh = run(&roof, &tiles);
        assert!(tile_count(&mesh, TileModel::Braas2) < full);

        let n = tiles.model.shape().points.len();
        for tile in mesh.verts.chunks(n) {
            let c = footprint_centre(tile);
            assert!(!(c.x > 1.0 + 0.15 && c.x < 3.0 - 0.15 && c.y > 1.0 + 0.15 && c.y < 2.0 - 0.15));
        }
    }

    #[test]
    fn valleys_keep_a_gap() {
        let roof = corner_roof();
        let tiles = TileParams::default();
        let mesh = run(&roof, &tiles);
        assert!(!mesh.is_empty());
        // the valley runs from (4, 0) to (1, 3), on the line x + y = 4
        let n = tiles.model.shape().points.len();
        for tile in mesh.verts.chunks(n) {
            let c = footprint_centre(tile);
            if c.x < 4.0 && c.y > 0.0 {
                let d = (4.0 - c.x - c.y).abs() / 2.0_f64.sqrt();
                assert!(d > tiles.couloir - 0.03, "tile at {c:?}");
            }
        }
    }

    /// Braas corners 16 and 19 are diagonal on the tile footprint.
    fn footprint_centre(tile: &[crate::math::Point3]) -> Point2 {
        Point2::from((tile[16].xy().coords + tile[19].xy().coords) * 0.5)
    }
}
