//! Mesh emitters for the roof elements built on top of finished pitches.
//!
//! Every emitter appends polygons to a [`RoofMesh`]; faces are index loops,
//! tagged with a material slot and one uv ring each.

mod draft;
mod framing;
mod gutter;
mod hip_models;
mod hips;
mod lambris;
mod params;
mod tile_models;
mod tiles;
mod trim;

pub use draft::{draft, Draft};
pub use framing::{beam_primary, rafters};
pub use gutter::gutter;
pub use hip_models::HipModel;
pub use hips::hips;
pub use lambris::lambris;
pub use params::{
    BargeboardParams, BeamParams, EmitSettings, FasciaParams, GutterParams, HipParams, LambrisParams, RafterParams,
    TileParams,
};
pub use tile_models::TileModel;
pub use tiles::couverture;
pub use trim::{bargeboard, fascia};

use crate::error::Result;
use crate::geometry::{Edge, EdgeKind, Line, Segment};
use crate::math::{Point2, Point3, TOLERANCE};
use crate::roof::{neighbour, RoofGenerator, RoofPolygon, Side};

/// Material slots shared by the emitters.
pub mod material {
    pub const LAMBRIS: usize = 0;
    pub const BARGEBOARD: usize = 1;
    pub const FASCIA: usize = 2;
    pub const BEAM: usize = 3;
    /// Rafters and the secondary beams under shared edges.
    pub const RAFTER: usize = 4;
    pub const GUTTER: usize = 5;
    pub const VALLEY: usize = 5;
    pub const HIP: usize = 6;
    /// First tile slot; tiles spread over `TILE..TILE + TILE_VARIANTS`.
    pub const TILE: usize = 7;
    pub const TILE_VARIANTS: usize = 4;
}

/// Indexed polygon soup with per face material and uvs.
#[derive(Debug, Clone, Default)]
pub struct RoofMesh {
    pub verts: Vec<Point3>,
    pub faces: Vec<Vec<usize>>,
    pub matids: Vec<usize>,
    pub uvs: Vec<Vec<Point2>>,
}

impl RoofMesh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Adds a face over existing vertices.
    pub fn add_face(&mut self, face: Vec<usize>, matid: usize, uv: Vec<Point2>) {
        self.faces.push(face);
        self.matids.push(matid);
        self.uvs.push(uv);
    }

    /// Moves every element of `other` into this mesh.
    pub fn append(&mut self, other: RoofMesh) {
        let f = self.verts.len();
        self.verts.extend(other.verts);
        self.faces
            .extend(other.faces.into_iter().map(|face| face.into_iter().map(|i| i + f).collect()));
        self.matids.extend(other.matids);
        self.uvs.extend(other.uvs);
    }

    /// Number of faces using `matid`.
    #[must_use]
    pub fn count_material(&self, matid: usize) -> usize {
        self.matids.iter().filter(|&&m| m == matid).count()
    }

    /// Closed block hanging `height` under the quad `top`.
    fn add_block(&mut self, top: [Point3; 4], height: f64, matid: usize) {
        const BLOCK: [[usize; 4]; 6] = [
            [0, 1, 2, 3],
            [0, 4, 5, 1],
            [1, 5, 6, 2],
            [2, 6, 7, 3],
            [3, 7, 4, 0],
            [4, 7, 6, 5],
        ];
        let f = self.verts.len();
        self.verts.extend(top);
        self.verts
            .extend(top.iter().map(|p| Point3::new(p.x, p.y, p.z - height)));
        for face in BLOCK {
            self.add_face(face.iter().map(|i| f + i).collect(), matid, board_uv());
        }
    }
}

/// Runs every enabled emitter over a finished roof.
pub struct EmitRoof {
    settings: EmitSettings,
}

impl EmitRoof {
    #[must_use]
    pub fn new(settings: EmitSettings) -> Self {
        Self { settings }
    }

    /// Executes the emitters in layering order, boards first, tiles last.
    ///
    /// # Errors
    ///
    /// Returns an error if a pitch cannot be found or tessellated.
    pub fn execute(&self, roof: &RoofGenerator) -> Result<RoofMesh> {
        let s = &self.settings;
        let mut mesh = RoofMesh::new();
        if s.bargeboard.enable {
            bargeboard(roof, &s.bargeboard, &mut mesh);
        }
        if s.fascia.enable {
            fascia(roof, &s.fascia, &mut mesh);
        }
        if s.beam.enable {
            beam_primary(roof, &s.beam, &mut mesh);
        }
        hips(roof, s, &mut mesh)?;
        if s.gutter.enable {
            gutter(roof, &s.gutter, &s.fascia, &mut mesh);
        }
        if s.lambris.enable {
            lambris(roof, &s.lambris, &mut mesh)?;
        }
        if s.rafter.enable {
            rafters(roof, &s.rafter, &mut mesh);
        }
        if s.tiles.enable {
            couverture(roof, &s.tiles, &mut mesh);
        }
        tracing::debug!(
            verts = mesh.verts.len(),
            faces = mesh.faces.len(),
            "roof elements emitted"
        );
        Ok(mesh)
    }
}

/// Whole `spacing` steps that fit in `length`.
///
/// `None` when the spacing is too small to lay anything out.
fn steps_along(length: f64, spacing: f64) -> Option<usize> {
    if spacing.is_nan() || spacing < TOLERANCE {
        return None;
    }
    let n = (length / spacing).floor().max(0.0);
    if !n.is_finite() || n >= f64::from(u32::MAX) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(n as usize)
}

fn board_uv() -> Vec<Point2> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(0.0, 1.0),
        Point2::new(1.0, 1.0),
        Point2::new(1.0, 0.0),
    ]
}

fn quad_uv() -> Vec<Point2> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(0.0, 1.0),
    ]
}

/// Cutting lines at one end of an eave element lying `inner..outer` out
/// from boundary segment `i`.
///
/// Gable sides cut square, eaves carry on with their own offset, and shared
/// edges cut along the pitch cross line.
fn eave_end(
    pan: &RoofPolygon,
    boundary: &[Edge],
    i: usize,
    at_end: bool,
    inner: f64,
    outer: f64,
) -> (Segment, Segment) {
    let s = &boundary[i];
    let other = neighbour(boundary, i, at_end);
    let p = if at_end { s.seg.p1() } else { s.seg.p0() };
    let n = s.seg.sized_normal(0.0, 1.0).v;
    match other.kind {
        EdgeKind::Side => {
            let cut: Segment = Line::new(p, n).into();
            (cut, cut)
        }
        EdgeKind::Bottom => (other.seg.offset(inner), other.seg.offset(outer)),
        _ if s.is_hole => (other.seg, other.seg),
        _ => {
            let cross = match (pan.side, at_end) {
                (Side::Left, false) | (Side::Right, true) => pan.next_cross,
                (Side::Left, true) | (Side::Right, false) => pan.last_cross,
            };
            let v = n + cross.v;
            let v = if v.norm() < TOLERANCE { n } else { v.normalize() };
            let cut: Segment = Line::new(p, v).into();
            (cut, cut)
        }
    }
}
