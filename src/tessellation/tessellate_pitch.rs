use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation};

use crate::error::{Result, TessellationError};
use crate::geometry::Edge;
use crate::math::{lift, Point2, Vector3, TOLERANCE};
use crate::roof::RoofPolygon;
use crate::topology::{PitchId, PitchStore};

use super::{TessellationParams, TriangleMesh};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates a finished pitch, holes included, lifted onto its plane.
pub struct TessellatePitch {
    pitch: PitchId,
    params: TessellationParams,
}

impl TessellatePitch {
    /// Creates a new `TessellatePitch` operation.
    #[must_use]
    pub fn new(pitch: PitchId, params: TessellationParams) -> Self {
        Self { pitch, params }
    }

    /// Executes the tessellation, returning a triangle mesh.
    ///
    /// Vertices sit at `z + altitude`, uvs come from [`RoofPolygon::uv`] and
    /// every normal is the pitch normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the pitch is missing, the step angle is not
    /// positive, or the outline cannot be inserted in the triangulation.
    pub fn execute(&self, store: &PitchStore) -> Result<TriangleMesh> {
        if self.params.step_angle <= TOLERANCE {
            return Err(TessellationError::InvalidParameters(format!(
                "step angle {} must be positive",
                self.params.step_angle
            ))
            .into());
        }
        let pitch = store.pitch(self.pitch)?;
        tessellate(pitch, &self.params)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn tessellate(pitch: &RoofPolygon, params: &TessellationParams) -> Result<TriangleMesh> {
    let mut cdt = Cdt::new();
    insert_constraint_loop(&mut cdt, &flatten(&pitch.segs, params.step_angle))?;
    for hole in &pitch.holes {
        insert_constraint_loop(&mut cdt, &flatten(hole, params.step_angle))?;
    }

    let interior = classify_interior_faces(&cdt);
    let normal = if pitch.vz.norm() > TOLERANCE {
        pitch.vz.normalize()
    } else {
        Vector3::z()
    };

    let mut mesh = TriangleMesh::default();
    let mut vertex_map: HashMap<usize, u32> = HashMap::new();
    for face in cdt.inner_faces() {
        if !interior.contains(&face.fix().index()) {
            continue;
        }
        let mut tri = [0u32; 3];
        for (i, vh) in face.vertices().iter().enumerate() {
            tri[i] = *vertex_map.entry(vh.fix().index()).or_insert_with(|| {
                let pos = vh.position();
                let p = Point2::new(pos.x, pos.y);
                let idx = mesh.vertices.len() as u32;
                mesh.vertices.push(lift(&p, params.z + pitch.altitude(&p)));
                mesh.normals.push(normal);
                mesh.uvs.push(pitch.uv(&p));
                idx
            });
        }
        mesh.indices.push(tri);
    }
    tracing::trace!(triangles = mesh.indices.len(), "pitch tessellated");
    Ok(mesh)
}

/// Start points of the boundary, arcs cut into straight pieces.
fn flatten(segs: &[Edge], step_angle: f64) -> Vec<SpadePoint2<f64>> {
    let mut points: Vec<SpadePoint2<f64>> = Vec::new();
    for e in segs {
        for l in e.seg.as_lines(step_angle) {
            let p = l.p0();
            let dup = points
                .last()
                .is_some_and(|q| (q.x - p.x).abs() < TOLERANCE && (q.y - p.y).abs() < TOLERANCE);
            if !dup {
                points.push(SpadePoint2::new(p.x, p.y));
            }
        }
    }
    points
}

/// Inserts a closed loop into the CDT, constraining consecutive points.
fn insert_constraint_loop(cdt: &mut Cdt, points: &[SpadePoint2<f64>]) -> Result<()> {
    if points.len() < 3 {
        return Err(TessellationError::Failed("constraint loop needs at least 3 points".into()).into());
    }

    let mut handles = Vec::with_capacity(points.len());
    for &pt in points {
        let h = cdt
            .insert(pt)
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to && cdt.can_add_constraint(from, to) {
            cdt.add_constraint(from, to);
        }
    }
    Ok(())
}

/// Flood fill from the outer face; crossing a constraint flips inside/outside.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();
    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer_fix {
            continue;
        }
        let Some(inner) = edge.rev().face().as_inner() else {
            continue;
        };
        let idx = inner.fix().index();
        if depth_map.contains_key(&idx) {
            continue;
        }
        let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
        depth_map.insert(idx, depth);
        if depth % 2 == 1 {
            interior.insert(idx);
        }
        queue.push_back((inner.fix(), depth));
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        for edge in cdt.face(face_fix).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let n_idx = neighbor.fix().index();
            if depth_map.contains_key(&n_idx) {
                continue;
            }
            let depth = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(n_idx, depth);
            if depth % 2 == 1 {
                interior.insert(n_idx);
            }
            queue.push_back((neighbor.fix(), depth));
        }
    }
    interior
}
