mod tessellate_pitch;

pub use tessellate_pitch::TessellatePitch;

use crate::math::{Point2, Point3, Vector3};
use crate::operations::boolean::FLATTEN_STEP;

/// Parameters controlling tessellation quality.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Angle swept by each straight piece when an arc is flattened.
    pub step_angle: f64,
    /// Ridge altitude the pitch surfaces hang from.
    pub z: f64,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            step_angle: FLATTEN_STEP,
            z: 0.0,
        }
    }
}

/// A triangle mesh approximation of a surface.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Sum of the triangle areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.indices
            .iter()
            .map(|&[a, b, c]| {
                let p0 = self.vertices[a as usize];
                let e1 = self.vertices[b as usize] - p0;
                let e2 = self.vertices[c as usize] - p0;
                e1.cross(&e2).norm() * 0.5
            })
            .sum()
    }
}
