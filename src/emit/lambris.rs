use crate::error::Result;
use crate::roof::RoofGenerator;
use crate::tessellation::{TessellatePitch, TessellationParams};

use super::params::LambrisParams;
use super::{material, RoofMesh};

/// Ceiling boards: every pitch surface triangulated with its holes, lying
/// `altitude` above the pitch plane.
///
/// # Errors
///
/// Returns an error if a pitch cannot be tessellated.
pub fn lambris(roof: &RoofGenerator, params: &LambrisParams, mesh: &mut RoofMesh) -> Result<()> {
    let tess = TessellationParams {
        z: roof.z() + params.altitude,
        ..TessellationParams::default()
    };
    for (id, _) in roof.pitches() {
        let surface = TessellatePitch::new(id, tess).execute(roof.store())?;
        let f = mesh.verts.len();
        mesh.verts.extend(surface.vertices);
        for tri in surface.indices {
            let uv = tri.iter().map(|&k| surface.uvs[k as usize]).collect();
            mesh.add_face(tri.iter().map(|&k| f + k as usize).collect(), material::LAMBRIS, uv);
        }
    }
    Ok(())
}
