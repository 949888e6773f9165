use crate::geometry::{Edge, EdgeKind};
use crate::math::{lift, Point2};
use crate::roof::{neighbour, RoofGenerator, RoofPolygon};

use super::params::{BargeboardParams, FasciaParams};
use super::{eave_end, material, RoofMesh};

/// Eave boards along every `BOTTOM` edge, holes included.
pub fn fascia(roof: &RoofGenerator, params: &FasciaParams, mesh: &mut RoofMesh) {
    for (_, pan) in roof.pitches() {
        for boundary in std::iter::once(&pan.segs).chain(&pan.holes) {
            for (i, s) in boundary.iter().enumerate() {
                if s.kind == EdgeKind::Bottom {
                    fascia_board(roof.z(), pan, boundary, i, params, mesh);
                }
            }
        }
    }
}

fn fascia_board(z: f64, pan: &RoofPolygon, boundary: &[Edge], i: usize, params: &FasciaParams, mesh: &mut RoofMesh) {
    let s = &boundary[i].seg;
    let inner = params.offset;
    let outer = params.offset + params.width;
    let s0 = s.offset(inner);
    let s1 = s.offset(outer);
    let (start_in, start_out) = eave_end(pan, boundary, i, false, inner, outer);
    let (end_in, end_out) = eave_end(pan, boundary, i, true, inner, outer);

    let p0 = s0.intersect(&start_in).hit().unwrap_or_else(|| s0.p0());
    let p1 = s1.intersect(&start_out).hit().unwrap_or_else(|| s1.p0());
    let p2 = s1.intersect(&end_out).hit().unwrap_or_else(|| s1.p1());
    let p3 = s0.intersect(&end_in).hit().unwrap_or_else(|| s0.p1());

    let top = [p0, p1, p2, p3].map(|p| lift(&p, z + params.altitude + pan.altitude(&p)));
    mesh.add_block(top, params.height, material::FASCIA);
}

/// Gable boards along every `SIDE` edge, holes included.
pub fn bargeboard(roof: &RoofGenerator, params: &BargeboardParams, mesh: &mut RoofMesh) {
    for (_, pan) in roof.pitches() {
        for boundary in std::iter::once(&pan.segs).chain(&pan.holes) {
            for (i, s) in boundary.iter().enumerate() {
                if s.kind == EdgeKind::Side {
                    gable_board(roof.z(), pan, boundary, i, params, mesh);
                }
            }
        }
    }
}

fn gable_board(z: f64, pan: &RoofPolygon, boundary: &[Edge], i: usize, params: &BargeboardParams, mesh: &mut RoofMesh) {
    let s = &boundary[i].seg;
    let inner = params.offset - params.width;
    let outer = params.offset;
    let s0 = s.offset(inner);
    let s1 = s.offset(outer);
    let (mut p0, mut p1, mut p2, mut p3) = (s0.p0(), s1.p0(), s0.p1(), s1.p1());

    // the board follows a gable neighbour, and stops on anything else but an eave
    let clip = |other: &Edge, a: &mut Point2, b: &mut Point2| match other.kind {
        EdgeKind::Side => {
            if let Some(p) = other.seg.offset(inner).intersect(&s0).hit() {
                *a = p;
            }
            if let Some(p) = other.seg.offset(outer).intersect(&s1).hit() {
                *b = p;
            }
        }
        EdgeKind::Bottom => {}
        _ => {
            if let Some(p) = other.seg.intersect(&s0).hit() {
                *a = p;
            }
            if let Some(p) = other.seg.intersect(&s1).hit() {
                *b = p;
            }
        }
    };
    clip(neighbour(boundary, i, false), &mut p0, &mut p1);
    clip(neighbour(boundary, i, true), &mut p2, &mut p3);

    let top = [p0, p1, p3, p2].map(|p| lift(&p, z + params.altitude + pan.altitude(&p)));
    mesh.add_block(top, params.height, material::BARGEBOARD);
}
