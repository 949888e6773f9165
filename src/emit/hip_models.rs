//! Hip and ridge tile shapes, centred on the hip line.

use crate::math::{Point2, Point3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HipModel {
    #[default]
    Round,
    Eternit,
    Flat,
}

/// One hip tile, scaled to its size.
#[derive(Debug, Clone)]
pub(super) struct HipShape {
    pub points: Vec<Point3>,
    pub faces: Vec<Vec<usize>>,
    pub uvs: Vec<Vec<Point2>>,
    /// Vertices lying on the left wing, bent down with the pitch.
    pub left: &'static [usize],
    pub right: &'static [usize],
}

impl HipModel {
    pub(super) fn shape(self, sx: f64, sy: f64, sz: f64) -> HipShape {
        let (points, faces, uvs, left, right): (&[[f64; 3]], &[&[usize]], Vec<Vec<Point2>>, &'static [usize], &'static [usize]) =
            match self {
                HipModel::Round => (ROUND_PTS, ROUND_FACES, round_uvs(), &[], &[]),
                HipModel::Eternit => (
                    ETERNIT_PTS,
                    ETERNIT_FACES,
                    table_uvs(ETERNIT_UVS),
                    &[2, 3, 7, 8],
                    &[0, 1, 10, 11],
                ),
                HipModel::Flat => (FLAT_PTS, FLAT_FACES, flat_uvs(), &[], &[]),
            };
        HipShape {
            points: points
                .iter()
                .map(|&[x, y, z]| Point3::new(sx * x, sy * y, sz * z))
                .collect(),
            faces: faces.iter().map(|f| f.to_vec()).collect(),
            uvs,
            left,
            right,
        }
    }
}

fn quad_uv() -> Vec<Point2> {
    table_uv(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
}

fn table_uv(uv: &[[f64; 2]]) -> Vec<Point2> {
    uv.iter().map(|&[u, v]| Point2::new(u, v)).collect()
}

fn table_uvs(uvs: &[&[[f64; 2]]]) -> Vec<Vec<Point2>> {
    uvs.iter().map(|uv| table_uv(uv)).collect()
}

fn round_uvs() -> Vec<Vec<Point2>> {
    (0..ROUND_FACES.len())
        .map(|i| if i == 1 || i == 7 { table_uv(DISC_12) } else { quad_uv() })
        .collect()
}

fn flat_uvs() -> Vec<Vec<Point2>> {
    (0..FLAT_FACES.len())
        .map(|i| if i == 0 || i == 2 { table_uv(DISC_6) } else { quad_uv() })
        .collect()
}

const DISC_12: &[[f64; 2]] = &[
    [0.5, 1.0],
    [0.75, 0.93],
    [0.93, 0.75],
    [1.0, 0.5],
    [0.93, 0.25],
    [0.75, 0.07],
    [0.5, 0.0],
    [0.25, 0.07],
    [0.07, 0.25],
    [0.0, 0.5],
    [0.07, 0.75],
    [0.25, 0.93],
];

const DISC_6: &[[f64; 2]] = &[[0.5, 1.0], [0.93, 0.75], [0.93, 0.25], [0.5, 0.0], [0.07, 0.25], [0.07, 0.75]];

const ROUND_PTS: &[[f64; 3]] = &[
    [-0.5, 0.34, 0.08],
    [-0.5, 0.32, 0.19],
    [0.5, -0.4, -0.5],
    [0.5, 0.4, -0.5],
    [-0.5, 0.26, 0.28],
    [-0.5, 0.16, 0.34],
    [-0.5, 0.05, 0.37],
    [-0.5, -0.05, 0.37],
    [-0.5, -0.16, 0.34],
    [-0.5, -0.26, 0.28],
    [-0.5, -0.32, 0.19],
    [-0.5, -0.34, 0.08],
    [-0.5, -0.25, -0.5],
    [-0.5, 0.25, -0.5],
    [0.5, -0.08, 0.5],
    [0.5, -0.5, 0.08],
    [0.5, -0.24, 0.47],
    [0.5, -0.38, 0.38],
    [0.5, -0.47, 0.24],
    [0.5, 0.5, 0.08],
    [0.5, 0.08, 0.5],
    [0.5, 0.47, 0.24],
    [0.5, 0.38, 0.38],
    [0.5, 0.24, 0.47],
];

const ROUND_FACES: &[&[usize]] = &[
    &[23, 22, 4, 5],
    &[3, 19, 21, 22, 23, 20, 14, 16, 17, 18, 15, 2],
    &[14, 20, 6, 7],
    &[18, 17, 9, 10],
    &[15, 18, 10, 11],
    &[21, 19, 0, 1],
    &[17, 16, 8, 9],
    &[13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 1, 0],
    &[19, 3, 13, 0],
    &[20, 23, 5, 6],
    &[22, 21, 1, 4],
    &[3, 2, 12, 13],
    &[2, 15, 11, 12],
    &[16, 14, 7, 8],
];

const ETERNIT_PTS: &[[f64; 3]] = &[
    [0.5, 0.5, 0.0],
    [-0.5, 0.5, -0.5],
    [0.5, -0.5, 0.0],
    [-0.5, -0.5, -0.5],
    [0.5, 0.0, 0.0],
    [-0.5, 0.0, -0.5],
    [0.5, 0.0, 0.5],
    [0.5, -0.5, 0.5],
    [-0.5, -0.5, 0.0],
    [-0.5, 0.0, 0.0],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.0],
];

const ETERNIT_FACES: &[&[usize]] = &[
    &[4, 2, 3, 5],
    &[0, 4, 5, 1],
    &[6, 9, 8, 7],
    &[10, 11, 9, 6],
    &[0, 10, 6, 4],
    &[5, 9, 11, 1],
    &[2, 7, 8, 3],
    &[1, 11, 10, 0],
    &[4, 6, 7, 2],
    &[3, 8, 9, 5],
];

const ETERNIT_UVS: &[&[[f64; 2]]] = &[
    &[[0.0, 0.5], [0.0, 1.0], [1.0, 1.0], [1.0, 0.5]],
    &[[0.0, 0.0], [0.0, 0.5], [1.0, 0.5], [1.0, 0.0]],
    &[[0.0, 0.5], [1.0, 0.5], [1.0, 1.0], [0.0, 1.0]],
    &[[0.0, 0.0], [1.0, 0.0], [1.0, 0.5], [0.0, 0.5]],
    &[[0.0, 0.5], [0.0, 1.0], [0.5, 1.0], [0.5, 0.5]],
    &[[0.5, 0.5], [0.5, 1.0], [0.0, 1.0], [0.0, 0.5]],
    &[[0.0, 0.5], [0.0, 1.0], [1.0, 1.0], [1.0, 0.5]],
    &[[0.0, 0.5], [0.0, 1.0], [-1.0, 1.0], [-1.0, 0.5]],
    &[[0.5, 0.5], [0.5, 1.0], [1.0, 1.0], [1.0, 0.5]],
    &[[0.0, 0.5], [0.0, 1.0], [-0.5, 1.0], [-0.5, 0.5]],
];

const FLAT_PTS: &[[f64; 3]] = &[
    [-0.5, -0.4, 0.0],
    [-0.5, -0.4, 0.5],
    [-0.5, 0.4, 0.0],
    [-0.5, 0.4, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, -0.5, 1.0],
    [0.5, 0.5, 0.5],
    [0.5, 0.5, 1.0],
    [-0.5, 0.33, 0.0],
    [-0.5, -0.33, 0.0],
    [0.5, -0.33, 0.5],
    [0.5, 0.33, 0.5],
    [-0.5, 0.33, -0.5],
    [-0.5, -0.33, -0.5],
    [0.5, -0.33, -0.5],
    [0.5, 0.33, -0.5],
];

const FLAT_FACES: &[&[usize]] = &[
    &[0, 1, 3, 2, 8, 9],
    &[2, 3, 7, 6],
    &[6, 7, 5, 4, 10, 11],
    &[4, 5, 1, 0],
    &[9, 10, 4, 0],
    &[7, 3, 1, 5],
    &[2, 6, 11, 8],
    &[9, 8, 12, 13],
    &[12, 15, 14, 13],
    &[8, 11, 15, 12],
    &[10, 9, 13, 14],
    &[11, 10, 14, 15],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_model_is_consistent() {
        for model in [HipModel::Round, HipModel::Eternit, HipModel::Flat] {
            let shape = model.shape(0.4, 0.15, 0.15);
            assert_eq!(shape.faces.len(), shape.uvs.len(), "{model:?}");
            for (f, uv) in shape.faces.iter().zip(&shape.uvs) {
                assert_eq!(f.len(), uv.len(), "{model:?}");
                assert!(f.iter().all(|&i| i < shape.points.len()));
            }
            assert!(shape.left.iter().chain(shape.right).all(|&i| i < shape.points.len()));
        }
    }

    #[test]
    fn points_are_scaled() {
        let shape = HipModel::Eternit.shape(2.0, 3.0, 4.0);
        assert_eq!(shape.points[0], Point3::new(1.0, 1.5, 0.0));
    }
}
