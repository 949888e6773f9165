//! Unit tile shapes.
//!
//! A tile spans `x` in `[0, 1]` along the eave and `y` in `[-1, 0]` down the
//! slope; `z` is scaled by the tile thickness.

use crate::math::{Point2, Point3};

/// Tile shape laid by the covering emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileModel {
    Braas1,
    #[default]
    Braas2,
    Eternit,
    Lauze,
    Roman,
    Round,
    /// Flat square.
    Placeholder,
    /// Corrugated sheet.
    Ondulee,
    Metal,
}

/// Vertices and polygon faces of one tile.
#[derive(Debug, Clone)]
pub(super) struct TileShape {
    pub points: Vec<Point3>,
    pub faces: Vec<Vec<usize>>,
}

impl TileShape {
    fn from_tables(points: &[[f64; 3]], faces: &[&[usize]]) -> Self {
        Self {
            points: points.iter().map(|&[x, y, z]| Point3::new(x, y, z)).collect(),
            faces: faces.iter().map(|f| f.to_vec()).collect(),
        }
    }

    /// Per face uvs, taken from the unit footprint.
    pub fn uvs(&self) -> Vec<Vec<Point2>> {
        self.faces
            .iter()
            .map(|f| f.iter().map(|&i| Point2::new(self.points[i].x, self.points[i].y)).collect())
            .collect()
    }
}

impl TileModel {
    pub(super) fn shape(self) -> TileShape {
        match self {
            TileModel::Braas1 => TileShape::from_tables(BRAAS1_PTS, BRAAS1_FACES),
            TileModel::Braas2 => TileShape::from_tables(BRAAS2_PTS, BRAAS2_FACES),
            TileModel::Eternit => TileShape::from_tables(ETERNIT_PTS, &[&[0, 1, 3, 5, 4, 2]]),
            TileModel::Lauze => TileShape::from_tables(LAUZE_PTS, &[&[1, 0, 4, 6, 5, 3, 2]]),
            TileModel::Roman => TileShape::from_tables(ROMAN_PTS, ROMAN_FACES),
            TileModel::Round => TileShape::from_tables(ROUND_PTS, &[&[6, 7, 5, 4, 1, 3, 2, 0, 8, 9]]),
            TileModel::Placeholder => TileShape::from_tables(
                &[[0.0, -1.0, 1.0], [1.0, -1.0, 1.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
                &[&[0, 1, 3, 2]],
            ),
            TileModel::Ondulee => ondulee(),
            TileModel::Metal => TileShape::from_tables(METAL_PTS, METAL_FACES),
        }
    }
}

/// Twenty waves: crests at odd columns, the lower row slightly flattened.
fn ondulee() -> TileShape {
    const N: usize = 21;
    let mut points = Vec::with_capacity(2 * N);
    for (y, low, high) in [(-1.0, 0.1, 1.0), (0.0, 0.0, 0.9)] {
        for i in 0..N {
            #[allow(clippy::cast_precision_loss)]
            let x = 0.05 * i as f64;
            points.push(Point3::new(x, y, if i % 2 == 1 { high } else { low }));
        }
    }
    let faces = (0..N - 1).map(|i| vec![i, i + 1, N + i + 1, N + i]).collect();
    TileShape { points, faces }
}

const BRAAS2_PTS: &[[f64; 3]] = &[
    [0.06, -1.0, 1.0],
    [0.19, -1.0, 0.5],
    [0.31, -1.0, 0.5],
    [0.44, -1.0, 1.0],
    [0.56, -1.0, 1.0],
    [0.69, -1.0, 0.5],
    [0.81, -1.0, 0.5],
    [0.94, -1.0, 1.0],
    [0.06, 0.0, 0.5],
    [0.19, 0.0, 0.0],
    [0.31, 0.0, 0.0],
    [0.44, 0.0, 0.5],
    [0.56, 0.0, 0.5],
    [0.69, 0.0, 0.0],
    [0.81, 0.0, 0.0],
    [0.94, 0.0, 0.5],
    [0.0, -1.0, 1.0],
    [0.0, 0.0, 0.5],
    [1.0, -1.0, 1.0],
    [1.0, 0.0, 0.5],
];

const BRAAS2_FACES: &[&[usize]] = &[
    &[16, 0, 8, 17],
    &[0, 1, 9, 8],
    &[1, 2, 10, 9],
    &[2, 3, 11, 10],
    &[3, 4, 12, 11],
    &[4, 5, 13, 12],
    &[5, 6, 14, 13],
    &[6, 7, 15, 14],
    &[7, 18, 19, 15],
];

const BRAAS1_PTS: &[[f64; 3]] = &[
    [0.1, -1.0, 1.0],
    [0.2, -1.0, 0.5],
    [0.6, -1.0, 0.5],
    [0.7, -1.0, 1.0],
    [0.1, 0.0, 0.5],
    [0.2, 0.0, 0.0],
    [0.6, 0.0, 0.0],
    [0.7, 0.0, 0.5],
    [0.0, -1.0, 1.0],
    [0.0, 0.0, 0.5],
    [1.0, -1.0, 1.0],
    [1.0, 0.0, 0.5],
];

const BRAAS1_FACES: &[&[usize]] = &[
    &[8, 0, 4, 9],
    &[0, 1, 5, 4],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[3, 10, 11, 7],
];

const ETERNIT_PTS: &[[f64; 3]] = &[
    [0.11, -1.0, 1.0],
    [0.9, -1.0, 1.0],
    [0.0, -0.79, 0.79],
    [1.0, -0.79, 0.79],
    [0.0, 2.0, -2.0],
    [1.0, 2.0, -2.0],
];

const METAL_PTS: &[[f64; 3]] = &[
    [0.0, -1.0, 0.0],
    [0.99, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [0.0, 0.0, 0.0],
    [0.99, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.99, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.99, 0.0, 1.0],
];

const METAL_FACES: &[&[usize]] = &[&[0, 1, 4, 3], &[7, 2, 5, 8], &[1, 6, 9, 4], &[6, 7, 8, 9]];

const LAUZE_PTS: &[[f64; 3]] = &[
    [0.75, -0.8, 0.8],
    [0.5, -1.0, 1.0],
    [0.25, -0.8, 0.8],
    [0.0, -0.5, 0.5],
    [1.0, -0.5, 0.5],
    [0.0, 0.5, -0.5],
    [1.0, 0.5, -0.5],
];

const ROMAN_PTS: &[[f64; 3]] = &[
    [0.18, 0.0, 0.3],
    [0.24, 0.0, 0.58],
    [0.76, 0.0, 0.58],
    [0.82, 0.0, 0.3],
    [0.05, -1.0, 0.5],
    [0.14, -1.0, 0.8],
    [0.86, -1.0, 0.8],
    [0.95, -1.0, 0.5],
    [0.45, 0.0, 0.5],
    [0.36, 0.0, 0.2],
    [-0.36, 0.0, 0.2],
    [-0.45, 0.0, 0.5],
    [0.32, -1.0, 0.7],
    [0.26, -1.0, 0.42],
    [-0.26, -1.0, 0.42],
    [-0.32, -1.0, 0.7],
    [0.5, 0.0, 0.74],
    [0.5, -1.0, 1.0],
    [0.0, -1.0, 0.26],
    [0.0, 0.0, 0.0],
];

const ROMAN_FACES: &[&[usize]] = &[
    &[0, 4, 5, 1],
    &[16, 17, 6, 2],
    &[2, 6, 7, 3],
    &[13, 12, 8, 9],
    &[18, 13, 9, 19],
    &[15, 14, 10, 11],
    &[14, 18, 19, 10],
    &[1, 5, 17, 16],
];

const ROUND_PTS: &[[f64; 3]] = &[
    [0.0, -0.5, 0.5],
    [1.0, -0.5, 0.5],
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.93, -0.71, 0.71],
    [0.78, -0.88, 0.88],
    [0.39, -0.97, 0.97],
    [0.61, -0.97, 0.97],
    [0.07, -0.71, 0.71],
    [0.22, -0.88, 0.88],
];
