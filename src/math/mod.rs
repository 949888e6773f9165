pub mod arc_2d;
pub mod intersect_2d;
pub mod polygon_2d;

use std::f64::consts::{PI, TAU};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Number of decimals angles are rounded to before equality tests.
pub const ANGLE_DECIMALS: i32 = 4;

/// Normalizes an angle into `(-π, π]`.
#[must_use]
pub fn normalize_angle(a: f64) -> f64 {
    let mut a = a % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Rounds an angle to [`ANGLE_DECIMALS`] decimals.
#[must_use]
pub fn round_angle(a: f64) -> f64 {
    let scale = 10f64.powi(ANGLE_DECIMALS);
    (a * scale).round() / scale
}

/// 2D cross product `a.x * b.y - a.y * b.x`.
#[inline]
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Signed angle from `a` to `b`, clockwise positive.
#[must_use]
pub fn angle_signed(a: &Vector2, b: &Vector2) -> f64 {
    (-cross_2d(a, b)).atan2(a.dot(b))
}

/// Rotates `v` counter-clockwise by `a` radians.
#[must_use]
pub fn rotate_2d(v: &Vector2, a: f64) -> Vector2 {
    let (sa, ca) = a.sin_cos();
    Vector2::new(ca * v.x - sa * v.y, sa * v.x + ca * v.y)
}

/// Lifts a 2D point to 3D at height `z`.
#[inline]
#[must_use]
pub fn lift(p: &Point2, z: f64) -> Point3 {
    Point3::new(p.x, p.y, z)
}
