use super::{cross_2d, Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dp = p2 - p1;
    let t = cross_2d(&dp, d2) / cross;
    let u = cross_2d(&dp, d1) / cross;
    Some((t, u))
}

/// Intersection of the infinite line `p + t * d` with a circle.
///
/// Returns the line parameters of the roots, in increasing order. A tangent
/// line yields a single root; a miss yields none.
#[must_use]
pub fn line_circle_intersect_2d(p: &Point2, d: &Vector2, center: &Point2, radius: f64) -> Vec<f64> {
    let a = d.norm_squared();
    if a < TOLERANCE * TOLERANCE {
        return Vec::new();
    }

    // Substitute parametric line into circle equation:
    // |p + t*d - c|² = r²
    let f = p - center;
    let b = 2.0 * f.dot(d);
    let c = f.norm_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < -TOLERANCE {
        return Vec::new();
    }
    let disc_sqrt = discriminant.max(0.0).sqrt();
    if disc_sqrt < TOLERANCE * 100.0 {
        // Tangent case: single root.
        vec![-b / (2.0 * a)]
    } else {
        vec![(-b - disc_sqrt) / (2.0 * a), (-b + disc_sqrt) / (2.0 * a)]
    }
}

/// Intersection points of two circles.
///
/// Returns no point for concentric, disjoint or nested circles, one point
/// when they touch, two otherwise. The first point lies on the right of the
/// `c1 → c2` direction.
#[must_use]
pub fn circle_circle_intersect_2d(c1: &Point2, r1: f64, c2: &Point2, r2: f64) -> Vec<Point2> {
    if r1 < TOLERANCE || r2 < TOLERANCE {
        return Vec::new();
    }

    let dc = c2 - c1;
    let dist_sq = dc.norm_squared();
    let dist = dist_sq.sqrt();

    if dist < TOLERANCE {
        return Vec::new();
    }

    let sum = r1 + r2;
    let diff = (r1 - r2).abs();
    if dist > sum + TOLERANCE || dist < diff - TOLERANCE {
        return Vec::new();
    }

    // Distance from c1 along the line c1→c2 to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();

    let mid = c1 + dc * (a / dist);
    let right = Vector2::new(dc.y, -dc.x) / dist;

    if h < TOLERANCE {
        vec![mid]
    } else {
        vec![mid + right * h, mid - right * h]
    }
}
