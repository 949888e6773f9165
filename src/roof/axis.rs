use crate::geometry::{Line, Segment};
use crate::math::{Point2, Vector2};

use super::part::{AutoMode, ConstraintType, EnforcePart, RoofPart};

/// An axis segment with the roof parameters of the part it was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoofAxis {
    pub seg: Segment,
    /// Turn from the parent's direction, radians.
    pub a0: f64,
    /// Node index of the start point.
    pub v0_idx: usize,
    /// Node index of the end point.
    pub v1_idx: usize,
    pub constraint_type: ConstraintType,
    pub width_left: f64,
    pub width_right: f64,
    pub slope_left: f64,
    pub slope_right: f64,
    pub auto_left: AutoMode,
    pub auto_right: AutoMode,
    pub enforce_part: EnforcePart,
    pub triangular_end: bool,
    pub take_precedence: bool,
}

impl RoofAxis {
    /// Wraps `seg` with the parameters of `part`.
    #[must_use]
    pub fn new(seg: impl Into<Segment>, part: &RoofPart) -> Self {
        let enforce_part = match part.constraint_type {
            ConstraintType::Slope => part.enforce_part,
            ConstraintType::Horizontal => EnforcePart::Auto,
        };
        Self {
            seg: seg.into(),
            a0: part.a0,
            v0_idx: 0,
            v1_idx: 0,
            constraint_type: part.constraint_type,
            width_left: part.width_left,
            width_right: part.width_right,
            slope_left: part.slope_left,
            slope_right: part.slope_right,
            auto_left: part.auto_left,
            auto_right: part.auto_right,
            enforce_part,
            triangular_end: part.triangular_end,
            take_precedence: part.take_precedence,
        }
    }

    /// Straight line from start to end point.
    #[must_use]
    pub fn line(&self) -> Line {
        Line::from_points(self.seg.p0(), self.seg.p1())
    }

    /// Line of `length` continuing the end tangent, turned by `a0`.
    #[must_use]
    pub fn branch(&self, a0: f64, length: f64) -> Line {
        let a = self.seg.angle_end();
        Line::new(self.seg.p1(), Vector2::new(a.cos(), a.sin()) * length).rotated(a0)
    }

    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.constraint_type == ConstraintType::Horizontal
    }

    #[must_use]
    pub fn p0(&self) -> Point2 {
        self.seg.p0()
    }

    #[must_use]
    pub fn p1(&self) -> Point2 {
        self.seg.p1()
    }
}
