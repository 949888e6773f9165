use crate::math::Point2;

/// How an axis segment constrains the roof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstraintType {
    /// A ridge or eave line carrying a left and a right pitch.
    #[default]
    Horizontal,
    /// A slope direction hint with no surface of its own.
    Slope,
}

/// Which of width and slope a pitch derives from its neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoMode {
    /// Copy both width and slope.
    #[default]
    Auto,
    /// Keep the width, derive the slope.
    Width,
    /// Keep the slope, derive the width.
    Slope,
    /// Keep both, snap the eave to the own width.
    All,
}

impl AutoMode {
    /// Whether the mode lets the slope be inherited.
    #[must_use]
    pub fn inherits_slope(self) -> bool {
        matches!(self, AutoMode::Auto | AutoMode::Width)
    }

    /// Whether the mode lets the width be inherited.
    #[must_use]
    pub fn inherits_width(self) -> bool {
        matches!(self, AutoMode::Auto | AutoMode::Slope)
    }
}

/// Forced link type for a slope part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnforcePart {
    #[default]
    Auto,
    Valley,
    Hip,
}

/// Side of an axis a pitch lies on, looking along the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// One user-drawn part of a roof.
///
/// Parts form a tree: each one hangs from the end of part `bound_idx - 1`,
/// turned by `a0` from that part's direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoofPart {
    /// Turn from the parent's direction, radians.
    pub a0: f64,
    pub length: f64,
    /// One past the parent index; `0` starts at the roof origin.
    pub bound_idx: usize,
    pub width_left: f64,
    pub width_right: f64,
    pub slope_left: f64,
    pub slope_right: f64,
    pub auto_left: AutoMode,
    pub auto_right: AutoMode,
    pub triangular_end: bool,
    /// Makes this part the precedence pitch at its start node.
    pub take_precedence: bool,
    pub constraint_type: ConstraintType,
    pub enforce_part: EnforcePart,
}

impl Default for RoofPart {
    fn default() -> Self {
        Self {
            a0: 0.0,
            length: 4.0,
            bound_idx: 0,
            width_left: 3.0,
            width_right: 3.0,
            slope_left: 0.3,
            slope_right: 0.3,
            auto_left: AutoMode::Auto,
            auto_right: AutoMode::Auto,
            triangular_end: false,
            take_precedence: false,
            constraint_type: ConstraintType::Horizontal,
            enforce_part: EnforcePart::Auto,
        }
    }
}

/// Roof wide settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoofSettings {
    /// Start of the first part.
    pub origin: Point2,
    /// Altitude of the ridge.
    pub z: f64,
    pub width_left: f64,
    pub width_right: f64,
    pub slope_left: f64,
    pub slope_right: f64,
    /// The roof hangs from a parent roof; no triangular end on its start side.
    pub is_t_child: bool,
}

impl Default for RoofSettings {
    fn default() -> Self {
        Self {
            origin: Point2::origin(),
            z: 3.0,
            width_left: 3.0,
            width_right: 3.0,
            slope_left: 0.5,
            slope_right: 0.5,
            is_t_child: false,
        }
    }
}
