use super::Segment;

/// Role of a boundary segment in a roof pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Ridge line the pitch hangs from.
    Axis,
    /// Free gable side.
    Side,
    /// Eave, opposite the axis.
    Bottom,
    /// Shared with a neighbour pitch at a right angle.
    Link,
    /// Shared with a neighbour pitch on a convex corner.
    LinkHip,
    /// Shared with a neighbour pitch on a concave corner.
    LinkValley,
}

/// A boundary segment tagged with its roof role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub seg: Segment,
    pub kind: EdgeKind,
    /// Whether the segment was contributed by a cutter.
    pub is_hole: bool,
}

impl Edge {
    #[must_use]
    pub fn new(seg: impl Into<Segment>, kind: EdgeKind) -> Self {
        Self {
            seg: seg.into(),
            kind,
            is_hole: false,
        }
    }

    /// Whether the edge is shared with another pitch.
    #[must_use]
    pub fn is_link(&self) -> bool {
        matches!(self.kind, EdgeKind::Link | EdgeKind::LinkHip | EdgeKind::LinkValley)
    }
}
