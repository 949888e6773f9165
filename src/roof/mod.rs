//! Roof topology: parts, axis nodes, pitches and the generator that binds them.

mod axis;
mod bind;
mod generator;
mod merge;
mod node;
mod part;
mod pitch;
mod slope;
mod triangular;

pub use axis::RoofAxis;
pub use bind::{bind, propagate_backward, propagate_forward, rotate_next_slope, rotate_node_slope};
pub use generator::{FaceLoops, RoofGenerator};
pub use node::{AxisBinding, RoofAxisNode};
pub use part::{AutoMode, ConstraintType, EnforcePart, RoofPart, RoofSettings, Side};
pub use pitch::{RoofPolygon, BOTTOM};

pub(crate) use pitch::neighbour;
