pub mod edge;
pub mod segment;

pub use edge::{Edge, EdgeKind};
pub use segment::{Arc, Intersection, Line, Projection, Segment};
