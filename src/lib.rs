pub mod emit;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod roof;
pub mod tessellation;
pub mod topology;

pub use error::{Result, RoofgenError};
