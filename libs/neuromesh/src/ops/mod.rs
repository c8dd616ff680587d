//! # Mesh Operations
//!
//! Operations that split, combine, and resample meshes, including boolean
//! operations (CSG).

pub mod boolean;
pub mod clean;
pub mod interpolate;
pub mod merge;
pub mod split;

pub use boolean::{boolean_operation, difference, intersection, union, BooleanOperation};
pub use clean::clean;
pub use interpolate::interpolate;
pub use merge::merge;
pub use split::split;
