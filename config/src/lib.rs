//! # Config Crate
//!
//! Centralized configuration constants for the mesh and body-annotation
//! crates. Tolerances, tessellation defaults, and annotation-store names
//! live here so the other crates never carry bare literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_SPHERE_RESOLUTION, MIN_SIDES, VERTEX_MATCH_DISTANCE};
//!
//! let distance = 1e-7_f64;
//! assert!(distance <= VERTEX_MATCH_DISTANCE);
//!
//! let requested = 0;
//! let resolution = if requested >= MIN_SIDES { requested } else { DEFAULT_SPHERE_RESOLUTION };
//! assert_eq!(resolution, DEFAULT_SPHERE_RESOLUTION);
//! ```

pub mod constants;

#[cfg(test)]
mod tests;
