//! # Neuromesh
//!
//! Triangle meshes for neuron surface rendering: a mesh value type with
//! list / strip / fan topology, per-vertex attributes, and the geometry
//! kernels that build and combine them.
//!
//! ## Architecture
//!
//! ```text
//! primitives ─┐
//!             ├─→ Mesh ─→ topology (triangle resolver) ─→ normals / properties
//! ops ────────┘            ↑
//!   split, interpolate, clean, merge, boolean
//! ```
//!
//! ## Algorithms
//!
//! All kernels are pure Rust and single-threaded:
//! - **Topology**: closed enum, pure function table per tag
//! - **Boolean Operations**: BSP trees with solid-leaf classification
//! - **Cleaning**: spatial-hash vertex welding
//! - **Mass Properties**: discrete divergence theorem
//!
//! ## Usage
//!
//! ```rust
//! use neuromesh::{Mesh, NormalWeighting, Topology};
//! use neuromesh::topology::triangle_count;
//! use glam::DVec3;
//!
//! let mut mesh = Mesh::from_vertices(
//!     Topology::TriangleFan,
//!     vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y],
//! );
//! assert_eq!(triangle_count(Topology::TriangleFan, 4), 2);
//! mesh.generate_normals(NormalWeighting::Uniform);
//! assert_eq!(mesh.normals()[0], DVec3::Z);
//! ```

pub mod error;
pub mod mesh;
pub mod normals;
pub mod ops;
pub mod primitives;
pub mod properties;
pub mod topology;

pub use error::{MeshError, MeshResult};
pub use mesh::{BoundingBox, Mesh, Topology};
pub use normals::NormalWeighting;
pub use ops::boolean::{
    boolean_operation, boolean_operation_with, difference, intersection, union, BooleanOperation,
};
pub use ops::{clean, interpolate, merge, split};
pub use properties::MeshProperties;
