//! # Boolean Operations
//!
//! CSG boolean operations on closed meshes: union, difference,
//! intersection.
//!
//! | Operation | Result | Example |
//! |-----------|--------|---------|
//! | Union | Combined volume | `A ∪ B` |
//! | Difference | Subtracted volume | `A - B` |
//! | Intersection | Common volume | `A ∩ B` |
//!
//! ## Algorithm
//!
//! ```text
//! 1. Convert both meshes to polygons
//! 2. Build a BSP tree from each operand
//! 3. Cut each operand by the other's tree, keeping the pieces that land
//!    in outside or inside leaves
//! 4. Fan-triangulate the kept pieces
//! 5. Weld coincident vertices and regenerate normals
//! ```
//!
//! - **Union**: (A outside B) + (B outside A)
//! - **Difference**: (A outside B) + (B inside A, reversed)
//! - **Intersection**: (A inside B) + (B inside A)
//!
//! Where the operands share a face plane, only A's piece can survive:
//!
//! | Shared face | Union | Intersection | Difference |
//! |-------------|-------|--------------|------------|
//! | Same facing | A's kept | A's kept | dropped |
//! | Opposite facing | dropped | dropped | A's kept |
//!
//! Inputs are expected to be closed and consistently wound; open inputs
//! produce a best-effort result.

mod bsp;
mod polygon;


use config::constants::GeometryConfig;
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::normals::NormalWeighting;
use crate::ops::clean::clean;
use bsp::{BspTree, CoplanarRoute, Region};
use polygon::{mesh_to_polygons, polygons_to_mesh, BspPolygon};

/// Set operation applied by [`boolean_operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanOperation {
    /// Points in either operand
    Union,
    /// Points in both operands
    Intersection,
    /// Points in the first operand but not the second
    Difference,
}

/// Combines two closed meshes with the default tolerance.
///
/// The result is an indexed triangle list with per-vertex normals.
///
/// # Example
///
/// ```rust
/// use neuromesh::{boolean_operation, BooleanOperation};
/// use neuromesh::primitives::create_cubes_with_normals;
/// use glam::DVec3;
/// let a = create_cubes_with_normals(&[DVec3::ZERO], &[DVec3::ONE]).unwrap();
/// let b = create_cubes_with_normals(&[DVec3::splat(0.5)], &[DVec3::splat(1.5)]).unwrap();
/// let common = boolean_operation(&a, &b, BooleanOperation::Intersection).unwrap();
/// assert!(!common.is_empty());
/// ```
pub fn boolean_operation(a: &Mesh, b: &Mesh, operation: BooleanOperation) -> MeshResult<Mesh> {
    boolean_operation_with(a, b, operation, &GeometryConfig::default())
}

/// Combines two closed meshes using `config.tolerance` for plane
/// classification and vertex welding.
pub fn boolean_operation_with(
    a: &Mesh,
    b: &Mesh,
    operation: BooleanOperation,
    config: &GeometryConfig,
) -> MeshResult<Mesh> {
    a.validate()?;
    b.validate()?;
    let tolerance = config.tolerance;

    let tree_a = BspTree::build(mesh_to_polygons(a), tolerance);
    let tree_b = BspTree::build(mesh_to_polygons(b), tolerance);

    // Coplanar pieces of B always go to the discarded side, so a shared
    // face is never emitted twice.
    let (keep_a, route_a, keep_b, route_b) = match operation {
        BooleanOperation::Union => (
            Region::Outside,
            CoplanarRoute::WithNormal,
            Region::Outside,
            CoplanarRoute::Back,
        ),
        BooleanOperation::Intersection => (
            Region::Inside,
            CoplanarRoute::AgainstNormal,
            Region::Inside,
            CoplanarRoute::Front,
        ),
        BooleanOperation::Difference => (
            Region::Outside,
            CoplanarRoute::AgainstNormal,
            Region::Inside,
            CoplanarRoute::Front,
        ),
    };

    let mut polygons: Vec<BspPolygon> =
        tree_b.clip_polygons(mesh_to_polygons(a), keep_a, route_a, tolerance);
    let mut from_b = tree_a.clip_polygons(mesh_to_polygons(b), keep_b, route_b, tolerance);
    if operation == BooleanOperation::Difference {
        for poly in &mut from_b {
            poly.flip();
        }
    }
    log::debug!(
        "{operation:?}: tree depths {}/{}, {} pieces from first operand, {} from second",
        tree_a.depth(),
        tree_b.depth(),
        polygons.len(),
        from_b.len()
    );
    polygons.extend(from_b);

    let soup = polygons_to_mesh(&polygons);
    if soup.vertices().iter().any(|v| !v.is_finite()) {
        return Err(MeshError::boolean_failed(format!(
            "{operation:?} produced non-finite vertices"
        )));
    }

    let mut result = clean(&soup, tolerance);
    result.generate_normals(NormalWeighting::Uniform);
    Ok(result)
}

/// Union of two closed meshes.
pub fn union(a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
    boolean_operation(a, b, BooleanOperation::Union)
}

/// Intersection of two closed meshes.
pub fn intersection(a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
    boolean_operation(a, b, BooleanOperation::Intersection)
}

/// First mesh with the second carved out.
pub fn difference(a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
    boolean_operation(a, b, BooleanOperation::Difference)
}
