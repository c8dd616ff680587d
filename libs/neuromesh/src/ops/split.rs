//! # Split
//!
//! Partitions a mesh into independent meshes of bounded triangle count.

use crate::error::{MeshError, MeshResult};
use crate::mesh::{Mesh, Topology};

/// Splits `mesh` into consecutive chunks of at most `max_triangles`
/// triangles.
///
/// Each chunk is an unindexed triangle list holding its own copy of the
/// referenced vertices and every attribute the source carries. A mesh with
/// `t` triangles yields `ceil(t / max_triangles)` chunks.
///
/// # Errors
///
/// Returns an error when `max_triangles` is zero.
///
/// # Example
///
/// ```rust
/// use neuromesh::{split, Mesh, Topology};
/// use glam::DVec3;
///
/// let fan = Mesh::from_vertices(
///     Topology::TriangleFan,
///     vec![DVec3::ZERO, DVec3::X, DVec3::ONE, DVec3::Y, DVec3::NEG_X],
/// );
/// let parts = split(&fan, 2).unwrap();
/// assert_eq!(parts.len(), 2);
/// assert_eq!(parts[1].triangle_count(), 1);
/// ```
pub fn split(mesh: &Mesh, max_triangles: usize) -> MeshResult<Vec<Mesh>> {
    if max_triangles == 0 {
        return Err(MeshError::degenerate("split needs at least one triangle per chunk"));
    }

    let total = mesh.triangle_count();
    let chunks: Vec<Mesh> = (0..total)
        .step_by(max_triangles)
        .map(|start| {
            let mut chunk = Mesh::new(Topology::TriangleList);
            for i in start..total.min(start + max_triangles) {
                chunk.append_triangle(mesh, mesh.triangle_indices(i));
            }
            chunk
        })
        .collect();

    log::debug!(
        "split: {total} triangles into {} meshes of at most {max_triangles}",
        chunks.len()
    );
    Ok(chunks)
}
