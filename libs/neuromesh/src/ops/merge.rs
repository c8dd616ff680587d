//! # Merge
//!
//! Concatenates meshes into one and welds the vertices they share.

use config::constants::CLEAN_TOLERANCE;

use crate::mesh::{Mesh, Topology};
use crate::ops::clean::clean;

/// Merges `meshes` into a single indexed triangle list.
///
/// Any topology is accepted. A per-vertex attribute survives only if every
/// non-empty input carries it. Coincident vertices are merged with
/// [`CLEAN_TOLERANCE`].
///
/// # Example
///
/// ```rust
/// use neuromesh::{merge, Mesh, Topology};
/// use glam::DVec3;
///
/// let a = Mesh::from_vertices(Topology::TriangleList, vec![DVec3::ZERO, DVec3::X, DVec3::Y]);
/// let b = Mesh::from_vertices(Topology::TriangleList, vec![DVec3::Y, DVec3::X, DVec3::ONE]);
/// let merged = merge(&[a, b]);
/// assert_eq!(merged.vertex_count(), 4);
/// assert_eq!(merged.triangle_count(), 2);
/// ```
pub fn merge(meshes: &[Mesh]) -> Mesh {
    let inputs: Vec<&Mesh> = meshes.iter().filter(|m| !m.is_empty()).collect();
    let all = |has: fn(&Mesh) -> bool| inputs.iter().all(|m| has(m));
    let keep_normals = all(|m| !m.normals().is_empty());
    let keep_colors = all(|m| !m.colors().is_empty());
    let keep_tex_1d = all(|m| !m.tex_coords_1d().is_empty());
    let keep_tex_2d = all(|m| !m.tex_coords_2d().is_empty());
    let keep_tex_3d = all(|m| !m.tex_coords_3d().is_empty());

    let mut soup = Mesh::new(Topology::TriangleList);
    for mesh in inputs {
        let mut source = mesh.clone();
        if !keep_normals {
            source.set_normals(Vec::new());
        }
        if !keep_colors {
            source.set_colors(Vec::new());
        }
        if !keep_tex_1d {
            source.set_tex_coords_1d(Vec::new());
        }
        if !keep_tex_2d {
            source.set_tex_coords_2d(Vec::new());
        }
        if !keep_tex_3d {
            source.set_tex_coords_3d(Vec::new());
        }
        for tri in source.triangles() {
            soup.append_triangle(&source, tri);
        }
    }

    log::debug!("merge: {} meshes, {} triangles", meshes.len(), soup.triangle_count());
    clean(&soup, CLEAN_TOLERANCE)
}
