//! # Clean
//!
//! Welds coincident vertices, drops triangles that collapse under the weld,
//! and removes vertices no triangle references.

use std::collections::HashMap;

use glam::DVec3;

use crate::mesh::{Mesh, Topology};

/// Returns a cleaned copy of `mesh` as an indexed triangle list.
///
/// Vertices closer than `tolerance` are merged into the first of them, which
/// keeps its attributes. A `tolerance` of zero or less merges only exactly
/// equal positions.
///
/// # Example
///
/// ```rust
/// use neuromesh::{clean, Mesh, Topology};
/// use glam::DVec3;
///
/// // Two triangles sharing an edge, stored without sharing vertices.
/// let soup = Mesh::from_vertices(
///     Topology::TriangleList,
///     vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Y, DVec3::X, DVec3::ONE],
/// );
/// let cleaned = clean(&soup, 0.0);
/// assert_eq!(cleaned.vertex_count(), 4);
/// assert_eq!(cleaned.triangle_count(), 2);
/// ```
pub fn clean(mesh: &Mesh, tolerance: f64) -> Mesh {
    let remap = if tolerance > 0.0 {
        weld_within(mesh.vertices(), tolerance)
    } else {
        weld_exact(mesh.vertices())
    };

    let total = mesh.triangle_count();
    let mut faces: Vec<[u32; 3]> = mesh
        .triangles()
        .map(|tri| tri.map(|i| remap[i as usize]))
        .filter(|[a, b, c]| a != b && b != c && a != c)
        .collect();

    // Compact to referenced vertices in order of first use.
    let mut new_index = vec![u32::MAX; mesh.vertex_count()];
    let mut kept: Vec<usize> = Vec::new();
    for face in &mut faces {
        for corner in face.iter_mut() {
            let old = *corner as usize;
            if new_index[old] == u32::MAX {
                new_index[old] = kept.len() as u32;
                kept.push(old);
            }
            *corner = new_index[old];
        }
    }

    log::debug!(
        "clean: {} -> {} vertices, {} of {} triangles dropped",
        mesh.vertex_count(),
        kept.len(),
        total - faces.len(),
        total
    );

    let vertices = pick(mesh.vertices(), &kept);
    let indices = faces.into_iter().flatten().collect();
    let mut result = Mesh::from_indexed(Topology::TriangleList, vertices, indices);
    result.set_normals(pick(mesh.normals(), &kept));
    result.set_colors(pick(mesh.colors(), &kept));
    result.set_tex_coords_1d(pick(mesh.tex_coords_1d(), &kept));
    result.set_tex_coords_2d(pick(mesh.tex_coords_2d(), &kept));
    result.set_tex_coords_3d(pick(mesh.tex_coords_3d(), &kept));
    result
}

/// Gathers `values[i]` for every `i` in `order`; an absent attribute stays
/// absent.
fn pick<T: Copy>(values: &[T], order: &[usize]) -> Vec<T> {
    if values.is_empty() {
        return Vec::new();
    }
    order.iter().map(|&i| values[i]).collect()
}

/// Maps each vertex to the first vertex with bit-identical coordinates.
fn weld_exact(vertices: &[DVec3]) -> Vec<u32> {
    let mut seen: HashMap<[u64; 3], u32> = HashMap::with_capacity(vertices.len());
    vertices
        .iter()
        .enumerate()
        .map(|(i, v)| {
            // Adding zero folds -0.0 into 0.0.
            let key = (*v + DVec3::ZERO).to_array().map(f64::to_bits);
            *seen.entry(key).or_insert(i as u32)
        })
        .collect()
}

/// Maps each vertex to the first earlier representative within `tolerance`.
///
/// Representatives are bucketed in a grid with cell size `tolerance`, so a
/// match can only sit in the 27 cells around the query.
fn weld_within(vertices: &[DVec3], tolerance: f64) -> Vec<u32> {
    let cell = |v: DVec3| -> [i64; 3] { (v / tolerance).floor().to_array().map(|c| c as i64) };
    let tol_sq = tolerance * tolerance;
    let mut grid: HashMap<[i64; 3], Vec<u32>> = HashMap::new();
    let mut remap = Vec::with_capacity(vertices.len());

    for (i, v) in vertices.iter().enumerate() {
        let [cx, cy, cz] = cell(*v);
        let mut found = None;
        'search: for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = grid.get(&[cx + dx, cy + dy, cz + dz]) else {
                        continue;
                    };
                    if let Some(&rep) = bucket
                        .iter()
                        .find(|&&rep| vertices[rep as usize].distance_squared(*v) <= tol_sq)
                    {
                        found = Some(rep);
                        break 'search;
                    }
                }
            }
        }
        let rep = found.unwrap_or_else(|| {
            grid.entry([cx, cy, cz]).or_default().push(i as u32);
            i as u32
        });
        remap.push(rep);
    }
    remap
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_exact_clean_shares_vertices() {
        let soup = Mesh::from_vertices(
            Topology::TriangleList,
            vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Y, DVec3::X, DVec3::ONE],
        );
        let cleaned = clean(&soup, 0.0);
        assert_eq!(cleaned.vertices(), &[DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::ONE]);
        assert_eq!(cleaned.indices(), &[0, 1, 2, 2, 1, 3]);
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let soup = Mesh::from_vertices(
            Topology::TriangleList,
            vec![DVec3::new(-0.0, 0.0, 0.0), DVec3::X, DVec3::Y, DVec3::ZERO, DVec3::Y, DVec3::NEG_X],
        );
        assert_eq!(clean(&soup, 0.0).vertex_count(), 4);
    }

    #[test]
    fn test_tolerance_collapses_sliver() {
        let soup = Mesh::from_vertices(
            Topology::TriangleList,
            vec![
                DVec3::ZERO,
                DVec3::X,
                DVec3::Y,
                DVec3::ZERO,
                DVec3::new(1e-7, 0.0, 0.0),
                DVec3::Z,
            ],
        );
        let exact = clean(&soup, 0.0);
        assert_eq!(exact.triangle_count(), 2);

        let welded = clean(&soup, 1e-6);
        assert_eq!(welded.triangle_count(), 1);
        assert_eq!(welded.vertex_count(), 3);
    }

    #[test]
    fn test_clean_keeps_representative_attributes() {
        let mut soup = Mesh::from_vertices(
            Topology::TriangleList,
            vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::X, DVec3::ONE, DVec3::Y],
        );
        let colors = (0..6).map(|i| Vec4::splat(i as f32)).collect();
        soup.set_colors(colors);
        let cleaned = clean(&soup, 0.0);
        assert_eq!(cleaned.colors(), &[Vec4::splat(0.0), Vec4::splat(1.0), Vec4::splat(2.0), Vec4::splat(4.0)]);
        assert!(cleaned.normals().is_empty());
        assert!(cleaned.validate().is_ok());
    }

    #[test]
    fn test_clean_converts_strip() {
        let strip = Mesh::from_vertices(
            Topology::TriangleStrip,
            vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::ONE],
        );
        let cleaned = clean(&strip, 0.0);
        assert_eq!(cleaned.topology(), Topology::TriangleList);
        assert_eq!(cleaned.indices(), &[0, 1, 2, 2, 1, 3]);
    }

    #[test]
    fn test_unused_vertices_removed() {
        let mesh = Mesh::from_indexed(
            Topology::TriangleList,
            vec![DVec3::splat(9.0), DVec3::ZERO, DVec3::X, DVec3::Y],
            vec![1, 2, 3],
        );
        let cleaned = clean(&mesh, 0.0);
        assert_eq!(cleaned.vertices(), &[DVec3::ZERO, DVec3::X, DVec3::Y]);
    }
}
