//! # Box List
//!
//! Many axis-aligned boxes in one indexed triangle list, each face carrying
//! its own four vertices so normals stay flat.

use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{Mesh, Topology};

/// Two triangles over a face quad `[p0, p1, p2, p3]`.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 1, 3];

/// Creates one box per `(llfs[i], urbs[i])` pair of opposite corners.
///
/// Each box contributes 24 vertices and 36 indices, with outward per-face
/// normals.
///
/// # Example
///
/// ```rust
/// use neuromesh::primitives::create_cubes_with_normals;
/// use glam::DVec3;
///
/// let mesh = create_cubes_with_normals(&[DVec3::ZERO], &[DVec3::ONE]).unwrap();
/// assert_eq!(mesh.vertex_count(), 24);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn create_cubes_with_normals(llfs: &[DVec3], urbs: &[DVec3]) -> MeshResult<Mesh> {
    if llfs.len() != urbs.len() {
        return Err(MeshError::length_mismatch(format!(
            "{} lower corners but {} upper corners",
            llfs.len(),
            urbs.len()
        )));
    }

    let mut vertices = Vec::with_capacity(llfs.len() * 24);
    let mut normals = Vec::with_capacity(llfs.len() * 24);
    let mut indices = Vec::with_capacity(llfs.len() * 36);

    for (llf, urb) in llfs.iter().zip(urbs) {
        // p0..p3 lie on the upper z face, p4..p7 on the lower one.
        let corner = |x: f64, y: f64, z: f64| DVec3::new(x, y, z);
        let p0 = corner(llf.x, llf.y, urb.z);
        let p1 = corner(urb.x, llf.y, urb.z);
        let p2 = corner(llf.x, urb.y, urb.z);
        let p3 = corner(urb.x, urb.y, urb.z);
        let p4 = corner(llf.x, llf.y, llf.z);
        let p5 = corner(urb.x, llf.y, llf.z);
        let p6 = corner(llf.x, urb.y, llf.z);
        let p7 = corner(urb.x, urb.y, llf.z);

        let back = (p4 - p0).normalize_or_zero();
        let right = (p5 - p4).normalize_or_zero();
        let down = (p4 - p6).normalize_or_zero();

        let faces = [
            ([p0, p1, p2, p3], -back),
            ([p2, p3, p6, p7], -down),
            ([p4, p0, p6, p2], -right),
            ([p7, p3, p5, p1], right),
            ([p4, p5, p0, p1], down),
            ([p6, p7, p4, p5], back),
        ];

        for (quad, normal) in faces {
            let base = vertices.len() as u32;
            vertices.extend_from_slice(&quad);
            normals.extend_from_slice(&[normal; 4]);
            indices.extend(QUAD_INDICES.iter().map(|i| base + i));
        }
    }

    let mut mesh = Mesh::from_indexed(Topology::TriangleList, vertices, indices);
    mesh.set_normals(normals);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normals::face_normal;

    #[test]
    fn test_box_counts() {
        let mesh = create_cubes_with_normals(
            &[DVec3::ZERO, DVec3::splat(5.0)],
            &[DVec3::ONE, DVec3::splat(7.0)],
        )
        .unwrap();
        assert_eq!(mesh.vertex_count(), 48);
        assert_eq!(mesh.indices().len(), 72);
        assert_eq!(mesh.normals().len(), 48);
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.indices()[36], 24);
    }

    #[test]
    fn test_box_winding_matches_normals() {
        let mesh = create_cubes_with_normals(&[DVec3::new(-1.0, -2.0, -3.0)], &[DVec3::new(1.0, 2.0, 3.0)])
            .unwrap();
        let center = DVec3::ZERO;
        for tri in mesh.triangles() {
            let [a, b, c] = tri.map(|i| mesh.vertices()[i as usize]);
            let n = face_normal(a, b, c).normalize();
            let stored = mesh.normals()[tri[0] as usize];
            assert!((n - stored).length() < 1e-12);
            assert!(n.dot(a - center) > 0.0, "face must point away from the box center");
        }
    }

    #[test]
    fn test_box_length_mismatch() {
        let result = create_cubes_with_normals(&[DVec3::ZERO], &[]);
        assert!(matches!(result, Err(MeshError::LengthMismatch { .. })));
    }

    #[test]
    fn test_box_empty_input() {
        let mesh = create_cubes_with_normals(&[], &[]).unwrap();
        assert!(mesh.is_empty());
    }
}
