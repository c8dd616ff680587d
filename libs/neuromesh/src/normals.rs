//! # Normal Generation
//!
//! Per-vertex normals accumulated from face normals.
//!
//! Degenerate triangles (zero cross product) contribute nothing, and a vertex
//! that ends up with a zero accumulator gets a zero normal rather than NaN.

use glam::DVec3;

use crate::mesh::Mesh;

/// How face normals are weighted when accumulated into vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalWeighting {
    /// Every adjacent face contributes a unit vector.
    #[default]
    Uniform,
    /// Faces contribute proportionally to their area.
    Area,
}

/// Unnormalized face normal `(b - a) × (c - a)`; its length is twice the area.
#[inline]
pub fn face_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    (b - a).cross(c - a)
}

impl Mesh {
    /// Recomputes per-vertex normals from the triangles, replacing any
    /// existing normals.
    ///
    /// # Example
    ///
    /// ```rust
    /// use neuromesh::{Mesh, NormalWeighting, Topology};
    /// use glam::DVec3;
    ///
    /// let mut mesh = Mesh::from_vertices(
    ///     Topology::TriangleList,
    ///     vec![DVec3::ZERO, DVec3::X, DVec3::Y],
    /// );
    /// mesh.generate_normals(NormalWeighting::Uniform);
    /// assert_eq!(mesh.normals()[0], DVec3::Z);
    /// ```
    pub fn generate_normals(&mut self, weighting: NormalWeighting) {
        let mut normals = vec![DVec3::ZERO; self.vertex_count()];
        let mut degenerate = 0usize;

        for [i0, i1, i2] in self.triangles() {
            let [a, b, c] = [i0, i1, i2].map(|i| self.vertices()[i as usize]);
            let mut normal = face_normal(a, b, c);
            if normal == DVec3::ZERO {
                degenerate += 1;
                continue;
            }
            if weighting == NormalWeighting::Uniform {
                normal = normal.normalize();
            }
            normals[i0 as usize] += normal;
            normals[i1 as usize] += normal;
            normals[i2 as usize] += normal;
        }

        let mut zero = 0usize;
        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
            if *normal == DVec3::ZERO {
                zero += 1;
            }
        }

        if degenerate > 0 {
            log::debug!("skipped {degenerate} degenerate triangles while generating normals");
        }
        if zero > 0 {
            log::warn!("{zero} of {} vertices have no defined normal", normals.len());
        }

        self.set_normals(normals);
    }
}
