//! # Mass Properties
//!
//! Surface area, enclosed volume, and shape index of a closed triangle
//! mesh, computed with the discrete divergence theorem.
//!
//! For each triangle with area `A`, unit normal `n`, and centroid `c`:
//!
//! ```text
//! volume_x   += A * n.x * c.x        (likewise y, z)
//! k_x        += A * n.x^2 / total_area
//! volume      = |k_x volume_x + k_y volume_y + k_z volume_z|
//! volume_projected = sum(A * n . c) / 3
//! ```

use config::constants::SHAPE_INDEX_NORMALIZER;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::mesh::Mesh;
use crate::normals::face_normal;

/// Snapshot of a mesh's mass properties.
///
/// Computed once by [`Mesh::properties`]; it does not follow later edits
/// of the mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshProperties {
    /// Number of vertices
    pub num_vertices: usize,
    /// Number of triangles
    pub num_triangles: usize,
    /// Total triangle area
    pub surface_area: f64,
    /// Smallest triangle area, zero for a mesh without triangles
    pub min_triangle_area: f64,
    /// Largest triangle area
    pub max_triangle_area: f64,
    /// Enclosed volume (always non-negative)
    pub volume: f64,
    /// Signed volume from the divergence theorem; positive when the
    /// triangles face outward
    pub volume_projected: f64,
    /// Volume estimate from the x components of the normals
    pub volume_x: f64,
    /// Volume estimate from the y components of the normals
    pub volume_y: f64,
    /// Volume estimate from the z components of the normals
    pub volume_z: f64,
    /// Share of the surface facing along x
    pub kx: f64,
    /// Share of the surface facing along y
    pub ky: f64,
    /// Share of the surface facing along z
    pub kz: f64,
    /// `sqrt(area) / cbrt(volume)`, scaled so a sphere gives one
    pub normalized_shape_index: f64,
}

/// Triangle area from its edge lengths.
fn heron_area(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    let (la, lb, lc) = (a.distance(b), b.distance(c), c.distance(a));
    let s = 0.5 * (la + lb + lc);
    (s * (s - la) * (s - lb) * (s - lc)).max(0.0).sqrt()
}

impl Mesh {
    /// Computes the mass properties of this mesh.
    ///
    /// Degenerate triangles count toward the triangle statistics but add
    /// nothing to the volumes. Without volume the shape index is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use neuromesh::primitives::create_cubes_with_normals;
    /// use glam::DVec3;
    ///
    /// let cube = create_cubes_with_normals(&[DVec3::ZERO], &[DVec3::splat(2.0)]).unwrap();
    /// let props = cube.properties();
    /// assert!((props.volume - 8.0).abs() < 1e-9);
    /// assert!((props.surface_area - 24.0).abs() < 1e-9);
    /// ```
    pub fn properties(&self) -> MeshProperties {
        let mut props = MeshProperties {
            num_vertices: self.vertex_count(),
            num_triangles: self.triangle_count(),
            min_triangle_area: f64::INFINITY,
            ..MeshProperties::default()
        };
        let mut k = DVec3::ZERO;
        let mut munc = DVec3::ZERO;

        for tri in self.triangles() {
            let [a, b, c] = tri.map(|i| self.vertices()[i as usize]);
            let area = heron_area(a, b, c);
            props.surface_area += area;
            props.min_triangle_area = props.min_triangle_area.min(area);
            props.max_triangle_area = props.max_triangle_area.max(area);

            let n = face_normal(a, b, c).normalize_or_zero();
            let centroid = (a + b + c) / 3.0;
            k += area * n * n;
            munc += area * n * centroid;
            props.volume_projected += area * n.dot(centroid) / 3.0;
        }

        if props.num_triangles == 0 {
            props.min_triangle_area = 0.0;
        }
        if props.surface_area > 0.0 {
            k /= props.surface_area;
        }
        props.kx = k.x;
        props.ky = k.y;
        props.kz = k.z;
        props.volume_x = munc.x;
        props.volume_y = munc.y;
        props.volume_z = munc.z;
        props.volume = k.dot(munc).abs();
        if props.volume > 0.0 {
            props.normalized_shape_index =
                props.surface_area.sqrt() / props.volume.cbrt() / SHAPE_INDEX_NORMALIZER;
        }
        props
    }
}

impl MeshProperties {
    /// Writes every property at `info` level, preceded by `label` when it is
    /// not empty.
    pub fn log(&self, label: &str) {
        if !label.is_empty() {
            log::info!("{label}");
        }
        log::info!("Vertices Number: {}", self.num_vertices);
        log::info!("Triangles Number: {}", self.num_triangles);
        log::info!("Surface Area: {}", self.surface_area);
        log::info!("Min Triangle Area: {}", self.min_triangle_area);
        log::info!("Max Triangle Area: {}", self.max_triangle_area);
        log::info!("Volume: {}", self.volume);
        log::info!("Volume Projected: {}", self.volume_projected);
        log::info!("Volume X: {}", self.volume_x);
        log::info!("Volume Y: {}", self.volume_y);
        log::info!("Volume Z: {}", self.volume_z);
        log::info!("Kx: {}", self.kx);
        log::info!("Ky: {}", self.ky);
        log::info!("Kz: {}", self.kz);
        log::info!("Normalized Shape Index: {}", self.normalized_shape_index);
    }
}
