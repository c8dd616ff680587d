//! # Sphere Primitive
//!
//! Parametric sphere with latitude (phi) and longitude (theta) resolution
//! and optional angular ranges, producing partial spheres or wedges.
//!
//! ```text
//!            north pole (phi = 0, emitted when start_phi <= 0)
//!           /  |  \
//!   ring j=1   ...          theta runs around +z
//!   ring j=2   ...
//!           \  |  /
//!            south pole (phi = 180, emitted when end_phi >= 180)
//! ```

use config::constants::{DEFAULT_SPHERE_RESOLUTION, MIN_SIDES};
use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{Mesh, Topology};

/// Tessellation parameters. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    /// Number of longitude segments
    pub theta_resolution: u32,
    /// Number of latitude samples, poles included
    pub phi_resolution: u32,
    /// First longitude, clamped to `0..=360`
    pub start_theta: f64,
    /// Last longitude, clamped to `0..=360`; a value below `start_theta`
    /// wraps past 360
    pub end_theta: f64,
    /// First latitude measured from +z, clamped to `0..=180`
    pub start_phi: f64,
    /// Last latitude measured from +z, clamped to `0..=180`
    pub end_phi: f64,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            theta_resolution: DEFAULT_SPHERE_RESOLUTION,
            phi_resolution: DEFAULT_SPHERE_RESOLUTION,
            start_theta: 0.0,
            end_theta: 360.0,
            start_phi: 0.0,
            end_phi: 180.0,
        }
    }
}

impl SphereParams {
    /// Full sphere with equal theta and phi resolution.
    pub fn with_resolution(resolution: u32) -> Self {
        Self {
            theta_resolution: resolution,
            phi_resolution: resolution,
            ..Self::default()
        }
    }
}

/// Creates a sphere (or a part of one) as an indexed triangle list with
/// per-vertex normals.
///
/// # Example
///
/// ```rust
/// use neuromesh::primitives::{create_sphere, SphereParams};
/// use glam::DVec3;
///
/// let sphere = create_sphere(DVec3::ZERO, 1.0, &SphereParams::default()).unwrap();
/// assert_eq!(sphere.vertex_count(), 50);
/// assert_eq!(sphere.triangle_count(), 96);
/// ```
pub fn create_sphere(center: DVec3, radius: f64, params: &SphereParams) -> MeshResult<Mesh> {
    if !(radius > 0.0) {
        return Err(MeshError::degenerate(format!(
            "Sphere radius must be positive: {radius}"
        )));
    }
    if params.theta_resolution < MIN_SIDES || params.phi_resolution < MIN_SIDES {
        return Err(MeshError::degenerate(format!(
            "Sphere resolution must be at least {MIN_SIDES}: theta={}, phi={}",
            params.theta_resolution, params.phi_resolution
        )));
    }

    let start_theta = params.start_theta.clamp(0.0, 360.0);
    let mut end_theta = params.end_theta.clamp(0.0, 360.0);
    if end_theta < start_theta {
        end_theta += 360.0;
    }
    let phi_a = params.start_phi.clamp(0.0, 180.0);
    let phi_b = params.end_phi.clamp(0.0, 180.0);
    let (start_phi, end_phi) = (phi_a.min(phi_b), phi_a.max(phi_b));

    let north = start_phi <= 0.0;
    let south = end_phi >= 180.0;
    let (start_phi, end_phi) = (start_phi.to_radians(), end_phi.to_radians());
    let num_poles = u32::from(north) + u32::from(south);

    let closed = (end_theta - start_theta) >= 360.0;
    let theta_segments = params.theta_resolution;
    let columns = if closed { theta_segments } else { theta_segments + 1 };
    let delta_theta = (end_theta - start_theta).to_radians() / theta_segments as f64;
    let delta_phi = (end_phi - start_phi) / (params.phi_resolution - 1) as f64;
    let rows = params.phi_resolution - num_poles;

    let mut vertices = Vec::with_capacity((num_poles + rows * columns) as usize);
    let mut normals = Vec::with_capacity(vertices.capacity());

    if north {
        vertices.push(center + DVec3::Z * radius);
        normals.push(DVec3::Z);
    }
    if south {
        vertices.push(center - DVec3::Z * radius);
        normals.push(-DVec3::Z);
    }

    let j_start = u32::from(north);
    let j_end = if south {
        params.phi_resolution - 1
    } else {
        params.phi_resolution
    };
    for i in 0..columns {
        let theta = start_theta.to_radians() + i as f64 * delta_theta;
        for j in j_start..j_end {
            let phi = start_phi + j as f64 * delta_phi;
            let ring = radius * phi.sin();
            let offset = DVec3::new(ring * theta.cos(), ring * theta.sin(), radius * phi.cos());
            vertices.push(center + offset);
            normals.push(offset / radius);
        }
    }

    let base = rows * columns;
    let wrap = |k: u32| k % base;
    let mut indices = Vec::new();

    if north {
        for i in 0..theta_segments {
            indices.extend_from_slice(&[
                rows * i + num_poles,
                wrap(rows * (i + 1)) + num_poles,
                0,
            ]);
        }
    }
    if south {
        let offset = rows - 1 + num_poles;
        for i in 0..theta_segments {
            indices.extend_from_slice(&[
                rows * i + offset,
                num_poles - 1,
                wrap(rows * (i + 1)) + offset,
            ]);
        }
    }
    for i in 0..theta_segments {
        for j in 0..rows.saturating_sub(1) {
            let p0 = rows * i + j + num_poles;
            let p2 = wrap(rows * (i + 1) + j) + num_poles + 1;
            indices.extend_from_slice(&[p0, p0 + 1, p2]);
            indices.extend_from_slice(&[p0, p2, p2 - 1]);
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
    use approx::assert_relative_eq;

    #[test]
    fn test_default_sphere_counts() {
        let sphere = create_sphere(DVec3::ZERO, 1.0, &SphereParams::default()).unwrap();
        assert_eq!(sphere.vertex_count(), 2 + 8 * 6);
        assert_eq!(sphere.triangle_count(), 8 + 8 + 8 * 5 * 2);
        assert!(sphere.validate().is_ok());
    }

    #[test]
    fn test_sphere_points_on_surface() {
        let center = DVec3::new(1.0, -2.0, 3.0);
        let sphere = create_sphere(center, 2.5, &SphereParams::with_resolution(12)).unwrap();
        for (v, n) in sphere.vertices().iter().zip(sphere.normals()) {
            assert_relative_eq!((*v - center).length(), 2.5, epsilon = 1e-12);
            assert_relative_eq!(*n, (*v - center) / 2.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sphere_faces_outward() {
        let sphere = create_sphere(DVec3::ZERO, 1.0, &SphereParams::with_resolution(10)).unwrap();
        for tri in sphere.triangles() {
            let [a, b, c] = tri.map(|i| sphere.vertices()[i as usize]);
            assert!(face_normal(a, b, c).dot(a + b + c) > 0.0, "{tri:?}");
        }
    }

    #[test]
    fn test_hemisphere_has_single_pole() {
        let params = SphereParams {
            end_phi: 90.0,
            ..SphereParams::default()
        };
        let sphere = create_sphere(DVec3::ZERO, 1.0, &params).unwrap();
        assert_eq!(sphere.vertices()[0], DVec3::Z);
        assert_eq!(sphere.vertex_count(), 1 + 8 * 7);
        assert!(sphere.vertices().iter().all(|v| v.z >= -1e-12));
        assert!(sphere.validate().is_ok());
    }

    #[test]
    fn test_reversed_phi_range_keeps_poles() {
        let params = SphereParams {
            start_phi: 180.0,
            end_phi: 0.0,
            ..SphereParams::default()
        };
        let reversed = create_sphere(DVec3::ZERO, 1.0, &params).unwrap();
        let forward = create_sphere(DVec3::ZERO, 1.0, &SphereParams::default()).unwrap();
        assert_eq!(reversed.vertex_count(), forward.vertex_count());
        assert_eq!(reversed.triangle_count(), forward.triangle_count());
        assert_eq!(reversed.vertices()[0], DVec3::Z);
        assert_eq!(reversed.vertices()[1], -DVec3::Z);
        // Only the two poles sit on the z axis.
        let on_axis = reversed
            .vertices()
            .iter()
            .filter(|v| v.truncate().length() < 1e-12)
            .count();
        assert_eq!(on_axis, 2);
    }

    #[test]
    fn test_south_cap_from_reversed_range() {
        let params = SphereParams {
            start_phi: 180.0,
            end_phi: 90.0,
            ..SphereParams::default()
        };
        let sphere = create_sphere(DVec3::ZERO, 1.0, &params).unwrap();
        assert_eq!(sphere.vertices()[0], -DVec3::Z);
        assert_eq!(sphere.vertex_count(), 1 + 8 * 7);
        assert!(sphere.vertices().iter().all(|v| v.z <= 1e-12));
        assert!(sphere.validate().is_ok());
    }

    #[test]
    fn test_wedge_adds_seam_column() {
        let params = SphereParams {
            end_theta: 90.0,
            ..SphereParams::default()
        };
        let sphere = create_sphere(DVec3::ZERO, 1.0, &params).unwrap();
        assert_eq!(sphere.vertex_count(), 2 + 9 * 6);
        assert_eq!(sphere.triangle_count(), 8 + 8 + 8 * 5 * 2);
        assert!(sphere.validate().is_ok());
        for v in sphere.vertices() {
            assert!(v.x >= -1e-12 && v.y >= -1e-12);
        }
    }

    #[test]
    fn test_sphere_invalid_parameters() {
        assert!(create_sphere(DVec3::ZERO, 0.0, &SphereParams::default()).is_err());
        assert!(create_sphere(DVec3::ZERO, 1.0, &SphereParams::with_resolution(2)).is_err());
    }
}
