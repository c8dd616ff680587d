//! # Cone Primitive
//!
//! Cones, frusta and cylinders between two arbitrary end points.
//!
//! The end with the smaller radius is treated as the base. A zero base
//! radius collapses the base ring into a single apex vertex. Side normals
//! follow the slanted surface; for equal radii they are purely radial.

use std::f64::consts::TAU;

use config::constants::MIN_SIDES;
use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{Mesh, Topology};

/// Creates a cone or cylinder mesh.
///
/// # Arguments
///
/// * `base`, `base_radius` - Center and radius of one end
/// * `top`, `top_radius` - Center and radius of the other end
/// * `sides` - Number of segments around the axis
/// * `capping` - Close the non-apex ends with flat caps
///
/// # Example
///
/// ```rust
/// use neuromesh::primitives::create_cone;
/// use glam::DVec3;
///
/// let cylinder = create_cone(DVec3::ZERO, 1.0, DVec3::new(0.0, 0.0, 5.0), 1.0, 16, true).unwrap();
/// let cone = create_cone(DVec3::ZERO, 0.0, DVec3::Z, 2.0, 16, false).unwrap();
/// assert!(cylinder.triangle_count() > cone.triangle_count());
/// ```
pub fn create_cone(
    base: DVec3,
    base_radius: f64,
    top: DVec3,
    top_radius: f64,
    sides: u32,
    capping: bool,
) -> MeshResult<Mesh> {
    if base_radius < 0.0 || top_radius < 0.0 {
        return Err(MeshError::degenerate(format!(
            "Cone radii must be non-negative: base={base_radius}, top={top_radius}"
        )));
    }
    if base_radius == 0.0 && top_radius == 0.0 {
        return Err(MeshError::degenerate(
            "Cone must have at least one non-zero radius",
        ));
    }
    if sides < MIN_SIDES {
        return Err(MeshError::degenerate(format!(
            "Cone sides must be at least {MIN_SIDES}: {sides}"
        )));
    }

    let (base, base_radius, top, top_radius) = if base_radius > top_radius {
        (top, top_radius, base, base_radius)
    } else {
        (base, base_radius, top, top_radius)
    };

    let axis = (top - base).try_normalize().ok_or_else(|| {
        MeshError::degenerate(format!("Cone end points coincide: {base}"))
    })?;
    let u = axis.any_orthonormal_vector();
    let v = axis.cross(u);
    let radial: Vec<DVec3> = (0..sides)
        .map(|i| {
            let theta = TAU * i as f64 / sides as f64;
            u * theta.cos() + v * theta.sin()
        })
        .collect();

    let n = sides;
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    if base_radius == 0.0 {
        // Apex at 0, ring at 1..=n.
        vertices.push(base);
        normals.push(-axis);
        for dir in &radial {
            let tpt = top + *dir * top_radius;
            vertices.push(tpt);
            normals.push(slant_normal(tpt - base, tpt - top));
        }
        for i in 1..=n {
            let next = if i < n { i + 1 } else { 1 };
            indices.extend_from_slice(&[0, next, i]);
        }
        if capping {
            push_cap(&mut vertices, &mut normals, &mut indices, top, top_radius, &radial, axis);
        }
    } else {
        // Interleaved rings: top_i at 2i, base_i at 2i + 1.
        let slanted = top_radius != base_radius;
        for dir in &radial {
            let bpt = base + *dir * base_radius;
            let tpt = top + *dir * top_radius;
            let normal = if slanted {
                slant_normal(tpt - bpt, tpt - top)
            } else {
                *dir
            };
            vertices.extend_from_slice(&[tpt, bpt]);
            normals.extend_from_slice(&[normal, normal]);
        }
        let count = 2 * n;
        for i in (0..count).step_by(2) {
            indices.extend_from_slice(&[i, i + 1, (i + 3) % count]);
            indices.extend_from_slice(&[i, (i + 3) % count, (i + 2) % count]);
        }
        if capping {
            push_cap(&mut vertices, &mut normals, &mut indices, top, top_radius, &radial, axis);
            push_cap(&mut vertices, &mut normals, &mut indices, base, base_radius, &radial, -axis);
        }
    }

    let mut mesh = Mesh::from_indexed(Topology::TriangleList, vertices, indices);
    mesh.set_normals(normals);
    Ok(mesh)
}

/// Normal of the side surface at a ring point: perpendicular to the side
/// `edge`, in the plane spanned by the edge and the `radial` offset.
fn slant_normal(edge: DVec3, radial: DVec3) -> DVec3 {
    edge.cross(radial.cross(edge)).normalize_or_zero()
}

/// Appends a flat fan cap on its own copy of a ring, facing `facing`.
fn push_cap(
    vertices: &mut Vec<DVec3>,
    normals: &mut Vec<DVec3>,
    indices: &mut Vec<u32>,
    center: DVec3,
    radius: f64,
    radial: &[DVec3],
    facing: DVec3,
) {
    let first = vertices.len() as u32;
    for dir in radial {
        vertices.push(center + *dir * radius);
        normals.push(facing);
    }
    let last = vertices.len() as u32;
    // The ring winds counter-clockwise around the cone axis.
    let forward = facing.dot(radial[0].cross(radial[1])) > 0.0;
    for i in first + 1..last - 1 {
        if forward {
            indices.extend_from_slice(&[first, i, i + 1]);
        } else {
            indices.extend_from_slice(&[first, i + 1, i]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normals::face_normal;

    fn assert_outward(mesh: &Mesh, center: DVec3) {
        for tri in mesh.triangles() {
            let [a, b, c] = tri.map(|i| mesh.vertices()[i as usize]);
            let n = face_normal(a, b, c);
            let centroid = (a + b + c) / 3.0;
            assert!(
                n.dot(centroid - center) > 0.0,
                "triangle {tri:?} faces inward"
            );
        }
    }

    #[test]
    fn test_cylinder_side_normals_perpendicular_to_axis() {
        let base = DVec3::new(1.0, 2.0, 3.0);
        let top = DVec3::new(4.0, -1.0, 7.0);
        let mesh = create_cone(base, 2.0, top, 2.0, 12, false).unwrap();
        let axis = (top - base).normalize();
        for n in mesh.normals() {
            assert!(n.dot(axis).abs() < 1e-12);
            assert!((n.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cylinder_counts_and_orientation() {
        let mesh = create_cone(DVec3::ZERO, 1.0, DVec3::new(0.0, 0.0, 2.0), 1.0, 8, true).unwrap();
        assert_eq!(mesh.vertex_count(), 16 + 8 + 8);
        assert_eq!(mesh.triangle_count(), 16 + 6 + 6);
        assert!(mesh.validate().is_ok());
        assert_outward(&mesh, DVec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_frustum_normals_tilt_up() {
        let mesh = create_cone(DVec3::ZERO, 2.0, DVec3::new(0.0, 0.0, 1.0), 1.0, 16, false).unwrap();
        // The surface narrows toward +z, so its normals point partly up.
        for n in mesh.normals() {
            assert!(n.z > 0.0);
        }
        assert_outward(&mesh, DVec3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_apex_cone() {
        let mesh = create_cone(DVec3::new(0.0, 0.0, 3.0), 0.0, DVec3::ZERO, 1.5, 10, true).unwrap();
        assert_eq!(mesh.vertex_count(), 1 + 10 + 10);
        assert_eq!(mesh.triangle_count(), 10 + 8);
        assert_eq!(mesh.vertices()[0], DVec3::new(0.0, 0.0, 3.0));
        assert_outward(&mesh, DVec3::new(0.0, 0.0, 0.75));
    }

    #[test]
    fn test_radii_swap_puts_apex_first() {
        let mesh = create_cone(DVec3::ZERO, 1.0, DVec3::Z, 0.0, 6, false).unwrap();
        assert_eq!(mesh.vertices()[0], DVec3::Z);
        assert_eq!(mesh.vertex_count(), 7);
    }

    #[test]
    fn test_cone_invalid_parameters() {
        assert!(create_cone(DVec3::ZERO, -1.0, DVec3::Z, 1.0, 8, false).is_err());
        assert!(create_cone(DVec3::ZERO, 0.0, DVec3::Z, 0.0, 8, false).is_err());
        assert!(create_cone(DVec3::ZERO, 1.0, DVec3::Z, 1.0, 2, false).is_err());
        assert!(create_cone(DVec3::ONE, 1.0, DVec3::ONE, 2.0, 8, false).is_err());
    }
}
