//! # Primitives
//!
//! Factory functions for canonical shapes: box lists, textured cubes, axial
//! slice quads, slice series, cones, spheres, and tubes. Each returns a
//! self-contained mesh.

use glam::{DVec3, Vec3};

pub mod boxes;
pub mod cone;
pub mod cube;
pub mod slice;
pub mod sphere;
pub mod tube;

pub use boxes::create_cubes_with_normals;
pub use cone::create_cone;
pub use cube::create_cube;
pub use slice::{
    create_cube_slice, create_cube_slice_1d, create_cube_slice_2d, create_image_slice,
    create_slice_series,
};
pub use sphere::{create_sphere, SphereParams};
pub use tube::{create_tube, create_tube_with};

/// Coordinate axis a slice is perpendicular to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// Component of `v` along this axis.
    #[inline]
    pub fn component(self, v: DVec3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// Builds a point from the coordinate along this axis and the two
    /// in-plane coordinates, in ascending axis order.
    #[inline]
    pub fn compose(self, along: f64, u: f64, v: f64) -> DVec3 {
        match self {
            Axis::X => DVec3::new(along, u, v),
            Axis::Y => DVec3::new(u, along, v),
            Axis::Z => DVec3::new(u, v, along),
        }
    }

    /// Single-precision counterpart of [`Axis::compose`] for texture space.
    #[inline]
    pub fn compose_tex(self, along: f32, u: f32, v: f32) -> Vec3 {
        match self {
            Axis::X => Vec3::new(along, u, v),
            Axis::Y => Vec3::new(u, along, v),
            Axis::Z => Vec3::new(u, v, along),
        }
    }

    /// The two in-plane components of `v`, in ascending axis order.
    #[inline]
    pub fn in_plane(self, v: DVec3) -> (f64, f64) {
        match self {
            Axis::X => (v.y, v.z),
            Axis::Y => (v.x, v.z),
            Axis::Z => (v.x, v.y),
        }
    }

    /// Single-precision counterpart of [`Axis::in_plane`].
    #[inline]
    pub fn in_plane_tex(self, v: Vec3) -> (f32, f32) {
        match self {
            Axis::X => (v.y, v.z),
            Axis::Y => (v.x, v.z),
            Axis::Z => (v.x, v.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_compose_roundtrip() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let (u, v) = axis.in_plane(p);
            assert_eq!(axis.compose(axis.component(p), u, v), p);
        }
    }
}
