//! # Axial Slices
//!
//! Rectangles perpendicular to a coordinate axis, used to render planes of
//! an image volume. Single slices are four-vertex strips; slice series are
//! indexed triangle lists with one quad per slice.

use glam::{DVec2, DVec3, Vec2, Vec3};

use super::Axis;
use crate::mesh::{Mesh, Topology};

/// In-plane corners of a rectangle in strip order.
fn quad_corners<T: Copy>(low: [T; 2], high: [T; 2]) -> [[T; 2]; 4] {
    [
        [low[0], low[1]],
        [high[0], low[1]],
        [low[0], high[1]],
        [high[0], high[1]],
    ]
}

fn slice_vertices(coord: f64, axis: Axis, low: DVec2, high: DVec2) -> Vec<DVec3> {
    quad_corners(low.to_array(), high.to_array())
        .iter()
        .map(|[u, v]| axis.compose(coord, *u, *v))
        .collect()
}

fn slice_tex_2d(tex_low: Vec2, tex_high: Vec2) -> Vec<Vec2> {
    quad_corners(tex_low.to_array(), tex_high.to_array())
        .iter()
        .map(|c| Vec2::from_array(*c))
        .collect()
}

/// Creates a slice at `coord` along `axis` with 3D texture coordinates.
///
/// `low`/`high` are the in-plane corners in ascending axis order; the
/// texture coordinate along the axis is `tex_coord` for all four vertices.
pub fn create_cube_slice(
    coord: f64,
    tex_coord: f32,
    axis: Axis,
    low: DVec2,
    high: DVec2,
    tex_low: Vec2,
    tex_high: Vec2,
) -> Mesh {
    let tex = quad_corners(tex_low.to_array(), tex_high.to_array())
        .iter()
        .map(|[u, v]| axis.compose_tex(tex_coord, *u, *v))
        .collect();
    let mut mesh = Mesh::from_vertices(Topology::TriangleStrip, slice_vertices(coord, axis, low, high));
    mesh.set_tex_coords_3d(tex);
    mesh
}

/// Creates a slice at `coord` along `axis` with 2D texture coordinates.
pub fn create_cube_slice_2d(
    coord: f64,
    axis: Axis,
    low: DVec2,
    high: DVec2,
    tex_low: Vec2,
    tex_high: Vec2,
) -> Mesh {
    let mut mesh = Mesh::from_vertices(Topology::TriangleStrip, slice_vertices(coord, axis, low, high));
    mesh.set_tex_coords_2d(slice_tex_2d(tex_low, tex_high));
    mesh
}

/// Creates a slice at `coord` along `axis` whose four vertices share the 1D
/// texture coordinate `tex_coord`.
pub fn create_cube_slice_1d(coord: f64, tex_coord: f32, axis: Axis, low: DVec2, high: DVec2) -> Mesh {
    let mut mesh = Mesh::from_vertices(Topology::TriangleStrip, slice_vertices(coord, axis, low, high));
    mesh.set_tex_coords_1d(vec![tex_coord; 4]);
    mesh
}

/// Creates an image plane at depth `z`.
///
/// # Example
///
/// ```rust
/// use neuromesh::primitives::create_image_slice;
/// use glam::{DVec2, Vec2};
///
/// let slice = create_image_slice(5.0, DVec2::ZERO, DVec2::new(640.0, 480.0), Vec2::ZERO, Vec2::ONE);
/// assert_eq!(slice.triangle_count(), 2);
/// assert!(slice.vertices().iter().all(|v| v.z == 5.0));
/// ```
pub fn create_image_slice(z: f64, low: DVec2, high: DVec2, tex_low: Vec2, tex_high: Vec2) -> Mesh {
    create_cube_slice_2d(z, Axis::Z, low, high, tex_low, tex_high)
}

/// Creates `num_slices` parallel quads, linearly interpolated from `first`
/// to `last` along `axis`, in one indexed triangle list.
///
/// The in-plane extent of every quad spans `first..last` on the two other
/// axes. Winding is reversed unless the series runs toward decreasing
/// coordinates, so every front face points back toward `first`.
pub fn create_slice_series(
    num_slices: usize,
    axis: Axis,
    first: DVec3,
    last: DVec3,
    tex_first: Vec3,
    tex_last: Vec3,
) -> Mesh {
    const QUAD: [u32; 6] = [0, 1, 2, 2, 1, 3];
    let reverse = !(axis.component(first) > axis.component(last));

    let (fu, fv) = axis.in_plane(first);
    let (lu, lv) = axis.in_plane(last);
    let (tfu, tfv) = axis.in_plane_tex(tex_first);
    let (tlu, tlv) = axis.in_plane_tex(tex_last);
    let along_first = axis.component(first);
    let along_last = axis.component(last);
    let tex_along_first = axis.component(tex_first.as_dvec3()) as f32;
    let tex_along_last = axis.component(tex_last.as_dvec3()) as f32;

    let mut vertices = Vec::with_capacity(num_slices * 4);
    let mut tex_coords = Vec::with_capacity(num_slices * 4);
    let mut indices = Vec::with_capacity(num_slices * 6);

    for i in 0..num_slices {
        let factor = if num_slices > 1 {
            i as f64 / (num_slices - 1) as f64
        } else {
            0.0
        };
        let along = along_first + (along_last - along_first) * factor;
        let tex_along = tex_along_first + (tex_along_last - tex_along_first) * factor as f32;

        for [u, v] in quad_corners([fu, fv], [lu, lv]) {
            vertices.push(axis.compose(along, u, v));
        }
        for [u, v] in quad_corners([tfu, tfv], [tlu, tlv]) {
            tex_coords.push(axis.compose_tex(tex_along, u, v));
        }

        let base = 4 * i as u32;
        if reverse {
            indices.extend(QUAD.iter().rev().map(|j| base + j));
        } else {
            indices.extend(QUAD.iter().map(|j| base + j));
        }
    }

    let mut mesh = Mesh::from_indexed(Topology::TriangleList, vertices, indices);
    mesh.set_tex_coords_3d(tex_coords);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normals::face_normal;

    #[test]
    fn test_cube_slice_along_y() {
        let slice = create_cube_slice(
            2.0,
            0.5,
            Axis::Y,
            DVec2::new(0.0, 10.0),
            DVec2::new(1.0, 20.0),
            Vec2::ZERO,
            Vec2::ONE,
        );
        assert_eq!(slice.topology(), Topology::TriangleStrip);
        assert_eq!(
            slice.vertices(),
            &[
                DVec3::new(0.0, 2.0, 10.0),
                DVec3::new(1.0, 2.0, 10.0),
                DVec3::new(0.0, 2.0, 20.0),
                DVec3::new(1.0, 2.0, 20.0),
            ]
        );
        assert_eq!(slice.tex_coords_3d()[3], Vec3::new(1.0, 0.5, 1.0));
    }

    #[test]
    fn test_slice_2d_and_1d_variants() {
        let s2 = create_cube_slice_2d(1.0, Axis::X, DVec2::ZERO, DVec2::ONE, Vec2::ZERO, Vec2::ONE);
        assert_eq!(s2.tex_coords_2d()[1], Vec2::new(1.0, 0.0));
        assert!(s2.tex_coords_3d().is_empty());
        assert!(s2.vertices().iter().all(|v| v.x == 1.0));

        let s1 = create_cube_slice_1d(1.0, 0.25, Axis::Z, DVec2::ZERO, DVec2::ONE);
        assert_eq!(s1.tex_coords_1d(), &[0.25; 4]);
        assert!(s1.validate().is_ok());
    }

    #[test]
    fn test_series_interpolates() {
        let series = create_slice_series(
            3,
            Axis::Z,
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 4.0),
            Vec3::ZERO,
            Vec3::ONE,
        );
        assert_eq!(series.vertex_count(), 12);
        assert_eq!(series.triangle_count(), 6);
        assert_eq!(series.vertices()[4].z, 2.0);
        assert_eq!(series.tex_coords_3d()[8].z, 1.0);
        assert!(series.validate().is_ok());
    }

    #[test]
    fn test_series_winding_follows_direction() {
        let up = create_slice_series(2, Axis::Z, DVec3::ZERO, DVec3::new(1.0, 1.0, 1.0), Vec3::ZERO, Vec3::ONE);
        let down = create_slice_series(2, Axis::Z, DVec3::new(0.0, 0.0, 1.0), DVec3::new(1.0, 1.0, 0.0), Vec3::ZERO, Vec3::ONE);

        assert_eq!(&up.indices()[..6], &[3, 1, 2, 2, 1, 0]);
        assert_eq!(&down.indices()[..6], &[0, 1, 2, 2, 1, 3]);

        let [a, b, c] = up.triangle_vertices(0);
        assert!(face_normal(a, b, c).z < 0.0);
        let [a, b, c] = down.triangle_vertices(0);
        assert!(face_normal(a, b, c).z > 0.0);
    }

    #[test]
    fn test_single_slice_series() {
        let series = create_slice_series(1, Axis::X, DVec3::ZERO, DVec3::ONE, Vec3::ZERO, Vec3::ONE);
        assert_eq!(series.triangle_count(), 2);
        assert!(series.vertices().iter().all(|v| v.x == 0.0));
    }
}
