//! # Textured Cube
//!
//! Eight-vertex cube drawn as a single triangle strip with 3D texture
//! coordinates, used for volume rendering proxies.

use glam::{DVec3, Vec3};

use crate::mesh::{Mesh, Topology};

/// Strip that walks all six faces of the eight-corner cube.
const CUBE_STRIP: [u32; 14] = [0, 1, 2, 3, 7, 1, 5, 4, 7, 6, 2, 4, 0, 1];

/// Corner `i` of the box spanned by `lo` and `hi`.
///
/// Bit 0 picks x, bit 1 picks y, and bit 2 clear means the upper z face.
fn corner<T: Copy>(lo: [T; 3], hi: [T; 3], i: usize) -> [T; 3] {
    [
        if i & 1 == 0 { lo[0] } else { hi[0] },
        if i & 2 == 0 { lo[1] } else { hi[1] },
        if i & 4 == 0 { hi[2] } else { lo[2] },
    ]
}

/// Creates a cube between the lower-left-front corner `llf` and the
/// upper-right-back corner `urb`, with texture coordinates spanning
/// `tex_llf..tex_urb` in the same layout.
///
/// # Example
///
/// ```rust
/// use neuromesh::primitives::create_cube;
/// use neuromesh::Topology;
/// use glam::{DVec3, Vec3};
///
/// let cube = create_cube(DVec3::ZERO, DVec3::ONE, Vec3::ZERO, Vec3::ONE);
/// assert_eq!(cube.topology(), Topology::TriangleStrip);
/// assert_eq!(cube.triangle_count(), 12);
/// ```
pub fn create_cube(llf: DVec3, urb: DVec3, tex_llf: Vec3, tex_urb: Vec3) -> Mesh {
    let vertices = (0..8)
        .map(|i| DVec3::from_array(corner(llf.to_array(), urb.to_array(), i)))
        .collect();
    let tex_coords = (0..8)
        .map(|i| Vec3::from_array(corner(tex_llf.to_array(), tex_urb.to_array(), i)))
        .collect();

    let mut mesh = Mesh::from_indexed(Topology::TriangleStrip, vertices, CUBE_STRIP.to_vec());
    mesh.set_tex_coords_3d(tex_coords);
    mesh
}
