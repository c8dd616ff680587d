//! # Topology Resolver
//!
//! Maps a triangle ordinal to its three vertex indices for each topology.
//!
//! ```text
//! List   i -> (3i, 3i+1, 3i+2)
//! Strip  i -> (i, i+1, i+2)      i even
//!        i -> (i+1, i, i+2)      i odd
//! Fan    i -> (0, i+1, i+2)
//! ```
//!
//! Positions are looked up through the index buffer when one is present,
//! otherwise they are raw vertex ordinals.

use glam::DVec3;

use crate::mesh::{Mesh, Topology};

/// Number of triangles formed by `count` stream entries.
///
/// # Example
///
/// ```rust
/// use neuromesh::{topology::triangle_count, Topology};
///
/// assert_eq!(triangle_count(Topology::TriangleList, 7), 2);
/// assert_eq!(triangle_count(Topology::TriangleStrip, 5), 3);
/// assert_eq!(triangle_count(Topology::TriangleFan, 1), 0);
/// ```
#[inline]
pub fn triangle_count(topology: Topology, count: usize) -> usize {
    match topology {
        Topology::TriangleList => count / 3,
        Topology::TriangleStrip | Topology::TriangleFan => count.saturating_sub(2),
    }
}

/// Stream positions of triangle `i`, before the index buffer is applied.
#[inline]
fn stream_positions(topology: Topology, i: usize) -> [usize; 3] {
    match topology {
        Topology::TriangleList => [3 * i, 3 * i + 1, 3 * i + 2],
        Topology::TriangleStrip if i % 2 == 0 => [i, i + 1, i + 2],
        Topology::TriangleStrip => [i + 1, i, i + 2],
        Topology::TriangleFan => [0, i + 1, i + 2],
    }
}

/// Resolves triangle `i` of a stream.
///
/// `indices` is the index buffer; an empty slice means the stream is the
/// vertex order and `vertex_count` entries long.
///
/// # Panics
///
/// Panics if `i` is not below the triangle count of the stream.
pub fn resolve_triangle(
    topology: Topology,
    indices: &[u32],
    vertex_count: usize,
    i: usize,
) -> [u32; 3] {
    let count = if indices.is_empty() {
        vertex_count
    } else {
        indices.len()
    };
    let total = triangle_count(topology, count);
    assert!(
        i < total,
        "triangle ordinal {i} out of range for {total} {topology} triangles"
    );

    let positions = stream_positions(topology, i);
    if indices.is_empty() {
        positions.map(|p| p as u32)
    } else {
        positions.map(|p| indices[p])
    }
}

// =============================================================================
// MESH INTEGRATION
// =============================================================================

impl Mesh {
    /// Number of triangles described by the mesh.
    pub fn triangle_count(&self) -> usize {
        let count = if self.has_indices() {
            self.indices().len()
        } else {
            self.vertex_count()
        };
        triangle_count(self.topology(), count)
    }

    /// Vertex indices of triangle `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.triangle_count()`.
    pub fn triangle_indices(&self, i: usize) -> [u32; 3] {
        resolve_triangle(self.topology(), self.indices(), self.vertex_count(), i)
    }

    /// Iterates over the vertex indices of every triangle.
    pub fn triangles(&self) -> Triangles<'_> {
        Triangles {
            mesh: self,
            next: 0,
            total: self.triangle_count(),
        }
    }

    /// Vertex positions of triangle `i`.
    pub fn triangle_vertices(&self, i: usize) -> [DVec3; 3] {
        self.triangle_indices(i)
            .map(|index| self.vertices()[index as usize])
    }

    /// Position of corner `corner` (0, 1 or 2) of triangle `i`.
    pub fn triangle_vertex(&self, i: usize, corner: usize) -> DVec3 {
        assert!(corner < 3, "triangle corner {corner} out of range");
        self.triangle_vertices(i)[corner]
    }

    /// Returns an indexed triangle list describing the same triangles, with
    /// the vertices and attributes unchanged.
    pub fn to_triangle_list(&self) -> Mesh {
        if self.topology() == Topology::TriangleList && self.has_indices() {
            return self.clone();
        }
        let indices: Vec<u32> = self.triangles().flatten().collect();
        let mut list = self.clone();
        list.set_topology(Topology::TriangleList);
        list.set_indices(indices);
        list
    }
}

/// Iterator over the triangles of a mesh, yielding vertex index triples.
#[derive(Debug, Clone)]
pub struct Triangles<'a> {
    mesh: &'a Mesh,
    next: usize,
    total: usize,
}

impl Iterator for Triangles<'_> {
    type Item = [u32; 3];

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let triangle = self.mesh.triangle_indices(self.next);
        self.next += 1;
        Some(triangle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Triangles<'_> {}
