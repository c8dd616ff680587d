//! # Mesh Data Structure
//!
//! Core mesh representation: vertex positions, optional per-vertex
//! attributes, an optional index buffer, and a topology tag that decides how
//! the index stream forms triangles.

use std::collections::HashSet;
use std::fmt;

use glam::{DMat4, DVec3, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};

// =============================================================================
// TOPOLOGY
// =============================================================================

/// How the index stream (or the raw vertex order) forms triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Topology {
    /// Every three entries form one triangle.
    #[default]
    TriangleList,
    /// Each entry after the second forms a triangle with its two predecessors,
    /// alternating winding.
    TriangleStrip,
    /// Each entry after the second forms a triangle with the first entry and
    /// its predecessor.
    TriangleFan,
}

impl Topology {
    /// Returns the conventional primitive name (`GL_TRIANGLES`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Topology::TriangleList => "GL_TRIANGLES",
            Topology::TriangleStrip => "GL_TRIANGLE_STRIP",
            Topology::TriangleFan => "GL_TRIANGLE_FAN",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// BOUNDING BOX
// =============================================================================

/// Axis-aligned bounding box. A box that has not been expanded is empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// Creates an empty box (min > max on every axis).
    pub fn empty() -> Self {
        Self {
            min: DVec3::splat(f64::INFINITY),
            max: DVec3::splat(f64::NEG_INFINITY),
        }
    }

    /// Returns true if no point has been added.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grows the box to include `point`.
    pub fn expand(&mut self, point: DVec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Extent along each axis, zero for an empty box.
    pub fn size(&self) -> DVec3 {
        if self.is_empty() {
            DVec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

impl FromIterator<DVec3> for BoundingBox {
    fn from_iter<I: IntoIterator<Item = DVec3>>(iter: I) -> Self {
        let mut bbox = BoundingBox::empty();
        for point in iter {
            bbox.expand(point);
        }
        bbox
    }
}

// =============================================================================
// MESH
// =============================================================================

/// A triangle mesh with optional per-vertex attributes.
///
/// Every attribute vector is either empty (attribute absent) or exactly as
/// long as `vertices`. When `indices` is empty the vertex order itself is
/// the primitive stream.
///
/// # Example
///
/// ```rust
/// use neuromesh::{Mesh, Topology};
/// use glam::DVec3;
///
/// let mesh = Mesh::from_vertices(
///     Topology::TriangleList,
///     vec![DVec3::ZERO, DVec3::X, DVec3::Y],
/// );
/// assert_eq!(mesh.triangle_count(), 1);
/// assert_eq!(mesh.triangle_indices(0), [0, 1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    topology: Topology,
    vertices: Vec<DVec3>,
    normals: Vec<DVec3>,
    colors: Vec<Vec4>,
    tex_coords_1d: Vec<f32>,
    tex_coords_2d: Vec<Vec2>,
    tex_coords_3d: Vec<Vec3>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Creates an empty mesh with the given topology.
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            ..Self::default()
        }
    }

    /// Creates an unindexed mesh from vertex positions.
    pub fn from_vertices(topology: Topology, vertices: Vec<DVec3>) -> Self {
        Self {
            topology,
            vertices,
            ..Self::default()
        }
    }

    /// Creates an indexed mesh from vertex positions and an index buffer.
    pub fn from_indexed(topology: Topology, vertices: Vec<DVec3>, indices: Vec<u32>) -> Self {
        Self {
            topology,
            vertices,
            indices,
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the topology tag.
    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns true if an index buffer is present.
    #[inline]
    pub fn has_indices(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Per-vertex normals (empty when absent).
    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// Per-vertex RGBA colors (empty when absent).
    #[inline]
    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }

    /// Per-vertex 1D texture coordinates (empty when absent).
    #[inline]
    pub fn tex_coords_1d(&self) -> &[f32] {
        &self.tex_coords_1d
    }

    /// Per-vertex 2D texture coordinates (empty when absent).
    #[inline]
    pub fn tex_coords_2d(&self) -> &[Vec2] {
        &self.tex_coords_2d
    }

    /// Per-vertex 3D texture coordinates (empty when absent).
    #[inline]
    pub fn tex_coords_3d(&self) -> &[Vec3] {
        &self.tex_coords_3d
    }

    /// Index buffer (empty when the vertex order is the primitive stream).
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    // -------------------------------------------------------------------------
    // Setters
    // -------------------------------------------------------------------------

    /// Replaces the topology tag.
    pub fn set_topology(&mut self, topology: Topology) {
        self.topology = topology;
    }

    /// Replaces the vertex positions.
    pub fn set_vertices(&mut self, vertices: Vec<DVec3>) {
        self.vertices = vertices;
    }

    /// Replaces the per-vertex normals.
    pub fn set_normals(&mut self, normals: Vec<DVec3>) {
        self.normals = normals;
    }

    /// Replaces the per-vertex colors.
    pub fn set_colors(&mut self, colors: Vec<Vec4>) {
        self.colors = colors;
    }

    /// Replaces the 1D texture coordinates.
    pub fn set_tex_coords_1d(&mut self, coords: Vec<f32>) {
        self.tex_coords_1d = coords;
    }

    /// Replaces the 2D texture coordinates.
    pub fn set_tex_coords_2d(&mut self, coords: Vec<Vec2>) {
        self.tex_coords_2d = coords;
    }

    /// Replaces the 3D texture coordinates.
    pub fn set_tex_coords_3d(&mut self, coords: Vec<Vec3>) {
        self.tex_coords_3d = coords;
    }

    /// Replaces the index buffer.
    pub fn set_indices(&mut self, indices: Vec<u32>) {
        self.indices = indices;
    }

    /// Removes all vertices, attributes and indices. The topology tag is kept.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.normals.clear();
        self.colors.clear();
        self.tex_coords_1d.clear();
        self.tex_coords_2d.clear();
        self.tex_coords_3d.clear();
        self.indices.clear();
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Checks attribute lengths and index bounds.
    ///
    /// Operations on the mesh assume these hold; call this on meshes that
    /// come from outside before handing them to the rest of the crate.
    pub fn validate(&self) -> MeshResult<()> {
        let expected = self.vertices.len();
        let lengths = [
            ("normals", self.normals.len()),
            ("colors", self.colors.len()),
            ("tex_coords_1d", self.tex_coords_1d.len()),
            ("tex_coords_2d", self.tex_coords_2d.len()),
            ("tex_coords_3d", self.tex_coords_3d.len()),
        ];
        for (attribute, len) in lengths {
            if len != 0 && len != expected {
                return Err(MeshError::AttributeLength {
                    attribute,
                    len,
                    expected,
                });
            }
        }

        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, &index)| index as usize >= expected)
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                position,
                vertex_count: expected,
            });
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Bounds
    // -------------------------------------------------------------------------

    /// Axis-aligned bounding box of the vertex positions.
    pub fn bounding_box(&self) -> BoundingBox {
        self.vertices.iter().copied().collect()
    }

    /// Bounding box of the vertex positions after applying `matrix`.
    pub fn bounding_box_with(&self, matrix: &DMat4) -> BoundingBox {
        self.vertices
            .iter()
            .map(|v| matrix.transform_point3(*v))
            .collect()
    }

    /// Counts the grid cubes of edge `edge`, laid out from the bounding-box
    /// minimum, that contain at least one vertex.
    ///
    /// A vertex on a shared face counts toward the lower cube. An axis with
    /// zero extent still spans one layer of cubes.
    pub fn num_cover_cubes(&self, edge: f64) -> MeshResult<usize> {
        if !(edge > 0.0) {
            return Err(MeshError::degenerate(format!(
                "Cover cube edge must be positive: {edge}"
            )));
        }
        let bbox = self.bounding_box();
        if bbox.is_empty() {
            return Ok(0);
        }

        let dims = (bbox.size() / edge).ceil().max(DVec3::ONE);
        let cell = |offset: f64, dim: f64| -> i64 {
            let k = (offset / edge).ceil() - 1.0;
            k.clamp(0.0, dim - 1.0) as i64
        };

        let cells: HashSet<[i64; 3]> = self
            .vertices
            .iter()
            .map(|v| {
                let d = *v - bbox.min;
                [cell(d.x, dims.x), cell(d.y, dims.y), cell(d.z, dims.z)]
            })
            .collect();
        Ok(cells.len())
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Applies an affine transform to every vertex position in place.
    ///
    /// The identity matrix is a no-op. Normals are not touched.
    pub fn transform(&mut self, matrix: &DMat4) {
        if *matrix == DMat4::IDENTITY {
            return;
        }
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }
    }

    /// Translates every vertex position.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Copies the three vertices of `triangle` from `source`, together with
    /// every attribute `source` carries.
    ///
    /// Only an unindexed triangle list can grow this way; for any other
    /// receiver the call does nothing and returns false.
    pub fn append_triangle(&mut self, source: &Mesh, triangle: [u32; 3]) -> bool {
        if self.has_indices() || self.topology != Topology::TriangleList {
            return false;
        }

        let corners = triangle.map(|i| i as usize);
        self.vertices
            .extend(corners.iter().map(|&i| source.vertices[i]));
        if !source.normals.is_empty() {
            self.normals.extend(corners.iter().map(|&i| source.normals[i]));
        }
        if !source.colors.is_empty() {
            self.colors.extend(corners.iter().map(|&i| source.colors[i]));
        }
        if !source.tex_coords_1d.is_empty() {
            self.tex_coords_1d
                .extend(corners.iter().map(|&i| source.tex_coords_1d[i]));
        }
        if !source.tex_coords_2d.is_empty() {
            self.tex_coords_2d
                .extend(corners.iter().map(|&i| source.tex_coords_2d[i]));
        }
        if !source.tex_coords_3d.is_empty() {
            self.tex_coords_3d
                .extend(corners.iter().map(|&i| source.tex_coords_3d[i]));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh::from_vertices(
            Topology::TriangleList,
            vec![DVec3::ZERO, DVec3::X, DVec3::Y],
        )
    }

    #[test]
    fn test_mesh_new() {
        let mesh = Mesh::new(Topology::TriangleStrip);
        assert!(mesh.is_empty());
        assert_eq!(mesh.topology(), Topology::TriangleStrip);
        assert!(!mesh.has_indices());
    }

    #[test]
    fn test_topology_names() {
        assert_eq!(Topology::TriangleList.to_string(), "GL_TRIANGLES");
        assert_eq!(Topology::TriangleStrip.to_string(), "GL_TRIANGLE_STRIP");
        assert_eq!(Topology::TriangleFan.to_string(), "GL_TRIANGLE_FAN");
    }

    #[test]
    fn test_mesh_clear() {
        let mut mesh = triangle();
        mesh.set_normals(vec![DVec3::Z; 3]);
        mesh.set_indices(vec![0, 1, 2]);
        mesh.clear();
        assert!(mesh.is_empty());
        assert!(mesh.normals().is_empty());
        assert!(!mesh.has_indices());
    }

    #[test]
    fn test_validate_attribute_length() {
        let mut mesh = triangle();
        assert!(mesh.validate().is_ok());

        mesh.set_colors(vec![Vec4::ONE; 2]);
        assert_eq!(
            mesh.validate(),
            Err(MeshError::AttributeLength {
                attribute: "colors",
                len: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn test_validate_index_range() {
        let mut mesh = triangle();
        mesh.set_indices(vec![0, 1, 3]);
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange {
                index: 3,
                position: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_bounding_box() {
        let mesh = Mesh::from_vertices(
            Topology::TriangleList,
            vec![DVec3::new(-1.0, -2.0, -3.0), DVec3::new(4.0, 5.0, 6.0)],
        );
        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bbox.max, DVec3::new(4.0, 5.0, 6.0));
        assert!(Mesh::default().bounding_box().is_empty());
    }

    #[test]
    fn test_bounding_box_with_transform() {
        let mesh = triangle();
        let bbox = mesh.bounding_box_with(&DMat4::from_translation(DVec3::new(10.0, 0.0, 0.0)));
        assert_eq!(bbox.min, DVec3::new(10.0, 0.0, 0.0));
        assert_eq!(bbox.max, DVec3::new(11.0, 1.0, 0.0));
    }

    #[test]
    fn test_transform_identity_is_noop() {
        let mut mesh = triangle();
        let before = mesh.clone();
        mesh.transform(&DMat4::IDENTITY);
        assert_eq!(mesh, before);
    }

    #[test]
    fn test_transform_scales_positions_only() {
        let mut mesh = triangle();
        mesh.set_normals(vec![DVec3::Z; 3]);
        mesh.transform(&DMat4::from_scale(DVec3::splat(2.0)));
        assert_eq!(mesh.vertices()[1], DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(mesh.normals()[1], DVec3::Z);
    }

    #[test]
    fn test_append_triangle_copies_attributes() {
        let mut source = triangle();
        source.set_tex_coords_1d(vec![0.1, 0.2, 0.3]);
        source.set_colors(vec![Vec4::X, Vec4::Y, Vec4::Z]);

        let mut target = Mesh::new(Topology::TriangleList);
        assert!(target.append_triangle(&source, [2, 1, 0]));
        assert_eq!(target.vertices(), &[DVec3::Y, DVec3::X, DVec3::ZERO]);
        assert_eq!(target.tex_coords_1d(), &[0.3, 0.2, 0.1]);
        assert_eq!(target.colors(), &[Vec4::Z, Vec4::Y, Vec4::X]);
        assert!(target.normals().is_empty());
        assert!(target.validate().is_ok());
    }

    #[test]
    fn test_append_triangle_rejects_indexed_or_strip() {
        let source = triangle();

        let mut strip = Mesh::new(Topology::TriangleStrip);
        assert!(!strip.append_triangle(&source, [0, 1, 2]));
        assert!(strip.is_empty());

        let mut indexed = Mesh::from_indexed(Topology::TriangleList, vec![DVec3::ZERO], vec![0]);
        assert!(!indexed.append_triangle(&source, [0, 1, 2]));
        assert_eq!(indexed.vertex_count(), 1);
    }

    #[test]
    fn test_num_cover_cubes() {
        let mesh = Mesh::from_vertices(
            Topology::TriangleList,
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(0.5, 0.5, 0.5),
                DVec3::new(3.0, 0.0, 0.0),
                DVec3::new(3.0, 3.0, 3.0),
            ],
        );
        // Grid is 3x3x3 with unit cubes; vertices fall in three distinct cubes.
        assert_eq!(mesh.num_cover_cubes(1.0), Ok(3));
        assert_eq!(mesh.num_cover_cubes(10.0), Ok(1));
        assert!(mesh.num_cover_cubes(0.0).is_err());
        assert_eq!(Mesh::default().num_cover_cubes(1.0), Ok(0));
    }

    #[test]
    fn test_num_cover_cubes_flat_mesh() {
        let mesh = Mesh::from_vertices(
            Topology::TriangleList,
            vec![DVec3::ZERO, DVec3::new(2.5, 0.0, 0.0)],
        );
        assert_eq!(mesh.num_cover_cubes(1.0), Ok(2));
    }

    #[test]
    fn test_mesh_serde_roundtrip() {
        let mut mesh = triangle();
        mesh.set_tex_coords_2d(vec![Vec2::ZERO, Vec2::X, Vec2::Y]);
        let json = serde_json::to_string(&mesh).unwrap();
        let back: Mesh = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mesh);
    }
}
