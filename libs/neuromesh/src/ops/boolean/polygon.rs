//! # Polygon Operations
//!
//! Convex polygons, splitting planes, and conversion between meshes and
//! polygon soups for the BSP boolean.

use glam::DVec3;

use crate::mesh::{Mesh, Topology};
use crate::normals::face_normal;

/// Splitting plane `normal · p = w`. Points with `normal · p > w` are in
/// front.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Unit normal pointing to the front side
    pub normal: DVec3,
    /// Offset from the origin along `normal`
    pub w: f64,
}

impl Plane {
    /// Plane through the first vertex of `poly`.
    pub fn from_polygon(poly: &BspPolygon) -> Self {
        Self {
            normal: poly.normal,
            w: poly.normal.dot(poly.vertices[0]),
        }
    }

    fn distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }
}

/// Convex polygon with a precomputed unit normal.
///
/// Vertices wind counter-clockwise seen from the front, and there are
/// always at least three.
#[derive(Debug, Clone)]
pub struct BspPolygon {
    /// Vertices in counter-clockwise order
    pub vertices: Vec<DVec3>,
    /// Unit normal
    pub normal: DVec3,
}

impl BspPolygon {
    /// Creates a polygon with an explicit normal.
    pub fn with_normal(vertices: Vec<DVec3>, normal: DVec3) -> Self {
        Self { vertices, normal }
    }

    /// Reverses winding and normal.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.normal = -self.normal;
    }
}

/// Position of a polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolygonClassification {
    /// Every vertex within tolerance of the plane
    Coplanar,
    /// No vertex behind the plane
    Front,
    /// No vertex in front of the plane
    Back,
    /// Vertices on both sides
    Spanning,
}

/// Result of classifying a polygon against a plane. Only a spanning
/// polygon has parts.
pub type SplitResult = (PolygonClassification, Option<BspPolygon>, Option<BspPolygon>);

/// Classifies `poly` against `plane` and splits it when it spans the plane.
pub fn split_polygon(poly: &BspPolygon, plane: &Plane, tolerance: f64) -> SplitResult {
    let side = |v: &DVec3| {
        let dist = plane.distance(*v);
        if dist < -tolerance {
            -1i8
        } else if dist > tolerance {
            1
        } else {
            0
        }
    };
    let (mut front_count, mut back_count) = (0usize, 0usize);
    for v in &poly.vertices {
        match side(v) {
            1 => front_count += 1,
            -1 => back_count += 1,
            _ => {}
        }
    }

    match (front_count, back_count) {
        (0, 0) => return (PolygonClassification::Coplanar, None, None),
        (_, 0) => return (PolygonClassification::Front, None, None),
        (0, _) => return (PolygonClassification::Back, None, None),
        _ => {}
    }

    let sides: Vec<i8> = poly.vertices.iter().map(side).collect();
    let n = poly.vertices.len();
    let mut front = Vec::with_capacity(n + 1);
    let mut back = Vec::with_capacity(n + 1);
    for i in 0..n {
        let j = (i + 1) % n;
        let (si, sj) = (sides[i], sides[j]);
        let (vi, vj) = (poly.vertices[i], poly.vertices[j]);

        if si != -1 {
            front.push(vi);
        }
        if si != 1 {
            back.push(vi);
        }
        if si * sj == -1 {
            let crossing = plane_intersection(vi, vj, plane);
            front.push(crossing);
            back.push(crossing);
        }
    }

    let part = |vertices: Vec<DVec3>| {
        (vertices.len() >= 3).then(|| BspPolygon::with_normal(vertices, poly.normal))
    };
    (PolygonClassification::Spanning, part(front), part(back))
}

fn plane_intersection(a: DVec3, b: DVec3, plane: &Plane) -> DVec3 {
    let edge = b - a;
    let denom = plane.normal.dot(edge);
    if denom.abs() < f64::EPSILON {
        return a;
    }
    let t = (plane.w - plane.normal.dot(a)) / denom;
    a + edge * t
}

/// Converts every non-degenerate triangle of `mesh` into a polygon.
pub fn mesh_to_polygons(mesh: &Mesh) -> Vec<BspPolygon> {
    mesh.triangles()
        .filter_map(|tri| {
            let [a, b, c] = tri.map(|i| mesh.vertices()[i as usize]);
            face_normal(a, b, c)
                .try_normalize()
                .map(|normal| BspPolygon::with_normal(vec![a, b, c], normal))
        })
        .collect()
}

/// Fan-triangulates polygons into an unindexed triangle list.
pub fn polygons_to_mesh(polygons: &[BspPolygon]) -> Mesh {
    let mut vertices = Vec::new();
    for poly in polygons {
        let first = poly.vertices[0];
        for pair in poly.vertices[1..].windows(2) {
            vertices.extend_from_slice(&[first, pair[0], pair[1]]);
        }
    }
    Mesh::from_vertices(Topology::TriangleList, vertices)
}
