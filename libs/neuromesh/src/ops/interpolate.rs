//! # Attribute Interpolation
//!
//! Transfers colors and texture coordinates from a reference mesh onto the
//! vertices of a target mesh.
//!
//! Each target vertex takes its attributes from, in order of preference:
//!
//! 1. the nearest reference vertex within [`VERTEX_MATCH_DISTANCE`]
//! 2. the first reference triangle whose closest point is within
//!    [`TRIANGLE_MATCH_SQUARED_DISTANCE`], interpolated barycentrically
//! 3. the attribute's zero value
//!
//! Every target vertex is checked against every reference vertex and
//! triangle, so this is only meant for small meshes.

use std::ops::{Add, Mul, Sub};

use config::constants::{TRIANGLE_MATCH_SQUARED_DISTANCE, VERTEX_MATCH_DISTANCE};
use glam::DVec3;

use crate::mesh::Mesh;

/// Closest point on a triangle `(a, b, c)` to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    /// The closest point itself
    pub point: DVec3,
    /// Squared distance from the query point
    pub squared_distance: f64,
    /// Weight of `b - a`
    pub s: f64,
    /// Weight of `c - a`
    pub t: f64,
}

/// Finds the point of triangle `(a, b, c)` closest to `p`, expressed as
/// `a + s (b - a) + t (c - a)`.
///
/// Walks the Voronoi regions of the vertices and edges before falling back
/// to the face interior.
pub fn closest_point_on_triangle(p: DVec3, a: DVec3, b: DVec3, c: DVec3) -> ClosestPoint {
    let ab = b - a;
    let ac = c - a;
    let result = |s: f64, t: f64| {
        let point = a + ab * s + ac * t;
        ClosestPoint {
            point,
            squared_distance: point.distance_squared(p),
            s,
            t,
        }
    };

    let ap = p - a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return result(0.0, 0.0);
    }

    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return result(1.0, 0.0);
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        return result(d1 / (d1 - d3), 0.0);
    }

    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return result(0.0, 1.0);
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        return result(0.0, d2 / (d2 - d6));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && d4 - d3 >= 0.0 && d5 - d6 >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return result(1.0 - w, w);
    }

    let sum = va + vb + vc;
    if sum == 0.0 {
        // Collinear corners that slipped through the region tests.
        return result(0.0, 0.0);
    }
    result(vb / sum, vc / sum)
}

/// Where a target vertex takes its attributes from.
#[derive(Debug, Clone, Copy)]
enum Source {
    Vertex(usize),
    Triangle { corners: [usize; 3], s: f32, t: f32 },
    Missing,
}

fn locate(point: DVec3, reference: &Mesh) -> Source {
    let nearest = reference
        .vertices()
        .iter()
        .enumerate()
        .map(|(i, v)| (i, v.distance(point)))
        .filter(|(_, d)| *d <= VERTEX_MATCH_DISTANCE)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((i, _)) = nearest {
        return Source::Vertex(i);
    }

    reference
        .triangles()
        .find_map(|tri| {
            let [a, b, c] = tri.map(|i| reference.vertices()[i as usize]);
            let closest = closest_point_on_triangle(point, a, b, c);
            (closest.squared_distance <= TRIANGLE_MATCH_SQUARED_DISTANCE).then(|| Source::Triangle {
                corners: tri.map(|i| i as usize),
                s: closest.s as f32,
                t: closest.t as f32,
            })
        })
        .unwrap_or(Source::Missing)
}

fn sample<T>(values: &[T], sources: &[Source]) -> Vec<T>
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>,
{
    sources
        .iter()
        .map(|source| match *source {
            Source::Vertex(i) => values[i],
            Source::Triangle {
                corners: [i0, i1, i2],
                s,
                t,
            } => values[i0] + (values[i1] - values[i0]) * s + (values[i2] - values[i0]) * t,
            Source::Missing => T::default(),
        })
        .collect()
}

/// Replaces the colors and texture coordinates of `target` with values
/// sampled from `reference`.
///
/// Only attributes that `reference` carries are written; the others are
/// left as they are on `target`.
///
/// # Example
///
/// ```rust
/// use neuromesh::{interpolate, Mesh, Topology};
/// use glam::DVec3;
///
/// let mut reference = Mesh::from_vertices(Topology::TriangleList, vec![DVec3::ZERO, DVec3::X, DVec3::Y]);
/// reference.set_tex_coords_1d(vec![0.0, 1.0, 0.0]);
///
/// let mut target = Mesh::from_vertices(Topology::TriangleList, vec![DVec3::new(0.5, 0.0, 0.0)]);
/// interpolate(&mut target, &reference);
/// assert_eq!(target.tex_coords_1d(), &[0.5]);
/// ```
pub fn interpolate(target: &mut Mesh, reference: &Mesh) {
    let sources: Vec<Source> = target
        .vertices()
        .iter()
        .map(|v| locate(*v, reference))
        .collect();

    let missing = sources.iter().filter(|s| matches!(s, Source::Missing)).count();
    if missing > 0 {
        log::debug!(
            "interpolate: {missing} of {} vertices not on the reference surface",
            sources.len()
        );
    }

    if !reference.tex_coords_1d().is_empty() {
        target.set_tex_coords_1d(sample(reference.tex_coords_1d(), &sources));
    }
    if !reference.tex_coords_2d().is_empty() {
        target.set_tex_coords_2d(sample(reference.tex_coords_2d(), &sources));
    }
    if !reference.tex_coords_3d().is_empty() {
        target.set_tex_coords_3d(sample(reference.tex_coords_3d(), &sources));
    }
    if !reference.colors().is_empty() {
        target.set_colors(sample(reference.colors(), &sources));
    }
}
