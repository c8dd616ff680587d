//! # Tube Primitive
//!
//! Sweeps a circular cross-section along a poly-line with a radius per
//! point. Frames are propagated by parallel transport so the rings do not
//! twist along the line.

use std::f64::consts::TAU;

use config::constants::{GeometryConfig, EPSILON, MIN_SIDES};
use glam::{DQuat, DVec3};

use crate::error::{MeshError, MeshResult};
use crate::mesh::{Mesh, Topology};

/// Orthonormal frame at one line point.
#[derive(Debug, Clone, Copy)]
struct Frame {
    tangent: DVec3,
    normal: DVec3,
    binormal: DVec3,
}

impl Frame {
    fn from_tangent(tangent: DVec3) -> Self {
        let normal = tangent.any_orthonormal_vector();
        Self {
            tangent,
            normal,
            binormal: tangent.cross(normal),
        }
    }

    /// Rotates the frame onto `tangent` with the minimal rotation.
    fn transport(&self, tangent: DVec3) -> Self {
        let rotation = DQuat::from_rotation_arc(self.tangent, tangent);
        let rotated = rotation * self.normal;
        let normal = (rotated - tangent * rotated.dot(tangent))
            .try_normalize()
            .unwrap_or_else(|| tangent.any_orthonormal_vector());
        Self {
            tangent,
            normal,
            binormal: tangent.cross(normal),
        }
    }

    fn direction(&self, angle: f64) -> DVec3 {
        self.normal * angle.cos() + self.binormal * angle.sin()
    }
}

fn transport_frames(points: &[DVec3]) -> Vec<Frame> {
    let segments: Vec<DVec3> = points
        .windows(2)
        .map(|w| (w[1] - w[0]).normalize())
        .collect();

    let mut frames: Vec<Frame> = Vec::with_capacity(points.len());
    frames.push(Frame::from_tangent(segments[0]));
    for i in 1..points.len() {
        let incoming = segments[i - 1];
        let tangent = match segments.get(i) {
            Some(outgoing) => (incoming + *outgoing).try_normalize().unwrap_or(*outgoing),
            None => incoming,
        };
        let frame = frames[i - 1].transport(tangent);
        frames.push(frame);
    }
    frames
}

/// Creates a tube around `line` with `radii[i]` at `line[i]`.
///
/// Consecutive coincident points are dropped together with their radius.
/// Side vertices carry radial normals; with `capping` both ends get a flat
/// fan on a separate ring so the cap normals stay flat.
///
/// # Errors
///
/// Returns an error when `line` and `radii` differ in length, a radius is
/// negative, `sides` is below three, or fewer than two distinct points
/// remain.
///
/// # Example
///
/// ```rust
/// use neuromesh::primitives::create_tube;
/// use glam::DVec3;
///
/// let line = [DVec3::ZERO, DVec3::Z, DVec3::new(1.0, 0.0, 2.0)];
/// let tube = create_tube(&line, &[0.5, 0.4, 0.3], 8, true).unwrap();
/// assert_eq!(tube.vertex_count(), 3 * 8 + 2 * 8);
/// ```
pub fn create_tube(line: &[DVec3], radii: &[f64], sides: u32, capping: bool) -> MeshResult<Mesh> {
    if line.len() != radii.len() {
        return Err(MeshError::length_mismatch(format!(
            "{} line points but {} radii",
            line.len(),
            radii.len()
        )));
    }
    if sides < MIN_SIDES {
        return Err(MeshError::degenerate(format!(
            "Tube sides must be at least {MIN_SIDES}: {sides}"
        )));
    }
    if let Some(r) = radii.iter().find(|r| !(**r >= 0.0)) {
        return Err(MeshError::degenerate(format!(
            "Tube radii must be non-negative: {r}"
        )));
    }

    let mut points: Vec<DVec3> = Vec::with_capacity(line.len());
    let mut point_radii: Vec<f64> = Vec::with_capacity(line.len());
    for (p, r) in line.iter().zip(radii) {
        if points.last().map_or(true, |last| last.distance(*p) > EPSILON) {
            points.push(*p);
            point_radii.push(*r);
        }
    }
    if points.len() < 2 {
        return Err(MeshError::degenerate(format!(
            "Tube needs at least two distinct points, got {}",
            points.len()
        )));
    }
    if points.len() < line.len() {
        log::debug!(
            "create_tube: dropped {} coincident points",
            line.len() - points.len()
        );
    }

    let frames = transport_frames(&points);
    let angles: Vec<f64> = (0..sides).map(|j| TAU * j as f64 / sides as f64).collect();

    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for ((p, r), frame) in points.iter().zip(&point_radii).zip(&frames) {
        for angle in &angles {
            let dir = frame.direction(*angle);
            vertices.push(*p + dir * *r);
            normals.push(dir);
        }
    }

    let n = sides;
    for ring in 0..points.len() as u32 - 1 {
        let a = ring * n;
        let b = a + n;
        for j in 0..n {
            let k = (j + 1) % n;
            indices.extend_from_slice(&[a + j, a + k, b + j]);
            indices.extend_from_slice(&[a + k, b + k, b + j]);
        }
    }

    if capping {
        let last = points.len() - 1;
        push_cap(
            &mut vertices,
            &mut normals,
            &mut indices,
            &frames[0],
            points[0],
            point_radii[0],
            &angles,
            false,
        );
        push_cap(
            &mut vertices,
            &mut normals,
            &mut indices,
            &frames[last],
            points[last],
            point_radii[last],
            &angles,
            true,
        );
    }

    let mut mesh = Mesh::from_indexed(Topology::TriangleList, vertices, indices);
    mesh.set_normals(normals);
    Ok(mesh)
}

/// Creates a tube with `config.default_sides` sides.
pub fn create_tube_with(
    line: &[DVec3],
    radii: &[f64],
    capping: bool,
    config: &GeometryConfig,
) -> MeshResult<Mesh> {
    create_tube(line, radii, config.default_sides, capping)
}

/// Fan cap facing along the tangent at the end of the line, against it at
/// the start.
#[allow(clippy::too_many_arguments)]
fn push_cap(
    vertices: &mut Vec<DVec3>,
    normals: &mut Vec<DVec3>,
    indices: &mut Vec<u32>,
    frame: &Frame,
    center: DVec3,
    radius: f64,
    angles: &[f64],
    at_end: bool,
) {
    let facing = if at_end { frame.tangent } else { -frame.tangent };
    let first = vertices.len() as u32;
    for angle in angles {
        vertices.push(center + frame.direction(*angle) * radius);
        normals.push(facing);
    }
    let last = vertices.len() as u32;
    for i in first + 1..last - 1 {
        if at_end {
            indices.extend_from_slice(&[first, i, i + 1]);
        } else {
            indices.extend_from_slice(&[first, i + 1, i]);
        }
    }
}
