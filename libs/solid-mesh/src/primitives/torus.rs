//! # Torus Primitive
//!
//! Evenly faced torus swept from a minor circle around the major circle.

use config::constants::{MIN_RING_POINTS, MIN_TORUS_RINGS};
use glam::DVec3;
use tracing::{info, instrument};

use super::{require_count, require_indexable, require_positive};
use crate::error::{MeshError, MeshResult};
use crate::math::circle_points;
use crate::mesh::{FaceMode, Mesh};
use crate::ring::RingIndex;
use crate::transform::Transformation;

/// Creates an evenly faced torus mesh lying in the XY plane.
///
/// # Arguments
///
/// * `major_radius` - Distance from the centre to the middle of the tube
/// * `minor_radius` - Tube radius, strictly below `major_radius`
/// * `rings` - Cross-sections around the major circle (rounded down to even)
/// * `ring_points` - Points per cross-section
/// * `center` - Centre of the torus
/// * `mode` - Quads, or quads split into triangles
///
/// Vertices are stored ring-major; the last ring wraps back to ring 0.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::primitives::create_mesh_torus;
/// use solid_mesh::FaceMode;
///
/// let mesh = create_mesh_torus(4.0, 1.0, 10, 5, DVec3::ZERO, FaceMode::Quads).unwrap();
/// assert_eq!(mesh.vertex_count(), 50);
/// assert_eq!(mesh.face_count(), 50);
/// ```
#[instrument(level = "debug")]
pub fn create_mesh_torus(
    major_radius: f64,
    minor_radius: f64,
    rings: u32,
    ring_points: u32,
    center: DVec3,
    mode: FaceMode,
) -> MeshResult<Mesh> {
    require_positive("torus major radius", major_radius)?;
    require_positive("torus minor radius", minor_radius)?;
    if minor_radius >= major_radius {
        return Err(MeshError::invalid_parameter(format!(
            "torus minor radius {minor_radius} must be below major radius {major_radius}"
        )));
    }
    let rings = (rings / 2) * 2;
    require_count("torus rings", rings, MIN_TORUS_RINGS)?;
    require_count("torus ring points", ring_points, MIN_RING_POINTS)?;
    let vertex_total = require_indexable("torus", rings.checked_mul(ring_points))?;

    // Cross-section stood upright in the XZ plane at +X
    let section_center = DVec3::new(major_radius, 0.0, 0.0);
    let upright = Transformation::rotation_deg(90.0, DVec3::X, section_center)?;
    let mut section = upright.apply_points(&circle_points(minor_radius, ring_points, section_center)?);

    let step = Transformation::rotation_deg(360.0 / rings as f64, DVec3::Z, DVec3::ZERO)?;
    let mut vertices = Vec::with_capacity(vertex_total as usize);
    for _ in 0..rings {
        vertices.extend_from_slice(&section);
        section = step.apply_points(&section);
    }

    let ring = RingIndex::new(0, ring_points);
    let mut faces = Vec::with_capacity(vertex_total as usize * mode.faces_per_quad());
    for i in 0..rings {
        let j = (i + 1) % rings;
        for k in 0..ring_points {
            mode.push_quad(
                &mut faces,
                [ring.next(i, k), ring.at(i, k), ring.at(j, k), ring.next(j, k)],
            );
        }
    }

    let mut mesh = Mesh::from_parts(vertices, faces)?;
    mesh.translate(center);
    info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "built torus mesh"
    );
    Ok(mesh)
}
