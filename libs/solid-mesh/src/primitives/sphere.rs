//! # Sphere Primitive
//!
//! Evenly faced sphere built from latitude rings.

use config::constants::MIN_RING_POINTS;
use glam::DVec3;
use tracing::{debug, info, instrument};

use super::{require_count, require_indexable, require_positive};
use crate::error::{MeshError, MeshResult};
use crate::math::{circle_points, cos_deg, tan_deg};
use crate::mesh::{Face, FaceMode, Mesh};
use crate::ring::RingIndex;

/// Creates an evenly faced sphere mesh.
///
/// # Arguments
///
/// * `radius` - The radius of the sphere
/// * `latitudes` - Latitude rings including the equator, made odd by adding 1
/// * `longitudes` - Points per latitude ring
/// * `center` - Centre of the sphere
/// * `mode` - Quads, or quads split into triangles
///
/// # Algorithm
///
/// - The equator ring comes first (indices `0..longitudes`)
/// - `hem_lats = latitudes / 2`; latitude step is `90 / (hem_lats + 1)` degrees
/// - Each hemisphere adds `hem_lats - 1` rings of radius `cos(a) * r` at
///   height `tan(a) * cos(a) * r`, then one pole vertex
/// - Band quads are wound in opposite index order in the two hemispheres;
///   the ring next to each pole closes with a triangle fan
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::primitives::create_mesh_sphere;
/// use solid_mesh::FaceMode;
///
/// let mesh = create_mesh_sphere(1.0, 11, 10, DVec3::ZERO, FaceMode::Quads).unwrap();
/// assert_eq!(mesh.vertex_count(), 92);
/// ```
#[instrument(level = "debug")]
pub fn create_mesh_sphere(
    radius: f64,
    latitudes: u32,
    longitudes: u32,
    center: DVec3,
    mode: FaceMode,
) -> MeshResult<Mesh> {
    require_positive("sphere radius", radius)?;
    require_count("sphere longitudes", longitudes, MIN_RING_POINTS)?;

    let latitudes = latitudes + (1 - latitudes % 2);
    let hem_lats = latitudes / 2;
    if hem_lats < 1 {
        return Err(MeshError::invalid_parameter(format!(
            "sphere needs at least 2 latitudes: {latitudes}"
        )));
    }
    let lat_step = 90.0 / (hem_lats + 1) as f64;
    let hem_rings = hem_lats - 1;
    debug!(latitudes, hem_lats, lat_step, "sphere latitude layout");

    let ring_count = 1 + 2 * hem_rings;
    let vertex_total = require_indexable(
        "sphere",
        ring_count
            .checked_mul(longitudes)
            .and_then(|n| n.checked_add(2)),
    )?;
    let mut vertices = Vec::with_capacity(vertex_total as usize);
    let mut faces = Vec::with_capacity((ring_count * longitudes) as usize * 2);

    vertices.extend(circle_points(radius, longitudes, center)?);

    let mut hemisphere = |sign: f64, vertices: &mut Vec<DVec3>| -> MeshResult<()> {
        // ring bases from the equator outward
        let mut chain = vec![0u32];
        for li in 1..=hem_rings {
            let angle = li as f64 * lat_step;
            let csr = cos_deg(angle) * radius;
            let csh = tan_deg(angle) * csr;
            chain.push(vertices.len() as u32);
            vertices.extend(circle_points(
                csr,
                longitudes,
                center + DVec3::Z * (sign * csh),
            )?);
        }
        let pole = vertices.len() as u32;
        vertices.push(center + DVec3::Z * (sign * radius));

        for pair in chain.windows(2) {
            let near = RingIndex::new(pair[0], longitudes);
            let far = RingIndex::new(pair[1], longitudes);
            for i in 0..longitudes {
                let quad = if sign > 0.0 {
                    [near.at(0, i), near.next(0, i), far.next(0, i), far.at(0, i)]
                } else {
                    [far.at(0, i), far.next(0, i), near.next(0, i), near.at(0, i)]
                };
                mode.push_quad(&mut faces, quad);
            }
        }

        let last = RingIndex::new(chain[chain.len() - 1], longitudes);
        for i in 0..longitudes {
            let tri = if sign > 0.0 {
                [last.at(0, i), last.next(0, i), pole]
            } else {
                [pole, last.next(0, i), last.at(0, i)]
            };
            faces.push(Face::Triangle(tri));
        }
        Ok(())
    };

    hemisphere(1.0, &mut vertices)?;
    hemisphere(-1.0, &mut vertices)?;

    info!(
        vertices = vertices.len(),
        faces = faces.len(),
        "built sphere mesh"
    );
    Mesh::from_parts(vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_sphere_11_by_10_counts() {
        let mesh = create_mesh_sphere(1.0, 11, 10, DVec3::ZERO, FaceMode::Quads).unwrap();
        let hem_lats = 5;
        assert_eq!(mesh.vertex_count(), 10 + 2 * (hem_lats - 1) * 10 + 2);
        // 4 bands per hemisphere + one fan each
        assert_eq!(mesh.face_count(), 2 * (4 * 10 + 10));
    }

    #[test]
    fn test_even_latitudes_round_up() {
        let even = create_mesh_sphere(1.0, 10, 8, DVec3::ZERO, FaceMode::Quads).unwrap();
        let odd = create_mesh_sphere(1.0, 11, 8, DVec3::ZERO, FaceMode::Quads).unwrap();
        assert_eq!(even, odd);
    }

    #[test]
    fn test_each_pole_referenced_by_longitudes_faces() {
        let longitudes = 10;
        let mesh = create_mesh_sphere(2.0, 11, longitudes, DVec3::ZERO, FaceMode::Quads).unwrap();
        for (idx, v) in mesh.vertices().iter().enumerate() {
            if (v.z.abs() - 2.0).abs() < 1e-12 {
                let refs = mesh
                    .faces()
                    .iter()
                    .filter(|f| f.indices().contains(&(idx as u32)))
                    .count();
                assert_eq!(refs, longitudes as usize);
            }
        }
        let poles = mesh
            .vertices()
            .iter()
            .filter(|v| (v.z.abs() - 2.0).abs() < 1e-12)
            .count();
        assert_eq!(poles, 2);
    }

    #[test]
    fn test_vertices_on_surface() {
        let center = DVec3::new(1.0, -2.0, 3.0);
        let mesh = create_mesh_sphere(3.0, 9, 12, center, FaceMode::Quads).unwrap();
        for v in mesh.vertices() {
            assert_relative_eq!((*v - center).length(), 3.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_outward_volume_and_triangle_mode() {
        let quads = create_mesh_sphere(1.0, 15, 24, DVec3::ZERO, FaceMode::Quads).unwrap();
        let tris = create_mesh_sphere(1.0, 15, 24, DVec3::ZERO, FaceMode::Triangles).unwrap();
        let volume = quads.signed_volume();
        assert!(volume > 0.0);
        assert!(volume < 4.0 / 3.0 * PI);
        assert_relative_eq!(volume, tris.signed_volume(), epsilon = 1e-9);
        // fans stay triangles, band quads double
        let fans = 2 * 24;
        assert_eq!(tris.face_count() - fans, 2 * (quads.face_count() - fans));
    }

    #[test]
    fn test_three_latitudes_fans_from_equator() {
        let mesh = create_mesh_sphere(1.0, 3, 6, DVec3::ZERO, FaceMode::Quads).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 12);
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn test_degenerate_parameters() {
        assert!(create_mesh_sphere(0.0, 11, 10, DVec3::ZERO, FaceMode::Quads).is_err());
        assert!(create_mesh_sphere(1.0, 11, 2, DVec3::ZERO, FaceMode::Quads).is_err());
        assert!(create_mesh_sphere(1.0, 0, 10, DVec3::ZERO, FaceMode::Quads).is_err());
        assert!(create_mesh_sphere(1.0, 1, 10, DVec3::ZERO, FaceMode::Quads).is_err());
    }
}
