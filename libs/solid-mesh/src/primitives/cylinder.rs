//! # Cylinder Primitive
//!
//! Evenly faced cylinder with filled ends. The height runs along Z.

use config::constants::MIN_RING_POINTS;
use glam::DVec3;
use tracing::{debug, info, instrument};

use super::{require_count, require_indexable, require_positive};
use crate::error::MeshResult;
use crate::math::circle_points;
use crate::mesh::{Face, FaceMode, Mesh};
use crate::ring::RingIndex;
use crate::transform::Transformation;

/// Which end of the cylinder a cap closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Bottom,
    Top,
}

/// Creates an evenly faced cylinder mesh.
///
/// # Arguments
///
/// * `radius` - Cylinder radius
/// * `height` - Cylinder height, centred on `center`
/// * `r_faces` - Faces along each radial line of an end cap
/// * `h_faces` - Faces along the height of the wall
/// * `c_faces` - Faces around the circumference
/// * `center` - Centre of the cylinder
/// * `mode` - Quads, or quads split into triangles
///
/// # Vertex Layout
///
/// ```text
/// wall rings      c_faces * (h_faces + 1)
/// bottom rings    c_faces * (r_faces - 1), then bottom centre
/// top rings       c_faces * (r_faces - 1), then top centre
/// ```
///
/// The innermost ring of each end fans to its centre with triangles.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::primitives::create_mesh_cylinder;
/// use solid_mesh::FaceMode;
///
/// let mesh = create_mesh_cylinder(1.0, 5.0, 5, 5, 10, DVec3::ZERO, FaceMode::Quads).unwrap();
/// assert_eq!(mesh.vertex_count(), 10 * 6 + 2 * (4 * 10 + 1));
/// ```
#[instrument(level = "debug")]
pub fn create_mesh_cylinder(
    radius: f64,
    height: f64,
    r_faces: u32,
    h_faces: u32,
    c_faces: u32,
    center: DVec3,
    mode: FaceMode,
) -> MeshResult<Mesh> {
    require_positive("cylinder radius", radius)?;
    require_positive("cylinder height", height)?;
    require_count("cylinder radial faces", r_faces, 1)?;
    require_count("cylinder height faces", h_faces, 1)?;
    require_count("cylinder circumference faces", c_faces, MIN_RING_POINTS)?;

    let vertex_total = require_indexable(
        "cylinder",
        h_faces
            .checked_add(1)
            .and_then(|rings| rings.checked_mul(c_faces))
            .and_then(|wall| {
                let caps = (r_faces - 1).checked_mul(c_faces)?.checked_add(1)?.checked_mul(2)?;
                wall.checked_add(caps)
            }),
    )?;
    let wall_rings = h_faces + 1;
    let cap_rings = r_faces - 1;
    let mut vertices = Vec::with_capacity(vertex_total as usize);
    let mut faces = Vec::new();

    // Curved wall, swept upward ring by ring
    let bottom_z = center.z - height / 2.0;
    let rise = Transformation::translation(DVec3::Z * (height / h_faces as f64));
    let mut ring = circle_points(radius, c_faces, DVec3::new(center.x, center.y, bottom_z))?;
    for _ in 0..wall_rings {
        vertices.extend_from_slice(&ring);
        ring = rise.apply_points(&ring);
    }

    let wall = RingIndex::new(0, c_faces);
    for hi in 0..h_faces {
        for ci in 0..c_faces {
            mode.push_quad(&mut faces, wall.quad(hi, hi + 1, ci));
        }
    }

    let r_step = radius / r_faces as f64;
    for (end, z, outer) in [
        (End::Bottom, bottom_z, wall.at(0, 0)),
        (End::Top, center.z + height / 2.0, wall.at(h_faces, 0)),
    ] {
        let mut prev = RingIndex::new(outer, c_faces);
        for ri in 1..=cap_rings {
            let inner = RingIndex::new(vertices.len() as u32, c_faces);
            vertices.extend(circle_points(
                radius - ri as f64 * r_step,
                c_faces,
                DVec3::new(center.x, center.y, z),
            )?);
            for ci in 0..c_faces {
                let quad = match end {
                    End::Bottom => [inner.at(0, ci), inner.next(0, ci), prev.next(0, ci), prev.at(0, ci)],
                    End::Top => [prev.at(0, ci), prev.next(0, ci), inner.next(0, ci), inner.at(0, ci)],
                };
                mode.push_quad(&mut faces, quad);
            }
            prev = inner;
        }

        let hub = vertices.len() as u32;
        vertices.push(DVec3::new(center.x, center.y, z));
        for ci in 0..c_faces {
            let tri = match end {
                End::Bottom => [hub, prev.next(0, ci), prev.at(0, ci)],
                End::Top => [hub, prev.at(0, ci), prev.next(0, ci)],
            };
            faces.push(Face::Triangle(tri));
        }
        debug!(?end, hub, "closed cylinder end");
    }

    info!(
        vertices = vertices.len(),
        faces = faces.len(),
        "built cylinder mesh"
    );
    Mesh::from_parts(vertices, faces)
}
