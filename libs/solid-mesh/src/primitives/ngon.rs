//! # N-gon Prism Primitive

use config::constants::MIN_RING_POINTS;
use glam::DVec3;
use tracing::{info, instrument};

use super::{require_count, require_indexable, require_positive};
use crate::error::MeshResult;
use crate::math::circle_points;
use crate::mesh::{Face, FaceMode, Mesh};

/// Creates a prism with regular N-gon ends, centred on the origin.
///
/// Rim vertices alternate top and bottom (`2i` on top, `2i + 1` below),
/// followed by the top centre and the bottom centre. With `open` the ends
/// are left uncapped.
///
/// # Example
///
/// ```rust
/// use solid_mesh::primitives::create_ngon_prism;
/// use solid_mesh::FaceMode;
///
/// let hex = create_ngon_prism(1.0, 2.0, 6, false, FaceMode::Quads).unwrap();
/// assert_eq!(hex.vertex_count(), 14);
/// assert_eq!(hex.face_count(), 6 + 12);
/// ```
#[instrument(level = "debug")]
pub fn create_ngon_prism(
    radius: f64,
    height: f64,
    sides: u32,
    open: bool,
    mode: FaceMode,
) -> MeshResult<Mesh> {
    require_positive("n-gon radius", radius)?;
    require_positive("n-gon height", height)?;
    require_count("n-gon sides", sides, MIN_RING_POINTS)?;

    let half = height / 2.0;
    let vertex_total = require_indexable(
        "n-gon prism",
        sides.checked_mul(2).and_then(|n| n.checked_add(2)),
    )?;
    let mut vertices = Vec::with_capacity(vertex_total as usize);
    for p in circle_points(radius, sides, DVec3::ZERO)? {
        vertices.push(p + DVec3::Z * half);
        vertices.push(p - DVec3::Z * half);
    }
    let top_hub = vertices.len() as u32;
    vertices.push(DVec3::Z * half);
    vertices.push(DVec3::Z * -half);
    let bottom_hub = top_hub + 1;

    let mut faces = Vec::new();
    for i in 0..sides {
        let l = i * 2;
        let r = ((i + 1) % sides) * 2;
        mode.push_quad(&mut faces, [l, l + 1, r + 1, r]);
    }
    if !open {
        for i in 0..sides {
            let l = i * 2;
            let r = ((i + 1) % sides) * 2;
            faces.push(Face::Triangle([l, r, top_hub]));
            faces.push(Face::Triangle([l + 1, bottom_hub, r + 1]));
        }
    }

    info!(sides, open, "built n-gon prism mesh");
    Mesh::from_parts(vertices, faces)
}
