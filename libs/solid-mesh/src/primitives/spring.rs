//! # Spring Primitive
//!
//! Helical spring swept along the X axis by repeating one rotation step and
//! one rise step per segment.

use config::constants::MIN_RING_POINTS;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::sphere::create_mesh_sphere;
use super::{require_count, require_indexable, require_positive};
use crate::error::{MeshError, MeshResult};
use crate::math::circle_points;
use crate::mesh::{Face, FaceMode, Mesh};
use crate::ring::RingIndex;
use crate::transform::Transformation;

/// How the two ends of a spring are closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpringCap {
    /// Ends are left open.
    Open,
    /// Each end ring fans to a centre vertex.
    #[default]
    Flat,
    /// A small sphere is joined at each end.
    Spherical,
}

/// Parameters for [`create_spring`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    /// Radius of the helix, to the centre of the cross-section.
    pub major_radius: f64,
    /// Segments per full turn.
    pub major_segments: u32,
    /// Radius of the swept cross-section.
    pub minor_radius: f64,
    /// Points per cross-section.
    pub minor_segments: u32,
    /// Advance along +X per full turn.
    pub rise: f64,
    /// Number of full turns.
    pub turns: u32,
    pub cap: SpringCap,
    pub mode: FaceMode,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            major_radius: 1.0,
            major_segments: 10,
            minor_radius: 0.1,
            minor_segments: 10,
            rise: 1.0,
            turns: 5,
            cap: SpringCap::Flat,
            mode: FaceMode::Quads,
        }
    }
}

impl SpringParams {
    fn validate(&self) -> MeshResult<()> {
        require_positive("spring major radius", self.major_radius)?;
        require_positive("spring minor radius", self.minor_radius)?;
        require_count("spring major segments", self.major_segments, MIN_RING_POINTS)?;
        require_count("spring minor segments", self.minor_segments, MIN_RING_POINTS)?;
        require_count("spring turns", self.turns, 1)?;
        if !self.rise.is_finite() {
            return Err(MeshError::invalid_parameter(format!(
                "spring rise must be finite: {}",
                self.rise
            )));
        }
        Ok(())
    }

    /// Centre of the first cross-section.
    pub fn start_center(&self) -> DVec3 {
        DVec3::new(0.0, self.major_radius, 0.0)
    }

    /// Centre of the last cross-section.
    pub fn end_center(&self) -> DVec3 {
        DVec3::new(self.turns as f64 * self.rise, self.major_radius, 0.0)
    }
}

/// Creates a helical spring mesh.
///
/// The start cross-section lies in the XY plane centred on `(0, R, 0)`.
/// Each of the `turns * major_segments` steps rotates the previous ring by
/// `360 / major_segments` degrees about +X and then moves it
/// `rise / major_segments` along +X.
///
/// # Vertex Layout
///
/// ```text
/// [start centre]   flat caps only
/// rings            minor_segments * (turns * major_segments + 1)
/// [end centre]     flat caps only
/// ```
///
/// # Example
///
/// ```rust
/// use solid_mesh::primitives::{create_spring, SpringCap, SpringParams};
///
/// let params = SpringParams { turns: 2, cap: SpringCap::Open, ..SpringParams::default() };
/// let mesh = create_spring(&params).unwrap();
/// assert_eq!(mesh.vertex_count(), 10 * (2 * 10 + 1));
/// ```
#[instrument(level = "debug")]
pub fn create_spring(params: &SpringParams) -> MeshResult<Mesh> {
    params.validate()?;

    let ring_len = params.minor_segments;
    let steps = require_indexable("spring", params.turns.checked_mul(params.major_segments))?;
    let vertex_total = require_indexable(
        "spring",
        steps
            .checked_add(1)
            .and_then(|rings| rings.checked_mul(ring_len))
            .and_then(|n| n.checked_add(2)),
    )?;
    let flat = params.cap == SpringCap::Flat;

    let step = Transformation::rotation_deg(
        360.0 / params.major_segments as f64,
        DVec3::X,
        DVec3::ZERO,
    )?
    .then(Transformation::translation(
        DVec3::X * (params.rise / params.major_segments as f64),
    ));

    let mut vertices = Vec::with_capacity(vertex_total as usize);
    if flat {
        vertices.push(params.start_center());
    }
    let rings = RingIndex::new(vertices.len() as u32, ring_len);

    let mut section = circle_points(params.minor_radius, ring_len, params.start_center())?;
    for _ in 0..=steps {
        vertices.extend_from_slice(&section);
        section = step.apply_points(&section);
    }

    let mut faces = Vec::new();
    for s in 0..steps {
        for p in 0..ring_len {
            params.mode.push_quad(&mut faces, rings.quad(s, s + 1, p));
        }
    }

    if flat {
        let start_hub = 0;
        for p in 0..ring_len {
            faces.push(Face::Triangle([start_hub, rings.next(0, p), rings.at(0, p)]));
        }
        let end_hub = vertices.len() as u32;
        vertices.push(params.end_center());
        for p in 0..ring_len {
            faces.push(Face::Triangle([end_hub, rings.at(steps, p), rings.next(steps, p)]));
        }
    }
    debug!(steps, ring_len, cap = ?params.cap, "swept spring");

    let mut mesh = Mesh::from_parts(vertices, faces)?;
    if params.cap == SpringCap::Spherical {
        for center in [params.start_center(), params.end_center()] {
            let ball = create_mesh_sphere(
                params.minor_radius,
                params.minor_segments,
                params.minor_segments,
                center,
                params.mode,
            )?;
            mesh.merge(&ball)?;
        }
    }

    info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "built spring mesh"
    );
    Ok(mesh)
}
