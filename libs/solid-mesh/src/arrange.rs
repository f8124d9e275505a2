//! # Arranging Copies
//!
//! Arrays and polar placement. Each copy is an independent mesh descriptor
//! built from the same input and given its own transform.

use glam::DVec3;
use tracing::{debug, instrument};

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::transform::Transformation;

fn require_copies(name: &str, count: u32) -> MeshResult<()> {
    if count == 0 {
        return Err(MeshError::invalid_parameter(format!(
            "{name} needs at least one copy"
        )));
    }
    Ok(())
}

/// `count` copies, copy `i` translated by `i * step`.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::arrange::linear_array;
/// use solid_mesh::primitives::create_ngon_prism;
/// use solid_mesh::FaceMode;
///
/// let post = create_ngon_prism(0.5, 2.0, 6, false, FaceMode::Quads).unwrap();
/// let fence = linear_array(&post, 4, DVec3::X * 3.0).unwrap();
/// assert_eq!(fence.len(), 4);
/// ```
#[instrument(level = "debug", skip(mesh))]
pub fn linear_array(mesh: &Mesh, count: u32, step: DVec3) -> MeshResult<Vec<Mesh>> {
    require_copies("linear array", count)?;
    Ok((0..count)
        .map(|i| mesh.translated(step * i as f64))
        .collect())
}

/// `count` copies spread evenly around `axis` through `pivot`.
///
/// Copy `i` is rotated by `i * 360 / count` degrees.
#[instrument(level = "debug", skip(mesh))]
pub fn radial_array(mesh: &Mesh, count: u32, axis: DVec3, pivot: DVec3) -> MeshResult<Vec<Mesh>> {
    require_copies("radial array", count)?;
    let step = 360.0 / count as f64;
    (0..count)
        .map(|i| {
            let rotation = Transformation::rotation_deg(step * i as f64, axis, pivot)?;
            Ok(rotation.apply_mesh(mesh))
        })
        .collect()
}

/// Copies on an `x * y * z` lattice, X varying slowest.
#[instrument(level = "debug", skip(mesh))]
pub fn grid_array(mesh: &Mesh, counts: [u32; 3], spacing: DVec3) -> MeshResult<Vec<Mesh>> {
    let [nx, ny, nz] = counts;
    require_copies("grid array x", nx)?;
    require_copies("grid array y", ny)?;
    require_copies("grid array z", nz)?;

    let mut copies = Vec::with_capacity((nx * ny * nz) as usize);
    for xi in 0..nx {
        for yi in 0..ny {
            for zi in 0..nz {
                let offset = DVec3::new(xi as f64, yi as f64, zi as f64) * spacing;
                copies.push(mesh.translated(offset));
            }
        }
    }
    debug!(copies = copies.len(), "built grid array");
    Ok(copies)
}

/// Places a mesh built around the origin, top facing +Z, on a sphere of
/// radius `radius` so that its top faces outward.
///
/// # Arguments
///
/// * `z_angle` - Degrees around +Z from the +X axis
/// * `xy_angle` - Degrees above the XY plane, toward +Z
#[instrument(level = "debug", skip(mesh))]
pub fn position_polar(mesh: &Mesh, radius: f64, z_angle: f64, xy_angle: f64) -> MeshResult<Mesh> {
    let placement = polar_transform(radius, z_angle, xy_angle)?;
    Ok(placement.apply_mesh(mesh))
}

/// The transform used by [`position_polar`].
pub fn polar_transform(radius: f64, z_angle: f64, xy_angle: f64) -> MeshResult<Transformation> {
    Ok(Transformation::rotation_deg(90.0, DVec3::Y, DVec3::ZERO)?
        .then(Transformation::translation(DVec3::X * radius))
        .then(Transformation::rotation_deg(-xy_angle, DVec3::Y, DVec3::ZERO)?)
        .then(Transformation::rotation_deg(z_angle, DVec3::Z, DVec3::ZERO)?))
}
