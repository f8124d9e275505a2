//! # Transform Applier
//!
//! Rigid and uniform-scale transforms expressed as a `DMat4`. Sweep builders
//! walk a cross-section by repeatedly applying one step transform to the
//! previous ring, which keeps ring-to-ring indexing aligned.

use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

use config::constants::EPSILON;

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;

/// An affine transform applied to points, point lists and meshes.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::Transformation;
///
/// let rot = Transformation::rotation_deg(90.0, DVec3::Z, DVec3::new(1.0, 0.0, 0.0)).unwrap();
/// let p = rot.apply_point(DVec3::new(2.0, 0.0, 0.0));
/// assert!((p - DVec3::new(1.0, 1.0, 0.0)).length() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transformation(DMat4);

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    /// The identity transform.
    pub fn identity() -> Self {
        Self(DMat4::IDENTITY)
    }

    /// Translation by `offset`.
    pub fn translation(offset: DVec3) -> Self {
        Self(DMat4::from_translation(offset))
    }

    /// Rotation of `angle_deg` about `axis` through `pivot`.
    ///
    /// Composed as translate pivot to origin, rotate, translate back.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a zero-length or non-finite axis.
    pub fn rotation_deg(angle_deg: f64, axis: DVec3, pivot: DVec3) -> MeshResult<Self> {
        let len = axis.length();
        if !len.is_finite() || len < EPSILON {
            return Err(MeshError::invalid_parameter(format!(
                "rotation axis must be non-zero: {axis}"
            )));
        }
        let rotation = DQuat::from_axis_angle(axis / len, angle_deg.to_radians());
        Ok(Self(
            DMat4::from_translation(pivot)
                * DMat4::from_quat(rotation)
                * DMat4::from_translation(-pivot),
        ))
    }

    /// Uniform scale by `factor` about `pivot`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a zero or non-finite factor.
    pub fn scale_uniform(factor: f64, pivot: DVec3) -> MeshResult<Self> {
        if !factor.is_finite() || factor.abs() < EPSILON {
            return Err(MeshError::invalid_parameter(format!(
                "scale factor must be non-zero: {factor}"
            )));
        }
        Ok(Self(
            DMat4::from_translation(pivot)
                * DMat4::from_scale(DVec3::splat(factor))
                * DMat4::from_translation(-pivot),
        ))
    }

    /// Applies `self` first, then `next`.
    pub fn then(self, next: Transformation) -> Self {
        Self(next.0 * self.0)
    }

    /// The underlying matrix.
    #[inline]
    pub fn matrix(&self) -> DMat4 {
        self.0
    }

    /// Transforms a single point.
    #[inline]
    pub fn apply_point(&self, point: DVec3) -> DVec3 {
        self.0.transform_point3(point)
    }

    /// Transforms a list of points, preserving order.
    pub fn apply_points(&self, points: &[DVec3]) -> Vec<DVec3> {
        points.iter().map(|&p| self.apply_point(p)).collect()
    }

    /// Returns a transformed copy of `mesh`.
    pub fn apply_mesh(&self, mesh: &Mesh) -> Mesh {
        mesh.transformed(&self.0)
    }
}

impl From<DMat4> for Transformation {
    fn from(matrix: DMat4) -> Self {
        Self(matrix)
    }
}
