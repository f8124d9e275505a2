//! # Primitives
//!
//! Mesh descriptor builders for parametric solids: sphere, torus, cylinder,
//! rectangular prism, helical spring and N-gon prism.
//!
//! Every builder validates its parameters before allocating, emits faces
//! wound outward, and finishes through [`Mesh::from_parts`](crate::Mesh::from_parts).

pub mod cylinder;
pub mod ngon;
pub mod prism;
pub mod sphere;
pub mod spring;
pub mod torus;

pub use cylinder::create_mesh_cylinder;
pub use ngon::create_ngon_prism;
pub use prism::create_mesh_rectangular_prism;
pub use sphere::create_mesh_sphere;
pub use spring::{create_spring, SpringCap, SpringParams};
pub use torus::create_mesh_torus;

use crate::error::{MeshError, MeshResult};

/// Rejects lengths that are zero, negative or not finite.
pub(crate) fn require_positive(name: &str, value: f64) -> MeshResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "{name} must be positive: {value}"
        )));
    }
    Ok(())
}

/// Rejects a vertex total that overflowed `u32` face indices.
pub(crate) fn require_indexable(name: &str, total: Option<u32>) -> MeshResult<u32> {
    total.ok_or_else(|| {
        MeshError::invalid_parameter(format!("{name} vertex count does not fit u32 indices"))
    })
}

/// Rejects counts below `min`.
pub(crate) fn require_count(name: &str, value: u32, min: u32) -> MeshResult<()> {
    if value < min {
        return Err(MeshError::invalid_parameter(format!(
            "{name} must be at least {min}: {value}"
        )));
    }
    Ok(())
}
