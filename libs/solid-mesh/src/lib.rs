//! # Solid Mesh
//!
//! Procedural mesh descriptors for parametric solids, plus the operations
//! that combine them into printable parts.
//!
//! ## Architecture
//!
//! ```text
//! math / ring  →  transform  →  primitives  →  composites / arrange
//!                                   ↓
//!                          ops (CsgEngine, BSP)
//! ```
//!
//! ## Conventions
//!
//! - All geometry is f64 (`glam::DVec3`)
//! - Faces are wound right-handed; normals point out of the solid
//! - Builders validate before allocating and never emit dangling indices
//! - Tessellation defaults come from an explicit
//!   [`TessellationConfig`](config::constants::TessellationConfig), never a
//!   global
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use solid_mesh::primitives::create_mesh_torus;
//! use solid_mesh::FaceMode;
//!
//! let torus = create_mesh_torus(4.0, 1.0, 10, 5, DVec3::ZERO, FaceMode::Triangles)?;
//! assert_eq!(torus.face_count(), 100);
//! # Ok::<(), solid_mesh::MeshError>(())
//! ```

pub mod arrange;
pub mod composites;
pub mod error;
pub mod math;
pub mod mesh;
pub mod ops;
pub mod primitives;
pub mod ring;
pub mod transform;

pub use error::{MeshError, MeshResult};
pub use mesh::{Face, FaceMode, Mesh};
pub use ops::{BspEngine, CsgEngine};
pub use transform::Transformation;
