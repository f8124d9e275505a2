//! # Mesh Operations
//!
//! Boolean operations (CSG) and the engine seam used by higher layers.

pub mod boolean;
pub mod engine;

pub use boolean::{difference, intersection, union};
pub use engine::{BspEngine, CsgEngine};
