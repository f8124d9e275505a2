//! # Config Crate
//!
//! Centralized configuration constants for the solid generation pipeline.
//! All magic numbers and tunable parameters are defined here so that the
//! mesh builders and the surface text layout agree on tolerances,
//! tessellation defaults and text layout defaults.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{TessellationConfig, DEFAULT_SEGMENTS, EPSILON};
//!
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//!
//! let tessellation = TessellationConfig::default();
//! assert_eq!(tessellation.default_segment_count, DEFAULT_SEGMENTS);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Explicit Configuration**: Tessellation defaults travel as a value,
//!   never as process-wide state
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
