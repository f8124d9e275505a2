//! # Configuration Constants
//!
//! Centralized constants for the solid generation pipeline. Geometry
//! tolerances, tessellation defaults and surface text defaults are defined
//! here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Tessellation**: Default segment counts and minimum ring sizes
//! - **Text Layout**: Defaults for spherical and cylindrical text

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Examples
/// ```
/// use config::constants::EPSILON;
/// assert!((1.0_f64 - (1.0 + 1e-11)).abs() < EPSILON);
/// ```
pub const EPSILON: f64 = 1e-10;

/// Epsilon for treating two vertices as coincident.
///
/// Used when validating triangles produced by the boolean engine: a triangle
/// whose doubled area falls below this value is considered degenerate.
pub const VERTEX_MERGE_EPSILON: f64 = 1e-8;

/// Plane thickness used by the BSP boolean engine when classifying points.
///
/// # Examples
/// ```
/// use config::constants::{BSP_EPSILON, EPSILON};
/// assert!(BSP_EPSILON > EPSILON);
/// ```
pub const BSP_EPSILON: f64 = 1e-5;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Default segment count ("fineness") for curved shells and composites.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_SEGMENTS;
/// assert!(DEFAULT_SEGMENTS >= 12);
/// ```
pub const DEFAULT_SEGMENTS: u32 = 32;

/// Fewest points a closed ring may have before it stops enclosing area.
pub const MIN_RING_POINTS: u32 = 3;

/// Fewest rings a swept torus may have once rounded down to an even count.
pub const MIN_TORUS_RINGS: u32 = 4;

/// Fewest latitude rings a derived shell sphere is given.
pub const MIN_SPHERE_LATITUDES: u32 = 3;

// =============================================================================
// TEXT LAYOUT CONSTANTS
// =============================================================================

/// Default gap between neighbouring glyphs, in degrees of arc.
pub const DEFAULT_SPACER_DEG: f64 = 4.0;

/// Default angular height of laid-out text, in degrees of arc.
pub const DEFAULT_ANGULAR_HEIGHT_DEG: f64 = 30.0;

/// Default radial thickness of the trimming shell.
pub const DEFAULT_TEXT_THICKNESS: f64 = 0.05;

/// Default outer radius for surface text.
pub const DEFAULT_TEXT_RADIUS: f64 = 1.0;

/// Character standing in for a space. It is measured for spacing but never
/// contributes geometry.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_ESCAPE;
/// assert_ne!(DEFAULT_ESCAPE, ' ');
/// ```
pub const DEFAULT_ESCAPE: char = '_';

/// Default subdivision hint handed to the glyph renderer.
pub const DEFAULT_SUBDIVIDE: u32 = 1;

// =============================================================================
// TESSELLATION CONFIG
// =============================================================================

/// Explicit tessellation settings threaded into every call that needs a
/// default resolution.
///
/// # Examples
/// ```
/// use config::constants::TessellationConfig;
/// let config = TessellationConfig::default();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.cylinder_faces(), config.default_segment_count);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TessellationConfig {
    /// Segment count used around the circumference of curved primitives.
    pub default_segment_count: u32,
}

impl TessellationConfig {
    /// Builds a configuration enforcing a segment count that can form a ring.
    ///
    /// # Examples
    /// ```
    /// use config::constants::TessellationConfig;
    /// let cfg = TessellationConfig::new(24).expect("valid config");
    /// assert_eq!(cfg.default_segment_count, 24);
    /// assert!(TessellationConfig::new(0).is_err());
    /// ```
    pub fn new(default_segment_count: u32) -> Result<Self, ConfigError> {
        let config = Self {
            default_segment_count,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the segment count can close a ring.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_segment_count < MIN_RING_POINTS {
            return Err(ConfigError::InvalidSegments(self.default_segment_count));
        }
        Ok(())
    }

    /// Longitude count (points per latitude ring) for derived spheres.
    pub fn sphere_longitudes(&self) -> u32 {
        self.default_segment_count
    }

    /// Latitude ring count for derived spheres, before odd adjustment.
    ///
    /// # Examples
    /// ```
    /// use config::constants::TessellationConfig;
    /// assert_eq!(TessellationConfig::new(32).unwrap().sphere_latitudes(), 16);
    /// assert_eq!(TessellationConfig::new(3).unwrap().sphere_latitudes(), 3);
    /// ```
    pub fn sphere_latitudes(&self) -> u32 {
        (self.default_segment_count / 2).max(MIN_SPHERE_LATITUDES)
    }

    /// Circumferential face count for derived cylinders.
    pub fn cylinder_faces(&self) -> u32 {
        self.default_segment_count
    }
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            default_segment_count: DEFAULT_SEGMENTS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the requested segment count is too small to form a ring.
    InvalidSegments(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSegments(value) => {
                write!(f, "default_segment_count must be >= {MIN_RING_POINTS}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPERS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
