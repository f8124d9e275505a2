//! # Point and Angle Math
//!
//! Circle point generation, degree trigonometry and rotation helpers used by
//! every builder and by text layout.

use std::f64::consts::TAU;

use config::constants::EPSILON;
use glam::DVec3;

use crate::error::{MeshError, MeshResult};

// =============================================================================
// DEGREE TRIGONOMETRY
// =============================================================================

/// Sine of an angle given in degrees.
#[inline]
pub fn sin_deg(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

/// Cosine of an angle given in degrees.
#[inline]
pub fn cos_deg(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Tangent of an angle given in degrees.
#[inline]
pub fn tan_deg(degrees: f64) -> f64 {
    degrees.to_radians().tan()
}

/// Arcsine in degrees, failing instead of returning NaN.
///
/// # Errors
///
/// `LayoutOverflow` when `value` is outside `[-1, 1]`.
///
/// # Example
///
/// ```rust
/// use solid_mesh::math::asin_deg_checked;
///
/// assert!((asin_deg_checked(0.5).unwrap() - 30.0).abs() < 1e-9);
/// assert!(asin_deg_checked(1.5).is_err());
/// ```
pub fn asin_deg_checked(value: f64) -> MeshResult<f64> {
    if !value.is_finite() || value.abs() > 1.0 {
        return Err(MeshError::layout_overflow(format!(
            "asin argument {value} is outside [-1, 1]"
        )));
    }
    Ok(value.asin().to_degrees())
}

// =============================================================================
// POINT GENERATORS
// =============================================================================

/// Points evenly spaced around a circle in the XY plane.
///
/// Point `i` sits at angle `i * 2π / count` measured from +X, so rings built
/// by different callers line up index for index.
///
/// # Arguments
///
/// * `radius` - Circle radius (zero gives `count` coincident points)
/// * `count` - Number of points, at least 1
/// * `center` - Centre of the circle
///
/// # Errors
///
/// `InvalidParameter` when `count` is zero or `radius` is negative.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::math::circle_points;
///
/// let pts = circle_points(2.0, 4, DVec3::ZERO).unwrap();
/// assert!((pts[1] - DVec3::new(0.0, 2.0, 0.0)).length() < 1e-12);
/// ```
pub fn circle_points(radius: f64, count: u32, center: DVec3) -> MeshResult<Vec<DVec3>> {
    if count == 0 {
        return Err(MeshError::invalid_parameter(
            "circle needs at least one vertex",
        ));
    }
    if !radius.is_finite() || radius < 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "circle radius must be non-negative: {radius}"
        )));
    }

    let step = TAU / count as f64;
    Ok((0..count)
        .map(|i| {
            let angle = step * i as f64;
            center + DVec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
        })
        .collect())
}

/// Points spiralling over a sphere from the north pole to the south pole.
///
/// Produces `loops * points_per_loop` spiral points followed by the south
/// pole `(0, 0, -radius)`.
///
/// # Errors
///
/// `InvalidParameter` for a non-positive radius or zero counts.
pub fn spiral_points_on_sphere(
    radius: f64,
    loops: u32,
    points_per_loop: u32,
    clockwise: bool,
) -> MeshResult<Vec<DVec3>> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "spiral sphere radius must be positive: {radius}"
        )));
    }
    if loops == 0 || points_per_loop == 0 {
        return Err(MeshError::invalid_parameter(
            "spiral needs at least one loop and one point per loop",
        ));
    }

    let total = loops * points_per_loop;
    let vert_step = 180.0 / (total + 1) as f64;
    let mut loop_step = 360.0 / points_per_loop as f64;
    if clockwise {
        loop_step = -loop_step;
    }

    let mut points = Vec::with_capacity(total as usize + 1);
    for k in 0..total {
        let vert_angle = 90.0 + vert_step * k as f64;
        let loop_angle = loop_step * k as f64;
        let ring_radius = radius * cos_deg(vert_angle);
        points.push(DVec3::new(
            ring_radius * cos_deg(loop_angle),
            ring_radius * sin_deg(loop_angle),
            radius * sin_deg(vert_angle),
        ));
    }
    points.push(DVec3::new(0.0, 0.0, -radius));
    Ok(points)
}

// =============================================================================
// ROTATION HELPERS
// =============================================================================

/// Angle (degrees) and unit axis rotating direction `from` onto `to`.
///
/// Parallel inputs give 0° about +Z. Anti-parallel inputs give 180° about
/// an axis perpendicular to `from`. A zero-length input yields 0°.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::math::rotation_to_vector;
///
/// let (angle, axis) = rotation_to_vector(DVec3::Z, DVec3::X);
/// assert!((angle - 90.0).abs() < 1e-9);
/// assert!((axis - DVec3::Y).length() < 1e-12);
/// ```
pub fn rotation_to_vector(from: DVec3, to: DVec3) -> (f64, DVec3) {
    let prod = from.length() * to.length();
    if prod < EPSILON {
        return (0.0, DVec3::Z);
    }
    let angle = (from.dot(to) / prod).clamp(-1.0, 1.0).acos().to_degrees();

    let cross = from.cross(to);
    let cross_len = cross.length();
    if cross_len >= EPSILON * prod {
        return (angle, cross / cross_len);
    }
    if from.dot(to) < 0.0 {
        (180.0, from.normalize().any_orthonormal_vector())
    } else {
        (0.0, DVec3::Z)
    }
}
