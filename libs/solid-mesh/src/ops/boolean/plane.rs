//! # Splitting Planes
//!
//! Oriented planes used to partition polygons in the BSP tree.

use config::constants::BSP_EPSILON;
use glam::DVec3;

/// Side of a splitting plane a point or polygon falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Front,
    Back,
    /// Within `BSP_EPSILON` of the plane.
    Coplanar,
    /// Only polygons: vertices on both sides.
    Spanning,
}

/// `normal · p = w` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: DVec3,
    w: f64,
}

impl Plane {
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self { normal, w }
    }

    /// Plane through a counter-clockwise triangle, or `None` if the points
    /// are collinear.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let cross = (b - a).cross(c - a);
        let len = cross.length();
        if !len.is_finite() || len < BSP_EPSILON * BSP_EPSILON {
            return None;
        }
        let normal = cross / len;
        Some(Self {
            normal,
            w: normal.dot(a),
        })
    }

    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    #[inline]
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Same plane facing the other way.
    pub fn flip(&self) -> Self {
        Self {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Distance of `point` along the normal; negative behind the plane.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    pub fn classify_point(&self, point: DVec3) -> Classification {
        let distance = self.signed_distance(point);
        if distance > BSP_EPSILON {
            Classification::Front
        } else if distance < -BSP_EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}
