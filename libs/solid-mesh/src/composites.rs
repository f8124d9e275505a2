//! # Composite Solids
//!
//! Solids built from primitives plus boolean steps through a
//! [`CsgEngine`]: tubes, flat toruses, cups and rain drops. Also a cylinder
//! stretched between two points.

use config::constants::TessellationConfig;
use glam::DVec3;
use tracing::{debug, info, instrument};

use crate::error::{MeshError, MeshResult};
use crate::math::rotation_to_vector;
use crate::mesh::{FaceMode, Mesh};
use crate::ops::CsgEngine;
use crate::transform::Transformation;
use crate::primitives::{create_mesh_cylinder, create_mesh_rectangular_prism, require_positive};

/// Plain cylinder with one face per radial line and one along the height.
fn plain_cylinder(
    radius: f64,
    height: f64,
    center: DVec3,
    tessellation: &TessellationConfig,
) -> MeshResult<Mesh> {
    create_mesh_cylinder(
        radius,
        height,
        1,
        1,
        tessellation.cylinder_faces(),
        center,
        FaceMode::Quads,
    )
}

fn require_below(name: &str, value: f64, limit: f64) -> MeshResult<()> {
    if value >= limit {
        return Err(MeshError::invalid_parameter(format!(
            "{name} {value} must be below {limit}"
        )));
    }
    Ok(())
}

/// Hollow cylinder along Z, centred on the origin.
///
/// # Arguments
///
/// * `radius` - Outer radius
/// * `height` - Height of the tube
/// * `thickness` - Wall thickness, below `radius`
#[instrument(level = "debug", skip(tessellation, engine))]
pub fn tube<E: CsgEngine>(
    radius: f64,
    height: f64,
    thickness: f64,
    tessellation: &TessellationConfig,
    engine: &E,
) -> MeshResult<Mesh> {
    require_positive("tube radius", radius)?;
    require_positive("tube height", height)?;
    require_positive("tube thickness", thickness)?;
    require_below("tube thickness", thickness, radius)?;

    let outer = plain_cylinder(radius, height, DVec3::ZERO, tessellation)?;
    // taller bore so no cap is coplanar with the outer caps
    let bore = plain_cylinder(radius - thickness, height * 2.0, DVec3::ZERO, tessellation)?;
    let mesh = engine.difference(&outer, &bore)?;
    info!(faces = mesh.face_count(), "built tube");
    Ok(mesh)
}

/// Torus with a rectangular cross-section, lying in the XY plane.
///
/// # Arguments
///
/// * `radius` - Distance to the middle of the cross-section
/// * `height` - Height of the ring
/// * `minor_width` - Radial width of the ring, below `2 * radius`
#[instrument(level = "debug", skip(tessellation, engine))]
pub fn flat_torus<E: CsgEngine>(
    radius: f64,
    height: f64,
    minor_width: f64,
    tessellation: &TessellationConfig,
    engine: &E,
) -> MeshResult<Mesh> {
    require_positive("flat torus radius", radius)?;
    require_positive("flat torus height", height)?;
    require_positive("flat torus width", minor_width)?;
    require_below("flat torus width", minor_width, radius * 2.0)?;

    let half = minor_width / 2.0;
    let ring = plain_cylinder(radius + half, height, DVec3::ZERO, tessellation)?;
    let hole = plain_cylinder(radius - half, height * 2.0, DVec3::ZERO, tessellation)?;
    engine.difference(&ring, &hole)
}

/// Cylindrical cup open toward +Z, centred on the origin.
#[instrument(level = "debug", skip(tessellation, engine))]
pub fn cup<E: CsgEngine>(
    radius: f64,
    height: f64,
    wall_thickness: f64,
    base_thickness: f64,
    tessellation: &TessellationConfig,
    engine: &E,
) -> MeshResult<Mesh> {
    require_positive("cup radius", radius)?;
    require_positive("cup height", height)?;
    require_positive("cup wall thickness", wall_thickness)?;
    require_positive("cup base thickness", base_thickness)?;
    require_below("cup wall thickness", wall_thickness, radius)?;
    require_below("cup base thickness", base_thickness, height)?;

    let body = plain_cylinder(radius, height, DVec3::ZERO, tessellation)?;
    let hollow = plain_cylinder(
        radius - wall_thickness,
        height,
        DVec3::Z * base_thickness,
        tessellation,
    )?;
    engine.difference(&body, &hollow)
}

/// Rectangular cup open toward +Z, centred on the origin.
///
/// `thickness` holds the wall thickness along X and Y and the base
/// thickness along Z.
#[instrument(level = "debug", skip(engine))]
pub fn rectangular_cup<E: CsgEngine>(size: DVec3, thickness: DVec3, engine: &E) -> MeshResult<Mesh> {
    require_positive("cup x thickness", thickness.x)?;
    require_positive("cup y thickness", thickness.y)?;
    require_positive("cup z thickness", thickness.z)?;
    require_below("cup x wall", thickness.x * 2.0, size.x)?;
    require_below("cup y wall", thickness.y * 2.0, size.y)?;
    require_below("cup base", thickness.z, size.z)?;

    let body = create_mesh_rectangular_prism(size, [1, 1, 1], DVec3::ZERO, FaceMode::Quads)?;
    let hollow_size = DVec3::new(
        size.x - thickness.x * 2.0,
        size.y - thickness.y * 2.0,
        size.z,
    );
    let hollow = create_mesh_rectangular_prism(
        hollow_size,
        [1, 1, 1],
        DVec3::Z * thickness.z,
        FaceMode::Quads,
    )?;
    engine.difference(&body, &hollow)
}

/// Flat rain drop in the XY plane: a disc at the origin drawn out to a
/// sharp tip on +X.
///
/// # Arguments
///
/// * `radius` - Radius of the rounded end
/// * `center_to_tip` - Distance from the disc centre to the tip. A value
///   below `radius` is taken as the distance beyond the disc edge.
/// * `thickness` - Extent along Z, centred on the origin
#[instrument(level = "debug", skip(tessellation, engine))]
pub fn rain_drop<E: CsgEngine>(
    radius: f64,
    center_to_tip: f64,
    thickness: f64,
    tessellation: &TessellationConfig,
    engine: &E,
) -> MeshResult<Mesh> {
    require_positive("rain drop radius", radius)?;
    require_positive("rain drop tip distance", center_to_tip)?;
    require_positive("rain drop thickness", thickness)?;
    let tip = if center_to_tip < radius {
        radius + center_to_tip
    } else {
        center_to_tip
    };
    if tip <= radius {
        return Err(MeshError::invalid_parameter(format!(
            "rain drop tip {tip} must lie outside the radius {radius}"
        )));
    }

    let disc = plain_cylinder(radius, thickness, DVec3::ZERO, tessellation)?;
    let body = create_mesh_rectangular_prism(
        DVec3::new(tip, radius * 2.0, thickness),
        [1, 1, 1],
        DVec3::new(tip / 2.0, 0.0, 0.0),
        FaceMode::Quads,
    )?;
    let mut drop = engine.union(&body, &disc)?;

    // each cutter's inner edge is tangent to the disc and runs through the tip
    let angle = (radius / tip).asin().to_degrees();
    debug!(tip, angle, "rain drop tangent angle");
    let pivot = DVec3::new(tip, 0.0, 0.0);
    for side in [1.0, -1.0] {
        let cutter = create_mesh_rectangular_prism(
            DVec3::new(tip * 2.0, radius * 2.0, thickness * 2.0),
            [1, 1, 1],
            DVec3::new(tip / 2.0, radius * side, 0.0),
            FaceMode::Quads,
        )?;
        let cutter = Transformation::rotation_deg(-angle * side, DVec3::Z, pivot)?.apply_mesh(&cutter);
        drop = engine.difference(&drop, &cutter)?;
    }
    info!(faces = drop.face_count(), "built rain drop");
    Ok(drop)
}

/// Cylinder whose axis runs from `start` to `end`.
///
/// The bottom cap is centred on `start`, the top cap on `end`.
#[instrument(level = "debug", skip(tessellation))]
pub fn cylinder_between(
    radius: f64,
    start: DVec3,
    end: DVec3,
    tessellation: &TessellationConfig,
) -> MeshResult<Mesh> {
    let axis = end - start;
    let height = axis.length();
    require_positive("cylinder length", height)?;

    let upright = plain_cylinder(radius, height, DVec3::Z * (height / 2.0), tessellation)?;
    let (angle, rotation_axis) = rotation_to_vector(DVec3::Z, axis);
    let transform = Transformation::rotation_deg(angle, rotation_axis, DVec3::ZERO)?
        .then(Transformation::translation(start));
    Ok(transform.apply_mesh(&upright))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::BspEngine;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    /// Area of the regular polygon the cylinder builder inscribes in a circle.
    fn ngon_area(radius: f64, sides: u32) -> f64 {
        sides as f64 / 2.0 * radius * radius * (TAU / sides as f64).sin()
    }

    fn tess() -> TessellationConfig {
        TessellationConfig::new(24).unwrap()
    }

    #[test]
    fn test_tube_volume() {
        let mesh = tube(2.0, 3.0, 0.5, &tess(), &BspEngine).unwrap();
        let expected = (ngon_area(2.0, 24) - ngon_area(1.5, 24)) * 3.0;
        assert_relative_eq!(mesh.signed_volume(), expected, max_relative = 1e-6);
    }

    #[test]
    fn test_flat_torus_volume() {
        let mesh = flat_torus(3.0, 1.0, 1.0, &tess(), &BspEngine).unwrap();
        let expected = ngon_area(3.5, 24) - ngon_area(2.5, 24);
        assert_relative_eq!(mesh.signed_volume(), expected, max_relative = 1e-6);
    }

    #[test]
    fn test_cup_volume() {
        let mesh = cup(1.0, 2.0, 0.2, 0.5, &tess(), &BspEngine).unwrap();
        let expected = ngon_area(1.0, 24) * 2.0 - ngon_area(0.8, 24) * 1.5;
        assert_relative_eq!(mesh.signed_volume(), expected, max_relative = 1e-6);
    }

    #[test]
    fn test_rectangular_cup_volume() {
        let size = DVec3::new(2.0, 3.0, 4.0);
        let thickness = DVec3::new(0.25, 0.5, 1.0);
        let mesh = rectangular_cup(size, thickness, &BspEngine).unwrap();
        let expected = 24.0 - 1.5 * 2.0 * 3.0;
        assert_relative_eq!(mesh.signed_volume(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_rain_drop_stays_inside_tangent_lines() {
        let (radius, tip, thickness) = (1.0, 3.0, 0.5);
        let mesh = rain_drop(radius, tip, thickness, &tess(), &BspEngine).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(max.x, tip, epsilon = 1e-6);
        assert_relative_eq!(min.x, -radius, epsilon = 1e-6);
        assert_relative_eq!(max.z - min.z, thickness, epsilon = 1e-6);

        let sin = radius / tip;
        let cos = (1.0 - sin * sin).sqrt();
        for v in mesh.vertices() {
            assert!(v.x * sin + v.y.abs() * cos <= radius + 1e-6, "{v} beyond a tangent");
        }

        let disc = ngon_area(radius, 24) * thickness;
        let hull = (ngon_area(radius, 24) + tip * radius * 2.0) * thickness;
        let volume = mesh.signed_volume();
        assert!(volume > disc && volume < hull, "{volume}");
    }

    #[test]
    fn test_rain_drop_short_tip_is_measured_from_the_edge() {
        let mesh = rain_drop(2.0, 1.0, 0.5, &tess(), &BspEngine).unwrap();
        let (_, max) = mesh.bounding_box();
        assert_relative_eq!(max.x, 3.0, epsilon = 1e-6);
        assert!(rain_drop(1.0, 0.0, 0.5, &tess(), &BspEngine).is_err());
    }

    fn assert_spans(mesh: &Mesh, radius: f64, start: DVec3, end: DVec3) {
        let axis = end - start;
        let dir = axis.normalize();
        for v in mesh.vertices() {
            let along = (*v - start).dot(dir);
            let radial = (*v - start - dir * along).length();
            assert!(along > -1e-9 && along < axis.length() + 1e-9, "{v}");
            assert!(radial < radius + 1e-9, "{v}");
        }
        let expected = ngon_area(radius, 24) * axis.length();
        assert_relative_eq!(mesh.signed_volume(), expected, max_relative = 1e-9);
    }

    #[test]
    fn test_cylinder_between_points() {
        let cases = [
            (DVec3::ZERO, DVec3::new(1.0, 1.0, 1.0)),
            (DVec3::new(2.0, -1.0, 0.5), DVec3::new(2.0, -1.0, 4.0)),
            // pointing straight down needs a half turn
            (DVec3::new(1.0, 2.0, 3.0), DVec3::new(1.0, 2.0, 0.0)),
        ];
        for (start, end) in cases {
            let mesh = cylinder_between(0.5, start, end, &tess()).unwrap();
            assert_spans(&mesh, 0.5, start, end);
        }
        assert!(cylinder_between(0.5, DVec3::ONE, DVec3::ONE, &tess()).is_err());
    }

    #[test]
    fn test_inverted_walls_are_rejected() {
        assert!(tube(1.0, 1.0, 1.0, &tess(), &BspEngine).is_err());
        assert!(flat_torus(1.0, 1.0, 2.0, &tess(), &BspEngine).is_err());
        assert!(cup(1.0, 1.0, 0.1, 1.0, &tess(), &BspEngine).is_err());
        assert!(rectangular_cup(DVec3::ONE, DVec3::new(0.5, 0.1, 0.1), &BspEngine).is_err());
        assert!(tube(1.0, 1.0, 0.0, &tess(), &BspEngine).is_err());
    }
}
