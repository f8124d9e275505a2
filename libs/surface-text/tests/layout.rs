//! Surface text layout against mock collaborators and the BSP engine.

use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};

use approx::assert_relative_eq;
use config::constants::TessellationConfig;
use glam::DVec3;
use solid_mesh::math::asin_deg_checked;
use solid_mesh::primitives::create_mesh_rectangular_prism;
use solid_mesh::{BspEngine, CsgEngine, FaceMode, Mesh, MeshError, MeshResult};
use surface_text::{
    cylindrical_text, spherical_text, CylindricalTextParams, FontRef, Glyph, GlyphExtents,
    GlyphRenderer, SphericalTextParams,
};

// =============================================================================
// COLLABORATORS
// =============================================================================

/// Renders every character as a box and records each call.
struct BoxRenderer {
    depth: f64,
    calls: RefCell<Vec<char>>,
}

impl BoxRenderer {
    fn new(depth: f64) -> Self {
        Self {
            depth,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<char> {
        self.calls.borrow().clone()
    }
}

fn glyph_bounds(ch: char) -> (f64, f64, f64) {
    match ch {
        'A' => (0.6, 0.0, 1.0),
        'B' => (0.5, 0.0, 1.0),
        'W' => (40.0, 0.0, 1.0),
        '_' => (0.5, -0.1, 0.0),
        _ => (0.4, 0.0, 0.7),
    }
}

impl GlyphRenderer for BoxRenderer {
    fn render(&self, ch: char, _font: &FontRef, _subdivide: u32) -> MeshResult<Glyph> {
        self.calls.borrow_mut().push(ch);
        if ch == 'X' {
            return Err(MeshError::collaborator("renderer", "no glyph for X"));
        }
        if ch == '\t' {
            let blank = Mesh::from_parts(vec![DVec3::ZERO], vec![])?;
            return Ok(Glyph::from_mesh(blank));
        }
        let (width, min_y, max_y) = glyph_bounds(ch);
        let mesh = create_mesh_rectangular_prism(
            DVec3::new(width, max_y - min_y, self.depth),
            [1, 1, 1],
            DVec3::new(width / 2.0, (min_y + max_y) / 2.0, 0.0),
            FaceMode::Quads,
        )?;
        Ok(Glyph {
            mesh,
            extents: GlyphExtents::from_bounds(0.0, width, min_y, max_y),
        })
    }
}

/// Returns glyphs untouched so placements can be read back from the output.
#[derive(Default)]
struct PassThrough {
    intersections: AtomicUsize,
    shells: AtomicUsize,
    fail: bool,
}

impl CsgEngine for PassThrough {
    fn union(&self, a: &Mesh, _b: &Mesh) -> MeshResult<Mesh> {
        Ok(a.clone())
    }

    fn difference(&self, a: &Mesh, _b: &Mesh) -> MeshResult<Mesh> {
        Ok(a.clone())
    }

    fn intersection(&self, a: &Mesh, _b: &Mesh) -> MeshResult<Mesh> {
        if self.fail {
            return Err(MeshError::collaborator("csg", "boom"));
        }
        self.intersections.fetch_add(1, Ordering::SeqCst);
        Ok(a.clone())
    }

    fn shell_difference(&self, outer: &Mesh, _inner: &Mesh) -> MeshResult<Mesh> {
        self.shells.fetch_add(1, Ordering::SeqCst);
        Ok(outer.clone())
    }
}

fn glyph_vertex_count() -> usize {
    BoxRenderer::new(0.2)
        .render('A', &FontRef::Default, 1)
        .unwrap()
        .mesh
        .vertex_count()
}

/// Angle about +Z of the mean of a vertex slice, in degrees.
fn mean_angle_deg(vertices: &[DVec3]) -> f64 {
    let mean = vertices.iter().copied().sum::<DVec3>() / vertices.len() as f64;
    mean.y.atan2(mean.x).to_degrees()
}

fn spherical_params() -> SphericalTextParams {
    SphericalTextParams {
        radius: 10.0,
        thickness: 0.5,
        angular_height_deg: 20.0,
        spacer_deg: 4.0,
        ..Default::default()
    }
}

fn cylindrical_params() -> CylindricalTextParams {
    CylindricalTextParams {
        radius: 10.0,
        thickness: 1.0,
        angular_height_deg: 20.0,
        spacer_deg: 4.0,
        tessellation: TessellationConfig::new(16).unwrap(),
        ..Default::default()
    }
}

// =============================================================================
// SPHERICAL
// =============================================================================

#[test]
fn test_spherical_advance_between_two_glyphs() {
    let renderer = BoxRenderer::new(0.2);
    let engine = PassThrough::default();
    let result = spherical_text("AB", &spherical_params(), &renderer, &engine).unwrap();

    let factor = 20.0 * 10f64.to_radians().sin();
    let half_a = asin_deg_checked(factor * 0.6 / 2.0 / 10.0).unwrap();
    let half_b = asin_deg_checked(factor * 0.5 / 2.0 / 10.0).unwrap();
    let [a, b] = [result.placements[0], result.placements[1]];
    assert_relative_eq!(a.half_width_deg, half_a, epsilon = 1e-12);
    assert_relative_eq!(b.half_width_deg, half_b, epsilon = 1e-12);
    assert_relative_eq!(b.angle_deg - a.angle_deg, half_a + 4.0 + half_b, epsilon = 1e-12);

    let n = glyph_vertex_count();
    let vertices = result.solid.vertices();
    assert_eq!(vertices.len(), 2 * n);
    assert_relative_eq!(mean_angle_deg(&vertices[..n]), 0.0, epsilon = 1e-9);
    assert_relative_eq!(mean_angle_deg(&vertices[n..]), b.angle_deg, epsilon = 1e-9);
}

#[test]
fn test_spherical_renders_each_character_once() {
    let renderer = BoxRenderer::new(0.2);
    let engine = PassThrough::default();
    let result = spherical_text("ABBA", &spherical_params(), &renderer, &engine).unwrap();
    assert_eq!(renderer.calls(), vec!['A', 'B']);
    assert_eq!(result.placements.len(), 4);
    assert_eq!(engine.intersections.load(Ordering::SeqCst), 4);
}

#[test]
fn test_spherical_builds_one_shell_per_kept_glyph() {
    let renderer = BoxRenderer::new(0.2);
    let engine = PassThrough::default();
    spherical_text("AB_BA", &spherical_params(), &renderer, &engine).unwrap();
    assert_eq!(engine.shells.load(Ordering::SeqCst), 4);
}

#[test]
fn test_spherical_blank_glyph_adds_nothing() {
    let renderer = BoxRenderer::new(1.0);
    let params = SphericalTextParams {
        radius: 10.0,
        thickness: 1.0,
        angular_height_deg: 20.0,
        tessellation: TessellationConfig::new(8).unwrap(),
        ..Default::default()
    };
    let alone = spherical_text("A", &params, &renderer, &BspEngine).unwrap();
    let with_blank = spherical_text("A\t", &params, &renderer, &BspEngine).unwrap();
    assert!(alone.solid.signed_volume() > 0.0);
    assert_relative_eq!(
        with_blank.solid.signed_volume(),
        alone.solid.signed_volume(),
        max_relative = 1e-9
    );
}

#[test]
fn test_spherical_rejects_spaces_before_rendering() {
    let renderer = BoxRenderer::new(0.2);
    let err = spherical_text("A B", &spherical_params(), &renderer, &PassThrough::default())
        .unwrap_err();
    assert!(matches!(err, MeshError::InvalidParameter { .. }));
    assert!(renderer.calls().is_empty());
}

#[test]
fn test_spherical_elevation_raises_band() {
    let renderer = BoxRenderer::new(0.2);
    let params = SphericalTextParams {
        elevation_deg: 30.0,
        ..spherical_params()
    };
    let result = spherical_text("A", &params, &renderer, &PassThrough::default()).unwrap();
    let (min, max) = result.solid.bounding_box();
    let centre = (min + max) / 2.0;
    assert_relative_eq!(centre.z, 10.0 * 30f64.to_radians().sin(), epsilon = 1e-9);
}

#[test]
fn test_engine_failure_propagates_unchanged() {
    let renderer = BoxRenderer::new(0.2);
    let engine = PassThrough {
        fail: true,
        ..Default::default()
    };
    let err = spherical_text("AB", &spherical_params(), &renderer, &engine).unwrap_err();
    assert_eq!(err, MeshError::collaborator("csg", "boom"));
}

#[test]
fn test_renderer_failure_propagates_unchanged() {
    let renderer = BoxRenderer::new(0.2);
    let err = cylindrical_text("AXB", &cylindrical_params(), &renderer, &PassThrough::default())
        .unwrap_err();
    assert_eq!(err, MeshError::collaborator("renderer", "no glyph for X"));
    assert_eq!(renderer.calls(), vec!['A', 'X']);
}

#[test]
fn test_spherical_bsp_trims_glyph_to_shell() {
    let renderer = BoxRenderer::new(1.0);
    let params = SphericalTextParams {
        radius: 10.0,
        thickness: 1.0,
        angular_height_deg: 20.0,
        tessellation: TessellationConfig::new(8).unwrap(),
        ..Default::default()
    };
    let result = spherical_text("A", &params, &renderer, &BspEngine).unwrap();
    let glyph_volume = renderer
        .render('A', &FontRef::Default, 1)
        .unwrap()
        .mesh
        .signed_volume();
    let factor = 20.0 * 10f64.to_radians().sin();
    let volume = result.solid.signed_volume();
    assert!(volume > 0.0);
    assert!(volume < glyph_volume * factor.powi(3));
}

// =============================================================================
// CYLINDRICAL
// =============================================================================

#[test]
fn test_cylindrical_drops_escape_characters() {
    let renderer = BoxRenderer::new(0.2);
    let engine = PassThrough::default();
    let result = cylindrical_text("A B", &cylindrical_params(), &renderer, &engine).unwrap();

    let chars: Vec<char> = result.placements.iter().map(|p| p.character).collect();
    assert_eq!(chars, vec!['A', '_', 'B']);
    assert!(!result.placements[1].kept);
    assert_eq!(engine.intersections.load(Ordering::SeqCst), 2);

    let n = glyph_vertex_count();
    let vertices = result.solid.vertices();
    assert_eq!(vertices.len(), 2 * n);
    let escape = result.placements[1];
    for v in vertices {
        let angle = v.y.atan2(v.x).to_degrees();
        assert!((angle - escape.angle_deg).abs() > escape.half_width_deg);
    }
}

#[test]
fn test_cylindrical_shares_one_shell() {
    let renderer = BoxRenderer::new(0.2);
    let engine = PassThrough::default();
    cylindrical_text("ABBA", &cylindrical_params(), &renderer, &engine).unwrap();
    assert_eq!(engine.shells.load(Ordering::SeqCst), 1);
    assert_eq!(engine.intersections.load(Ordering::SeqCst), 4);
}

#[test]
fn test_cylindrical_backwards_reverses_and_flips() {
    let renderer = BoxRenderer::new(0.2);
    let params = CylindricalTextParams {
        backwards: true,
        ..cylindrical_params()
    };
    let result = cylindrical_text("AB", &params, &renderer, &PassThrough::default()).unwrap();
    let chars: Vec<char> = result.placements.iter().map(|p| p.character).collect();
    assert_eq!(chars, vec!['B', 'A']);
    // flipped glyphs keep their winding and their place
    assert!(result.solid.signed_volume() > 0.0);
    let n = glyph_vertex_count();
    assert_relative_eq!(mean_angle_deg(&result.solid.vertices()[..n]), 0.0, epsilon = 1e-9);
}

#[test]
fn test_cylindrical_wide_glyph_overflows() {
    let renderer = BoxRenderer::new(0.2);
    let err = cylindrical_text("AW", &cylindrical_params(), &renderer, &PassThrough::default())
        .unwrap_err();
    assert!(matches!(err, MeshError::LayoutOverflow { .. }));
}

#[test]
fn test_cylindrical_rejects_bad_parameters() {
    let renderer = BoxRenderer::new(0.2);
    let engine = PassThrough::default();
    let bad = [
        CylindricalTextParams { radius: 0.0, ..cylindrical_params() },
        CylindricalTextParams { thickness: 10.0, ..cylindrical_params() },
        CylindricalTextParams { angular_height_deg: 181.0, ..cylindrical_params() },
        CylindricalTextParams { spacer_deg: f64::NAN, ..cylindrical_params() },
        CylindricalTextParams { subdivide: 0, ..cylindrical_params() },
    ];
    for params in &bad {
        let err = cylindrical_text("AB", params, &renderer, &engine).unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { .. }), "{params:?}");
    }
    assert!(cylindrical_text("", &cylindrical_params(), &renderer, &engine).is_err());
    assert!(renderer.calls().is_empty());
}

#[test]
fn test_cylindrical_inverse_and_plain_partition_the_shell() {
    let renderer = BoxRenderer::new(1.0);
    let plain = cylindrical_params();
    let inverse = CylindricalTextParams {
        inverse: true,
        ..cylindrical_params()
    };
    let shell_volume = plain.shell(&BspEngine).unwrap().signed_volume();

    let kept = cylindrical_text("AB", &plain, &renderer, &BspEngine)
        .unwrap()
        .solid
        .signed_volume();
    let engraved = cylindrical_text("AB", &inverse, &renderer, &BspEngine)
        .unwrap()
        .solid
        .signed_volume();

    assert!(kept > 0.0);
    assert!(engraved < shell_volume);
    assert_relative_eq!(kept + engraved, shell_volume, max_relative = 1e-6);
}

#[test]
fn test_placements_serialize() {
    let renderer = BoxRenderer::new(0.2);
    let result =
        cylindrical_text("AB", &cylindrical_params(), &renderer, &PassThrough::default()).unwrap();
    let json = serde_json::to_string(&result.placements).unwrap();
    assert!(json.contains("\"character\":\"B\""));
    assert!(json.contains("\"kept\":true"));
}
