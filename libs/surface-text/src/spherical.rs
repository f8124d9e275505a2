//! # Spherical Text
//!
//! Wraps text around the equator of a sphere. Every kept glyph is trimmed
//! against its own freshly built shell; a single shared sphere shell leaves
//! broken glyph fragments after the merge.

use config::constants::{
    TessellationConfig, DEFAULT_ANGULAR_HEIGHT_DEG, DEFAULT_ESCAPE, DEFAULT_SPACER_DEG,
    DEFAULT_SUBDIVIDE, DEFAULT_TEXT_RADIUS, DEFAULT_TEXT_THICKNESS,
};
use glam::DVec3;
use rayon::prelude::*;
use solid_mesh::primitives::create_mesh_sphere;
use solid_mesh::{CsgEngine, FaceMode, Mesh, MeshError, MeshResult};
use tracing::{debug, info, instrument};

use crate::glyph::{FontRef, GlyphCache, GlyphRenderer};
use crate::layout::{compute_layout, place_glyph, SurfaceParams, SurfaceText};

/// Parameters for [`spherical_text`].
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalTextParams {
    /// Sphere radius; the outer face of the text.
    pub radius: f64,
    /// Depth of the text shell, measured inward.
    pub thickness: f64,
    /// Height of the text band as an angle from the equator, degrees.
    pub angular_height_deg: f64,
    /// Gap between neighbouring glyphs, degrees.
    pub spacer_deg: f64,
    /// Curve subdivision hint passed to the renderer.
    pub subdivide: u32,
    /// Raises the text band toward the north pole, degrees.
    pub elevation_deg: f64,
    /// Characters that take space but produce no geometry.
    pub escape: char,
    pub tessellation: TessellationConfig,
    pub font: FontRef,
}

impl Default for SphericalTextParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_TEXT_RADIUS,
            thickness: DEFAULT_TEXT_THICKNESS,
            angular_height_deg: DEFAULT_ANGULAR_HEIGHT_DEG,
            spacer_deg: DEFAULT_SPACER_DEG,
            subdivide: DEFAULT_SUBDIVIDE,
            elevation_deg: 0.0,
            escape: DEFAULT_ESCAPE,
            tessellation: TessellationConfig::default(),
            font: FontRef::Default,
        }
    }
}

impl SphericalTextParams {
    fn surface(&self) -> SurfaceParams<'_> {
        SurfaceParams {
            radius: self.radius,
            thickness: self.thickness,
            angular_height_deg: self.angular_height_deg,
            spacer_deg: self.spacer_deg,
            subdivide: self.subdivide,
            tessellation: &self.tessellation,
        }
    }

    fn shell<E: CsgEngine + ?Sized>(&self, engine: &E) -> MeshResult<Mesh> {
        let lats = self.tessellation.sphere_latitudes();
        let lons = self.tessellation.sphere_longitudes();
        let outer = create_mesh_sphere(self.radius, lats, lons, DVec3::ZERO, FaceMode::Quads)?;
        let inner = create_mesh_sphere(
            self.radius - self.thickness,
            lats,
            lons,
            DVec3::ZERO,
            FaceMode::Quads,
        )?;
        engine.shell_difference(&outer, &inner)
    }
}

/// Lays `text` out around the equator of a sphere centred on the origin.
///
/// The first glyph is centred on +X and the text runs counter-clockwise
/// seen from +Z.
///
/// # Errors
///
/// - `InvalidParameter` for bad parameters or a space in `text`
/// - `LayoutOverflow` when a glyph is too large for the radius
/// - renderer and engine failures unchanged
#[instrument(skip(renderer, engine, params), fields(radius = params.radius))]
pub fn spherical_text<R, E>(
    text: &str,
    params: &SphericalTextParams,
    renderer: &R,
    engine: &E,
) -> MeshResult<SurfaceText>
where
    R: GlyphRenderer + ?Sized,
    E: CsgEngine + Sync + ?Sized,
{
    let surface = params.surface();
    surface.validate(text)?;
    if text.contains(' ') {
        return Err(MeshError::invalid_parameter(format!(
            "spherical text must not contain spaces; use {:?}",
            params.escape
        )));
    }
    if !params.elevation_deg.is_finite() {
        return Err(MeshError::invalid_parameter(format!(
            "elevation must be finite: {}",
            params.elevation_deg
        )));
    }

    let chars: Vec<char> = text.chars().collect();
    let cache = GlyphCache::build(renderer, &params.font, params.subdivide, &chars)?;
    let layout = compute_layout(&chars, &cache, &surface, Some(params.escape))?;

    let placed = layout
        .placements
        .iter()
        .filter(|p| p.kept)
        .map(|p| {
            let glyph = cache.glyph(p.character)?;
            place_glyph(glyph, p, layout.factor, params.radius, -params.elevation_deg, false)
        })
        .collect::<MeshResult<Vec<_>>>()?;
    debug!(glyphs = placed.len(), "placed glyphs");

    let trimmed = placed
        .par_iter()
        .map(|glyph| {
            let shell = params.shell(engine)?;
            engine.intersection(glyph, &shell)
        })
        .collect::<MeshResult<Vec<_>>>()?;

    let solid = engine.merge(trimmed)?;
    info!(
        chars = chars.len(),
        vertices = solid.vertex_count(),
        faces = solid.face_count(),
        "spherical text"
    );
    Ok(SurfaceText {
        solid,
        placements: layout.placements,
    })
}
