//! # Cylindrical Text
//!
//! Wraps text around a cylinder standing on the Z axis. All glyphs share one
//! shell. The inverse variant engraves the text into the shell instead of
//! keeping the glyph slivers.

use config::constants::{
    TessellationConfig, DEFAULT_ANGULAR_HEIGHT_DEG, DEFAULT_ESCAPE, DEFAULT_SPACER_DEG,
    DEFAULT_SUBDIVIDE, DEFAULT_TEXT_RADIUS, DEFAULT_TEXT_THICKNESS,
};
use glam::DVec3;
use solid_mesh::primitives::create_mesh_cylinder;
use solid_mesh::{CsgEngine, FaceMode, Mesh, MeshResult};
use tracing::{debug, info, instrument};

use crate::glyph::{FontRef, GlyphCache, GlyphRenderer};
use crate::layout::{compute_layout, place_glyph, SurfaceParams, SurfaceText};

/// Parameters for [`cylindrical_text`].
#[derive(Debug, Clone, PartialEq)]
pub struct CylindricalTextParams {
    pub radius: f64,
    pub thickness: f64,
    pub angular_height_deg: f64,
    pub spacer_deg: f64,
    pub subdivide: u32,
    /// Subtract the glyphs from the shell instead of keeping them.
    pub inverse: bool,
    /// Reverse the text and flip each glyph so it reads from inside.
    pub backwards: bool,
    /// Stands in for spaces; takes space but produces no geometry.
    pub escape: char,
    pub tessellation: TessellationConfig,
    pub font: FontRef,
}

impl Default for CylindricalTextParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_TEXT_RADIUS,
            thickness: DEFAULT_TEXT_THICKNESS,
            angular_height_deg: DEFAULT_ANGULAR_HEIGHT_DEG,
            spacer_deg: DEFAULT_SPACER_DEG,
            subdivide: DEFAULT_SUBDIVIDE,
            inverse: false,
            backwards: false,
            escape: DEFAULT_ESCAPE,
            tessellation: TessellationConfig::default(),
            font: FontRef::Default,
        }
    }
}

impl CylindricalTextParams {
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

    /// Hollow cylinder of height `2r` centred on the origin.
    ///
    /// The inner cylinder overshoots both caps so the difference has no
    /// coplanar faces.
    pub fn shell<E: CsgEngine + ?Sized>(&self, engine: &E) -> MeshResult<Mesh> {
        let faces = self.tessellation.cylinder_faces();
        let height = 2.0 * self.radius;
        let outer =
            create_mesh_cylinder(self.radius, height, 1, 1, faces, DVec3::ZERO, FaceMode::Quads)?;
        let inner = create_mesh_cylinder(
            self.radius - self.thickness,
            height + 2.0 * self.thickness,
            1,
            1,
            faces,
            DVec3::ZERO,
            FaceMode::Quads,
        )?;
        engine.shell_difference(&outer, &inner)
    }

    fn prepare(&self, text: &str) -> Vec<char> {
        let chars = text
            .chars()
            .map(|c| if c == ' ' { self.escape } else { c });
        if self.backwards {
            chars.rev().collect()
        } else {
            chars.collect()
        }
    }
}

/// Lays `text` out around a cylinder on the Z axis.
///
/// Spaces become the escape character. The placements describe the laid
/// out sequence, so with `backwards` they run in reversed order.
///
/// # Errors
///
/// - `InvalidParameter` for bad parameters
/// - `LayoutOverflow` when a glyph is too large for the radius
/// - renderer and engine failures unchanged
#[instrument(skip(renderer, engine, params), fields(radius = params.radius, inverse = params.inverse))]
pub fn cylindrical_text<R, E>(
    text: &str,
    params: &CylindricalTextParams,
    renderer: &R,
    engine: &E,
) -> MeshResult<SurfaceText>
where
    R: GlyphRenderer + ?Sized,
    E: CsgEngine + ?Sized,
{
    let surface = params.surface();
    surface.validate(text)?;

    let chars = params.prepare(text);
    let cache = GlyphCache::build(renderer, &params.font, params.subdivide, &chars)?;
    let layout = compute_layout(&chars, &cache, &surface, Some(params.escape))?;

    let placed = layout
        .placements
        .iter()
        .filter(|p| p.kept)
        .map(|p| {
            let glyph = cache.glyph(p.character)?;
            place_glyph(glyph, p, layout.factor, params.radius, 0.0, params.backwards)
        })
        .collect::<MeshResult<Vec<_>>>()?;
    debug!(glyphs = placed.len(), "placed glyphs");

    let shell = params.shell(engine)?;
    let solid = if params.inverse {
        placed
            .iter()
            .try_fold(shell, |engraved, glyph| engine.difference(&engraved, glyph))?
    } else {
        let trimmed = placed
            .iter()
            .map(|glyph| engine.intersection(glyph, &shell))
            .collect::<MeshResult<Vec<_>>>()?;
        engine.merge(trimmed)?
    };

    info!(
        chars = chars.len(),
        vertices = solid.vertex_count(),
        faces = solid.face_count(),
        "cylindrical text"
    );
    Ok(SurfaceText {
        solid,
        placements: layout.placements,
    })
}
