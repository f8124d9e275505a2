//! # Layout Pipeline
//!
//! The measure, normalize, place sequence shared by spherical and
//! cylindrical text.
//!
//! ## Placement
//!
//! A glyph is centred on its bounding box and remapped so width runs along
//! +Y, height along +Z and depth along +X. It is scaled by the global
//! factor, pushed out to `(r, 0, 0)`, tipped about +Y by its vertical
//! correction and finally walked about +Z to its accumulated angle.

use config::constants::TessellationConfig;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use solid_mesh::math::{asin_deg_checked, sin_deg};
use solid_mesh::{Mesh, MeshError, MeshResult, Transformation};
use tracing::debug;

use crate::glyph::{Glyph, GlyphCache};

// ===== OUTPUT =====

/// Where one character of the input ended up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphPlacement {
    /// Position in the laid out character sequence.
    pub index: usize,
    pub character: char,
    /// Accumulated rotation about the surface axis, degrees.
    pub angle_deg: f64,
    /// Half of the glyph's angular width, degrees.
    pub half_width_deg: f64,
    /// Vertical correction about +Y, degrees. Positive moves toward -Z.
    pub v_tweak_deg: f64,
    /// False for escape characters, which take space but no geometry.
    pub kept: bool,
}

/// A finished layout: the merged solid and the per-character placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceText {
    pub solid: Mesh,
    pub placements: Vec<GlyphPlacement>,
}

// ===== VALIDATION =====

/// Parameters every surface layout shares.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SurfaceParams<'a> {
    pub radius: f64,
    pub thickness: f64,
    pub angular_height_deg: f64,
    pub spacer_deg: f64,
    pub subdivide: u32,
    pub tessellation: &'a TessellationConfig,
}

impl SurfaceParams<'_> {
    /// Fails fast before any glyph is rendered.
    pub fn validate(&self, text: &str) -> MeshResult<()> {
        if text.is_empty() {
            return Err(MeshError::invalid_parameter("text must not be empty"));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(MeshError::invalid_parameter(format!(
                "text radius must be positive: {}",
                self.radius
            )));
        }
        if !(self.thickness > 0.0 && self.thickness < self.radius) {
            return Err(MeshError::invalid_parameter(format!(
                "text thickness {} must lie in (0, {})",
                self.thickness, self.radius
            )));
        }
        if !(self.angular_height_deg > 0.0 && self.angular_height_deg <= 180.0) {
            return Err(MeshError::invalid_parameter(format!(
                "angular height {} must lie in (0, 180]",
                self.angular_height_deg
            )));
        }
        if !self.spacer_deg.is_finite() {
            return Err(MeshError::invalid_parameter(format!(
                "spacer must be finite: {}",
                self.spacer_deg
            )));
        }
        if self.subdivide == 0 {
            return Err(MeshError::invalid_parameter("subdivide must be at least 1"));
        }
        self.tessellation
            .validate()
            .map_err(|e| MeshError::invalid_parameter(e.to_string()))
    }
}

// ===== PIPELINE =====

/// Global scale and per-character angles for one text.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    pub factor: f64,
    pub placements: Vec<GlyphPlacement>,
}

/// Computes the scale factor and every character's placement.
///
/// # Errors
///
/// `InvalidParameter` if every glyph has zero height, `LayoutOverflow` if a
/// vertical correction or half width leaves the `asin` domain.
pub(crate) fn compute_layout(
    chars: &[char],
    cache: &GlyphCache,
    surface: &SurfaceParams<'_>,
    escape: Option<char>,
) -> MeshResult<Layout> {
    let max_height = cache.max_height();
    if max_height <= 0.0 {
        return Err(MeshError::invalid_parameter("all glyphs have zero height"));
    }
    let radius = surface.radius;
    let target_height = 2.0 * radius * sin_deg(surface.angular_height_deg / 2.0);
    let factor = target_height / max_height;
    debug!(target_height, max_height, factor, "text scale");

    let mut placements: Vec<GlyphPlacement> = Vec::with_capacity(chars.len());
    let mut angle = 0.0;
    for (index, &character) in chars.iter().enumerate() {
        let extents = cache.glyph(character)?.extents;
        let v_tweak =
            factor * ((max_height - extents.height) / 2.0 + extents.baseline_offset);
        let v_tweak_deg = asin_deg_checked(v_tweak / radius)
            .map_err(|e| overflow(character, "vertical correction", e))?;
        let half_width_deg = asin_deg_checked(factor * extents.width / 2.0 / radius)
            .map_err(|e| overflow(character, "width", e))?;

        if let Some(prev) = placements.last() {
            angle += prev.half_width_deg + surface.spacer_deg + half_width_deg;
        }
        placements.push(GlyphPlacement {
            index,
            character,
            angle_deg: angle,
            half_width_deg,
            v_tweak_deg,
            kept: Some(character) != escape,
        });
    }
    debug!(chars = chars.len(), span_deg = angle, "text advance");
    Ok(Layout { factor, placements })
}

fn overflow(character: char, what: &str, cause: MeshError) -> MeshError {
    match cause {
        MeshError::LayoutOverflow { message } => MeshError::layout_overflow(format!(
            "{what} of {character:?} does not fit the radius ({message})"
        )),
        other => other,
    }
}

/// Moves one glyph from its own XY plane onto the surface.
///
/// `tilt_deg` is added to the glyph's vertical correction; `flip` turns the
/// glyph 180° about Z so it reads from inside the surface.
pub(crate) fn place_glyph(
    glyph: &Glyph,
    placement: &GlyphPlacement,
    factor: f64,
    radius: f64,
    tilt_deg: f64,
    flip: bool,
) -> MeshResult<Mesh> {
    let (min, max) = glyph.mesh.bounding_box();
    let centre = (min + max) / 2.0;

    let mut transform = Transformation::translation(-centre)
        .then(Transformation::rotation_deg(90.0, DVec3::Y, DVec3::ZERO)?)
        .then(Transformation::rotation_deg(90.0, DVec3::X, DVec3::ZERO)?)
        .then(Transformation::scale_uniform(factor, DVec3::ZERO)?);
    if flip {
        transform = transform.then(Transformation::rotation_deg(180.0, DVec3::Z, DVec3::ZERO)?);
    }
    let transform = transform
        .then(Transformation::translation(DVec3::new(radius, 0.0, 0.0)))
        .then(Transformation::rotation_deg(
            placement.v_tweak_deg + tilt_deg,
            DVec3::Y,
            DVec3::ZERO,
        )?)
        .then(Transformation::rotation_deg(placement.angle_deg, DVec3::Z, DVec3::ZERO)?);

    Ok(transform.apply_mesh(&glyph.mesh))
}
