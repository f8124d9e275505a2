//! # Glyphs
//!
//! The glyph renderer contract and the per-call glyph cache.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use solid_mesh::{Mesh, MeshError, MeshResult};
use tracing::debug;

/// Font handed to the glyph renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontRef {
    /// The renderer's default font.
    #[default]
    Default,
    /// A font the renderer knows by name or path.
    Named(String),
}

/// Bounding extents of one rendered glyph in its own XY plane.
///
/// Width runs along X and height along Y. `baseline_offset` is how far the
/// bottom of the glyph sits below its baseline (`-min_height`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphExtents {
    pub min_width: f64,
    pub max_width: f64,
    pub width: f64,
    pub min_height: f64,
    pub max_height: f64,
    pub height: f64,
    pub baseline_offset: f64,
}

impl GlyphExtents {
    /// Extents from X and Y bounds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use surface_text::GlyphExtents;
    ///
    /// let g = GlyphExtents::from_bounds(0.0, 0.5, -0.2, 0.6);
    /// assert!((g.height - 0.8).abs() < 1e-12);
    /// assert!((g.baseline_offset - 0.2).abs() < 1e-12);
    /// ```
    pub fn from_bounds(min_width: f64, max_width: f64, min_height: f64, max_height: f64) -> Self {
        Self {
            min_width,
            max_width,
            width: max_width - min_width,
            min_height,
            max_height,
            height: max_height - min_height,
            baseline_offset: -min_height,
        }
    }

    /// Extents measured from a glyph mesh's bounding box.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let (min, max) = mesh.bounding_box();
        Self::from_bounds(min.x, max.x, min.y, max.y)
    }
}

/// A rendered glyph: its solid and its extents.
///
/// The solid lies in the XY plane, readable from +Z, extruded along Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub mesh: Mesh,
    pub extents: GlyphExtents,
}

impl Glyph {
    /// Wraps a mesh, measuring its extents.
    pub fn from_mesh(mesh: Mesh) -> Self {
        let extents = GlyphExtents::from_mesh(&mesh);
        Self { mesh, extents }
    }
}

/// Renders single characters into glyph solids.
///
/// A `CollaboratorFailure` reaches the layout caller unchanged. Any other
/// error kind is wrapped once as a `CollaboratorFailure` of the glyph
/// renderer.
pub trait GlyphRenderer {
    fn render(&self, ch: char, font: &FontRef, subdivide: u32) -> MeshResult<Glyph>;
}

impl<R: GlyphRenderer + ?Sized> GlyphRenderer for &R {
    fn render(&self, ch: char, font: &FontRef, subdivide: u32) -> MeshResult<Glyph> {
        (**self).render(ch, font, subdivide)
    }
}

/// Glyphs for the distinct characters of one layout call.
///
/// Each distinct character is rendered exactly once. The cache is built per
/// call and dropped with it, so glyphs never leak across fonts.
#[derive(Debug, Clone)]
pub struct GlyphCache {
    glyphs: BTreeMap<char, Glyph>,
}

impl GlyphCache {
    /// Renders every distinct character of `text`.
    ///
    /// Stops at the first renderer error, surfaced as a
    /// `CollaboratorFailure`.
    pub fn build<R>(renderer: &R, font: &FontRef, subdivide: u32, text: &[char]) -> MeshResult<Self>
    where
        R: GlyphRenderer + ?Sized,
    {
        let mut glyphs = BTreeMap::new();
        for &ch in text {
            if glyphs.contains_key(&ch) {
                continue;
            }
            let glyph = renderer
                .render(ch, font, subdivide)
                .map_err(|e| renderer_failure(ch, e))?;
            debug!(%ch, width = glyph.extents.width, height = glyph.extents.height, "measured glyph");
            glyphs.insert(ch, glyph);
        }
        Ok(Self { glyphs })
    }

    /// The glyph for `ch`.
    ///
    /// # Errors
    ///
    /// `CollaboratorFailure` if `ch` was not part of the text the cache was
    /// built from.
    pub fn glyph(&self, ch: char) -> MeshResult<&Glyph> {
        self.glyphs
            .get(&ch)
            .ok_or_else(|| MeshError::collaborator("glyph renderer", format!("no glyph for {ch:?}")))
    }

    /// Number of distinct characters.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns true if no glyph was rendered.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Height of the tallest glyph.
    pub fn max_height(&self) -> f64 {
        self.glyphs
            .values()
            .map(|g| g.extents.height)
            .fold(0.0, f64::max)
    }

    /// Iterates glyphs in character order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Glyph)> {
        self.glyphs.iter().map(|(&ch, g)| (ch, g))
    }
}

fn renderer_failure(ch: char, error: MeshError) -> MeshError {
    match error {
        MeshError::CollaboratorFailure { .. } => error,
        other => MeshError::collaborator("glyph renderer", format!("{ch:?}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use solid_mesh::primitives::create_mesh_rectangular_prism;
    use solid_mesh::FaceMode;
    use std::cell::RefCell;

    struct CountingRenderer {
        calls: RefCell<Vec<char>>,
    }

    impl GlyphRenderer for CountingRenderer {
        fn render(&self, ch: char, _font: &FontRef, _subdivide: u32) -> MeshResult<Glyph> {
            self.calls.borrow_mut().push(ch);
            let height = if ch.is_uppercase() { 1.0 } else { 0.5 };
            let mesh = create_mesh_rectangular_prism(
                DVec3::new(0.5, height, 0.2),
                [1, 1, 1],
                DVec3::new(0.25, height / 2.0, 0.0),
                FaceMode::Quads,
            )?;
            Ok(Glyph::from_mesh(mesh))
        }
    }

    #[test]
    fn test_extents_from_mesh() {
        let mesh = create_mesh_rectangular_prism(
            DVec3::new(0.4, 0.8, 0.2),
            [1, 1, 1],
            DVec3::new(0.2, 0.2, 0.0),
            FaceMode::Quads,
        )
        .unwrap();
        let extents = GlyphExtents::from_mesh(&mesh);
        assert!((extents.width - 0.4).abs() < 1e-12);
        assert!((extents.min_height + 0.2).abs() < 1e-12);
        assert!((extents.baseline_offset - 0.2).abs() < 1e-12);
    }

    struct BrokenRenderer;

    impl GlyphRenderer for BrokenRenderer {
        fn render(&self, ch: char, _font: &FontRef, _subdivide: u32) -> MeshResult<Glyph> {
            match ch {
                'c' => Err(MeshError::collaborator("font", "missing")),
                _ => Mesh::from_parts(vec![], vec![]).map(Glyph::from_mesh),
            }
        }
    }

    #[test]
    fn test_renderer_errors_surface_as_collaborator_failures() {
        let err = GlyphCache::build(&BrokenRenderer, &FontRef::Default, 1, &['a']).unwrap_err();
        assert_eq!(
            err,
            MeshError::collaborator(
                "glyph renderer",
                "'a': Invalid parameter: mesh construction needs at least one vertex"
            )
        );

        let err = GlyphCache::build(&BrokenRenderer, &FontRef::Default, 1, &['c']).unwrap_err();
        assert_eq!(err, MeshError::collaborator("font", "missing"));
    }

    #[test]
    fn test_cache_renders_each_character_once() {
        let renderer = CountingRenderer {
            calls: RefCell::new(Vec::new()),
        };
        let text: Vec<char> = "abAba".chars().collect();
        let cache = GlyphCache::build(&renderer, &FontRef::Default, 1, &text).unwrap();
        assert_eq!(cache.len(), 3);
        assert_eq!(*renderer.calls.borrow(), vec!['a', 'b', 'A']);
        assert!((cache.max_height() - 1.0).abs() < 1e-12);
        assert!(cache.glyph('z').is_err());
    }
}
