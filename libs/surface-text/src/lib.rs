//! # Surface Text
//!
//! Lays rendered glyph solids out on spheres and cylinders and trims them to
//! a thin shell of the surface.
//!
//! ## Pipeline
//!
//! ```text
//! text → GlyphCache (render once per char) → layout (factor, angles)
//!      → place each glyph → trim against shell (CsgEngine) → merge
//! ```
//!
//! Glyph rendering and booleans are collaborators: any [`GlyphRenderer`]
//! and any [`CsgEngine`](solid_mesh::CsgEngine) can be plugged in. Failures
//! from either are returned unchanged and abort the whole call.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use solid_mesh::BspEngine;
//! use surface_text::{cylindrical_text, CylindricalTextParams};
//!
//! let params = CylindricalTextParams { radius: 10.0, thickness: 0.5, ..Default::default() };
//! let text = cylindrical_text("HELLO WORLD", &params, &my_renderer, &BspEngine)?;
//! ```

pub mod cylindrical;
pub mod glyph;
pub mod layout;
pub mod spherical;

pub use cylindrical::{cylindrical_text, CylindricalTextParams};
pub use glyph::{FontRef, Glyph, GlyphCache, GlyphExtents, GlyphRenderer};
pub use layout::{GlyphPlacement, SurfaceText};
pub use spherical::{spherical_text, SphericalTextParams};
