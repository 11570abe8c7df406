//! Glyph-based text rendering.
//!
//! Text is drawn the simple way: every supported character is rasterized
//! once at startup into its own single-channel texture, and each frame every
//! drawn character becomes one textured quad in screen space.
//!
//! - `glyph` rasterizes the character set and owns the per-glyph GPU state
//! - `layout` converts strings into positioned quads (pure, no GPU)
//! - `renderer` writes the shared quad buffer and issues the draw calls

pub mod glyph;
pub mod layout;
pub mod renderer;

pub use glyph::{GlyphError, GlyphInfo, GlyphSet, GlyphTable, GLYPH_COUNT};
pub use renderer::{TextBlock, TextRenderer, WrapPolicy};
