//! Glyph rasterization and per-glyph GPU resources.
//!
//! The supported character set is the first 128 character codes, rasterized
//! once at a fixed pixel size via `fontdue`. Metrics live in a fixed-size
//! table indexed by character code; looking up anything outside the table is
//! an explicit `None`, never a silently default-constructed entry.

use thiserror::Error;

use crate::data_structures::texture::Texture;

/// Number of supported character codes (ASCII 0..128).
pub const GLYPH_COUNT: usize = 128;

/// Errors raised while building the glyph set.
#[derive(Debug, Error)]
pub enum GlyphError {
    /// The font file could not be parsed. Fatal: the renderer refuses to
    /// start with a sparse glyph table.
    #[error("failed to parse font: {0}")]
    Font(String),
}

/// Metrics for one character code.
///
/// `advance` is kept in 26.6 fixed point (1/64 pixel) units; the pen moves
/// by `(advance >> 6) * scale` per character. Glyphs whose bitmap has zero
/// area (space, control codes) are not `drawable` but still advance the pen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphInfo {
    /// Bitmap width/height in pixels.
    pub size: [u32; 2],
    /// Offset from the pen origin to the bitmap's left edge and top edge
    /// (distance above the baseline).
    pub bearing: [i32; 2],
    /// Horizontal pen advance, 1/64 pixel units.
    pub advance: u32,
    /// Whether the glyph has a bitmap worth a draw call.
    pub drawable: bool,
}

/// Fixed-size metrics table, one entry per supported character code.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphTable {
    glyphs: [GlyphInfo; GLYPH_COUNT],
}

impl GlyphTable {
    pub fn new(glyphs: [GlyphInfo; GLYPH_COUNT]) -> Self {
        Self { glyphs }
    }

    /// Metrics for a character, or `None` when the code is outside the
    /// supported set. Callers decide how to skip unsupported characters.
    pub fn get(&self, ch: char) -> Option<&GlyphInfo> {
        self.glyphs.get(ch as usize)
    }
}

/// A rasterized glyph bitmap pending GPU upload: 8-bit coverage, row-major.
pub struct RasterGlyph {
    pub size: [u32; 2],
    pub pixels: Vec<u8>,
}

/// Rasterize the supported character set at `px` pixels.
///
/// Pure CPU work, split from [`GlyphSet::load`] so metrics can be exercised
/// without a GPU device. Zero-area bitmaps produce a table entry with no
/// pending upload.
pub fn rasterize_glyphs(
    font_bytes: &[u8],
    px: f32,
) -> Result<(GlyphTable, Vec<Option<RasterGlyph>>), GlyphError> {
    let font = fontdue::Font::from_bytes(font_bytes, fontdue::FontSettings::default())
        .map_err(|e| GlyphError::Font(e.to_string()))?;

    let mut glyphs = [GlyphInfo::default(); GLYPH_COUNT];
    let mut bitmaps = Vec::with_capacity(GLYPH_COUNT);
    for code in 0..GLYPH_COUNT as u8 {
        let ch = char::from(code);
        let (metrics, bitmap) = font.rasterize(ch, px);
        let drawable = metrics.width > 0 && metrics.height > 0;
        glyphs[code as usize] = GlyphInfo {
            size: [metrics.width as u32, metrics.height as u32],
            // Top bearing is the distance from the baseline to the bitmap's
            // top edge, so the quad math can subtract the descender part.
            bearing: [metrics.xmin, metrics.ymin + metrics.height as i32],
            advance: (metrics.advance_width.max(0.0) * 64.0).round() as u32,
            drawable,
        };
        bitmaps.push(drawable.then(|| RasterGlyph {
            size: [metrics.width as u32, metrics.height as u32],
            pixels: bitmap,
        }));
    }
    log::info!("rasterized {GLYPH_COUNT} glyphs at {px}px");
    Ok((GlyphTable::new(glyphs), bitmaps))
}

/// The loaded character set: metrics plus one texture bind group per
/// drawable glyph. Built once at startup and immutable afterwards; textures
/// are released with the set.
pub struct GlyphSet {
    table: GlyphTable,
    // Texture and bind group per drawable glyph; dropping the set releases
    // every glyph texture.
    glyphs: Vec<Option<(Texture, wgpu::BindGroup)>>,
    px: f32,
}

impl GlyphSet {
    /// Rasterize the character set and upload every drawable glyph as a
    /// single-channel texture bound with the shared sampler.
    ///
    /// Device errors during the upload are polled through an error scope and
    /// logged; a font that cannot be parsed is a hard error.
    pub async fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        font_bytes: &[u8],
        px: f32,
    ) -> Result<Self, GlyphError> {
        let (table, bitmaps) = rasterize_glyphs(font_bytes, px)?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let glyphs = bitmaps
            .iter()
            .enumerate()
            .map(|(code, raster)| {
                raster.as_ref().map(|raster| {
                    let label = format!("glyph {code}");
                    let texture =
                        Texture::from_glyph_bitmap(device, queue, &raster.pixels, raster.size, &label);
                    let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                        layout,
                        entries: &[
                            wgpu::BindGroupEntry {
                                binding: 0,
                                resource: wgpu::BindingResource::TextureView(&texture.view),
                            },
                            wgpu::BindGroupEntry {
                                binding: 1,
                                resource: wgpu::BindingResource::Sampler(sampler),
                            },
                        ],
                        label: Some(&label),
                    });
                    (texture, group)
                })
            })
            .collect();
        if let Some(error) = device.pop_error_scope().await {
            log::error!("device reported an error during glyph upload: {error}");
        }

        Ok(Self { table, glyphs, px })
    }

    pub fn table(&self) -> &GlyphTable {
        &self.table
    }

    /// Bind group for a character code, `None` for undrawable or
    /// unsupported codes.
    pub fn group(&self, code: u8) -> Option<&wgpu::BindGroup> {
        self.glyphs
            .get(code as usize)?
            .as_ref()
            .map(|(_, group)| group)
    }

    /// Pixel size the set was rasterized at.
    pub fn px(&self) -> f32 {
        self.px
    }
}
