//! Pen-cursor layout: strings to positioned glyph quads, plus word wrap.
//!
//! Everything here is pure CPU math over [`GlyphTable`] metrics, so the quad
//! placement and the wrap policy can be tested without a device. The
//! coordinate system matches the renderer's orthographic projection: origin
//! at the bottom-left of the viewport, y growing upwards, positions given at
//! the text baseline.

use crate::text::glyph::{GlyphInfo, GlyphTable};

/// One glyph quad: two triangles, four floats per vertex
/// (position.xy + texcoord.xy).
pub type QuadVertices = [[f32; 4]; 6];

/// A positioned, drawable glyph.
pub struct GlyphQuad {
    /// Character code, always within the supported set.
    pub code: u8,
    pub vertices: QuadVertices,
}

/// Pen advance for one glyph in pixels, out of 26.6 fixed point.
pub fn advance_px(info: &GlyphInfo, scale: f32) -> f32 {
    (info.advance >> 6) as f32 * scale
}

/// Width of a string in pixels: the sum of its glyph advances.
/// Unsupported characters contribute nothing.
pub fn text_width(table: &GlyphTable, text: &str, scale: f32) -> f32 {
    text.chars()
        .filter_map(|ch| table.get(ch))
        .map(|info| advance_px(info, scale))
        .sum()
}

/// Lay out a single line starting at `origin` (baseline position).
///
/// Drawable glyphs become quads; undrawable glyphs (space) only advance the
/// pen; unsupported characters are skipped as zero-width. Returns the quads
/// and the pen's final x position.
pub fn layout_line(
    table: &GlyphTable,
    text: &str,
    origin: [f32; 2],
    scale: f32,
) -> (Vec<GlyphQuad>, f32) {
    let [mut x, y] = origin;
    let mut quads = Vec::new();
    for ch in text.chars() {
        let Some(info) = table.get(ch) else {
            continue;
        };
        if info.drawable {
            quads.push(GlyphQuad {
                code: ch as u8,
                vertices: glyph_quad(info, x, y, scale),
            });
        }
        x += advance_px(info, scale);
    }
    (quads, x)
}

fn glyph_quad(info: &GlyphInfo, x: f32, y: f32, scale: f32) -> QuadVertices {
    let xpos = x + info.bearing[0] as f32 * scale;
    // Drop below the baseline by the descender part of the bitmap.
    let ypos = y - (info.size[1] as i32 - info.bearing[1]) as f32 * scale;
    let w = info.size[0] as f32 * scale;
    let h = info.size[1] as f32 * scale;
    // Texture row 0 is the top of the bitmap.
    [
        [xpos, ypos + h, 0.0, 0.0],
        [xpos, ypos, 0.0, 1.0],
        [xpos + w, ypos, 1.0, 1.0],
        [xpos, ypos + h, 0.0, 0.0],
        [xpos + w, ypos, 1.0, 1.0],
        [xpos + w, ypos + h, 1.0, 0.0],
    ]
}

/// Greedy word wrap: split `text` at spaces into lines no wider than
/// `max_width` pixels.
///
/// A single word wider than the limit gets its own (overflowing) line
/// rather than being broken mid-word. Runs of spaces collapse.
pub fn wrap_words(table: &GlyphTable, text: &str, scale: f32, max_width: f32) -> Vec<String> {
    let space = table
        .get(' ')
        .map(|info| advance_px(info, scale))
        .unwrap_or(0.0);

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut width = 0.0;
    for word in text.split(' ') {
        if word.is_empty() {
            continue;
        }
        let word_width = text_width(table, word, scale);
        if !line.is_empty() && width + space + word_width > max_width {
            lines.push(std::mem::take(&mut line));
            width = 0.0;
        }
        if !line.is_empty() {
            line.push(' ');
            width += space;
        }
        line.push_str(word);
        width += word_width;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::glyph::{GlyphInfo, GLYPH_COUNT};

    /// Synthetic monospace-ish metrics: printable glyphs are 10x12 bitmaps
    /// advancing 12 px, space advances 8 px with no bitmap.
    fn test_table() -> GlyphTable {
        let mut glyphs = [GlyphInfo::default(); GLYPH_COUNT];
        for code in 33..127usize {
            glyphs[code] = GlyphInfo {
                size: [10, 12],
                bearing: [1, 10],
                advance: 12 << 6,
                drawable: true,
            };
        }
        glyphs[b' ' as usize] = GlyphInfo {
            size: [0, 0],
            bearing: [0, 0],
            advance: 8 << 6,
            drawable: false,
        };
        GlyphTable::new(glyphs)
    }

    #[test]
    fn space_advances_the_pen_without_a_quad() {
        let table = test_table();
        let (quads, end_x) = layout_line(&table, " A", [100.0, 1000.0], 1.0);
        // Space draws nothing; 'A' is the only quad, shifted by the space advance.
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].code, b'A');
        let left = quads[0].vertices[1][0];
        assert_eq!(left, 100.0 + 8.0 + 1.0);
        assert_eq!(end_x, 100.0 + 8.0 + 12.0);
    }

    #[test]
    fn quad_geometry_follows_bearing_and_size() {
        let table = test_table();
        let (quads, _) = layout_line(&table, "A", [0.0, 100.0], 1.0);
        let v = &quads[0].vertices;
        // Baseline 100, top bearing 10, bitmap 12 tall: bottom at 98, top at 110.
        assert_eq!(v[1], [1.0, 98.0, 0.0, 1.0]);
        assert_eq!(v[0], [1.0, 110.0, 0.0, 0.0]);
        assert_eq!(v[5], [11.0, 110.0, 1.0, 0.0]);
    }

    #[test]
    fn scale_multiplies_positions_and_advances() {
        let table = test_table();
        let (quads, end_x) = layout_line(&table, "AB", [0.0, 0.0], 2.0);
        assert_eq!(end_x, 48.0);
        assert_eq!(quads[1].vertices[1][0], 24.0 + 2.0);
    }

    #[test]
    fn unsupported_characters_are_zero_width() {
        let table = test_table();
        let (quads, end_x) = layout_line(&table, "A\u{e9}B", [0.0, 0.0], 1.0);
        assert_eq!(quads.len(), 2);
        assert_eq!(end_x, 24.0);
    }

    #[test]
    fn wrap_keeps_lines_within_the_limit() {
        let table = test_table();
        // Each word is 24 px, a joining space 8 px.
        let lines = wrap_words(&table, "aa bb cc dd", 1.0, 90.0);
        assert_eq!(lines, vec!["aa bb cc".to_string(), "dd".to_string()]);
        for line in &lines {
            assert!(text_width(&table, line, 1.0) <= 90.0);
        }
    }

    #[test]
    fn wrap_splits_only_at_spaces() {
        let table = test_table();
        let lines = wrap_words(&table, "alpha beta", 1.0, 70.0);
        assert_eq!(lines, vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        let table = test_table();
        let lines = wrap_words(&table, "a incomprehensibilities b", 1.0, 60.0);
        assert_eq!(lines[1], "incomprehensibilities");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_text_yields_no_lines() {
        let table = test_table();
        assert!(wrap_words(&table, "", 1.0, 100.0).is_empty());
        assert!(wrap_words(&table, "   ", 1.0, 100.0).is_empty());
    }
}
