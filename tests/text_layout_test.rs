//! Layout and glyph metric checks through the public API.
//!
//! The metric round-trip needs a real font file; like the rest of the
//! asset-dependent checks it skips quietly when the font is not present.

use tale_ngin::text::glyph::{rasterize_glyphs, GlyphInfo, GlyphTable, GLYPH_COUNT};
use tale_ngin::text::layout::{layout_line, text_width, wrap_words};

const FONT_PATH: &str = "assets/fonts/GentiumBookPlus-Bold.ttf";

fn fixed_width_table(advance_px: u32) -> GlyphTable {
    let mut glyphs = [GlyphInfo::default(); GLYPH_COUNT];
    for code in 33..127usize {
        glyphs[code] = GlyphInfo {
            size: [advance_px - 2, 12],
            bearing: [1, 10],
            advance: advance_px << 6,
            drawable: true,
        };
    }
    glyphs[b' ' as usize] = GlyphInfo {
        advance: advance_px << 6,
        ..Default::default()
    };
    GlyphTable::new(glyphs)
}

#[test]
fn leading_space_shifts_the_first_drawn_glyph() {
    let table = fixed_width_table(10);
    let (quads, pen) = layout_line(&table, " A", [100.0, 1000.0], 1.0);
    assert_eq!(quads.len(), 1, "space must not emit a quad");
    assert_eq!(quads[0].code, b'A');
    // Pen moved one space advance before 'A' was placed.
    assert_eq!(quads[0].vertices[1][0], 100.0 + 10.0 + 1.0);
    assert_eq!(pen, 100.0 + 20.0);
}

#[test]
fn wrapped_lines_reuse_the_left_margin() {
    let table = fixed_width_table(10);
    let lines = wrap_words(&table, "abcd efgh ijkl", 1.0, 95.0);
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert!(text_width(&table, line, 1.0) <= 95.0);
        let (quads, _) = layout_line(&table, line, [100.0, 500.0], 1.0);
        // Every line starts at the same pen origin.
        assert_eq!(quads[0].vertices[1][0], 101.0);
    }
}

#[test]
fn glyph_metrics_round_trip_against_the_font() {
    let Ok(font_bytes) = std::fs::read(FONT_PATH) else {
        eprintln!("skipping: no font at {FONT_PATH}");
        return;
    };

    let px = 48.0;
    let (table, bitmaps) = rasterize_glyphs(&font_bytes, px).unwrap();

    for code in 32u8..127 {
        let info = table.get(char::from(code)).unwrap();
        // Advances are non-negative and bounded by a couple of em widths.
        let advance_px = (info.advance >> 6) as f32;
        assert!(advance_px < px * 2.0, "glyph {code} advance out of range");
        if code != b' ' {
            assert!(info.advance > 0, "printable glyph {code} must advance");
        }
    }

    // Space carries an advance but no bitmap; letters carry both.
    let space = table.get(' ').unwrap();
    assert!(!space.drawable && space.advance > 0);
    assert!(bitmaps[b' ' as usize].is_none());
    let a = table.get('A').unwrap();
    assert!(a.drawable && a.size[0] > 0 && a.size[1] > 0);
    let a_bitmap = bitmaps[b'A' as usize].as_ref().unwrap();
    assert_eq!(
        a_bitmap.pixels.len(),
        (a.size[0] * a.size[1]) as usize,
        "bitmap must be one byte of coverage per texel"
    );

    // Doubling the pixel size roughly doubles the advance.
    let (table_2x, _) = rasterize_glyphs(&font_bytes, px * 2.0).unwrap();
    let a_2x = table_2x.get('A').unwrap();
    let ratio = (a_2x.advance as f32) / (a.advance as f32);
    assert!((1.8..2.2).contains(&ratio), "advance should scale with px");
}
