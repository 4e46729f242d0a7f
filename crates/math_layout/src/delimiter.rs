//! Delimiter sizing
//!
//! A delimiter is grown by walking the font's chain of larger variants. When
//! the largest variant is still too small and the font has extensible
//! pieces, the delimiter is assembled from them.

use crate::boxes::{HorizontalBox, LayoutBox, VerticalBox};
use crate::env::Environment;
use crate::metrics::{Extension, GlyphRef};
use tracing::trace;

/// A delimiter for `code` whose height plus depth is at least `min_height`
///
/// Falls back to the largest available glyph when the font can neither
/// reach the size with a variant nor assemble one.
pub fn build(code: char, min_height: f32, env: &Environment<'_>) -> LayoutBox {
    let mut glyph = env.glyph(code);
    while glyph.total() < min_height && env.has_larger_variant(glyph.char_font) {
        glyph = env.next_larger_variant(glyph.char_font);
    }
    if glyph.total() >= min_height {
        trace!(
            target: "math_layout::delimiter",
            code = %code,
            min_height,
            total = glyph.total(),
            "delimiter variant selected"
        );
        return LayoutBox::glyph(glyph, env);
    }
    match env.extension(glyph.char_font) {
        Some(ext) => assemble_vertical(code, &ext, min_height, env),
        None => LayoutBox::glyph(glyph, env),
    }
}

/// A delimiter for `code` that is at least `min_width` wide
pub fn build_horizontal(code: char, min_width: f32, env: &Environment<'_>) -> LayoutBox {
    let mut glyph = env.glyph(code);
    while glyph.width < min_width && env.has_larger_variant(glyph.char_font) {
        glyph = env.next_larger_variant(glyph.char_font);
    }
    if glyph.width >= min_width {
        trace!(
            target: "math_layout::delimiter",
            code = %code,
            min_width,
            width = glyph.width,
            "horizontal delimiter variant selected"
        );
        return LayoutBox::glyph(glyph, env);
    }
    match env.extension(glyph.char_font) {
        Some(ext) => assemble_horizontal(code, &ext, min_width, env),
        None => LayoutBox::glyph(glyph, env),
    }
}

/// Upper bound on repeat pieces per slot in one assembly
const MAX_REPEATS: usize = 10_000;

/// Number of repeat pieces per slot so the assembly exceeds `target`,
/// capped at [`MAX_REPEATS`]
fn repeat_count(fixed: f32, repeat: f32, slots: usize, target: f32) -> usize {
    if repeat <= 0.0 || fixed > target {
        return 0;
    }
    let count = ((target - fixed) / (repeat * slots as f32)).floor() + 1.0;
    if count > MAX_REPEATS as f32 {
        trace!(
            target: "math_layout::delimiter",
            target_size = target,
            wanted = count,
            max = MAX_REPEATS,
            "repeat count clamped"
        );
        return MAX_REPEATS;
    }
    count as usize
}

/// Pieces in order: top, repeats, middle, repeats, bottom
fn pieces(ext: &Extension, count: usize) -> Vec<GlyphRef> {
    let mut pieces = Vec::new();
    pieces.extend(ext.top);
    pieces.extend(std::iter::repeat(ext.repeat).take(count));
    if let Some(middle) = ext.middle {
        pieces.push(middle);
        pieces.extend(std::iter::repeat(ext.repeat).take(count));
    }
    pieces.extend(ext.bottom);
    if pieces.is_empty() {
        pieces.push(ext.repeat);
    }
    pieces
}

fn slots(ext: &Extension) -> usize {
    if ext.middle.is_some() {
        2
    } else {
        1
    }
}

fn assemble_vertical(code: char, ext: &Extension, min_height: f32, env: &Environment<'_>) -> LayoutBox {
    let fixed: f32 = [ext.top, ext.middle, ext.bottom]
        .iter()
        .flatten()
        .map(GlyphRef::total)
        .sum();
    let count = repeat_count(fixed, ext.repeat.total(), slots(ext), min_height);

    let mut vbox = VerticalBox::new();
    let mut last_depth = 0.0;
    for piece in pieces(ext, count) {
        last_depth = piece.depth;
        vbox.add(LayoutBox::glyph(piece, env));
    }
    trace!(
        target: "math_layout::delimiter",
        code = %code,
        min_height,
        repeats = count,
        total = vbox.total(),
        "delimiter assembled"
    );
    let total = vbox.total();
    vbox.finish(total - last_depth, last_depth)
}

fn assemble_horizontal(code: char, ext: &Extension, min_width: f32, env: &Environment<'_>) -> LayoutBox {
    let fixed: f32 = [ext.top, ext.middle, ext.bottom]
        .iter()
        .flatten()
        .map(|g| g.width)
        .sum();
    let count = repeat_count(fixed, ext.repeat.width, slots(ext), min_width);

    let mut hbox = HorizontalBox::new();
    for piece in pieces(ext, count) {
        hbox.add(LayoutBox::glyph(piece, env));
    }
    trace!(
        target: "math_layout::delimiter",
        code = %code,
        min_width,
        repeats = count,
        width = hbox.width(),
        "horizontal delimiter assembled"
    );
    hbox.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;
    use crate::table_font::TableFont;

    #[test]
    fn test_small_request_uses_base_glyph() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let b = build('(', 0.1, &env);
        assert_eq!(b.glyph_ref().copied(), Some(env.glyph('(')));
    }

    #[test]
    fn test_variants_cover_request() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let base = env.glyph('(');
        let b = build('(', base.total() + 0.2, &env);
        assert!(b.total() >= base.total() + 0.2);
        assert!(b.glyph_ref().is_some());
    }

    #[test]
    fn test_huge_request_is_assembled() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        for code in ['(', '{', '|', '√'] {
            let b = build(code, 8.0, &env);
            assert!(b.total() >= 8.0, "{code} only reached {}", b.total());
            assert!(b.children().len() > 1);
        }
    }

    #[test]
    fn test_assembly_baseline_is_last_piece() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let b = build('[', 6.0, &env);
        let last = b.children().last().map(LayoutBox::depth).unwrap();
        assert!((b.depth() - last).abs() < 1e-6);
        let stacked: f32 = b.children().iter().map(LayoutBox::total).sum();
        assert!((b.total() - stacked).abs() < 1e-4);
    }

    #[test]
    fn test_no_variants_returns_glyph() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let b = build('x', 5.0, &env);
        assert_eq!(b.glyph_ref().copied(), Some(env.glyph('x')));
    }

    #[test]
    fn test_horizontal_brace() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let short = build_horizontal('⏞', 0.5, &env);
        assert!(short.width() >= 0.5);
        assert!(short.glyph_ref().is_some());

        let long = build_horizontal('⏞', 7.0, &env);
        assert!(long.width() >= 7.0);
        assert!(long.children().len() > 1);
    }

    #[test]
    fn test_repeat_count() {
        assert_eq!(repeat_count(1.0, 0.5, 1, 0.5), 0);
        assert_eq!(repeat_count(1.0, 0.5, 1, 1.0), 1);
        assert_eq!(repeat_count(1.0, 0.5, 2, 3.0), 3);
        assert_eq!(repeat_count(1.0, 0.0, 1, 3.0), 0);
        assert_eq!(repeat_count(1.0, 0.5, 1, 1e12), MAX_REPEATS);
        assert_eq!(repeat_count(1.0, 0.5, 1, f32::INFINITY), MAX_REPEATS);
    }

    #[test]
    fn test_huge_request_is_bounded() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let b = build('{', 2e9, &env);
        assert!(b.children().len() <= 2 * MAX_REPEATS + 3);
        assert!(b.total().is_finite() && b.total() > 0.0);

        let wide = build_horizontal('⏞', 1e9, &env);
        assert!(wide.children().len() <= 2 * MAX_REPEATS + 3);
    }
}
