//! Font metrics - the narrow interface through which layout reads fonts
//!
//! The layout engine never stores or loads fonts itself. Everything it needs
//! (glyph boxes, kerns, ligatures, larger variants, extensible pieces and the
//! TeX parameters) comes through [`FontMetrics`].

use crate::style::Style;
use serde::{Deserialize, Serialize};

/// Identifier of a font inside a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontId(pub u16);

/// A (font, character code) pair identifying one glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharFont {
    pub font: FontId,
    pub code: char,
}

impl CharFont {
    pub const fn new(font: FontId, code: char) -> Self {
        Self { font, code }
    }
}

/// A glyph identity plus the metrics snapshot used for layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphRef {
    pub char_font: CharFont,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Italic correction
    pub italic: f32,
}

impl GlyphRef {
    pub fn new(char_font: CharFont, width: f32, height: f32, depth: f32, italic: f32) -> Self {
        Self {
            char_font,
            width,
            height,
            depth,
            italic,
        }
    }

    /// Total vertical extent
    pub fn total(&self) -> f32 {
        self.height + self.depth
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
            depth: self.depth * factor,
            italic: self.italic * factor,
            ..self
        }
    }
}

/// Pieces of an extensible delimiter
///
/// For vertical delimiters `top`/`bottom` are the upper and lower ends; for
/// horizontal ones they are the left and right ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub top: Option<GlyphRef>,
    pub middle: Option<GlyphRef>,
    pub repeat: GlyphRef,
    pub bottom: Option<GlyphRef>,
}

impl Extension {
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            top: self.top.map(|g| g.scaled(factor)),
            middle: self.middle.map(|g| g.scaled(factor)),
            repeat: self.repeat.scaled(factor),
            bottom: self.bottom.map(|g| g.scaled(factor)),
        }
    }
}

/// TeX math parameters for one style
///
/// Names follow the TeXbook's `\fontdimen` parameters of the math symbol
/// (σ) and extension (ξ) fonts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MathConstants {
    pub quad: f32,
    pub x_height: f32,
    pub axis_height: f32,
    pub default_rule_thickness: f32,
    pub num1: f32,
    pub num2: f32,
    pub num3: f32,
    pub denom1: f32,
    pub denom2: f32,
    pub sup1: f32,
    pub sup2: f32,
    pub sup3: f32,
    pub sub1: f32,
    pub sub2: f32,
    pub sup_drop: f32,
    pub sub_drop: f32,
    pub big_op_spacing1: f32,
    pub big_op_spacing2: f32,
    pub big_op_spacing3: f32,
    pub big_op_spacing4: f32,
    pub big_op_spacing5: f32,
}

impl Default for MathConstants {
    /// Computer Modern 10pt values, in ems
    fn default() -> Self {
        Self {
            quad: 1.0,
            x_height: 0.430555,
            axis_height: 0.25,
            default_rule_thickness: 0.04,
            num1: 0.676508,
            num2: 0.393732,
            num3: 0.443731,
            denom1: 0.685951,
            denom2: 0.344841,
            sup1: 0.412892,
            sup2: 0.362892,
            sup3: 0.288889,
            sub1: 0.15,
            sub2: 0.247217,
            sup_drop: 0.386108,
            sub_drop: 0.05,
            big_op_spacing1: 0.111112,
            big_op_spacing2: 0.166667,
            big_op_spacing3: 0.2,
            big_op_spacing4: 0.6,
            big_op_spacing5: 0.1,
        }
    }
}

impl MathConstants {
    /// Scale every parameter, e.g. for script sizes
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            quad: self.quad * factor,
            x_height: self.x_height * factor,
            axis_height: self.axis_height * factor,
            default_rule_thickness: self.default_rule_thickness * factor,
            num1: self.num1 * factor,
            num2: self.num2 * factor,
            num3: self.num3 * factor,
            denom1: self.denom1 * factor,
            denom2: self.denom2 * factor,
            sup1: self.sup1 * factor,
            sup2: self.sup2 * factor,
            sup3: self.sup3 * factor,
            sub1: self.sub1 * factor,
            sub2: self.sub2 * factor,
            sup_drop: self.sup_drop * factor,
            sub_drop: self.sub_drop * factor,
            big_op_spacing1: self.big_op_spacing1 * factor,
            big_op_spacing2: self.big_op_spacing2 * factor,
            big_op_spacing3: self.big_op_spacing3 * factor,
            big_op_spacing4: self.big_op_spacing4 * factor,
            big_op_spacing5: self.big_op_spacing5 * factor,
        }
    }

    /// One math unit (1/18 quad)
    pub fn mu(&self) -> f32 {
        self.quad / 18.0
    }
}

/// Read-only access to font data, already scaled for the requested style
///
/// Implementations must be `Sync`: one atom tree may be laid out from
/// several threads sharing the same provider.
pub trait FontMetrics: Send + Sync {
    /// Glyph used for a math-mode character or symbol code point
    fn glyph_for(&self, code: char, style: Style) -> GlyphRef;

    /// Metrics of a specific glyph
    fn glyph(&self, char_font: CharFont, style: Style) -> GlyphRef;

    fn has_larger_variant(&self, char_font: CharFont) -> bool;

    /// Next larger variant; returns the glyph itself when there is none
    fn next_larger_variant(&self, char_font: CharFont, style: Style) -> GlyphRef;

    /// Extensible pieces, if the glyph can be assembled to any size
    fn extension(&self, char_font: CharFont, style: Style) -> Option<Extension>;

    /// Skew used to center accents over italic glyphs
    fn skew(&self, char_font: CharFont, style: Style) -> f32;

    fn kern(&self, left: CharFont, right: CharFont, style: Style) -> f32;

    fn ligature(&self, left: CharFont, right: CharFont, style: Style) -> Option<GlyphRef>;

    /// Inter-word space of `font`, or of the default text font when `None`
    fn space(&self, font: Option<FontId>, style: Style) -> f32;

    fn constants(&self, style: Style) -> MathConstants;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_scaling() {
        let g = GlyphRef::new(CharFont::new(FontId(1), 'x'), 0.5, 0.4, 0.1, 0.02);
        let s = g.scaled(0.5);
        assert_eq!(s.width, 0.25);
        assert_eq!(s.height, 0.2);
        assert_eq!(s.depth, 0.05);
        assert_eq!(s.italic, 0.01);
        assert_eq!(s.char_font, g.char_font);
        assert_eq!(g.total(), 0.5);
    }

    #[test]
    fn test_constants_scaling() {
        let text = MathConstants::default();
        let script = text.scaled(0.7);
        assert!(script.axis_height < text.axis_height);
        assert!((script.quad - 0.7).abs() < 1e-6);
        assert!((text.mu() - 1.0 / 18.0).abs() < 1e-6);
    }
}
