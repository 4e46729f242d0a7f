//! In-memory font metrics
//!
//! [`TableFont`] answers [`FontMetrics`] queries from hash tables filled
//! through [`TableFontBuilder`]. [`TableFont::computer_modern`] ships a
//! table with approximate Computer Modern 10pt metrics for the characters
//! and symbols registered by `SymbolRegistry::with_defaults`.

use crate::metrics::{CharFont, Extension, FontId, FontMetrics, GlyphRef, MathConstants};
use crate::style::{Style, StyleLevel};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Upright text font (digits, parentheses, accents)
pub const ROMAN: FontId = FontId(0);
/// Math italic (letters, Greek)
pub const MATH_ITALIC: FontId = FontId(1);
/// Math symbols (operators, relations)
pub const SYMBOLS: FontId = FontId(2);
/// Large variants and extensible pieces
pub const EXTENSION: FontId = FontId(3);

/// Design metrics of one glyph at text size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphMetrics {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub italic: f32,
}

impl GlyphMetrics {
    pub const fn new(width: f32, height: f32, depth: f32, italic: f32) -> Self {
        Self {
            width,
            height,
            depth,
            italic,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ExtensionPieces {
    top: Option<CharFont>,
    middle: Option<CharFont>,
    repeat: CharFont,
    bottom: Option<CharFont>,
}

/// Font metrics served from in-memory tables
#[derive(Debug, Clone)]
pub struct TableFont {
    glyphs: HashMap<CharFont, GlyphMetrics>,
    chars: HashMap<char, CharFont>,
    larger: HashMap<CharFont, CharFont>,
    extensions: HashMap<CharFont, ExtensionPieces>,
    kerns: HashMap<(CharFont, CharFont), f32>,
    ligatures: HashMap<(CharFont, CharFont), CharFont>,
    skews: HashMap<CharFont, f32>,
    spaces: HashMap<FontId, f32>,
    text_font: FontId,
    fallback: GlyphMetrics,
    constants: MathConstants,
    script_scale: f32,
    script_script_scale: f32,
}

impl TableFont {
    pub fn builder() -> TableFontBuilder {
        TableFontBuilder::new()
    }

    /// Glyph identity used for a character, registered or not
    pub fn char_font(&self, code: char) -> CharFont {
        self.chars
            .get(&code)
            .copied()
            .unwrap_or(CharFont::new(self.text_font, code))
    }

    fn scale(&self, style: Style) -> f32 {
        match style.level() {
            StyleLevel::Display | StyleLevel::Text => 1.0,
            StyleLevel::Script => self.script_scale,
            StyleLevel::ScriptScript => self.script_script_scale,
        }
    }

    fn largest(&self, char_font: CharFont) -> CharFont {
        let mut current = char_font;
        while let Some(next) = self.larger.get(&current) {
            current = *next;
        }
        current
    }

    /// Approximate Computer Modern metrics
    pub fn computer_modern() -> Self {
        let mut b = TableFont::builder()
            .space(ROMAN, 0.333334)
            .text_font(ROMAN)
            .fallback(GlyphMetrics::new(0.5, 0.694, 0.0, 0.0));

        for (c, w, h, d, ic, skew) in LOWERCASE_ITALIC {
            b = b.glyph(c, MATH_ITALIC, GlyphMetrics::new(w, h, d, ic)).skew(c, skew);
        }
        for c in 'A'..='Z' {
            b = b
                .glyph(c, MATH_ITALIC, GlyphMetrics::new(0.75, 0.683, 0.0, 0.05))
                .skew(c, 0.083);
        }
        for (c, w, h, d, ic) in GREEK_ITALIC {
            b = b.glyph(c, MATH_ITALIC, GlyphMetrics::new(w, h, d, ic));
        }
        for c in '0'..='9' {
            b = b.glyph(c, ROMAN, GlyphMetrics::new(0.5, 0.644, 0.0, 0.0));
        }
        for (c, font, w, h, d) in SYMBOL_GLYPHS {
            b = b.glyph(c, font, GlyphMetrics::new(w, h, d, 0.0));
        }
        for (c, w, h, d, ic) in BIG_OPERATORS {
            b = b
                .glyph(c, SYMBOLS, GlyphMetrics::new(w, h, d, ic))
                .variants(c, &[GlyphMetrics::new(w * 1.37, 1.0, 0.5, ic * 2.0)]);
        }
        b = b
            .glyph('∫', SYMBOLS, GlyphMetrics::new(0.417, 0.806, 0.306, 0.111))
            .variants('∫', &[GlyphMetrics::new(0.556, 1.36, 0.862, 0.222)])
            .glyph('∮', SYMBOLS, GlyphMetrics::new(0.472, 0.806, 0.306, 0.111))
            .variants('∮', &[GlyphMetrics::new(0.556, 1.36, 0.862, 0.222)]);

        for (c, widths, piece_width) in BRACKETS {
            let sizes: Vec<GlyphMetrics> = widths
                .iter()
                .zip([1.2f32, 1.8, 2.4, 3.0])
                .map(|(w, total)| GlyphMetrics::new(*w, 0.04, total - 0.04, 0.0))
                .collect();
            b = b.variants(c, &sizes).extension(
                c,
                Some(GlyphMetrics::new(piece_width, 0.04, 1.76, 0.0)),
                None,
                GlyphMetrics::new(piece_width, 0.0, 0.6, 0.0),
                Some(GlyphMetrics::new(piece_width, 0.04, 1.76, 0.0)),
            );
        }
        for c in ['{', '}'] {
            b = b
                .variants(
                    c,
                    &[
                        GlyphMetrics::new(0.583, 0.04, 1.16, 0.0),
                        GlyphMetrics::new(0.667, 0.04, 1.76, 0.0),
                        GlyphMetrics::new(0.75, 0.04, 2.36, 0.0),
                        GlyphMetrics::new(0.806, 0.04, 2.96, 0.0),
                    ],
                )
                .extension(
                    c,
                    Some(GlyphMetrics::new(0.889, 0.0, 0.9, 0.0)),
                    Some(GlyphMetrics::new(0.889, 0.0, 1.8, 0.0)),
                    GlyphMetrics::new(0.889, 0.0, 0.3, 0.0),
                    Some(GlyphMetrics::new(0.889, 0.0, 0.9, 0.0)),
                );
        }
        for c in ['|', '‖'] {
            b = b.extension(c, None, None, GlyphMetrics::new(0.333, 0.0, 0.6, 0.0), None);
        }
        b = b
            .variants(
                '√',
                &[
                    GlyphMetrics::new(1.0, 0.04, 1.16, 0.0),
                    GlyphMetrics::new(1.0, 0.04, 1.76, 0.0),
                    GlyphMetrics::new(1.0, 0.04, 2.36, 0.0),
                    GlyphMetrics::new(1.056, 0.04, 2.96, 0.0),
                ],
            )
            .extension(
                '√',
                Some(GlyphMetrics::new(1.056, 0.04, 0.56, 0.0)),
                None,
                GlyphMetrics::new(1.056, 0.0, 0.6, 0.0),
                Some(GlyphMetrics::new(1.056, 0.04, 1.76, 0.0)),
            );

        for (c, w, h) in ACCENTS {
            b = b.glyph(c, ROMAN, GlyphMetrics::new(w, h, 0.0, 0.0));
        }
        for c in ['^', '~'] {
            b = b.variants(
                c,
                &[
                    GlyphMetrics::new(0.556, 0.722, 0.0, 0.0),
                    GlyphMetrics::new(1.0, 0.75, 0.0, 0.0),
                    GlyphMetrics::new(1.444, 0.75, 0.0, 0.0),
                ],
            );
        }

        for c in ['⏞', '⏟'] {
            b = b
                .glyph(c, SYMBOLS, GlyphMetrics::new(0.5, 0.25, 0.0, 0.0))
                .variants(
                    c,
                    &[
                        GlyphMetrics::new(1.0, 0.25, 0.0, 0.0),
                        GlyphMetrics::new(1.5, 0.25, 0.0, 0.0),
                        GlyphMetrics::new(2.0, 0.25, 0.0, 0.0),
                    ],
                )
                .extension(
                    c,
                    Some(GlyphMetrics::new(0.45, 0.25, 0.0, 0.0)),
                    Some(GlyphMetrics::new(0.9, 0.25, 0.0, 0.0)),
                    GlyphMetrics::new(0.45, 0.15, 0.0, 0.0),
                    Some(GlyphMetrics::new(0.45, 0.25, 0.0, 0.0)),
                );
        }

        b.build()
    }
}

impl Default for TableFont {
    fn default() -> Self {
        Self::computer_modern()
    }
}

impl FontMetrics for TableFont {
    fn glyph_for(&self, code: char, style: Style) -> GlyphRef {
        self.glyph(self.char_font(code), style)
    }

    fn glyph(&self, char_font: CharFont, style: Style) -> GlyphRef {
        let m = self.glyphs.get(&char_font).copied().unwrap_or(self.fallback);
        GlyphRef::new(char_font, m.width, m.height, m.depth, m.italic).scaled(self.scale(style))
    }

    fn has_larger_variant(&self, char_font: CharFont) -> bool {
        self.larger.contains_key(&char_font)
    }

    fn next_larger_variant(&self, char_font: CharFont, style: Style) -> GlyphRef {
        let next = self.larger.get(&char_font).copied().unwrap_or(char_font);
        self.glyph(next, style)
    }

    fn extension(&self, char_font: CharFont, style: Style) -> Option<Extension> {
        let pieces = self
            .extensions
            .get(&char_font)
            .or_else(|| self.extensions.get(&self.largest(char_font)))?;
        Some(Extension {
            top: pieces.top.map(|p| self.glyph(p, style)),
            middle: pieces.middle.map(|p| self.glyph(p, style)),
            repeat: self.glyph(pieces.repeat, style),
            bottom: pieces.bottom.map(|p| self.glyph(p, style)),
        })
    }

    fn skew(&self, char_font: CharFont, style: Style) -> f32 {
        self.skews.get(&char_font).copied().unwrap_or(0.0) * self.scale(style)
    }

    fn kern(&self, left: CharFont, right: CharFont, style: Style) -> f32 {
        self.kerns.get(&(left, right)).copied().unwrap_or(0.0) * self.scale(style)
    }

    fn ligature(&self, left: CharFont, right: CharFont, style: Style) -> Option<GlyphRef> {
        self.ligatures
            .get(&(left, right))
            .map(|lig| self.glyph(*lig, style))
    }

    fn space(&self, font: Option<FontId>, style: Style) -> f32 {
        let own = font.and_then(|f| self.spaces.get(&f).copied());
        let space = match own {
            Some(space) if space > 0.0 => space,
            _ => self.spaces.get(&self.text_font).copied().unwrap_or(0.0),
        };
        space * self.scale(style)
    }

    fn constants(&self, style: Style) -> MathConstants {
        self.constants.scaled(self.scale(style))
    }
}

/// Builder for [`TableFont`]
#[derive(Debug, Clone)]
pub struct TableFontBuilder {
    font: TableFont,
    next_private: u32,
}

impl TableFontBuilder {
    pub fn new() -> Self {
        Self {
            font: TableFont {
                glyphs: HashMap::new(),
                chars: HashMap::new(),
                larger: HashMap::new(),
                extensions: HashMap::new(),
                kerns: HashMap::new(),
                ligatures: HashMap::new(),
                skews: HashMap::new(),
                spaces: HashMap::new(),
                text_font: ROMAN,
                fallback: GlyphMetrics::new(0.5, 0.7, 0.0, 0.0),
                constants: MathConstants::default(),
                script_scale: 0.7,
                script_script_scale: 0.5,
            },
            next_private: 0,
        }
    }

    /// Private-use code for a glyph that has no character of its own
    fn private_glyph(&mut self, metrics: GlyphMetrics) -> CharFont {
        let code = char::from_u32(0xE000 + self.next_private).unwrap_or(char::REPLACEMENT_CHARACTER);
        self.next_private += 1;
        let char_font = CharFont::new(EXTENSION, code);
        self.font.glyphs.insert(char_font, metrics);
        char_font
    }

    /// Register a glyph and map `code` to it
    pub fn glyph(mut self, code: char, font: FontId, metrics: GlyphMetrics) -> Self {
        let char_font = CharFont::new(font, code);
        self.font.glyphs.insert(char_font, metrics);
        self.font.chars.insert(code, char_font);
        self
    }

    /// Chain of progressively larger variants after the current largest one
    pub fn variants(mut self, code: char, sizes: &[GlyphMetrics]) -> Self {
        let mut prev = self.font.largest(self.font.char_font(code));
        for metrics in sizes {
            let next = self.private_glyph(*metrics);
            self.font.larger.insert(prev, next);
            prev = next;
        }
        self
    }

    /// Extensible pieces attached to the largest variant of `code`
    pub fn extension(
        mut self,
        code: char,
        top: Option<GlyphMetrics>,
        middle: Option<GlyphMetrics>,
        repeat: GlyphMetrics,
        bottom: Option<GlyphMetrics>,
    ) -> Self {
        let target = self.font.largest(self.font.char_font(code));
        let pieces = ExtensionPieces {
            top: top.map(|m| self.private_glyph(m)),
            middle: middle.map(|m| self.private_glyph(m)),
            repeat: self.private_glyph(repeat),
            bottom: bottom.map(|m| self.private_glyph(m)),
        };
        self.font.extensions.insert(target, pieces);
        self
    }

    pub fn kern(mut self, left: char, right: char, amount: f32) -> Self {
        let key = (self.font.char_font(left), self.font.char_font(right));
        self.font.kerns.insert(key, amount);
        self
    }

    /// Register `left right → ligature`, adding the ligature glyph
    ///
    /// The ligature character maps to the new glyph, so it can itself be the
    /// left side of a later ligature or kern.
    pub fn ligature(mut self, left: char, right: char, ligature: char, metrics: GlyphMetrics) -> Self {
        let key = (self.font.char_font(left), self.font.char_font(right));
        let font = key.0.font;
        let char_font = CharFont::new(font, ligature);
        self.font.glyphs.insert(char_font, metrics);
        self.font.chars.entry(ligature).or_insert(char_font);
        self.font.ligatures.insert(key, char_font);
        self
    }

    pub fn skew(mut self, code: char, amount: f32) -> Self {
        let char_font = self.font.char_font(code);
        self.font.skews.insert(char_font, amount);
        self
    }

    pub fn space(mut self, font: FontId, amount: f32) -> Self {
        self.font.spaces.insert(font, amount);
        self
    }

    /// Font whose space is used when no font was used yet
    pub fn text_font(mut self, font: FontId) -> Self {
        self.font.text_font = font;
        self
    }

    /// Metrics for characters without a registered glyph
    pub fn fallback(mut self, metrics: GlyphMetrics) -> Self {
        self.font.fallback = metrics;
        self
    }

    pub fn constants(mut self, constants: MathConstants) -> Self {
        self.font.constants = constants;
        self
    }

    pub fn script_scales(mut self, script: f32, script_script: f32) -> Self {
        self.font.script_scale = script;
        self.font.script_script_scale = script_script;
        self
    }

    pub fn build(self) -> TableFont {
        self.font
    }
}

impl Default for TableFontBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Computer Modern tables
// =============================================================================

/// (char, width, height, depth, italic correction, skew)
const LOWERCASE_ITALIC: [(char, f32, f32, f32, f32, f32); 26] = [
    ('a', 0.529, 0.431, 0.0, 0.0, 0.028),
    ('b', 0.429, 0.694, 0.0, 0.0, 0.0),
    ('c', 0.433, 0.431, 0.0, 0.0, 0.056),
    ('d', 0.520, 0.694, 0.0, 0.0, 0.167),
    ('e', 0.466, 0.431, 0.0, 0.0, 0.056),
    ('f', 0.490, 0.694, 0.194, 0.108, 0.167),
    ('g', 0.477, 0.431, 0.194, 0.036, 0.028),
    ('h', 0.576, 0.694, 0.0, 0.0, 0.0),
    ('i', 0.345, 0.660, 0.0, 0.0, 0.028),
    ('j', 0.412, 0.660, 0.194, 0.057, 0.083),
    ('k', 0.521, 0.694, 0.0, 0.0, 0.0),
    ('l', 0.298, 0.694, 0.0, 0.020, 0.083),
    ('m', 0.878, 0.431, 0.0, 0.0, 0.028),
    ('n', 0.600, 0.431, 0.0, 0.0, 0.028),
    ('o', 0.485, 0.431, 0.0, 0.0, 0.056),
    ('p', 0.503, 0.431, 0.194, 0.0, 0.083),
    ('q', 0.446, 0.431, 0.194, 0.036, 0.083),
    ('r', 0.451, 0.431, 0.0, 0.028, 0.056),
    ('s', 0.469, 0.431, 0.0, 0.0, 0.056),
    ('t', 0.361, 0.615, 0.0, 0.0, 0.083),
    ('u', 0.572, 0.431, 0.0, 0.0, 0.028),
    ('v', 0.485, 0.431, 0.0, 0.036, 0.028),
    ('w', 0.716, 0.431, 0.0, 0.027, 0.083),
    ('x', 0.572, 0.431, 0.0, 0.0, 0.028),
    ('y', 0.490, 0.431, 0.194, 0.036, 0.056),
    ('z', 0.465, 0.431, 0.0, 0.044, 0.056),
];

const GREEK_ITALIC: [(char, f32, f32, f32, f32); 8] = [
    ('α', 0.640, 0.431, 0.0, 0.004),
    ('β', 0.566, 0.694, 0.194, 0.053),
    ('θ', 0.469, 0.694, 0.0, 0.028),
    ('λ', 0.583, 0.694, 0.0, 0.0),
    ('μ', 0.603, 0.431, 0.194, 0.0),
    ('π', 0.570, 0.431, 0.0, 0.036),
    ('σ', 0.571, 0.431, 0.0, 0.036),
    ('ω', 0.622, 0.431, 0.0, 0.036),
];

const SYMBOL_GLYPHS: [(char, FontId, f32, f32, f32); 40] = [
    ('+', ROMAN, 0.778, 0.583, 0.083),
    ('=', ROMAN, 0.778, 0.367, -0.133),
    ('(', ROMAN, 0.389, 0.75, 0.25),
    (')', ROMAN, 0.389, 0.75, 0.25),
    ('[', ROMAN, 0.278, 0.75, 0.25),
    (']', ROMAN, 0.278, 0.75, 0.25),
    (':', ROMAN, 0.278, 0.431, 0.0),
    (';', ROMAN, 0.278, 0.431, 0.194),
    ('!', ROMAN, 0.278, 0.694, 0.0),
    (',', MATH_ITALIC, 0.278, 0.106, 0.194),
    ('.', MATH_ITALIC, 0.278, 0.106, 0.0),
    ('<', MATH_ITALIC, 0.778, 0.539, 0.039),
    ('>', MATH_ITALIC, 0.778, 0.539, 0.039),
    ('∂', MATH_ITALIC, 0.531, 0.694, 0.0),
    ('−', SYMBOLS, 0.778, 0.583, 0.083),
    ('×', SYMBOLS, 0.778, 0.491, -0.009),
    ('⋅', SYMBOLS, 0.278, 0.444, -0.056),
    ('±', SYMBOLS, 0.778, 0.667, 0.222),
    ('∓', SYMBOLS, 0.778, 0.667, 0.222),
    ('÷', SYMBOLS, 0.778, 0.5, 0.0),
    ('∪', SYMBOLS, 0.667, 0.556, 0.0),
    ('∩', SYMBOLS, 0.667, 0.556, 0.0),
    ('≤', SYMBOLS, 0.778, 0.636, 0.136),
    ('≥', SYMBOLS, 0.778, 0.636, 0.136),
    ('≠', SYMBOLS, 0.778, 0.716, 0.215),
    ('≈', SYMBOLS, 0.778, 0.483, -0.017),
    ('≡', SYMBOLS, 0.778, 0.464, -0.036),
    ('∈', SYMBOLS, 0.667, 0.539, 0.039),
    ('→', SYMBOLS, 1.0, 0.367, -0.133),
    ('←', SYMBOLS, 1.0, 0.367, -0.133),
    ('∞', SYMBOLS, 1.0, 0.431, 0.0),
    ('∇', SYMBOLS, 0.833, 0.683, 0.0),
    ('∀', SYMBOLS, 0.556, 0.694, 0.0),
    ('∃', SYMBOLS, 0.556, 0.694, 0.0),
    ('{', SYMBOLS, 0.5, 0.75, 0.25),
    ('}', SYMBOLS, 0.5, 0.75, 0.25),
    ('|', SYMBOLS, 0.278, 0.75, 0.25),
    ('‖', SYMBOLS, 0.5, 0.75, 0.25),
    ('⟨', SYMBOLS, 0.389, 0.75, 0.25),
    ('√', SYMBOLS, 0.833, 0.04, 0.96),
];

/// (char, width, height, depth, italic) at text size
const BIG_OPERATORS: [(char, f32, f32, f32, f32); 5] = [
    ('∑', 1.056, 0.75, 0.25, 0.0),
    ('∏', 0.944, 0.75, 0.25, 0.0),
    ('∐', 0.944, 0.75, 0.25, 0.0),
    ('⋃', 0.833, 0.75, 0.25, 0.0),
    ('⋂', 0.833, 0.75, 0.25, 0.0),
];

/// (char, variant widths, extension piece width)
const BRACKETS: [(char, [f32; 4], f32); 4] = [
    ('(', [0.458, 0.597, 0.736, 0.792], 0.875),
    (')', [0.458, 0.597, 0.736, 0.792], 0.875),
    ('[', [0.417, 0.472, 0.528, 0.583], 0.667),
    (']', [0.417, 0.472, 0.528, 0.583], 0.667),
];

/// (char, width, height)
const ACCENTS: [(char, f32, f32); 11] = [
    ('^', 0.5, 0.694),
    ('~', 0.5, 0.668),
    ('¯', 0.5, 0.569),
    ('\u{20D7}', 0.5, 0.714),
    ('˙', 0.278, 0.669),
    ('¨', 0.5, 0.669),
    ('´', 0.5, 0.694),
    ('`', 0.5, 0.694),
    ('ˇ', 0.5, 0.628),
    ('˘', 0.5, 0.694),
    ('˚', 0.75, 0.694),
];
