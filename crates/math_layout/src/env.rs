//! Layout environment - the style/size/color context of a layout call
//!
//! An [`Environment`] is a small `Copy` value. Every derivation returns a new
//! environment; nothing is ever changed in place, so a child layout can never
//! leak state into its parent or siblings.

use crate::metrics::{CharFont, Extension, FontId, FontMetrics, GlyphRef, MathConstants};
use crate::style::Style;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Context carried down the atom tree during layout
#[derive(Clone, Copy)]
pub struct Environment<'f> {
    font: &'f dyn FontMetrics,
    style: Style,
    size: f32,
    foreground: Option<Color>,
    background: Option<Color>,
    last_font: Option<FontId>,
}

impl<'f> Environment<'f> {
    pub fn new(font: &'f dyn FontMetrics, style: Style) -> Self {
        Self {
            font,
            style,
            size: 1.0,
            foreground: None,
            background: None,
            last_font: None,
        }
    }

    pub fn font(&self) -> &'f dyn FontMetrics {
        self.font
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Size multiplier applied to every metric read through this environment
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Font of the most recently appended glyph in the current row
    pub fn last_font(&self) -> Option<FontId> {
        self.last_font
    }

    // ---- derivations ----

    pub fn with_style(self, style: Style) -> Self {
        Self { style, ..self }
    }

    pub fn with_size(self, size: f32) -> Self {
        Self { size, ..self }
    }

    /// Override foreground and/or background; `None` keeps the current one
    pub fn with_colors(self, foreground: Option<Color>, background: Option<Color>) -> Self {
        Self {
            foreground: foreground.or(self.foreground),
            background: background.or(self.background),
            ..self
        }
    }

    pub fn with_last_font(self, last_font: Option<FontId>) -> Self {
        Self { last_font, ..self }
    }

    /// Clear the per-row carry state
    pub fn reset(self) -> Self {
        Self {
            last_font: None,
            ..self
        }
    }

    pub fn cramped(self) -> Self {
        self.with_style(self.style.cramped())
    }

    pub fn sup_style(self) -> Self {
        self.with_style(self.style.sup())
    }

    pub fn sub_style(self) -> Self {
        self.with_style(self.style.sub())
    }

    pub fn numerator_style(self) -> Self {
        self.with_style(self.style.numerator())
    }

    pub fn denominator_style(self) -> Self {
        self.with_style(self.style.denominator())
    }

    pub fn root_style(self) -> Self {
        self.with_style(self.style.root())
    }

    // ---- font queries, scaled by `size` ----

    pub fn glyph(&self, code: char) -> GlyphRef {
        self.font.glyph_for(code, self.style).scaled(self.size)
    }

    pub fn glyph_of(&self, char_font: CharFont) -> GlyphRef {
        self.font.glyph(char_font, self.style).scaled(self.size)
    }

    pub fn has_larger_variant(&self, char_font: CharFont) -> bool {
        self.font.has_larger_variant(char_font)
    }

    pub fn next_larger_variant(&self, char_font: CharFont) -> GlyphRef {
        self.font
            .next_larger_variant(char_font, self.style)
            .scaled(self.size)
    }

    pub fn extension(&self, char_font: CharFont) -> Option<Extension> {
        self.font
            .extension(char_font, self.style)
            .map(|ext| ext.scaled(self.size))
    }

    pub fn skew(&self, char_font: CharFont) -> f32 {
        self.font.skew(char_font, self.style) * self.size
    }

    pub fn kern(&self, left: CharFont, right: CharFont) -> f32 {
        self.font.kern(left, right, self.style) * self.size
    }

    pub fn ligature(&self, left: CharFont, right: CharFont) -> Option<GlyphRef> {
        self.font
            .ligature(left, right, self.style)
            .map(|g| g.scaled(self.size))
    }

    /// Inter-word space of the last used font
    pub fn space(&self) -> f32 {
        self.font.space(self.last_font, self.style) * self.size
    }

    pub fn constants(&self) -> MathConstants {
        self.font.constants(self.style).scaled(self.size)
    }

    pub fn axis_height(&self) -> f32 {
        self.constants().axis_height
    }

    pub fn rule_thickness(&self) -> f32 {
        self.constants().default_rule_thickness
    }

    pub fn mu(&self) -> f32 {
        self.constants().mu()
    }

    /// One TeX point; a 10pt design em scaled by `size`
    pub fn point(&self) -> f32 {
        0.1 * self.size
    }
}

impl PartialEq for Environment<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.font, other.font)
            && self.style == other.style
            && self.size == other.size
            && self.foreground == other.foreground
            && self.background == other.background
            && self.last_font == other.last_font
    }
}

impl fmt::Debug for Environment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("style", &self.style)
            .field("size", &self.size)
            .field("foreground", &self.foreground)
            .field("background", &self.background)
            .field("last_font", &self.last_font)
            .finish_non_exhaustive()
    }
}
