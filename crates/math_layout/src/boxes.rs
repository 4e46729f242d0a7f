//! Box model - the geometric output of layout
//!
//! A [`LayoutBox`] has a width, a height above its baseline, a depth below
//! it and a shift that moves its baseline down relative to the parent's
//! baseline. Composite boxes are built through [`HorizontalBox`] and
//! [`VerticalBox`] and only become a `LayoutBox` once finished.

use crate::env::{Color, Environment};
use crate::error::MathResult;
use crate::metrics::{FontId, GlyphRef};
use serde::{Deserialize, Serialize};

/// Horizontal alignment used when widening a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// What a box paints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoxContent {
    /// A single glyph
    Glyph(GlyphRef),
    /// Invisible space
    Strut,
    /// Filled horizontal rule; its height is the thickness
    Rule { thickness: f32 },
    /// Children placed left to right on a common baseline
    Horizontal(Vec<LayoutBox>),
    /// Children stacked top to bottom
    Vertical(Vec<LayoutBox>),
}

/// A laid-out box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutBox {
    width: f32,
    height: f32,
    depth: f32,
    shift: f32,
    content: BoxContent,
    foreground: Option<Color>,
    background: Option<Color>,
}

impl LayoutBox {
    fn leaf(width: f32, height: f32, depth: f32, content: BoxContent) -> Self {
        Self {
            width,
            height,
            depth,
            shift: 0.0,
            content,
            foreground: None,
            background: None,
        }
    }

    /// Glyph box painted in the environment's foreground color
    pub fn glyph(glyph: GlyphRef, env: &Environment<'_>) -> Self {
        Self {
            foreground: env.foreground(),
            ..Self::leaf(glyph.width, glyph.height, glyph.depth, BoxContent::Glyph(glyph))
        }
    }

    pub fn strut(width: f32, height: f32, depth: f32) -> Self {
        Self::leaf(width, height, depth, BoxContent::Strut)
    }

    /// Horizontal space
    pub fn kern(width: f32) -> Self {
        Self::strut(width, 0.0, 0.0)
    }

    /// Vertical space, for use inside a [`VerticalBox`]
    pub fn vertical_kern(height: f32) -> Self {
        Self::strut(0.0, height, 0.0)
    }

    pub fn empty() -> Self {
        Self::strut(0.0, 0.0, 0.0)
    }

    /// Horizontal rule sitting on the baseline
    pub fn rule(width: f32, thickness: f32, env: &Environment<'_>) -> Self {
        Self {
            foreground: env.foreground(),
            ..Self::leaf(width, thickness, 0.0, BoxContent::Rule { thickness })
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn shift(&self) -> f32 {
        self.shift
    }

    pub fn total(&self) -> f32 {
        self.height + self.depth
    }

    pub fn content(&self) -> &BoxContent {
        &self.content
    }

    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Children of a composite; empty for leaves
    pub fn children(&self) -> &[LayoutBox] {
        match &self.content {
            BoxContent::Horizontal(children) | BoxContent::Vertical(children) => children,
            _ => &[],
        }
    }

    pub fn glyph_ref(&self) -> Option<&GlyphRef> {
        match &self.content {
            BoxContent::Glyph(glyph) => Some(glyph),
            _ => None,
        }
    }

    pub fn is_strut(&self) -> bool {
        matches!(self.content, BoxContent::Strut)
    }

    pub fn set_shift(&mut self, shift: f32) {
        self.shift = shift;
    }

    /// Override the height, e.g. to move a finished stack's baseline
    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    pub fn set_depth(&mut self, depth: f32) {
        self.depth = depth;
    }

    pub fn with_shift(mut self, shift: f32) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Font of the last glyph in this box, if any
    pub fn last_used_font(&self) -> Option<FontId> {
        match &self.content {
            BoxContent::Glyph(glyph) => Some(glyph.char_font.font),
            BoxContent::Horizontal(children) | BoxContent::Vertical(children) => {
                children.iter().rev().find_map(LayoutBox::last_used_font)
            }
            BoxContent::Strut | BoxContent::Rule { .. } => None,
        }
    }

    /// Place this box in a horizontal box of exactly `width`
    ///
    /// The padding is negative when `width` is smaller than the box.
    pub fn aligned(self, width: f32, alignment: Alignment) -> LayoutBox {
        let rest = width - self.width;
        let mut hbox = HorizontalBox::new();
        match alignment {
            Alignment::Center => {
                hbox.add(LayoutBox::kern(rest / 2.0));
                hbox.add(self);
                hbox.add(LayoutBox::kern(rest / 2.0));
            }
            Alignment::Left => {
                hbox.add(self);
                hbox.add(LayoutBox::kern(rest));
            }
            Alignment::Right => {
                hbox.add(LayoutBox::kern(rest));
                hbox.add(self);
            }
        }
        let mut aligned = hbox.finish();
        aligned.width = width;
        aligned
    }

    pub fn centered(self, width: f32) -> LayoutBox {
        self.aligned(width, Alignment::Center)
    }

    /// Shift so that the box is vertically centered on the math axis
    pub fn centered_on_axis(self, axis: f32) -> LayoutBox {
        let shift = (self.height - self.depth) / 2.0 - axis;
        self.with_shift(shift)
    }

    /// Pretty-printed JSON dump for debugging
    pub fn to_json(&self) -> MathResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for a box whose children share one baseline
#[derive(Debug, Clone, Default)]
pub struct HorizontalBox {
    children: Vec<LayoutBox>,
    width: f32,
    height: f32,
    depth: f32,
}

impl HorizontalBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(first: LayoutBox) -> Self {
        let mut hbox = Self::new();
        hbox.add(first);
        hbox
    }

    /// Append a child, updating the running extents
    pub fn add(&mut self, child: LayoutBox) {
        let height = child.height - child.shift;
        let depth = child.depth + child.shift;
        if self.children.is_empty() {
            self.height = height;
            self.depth = depth;
        } else {
            self.height = self.height.max(height);
            self.depth = self.depth.max(depth);
        }
        self.width += child.width;
        self.children.push(child);
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn last_used_font(&self) -> Option<FontId> {
        self.children.iter().rev().find_map(LayoutBox::last_used_font)
    }

    pub fn finish(self) -> LayoutBox {
        LayoutBox::leaf(
            self.width,
            self.height,
            self.depth,
            BoxContent::Horizontal(self.children),
        )
    }
}

/// Builder for a stack of boxes
///
/// A stack has no geometric baseline of its own; the constructing algorithm
/// chooses one by passing height and depth to [`VerticalBox::finish`].
#[derive(Debug, Clone, Default)]
pub struct VerticalBox {
    children: Vec<LayoutBox>,
    width: f32,
    total: f32,
}

impl VerticalBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, child: LayoutBox) {
        self.width = if self.children.is_empty() {
            child.width
        } else {
            self.width.max(child.width)
        };
        self.total += child.height + child.depth;
        self.children.push(child);
    }

    pub fn add_kern(&mut self, height: f32) {
        self.add(LayoutBox::vertical_kern(height));
    }

    /// Sum of heights and depths stacked so far
    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn finish(self, height: f32, depth: f32) -> LayoutBox {
        LayoutBox::leaf(self.width, height, depth, BoxContent::Vertical(self.children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::CharFont;
    use crate::style::Style;
    use crate::table_font::TableFont;

    fn glyph_box(env: &Environment<'_>, c: char) -> LayoutBox {
        LayoutBox::glyph(env.glyph(c), env)
    }

    #[test]
    fn test_horizontal_extents() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);

        let mut hbox = HorizontalBox::new();
        hbox.add(glyph_box(&env, 'x'));
        hbox.add(glyph_box(&env, 'y').with_shift(-0.2));
        hbox.add(LayoutBox::kern(0.1));
        let b = hbox.finish();

        let x = env.glyph('x');
        let y = env.glyph('y');
        assert!((b.width() - (x.width + y.width + 0.1)).abs() < 1e-6);
        assert!((b.height() - (y.height + 0.2)).abs() < 1e-6);
        assert!((b.depth() - x.depth.max(y.depth - 0.2).max(0.0)).abs() < 1e-6);
        assert_eq!(b.children().len(), 3);
    }

    #[test]
    fn test_first_child_sets_extents() {
        let mut hbox = HorizontalBox::new();
        hbox.add(LayoutBox::strut(1.0, -0.5, -0.25));
        assert_eq!(hbox.height(), -0.5);
        assert_eq!(hbox.depth(), -0.25);

        let empty = HorizontalBox::new().finish();
        assert_eq!(empty.width(), 0.0);
        assert_eq!(empty.height(), 0.0);
        assert_eq!(empty.depth(), 0.0);
    }

    #[test]
    fn test_centering_with_negative_padding() {
        let wide = LayoutBox::strut(2.0, 1.0, 0.0);
        let narrow = wide.clone().centered(1.0);
        assert!((narrow.width() - 1.0).abs() < 1e-6);
        assert!((narrow.children()[0].width() + 0.5).abs() < 1e-6);

        let again = narrow.centered(1.0);
        assert!((again.width() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_alignment_sides() {
        let b = LayoutBox::strut(1.0, 1.0, 0.0);
        let left = b.clone().aligned(3.0, Alignment::Left);
        assert!(left.children()[0].width() == 1.0);
        assert!(left.children()[1].width() == 2.0);

        let right = b.aligned(3.0, Alignment::Right);
        assert!(right.children()[0].width() == 2.0);
        assert_eq!(right.width(), 3.0);
    }

    #[test]
    fn test_last_used_font() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);

        let mut hbox = HorizontalBox::new();
        assert_eq!(hbox.last_used_font(), None);
        hbox.add(glyph_box(&env, 'x'));
        hbox.add(glyph_box(&env, '1'));
        hbox.add(LayoutBox::kern(0.3));
        let expected = env.glyph('1').char_font.font;
        assert_eq!(hbox.last_used_font(), Some(expected));
        assert_eq!(hbox.finish().last_used_font(), Some(expected));
        assert_eq!(LayoutBox::kern(1.0).last_used_font(), None);
    }

    #[test]
    fn test_vertical_box_uses_explicit_baseline() {
        let mut vbox = VerticalBox::new();
        vbox.add(LayoutBox::strut(1.0, 0.5, 0.1));
        vbox.add_kern(0.2);
        vbox.add(LayoutBox::strut(2.0, 0.3, 0.4));
        assert!((vbox.total() - 1.5).abs() < 1e-6);
        assert_eq!(vbox.width(), 2.0);

        let b = vbox.finish(1.1, 0.4);
        assert_eq!(b.height(), 1.1);
        assert_eq!(b.depth(), 0.4);
        assert_eq!(b.width(), 2.0);
        assert_eq!(b.children().len(), 3);

        let mut moved = b;
        moved.set_height(0.5);
        moved.set_depth(1.0);
        assert_eq!(moved.total(), 1.5);
        assert_eq!(moved.width(), 2.0);
    }

    #[test]
    fn test_centered_on_axis() {
        let b = LayoutBox::strut(1.0, 1.0, 0.5).centered_on_axis(0.25);
        // center of the box must land on the axis
        let top = b.height() - b.shift();
        let bottom = -(b.depth() + b.shift());
        assert!(((top + bottom) / 2.0 - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_glyph_box_paint() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text).with_colors(Some(Color::RED), None);
        let b = glyph_box(&env, 'x');
        assert_eq!(b.foreground(), Some(Color::RED));
        assert_eq!(b.glyph_ref().map(|g| g.char_font), Some(CharFont::new(crate::table_font::MATH_ITALIC, 'x')));

        let json = b.to_json().unwrap();
        assert!(json.contains("Glyph"));
    }
}
