//! Math Layout - turn an atom tree into a box tree
//!
//! [`layout`] dispatches on the atom kind; each non-trivial kind has its own
//! submodule. Every function takes the [`Environment`] by value and never
//! fails on a well-formed tree.

pub mod accent;
pub mod delimited;
pub mod fraction;
pub mod operator;
pub mod radical;
pub mod row;
pub mod scripts;

use crate::atom::{Atom, AtomClass, PhantomAtom, SpaceAtom};
use crate::boxes::{HorizontalBox, LayoutBox};
use crate::env::{Color, Environment};
use crate::metrics::FontMetrics;
use crate::style::Style;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lengths below this are treated as zero
pub(crate) const PREC: f32 = 1e-7;

// =============================================================================
// Layout Engine
// =============================================================================

/// Root settings for laying out a formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub style: Style,
    /// Multiplier applied to every font metric
    pub size: f32,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            style: Style::Text,
            size: 1.0,
            foreground: None,
            background: None,
        }
    }
}

impl LayoutConfig {
    pub fn display() -> Self {
        Self {
            style: Style::Display,
            ..Self::default()
        }
    }
}

/// Engine for computing math layout against one font provider
#[derive(Clone, Copy)]
pub struct LayoutEngine<'f> {
    font: &'f dyn FontMetrics,
    config: LayoutConfig,
}

impl<'f> LayoutEngine<'f> {
    pub fn new(font: &'f dyn FontMetrics) -> Self {
        Self::with_config(font, LayoutConfig::default())
    }

    pub fn with_config(font: &'f dyn FontMetrics, config: LayoutConfig) -> Self {
        Self { font, config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Root environment built from the config
    pub fn environment(&self) -> Environment<'f> {
        Environment::new(self.font, self.config.style)
            .with_size(self.config.size)
            .with_colors(self.config.foreground, self.config.background)
    }

    pub fn layout(&self, atom: &Atom) -> LayoutBox {
        let env = self.environment();
        let result = layout(atom, env);
        debug!(
            target: "math_layout::engine",
            style = ?env.style(),
            size = env.size(),
            width = result.width(),
            height = result.height(),
            depth = result.depth(),
            "formula laid out"
        );
        result
    }
}

impl std::fmt::Debug for LayoutEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Lay out `atom` under `env`
pub fn layout(atom: &Atom, env: Environment<'_>) -> LayoutBox {
    match atom {
        Atom::Char(c) => LayoutBox::glyph(env.glyph(c.c), &env),
        Atom::Symbol(symbol) if symbol.class == AtomClass::LargeOperator => {
            operator::layout_operator_symbol(symbol, env)
        }
        Atom::Symbol(symbol) => LayoutBox::glyph(env.glyph(symbol.code), &env),
        Atom::Row(row) => row::layout_row(&row.atoms, env),
        Atom::Scripts(s) => {
            scripts::layout_scripts(&s.base, s.sub.as_deref(), s.sup.as_deref(), env)
        }
        Atom::Fraction(frac) => fraction::layout_fraction(frac, env),
        Atom::Radical(rad) => radical::layout_radical(rad, env),
        Atom::BigOperator(op) => operator::layout_big_operator(op, env),
        Atom::Accented(acc) => accent::layout_accented(acc, env),
        Atom::Fenced(fenced) => delimited::layout_fenced(fenced, env),
        Atom::OverUnderDelimiter(d) => delimited::layout_over_under(d, env),
        Atom::Overlined(base) => delimited::layout_overlined(base, env),
        Atom::Underlined(base) => delimited::layout_underlined(base, env),
        Atom::Phantom(phantom) => layout_phantom(phantom, env),
        Atom::Color(color) => {
            let env = env.with_colors(color.foreground, color.background);
            row::layout_row(&color.row.atoms, env).with_background(color.background)
        }
        Atom::Space(space) => layout_space(space, env),
        Atom::Typed(typed) => layout(&typed.inner, env),
        Atom::VCentered(base) => {
            let b = layout(base, env).centered_on_axis(env.axis_height());
            HorizontalBox::with(b).finish()
        }
    }
}

fn layout_phantom(phantom: &PhantomAtom, env: Environment<'_>) -> LayoutBox {
    let content = layout(&phantom.content, env);
    let keep = |keep: bool, value: f32| if keep { value } else { 0.0 };
    LayoutBox::strut(
        keep(phantom.keep_width, content.width()),
        keep(phantom.keep_height, content.height()),
        keep(phantom.keep_depth, content.depth()),
    )
    .with_shift(content.shift())
}

fn layout_space(space: &SpaceAtom, env: Environment<'_>) -> LayoutBox {
    match space {
        SpaceAtom::Blank => LayoutBox::kern(env.space()),
        SpaceAtom::Glue { kind, negative } => {
            let width = kind.width(&env);
            LayoutBox::kern(if *negative { -width } else { width })
        }
        SpaceAtom::Strut {
            width,
            height,
            depth,
        } => LayoutBox::strut(
            width.to_length(&env),
            height.to_length(&env),
            depth.to_length(&env),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::glue::GlueKind;
    use crate::table_font::TableFont;
    use crate::units::{Dimension, Unit};

    #[test]
    fn test_engine_environment_follows_config() {
        let font = TableFont::computer_modern();
        let config = LayoutConfig {
            style: Style::Script,
            size: 2.0,
            foreground: Some(Color::BLUE),
            background: None,
        };
        let engine = LayoutEngine::with_config(&font, config);
        let env = engine.environment();
        assert_eq!(env.style(), Style::Script);
        assert_eq!(env.size(), 2.0);
        assert_eq!(env.foreground(), Some(Color::BLUE));

        let b = engine.layout(&Atom::char('x'));
        assert_eq!(b.foreground(), Some(Color::BLUE));
        assert!((b.width() - 0.572 * 0.7 * 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_char_is_glyph_leaf() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let b = layout(&Atom::char('x'), env);
        assert_eq!(b.glyph_ref().copied(), Some(env.glyph('x')));
        assert_eq!(b.shift(), 0.0);
    }

    #[test]
    fn test_phantom_keeps_selected_dimensions() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let y = env.glyph('y');

        let full = layout(&Atom::phantom(Atom::char('y')), env);
        assert!(full.is_strut());
        assert_eq!(full.width(), y.width);
        assert_eq!(full.depth(), y.depth);

        let vphantom = Atom::Phantom(PhantomAtom::with_dimensions(Atom::char('y'), false, true, true));
        let b = layout(&vphantom, env);
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.height(), y.height);
    }

    #[test]
    fn test_spaces() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);

        let thin = layout(&Atom::glue(GlueKind::Thin), env);
        assert!((thin.width() - 3.0 * env.mu()).abs() < 1e-6);

        let neg = layout(
            &Atom::Space(SpaceAtom::Glue {
                kind: GlueKind::Thick,
                negative: true,
            }),
            env,
        );
        assert!((neg.width() + 5.0 * env.mu()).abs() < 1e-6);

        let strut = layout(
            &Atom::strut(
                Dimension::new(1.0, Unit::Em),
                Dimension::new(5.0, Unit::Point),
                Dimension::zero(),
            ),
            env,
        );
        assert!((strut.width() - 1.0).abs() < 1e-6);
        assert!((strut.height() - 0.5).abs() < 1e-6);

        let blank = layout(&Atom::Space(SpaceAtom::Blank), env);
        assert!((blank.width() - 0.333334).abs() < 1e-6);
    }

    #[test]
    fn test_color_sets_paint() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let atom = Atom::color(vec![Atom::char('x')], Some(Color::RED), Some(Color::WHITE));
        let b = layout(&atom, env);
        assert_eq!(b.background(), Some(Color::WHITE));
        assert_eq!(b.children()[0].foreground(), Some(Color::RED));
    }

    #[test]
    fn test_vcentered_sits_on_axis() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let b = layout(&Atom::vcentered(Atom::char('x')), env);
        let mid = (b.height() - b.depth()) / 2.0;
        assert!((mid - env.axis_height()).abs() < 1e-6);
    }

    #[test]
    fn test_typed_lays_out_inner() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let typed = Atom::typed(Atom::char('x'), AtomClass::Relation, AtomClass::Relation);
        assert_eq!(layout(&typed, env), layout(&Atom::char('x'), env));
    }
}
