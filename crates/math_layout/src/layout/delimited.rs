//! Fenced groups, over/under braces and over/under lines

use super::{layout, PREC};
use crate::atom::{Atom, AtomClass, FencedAtom, OverUnderDelimiterAtom, SymbolAtom};
use crate::boxes::{HorizontalBox, LayoutBox, VerticalBox};
use crate::delimiter;
use crate::env::Environment;
use crate::glue::glue_box;
use crate::units::{Dimension, Unit};

/// `\delimiterfactor`
const DELIMITER_FACTOR: f32 = 901.0;
/// `\delimitershortfall`
const DELIMITER_SHORTFALL: Dimension = Dimension::new(5.0, Unit::Point);
/// `\nulldelimiterspace`
const NULL_DELIMITER_SPACE: Dimension = Dimension::new(1.2, Unit::Point);
/// Space between a brace and what it spans
const BRACE_KERN: Dimension = Dimension::new(3.0, Unit::Point);

/// Minimum delimiter size for content of the given height and depth
pub fn min_delimiter_height(height: f32, depth: f32, env: &Environment<'_>) -> f32 {
    let axis = env.axis_height();
    let delta = (height - axis).max(depth + axis);
    (delta / 500.0 * DELIMITER_FACTOR).max(2.0 * delta - DELIMITER_SHORTFALL.to_length(env))
}

fn fence(symbol: Option<&SymbolAtom>, min_height: f32, env: &Environment<'_>) -> LayoutBox {
    match symbol {
        Some(symbol) => {
            delimiter::build(symbol.code, min_height, env).centered_on_axis(env.axis_height())
        }
        None => LayoutBox::kern(NULL_DELIMITER_SPACE.to_length(env)),
    }
}

pub fn layout_fenced(fenced: &FencedAtom, env: Environment<'_>) -> LayoutBox {
    let content = layout(&fenced.content, env);
    let min_height = min_delimiter_height(content.height(), content.depth(), &env);
    let spaced = !fenced.content.is_kern();

    let mut hbox = HorizontalBox::with(fence(fenced.left.as_ref(), min_height, &env));
    if spaced {
        let glue = glue_box(AtomClass::Opening, fenced.content.left_class(), &env);
        if glue.width().abs() > PREC {
            hbox.add(glue);
        }
    }
    hbox.add(content);
    if spaced {
        let glue = glue_box(fenced.content.right_class(), AtomClass::Closing, &env);
        if glue.width().abs() > PREC {
            hbox.add(glue);
        }
    }
    hbox.add(fence(fenced.right.as_ref(), min_height, &env));
    hbox.finish()
}

fn widen(b: LayoutBox, width: f32) -> LayoutBox {
    if width - b.width() > PREC {
        b.centered(width)
    } else {
        b
    }
}

/// Brace spanning the base, with an optional script beyond the brace
pub fn layout_over_under(atom: &OverUnderDelimiterAtom, env: Environment<'_>) -> LayoutBox {
    let base = layout(&atom.base, env);
    let brace = delimiter::build_horizontal(atom.delimiter.code, base.width(), &env);
    let script_env = if atom.over {
        env.sup_style()
    } else {
        env.sub_style()
    };
    let script = atom.script.as_deref().map(|s| layout(s, script_env));

    let width = [Some(&base), Some(&brace), script.as_ref()]
        .into_iter()
        .flatten()
        .map(LayoutBox::width)
        .fold(0.0f32, f32::max);
    let base = widen(base, width);
    let brace = widen(brace, width);
    let script = script.map(|s| widen(s, width));
    let kern = BRACE_KERN.to_length(&env);

    let mut vbox = VerticalBox::new();
    if atom.over {
        if let Some(script) = script {
            vbox.add(script);
            vbox.add_kern(kern);
        }
        vbox.add(brace);
        vbox.add_kern(kern);
        let depth = base.depth();
        vbox.add(base);
        let total = vbox.total();
        vbox.finish(total - depth, depth)
    } else {
        let height = base.height();
        vbox.add(base);
        vbox.add_kern(kern);
        vbox.add(brace);
        if let Some(script) = script {
            vbox.add_kern(kern);
            vbox.add(script);
        }
        let total = vbox.total();
        vbox.finish(height, total - height)
    }
}

/// Rule above the cramped base (rule 9)
pub fn layout_overlined(base: &Atom, env: Environment<'_>) -> LayoutBox {
    let drt = env.rule_thickness();
    let b = layout(base, env.cramped());
    let (width, height, depth) = (b.width(), b.height(), b.depth());

    let mut vbox = VerticalBox::new();
    vbox.add_kern(drt);
    vbox.add(LayoutBox::rule(width, drt, &env));
    vbox.add_kern(3.0 * drt);
    vbox.add(b);
    vbox.finish(height + 5.0 * drt, depth)
}

/// Rule below the base (rule 10)
pub fn layout_underlined(base: &Atom, env: Environment<'_>) -> LayoutBox {
    let drt = env.rule_thickness();
    let b = layout(base, env);
    let (width, height, depth) = (b.width(), b.height(), b.depth());

    let mut vbox = VerticalBox::new();
    vbox.add(b);
    vbox.add_kern(3.0 * drt);
    vbox.add(LayoutBox::rule(width, drt, &env));
    vbox.add_kern(drt);
    vbox.finish(height, depth + 5.0 * drt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;
    use crate::symbols::SymbolRegistry;
    use crate::table_font::TableFont;

    fn fenced(left: Option<&str>, content: Atom, right: Option<&str>) -> FencedAtom {
        FencedAtom::new(left, content, right, &SymbolRegistry::with_defaults()).unwrap()
    }

    #[test]
    fn test_min_delimiter_height() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        // delta = max(1.25 - 0.25, 0.25 + 0.25) = 1.0
        let h = min_delimiter_height(1.25, 0.25, &env);
        assert!((h - (901.0f32 / 500.0).max(2.0 - 0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_parens_grow_with_content() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Display);
        let small = layout_fenced(&fenced(Some("lparen"), Atom::char('x'), Some("rparen")), env);
        let big = layout_fenced(
            &fenced(
                Some("lparen"),
                Atom::fraction(Atom::char('a'), Atom::char('b')),
                Some("rparen"),
            ),
            env,
        );
        let left = |b: &LayoutBox| b.children()[0].total();
        assert!(left(&big) > left(&small));

        let paren = &big.children()[0];
        let mid = (paren.height() - paren.depth()) / 2.0 - paren.shift();
        assert!((mid - env.axis_height()).abs() < 1e-5);
    }

    #[test]
    fn test_missing_side_is_null_delimiter() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let b = layout_fenced(&fenced(None, Atom::char('x'), Some("rbrace")), env);
        let first = &b.children()[0];
        assert!(first.is_strut());
        assert!((first.width() - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_inner_glue_inside_fence() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let content = Atom::typed(Atom::char('x'), AtomClass::Punctuation, AtomClass::Punctuation);
        let b = layout_fenced(&fenced(Some("lparen"), content, Some("rparen")), env);
        // Open-Punct: none; Punct-Close: thin
        assert_eq!(b.children().len(), 4);
        assert!((b.children()[2].width() - 3.0 * env.mu()).abs() < 1e-6);
    }

    #[test]
    fn test_huge_content_keeps_fence_bounded() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let tall = Atom::strut(
            Dimension::new(1.0, Unit::Em),
            Dimension::new(1e9, Unit::Em),
            Dimension::zero(),
        );
        let b = layout_fenced(&fenced(Some("lparen"), tall.clone(), Some("rparen")), env);
        assert!(b.children()[0].children().len() < 20_000);
        assert!(b.width().is_finite());

        let root = layout(&Atom::sqrt(tall), env);
        assert!(root.children()[0].children().len() < 20_000);
    }

    #[test]
    fn test_overbrace_stack() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let reg = SymbolRegistry::with_defaults();
        let atom = OverUnderDelimiterAtom::new(
            Atom::chars("abcd"),
            Some(Atom::char('n')),
            "overbrace",
            true,
            &reg,
        )
        .unwrap();
        let b = layout_over_under(&atom, env);
        let base = layout(&Atom::chars("abcd"), env);
        assert_eq!(b.depth(), base.depth());
        assert!(b.height() > base.height());
        let brace = &b.children()[2];
        assert!(brace.width() >= base.width() - 1e-6);
    }

    #[test]
    fn test_underbrace_keeps_base_height() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let reg = SymbolRegistry::with_defaults();
        let atom = OverUnderDelimiterAtom::new(Atom::chars("xy"), None, "underbrace", false, &reg).unwrap();
        let b = layout_over_under(&atom, env);
        let base = layout(&Atom::chars("xy"), env);
        assert_eq!(b.height(), base.height());
        assert!(b.depth() > base.depth());
    }

    #[test]
    fn test_over_and_underline() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let drt = env.rule_thickness();
        let x = env.glyph('x');

        let over = layout_overlined(&Atom::char('x'), env);
        assert!((over.height() - (x.height + 5.0 * drt)).abs() < 1e-6);
        assert_eq!(over.depth(), x.depth);

        let under = layout_underlined(&Atom::char('x'), env);
        assert_eq!(under.height(), x.height);
        assert!((under.depth() - (x.depth + 5.0 * drt)).abs() < 1e-6);
        assert_eq!(under.width(), x.width);
    }
}
