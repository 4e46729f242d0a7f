//! Sub- and superscript attachment (TeXbook Appendix G, rule 18)

use super::operator::operator_glyph;
use super::{layout, PREC};
use crate::atom::{Atom, AtomClass};
use crate::boxes::{HorizontalBox, LayoutBox, VerticalBox};
use crate::env::Environment;
use crate::glue::GlueKind;
use crate::style::Style;
use crate::units::{Dimension, Unit};

/// `\scriptspace`
const SCRIPT_SPACE: Dimension = Dimension::new(0.5, Unit::Point);

/// Attach `sub` and `sup` to `base`
///
/// Without scripts the base box is returned exactly as [`layout`] builds it.
pub fn layout_scripts(
    base: &Atom,
    sub: Option<&Atom>,
    sup: Option<&Atom>,
    env: Environment<'_>,
) -> LayoutBox {
    if sub.is_none() && sup.is_none() {
        return layout(base, env);
    }

    let c = env.constants();
    let sup_env = env.sup_style();
    let sub_env = env.sub_style();
    let sup_drop = sup_env.constants().sup_drop;
    let sub_drop = sub_env.constants().sub_drop;
    let script_space = SCRIPT_SPACE.to_length(&env);

    // horizontal offset of the superscript relative to the subscript
    let mut delta = 0.0;
    let mut trailing = None;
    let mut shift_up;
    let mut shift_down;
    let mut hbox;

    match base {
        Atom::Accented(accented) => {
            // drops are measured from the accentee so scripts sit beside the accent
            let inner = layout(&accented.base, env.cramped());
            shift_up = inner.height() - sup_drop;
            shift_down = inner.depth() + sub_drop;
            hbox = HorizontalBox::with(layout(base, env));
        }
        Atom::Symbol(symbol) if symbol.class == AtomClass::LargeOperator => {
            let (op, italic) = operator_glyph(symbol, env);
            hbox = HorizontalBox::with(op);
            delta = italic;
            if sub.is_none() && delta > PREC {
                hbox.add(LayoutBox::kern(delta));
            }
            shift_up = hbox.height() - sup_drop;
            shift_down = hbox.depth() + sub_drop;
            trailing = Some(LayoutBox::kern(GlueKind::Medium.width(&env)));
        }
        Atom::Char(_) | Atom::Symbol(_) => {
            let b = layout(base, env);
            delta = b.glyph_ref().map_or(0.0, |g| g.italic);
            hbox = HorizontalBox::with(b);
            if sub.is_none() && delta > PREC {
                hbox.add(LayoutBox::kern(delta));
                delta = 0.0;
            }
            shift_up = 0.0;
            shift_down = 0.0;
        }
        _ => {
            let b = layout(base, env);
            shift_up = b.height() - sup_drop;
            shift_down = b.depth() + sub_drop;
            hbox = HorizontalBox::with(b);
        }
    }

    let x_height = c.x_height.abs();

    match (sub, sup) {
        (Some(sub), None) => {
            let mut script = HorizontalBox::with(layout(sub, sub_env));
            script.add(LayoutBox::kern(script_space));
            let script = script.finish();
            let shift = shift_down
                .max(c.sub1)
                .max(script.height() - 4.0 * x_height / 5.0);
            hbox.add(script.with_shift(shift));
        }
        (_, Some(sup)) => {
            let mut sup_box = HorizontalBox::with(layout(sup, sup_env));
            sup_box.add(LayoutBox::kern(script_space));
            let sup_box = sup_box.finish();

            let p = if env.style() == Style::Display {
                c.sup1
            } else if env.style().is_cramped() {
                c.sup3
            } else {
                c.sup2
            };
            shift_up = shift_up.max(p).max(sup_box.depth() + x_height / 4.0);

            match sub {
                None => hbox.add(sup_box.with_shift(-shift_up)),
                Some(sub) => {
                    let mut sub_box = HorizontalBox::with(layout(sub, sub_env));
                    sub_box.add(LayoutBox::kern(script_space));
                    let sub_box = sub_box.finish();

                    shift_down = shift_down.max(c.sub2);
                    let clearance = 4.0 * c.default_rule_thickness;
                    let gap = (shift_up - sup_box.depth()) + (shift_down - sub_box.height());
                    if gap < clearance {
                        let adjust = (clearance - gap) / 2.0;
                        shift_up += adjust;
                        shift_down += adjust;
                        let psi = 4.0 * x_height / 5.0 - (shift_up - sup_box.depth());
                        if psi > 0.0 {
                            shift_up += psi;
                            shift_down -= psi;
                        }
                    }
                    let gap = (shift_up - sup_box.depth()) + (shift_down - sub_box.height());

                    let height = shift_up + sup_box.height();
                    let depth = shift_down + sub_box.depth();
                    let sup_line = if delta.abs() > PREC {
                        let mut line = HorizontalBox::with(LayoutBox::kern(delta));
                        line.add(sup_box);
                        line.finish()
                    } else {
                        sup_box
                    };

                    let mut vbox = VerticalBox::new();
                    vbox.add(sup_line);
                    vbox.add_kern(gap);
                    vbox.add(sub_box);
                    hbox.add(vbox.finish(height, depth));
                }
            }
        }
        (None, None) => {}
    }

    if let Some(space) = trailing {
        hbox.add(space);
    }
    hbox.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::AccentedAtom;
    use crate::symbols::SymbolRegistry;
    use crate::table_font::TableFont;

    #[test]
    fn test_no_scripts_is_base() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let base = Atom::fraction(Atom::char('a'), Atom::char('b'));
        assert_eq!(layout_scripts(&base, None, None, env), layout(&base, env));
    }

    #[test]
    fn test_superscript_on_char() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let b = layout_scripts(&Atom::char('x'), None, Some(&Atom::char('2')), env);
        let c = env.constants();

        let sup = &b.children()[1];
        assert!((sup.shift() + c.sup2).abs() < 1e-6);
        let two = env.sup_style().glyph('2');
        assert!((b.height() - (c.sup2 + two.height)).abs() < 1e-6);
        assert!((b.width() - (env.glyph('x').width + two.width + 0.05)).abs() < 1e-6);
    }

    #[test]
    fn test_cramped_superscript_is_lower() {
        let font = TableFont::computer_modern();
        let base = Atom::char('x');
        let sup = Atom::char('2');
        let normal = layout_scripts(&base, None, Some(&sup), Environment::new(&font, Style::Text));
        let cramped = layout_scripts(&base, None, Some(&sup), Environment::new(&font, Style::TextCramped));
        assert!(cramped.height() < normal.height());
    }

    #[test]
    fn test_subscript_on_char() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let b = layout_scripts(&Atom::char('x'), Some(&Atom::char('i')), None, env);
        let c = env.constants();
        let i = env.sub_style().glyph('i');
        let expected = c.sub1.max(i.height - 4.0 * c.x_height / 5.0);
        assert!((b.children()[1].shift() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_both_scripts_keep_clearance() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Display);
        let b = layout_scripts(
            &Atom::char('f'),
            Some(&Atom::char('y')),
            Some(&Atom::char('f')),
            env,
        );
        let stack = &b.children()[1];
        let children = stack.children();
        assert_eq!(children.len(), 3);
        let gap = children[1].total();
        assert!(gap >= 4.0 * env.rule_thickness() - 1e-6);

        // stack extents agree with its explicit baseline
        let stacked: f32 = children.iter().map(LayoutBox::total).sum();
        assert!((stack.total() - stacked).abs() < 1e-5);
    }

    #[test]
    fn test_big_operator_base_gets_trailing_space() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let sum = Atom::symbol("sum", &SymbolRegistry::with_defaults()).unwrap();
        let b = layout_scripts(&sum, Some(&Atom::char('i')), None, env);
        let last = b.children().last().unwrap();
        assert!(last.is_strut());
        assert!((last.width() - 4.0 * env.mu()).abs() < 1e-6);
    }

    #[test]
    fn test_accented_base_measures_accentee() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let reg = SymbolRegistry::with_defaults();
        let hat = Atom::Accented(AccentedAtom::new(Atom::row(vec![Atom::char('x')]), "hat", &reg).unwrap());
        let plain = Atom::row(vec![Atom::char('x')]);
        let sup = Atom::char('2');

        let with_accent = layout_scripts(&hat, None, Some(&sup), env);
        let without = layout_scripts(&plain, None, Some(&sup), env);
        assert_eq!(with_accent.children()[1].shift(), without.children()[1].shift());
    }
}
