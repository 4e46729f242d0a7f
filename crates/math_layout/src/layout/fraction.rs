//! Generalized fractions (rules 15 to 15e)

use super::layout;
use crate::atom::{FractionAtom, RuleThickness};
use crate::boxes::{LayoutBox, VerticalBox};
use crate::env::Environment;

pub fn rule_thickness(thickness: RuleThickness, env: &Environment<'_>) -> f32 {
    let default = env.rule_thickness();
    match thickness {
        RuleThickness::Default => default,
        RuleThickness::None => 0.0,
        RuleThickness::Factor(factor) => factor * default,
        RuleThickness::Explicit(dimension) => dimension.to_length(env),
    }
}

/// Stack numerator over denominator, with a rule unless the thickness is zero
///
/// Both parts are padded to a common width. The result is a bare vertical
/// box whose baseline is chosen from the num/denom shift parameters.
pub fn layout_fraction(frac: &FractionAtom, env: Environment<'_>) -> LayoutBox {
    let c = env.constants();
    let thickness = rule_thickness(frac.thickness, &env);
    let display = env.style().is_display();

    let num = layout(&frac.numerator, env.numerator_style());
    let den = layout(&frac.denominator, env.denominator_style());
    let width = num.width().max(den.width());
    let num = num.aligned(width, frac.numerator_align);
    let den = den.aligned(width, frac.denominator_align);

    let (mut shift_up, mut shift_down) = if display {
        (c.num1, c.denom1)
    } else if thickness > 0.0 {
        (c.num2, c.denom2)
    } else {
        (c.num3, c.denom2)
    };

    let num_height = num.height();
    let den_depth = den.depth();
    let mut vbox = VerticalBox::new();

    if thickness > 0.0 {
        let clearance = if display { 3.0 * thickness } else { thickness };
        let axis = c.axis_height;
        let half = thickness / 2.0;
        let mut above = shift_up - num.depth() - (axis + half);
        let mut below = (axis - half) - (den.height() - shift_down);
        if above < clearance {
            shift_up += clearance - above;
            above = clearance;
        }
        if below < clearance {
            shift_down += clearance - below;
            below = clearance;
        }
        vbox.add(num);
        vbox.add_kern(above);
        vbox.add(LayoutBox::rule(width, thickness, &env));
        vbox.add_kern(below);
    } else {
        let clearance = if display {
            7.0 * c.default_rule_thickness
        } else {
            3.0 * c.default_rule_thickness
        };
        let mut gap = (shift_up - num.depth()) - (den.height() - shift_down);
        if gap < clearance {
            let adjust = (clearance - gap) / 2.0;
            shift_up += adjust;
            shift_down += adjust;
            gap = clearance;
        }
        vbox.add(num);
        vbox.add_kern(gap);
    }
    vbox.add(den);

    vbox.finish(shift_up + num_height, shift_down + den_depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::boxes::Alignment;
    use crate::style::Style;
    use crate::table_font::TableFont;
    use crate::units::{Dimension, Unit};

    #[test]
    fn test_text_fraction_uses_num2_denom2() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let b = layout_fraction(&FractionAtom::new(Atom::char('a'), Atom::char('b')), env);
        let c = env.constants();
        let a = env.numerator_style().glyph('a');
        // 'a' is short enough that no clearance correction is needed
        assert!((b.height() - (c.num2 + a.height)).abs() < 1e-6);
        let bb = env.denominator_style().glyph('b');
        assert!(b.depth() >= c.denom2 + bb.depth - 1e-6);
    }

    #[test]
    fn test_parts_share_width() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        for align in [Alignment::Left, Alignment::Center, Alignment::Right] {
            let frac = FractionAtom::new(Atom::chars("abc"), Atom::char('x')).with_alignment(align, align);
            let b = layout_fraction(&frac, env);
            let parts = b.children();
            let num = parts.first().unwrap();
            let den = parts.last().unwrap();
            assert_eq!(num.width(), den.width());
            assert_eq!(b.width(), num.width());
        }
    }

    #[test]
    fn test_rule_sits_on_axis() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let b = layout_fraction(&FractionAtom::new(Atom::char('a'), Atom::char('b')), env);
        let parts = b.children();
        assert_eq!(parts.len(), 5);
        // top of the box down to the rule's middle
        let to_rule = parts[0].total() + parts[1].total() + parts[2].total() / 2.0;
        let rule_middle = b.height() - to_rule;
        assert!((rule_middle - env.axis_height()).abs() < 1e-5);
    }

    #[test]
    fn test_ruleless_fraction() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Display);
        let frac = FractionAtom::new(Atom::char('n'), Atom::char('k')).with_thickness(RuleThickness::None);
        let b = layout_fraction(&frac, env);
        assert_eq!(b.children().len(), 3);
        assert!(b.children()[1].total() >= 7.0 * env.rule_thickness() - 1e-6);
        let stacked: f32 = b.children().iter().map(LayoutBox::total).sum();
        assert!((b.total() - stacked).abs() < 1e-5);
    }

    #[test]
    fn test_thickness_kinds() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let drt = env.rule_thickness();
        assert_eq!(rule_thickness(RuleThickness::Default, &env), drt);
        assert_eq!(rule_thickness(RuleThickness::None, &env), 0.0);
        assert!((rule_thickness(RuleThickness::Factor(2.0), &env) - 2.0 * drt).abs() < 1e-7);
        let explicit = RuleThickness::Explicit(Dimension::new(1.0, Unit::Point));
        assert!((rule_thickness(explicit, &env) - 0.1).abs() < 1e-7);
    }
}
