//! Large operators and their limits (rule 13 and 13a)

use super::scripts::layout_scripts;
use super::{layout, PREC};
use crate::atom::{Atom, AtomClass, BigOperatorAtom, SymbolAtom};
use crate::boxes::{HorizontalBox, LayoutBox, VerticalBox};
use crate::env::Environment;

/// Operator glyph centered on the axis, in its display size when the style
/// is a display style; also returns the glyph's italic correction
pub(crate) fn operator_glyph(symbol: &SymbolAtom, env: Environment<'_>) -> (LayoutBox, f32) {
    let mut glyph = env.glyph(symbol.code);
    if env.style().is_display() && env.has_larger_variant(glyph.char_font) {
        glyph = env.next_larger_variant(glyph.char_font);
    }
    let b = LayoutBox::glyph(glyph, &env).centered_on_axis(env.axis_height());
    (b, glyph.italic)
}

/// A large operator symbol on its own, followed by its italic correction
pub fn layout_operator_symbol(symbol: &SymbolAtom, env: Environment<'_>) -> LayoutBox {
    let (b, italic) = operator_glyph(symbol, env);
    let mut hbox = HorizontalBox::with(b);
    if italic > PREC {
        hbox.add(LayoutBox::kern(italic));
    }
    hbox.finish()
}

/// Move `b` right by `dx` without changing its width
fn offset(b: LayoutBox, dx: f32) -> LayoutBox {
    if dx.abs() <= PREC {
        return b;
    }
    let mut hbox = HorizontalBox::with(LayoutBox::kern(dx));
    hbox.add(b);
    hbox.add(LayoutBox::kern(-dx));
    hbox.finish()
}

fn widen(b: LayoutBox, width: f32) -> LayoutBox {
    if width - b.width() > PREC {
        b.centered(width)
    } else {
        b
    }
}

pub fn layout_big_operator(op: &BigOperatorAtom, env: Environment<'_>) -> LayoutBox {
    let as_scripts = match op.limits {
        Some(limits) => !limits,
        None => !env.style().is_display(),
    };
    if as_scripts {
        return layout_scripts(&op.base, op.under.as_deref(), op.over.as_deref(), env);
    }

    let c = env.constants();
    let (base, delta) = match &*op.base {
        Atom::Symbol(symbol) if symbol.class == AtomClass::LargeOperator => {
            let (b, italic) = operator_glyph(symbol, env);
            (HorizontalBox::with(b).finish(), italic)
        }
        other => (HorizontalBox::with(layout(other, env)).finish(), 0.0),
    };
    let over = op.over.as_deref().map(|a| layout(a, env.sup_style()));
    let under = op.under.as_deref().map(|a| layout(a, env.sub_style()));

    let width = [over.as_ref(), Some(&base), under.as_ref()]
        .into_iter()
        .flatten()
        .map(LayoutBox::width)
        .fold(0.0f32, f32::max);

    let base = widen(base, width);
    let mut height = base.height();
    let mut vbox = VerticalBox::new();

    if let Some(over) = over {
        let over = widen(over, width);
        let kern = c.big_op_spacing1.max(c.big_op_spacing3 - over.depth());
        height += c.big_op_spacing5 + over.total() + kern;
        vbox.add_kern(c.big_op_spacing5);
        vbox.add(offset(over, delta / 2.0));
        vbox.add_kern(kern);
    }

    vbox.add(base);

    if let Some(under) = under {
        let under = widen(under, width);
        let kern = c.big_op_spacing2.max(c.big_op_spacing4 - under.height());
        vbox.add_kern(kern);
        vbox.add(offset(under, -delta / 2.0));
        vbox.add_kern(c.big_op_spacing5);
    }

    let total = vbox.total();
    vbox.finish(height, total - height)
}
