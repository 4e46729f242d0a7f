//! Radicals (rule 11) with an optional root index

use super::layout;
use crate::atom::RadicalAtom;
use crate::boxes::{HorizontalBox, LayoutBox, VerticalBox};
use crate::delimiter;
use crate::env::Environment;

const SURD: char = '√';

/// Index kern, in mu, pulling the radical sign under the index
const INDEX_KERN_MU: f32 = -10.0;

/// Fraction of the radical's total height at which the index bottom sits
const INDEX_RAISE: f32 = 0.55;

pub fn layout_radical(rad: &RadicalAtom, env: Environment<'_>) -> LayoutBox {
    let c = env.constants();
    let drt = c.default_rule_thickness;
    let phi = if env.style().is_display() {
        c.x_height
    } else {
        drt
    };
    let mut clearance = drt + phi.abs() / 4.0;

    let cramped = env.cramped();
    let mut body = HorizontalBox::with(layout(&rad.radicand, cramped));
    body.add(LayoutBox::kern(cramped.mu()));
    let body = body.finish();

    let wanted = body.total() + clearance + drt;
    let sign = delimiter::build(SURD, wanted, &env);
    let excess = sign.total() - wanted;
    if excess > 0.0 {
        clearance += excess / 2.0;
    }

    let top = body.height() + clearance + drt;
    let sign_shift = sign.height() - top;
    let sign = sign.with_shift(sign_shift);

    let body_width = body.width();
    let body_depth = body.depth();
    let mut over = VerticalBox::new();
    over.add(LayoutBox::rule(body_width, drt, &env));
    over.add_kern(clearance);
    over.add(body);
    let over = over.finish(top, body_depth);

    let mut radical = HorizontalBox::with(sign);
    radical.add(over);
    let radical = radical.finish();

    let Some(index) = rad.index.as_deref() else {
        return radical;
    };

    let index = layout(index, env.root_style());
    let raise = INDEX_RAISE * radical.total();
    let index_shift = radical.depth() - index.depth() - raise;
    let kern = INDEX_KERN_MU * env.mu();
    let overhang = index.width() + kern;

    let mut hbox = HorizontalBox::new();
    if overhang < 0.0 {
        hbox.add(LayoutBox::kern(-overhang));
    }
    hbox.add(index.with_shift(index_shift));
    hbox.add(LayoutBox::kern(kern));
    hbox.add(radical);
    hbox.finish()
}
