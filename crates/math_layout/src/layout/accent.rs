//! Accents (rule 12)

use super::{layout, PREC};
use crate::atom::{AccentedAtom, Atom};
use crate::boxes::{HorizontalBox, LayoutBox, VerticalBox};
use crate::env::Environment;

/// Character whose skew applies, looking through one-element rows
fn skew_char(atom: &Atom) -> Option<char> {
    match atom {
        Atom::Row(row) => match row.atoms.as_slice() {
            [only] => skew_char(only),
            _ => None,
        },
        other => other.char_code(),
    }
}

pub fn layout_accented(acc: &AccentedAtom, env: Environment<'_>) -> LayoutBox {
    let base = layout(&acc.base, env.cramped());
    let width = base.width();

    let skew = skew_char(acc.underbase()).map_or(0.0, |code| env.skew(env.glyph(code).char_font));

    // widest variant that still fits over the base
    let mut glyph = env.glyph(acc.accent.code);
    while env.has_larger_variant(glyph.char_font) {
        let larger = env.next_larger_variant(glyph.char_font);
        if larger.width > width {
            break;
        }
        glyph = larger;
    }

    let delta = base.height().min(env.constants().x_height);

    let accent = LayoutBox::glyph(glyph, &env);
    let accent = if glyph.italic.abs() > PREC {
        let mut hbox = HorizontalBox::with(LayoutBox::kern(-glyph.italic));
        hbox.add(accent);
        hbox.finish()
    } else {
        accent
    };

    let diff = (width - accent.width()) / 2.0;
    let mut line = HorizontalBox::with(LayoutBox::kern(skew + diff.max(0.0)));
    line.add(accent);
    let line = line.finish();

    let base = if diff < 0.0 {
        let accent_width = line.width();
        base.centered(accent_width)
    } else {
        base
    };

    let depth = base.depth();
    let mut vbox = VerticalBox::new();
    vbox.add(line);
    vbox.add_kern(-delta);
    vbox.add(base);
    let total = vbox.total();
    vbox.finish(total - depth, depth)
}
