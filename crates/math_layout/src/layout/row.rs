//! Row sequencing
//!
//! Lays out a row left to right with lookahead: binary operators that
//! cannot be binary are demoted to ordinary, adjacent characters get font
//! kerns and (possibly chained) ligatures, and glue from the class table
//! goes between neighbouring atoms unless one of them is a space atom. The
//! atoms themselves are only read; all per-row decisions live in
//! [`Overlay`] values that die with the pass.

use super::{layout, PREC};
use crate::atom::{Atom, AtomClass};
use crate::boxes::{HorizontalBox, LayoutBox};
use crate::env::Environment;
use crate::glue::glue_box;
use crate::metrics::GlyphRef;
use tracing::trace;

/// Row-local view of an atom with the decisions made for it in this pass
#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a> {
    pub atom: &'a Atom,
    /// Class forced by binary reclassification
    pub class: Option<AtomClass>,
    /// Ligature glyph replacing the atom's own glyph
    pub glyph: Option<GlyphRef>,
}

impl<'a> Overlay<'a> {
    pub fn new(atom: &'a Atom) -> Self {
        Self {
            atom,
            class: None,
            glyph: None,
        }
    }

    pub fn left_class(&self) -> AtomClass {
        self.class.unwrap_or_else(|| self.atom.left_class())
    }

    pub fn right_class(&self) -> AtomClass {
        self.class.unwrap_or_else(|| self.atom.right_class())
    }

    fn layout(&self, env: Environment<'_>) -> LayoutBox {
        match self.glyph {
            Some(glyph) => LayoutBox::glyph(glyph, &env),
            None => layout(self.atom, env),
        }
    }
}

fn demotes_next_binary(class: AtomClass) -> bool {
    matches!(
        class,
        AtomClass::BinaryOperator
            | AtomClass::LargeOperator
            | AtomClass::Relation
            | AtomClass::Opening
            | AtomClass::Punctuation
    )
}

fn demotes_prev_binary(class: AtomClass) -> bool {
    matches!(
        class,
        AtomClass::Relation | AtomClass::Closing | AtomClass::Punctuation
    )
}

/// Lay out `atoms` as one horizontal box
pub fn layout_row(atoms: &[Atom], env: Environment<'_>) -> LayoutBox {
    let mut env = env.reset();
    let mut hbox = HorizontalBox::new();
    // right class of the last non-kern atom
    let mut prev: Option<AtomClass> = None;
    let mut prev_was_kern = false;
    let mut i = 0;

    while i < atoms.len() {
        let mut current = Overlay::new(&atoms[i]);
        let next = atoms.get(i + 1);

        if current.atom.class() == AtomClass::BinaryOperator {
            let demote = match prev {
                None => true,
                Some(class) => demotes_next_binary(class),
            } || next.map_or(true, |n| demotes_prev_binary(n.left_class()));
            if demote {
                trace!(target: "math_layout::row", index = i, "binary operator set as ordinary");
                current.class = Some(AtomClass::Ordinary);
            }
        }

        let mut kern = 0.0;
        if let Atom::Char(c) = current.atom {
            if current.atom.class().is_char_like() {
                let mut left = env.glyph(c.c).char_font;
                // each ligature consumes the next atom and may chain with the one after
                while let Some(next_atom) = atoms.get(i + 1) {
                    let Some(next_code) = next_atom.char_code() else {
                        break;
                    };
                    if !next_atom.class().is_char_like() {
                        break;
                    }
                    let right = env.glyph(next_code).char_font;
                    match env.ligature(left, right) {
                        Some(ligature) => {
                            trace!(
                                target: "math_layout::row",
                                left = %left.code,
                                right = %next_code,
                                ligature = %ligature.char_font.code,
                                "ligature substituted"
                            );
                            current.glyph = Some(ligature);
                            left = ligature.char_font;
                            i += 1;
                        }
                        None => {
                            kern = env.kern(left, right);
                            break;
                        }
                    }
                }
            }
        }

        // no glue next to space atoms
        if !current.atom.is_kern() && !prev_was_kern {
            if let Some(prev_class) = prev {
                let glue = glue_box(prev_class, current.left_class(), &env);
                if glue.width().abs() > PREC {
                    hbox.add(glue);
                }
            }
        }

        let b = current.layout(env);
        env = env.with_last_font(b.last_used_font().or(env.last_font()));
        hbox.add(b);

        if kern.abs() > PREC {
            trace!(target: "math_layout::row", index = i, kern, "kern inserted");
            hbox.add(LayoutBox::kern(kern));
        }

        prev_was_kern = current.atom.is_kern();
        if !prev_was_kern {
            prev = Some(current.right_class());
        }
        i += 1;
    }

    hbox.finish()
}
