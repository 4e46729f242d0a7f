//! Inter-atom glue
//!
//! The table is the one from the TeXbook, chapter 18: rows are the class of
//! the left atom, columns the class of the right atom. Entries that TeX puts
//! in parentheses only apply in display and text styles.

use crate::atom::AtomClass;
use crate::boxes::LayoutBox;
use crate::env::Environment;
use crate::style::{Style, StyleLevel};
use serde::{Deserialize, Serialize};

/// Amount of glue between two atoms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlueKind {
    None,
    /// `\thinmuskip`, 3mu
    Thin,
    /// `\medmuskip`, 4mu
    Medium,
    /// `\thickmuskip`, 5mu
    Thick,
}

impl GlueKind {
    /// Width in math units
    pub fn mu(self) -> f32 {
        match self {
            GlueKind::None => 0.0,
            GlueKind::Thin => 3.0,
            GlueKind::Medium => 4.0,
            GlueKind::Thick => 5.0,
        }
    }

    pub fn width(self, env: &Environment<'_>) -> f32 {
        self.mu() * env.mu()
    }
}

// 0: none, 1: thin, 2: (thin), 3: (medium), 4: (thick)
const TABLE: [[u8; 8]; 8] = [
    // Ord Op Bin Rel Open Close Punct Inner
    [0, 1, 3, 4, 0, 0, 0, 2], // Ord
    [1, 1, 0, 4, 0, 0, 0, 2], // Op
    [3, 3, 0, 0, 3, 0, 0, 3], // Bin
    [4, 4, 0, 0, 4, 0, 0, 4], // Rel
    [0, 0, 0, 0, 0, 0, 0, 0], // Open
    [0, 1, 3, 4, 0, 0, 0, 2], // Close
    [2, 2, 0, 2, 2, 2, 2, 2], // Punct
    [2, 1, 3, 4, 2, 0, 2, 2], // Inner
];

fn index(class: AtomClass) -> usize {
    match class {
        AtomClass::LargeOperator => 1,
        AtomClass::BinaryOperator => 2,
        AtomClass::Relation => 3,
        AtomClass::Opening => 4,
        AtomClass::Closing => 5,
        AtomClass::Punctuation => 6,
        AtomClass::Inner => 7,
        AtomClass::Ordinary
        | AtomClass::Over
        | AtomClass::Under
        | AtomClass::Accent
        | AtomClass::Radical
        | AtomClass::VCenter => 0,
    }
}

/// Glue between a left atom of class `left` and a right atom of class `right`
pub fn glue_kind(left: AtomClass, right: AtomClass, style: Style) -> GlueKind {
    let script = matches!(style.level(), StyleLevel::Script | StyleLevel::ScriptScript);
    match TABLE[index(left)][index(right)] {
        1 => GlueKind::Thin,
        2 if !script => GlueKind::Thin,
        3 if !script => GlueKind::Medium,
        4 if !script => GlueKind::Thick,
        _ => GlueKind::None,
    }
}

pub fn glue_width(left: AtomClass, right: AtomClass, env: &Environment<'_>) -> f32 {
    glue_kind(left, right, env.style()).width(env)
}

/// Glue as a horizontal space box
pub fn glue_box(left: AtomClass, right: AtomClass, env: &Environment<'_>) -> LayoutBox {
    LayoutBox::kern(glue_width(left, right, env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_font::TableFont;

    #[test]
    fn test_binary_spacing() {
        assert_eq!(
            glue_kind(AtomClass::Ordinary, AtomClass::BinaryOperator, Style::Text),
            GlueKind::Medium
        );
        assert_eq!(
            glue_kind(AtomClass::BinaryOperator, AtomClass::Ordinary, Style::Display),
            GlueKind::Medium
        );
        assert_eq!(
            glue_kind(AtomClass::Ordinary, AtomClass::BinaryOperator, Style::Script),
            GlueKind::None
        );
    }

    #[test]
    fn test_relation_and_operator_spacing() {
        assert_eq!(
            glue_kind(AtomClass::Ordinary, AtomClass::Relation, Style::TextCramped),
            GlueKind::Thick
        );
        // unconditional thin space survives script styles
        assert_eq!(
            glue_kind(AtomClass::LargeOperator, AtomClass::Ordinary, Style::ScriptScript),
            GlueKind::Thin
        );
        assert_eq!(
            glue_kind(AtomClass::Opening, AtomClass::Ordinary, Style::Text),
            GlueKind::None
        );
    }

    #[test]
    fn test_other_classes_space_like_ordinary() {
        for class in [
            AtomClass::Over,
            AtomClass::Under,
            AtomClass::Accent,
            AtomClass::Radical,
            AtomClass::VCenter,
        ] {
            assert_eq!(
                glue_kind(class, AtomClass::Relation, Style::Text),
                glue_kind(AtomClass::Ordinary, AtomClass::Relation, Style::Text)
            );
        }
    }

    #[test]
    fn test_glue_width_in_mu() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);
        let w = glue_width(AtomClass::Ordinary, AtomClass::Relation, &env);
        assert!((w - 5.0 / 18.0).abs() < 1e-6);
        assert_eq!(glue_box(AtomClass::Ordinary, AtomClass::Relation, &env).width(), w);
    }
}
