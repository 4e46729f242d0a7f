//! Math styles - the eight TeX styles and their transitions
//!
//! Each of display, text, script and scriptscript comes in a normal and a
//! cramped variant. Variants are declared in TeX order so that the derived
//! `Ord` matches TeX's comparisons (`style < Style::Text` means display).

use serde::{Deserialize, Serialize};

/// Size level of a style, ignoring crampedness
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StyleLevel {
    Display,
    Text,
    Script,
    ScriptScript,
}

/// One of the eight TeX math styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Style {
    Display,
    DisplayCramped,
    #[default]
    Text,
    TextCramped,
    Script,
    ScriptCramped,
    ScriptScript,
    ScriptScriptCramped,
}

impl Style {
    /// Build a style from its level and cramped flag
    pub const fn new(level: StyleLevel, cramped: bool) -> Self {
        match (level, cramped) {
            (StyleLevel::Display, false) => Style::Display,
            (StyleLevel::Display, true) => Style::DisplayCramped,
            (StyleLevel::Text, false) => Style::Text,
            (StyleLevel::Text, true) => Style::TextCramped,
            (StyleLevel::Script, false) => Style::Script,
            (StyleLevel::Script, true) => Style::ScriptCramped,
            (StyleLevel::ScriptScript, false) => Style::ScriptScript,
            (StyleLevel::ScriptScript, true) => Style::ScriptScriptCramped,
        }
    }

    pub const fn level(self) -> StyleLevel {
        match self {
            Style::Display | Style::DisplayCramped => StyleLevel::Display,
            Style::Text | Style::TextCramped => StyleLevel::Text,
            Style::Script | Style::ScriptCramped => StyleLevel::Script,
            Style::ScriptScript | Style::ScriptScriptCramped => StyleLevel::ScriptScript,
        }
    }

    pub const fn is_cramped(self) -> bool {
        matches!(
            self,
            Style::DisplayCramped
                | Style::TextCramped
                | Style::ScriptCramped
                | Style::ScriptScriptCramped
        )
    }

    pub const fn is_display(self) -> bool {
        matches!(self.level(), StyleLevel::Display)
    }

    /// Cramped variant of this style (idempotent)
    pub const fn cramped(self) -> Self {
        Style::new(self.level(), true)
    }

    /// Style for superscripts: D,T → S and S,SS → SS, crampedness kept
    pub const fn sup(self) -> Self {
        Style::new(Self::script_level(self.level()), self.is_cramped())
    }

    /// Style for subscripts: same sizes as `sup`, always cramped
    pub const fn sub(self) -> Self {
        Style::new(Self::script_level(self.level()), true)
    }

    /// Style for a fraction numerator: D → T, T → S, S,SS → SS
    pub const fn numerator(self) -> Self {
        Style::new(Self::fraction_level(self.level()), self.is_cramped())
    }

    /// Style for a fraction denominator: sizes as `numerator`, always cramped
    pub const fn denominator(self) -> Self {
        Style::new(Self::fraction_level(self.level()), true)
    }

    /// Style for a radical index: two superscript steps
    pub const fn root(self) -> Self {
        self.sup().sup()
    }

    const fn script_level(level: StyleLevel) -> StyleLevel {
        match level {
            StyleLevel::Display | StyleLevel::Text => StyleLevel::Script,
            StyleLevel::Script | StyleLevel::ScriptScript => StyleLevel::ScriptScript,
        }
    }

    const fn fraction_level(level: StyleLevel) -> StyleLevel {
        match level {
            StyleLevel::Display => StyleLevel::Text,
            StyleLevel::Text => StyleLevel::Script,
            StyleLevel::Script | StyleLevel::ScriptScript => StyleLevel::ScriptScript,
        }
    }
}
