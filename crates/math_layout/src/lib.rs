//! Math Layout - TeX-style layout of math formulas
//!
//! This crate turns a tree of math atoms into a tree of boxes following the
//! rules of the TeXbook, Appendix G:
//! - An atom tree ([`Atom`]) built by a front-end, validated at construction
//! - A style/size [`Environment`] threaded through every layout call
//! - Row sequencing with binary reclassification, kerns, ligatures and glue
//! - One layout algorithm per atom kind, producing a [`LayoutBox`] tree
//!
//! Font data is read through the [`FontMetrics`] trait; [`TableFont`] is an
//! in-memory implementation with Computer Modern-like metrics.
//!
//! ```
//! use math_layout::{Atom, LayoutConfig, LayoutEngine, TableFont};
//!
//! let font = TableFont::computer_modern();
//! let engine = LayoutEngine::with_config(&font, LayoutConfig::display());
//! let frac = Atom::fraction(Atom::char('a'), Atom::char('b'));
//! let b = engine.layout(&frac);
//! assert!(b.height() > 0.0);
//! ```

pub mod atom;
pub mod boxes;
pub mod delimiter;
pub mod env;
pub mod error;
pub mod glue;
pub mod layout;
pub mod metrics;
pub mod style;
pub mod symbols;
pub mod table_font;
pub mod units;

pub use atom::{
    AccentedAtom, Atom, AtomClass, BigOperatorAtom, CharAtom, ColorAtom, FencedAtom,
    FractionAtom, OverUnderDelimiterAtom, PhantomAtom, RadicalAtom, RowAtom, RuleThickness,
    ScriptsAtom, SpaceAtom, SymbolAtom, TypedAtom,
};
pub use boxes::{Alignment, BoxContent, HorizontalBox, LayoutBox, VerticalBox};
pub use env::{Color, Environment};
pub use error::*;
pub use glue::{glue_box, glue_kind, glue_width, GlueKind};
pub use layout::{layout, LayoutConfig, LayoutEngine};
pub use metrics::{CharFont, Extension, FontId, FontMetrics, GlyphRef, MathConstants};
pub use style::{Style, StyleLevel};
pub use symbols::{SymbolInfo, SymbolRegistry};
pub use table_font::{GlyphMetrics, TableFont, TableFontBuilder};
pub use units::{Dimension, Unit};
