//! Atom tree - the logical input of layout
//!
//! Atoms are plain owned values. Nothing in layout mutates them, so one tree
//! can be laid out many times, under different environments, from several
//! threads at once.

use crate::boxes::Alignment;
use crate::env::Color;
use crate::error::{MathError, MathResult};
use crate::glue::GlueKind;
use crate::symbols::SymbolRegistry;
use crate::units::Dimension;
use serde::{Deserialize, Serialize};

// =============================================================================
// Atom classes
// =============================================================================

/// The thirteen TeX atom classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtomClass {
    Ordinary,
    LargeOperator,
    BinaryOperator,
    Relation,
    Opening,
    Closing,
    Punctuation,
    Inner,
    Over,
    Under,
    Accent,
    Radical,
    VCenter,
}

impl AtomClass {
    /// Classes that take part in font kerning and ligatures
    pub fn is_char_like(self) -> bool {
        matches!(
            self,
            AtomClass::Ordinary
                | AtomClass::LargeOperator
                | AtomClass::BinaryOperator
                | AtomClass::Relation
                | AtomClass::Opening
                | AtomClass::Closing
                | AtomClass::Punctuation
        )
    }
}

// =============================================================================
// Atom
// =============================================================================

/// A node of a math formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Atom {
    /// A single character in the math font
    Char(CharAtom),
    /// A named symbol from the registry
    Symbol(SymbolAtom),
    Row(RowAtom),
    /// Nucleus with optional sub- and superscript
    Scripts(ScriptsAtom),
    Fraction(FractionAtom),
    /// Square root or nth root
    Radical(RadicalAtom),
    /// Sum, integral and friends, with limits
    BigOperator(BigOperatorAtom),
    Accented(AccentedAtom),
    /// Content between sized delimiters
    Fenced(FencedAtom),
    /// Content under an over-brace or over an under-brace
    OverUnderDelimiter(OverUnderDelimiterAtom),
    Overlined(Box<Atom>),
    Underlined(Box<Atom>),
    Phantom(PhantomAtom),
    Color(ColorAtom),
    Space(SpaceAtom),
    /// Inner atom laid out normally but spaced as the given classes
    Typed(TypedAtom),
    /// Content centered on the math axis
    VCentered(Box<Atom>),
}

impl Atom {
    pub fn char(c: char) -> Self {
        Atom::Char(CharAtom { c })
    }

    pub fn symbol(name: &str, registry: &SymbolRegistry) -> MathResult<Self> {
        Ok(Atom::Symbol(SymbolAtom::new(name, registry)?))
    }

    pub fn row(atoms: Vec<Atom>) -> Self {
        Atom::Row(RowAtom::new(atoms))
    }

    /// Row of plain characters, one atom per char
    pub fn chars(text: &str) -> Self {
        Atom::row(text.chars().map(Atom::char).collect())
    }

    pub fn scripts(base: Atom, sub: Option<Atom>, sup: Option<Atom>) -> Self {
        Atom::Scripts(ScriptsAtom {
            base: Box::new(base),
            sub: sub.map(Box::new),
            sup: sup.map(Box::new),
        })
    }

    pub fn fraction(numerator: Atom, denominator: Atom) -> Self {
        Atom::Fraction(FractionAtom::new(numerator, denominator))
    }

    pub fn sqrt(radicand: Atom) -> Self {
        Atom::Radical(RadicalAtom {
            radicand: Box::new(radicand),
            index: None,
        })
    }

    pub fn root(index: Atom, radicand: Atom) -> Self {
        Atom::Radical(RadicalAtom {
            radicand: Box::new(radicand),
            index: Some(Box::new(index)),
        })
    }

    pub fn overlined(base: Atom) -> Self {
        Atom::Overlined(Box::new(base))
    }

    pub fn underlined(base: Atom) -> Self {
        Atom::Underlined(Box::new(base))
    }

    pub fn vcentered(base: Atom) -> Self {
        Atom::VCentered(Box::new(base))
    }

    pub fn phantom(content: Atom) -> Self {
        Atom::Phantom(PhantomAtom::new(content))
    }

    pub fn typed(inner: Atom, left: AtomClass, right: AtomClass) -> Self {
        Atom::Typed(TypedAtom {
            inner: Box::new(inner),
            left,
            right,
        })
    }

    pub fn color(atoms: Vec<Atom>, foreground: Option<Color>, background: Option<Color>) -> Self {
        Atom::Color(ColorAtom {
            row: RowAtom::new(atoms),
            foreground,
            background,
        })
    }

    pub fn glue(kind: GlueKind) -> Self {
        Atom::Space(SpaceAtom::Glue {
            kind,
            negative: false,
        })
    }

    pub fn strut(width: Dimension, height: Dimension, depth: Dimension) -> Self {
        Atom::Space(SpaceAtom::Strut {
            width,
            height,
            depth,
        })
    }

    /// The atom's own class
    pub fn class(&self) -> AtomClass {
        match self {
            Atom::Char(_) | Atom::Row(_) | Atom::Space(_) => AtomClass::Ordinary,
            Atom::Symbol(symbol) => symbol.class,
            Atom::Scripts(scripts) => scripts.base.class(),
            Atom::Fraction(_) | Atom::Fenced(_) => AtomClass::Inner,
            Atom::Radical(_) => AtomClass::Radical,
            Atom::BigOperator(_) => AtomClass::LargeOperator,
            Atom::Accented(_) => AtomClass::Accent,
            Atom::OverUnderDelimiter(d) if d.over => AtomClass::Over,
            Atom::OverUnderDelimiter(_) => AtomClass::Under,
            Atom::Overlined(_) => AtomClass::Over,
            Atom::Underlined(_) => AtomClass::Under,
            Atom::Phantom(phantom) => phantom.content.class(),
            Atom::Color(color) => color.row.left_class(),
            Atom::Typed(typed) => typed.left,
            Atom::VCentered(_) => AtomClass::VCenter,
        }
    }

    /// Class seen by the atom's left neighbour
    pub fn left_class(&self) -> AtomClass {
        match self {
            Atom::Row(row) => row.left_class(),
            Atom::Scripts(scripts) => scripts.base.left_class(),
            Atom::Phantom(phantom) => phantom.content.left_class(),
            Atom::Color(color) => color.row.left_class(),
            Atom::Typed(typed) => typed.left,
            _ => self.class(),
        }
    }

    /// Class seen by the atom's right neighbour
    pub fn right_class(&self) -> AtomClass {
        match self {
            Atom::Row(row) => row.right_class(),
            Atom::Scripts(scripts) => scripts.base.right_class(),
            Atom::Phantom(phantom) => phantom.content.right_class(),
            Atom::Color(color) => color.row.right_class(),
            Atom::Typed(typed) => typed.right,
            _ => self.class(),
        }
    }

    /// Space atoms never take part in glue decisions
    pub fn is_kern(&self) -> bool {
        matches!(self, Atom::Space(_))
    }

    /// Code point for character-like atoms
    pub fn char_code(&self) -> Option<char> {
        match self {
            Atom::Char(c) => Some(c.c),
            Atom::Symbol(symbol) => Some(symbol.code),
            _ => None,
        }
    }

    /// Pretty-printed JSON dump for debugging
    pub fn to_json(&self) -> MathResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// =============================================================================
// Leaf atoms
// =============================================================================

/// A character from the math fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharAtom {
    pub c: char,
}

/// A symbol resolved through a [`SymbolRegistry`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolAtom {
    pub name: String,
    pub code: char,
    pub class: AtomClass,
    /// Can be sized as a delimiter
    pub delimiter: bool,
}

impl SymbolAtom {
    pub fn new(name: &str, registry: &SymbolRegistry) -> MathResult<Self> {
        let info = registry.get(name)?;
        Ok(Self {
            name: name.to_string(),
            code: info.code,
            class: info.class,
            delimiter: info.delimiter,
        })
    }

    /// Look up a symbol that must belong to `class`
    pub fn with_class(name: &str, class: AtomClass, registry: &SymbolRegistry) -> MathResult<Self> {
        let symbol = Self::new(name, registry)?;
        if symbol.class != class {
            return Err(MathError::InvalidSymbolCategory {
                name: name.to_string(),
                expected: format!("{class:?}"),
                found: symbol.class,
            });
        }
        Ok(symbol)
    }

    /// Look up a symbol that must be usable as a delimiter
    pub fn delimiter(name: &str, registry: &SymbolRegistry) -> MathResult<Self> {
        let symbol = Self::new(name, registry)?;
        if !symbol.delimiter {
            return Err(MathError::InvalidSymbolCategory {
                name: name.to_string(),
                expected: "delimiter".to_string(),
                found: symbol.class,
            });
        }
        Ok(symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpaceAtom {
    /// Inter-word space of the last used font
    Blank,
    /// One of the named math skips
    Glue { kind: GlueKind, negative: bool },
    Strut {
        width: Dimension,
        height: Dimension,
        depth: Dimension,
    },
}

impl SpaceAtom {
    /// Horizontal space given as `value` in the unit `code`
    pub fn horizontal(value: f32, code: &str) -> MathResult<Self> {
        Ok(SpaceAtom::Strut {
            width: Dimension::with_code(value, code)?,
            height: Dimension::zero(),
            depth: Dimension::zero(),
        })
    }
}

// =============================================================================
// Composite atoms
// =============================================================================

/// Atoms set one after another with inter-atom glue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowAtom {
    pub atoms: Vec<Atom>,
}

impl RowAtom {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// A row that must have at least one element
    pub fn non_empty(atoms: Vec<Atom>, context: &str) -> MathResult<Self> {
        if atoms.is_empty() {
            return Err(MathError::EmptyRow(context.to_string()));
        }
        Ok(Self::new(atoms))
    }

    pub fn left_class(&self) -> AtomClass {
        self.atoms
            .first()
            .map_or(AtomClass::Ordinary, Atom::left_class)
    }

    pub fn right_class(&self) -> AtomClass {
        self.atoms
            .last()
            .map_or(AtomClass::Ordinary, Atom::right_class)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptsAtom {
    pub base: Box<Atom>,
    pub sub: Option<Box<Atom>>,
    pub sup: Option<Box<Atom>>,
}

/// Thickness of a fraction bar
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum RuleThickness {
    /// The font's default rule thickness
    #[default]
    Default,
    /// No rule, as in binomials
    None,
    /// Multiple of the default thickness
    Factor(f32),
    Explicit(Dimension),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionAtom {
    pub numerator: Box<Atom>,
    pub denominator: Box<Atom>,
    pub thickness: RuleThickness,
    pub numerator_align: Alignment,
    pub denominator_align: Alignment,
}

impl FractionAtom {
    pub fn new(numerator: Atom, denominator: Atom) -> Self {
        Self {
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
            thickness: RuleThickness::Default,
            numerator_align: Alignment::Center,
            denominator_align: Alignment::Center,
        }
    }

    pub fn with_thickness(mut self, thickness: RuleThickness) -> Self {
        self.thickness = thickness;
        self
    }

    /// Explicit rule thickness given as `value` in the unit `code`
    pub fn with_thickness_code(self, value: f32, code: &str) -> MathResult<Self> {
        let dimension = Dimension::with_code(value, code)?;
        Ok(self.with_thickness(RuleThickness::Explicit(dimension)))
    }

    pub fn with_alignment(mut self, numerator: Alignment, denominator: Alignment) -> Self {
        self.numerator_align = numerator;
        self.denominator_align = denominator;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadicalAtom {
    pub radicand: Box<Atom>,
    pub index: Option<Box<Atom>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BigOperatorAtom {
    pub base: Box<Atom>,
    pub over: Option<Box<Atom>>,
    pub under: Option<Box<Atom>>,
    /// `Some(true)` forces limits above and below, `Some(false)` forces
    /// scripts; `None` decides by style
    pub limits: Option<bool>,
}

impl BigOperatorAtom {
    pub fn new(base: Atom, under: Option<Atom>, over: Option<Atom>) -> Self {
        Self {
            base: Box::new(base),
            over: over.map(Box::new),
            under: under.map(Box::new),
            limits: None,
        }
    }

    pub fn with_limits(mut self, limits: bool) -> Self {
        self.limits = Some(limits);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccentedAtom {
    pub base: Box<Atom>,
    pub accent: SymbolAtom,
}

impl AccentedAtom {
    pub fn new(base: Atom, accent: &str, registry: &SymbolRegistry) -> MathResult<Self> {
        Ok(Self {
            base: Box::new(base),
            accent: SymbolAtom::with_class(accent, AtomClass::Accent, registry)?,
        })
    }

    /// Accent taken from an already built atom, which must be exactly one
    /// accent symbol (possibly wrapped in a one-element row)
    pub fn from_source(base: Atom, source: &Atom) -> MathResult<Self> {
        let symbol = match source {
            Atom::Symbol(symbol) => symbol,
            Atom::Row(row) => match row.atoms.as_slice() {
                [Atom::Symbol(symbol)] => symbol,
                _ => {
                    return Err(MathError::MalformedAccentSource(format!(
                        "row of {} atoms",
                        row.atoms.len()
                    )))
                }
            },
            other => {
                return Err(MathError::MalformedAccentSource(format!(
                    "{:?} atom",
                    other.class()
                )))
            }
        };
        if symbol.class != AtomClass::Accent {
            return Err(MathError::InvalidSymbolCategory {
                name: symbol.name.clone(),
                expected: format!("{:?}", AtomClass::Accent),
                found: symbol.class,
            });
        }
        Ok(Self {
            base: Box::new(base),
            accent: symbol.clone(),
        })
    }

    /// The innermost non-accent base
    pub fn underbase(&self) -> &Atom {
        match &*self.base {
            Atom::Accented(inner) => inner.underbase(),
            base => base,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FencedAtom {
    pub left: Option<SymbolAtom>,
    pub content: Box<Atom>,
    pub right: Option<SymbolAtom>,
}

impl FencedAtom {
    pub fn new(
        left: Option<&str>,
        content: Atom,
        right: Option<&str>,
        registry: &SymbolRegistry,
    ) -> MathResult<Self> {
        let left = left
            .map(|name| SymbolAtom::delimiter(name, registry))
            .transpose()?;
        let right = right
            .map(|name| SymbolAtom::delimiter(name, registry))
            .transpose()?;
        Ok(Self {
            left,
            content: Box::new(content),
            right,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverUnderDelimiterAtom {
    pub base: Box<Atom>,
    pub script: Option<Box<Atom>>,
    pub delimiter: SymbolAtom,
    /// Delimiter above the base (`true`) or below it
    pub over: bool,
}

impl OverUnderDelimiterAtom {
    pub fn new(
        base: Atom,
        script: Option<Atom>,
        delimiter: &str,
        over: bool,
        registry: &SymbolRegistry,
    ) -> MathResult<Self> {
        Ok(Self {
            base: Box::new(base),
            script: script.map(Box::new),
            delimiter: SymbolAtom::delimiter(delimiter, registry)?,
            over,
        })
    }
}

/// Invisible content that keeps some of its dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhantomAtom {
    pub content: Box<Atom>,
    pub keep_width: bool,
    pub keep_height: bool,
    pub keep_depth: bool,
}

impl PhantomAtom {
    pub fn new(content: Atom) -> Self {
        Self::with_dimensions(content, true, true, true)
    }

    pub fn with_dimensions(content: Atom, width: bool, height: bool, depth: bool) -> Self {
        Self {
            content: Box::new(content),
            keep_width: width,
            keep_height: height,
            keep_depth: depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAtom {
    pub row: RowAtom,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedAtom {
    pub inner: Box<Atom>,
    pub left: AtomClass,
    pub right: AtomClass,
}
