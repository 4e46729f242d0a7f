//! Symbol registry - named symbols with their class and code point
//!
//! The registry is an explicit value handed to the atom constructors that
//! need it. There is no process-wide table.

use crate::atom::AtomClass;
use crate::error::{MathError, MathResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What the registry knows about a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub code: char,
    pub class: AtomClass,
    /// Whether the symbol can be sized as a delimiter
    pub delimiter: bool,
}

impl SymbolInfo {
    pub const fn new(code: char, class: AtomClass) -> Self {
        Self {
            code,
            class,
            delimiter: false,
        }
    }

    pub const fn delimiter(code: char, class: AtomClass) -> Self {
        Self {
            code,
            class,
            delimiter: true,
        }
    }
}

/// Name → symbol table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolRegistry {
    symbols: HashMap<String, SymbolInfo>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the usual TeX operators, relations, delimiters and accents
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (name, code) in BINARY {
            registry.register(name, SymbolInfo::new(code, AtomClass::BinaryOperator));
        }
        for (name, code) in RELATIONS {
            registry.register(name, SymbolInfo::new(code, AtomClass::Relation));
        }
        for (name, code) in BIG_OPERATORS {
            registry.register(name, SymbolInfo::new(code, AtomClass::LargeOperator));
        }
        for (name, code) in OPENING {
            registry.register(name, SymbolInfo::delimiter(code, AtomClass::Opening));
        }
        for (name, code) in CLOSING {
            registry.register(name, SymbolInfo::delimiter(code, AtomClass::Closing));
        }
        for (name, code) in PUNCTUATION {
            registry.register(name, SymbolInfo::new(code, AtomClass::Punctuation));
        }
        for (name, code) in ORDINARY {
            registry.register(name, SymbolInfo::new(code, AtomClass::Ordinary));
        }
        for (name, code) in ACCENTS {
            registry.register(name, SymbolInfo::new(code, AtomClass::Accent));
        }
        registry.register("vert", SymbolInfo::delimiter('|', AtomClass::Ordinary));
        registry.register("Vert", SymbolInfo::delimiter('‖', AtomClass::Ordinary));
        registry.register("sqrt", SymbolInfo::delimiter('√', AtomClass::Radical));
        registry.register("overbrace", SymbolInfo::delimiter('⏞', AtomClass::Over));
        registry.register("underbrace", SymbolInfo::delimiter('⏟', AtomClass::Under));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, info: SymbolInfo) {
        self.symbols.insert(name.into(), info);
    }

    pub fn get(&self, name: &str) -> MathResult<SymbolInfo> {
        self.symbols
            .get(name)
            .copied()
            .ok_or_else(|| MathError::SymbolNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

const BINARY: [(&str, char); 16] = [
    ("plus", '+'),
    ("minus", '−'),
    ("times", '×'),
    ("cdot", '⋅'),
    ("pm", '±'),
    ("mp", '∓'),
    ("div", '÷'),
    ("ast", '∗'),
    ("cup", '∪'),
    ("cap", '∩'),
    ("wedge", '∧'),
    ("vee", '∨'),
    ("setminus", '∖'),
    ("circ", '∘'),
    ("oplus", '⊕'),
    ("otimes", '⊗'),
];

const RELATIONS: [(&str, char); 18] = [
    ("equals", '='),
    ("neq", '≠'),
    ("lt", '<'),
    ("gt", '>'),
    ("leq", '≤'),
    ("geq", '≥'),
    ("approx", '≈'),
    ("equiv", '≡'),
    ("sim", '∼'),
    ("subset", '⊂'),
    ("supset", '⊃'),
    ("in", '∈'),
    ("notin", '∉'),
    ("to", '→'),
    ("rightarrow", '→'),
    ("leftarrow", '←'),
    ("mapsto", '↦'),
    ("colon", ':'),
];

const BIG_OPERATORS: [(&str, char); 9] = [
    ("sum", '∑'),
    ("prod", '∏'),
    ("coprod", '∐'),
    ("int", '∫'),
    ("oint", '∮'),
    ("bigcup", '⋃'),
    ("bigcap", '⋂'),
    ("bigoplus", '⨁'),
    ("bigotimes", '⨂'),
];

const OPENING: [(&str, char); 6] = [
    ("lparen", '('),
    ("lbrack", '['),
    ("lbrace", '{'),
    ("langle", '⟨'),
    ("lfloor", '⌊'),
    ("lceil", '⌈'),
];

const CLOSING: [(&str, char); 6] = [
    ("rparen", ')'),
    ("rbrack", ']'),
    ("rbrace", '}'),
    ("rangle", '⟩'),
    ("rfloor", '⌋'),
    ("rceil", '⌉'),
];

const PUNCTUATION: [(&str, char); 2] = [("comma", ','), ("semicolon", ';')];

const ORDINARY: [(&str, char); 16] = [
    ("infty", '∞'),
    ("partial", '∂'),
    ("nabla", '∇'),
    ("forall", '∀'),
    ("exists", '∃'),
    ("emptyset", '∅'),
    ("prime", '′'),
    ("ldots", '…'),
    ("cdots", '⋯'),
    ("alpha", 'α'),
    ("beta", 'β'),
    ("theta", 'θ'),
    ("lambda", 'λ'),
    ("mu", 'μ'),
    ("pi", 'π'),
    ("omega", 'ω'),
];

const ACCENTS: [(&str, char); 13] = [
    ("hat", '^'),
    ("widehat", '^'),
    ("tilde", '~'),
    ("widetilde", '~'),
    ("bar", '¯'),
    ("vec", '\u{20D7}'),
    ("dot", '˙'),
    ("ddot", '¨'),
    ("acute", '´'),
    ("grave", '`'),
    ("check", 'ˇ'),
    ("breve", '˘'),
    ("mathring", '˚'),
];
