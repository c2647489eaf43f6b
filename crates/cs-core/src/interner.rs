//! Interned tag strings.
//!
//! §9's design notes ask for tags to be "an interned string set as a typed
//! predicate helper" while behavior conditions stay string-keyed JSON (the
//! scheduler is meant to be reconfigurable without a rebuild — see
//! `cs-behavior::condition`). `Symbol` gives tag membership checks the same
//! cheap-`Copy`-wrapper treatment `ids.rs` gives entity identity, without
//! forcing the JSON condition grammar itself to become typed.

use std::collections::HashMap;
use std::fmt;

/// An interned string's index into a `StringInterner`'s table. Cheap to
/// copy, compare, and hash; two `Symbol`s are equal iff the strings they
/// name are equal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Symbol(u32);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// A process-wide table mapping tag strings to `Symbol`s and back.
#[derive(Default)]
pub struct StringInterner {
    by_str: HashMap<Box<str>, Symbol>,
    by_symbol: Vec<Box<str>>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning its (possibly newly allocated) `Symbol`.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.by_str.get(s) {
            return sym;
        }
        let sym = Symbol(self.by_symbol.len() as u32);
        self.by_symbol.push(s.into());
        self.by_str.insert(s.into(), sym);
        sym
    }

    /// Look up a symbol without interning, for read-only membership checks
    /// against a tag set that might not contain `s` at all.
    pub fn lookup(&self, s: &str) -> Option<Symbol> {
        self.by_str.get(s).copied()
    }

    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.by_symbol[sym.0 as usize]
    }
}

/// A small set of interned tags attached to an entity (location, org,
/// agent, building). Construction goes through `StringInterner` so two
/// `TagSet`s that both hold "retail" share the same `Symbol`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet(Vec<Symbol>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sym: Symbol) {
        if !self.0.contains(&sym) {
            self.0.push(sym);
        }
    }

    /// Typed predicate helper per §9's design note — callers test
    /// membership against an already-resolved `Symbol`, not a raw string,
    /// everywhere except the JSON condition-clause boundary.
    #[inline]
    pub fn has(&self, sym: Symbol) -> bool {
        self.0.contains(&sym)
    }

    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
