//! Runtime values of the five grammatical categories.
//!
//! Evaluating any node yields a [`SymbolSet`]: at most one [`Symbol`] per
//! [`Category`]. Operators query the set for the capability they need
//! (`monad()`, `dyad()`, ...) and fail with a category error when it is missing.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::ast::ExprId;
use crate::vocabulary::category::{Category, CategorySet};

use super::value::ValueExpr;
use super::{EvalError, EvalResult};

/// What an operator implementation may ask of the running evaluation.
pub trait SymbolContext {
    /// Symbols of another named expression in the same evaluation.
    fn get(&self, id: &str) -> EvalResult<SymbolSet>;
}

pub type UnaryImpl =
    Arc<dyn Fn(&dyn SymbolContext, &SymbolSet) -> EvalResult<SymbolSet> + Send + Sync>;
pub type BinaryImpl = Arc<
    dyn Fn(&dyn SymbolContext, &SymbolSet, &SymbolSet) -> EvalResult<SymbolSet> + Send + Sync,
>;

/// A resolved value. Unwrapping yields the value expression it stands for.
#[derive(Clone)]
pub struct Noun {
    expr: Arc<ValueExpr>,
}

impl Noun {
    pub fn new(expr: ValueExpr) -> Self {
        Self {
            expr: Arc::new(expr),
        }
    }

    pub fn unwrap(&self, _ctx: &dyn SymbolContext) -> ValueExpr {
        self.expr.as_ref().clone()
    }

    /// A noun applied to nothing is itself.
    pub fn apply(&self) -> SymbolSet {
        SymbolSet::from(Symbol::Noun(self.clone()))
    }
}

#[derive(Clone)]
pub struct Monad {
    op: UnaryImpl,
}

impl Monad {
    pub fn new(
        op: impl Fn(&dyn SymbolContext, &SymbolSet) -> EvalResult<SymbolSet> + Send + Sync + 'static,
    ) -> Self {
        Self { op: Arc::new(op) }
    }

    pub fn apply(&self, ctx: &dyn SymbolContext, y: &SymbolSet) -> EvalResult<SymbolSet> {
        (self.op)(ctx, y)
    }
}

#[derive(Clone)]
pub struct Dyad {
    op: BinaryImpl,
}

impl Dyad {
    pub fn new(
        op: impl Fn(&dyn SymbolContext, &SymbolSet, &SymbolSet) -> EvalResult<SymbolSet>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self { op: Arc::new(op) }
    }

    pub fn apply(
        &self,
        ctx: &dyn SymbolContext,
        x: &SymbolSet,
        y: &SymbolSet,
    ) -> EvalResult<SymbolSet> {
        (self.op)(ctx, x, y)
    }
}

#[derive(Clone)]
pub struct Conjunction {
    op: BinaryImpl,
}

impl Conjunction {
    pub fn new(
        op: impl Fn(&dyn SymbolContext, &SymbolSet, &SymbolSet) -> EvalResult<SymbolSet>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self { op: Arc::new(op) }
    }

    pub fn apply(
        &self,
        ctx: &dyn SymbolContext,
        left: &SymbolSet,
        right: &SymbolSet,
    ) -> EvalResult<SymbolSet> {
        (self.op)(ctx, left, right)
    }
}

/// Operator-to-operator combinator.
#[derive(Clone)]
pub struct Adverb {
    op: UnaryImpl,
}

impl Adverb {
    pub fn new(
        op: impl Fn(&dyn SymbolContext, &SymbolSet) -> EvalResult<SymbolSet> + Send + Sync + 'static,
    ) -> Self {
        Self { op: Arc::new(op) }
    }

    pub fn apply(&self, ctx: &dyn SymbolContext, operand: &SymbolSet) -> EvalResult<SymbolSet> {
        (self.op)(ctx, operand)
    }
}

#[derive(Clone)]
pub enum Symbol {
    Noun(Noun),
    Monad(Monad),
    Dyad(Dyad),
    Conjunction(Conjunction),
    Adverb(Adverb),
}

impl Symbol {
    pub fn category(&self) -> Category {
        match self {
            Symbol::Noun(_) => Category::Noun,
            Symbol::Monad(_) => Category::Monad,
            Symbol::Dyad(_) => Category::Dyad,
            Symbol::Conjunction(_) => Category::Conjunction,
            Symbol::Adverb(_) => Category::Adverb,
        }
    }
}

impl fmt::Debug for Monad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Monad")
    }
}

impl fmt::Debug for Adverb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Adverb")
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Noun(noun) => write!(f, "Noun({})", noun.expr),
            other => write!(f, "{}", other.category()),
        }
    }
}

/// The capabilities a node evaluates to.
///
/// Keyword leaves also remember variants that are declared in the table but have no
/// implementation, so asking for one of those reports an unsupported operator.
#[derive(Clone, Default)]
pub struct SymbolSet {
    symbols: BTreeMap<Category, Symbol>,
    declared: BTreeMap<Category, String>,
}

impl SymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol) {
        self.symbols.insert(symbol.category(), symbol);
    }

    pub fn declare(&mut self, category: Category, name: impl Into<String>) {
        self.declared.insert(category, name.into());
    }

    pub fn noun(&self) -> Option<&Noun> {
        match self.symbols.get(&Category::Noun) {
            Some(Symbol::Noun(noun)) => Some(noun),
            _ => None,
        }
    }

    pub fn monad(&self) -> Option<&Monad> {
        match self.symbols.get(&Category::Monad) {
            Some(Symbol::Monad(monad)) => Some(monad),
            _ => None,
        }
    }

    pub fn dyad(&self) -> Option<&Dyad> {
        match self.symbols.get(&Category::Dyad) {
            Some(Symbol::Dyad(dyad)) => Some(dyad),
            _ => None,
        }
    }

    pub fn conjunction(&self) -> Option<&Conjunction> {
        match self.symbols.get(&Category::Conjunction) {
            Some(Symbol::Conjunction(conjunction)) => Some(conjunction),
            _ => None,
        }
    }

    pub fn adverb(&self) -> Option<&Adverb> {
        match self.symbols.get(&Category::Adverb) {
            Some(Symbol::Adverb(adverb)) => Some(adverb),
            _ => None,
        }
    }

    pub fn has_noun(&self) -> bool {
        self.noun().is_some()
    }

    pub fn has_monad(&self) -> bool {
        self.monad().is_some()
    }

    pub fn has_dyad(&self) -> bool {
        self.dyad().is_some()
    }

    /// Categories with an implementation.
    pub fn categories(&self) -> CategorySet {
        self.symbols.keys().copied().collect()
    }

    /// Implemented or declared-only.
    pub fn offers(&self, category: Category) -> bool {
        self.symbols.contains_key(&category) || self.declared.contains_key(&category)
    }

    pub fn require_noun(&self) -> EvalResult<&Noun> {
        self.noun().ok_or_else(|| self.missing(&[Category::Noun]))
    }

    pub fn require_monad(&self) -> EvalResult<&Monad> {
        self.monad().ok_or_else(|| self.missing(&[Category::Monad]))
    }

    pub fn require_dyad(&self) -> EvalResult<&Dyad> {
        self.dyad().ok_or_else(|| self.missing(&[Category::Dyad]))
    }

    pub fn require_adverb(&self) -> EvalResult<&Adverb> {
        self.adverb().ok_or_else(|| self.missing(&[Category::Adverb]))
    }

    /// Error for a set lacking every one of `expected`.
    pub fn missing(&self, expected: &[Category]) -> EvalError {
        if let Some((category, name)) = expected
            .iter()
            .find_map(|c| self.declared.get(c).map(|name| (*c, name)))
        {
            return EvalError::UnsupportedOperator {
                name: name.clone(),
                category,
            };
        }
        EvalError::Category {
            expected: expected.iter().copied().collect(),
            found: self.categories(),
        }
    }
}

impl From<Symbol> for SymbolSet {
    fn from(symbol: Symbol) -> Self {
        let mut set = SymbolSet::new();
        set.insert(symbol);
        set
    }
}

impl FromIterator<Symbol> for SymbolSet {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        let mut set = SymbolSet::new();
        for symbol in iter {
            set.insert(symbol);
        }
        set
    }
}

impl fmt::Debug for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolSet")
            .field("symbols", &self.symbols.values().collect::<Vec<_>>())
            .field("declared", &self.declared)
            .finish()
    }
}

/// Context for applying symbols outside of a graph evaluation.
pub struct DetachedContext;

impl SymbolContext for DetachedContext {
    fn get(&self, id: &str) -> EvalResult<SymbolSet> {
        Err(EvalError::UnknownReference { id: ExprId::from(id) })
    }
}
