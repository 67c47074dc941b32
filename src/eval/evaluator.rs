//! Graph evaluation.
//!
//! An [`Evaluator`] walks one expression graph, memoizing the [`SymbolSet`] of every
//! id it visits (failures included) and tracking the ids currently being evaluated so
//! that a reference chain re-entering itself fails instead of recursing. Each
//! evaluator owns its cache; nothing is shared between evaluations.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::ast::{ExprId, Expression, ExpressionGraph, ReferenceLookup};
use crate::error::Error;
use crate::vocabulary::category::Category;
use crate::vocabulary::keyword::KeywordTable;

use super::adapter::ExecutionAdapter;
use super::algebra::{noun, symbols};
use super::symbol::{SymbolContext, SymbolSet};
use super::value::ValueExpr;
use super::{EvalError, EvalResult};

pub struct Evaluator<'a> {
    graph: &'a dyn ReferenceLookup,
    table: &'a KeywordTable,
    cache: RefCell<HashMap<ExprId, EvalResult<SymbolSet>>>,
    in_flight: RefCell<HashSet<ExprId>>,
}

impl<'a> Evaluator<'a> {
    pub fn new(graph: &'a dyn ReferenceLookup, table: &'a KeywordTable) -> Self {
        Self {
            graph,
            table,
            cache: RefCell::new(HashMap::new()),
            in_flight: RefCell::new(HashSet::new()),
        }
    }

    /// Symbols of the named expression, computed at most once per evaluator.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn evaluate(&self, id: &str) -> EvalResult<SymbolSet> {
        if let Some(cached) = self.cache.borrow().get(id) {
            return cached.clone();
        }
        if self.in_flight.borrow().contains(id) {
            return Err(EvalError::Cycle { id: id.to_string() });
        }
        let expression = self
            .graph
            .lookup(id)
            .ok_or_else(|| EvalError::UnknownReference { id: id.to_string() })?;

        self.in_flight.borrow_mut().insert(id.to_string());
        let result = self.evaluate_expression(expression);
        self.in_flight.borrow_mut().remove(id);

        self.cache
            .borrow_mut()
            .insert(id.to_string(), result.clone());
        result
    }

    pub fn evaluate_expression(&self, expression: &Expression) -> EvalResult<SymbolSet> {
        match expression {
            Expression::Group { children, .. } => match children.as_slice() {
                [left, middle, right] => self.evaluate_triple(left, middle, right),
                [left, right] => self.evaluate_pair(left, right),
                other => Err(EvalError::Malformed {
                    children: other.len(),
                }),
            },
            Expression::Keyword { keyword } => Ok(self.table.symbols(keyword)),
            Expression::Number { value } => Ok(symbols([noun(ValueExpr::number(*value))])),
            Expression::Reference { reference } => self.evaluate(reference),
            Expression::Search { .. } | Expression::Stub { .. } => Err(EvalError::NotEvaluable {
                kind: expression.kind().to_string(),
            }),
        }
    }

    /// `x D y` or `u C v`: the operator is found before its operands are evaluated.
    fn evaluate_triple(
        &self,
        left: &Expression,
        middle: &Expression,
        right: &Expression,
    ) -> EvalResult<SymbolSet> {
        let operator = self.evaluate_expression(middle)?;
        if let Some(dyad) = operator.dyad() {
            let x = self.evaluate_expression(left)?;
            let y = self.evaluate_expression(right)?;
            return dyad.apply(self, &x, &y);
        }
        if let Some(conjunction) = operator.conjunction() {
            let x = self.evaluate_expression(left)?;
            let y = self.evaluate_expression(right)?;
            return conjunction.apply(self, &x, &y);
        }
        Err(operator.missing(&[Category::Dyad, Category::Conjunction]))
    }

    /// `f y`, or `u a` when the right side is an adverb.
    fn evaluate_pair(&self, left: &Expression, right: &Expression) -> EvalResult<SymbolSet> {
        let operand = self.evaluate_expression(left)?;
        // Both readings need a verb on the left.
        if !operand.has_monad() && !operand.has_dyad() {
            return Err(operand.missing(&[Category::Monad, Category::Dyad]));
        }
        let argument = self.evaluate_expression(right)?;
        if argument.offers(Category::Adverb) {
            return argument.require_adverb()?.apply(self, &operand);
        }
        operand.require_monad()?.apply(self, &argument)
    }
}

impl SymbolContext for Evaluator<'_> {
    fn get(&self, id: &str) -> EvalResult<SymbolSet> {
        self.evaluate(id)
    }
}

/// Outcome of interpreting every id of a graph.
#[derive(Debug, Default)]
pub struct Interpretation {
    /// Every id, `None` when it failed or did not resolve to a value.
    pub results: BTreeMap<ExprId, Option<f64>>,
    /// Rendered value expression of each id that resolved to a noun.
    pub diagnostics: BTreeMap<ExprId, String>,
    pub failures: BTreeMap<ExprId, Error>,
}

impl Interpretation {
    pub fn value(&self, id: &str) -> Option<f64> {
        self.results.get(id).copied().flatten()
    }

    pub fn is_absent(&self, id: &str) -> bool {
        self.value(id).is_none()
    }

    /// Takes over the entries of `other`, which win on conflicting ids.
    pub fn extend(&mut self, other: Interpretation) {
        self.results.extend(other.results);
        self.diagnostics.extend(other.diagnostics);
        self.failures.extend(other.failures);
    }

    pub fn record_failure(&mut self, id: &str, error: impl Into<Error>) {
        let error = error.into();
        tracing::error!("Failed to interpret '{}': {}", id, error);
        self.results.insert(id.to_string(), None);
        self.failures.insert(id.to_string(), error);
    }
}

/// Evaluates every id of `graph`, isolating failures per id.
#[tracing::instrument(level = "debug", skip_all, fields(ids = graph.len()))]
pub fn interpret(
    graph: &ExpressionGraph,
    table: &KeywordTable,
    adapter: &dyn ExecutionAdapter,
) -> Interpretation {
    let evaluator = Evaluator::new(graph, table);
    let mut interpretation = Interpretation::default();

    for id in graph.ids() {
        match run_one(&evaluator, adapter, id) {
            Ok(Some((value, source))) => {
                tracing::debug!("{} = {}", id, source);
                interpretation.results.insert(id.clone(), Some(value));
                interpretation.diagnostics.insert(id.clone(), source);
            }
            Ok(None) => {
                tracing::warn!("'{}' does not resolve to a value", id);
                interpretation.results.insert(id.clone(), None);
            }
            Err(error) => interpretation.record_failure(id, error),
        }
    }

    interpretation
}

fn run_one(
    evaluator: &Evaluator<'_>,
    adapter: &dyn ExecutionAdapter,
    id: &str,
) -> EvalResult<Option<(f64, String)>> {
    let evaluated = evaluator.evaluate(id)?;
    let Some(noun) = evaluated.noun() else {
        return Ok(None);
    };
    let expr = noun.unwrap(evaluator);
    let value = adapter.compile_and_run(&expr)?;
    Ok(Some((value, expr.to_string())))
}
