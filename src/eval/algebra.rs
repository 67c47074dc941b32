//! Category semantics.
//!
//! The builders here produce the [`Symbol`]s the standard keyword table is made of:
//! nouns over value expressions, unary monads that compose when given a monad, dyads
//! that lift over monadic operands, the pipeline conjunction and the reflex adverb.

use super::symbol::{Adverb, Conjunction, Dyad, Monad, Noun, Symbol, SymbolContext, SymbolSet};
use super::value::{BinaryOp, UnaryOp, ValueExpr};
use super::EvalResult;

pub fn noun(expr: ValueExpr) -> Symbol {
    Symbol::Noun(Noun::new(expr))
}

pub fn monad(
    op: impl Fn(&dyn SymbolContext, &SymbolSet) -> EvalResult<SymbolSet> + Send + Sync + 'static,
) -> Symbol {
    Symbol::Monad(Monad::new(op))
}

pub fn symbols(symbols: impl IntoIterator<Item = Symbol>) -> SymbolSet {
    symbols.into_iter().collect()
}

/// `# y` returns its operand untouched.
pub fn identity() -> Symbol {
    monad(|_, y| Ok(y.clone()))
}

/// A monad materializing `op` over its operand's value.
///
/// Given a noun it applies immediately. Given a monad `g` it composes, yielding
/// `v -> op(g v)`.
pub fn unary(op: UnaryOp) -> Symbol {
    Symbol::Monad(unary_monad(op))
}

fn unary_monad(op: UnaryOp) -> Monad {
    Monad::new(move |ctx, y| {
        if let Some(noun) = y.noun() {
            return Ok(symbols([self::noun(ValueExpr::unary(op, noun.unwrap(ctx)))]));
        }
        let inner = y.require_monad()?.clone();
        Ok(symbols([monad(move |ctx, v| {
            let applied = inner.apply(ctx, v)?;
            unary_monad(op).apply(ctx, &applied)
        })]))
    })
}

/// An arithmetic dyad over `op`, lifting through monadic operands.
pub fn binary(op: BinaryOp) -> Symbol {
    lifted_dyad(move |x, y| ValueExpr::binary(op, x, y))
}

/// Dyad whose base operation builds a value expression from two operand expressions.
///
/// When either operand carries a monad the dyad defers: it returns the monad
/// `v -> make(resolve(x, v), resolve(y, v))`.
pub fn lifted_dyad(
    make: impl Fn(ValueExpr, ValueExpr) -> ValueExpr + Send + Sync + Clone + 'static,
) -> Symbol {
    Symbol::Dyad(Dyad::new(move |ctx, x, y| {
        if x.has_monad() || y.has_monad() {
            let (x, y, make) = (x.clone(), y.clone(), make.clone());
            return Ok(symbols([monad(move |ctx, v| {
                let left = resolve(ctx, &x, v)?;
                let right = resolve(ctx, &y, v)?;
                Ok(symbols([noun(make(left, right))]))
            })]));
        }
        let left = x.require_noun()?.unwrap(ctx);
        let right = y.require_noun()?.unwrap(ctx);
        Ok(symbols([noun(make(left, right))]))
    }))
}

/// An operand's value at argument `v`: applied when it is a monad, unwrapped otherwise.
fn resolve(ctx: &dyn SymbolContext, operand: &SymbolSet, v: &SymbolSet) -> EvalResult<ValueExpr> {
    match operand.monad() {
        Some(monad) => Ok(monad.apply(ctx, v)?.require_noun()?.unwrap(ctx)),
        None => Ok(operand.require_noun()?.unwrap(ctx)),
    }
}

/// Left-to-right pipeline.
///
/// `noun pipeline monad` applies the monad right away; `f pipeline g` between two
/// monads is the monad `y -> g (f y)`.
pub fn pipeline() -> Symbol {
    Symbol::Conjunction(Conjunction::new(|ctx, a, b| {
        if a.has_noun() {
            if let Some(next) = b.monad() {
                return next.apply(ctx, a);
            }
        }
        let first = a.require_monad()?.clone();
        let then = b.require_monad()?.clone();
        Ok(symbols([monad(move |ctx, y| {
            let intermediate = first.apply(ctx, y)?;
            then.apply(ctx, &intermediate)
        })]))
    }))
}

/// `u~ y` is `y u y`.
pub fn reflex() -> Symbol {
    Symbol::Adverb(Adverb::new(|_, u| {
        let dyad = u.require_dyad()?.clone();
        Ok(symbols([monad(move |ctx, y| dyad.apply(ctx, y, y))]))
    }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::eval::symbol::DetachedContext;
    use crate::eval::EvalError;
    use crate::vocabulary::category::{Category, CategorySet};

    fn number(value: f64) -> SymbolSet {
        symbols([noun(ValueExpr::number(value))])
    }

    fn value_of(set: &SymbolSet) -> ValueExpr {
        set.require_noun().unwrap().unwrap(&DetachedContext)
    }

    fn as_set(symbol: Symbol) -> SymbolSet {
        symbols([symbol])
    }

    #[test]
    fn test_dyad_applies_to_two_nouns() {
        let sum = as_set(binary(BinaryOp::Add));
        let result = sum
            .require_dyad()
            .unwrap()
            .apply(&DetachedContext, &number(3.0), &number(4.0))
            .unwrap();
        assert_eq!(
            value_of(&result),
            ValueExpr::binary(BinaryOp::Add, ValueExpr::number(3.0), ValueExpr::number(4.0))
        );
    }

    #[test]
    fn test_dyad_lifts_over_monads() {
        let negate = as_set(unary(UnaryOp::Negate));
        let same = as_set(identity());
        let sum = as_set(binary(BinaryOp::Add));

        let lifted = sum
            .require_dyad()
            .unwrap()
            .apply(&DetachedContext, &negate, &same)
            .unwrap();
        assert!(lifted.has_monad());
        assert!(!lifted.has_noun());

        let applied = lifted
            .require_monad()
            .unwrap()
            .apply(&DetachedContext, &number(5.0))
            .unwrap();
        assert_eq!(
            value_of(&applied),
            ValueExpr::binary(
                BinaryOp::Add,
                ValueExpr::unary(UnaryOp::Negate, ValueExpr::number(5.0)),
                ValueExpr::number(5.0),
            )
        );
    }

    #[test]
    fn test_dyad_lifts_with_one_noun_operand() {
        let product = as_set(binary(BinaryOp::Multiply));
        let lifted = product
            .require_dyad()
            .unwrap()
            .apply(&DetachedContext, &number(2.0), &as_set(identity()))
            .unwrap();
        let applied = lifted
            .require_monad()
            .unwrap()
            .apply(&DetachedContext, &number(7.0))
            .unwrap();
        assert_eq!(
            value_of(&applied),
            ValueExpr::binary(
                BinaryOp::Multiply,
                ValueExpr::number(2.0),
                ValueExpr::number(7.0)
            )
        );
    }

    #[test]
    fn test_monad_composes_with_monad() {
        let negate = as_set(unary(UnaryOp::Negate));
        let floor = as_set(unary(UnaryOp::Floor));
        let composed = negate
            .require_monad()
            .unwrap()
            .apply(&DetachedContext, &floor)
            .unwrap();
        assert!(composed.has_monad());
        let applied = composed
            .require_monad()
            .unwrap()
            .apply(&DetachedContext, &number(2.5))
            .unwrap();
        assert_eq!(
            value_of(&applied),
            ValueExpr::unary(
                UnaryOp::Negate,
                ValueExpr::unary(UnaryOp::Floor, ValueExpr::number(2.5))
            )
        );
    }

    #[test]
    fn test_pipeline_applies_eagerly_to_noun() {
        let pipe = as_set(pipeline());
        let result = pipe
            .conjunction()
            .unwrap()
            .apply(&DetachedContext, &number(5.0), &as_set(unary(UnaryOp::Negate)))
            .unwrap();
        assert_eq!(
            value_of(&result),
            ValueExpr::unary(UnaryOp::Negate, ValueExpr::number(5.0))
        );
    }

    #[test]
    fn test_pipeline_sequences_monads() {
        let pipe = as_set(pipeline());
        let sequenced = pipe
            .conjunction()
            .unwrap()
            .apply(
                &DetachedContext,
                &as_set(unary(UnaryOp::Negate)),
                &as_set(unary(UnaryOp::Reciprocal)),
            )
            .unwrap();
        let applied = sequenced
            .require_monad()
            .unwrap()
            .apply(&DetachedContext, &number(4.0))
            .unwrap();
        assert_eq!(
            value_of(&applied),
            ValueExpr::unary(
                UnaryOp::Reciprocal,
                ValueExpr::unary(UnaryOp::Negate, ValueExpr::number(4.0))
            )
        );
    }

    #[test]
    fn test_pipeline_rejects_noun_on_right() {
        let pipe = as_set(pipeline());
        let err = pipe
            .conjunction()
            .unwrap()
            .apply(&DetachedContext, &as_set(identity()), &number(1.0))
            .unwrap_err();
        assert_eq!(
            err,
            EvalError::Category {
                expected: CategorySet::single(Category::Monad),
                found: CategorySet::single(Category::Noun),
            }
        );
    }

    #[test]
    fn test_reflex_duplicates_operand() {
        let reflexive = as_set(reflex())
            .require_adverb()
            .unwrap()
            .apply(&DetachedContext, &as_set(binary(BinaryOp::Multiply)))
            .unwrap();
        let applied = reflexive
            .require_monad()
            .unwrap()
            .apply(&DetachedContext, &number(3.0))
            .unwrap();
        assert_eq!(
            value_of(&applied),
            ValueExpr::binary(
                BinaryOp::Multiply,
                ValueExpr::number(3.0),
                ValueExpr::number(3.0)
            )
        );
    }
}
