use thiserror::Error;

use super::value::ValueExpr;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("Compile error: {0}")]
    Compile(String),
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// The boundary that materializes a resolved noun into a value.
///
/// This is the only step that touches an execution runtime; sandboxing or
/// timeouts belong in implementations of this trait.
#[cfg_attr(test, mockall::automock)]
pub trait ExecutionAdapter: Send + Sync {
    fn compile_and_run(&self, expr: &ValueExpr) -> Result<f64, ExecutionError>;
}

/// Interprets value expressions directly, no source text involved.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    max_depth: usize,
    reject_non_finite: bool,
}

impl TreeWalker {
    pub fn new(max_depth: usize, reject_non_finite: bool) -> Self {
        Self {
            max_depth,
            reject_non_finite,
        }
    }

    fn run(&self, expr: &ValueExpr) -> f64 {
        match expr {
            ValueExpr::Number { value } => *value,
            ValueExpr::Unary { op, operand } => op.apply(self.run(operand)),
            ValueExpr::Binary { op, left, right } => op.apply(self.run(left), self.run(right)),
        }
    }
}

impl Default for TreeWalker {
    fn default() -> Self {
        Self::new(256, true)
    }
}

impl ExecutionAdapter for TreeWalker {
    #[tracing::instrument(level = "debug", skip(self), fields(expr = %expr))]
    fn compile_and_run(&self, expr: &ValueExpr) -> Result<f64, ExecutionError> {
        let depth = expr.depth();
        if depth > self.max_depth {
            return Err(ExecutionError::Compile(format!(
                "expression nesting {} exceeds limit {}",
                depth, self.max_depth
            )));
        }

        let value = self.run(expr);
        if self.reject_non_finite && !value.is_finite() {
            return Err(ExecutionError::Runtime(format!(
                "{} evaluated to non-finite {}",
                expr, value
            )));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::value::{BinaryOp, UnaryOp};

    #[test]
    fn test_run_arithmetic() {
        let walker = TreeWalker::default();
        let expr = ValueExpr::binary(
            BinaryOp::Add,
            ValueExpr::unary(UnaryOp::Negate, ValueExpr::number(5.0)),
            ValueExpr::number(5.0),
        );
        assert_eq!(walker.compile_and_run(&expr), Ok(0.0));
    }

    #[test]
    fn test_depth_limit_is_compile_error() {
        let walker = TreeWalker::new(2, true);
        let expr = ValueExpr::unary(
            UnaryOp::Negate,
            ValueExpr::unary(UnaryOp::Negate, ValueExpr::number(1.0)),
        );
        assert!(matches!(
            walker.compile_and_run(&expr),
            Err(ExecutionError::Compile(_))
        ));
    }

    #[test]
    fn test_division_by_zero() {
        let expr = ValueExpr::binary(BinaryOp::Divide, ValueExpr::number(1.0), ValueExpr::number(0.0));

        let strict = TreeWalker::default();
        assert!(matches!(
            strict.compile_and_run(&expr),
            Err(ExecutionError::Runtime(_))
        ));

        let lenient = TreeWalker::new(256, false);
        assert_eq!(lenient.compile_and_run(&expr), Ok(f64::INFINITY));
    }
}
