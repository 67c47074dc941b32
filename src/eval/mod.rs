//! # Evaluation
//!
//! Evaluation turns a grouped [`Expression`](crate::ast::Expression) graph into values.
//!
//! * [`symbol`]: the per-category runtime values ([`Symbol`](symbol::Symbol)) and the
//!   capability set a node evaluates to ([`SymbolSet`](symbol::SymbolSet))
//! * [`algebra`]: how each category combines its operands (lifting, composition, pipelines)
//! * [`value`]: the materializable value expression a resolved noun carries
//! * [`evaluator`]: the memoized, cycle-guarded graph walk and the per-id driver
//! * [`adapter`]: the boundary that turns a value expression into a number

pub mod adapter;
pub mod algebra;
pub mod evaluator;
pub mod symbol;
pub mod value;

use thiserror::Error;

use crate::ast::ExprId;
use crate::vocabulary::category::{Category, CategorySet};

pub use adapter::{ExecutionAdapter, ExecutionError, TreeWalker};
pub use evaluator::{interpret, Evaluator, Interpretation};
pub use symbol::{Symbol, SymbolContext, SymbolSet};
pub use value::{BinaryOp, UnaryOp, ValueExpr};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Category error: expected {expected}, found {found}")]
    Category {
        expected: CategorySet,
        found: CategorySet,
    },
    #[error("Unsupported operator: {category} '{name}' has no implementation")]
    UnsupportedOperator { name: String, category: Category },
    #[error("Expression of kind {kind} cannot be evaluated")]
    NotEvaluable { kind: String },
    #[error("Group with {children} children cannot be evaluated")]
    Malformed { children: usize },
    #[error("Reference cycle through '{id}'")]
    Cycle { id: ExprId },
    #[error("Unknown reference: {id}")]
    UnknownReference { id: ExprId },
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),
}

pub type EvalResult<T> = Result<T, EvalError>;
