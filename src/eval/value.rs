use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Unary operators a value expression can apply.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UnaryOp {
    Negate,
    Reciprocal,
    Floor,
    Ceiling,
}

impl UnaryOp {
    pub fn apply(self, operand: f64) -> f64 {
        match self {
            UnaryOp::Negate => -operand,
            UnaryOp::Reciprocal => 1.0 / operand,
            UnaryOp::Floor => operand.floor(),
            UnaryOp::Ceiling => operand.ceil(),
        }
    }
}

/// Binary operators. Arithmetic ones render infix with their symbol.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
    #[strum(serialize = "min")]
    Min,
    #[strum(serialize = "max")]
    Max,
}

impl BinaryOp {
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Subtract => left - right,
            BinaryOp::Multiply => left * right,
            BinaryOp::Divide => left / right,
            BinaryOp::Min => left.min(right),
            BinaryOp::Max => left.max(right),
        }
    }

    fn is_infix(self) -> bool {
        !matches!(self, BinaryOp::Min | BinaryOp::Max)
    }
}

/// A materializable value expression, produced by unwrapping a noun.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ValueExpr {
    Number {
        value: f64,
    },
    Unary {
        op: UnaryOp,
        operand: Box<ValueExpr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<ValueExpr>,
        right: Box<ValueExpr>,
    },
}

impl ValueExpr {
    pub fn number(value: f64) -> Self {
        ValueExpr::Number { value }
    }

    pub fn unary(op: UnaryOp, operand: ValueExpr) -> Self {
        ValueExpr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: ValueExpr, right: ValueExpr) -> Self {
        ValueExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Nesting depth; a bare number has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            ValueExpr::Number { .. } => 1,
            ValueExpr::Unary { operand, .. } => 1 + operand.depth(),
            ValueExpr::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl fmt::Display for ValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpr::Number { value } => write!(f, "{}", value),
            ValueExpr::Unary {
                op: UnaryOp::Negate,
                operand,
            } => write!(f, "-({})", operand),
            ValueExpr::Unary { op, operand } => write!(f, "{}({})", op, operand),
            ValueExpr::Binary { op, left, right } if op.is_infix() => {
                write!(f, "({} {} {})", left, op, right)
            }
            ValueExpr::Binary { op, left, right } => write!(f, "{}({}, {})", op, left, right),
        }
    }
}
