//! # Analyzer
//!
//! Groups a flat token sequence into a tree by part of speech instead of operator
//! precedence. The [`Grouper`](grouper::Grouper) resolves each element's categories
//! (recursing through references and unresolved groups) and folds the sequence
//! prefix-first using an ordered table of [`GrammarRules`](rules::GrammarRules).
//!
//! * [`node`]: the sequence elements ([`Node`](node::Node), [`GroupNode`](node::GroupNode), stubs)
//! * [`rules`]: grammar rules and the standard rule table
//! * [`grouper`]: category resolution and reduction

pub mod grouper;
pub mod node;
pub mod rules;

use thiserror::Error;

use crate::ast::ExprId;
use crate::tokenizer::token::LexError;

pub use grouper::Grouper;
pub use node::{GroupNode, Node, Stub};
pub use rules::{GrammarRule, GrammarRules};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroupError {
    #[error("Incomplete grouping: {remaining} elements remain")]
    Incomplete { remaining: usize },
    #[error("Nothing to group")]
    Empty,
    #[error("Reference cycle through '{id}'")]
    Cycle { id: ExprId },
    #[error("Unknown reference: {id}")]
    UnknownReference { id: ExprId },
    #[error("Unresolved identifier: {name}")]
    UnresolvedIdentifier { name: String },
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),
}

pub type GroupResult<T> = Result<T, GroupError>;
