//! The persistent expression graph.
//!
//! A caller owns an [`ExpressionGraph`] of named [`Expression`]s. Expressions nest
//! groups inline and point at other named expressions through `reference`. The graph
//! may be cyclic; the analyzer and evaluator detect re-entry instead of recursing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analyzer::node::{GroupNode, Node};
use crate::analyzer::GroupError;
use crate::tokenizer::token::Token;
use crate::vocabulary::category::CategorySet;

pub type ExprId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Expression {
    Keyword {
        keyword: String,
    },
    Number {
        value: f64,
    },
    Group {
        children: Vec<Expression>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        categories: Option<CategorySet>,
    },
    Reference {
        reference: ExprId,
    },
    Search {
        value: String,
    },
    Stub {
        categories: CategorySet,
        #[serde(default)]
        index: usize,
    },
}

impl Expression {
    pub fn keyword(spelling: &str) -> Self {
        Expression::Keyword {
            keyword: spelling.to_string(),
        }
    }

    pub fn number(value: f64) -> Self {
        Expression::Number { value }
    }

    pub fn group(children: Vec<Expression>) -> Self {
        Expression::Group {
            children,
            categories: None,
        }
    }

    pub fn reference(id: &str) -> Self {
        Expression::Reference {
            reference: id.to_string(),
        }
    }

    pub fn search(text: &str) -> Self {
        Expression::Search {
            value: text.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Keyword { .. } => "keyword",
            Expression::Number { .. } => "number",
            Expression::Group { .. } => "group",
            Expression::Reference { .. } => "reference",
            Expression::Search { .. } => "search",
            Expression::Stub { .. } => "stub",
        }
    }

    /// The reducer's view of this expression.
    pub fn to_node(&self) -> Node {
        match self {
            Expression::Keyword { keyword } => Node::Token(Token::Keyword(keyword.clone())),
            Expression::Number { value } => Node::Token(Token::Number(*value)),
            Expression::Group {
                children,
                categories,
            } => Node::Group(GroupNode {
                children: children.iter().map(Expression::to_node).collect(),
                categories: *categories,
            }),
            Expression::Reference { reference } => Node::Token(Token::Reference(reference.clone())),
            Expression::Search { value } => Node::Token(Token::Search(value.clone())),
            Expression::Stub { categories, index } => Node::stub(*categories, *index),
        }
    }

    /// Stores a reduced node. Identifiers must have been linked to references first.
    pub fn from_node(node: &Node) -> Result<Self, GroupError> {
        Ok(match node {
            Node::Token(Token::Keyword(keyword)) => Expression::keyword(keyword),
            Node::Token(Token::Number(value)) => Expression::number(*value),
            Node::Token(Token::Reference(id)) => Expression::reference(id),
            Node::Token(Token::Search(text)) => Expression::search(text),
            Node::Token(Token::Identifier(name)) => {
                return Err(GroupError::UnresolvedIdentifier { name: name.clone() })
            }
            Node::Group(group) => Expression::Group {
                children: group
                    .children
                    .iter()
                    .map(Expression::from_node)
                    .collect::<Result<_, _>>()?,
                categories: group.categories,
            },
            Node::Stub(stub) => Expression::Stub {
                categories: stub.categories,
                index: stub.index,
            },
        })
    }
}

/// Read access to named expressions.
pub trait ReferenceLookup {
    fn lookup(&self, id: &str) -> Option<&Expression>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpressionGraph {
    nodes: BTreeMap<ExprId, Expression>,
}

impl ExpressionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<ExprId>, expression: Expression) {
        self.nodes.insert(id.into(), expression);
    }

    pub fn get(&self, id: &str) -> Option<&Expression> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ExprId> {
        self.nodes.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ExprId, &Expression)> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ReferenceLookup for ExpressionGraph {
    fn lookup(&self, id: &str) -> Option<&Expression> {
        self.get(id)
    }
}

impl<I: Into<ExprId>> FromIterator<(I, Expression)> for ExpressionGraph {
    fn from_iter<T: IntoIterator<Item = (I, Expression)>>(iter: T) -> Self {
        let mut graph = ExpressionGraph::new();
        for (id, expression) in iter {
            graph.insert(id, expression);
        }
        graph
    }
}
