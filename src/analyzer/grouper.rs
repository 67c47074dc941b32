//! Category resolution and anchored pattern reduction.
//!
//! The reducer only ever tests the *prefix* of the current sequence. It tries the
//! grammar rules in declared order, folds the first matching prefix window into a
//! group, and starts over on the shortened sequence. It never tries another bracketing
//! and never looks for a match at a later offset, so an early reduction choice is
//! final. A sequence that stops with more than one element is incomplete, not broken.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::ast::{ExprId, ReferenceLookup};
use crate::tokenizer::token::{Token, Tokenizer};
use crate::vocabulary::category::{Category, CategorySet};

use super::node::{GroupNode, Node};
use super::rules::{GrammarRule, GrammarRules};
use super::{GroupError, GroupResult};

pub struct Grouper<'a> {
    tokenizer: &'a Tokenizer,
    rules: &'a GrammarRules,
    references: &'a dyn ReferenceLookup,
    resolving: RefCell<Vec<ExprId>>,
    resolved: RefCell<HashMap<ExprId, GroupResult<CategorySet>>>,
}

impl<'a> Grouper<'a> {
    pub fn new(
        tokenizer: &'a Tokenizer,
        rules: &'a GrammarRules,
        references: &'a dyn ReferenceLookup,
    ) -> Self {
        Self {
            tokenizer,
            rules,
            references,
            resolving: RefCell::new(Vec::new()),
            resolved: RefCell::new(HashMap::new()),
        }
    }

    /// Grammatical categories of a node.
    pub fn categories_of(&self, node: &Node) -> GroupResult<CategorySet> {
        match node {
            Node::Token(Token::Keyword(spelling)) => {
                Ok(self.tokenizer.table().categories(spelling))
            }
            Node::Token(Token::Number(_)) => Ok(CategorySet::single(Category::Noun)),
            Node::Token(Token::Reference(id)) => self.categories_of_reference(id),
            Node::Token(Token::Identifier(_) | Token::Search(_)) => Ok(CategorySet::empty()),
            Node::Group(GroupNode {
                categories: Some(categories),
                ..
            }) => Ok(*categories),
            Node::Group(GroupNode { children, .. }) => {
                let reduced = self.reduce(children.clone())?;
                match reduced.first() {
                    Some(first) => self.categories_of(first),
                    None => Ok(CategorySet::empty()),
                }
            }
            Node::Stub(stub) => Ok(stub.categories),
        }
    }

    /// Categories of a named expression, resolved once per grouper.
    fn categories_of_reference(&self, id: &str) -> GroupResult<CategorySet> {
        if let Some(resolved) = self.resolved.borrow().get(id) {
            return resolved.clone();
        }
        if self.resolving.borrow().iter().any(|visiting| visiting == id) {
            return Err(GroupError::Cycle { id: id.to_string() });
        }
        let expression = self
            .references
            .lookup(id)
            .ok_or_else(|| GroupError::UnknownReference { id: id.to_string() })?;

        self.resolving.borrow_mut().push(id.to_string());
        let result = self.categories_of(&expression.to_node());
        self.resolving.borrow_mut().pop();

        self.resolved
            .borrow_mut()
            .insert(id.to_string(), result.clone());
        result
    }

    /// Reduces `nodes` as far as the grammar allows.
    ///
    /// Search placeholders are tokenized in place first. The result is a single node
    /// when the sequence reduced completely; anything longer is an incomplete grouping.
    #[tracing::instrument(level = "debug", skip_all, fields(len = nodes.len()))]
    pub fn reduce(&self, nodes: Vec<Node>) -> GroupResult<Vec<Node>> {
        let mut nodes = self.expand_searches(nodes)?;

        while let Some(rule) = self.match_prefix(&nodes)? {
            let rest = nodes.split_off(rule.len());
            tracing::trace!("matched {}", rule);
            let group = Node::Group(GroupNode {
                children: nodes,
                categories: Some(rule.result()),
            });
            nodes = std::iter::once(group).chain(rest).collect();
            if nodes.len() == 1 {
                break;
            }
        }

        Ok(nodes)
    }

    /// Like [`reduce`](Self::reduce), but an incomplete grouping is an error.
    pub fn reduce_to_one(&self, nodes: Vec<Node>) -> GroupResult<Node> {
        let mut reduced = self.reduce(nodes)?;
        match reduced.len() {
            0 => Err(GroupError::Empty),
            1 => Ok(reduced.remove(0)),
            remaining => Err(GroupError::Incomplete { remaining }),
        }
    }

    fn expand_searches(&self, nodes: Vec<Node>) -> GroupResult<Vec<Node>> {
        let mut expanded = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                Node::Token(Token::Search(text)) => expanded.extend(
                    self.tokenizer
                        .tokenize(&text)?
                        .into_iter()
                        .map(Node::Token),
                ),
                other => expanded.push(other),
            }
        }
        Ok(expanded)
    }

    /// First rule, in declared order, whose pattern matches the sequence's prefix.
    ///
    /// Rules shorter than two elements never match, since folding them would not
    /// shorten the sequence.
    fn match_prefix(&self, nodes: &[Node]) -> GroupResult<Option<&'a GrammarRule>> {
        let mut categories: Vec<Option<CategorySet>> = vec![None; nodes.len()];
        'rules: for rule in self.rules.iter() {
            if rule.len() < 2 || rule.len() > nodes.len() {
                continue;
            }
            for (position, category) in rule.pattern().iter().enumerate() {
                let found = match categories[position] {
                    Some(found) => found,
                    None => {
                        let found = self.categories_of(&nodes[position])?;
                        categories[position] = Some(found);
                        found
                    }
                };
                if !found.contains(*category) {
                    continue 'rules;
                }
            }
            return Ok(Some(rule));
        }
        Ok(None)
    }
}
