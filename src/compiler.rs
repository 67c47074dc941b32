//! Source text to values.
//!
//! A [`Compiler`] owns the immutable pieces of the pipeline (tokenizer, grammar and
//! execution adapter) and runs the stages over either a caller-owned
//! [`ExpressionGraph`] or a named set of source strings.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::analyzer::grouper::Grouper;
use crate::analyzer::node::Node;
use crate::analyzer::rules::GrammarRules;
use crate::analyzer::{GroupError, GroupResult};
use crate::ast::{Expression, ExpressionGraph, ReferenceLookup};
use crate::config::CompilerConfig;
use crate::eval::adapter::{ExecutionAdapter, TreeWalker};
use crate::eval::evaluator::{interpret, Interpretation};
use crate::tokenizer::token::{LexResult, Token, Tokenizer};
use crate::vocabulary::keyword::KeywordTable;
use crate::vocabulary::standard::standard_table;
use crate::InternalResult;

pub struct Compiler {
    tokenizer: Tokenizer,
    rules: GrammarRules,
    adapter: Arc<dyn ExecutionAdapter>,
}

impl Compiler {
    pub fn new(config: &CompilerConfig, table: KeywordTable) -> InternalResult<Self> {
        let rules = config.rules()?;
        let tokenizer = Tokenizer::new(Arc::new(table)).with_max_tokens(config.max_tokens);
        let adapter = Arc::new(TreeWalker::new(
            config.max_expression_depth,
            config.reject_non_finite,
        ));
        Ok(Self {
            tokenizer,
            rules,
            adapter,
        })
    }

    /// The standard vocabulary and grammar with default limits.
    pub fn standard() -> InternalResult<Self> {
        Self::new(&CompilerConfig::default(), standard_table()?)
    }

    pub fn with_adapter(mut self, adapter: Arc<dyn ExecutionAdapter>) -> Self {
        self.adapter = adapter;
        self
    }

    pub fn table(&self) -> &KeywordTable {
        self.tokenizer.table()
    }

    pub fn rules(&self) -> &GrammarRules {
        &self.rules
    }

    pub fn tokenize(&self, source: &str) -> LexResult<Vec<Token>> {
        self.tokenizer.tokenize(source)
    }

    pub fn grouper<'a>(&'a self, references: &'a dyn ReferenceLookup) -> Grouper<'a> {
        Grouper::new(&self.tokenizer, &self.rules, references)
    }

    /// Reduces `nodes` as far as the grammar allows.
    pub fn group(
        &self,
        nodes: Vec<Node>,
        references: &dyn ReferenceLookup,
    ) -> GroupResult<Vec<Node>> {
        self.grouper(references).reduce(nodes)
    }

    /// Compiles one source string into a grouped expression.
    ///
    /// Identifiers naming an expression in `references` become references to it.
    #[tracing::instrument(level = "debug", skip(self, references))]
    pub fn parse(
        &self,
        source: &str,
        references: &dyn ReferenceLookup,
    ) -> InternalResult<Expression> {
        let tokens = link(self.tokenize(source)?, |name| {
            references.lookup(name).is_some()
        });
        let nodes = tokens.into_iter().map(Node::Token).collect();
        let node = self.grouper(references).reduce_to_one(nodes)?;
        Ok(Expression::from_node(&node)?)
    }

    pub fn interpret(&self, graph: &ExpressionGraph) -> Interpretation {
        interpret(graph, self.table(), self.adapter.as_ref())
    }

    /// Builds the grouped graph of a named set of sources.
    ///
    /// Every source is tokenized and linked first and kept as an ungrouped group, so
    /// that grouping one id can look up the categories of any other. Ids failing either
    /// stage are left out of the graph and reported in the returned interpretation.
    #[tracing::instrument(level = "debug", skip_all, fields(sources = sources.len()))]
    pub fn build_graph(
        &self,
        sources: &BTreeMap<String, String>,
    ) -> (ExpressionGraph, Interpretation) {
        let mut failed = Interpretation::default();

        let mut staged = ExpressionGraph::new();
        for (id, source) in sources {
            match self.stage(source, |name| sources.contains_key(name)) {
                Ok(expression) => staged.insert(id.clone(), expression),
                Err(error) => failed.record_failure(id, error),
            }
        }

        let mut graph = ExpressionGraph::new();
        let grouper = self.grouper(&staged);
        for (id, expression) in staged.iter() {
            let Expression::Group { children, .. } = expression else {
                continue;
            };
            let nodes = children.iter().map(Expression::to_node).collect();
            let grouped = grouper
                .reduce_to_one(nodes)
                .and_then(|node| Expression::from_node(&node));
            match grouped {
                Ok(expression) => graph.insert(id.clone(), expression),
                Err(error) => failed.record_failure(id, error),
            }
        }

        (graph, failed)
    }

    /// Compiles and evaluates a named set of sources.
    pub fn interpret_sources(&self, sources: &BTreeMap<String, String>) -> Interpretation {
        let (graph, failed) = self.build_graph(sources);
        let mut interpretation = self.interpret(&graph);
        interpretation.extend(failed);
        interpretation
    }

    fn stage(&self, source: &str, is_known: impl Fn(&str) -> bool) -> InternalResult<Expression> {
        let tokens = link(self.tokenize(source)?, is_known);
        let children = tokens
            .into_iter()
            .map(|token| Expression::from_node(&Node::Token(token)))
            .collect::<Result<Vec<_>, GroupError>>()?;
        Ok(Expression::group(children))
    }
}

/// Turns identifiers naming a known expression into references.
pub fn link(tokens: Vec<Token>, is_known: impl Fn(&str) -> bool) -> Vec<Token> {
    tokens
        .into_iter()
        .map(|token| match token {
            Token::Identifier(name) if is_known(&name) => Token::Reference(name),
            other => other,
        })
        .collect()
}
