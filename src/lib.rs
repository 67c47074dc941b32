//! # Mango: a tacit expression compiler
//!
//! Mango compiles a small tacit language where operators have no precedence. Every
//! token has a grammatical *category* (noun, monad, dyad, conjunction, adverb) and a
//! sequence is grouped by matching category patterns, not by operator priority.
//! Combining functions with a dyad yields a new function (lifting), which is how
//! point-free definitions such as `-+#` are written.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Tokenizer → Category Resolver / Pattern Reducer → Evaluator → Execution Adapter
//! ```
//!
//! ### Stage 1: Tokenization
//!
//! The [`tokenizer`] splits source text using a longest-match trie over the keyword
//! spellings of the [`vocabulary`], falling back to number and identifier scanners.
//!
//! ### Stage 2: Grouping
//!
//! The [`analyzer`] resolves the categories of each element and folds the sequence
//! with an ordered table of grammar rules, always at the sequence prefix. The result
//! is stored as an [`ast::Expression`] in a caller-owned [`ast::ExpressionGraph`].
//!
//! ### Stage 3: Evaluation
//!
//! The [`eval`] module evaluates every id of a graph to a set of category symbols,
//! memoizing per id and failing on reference cycles. Ids that resolve to a noun are
//! handed to an [`eval::ExecutionAdapter`]; a failure only affects its own id.
//!
//! The [`compiler`] module wires the stages together; [`config`] loads limits,
//! grammar and keyword tables from JSON.

pub mod analyzer;
pub mod ast;
pub mod compiler;
pub mod config;
pub mod error;
pub mod eval;
pub mod tokenizer;
pub mod vocabulary;

// Re-exports
pub use ast::*;
pub use compiler::Compiler;
pub use error::*;

#[cfg(test)]
mod tests {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    #[ctor::ctor]
    fn init_tests() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    }
}
