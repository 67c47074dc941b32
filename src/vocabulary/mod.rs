//! # Vocabulary
//!
//! The keyword table: every spelling the tokenizer recognizes, mapped to one or more
//! category variants. A spelling may be a homonym (`-` is both the monad *negate*
//! and the dyad *difference*), so the categories of a keyword token are the union
//! of its variants' categories.
//!
//! * [`category`]: [`Category`](category::Category) and [`CategorySet`](category::CategorySet)
//! * [`keyword`]: [`KeywordVariant`](keyword::KeywordVariant) and [`KeywordTable`](keyword::KeywordTable)
//! * [`standard`]: the standard table and the builtin implementation registry

pub mod category;
pub mod keyword;
pub mod standard;

use thiserror::Error;

pub use category::{Category, CategorySet};
pub use keyword::{KeywordTable, KeywordVariant};
pub use standard::{builtin, standard_table};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Keyword spelling must not be empty")]
    EmptySpelling,
    #[error("Keyword '{spelling}' has no variants")]
    NoVariants { spelling: String },
    #[error("Keyword '{spelling}' declares {category} more than once")]
    DuplicateCategory { spelling: String, category: Category },
    #[error("Unknown builtin: {name}")]
    UnknownBuiltin { name: String },
    #[error("Builtin '{name}' is a {actual}, declared as {declared}")]
    BuiltinCategoryMismatch {
        name: String,
        declared: Category,
        actual: Category,
    },
    #[error("Invalid grammar rule: {rule}")]
    InvalidRule { rule: String },
}

pub type TableResult<T> = Result<T, TableError>;
