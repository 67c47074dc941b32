//! The standard vocabulary.
//!
//! Operators with a runtime implementation are looked up by name through
//! [`builtin`], which is also how table files bind implementations.

use crate::eval::algebra::{binary, identity, pipeline, reflex, unary};
use crate::eval::symbol::Symbol;
use crate::eval::value::{BinaryOp, UnaryOp};

use super::category::Category;
use super::keyword::{KeywordTable, KeywordVariant};
use super::{TableError, TableResult};

/// Implementation of a named builtin operator.
pub fn builtin(name: &str) -> Option<Symbol> {
    let symbol = match name {
        "identity" => identity(),
        "pipeline" => pipeline(),
        "reflex" => reflex(),
        "negate" => unary(UnaryOp::Negate),
        "reciprocal" => unary(UnaryOp::Reciprocal),
        "floor" => unary(UnaryOp::Floor),
        "ceiling" => unary(UnaryOp::Ceiling),
        "sum" => binary(BinaryOp::Add),
        "difference" => binary(BinaryOp::Subtract),
        "product" => binary(BinaryOp::Multiply),
        "quotient" => binary(BinaryOp::Divide),
        "lesser_of" => binary(BinaryOp::Min),
        "larger_of" => binary(BinaryOp::Max),
        _ => return None,
    };
    Some(symbol)
}

fn implemented(name: &str, aliases: &[&str]) -> TableResult<KeywordVariant> {
    let symbol = builtin(name).ok_or_else(|| TableError::UnknownBuiltin {
        name: name.to_string(),
    })?;
    Ok(KeywordVariant::implemented(name, symbol).with_aliases(aliases))
}

fn declared(name: &str, category: Category, aliases: &[&str]) -> KeywordVariant {
    KeywordVariant::declared(name, category).with_aliases(aliases)
}

pub fn standard_table() -> TableResult<KeywordTable> {
    KeywordTable::new([
        ("#", vec![implemented("identity", &["same"])?]),
        (" ", vec![implemented("pipeline", &[])?]),
        ("*", vec![implemented("product", &["multiply", "times"])?]),
        (
            "<.",
            vec![
                implemented("floor", &[])?,
                implemented("lesser_of", &["min"])?,
            ],
        ),
        (
            ">.",
            vec![
                implemented("ceiling", &[])?,
                implemented("larger_of", &["max"])?,
            ],
        ),
        ("+", vec![implemented("sum", &["add", "plus"])?]),
        (
            "/",
            vec![
                implemented("quotient", &["divide"])?,
                implemented("reciprocal", &["inverse"])?,
            ],
        ),
        (
            "-",
            vec![
                implemented("negate", &[])?,
                implemented("difference", &["subtract", "minus"])?,
            ],
        ),
        ("@", vec![declared("insert", Category::Adverb, &["reduce", "together"])]),
        ("~", vec![implemented("reflex", &["self"])?]),
        (
            "[",
            vec![
                declared("first", Category::Monad, &["head"]),
                declared("take", Category::Dyad, &[]),
            ],
        ),
        (
            "]",
            vec![
                declared("last", Category::Monad, &[]),
                declared("take_last", Category::Dyad, &[]),
            ],
        ),
        (
            "]:",
            vec![
                declared("tail", Category::Monad, &[]),
                declared("drop", Category::Dyad, &[]),
            ],
        ),
        ("[.", vec![declared("nth", Category::Dyad, &[])]),
        (
            "+:",
            vec![
                declared("integers", Category::Monad, &[]),
                declared("range", Category::Dyad, &[]),
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::category::CategorySet;

    #[test]
    fn test_standard_table_builds() {
        let table = standard_table().unwrap();
        assert_eq!(table.len(), 15);
        assert_eq!(
            table.categories("-"),
            CategorySet::from([Category::Monad, Category::Dyad])
        );
        assert_eq!(table.categories(" "), CategorySet::single(Category::Conjunction));
        assert_eq!(table.categories("@"), CategorySet::single(Category::Adverb));
    }

    #[test]
    fn test_every_spelling_has_categories() {
        let table = standard_table().unwrap();
        for spelling in table.spellings() {
            assert!(!table.categories(spelling).is_empty(), "{spelling:?}");
        }
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(builtin("sum").unwrap().category(), Category::Dyad);
        assert_eq!(builtin("reflex").unwrap().category(), Category::Adverb);
        assert!(builtin("insert").is_none());
    }
}
