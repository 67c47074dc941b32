use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::eval::symbol::{Symbol, SymbolSet};

use super::category::{Category, CategorySet};
use super::{TableError, TableResult};

/// One meaning of a spelling. Homonyms share a spelling with distinct categories.
#[derive(Clone)]
pub struct KeywordVariant {
    pub name: String,
    pub aliases: BTreeSet<String>,
    pub category: Category,
    pub implementation: Option<Symbol>,
}

impl KeywordVariant {
    /// A variant with a runtime implementation; its category is the symbol's.
    pub fn implemented(name: impl Into<String>, symbol: Symbol) -> Self {
        Self {
            name: name.into(),
            aliases: BTreeSet::new(),
            category: symbol.category(),
            implementation: Some(symbol),
        }
    }

    /// A variant the grammar knows about but that cannot be evaluated.
    pub fn declared(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            aliases: BTreeSet::new(),
            category,
            implementation: None,
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|alias| alias.to_string()));
        self
    }

    pub fn is_called(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(name)
    }
}

impl fmt::Debug for KeywordVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordVariant")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("category", &self.category)
            .field("implemented", &self.implementation.is_some())
            .finish()
    }
}

/// Spelling → variants. Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    entries: BTreeMap<String, Vec<KeywordVariant>>,
}

impl KeywordTable {
    pub fn new<S: Into<String>>(
        entries: impl IntoIterator<Item = (S, Vec<KeywordVariant>)>,
    ) -> TableResult<Self> {
        let mut table = BTreeMap::new();
        for (spelling, variants) in entries {
            let spelling = spelling.into();
            Self::validate(&spelling, &variants)?;
            table.insert(spelling, variants);
        }
        Ok(Self { entries: table })
    }

    fn validate(spelling: &str, variants: &[KeywordVariant]) -> TableResult<()> {
        if spelling.is_empty() {
            return Err(TableError::EmptySpelling);
        }
        if variants.is_empty() {
            return Err(TableError::NoVariants {
                spelling: spelling.to_string(),
            });
        }
        let mut seen = CategorySet::empty();
        for variant in variants {
            if seen.contains(variant.category) {
                return Err(TableError::DuplicateCategory {
                    spelling: spelling.to_string(),
                    category: variant.category,
                });
            }
            seen.insert(variant.category);
        }
        Ok(())
    }

    pub fn variants(&self, spelling: &str) -> Option<&[KeywordVariant]> {
        self.entries.get(spelling).map(Vec::as_slice)
    }

    pub fn contains(&self, spelling: &str) -> bool {
        self.entries.contains_key(spelling)
    }

    /// Union of the categories of every variant of `spelling`; empty when unknown.
    pub fn categories(&self, spelling: &str) -> CategorySet {
        self.variants(spelling)
            .map(|variants| variants.iter().map(|v| v.category).collect())
            .unwrap_or_default()
    }

    /// Symbols of every implemented variant, with unimplemented ones recorded as declared.
    pub fn symbols(&self, spelling: &str) -> SymbolSet {
        let mut set = SymbolSet::new();
        for variant in self.variants(spelling).unwrap_or_default() {
            match &variant.implementation {
                Some(symbol) => set.insert(symbol.clone()),
                None => set.declare(variant.category, variant.name.clone()),
            }
        }
        set
    }

    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Finds the spelling carrying a variant with this name or alias.
    pub fn find_by_name(&self, name: &str) -> Option<(&str, &KeywordVariant)> {
        self.entries.iter().find_map(|(spelling, variants)| {
            variants
                .iter()
                .find(|variant| variant.is_called(name))
                .map(|variant| (spelling.as_str(), variant))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::algebra::binary;
    use crate::eval::value::BinaryOp;

    fn homonyms() -> Vec<KeywordVariant> {
        vec![
            KeywordVariant::declared("negate", Category::Monad),
            KeywordVariant::implemented("difference", binary(BinaryOp::Subtract))
                .with_aliases(&["subtract", "minus"]),
        ]
    }

    #[test]
    fn test_categories_are_union_of_variants() {
        let table = KeywordTable::new([("-", homonyms())]).unwrap();
        assert_eq!(
            table.categories("-"),
            CategorySet::from([Category::Monad, Category::Dyad])
        );
        assert!(table.categories("?").is_empty());
    }

    #[test]
    fn test_symbols_record_declared_variants() {
        let table = KeywordTable::new([("-", homonyms())]).unwrap();
        let set = table.symbols("-");
        assert!(set.has_dyad());
        assert!(!set.has_monad());
        assert!(set.offers(Category::Monad));
    }

    #[test]
    fn test_find_by_alias() {
        let table = KeywordTable::new([("-", homonyms())]).unwrap();
        let (spelling, variant) = table.find_by_name("minus").unwrap();
        assert_eq!(spelling, "-");
        assert_eq!(variant.name, "difference");
        assert!(table.find_by_name("plus").is_none());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            KeywordTable::new([("", homonyms())]).unwrap_err(),
            TableError::EmptySpelling
        );
        assert_eq!(
            KeywordTable::new([("-", vec![])]).unwrap_err(),
            TableError::NoVariants {
                spelling: "-".to_string()
            }
        );
        let duplicated = vec![
            KeywordVariant::declared("first", Category::Monad),
            KeywordVariant::declared("head", Category::Monad),
        ];
        assert_eq!(
            KeywordTable::new([("[", duplicated)]).unwrap_err(),
            TableError::DuplicateCategory {
                spelling: "[".to_string(),
                category: Category::Monad
            }
        );
    }
}
