use std::fmt;
use std::str::FromStr;

use crate::vocabulary::category::{Category, CategorySet};
use crate::vocabulary::{TableError, TableResult};

/// A category pattern and the categories of the group it produces.
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarRule {
    pattern: Vec<Category>,
    result: CategorySet,
}

impl GrammarRule {
    pub fn new(pattern: Vec<Category>, result: CategorySet) -> Self {
        Self { pattern, result }
    }

    /// Parses a space-separated pattern such as `"noun dyad noun"`.
    ///
    /// A pattern must span at least two categories.
    pub fn parse(pattern: &str, result: CategorySet) -> TableResult<Self> {
        let invalid = || TableError::InvalidRule {
            rule: pattern.to_string(),
        };
        let categories = pattern
            .split_whitespace()
            .map(|name| Category::from_str(name).map_err(|_| invalid()))
            .collect::<TableResult<Vec<_>>>()?;
        if categories.len() < 2 || result.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(categories, result))
    }

    pub fn pattern(&self) -> &[Category] {
        &self.pattern
    }

    pub fn result(&self) -> CategorySet {
        self.result
    }

    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }
}

impl fmt::Display for GrammarRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.pattern.iter().map(Category::as_ref).collect::<Vec<_>>();
        write!(f, "{} -> {}", names.join(" "), self.result)
    }
}

/// Grammar rules in the order they are tried.
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarRules {
    rules: Vec<GrammarRule>,
}

impl GrammarRules {
    pub fn new(rules: Vec<GrammarRule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        use Category::*;
        let rule = |pattern: &[Category], result: &[Category]| {
            GrammarRule::new(pattern.to_vec(), result.iter().copied().collect())
        };
        Self::new(vec![
            rule(&[Monad, Dyad, Monad], &[Monad]),
            rule(&[Noun, Dyad, Noun], &[Noun]),
            rule(&[Noun, Dyad, Monad], &[Monad]),
            rule(&[Monad, Dyad, Noun], &[Monad]),
            rule(&[Monad, Noun], &[Noun]),
            rule(&[Monad, Adverb], &[Monad, Dyad]),
            rule(&[Dyad, Adverb], &[Monad, Dyad]),
            rule(&[Dyad, Monad], &[Monad, Dyad]),
            rule(&[Noun, Conjunction, Monad], &[Noun]),
            rule(&[Monad, Conjunction, Monad], &[Monad]),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &GrammarRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for GrammarRules {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rule() {
        let rule = GrammarRule::parse(
            "noun conjunction monad",
            CategorySet::single(Category::Noun),
        )
        .unwrap();
        assert_eq!(
            rule.pattern(),
            &[Category::Noun, Category::Conjunction, Category::Monad]
        );
        assert_eq!(rule.to_string(), "noun conjunction monad -> {noun}");
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        let err = GrammarRule::parse("noun verb", CategorySet::single(Category::Noun)).unwrap_err();
        assert_eq!(
            err,
            TableError::InvalidRule {
                rule: "noun verb".to_string()
            }
        );
        assert!(GrammarRule::parse("", CategorySet::single(Category::Noun)).is_err());
        assert_eq!(
            GrammarRule::parse("noun", CategorySet::single(Category::Noun)).unwrap_err(),
            TableError::InvalidRule {
                rule: "noun".to_string()
            }
        );
        assert!(GrammarRule::parse("noun", CategorySet::empty()).is_err());
    }

    #[test]
    fn test_standard_order() {
        let rules = GrammarRules::standard();
        assert_eq!(rules.len(), 10);
        let first_two = rules.iter().take(2).map(|r| r.to_string()).collect::<Vec<_>>();
        assert_eq!(
            first_two,
            vec!["monad dyad monad -> {monad}", "noun dyad noun -> {noun}"]
        );
    }
}
