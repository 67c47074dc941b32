use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use crate::analyzer::rules::{GrammarRule, GrammarRules};
use crate::tokenizer::token::DEFAULT_MAX_TOKENS;
use crate::vocabulary::category::{Category, CategorySet};
use crate::vocabulary::keyword::{KeywordTable, KeywordVariant};
use crate::vocabulary::standard::builtin;
use crate::vocabulary::{TableError, TableResult};
use crate::{Error, InternalResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Tried in order; the first rule matching the sequence prefix wins.
    #[serde(default = "default_grammar")]
    pub grammar: Vec<RuleConfig>,

    #[serde(default = "default_max_expression_depth")]
    pub max_expression_depth: usize,

    #[serde(default = "default_true")]
    pub reject_non_finite: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            grammar: default_grammar(),
            max_expression_depth: default_max_expression_depth(),
            reject_non_finite: default_true(),
        }
    }
}

impl CompilerConfig {
    pub fn rules(&self) -> TableResult<GrammarRules> {
        let rules = self
            .grammar
            .iter()
            .map(|rule| GrammarRule::parse(&rule.pattern, rule.result))
            .collect::<TableResult<Vec<_>>>()?;
        Ok(GrammarRules::new(rules))
    }
}

/// `{ "pattern": "noun dyad noun", "result": ["noun"] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub pattern: String,
    pub result: CategorySet,
}

impl From<&GrammarRule> for RuleConfig {
    fn from(rule: &GrammarRule) -> Self {
        let pattern = rule
            .pattern()
            .iter()
            .map(Category::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            pattern,
            result: rule.result(),
        }
    }
}

/// Keyword table file: spelling → variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableConfig {
    pub spellings: BTreeMap<String, Vec<VariantConfig>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub category: Category,
    /// Name of the builtin implementing this variant; declared-only when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builtin: Option<String>,
}

impl VariantConfig {
    fn build(&self) -> TableResult<KeywordVariant> {
        let mut variant = match &self.builtin {
            Some(name) => {
                let symbol = builtin(name)
                    .ok_or_else(|| TableError::UnknownBuiltin { name: name.clone() })?;
                if symbol.category() != self.category {
                    return Err(TableError::BuiltinCategoryMismatch {
                        name: name.clone(),
                        declared: self.category,
                        actual: symbol.category(),
                    });
                }
                KeywordVariant::implemented(self.name.clone(), symbol)
            }
            None => KeywordVariant::declared(self.name.clone(), self.category),
        };
        variant.aliases.extend(self.aliases.iter().cloned());
        Ok(variant)
    }
}

impl TableConfig {
    pub fn build(&self) -> TableResult<KeywordTable> {
        let entries = self
            .spellings
            .iter()
            .map(|(spelling, variants)| {
                let variants = variants
                    .iter()
                    .map(VariantConfig::build)
                    .collect::<TableResult<Vec<_>>>()?;
                Ok((spelling.clone(), variants))
            })
            .collect::<TableResult<Vec<_>>>()?;
        KeywordTable::new(entries)
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::config(format!("Failed to open {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", path.display(), e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> InternalResult<T> {
    let config =
        serde_json::from_str(s).map_err(|e| Error::config(format!("Failed to parse: {}", e)))?;
    Ok(config)
}

fn default_max_tokens() -> usize {
    DEFAULT_MAX_TOKENS
}
fn default_grammar() -> Vec<RuleConfig> {
    GrammarRules::standard().iter().map(RuleConfig::from).collect()
}
fn default_max_expression_depth() -> usize {
    256
}
fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CompilerConfig = from_str("{}").unwrap();
        assert_eq!(config, CompilerConfig::default());
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.rules().unwrap(), GrammarRules::standard());
    }

    #[test]
    fn test_custom_grammar() {
        let config: CompilerConfig = from_str(
            r#"{
                "max_tokens": 10,
                "grammar": [
                    {"pattern": "monad noun", "result": ["noun"]},
                    {"pattern": "dyad adverb", "result": ["monad", "dyad"]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.max_tokens, 10);
        let rules = config.rules().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(
            rules.iter().last().unwrap().to_string(),
            "dyad adverb -> {monad, dyad}"
        );
    }

    #[test]
    fn test_invalid_grammar_rule() {
        let config: CompilerConfig =
            from_str(r#"{"grammar": [{"pattern": "noun adjective", "result": ["noun"]}]}"#)
                .unwrap();
        assert!(matches!(
            config.rules(),
            Err(TableError::InvalidRule { .. })
        ));
    }

    #[test]
    fn test_single_category_rule_is_rejected() {
        let config: CompilerConfig =
            from_str(r#"{"grammar": [{"pattern": "noun", "result": ["noun"]}]}"#).unwrap();
        assert_eq!(
            config.rules().unwrap_err(),
            TableError::InvalidRule {
                rule: "noun".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let result: InternalResult<CompilerConfig> = from_str("{ not json");
        assert!(matches!(result, Err(Error::Config(_))));
        let result: InternalResult<CompilerConfig> = from_file("/nonexistent/mango.json");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_table_config_builds_table() {
        let config: TableConfig = from_str(
            r#"{
                "-": [
                    {"name": "negate", "category": "monad", "builtin": "negate"},
                    {"name": "difference", "aliases": ["minus"], "category": "dyad", "builtin": "difference"}
                ],
                "@": [{"name": "insert", "category": "adverb"}]
            }"#,
        )
        .unwrap();
        let table = config.build().unwrap();
        assert_eq!(
            table.categories("-"),
            CategorySet::from([Category::Monad, Category::Dyad])
        );
        assert!(table.symbols("-").has_dyad());
        assert!(!table.symbols("@").categories().contains(Category::Adverb));
        let (spelling, variant) = table.find_by_name("minus").unwrap();
        assert_eq!(spelling, "-");
        assert_eq!(variant.name, "difference");
    }

    #[test]
    fn test_table_config_rejects_bad_builtins() {
        let unknown: TableConfig =
            from_str(r#"{"?": [{"name": "mystery", "category": "monad", "builtin": "mystery"}]}"#)
                .unwrap();
        assert_eq!(
            unknown.build().unwrap_err(),
            TableError::UnknownBuiltin {
                name: "mystery".to_string()
            }
        );

        let mismatched: TableConfig =
            from_str(r#"{"+": [{"name": "sum", "category": "monad", "builtin": "sum"}]}"#)
                .unwrap();
        assert_eq!(
            mismatched.build().unwrap_err(),
            TableError::BuiltinCategoryMismatch {
                name: "sum".to_string(),
                declared: Category::Monad,
                actual: Category::Dyad,
            }
        );
    }
}
