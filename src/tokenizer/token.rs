use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::ExprId;
use crate::vocabulary::keyword::KeywordTable;

use super::literal::{scan_identifier, scan_number};
use super::trie::KeywordTrie;

pub const DEFAULT_MAX_TOKENS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Token {
    Keyword(String),
    Identifier(String),
    Number(f64),
    /// Another named expression.
    Reference(ExprId),
    /// Free text typed mid-structure, tokenized when grouped.
    Search(String),
}

/// A token with its byte range in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpan {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}

/// Splits source text into tokens.
///
/// Built once per keyword table; the trie is immutable afterwards, so a tokenizer can be
/// shared read-only between any number of compilations.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    table: Arc<KeywordTable>,
    trie: KeywordTrie,
    max_tokens: usize,
}

impl Tokenizer {
    pub fn new(table: Arc<KeywordTable>) -> Self {
        let trie = KeywordTrie::new(&table);
        Self {
            table,
            trie,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    #[tracing::instrument(level = "debug", skip(self, source))]
    pub fn tokenize(&self, source: &str) -> LexResult<Vec<Token>> {
        Ok(self
            .tokenize_spans(source)?
            .into_iter()
            .map(|span| span.token)
            .collect())
    }

    pub fn tokenize_spans(&self, source: &str) -> LexResult<Vec<TokenSpan>> {
        let mut tokens = Vec::new();
        let mut position = 0;

        while position < source.len() {
            if tokens.len() >= self.max_tokens {
                let error = LexError::TokenLimitExceeded {
                    limit: self.max_tokens,
                };
                tracing::error!("{}", error);
                return Err(error);
            }

            let remaining = &source[position..];
            let (token, consumed) = self.next_token(remaining).ok_or_else(|| {
                let ch = remaining.chars().next().unwrap_or_default();
                let error = LexError::UnexpectedChar {
                    ch,
                    position: source[..position].chars().count(),
                };
                tracing::error!("{}", error);
                error
            })?;

            tokens.push(TokenSpan {
                token,
                start: position,
                end: position + consumed,
            });
            position += consumed;
        }

        Ok(tokens)
    }

    fn next_token(&self, input: &str) -> Option<(Token, usize)> {
        if let Some((spelling, len)) = self.trie.longest_match(input) {
            return Some((Token::Keyword(spelling.to_string()), len));
        }
        if let Ok((rest, value)) = scan_number(input) {
            return Some((Token::Number(value), input.len() - rest.len()));
        }
        if let Ok((rest, id)) = scan_identifier(input) {
            return Some((Token::Identifier(id), input.len() - rest.len()));
        }
        None
    }
}

/// Prints keyword, number and identifier tokens back to source text.
pub fn print_tokens(tokens: &[Token]) -> LexResult<String> {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Keyword(spelling) => out.push_str(spelling),
            Token::Number(value) => out.push_str(&value.to_string()),
            Token::Identifier(id) => out.push_str(id),
            other => {
                return Err(LexError::Unprintable {
                    token: format!("{:?}", other),
                })
            }
        }
    }
    Ok(out)
}

pub type LexResult<T> = Result<T, LexError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// `position` counts characters, not bytes.
    #[error("Unexpected character {ch:?} at position {position}")]
    UnexpectedChar { ch: char, position: usize },
    #[error("Token limit of {limit} exceeded")]
    TokenLimitExceeded { limit: usize },
    #[error("Token cannot be printed: {token}")]
    Unprintable { token: String },
}
