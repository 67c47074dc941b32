//! # Tokenizer Component
//!
//! The tokenizer turns source text into a flat token sequence for the
//! [`analyzer`](crate::analyzer).
//!
//! ## Scanning Strategy
//!
//! At each position the tokenizer tries, in order:
//!
//! 1. **Keywords**: a longest-match walk of the [`KeywordTrie`](trie::KeywordTrie) built from the
//!    keyword table. `]:` is one token even though `]` is a keyword too.
//! 2. **Numbers**: a digit followed by digits and `.` separators ([`literal::scan_number`]).
//! 3. **Identifiers**: a lowercase letter followed by letters and digits
//!    ([`literal::scan_identifier`]).
//!
//! Anything else is a [`LexError`](token::LexError). Whitespace is not skipped: a space is
//! itself a keyword (the pipeline conjunction) in the standard table.
//!
//! ## Component Structure
//!
//! * [`token`]: [`Token`](token::Token), the [`Tokenizer`](token::Tokenizer) and token printing
//! * [`trie`]: the keyword trie
//! * [`literal`]: number and identifier scanners
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mango::tokenizer::token::{Token, Tokenizer};
//! use mango::vocabulary::standard_table;
//!
//! let tokenizer = Tokenizer::new(Arc::new(standard_table().unwrap()));
//! let tokens = tokenizer.tokenize("3+4").unwrap();
//! assert_eq!(tokens[1], Token::Keyword("+".to_string()));
//! ```

pub mod literal;
pub mod token;
pub mod trie;

pub use token::{print_tokens, LexError, LexResult, Token, TokenSpan, Tokenizer};
