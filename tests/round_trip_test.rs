//! Property-based tests for printing and re-tokenizing token sequences.

use std::sync::Arc;

use mango::tokenizer::token::{print_tokens, Token, Tokenizer};
use mango::vocabulary::standard_table;
use proptest::prelude::*;

fn tokenizer() -> Tokenizer {
    Tokenizer::new(Arc::new(standard_table().unwrap()))
}

/// A number or identifier.
fn atom_strategy() -> impl Strategy<Value = Token> {
    prop_oneof![
        (0u32..1_000_000).prop_map(|n| Token::Number(f64::from(n) / 100.0)),
        "[a-z][a-z0-9]{0,6}".prop_map(Token::Identifier),
    ]
}

fn keyword_strategy() -> impl Strategy<Value = Token> {
    let spellings = standard_table()
        .unwrap()
        .spellings()
        .map(str::to_string)
        .collect::<Vec<_>>();
    prop::sample::select(spellings).prop_map(Token::Keyword)
}

/// Atoms separated by keywords, so that no two adjacent tokens can merge.
fn sequence_strategy() -> impl Strategy<Value = Vec<Token>> {
    (
        atom_strategy(),
        prop::collection::vec((keyword_strategy(), atom_strategy()), 0..12),
    )
        .prop_map(|(first, rest)| {
            let mut tokens = vec![first];
            for (keyword, atom) in rest {
                tokens.push(keyword);
                tokens.push(atom);
            }
            tokens
        })
}

proptest! {
    #[test]
    fn test_print_then_tokenize_is_identity(tokens in sequence_strategy()) {
        let printed = print_tokens(&tokens).unwrap();
        let reparsed = tokenizer().tokenize(&printed).unwrap();
        prop_assert_eq!(reparsed, tokens);
    }

    #[test]
    fn test_keyword_runs_round_trip(keywords in prop::collection::vec(keyword_strategy(), 1..8)) {
        // Adjacent keywords may fuse into a longer spelling; the text itself must survive.
        let printed = print_tokens(&keywords).unwrap();
        let reparsed = tokenizer().tokenize(&printed).unwrap();
        prop_assert_eq!(print_tokens(&reparsed).unwrap(), printed);
    }
}
