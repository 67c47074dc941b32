use std::collections::HashMap;

use crate::vocabulary::keyword::KeywordTable;

#[derive(Debug, Default, Clone)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    terminal: Option<String>,
}

/// Character trie over every spelling in a [`KeywordTable`].
#[derive(Debug, Default, Clone)]
pub struct KeywordTrie {
    root: TrieNode,
}

impl KeywordTrie {
    pub fn new(table: &KeywordTable) -> Self {
        let mut trie = Self::default();
        for spelling in table.spellings() {
            trie.insert(spelling);
        }
        trie
    }

    fn insert(&mut self, spelling: &str) {
        let mut node = &mut self.root;
        for c in spelling.chars() {
            node = node.children.entry(c).or_default();
        }
        node.terminal = Some(spelling.to_string());
    }

    /// Longest spelling that prefixes `input`, with its length in bytes.
    ///
    /// Walks as deep as the input allows and keeps the deepest terminal seen, so a
    /// multi-character keyword always wins over a shorter keyword it extends.
    pub fn longest_match(&self, input: &str) -> Option<(&str, usize)> {
        let mut node = &self.root;
        let mut best = None;
        for (offset, c) in input.char_indices() {
            match node.children.get(&c) {
                Some(next) => node = next,
                None => break,
            }
            if let Some(spelling) = &node.terminal {
                best = Some((spelling.as_str(), offset + c.len_utf8()));
            }
        }
        best
    }
}
