use crate::tokenizer::token::Token;
use crate::vocabulary::category::CategorySet;

/// An element of a sequence being reduced.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Token(Token),
    Group(GroupNode),
    Stub(Stub),
}

/// A reduced window of nodes.
///
/// Groups built by the reducer carry the matched rule's result categories. Groups
/// supplied by a caller may leave them unresolved; their categories are then those of
/// the first node their children reduce to.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    pub children: Vec<Node>,
    pub categories: Option<CategorySet>,
}

/// Placeholder for an already-typed subtree during live editing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stub {
    pub categories: CategorySet,
    pub index: usize,
}

impl Node {
    pub fn keyword(spelling: &str) -> Self {
        Node::Token(Token::Keyword(spelling.to_string()))
    }

    pub fn number(value: f64) -> Self {
        Node::Token(Token::Number(value))
    }

    pub fn reference(id: &str) -> Self {
        Node::Token(Token::Reference(id.to_string()))
    }

    pub fn search(text: &str) -> Self {
        Node::Token(Token::Search(text.to_string()))
    }

    pub fn group(children: Vec<Node>) -> Self {
        Node::Group(GroupNode {
            children,
            categories: None,
        })
    }

    pub fn stub(categories: CategorySet, index: usize) -> Self {
        Node::Stub(Stub { categories, index })
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            Node::Group(group) => Some(group),
            _ => None,
        }
    }
}

impl From<Token> for Node {
    fn from(token: Token) -> Self {
        Node::Token(token)
    }
}
