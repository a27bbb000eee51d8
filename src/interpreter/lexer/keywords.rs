use std::sync::LazyLock;

use super::token::TokenKind;

/// Number of edges per node: one per letter plus the space edge.
const EDGE_COUNT: usize = 27;
/// Edge that joins the words of a multi-word phrase.
const SPACE_EDGE: usize = 26;

/// Every reserved phrase and the token kind it resolves to.
///
/// Words inside a phrase are separated by a single space.
pub const RESERVED_PHRASES: &[(&str, TokenKind)] = &[("int", TokenKind::IntType),
                                                     ("integer", TokenKind::IntType),
                                                     ("float", TokenKind::FloatType),
                                                     ("decimal", TokenKind::FloatType),
                                                     ("bool", TokenKind::BoolType),
                                                     ("boolean", TokenKind::BoolType),
                                                     ("string", TokenKind::StringType),
                                                     ("text", TokenKind::StringType),
                                                     ("list", TokenKind::ListType),
                                                     ("void", TokenKind::VoidType),
                                                     ("nothing", TokenKind::VoidType),
                                                     ("true", TokenKind::True),
                                                     ("false", TokenKind::False),
                                                     ("declare", TokenKind::Declare),
                                                     ("as", TokenKind::As),
                                                     ("set", TokenKind::Set),
                                                     ("to", TokenKind::To),
                                                     ("define", TokenKind::Define),
                                                     ("function", TokenKind::Function),
                                                     ("ref", TokenKind::Reference),
                                                     ("reference", TokenKind::Reference),
                                                     ("run", TokenKind::Run),
                                                     ("call", TokenKind::Run),
                                                     ("return", TokenKind::Return),
                                                     ("give", TokenKind::Return),
                                                     ("if", TokenKind::If),
                                                     ("then", TokenKind::Then),
                                                     ("else", TokenKind::Else),
                                                     ("otherwise", TokenKind::Else),
                                                     ("else if", TokenKind::ElseIf),
                                                     ("otherwise if", TokenKind::ElseIf),
                                                     ("while", TokenKind::While),
                                                     ("repeat", TokenKind::Repeat),
                                                     ("times", TokenKind::Times),
                                                     ("assert", TokenKind::Assert),
                                                     ("try", TokenKind::Try),
                                                     ("catch", TokenKind::Catch),
                                                     ("and", TokenKind::And),
                                                     ("or", TokenKind::Or),
                                                     ("xor", TokenKind::Xor),
                                                     ("is", TokenKind::Equal),
                                                     ("equals", TokenKind::Equal),
                                                     ("is equal to", TokenKind::Equal),
                                                     ("is not", TokenKind::NotEqual),
                                                     ("is not equal to", TokenKind::NotEqual),
                                                     ("is greater than", TokenKind::Greater),
                                                     ("is more than", TokenKind::Greater),
                                                     ("is at least", TokenKind::GreaterEqual),
                                                     ("is greater than or equal to", TokenKind::GreaterEqual),
                                                     ("is less than", TokenKind::Less),
                                                     ("is fewer than", TokenKind::Less),
                                                     ("is at most", TokenKind::LessEqual),
                                                     ("is less than or equal to", TokenKind::LessEqual),
                                                     ("plus", TokenKind::Plus),
                                                     ("minus", TokenKind::Minus),
                                                     ("mod", TokenKind::Modulo)];

/// The shared trie, built from [`RESERVED_PHRASES`] on first use.
pub static KEYWORDS: LazyLock<KeywordTrie> = LazyLock::new(|| KeywordTrie::new(RESERVED_PHRASES));

#[derive(Debug, Clone)]
struct TrieNode {
    children: [Option<usize>; EDGE_COUNT],
    kind:     Option<TokenKind>,
}

impl TrieNode {
    const fn new() -> Self {
        Self { children: [None; EDGE_COUNT],
               kind:     None, }
    }
}

/// A 27-way trie over reserved phrases.
///
/// Nodes live in one arena and refer to their children by index. Letters
/// match case-insensitively; any other character has no edge, so lexemes
/// containing digits or underscores never match a phrase.
#[derive(Debug, Clone)]
pub struct KeywordTrie {
    nodes: Vec<TrieNode>,
}

/// Handle to a node inside a [`KeywordTrie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

impl KeywordTrie {
    /// Builds a trie from `(phrase, kind)` pairs.
    ///
    /// Later duplicates of a phrase overwrite earlier ones.
    #[must_use]
    pub fn new(phrases: &[(&str, TokenKind)]) -> Self {
        let mut trie = Self { nodes: vec![TrieNode::new()] };
        for (phrase, kind) in phrases {
            trie.insert(phrase, *kind);
        }
        trie
    }

    fn insert(&mut self, phrase: &str, kind: TokenKind) {
        let mut node = 0;
        for ch in phrase.chars() {
            let Some(edge) = edge_index(ch) else {
                continue;
            };
            node = match self.nodes[node].children[edge] {
                Some(child) => child,
                None => {
                    self.nodes.push(TrieNode::new());
                    let child = self.nodes.len() - 1;
                    self.nodes[node].children[edge] = Some(child);
                    child
                },
            };
        }
        self.nodes[node].kind = Some(kind);
    }

    /// Returns the root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Follows the letters of `word` from `node`.
    ///
    /// # Returns
    /// The node reached after the whole word, or `None` if some character has
    /// no edge.
    #[must_use]
    pub fn walk(&self, node: NodeId, word: &str) -> Option<NodeId> {
        word.chars().try_fold(node, |NodeId(current), ch| {
                        let edge = letter_index(ch)?;
                        self.nodes[current].children[edge].map(NodeId)
                    })
    }

    /// Follows the space edge that continues a phrase with another word.
    #[must_use]
    pub fn space(&self, NodeId(node): NodeId) -> Option<NodeId> {
        self.nodes[node].children[SPACE_EDGE].map(NodeId)
    }

    /// Returns the token kind of the phrase ending at `node`, if any.
    #[must_use]
    pub fn kind(&self, NodeId(node): NodeId) -> Option<TokenKind> {
        self.nodes[node].kind
    }

    /// Resolves a complete single- or multi-word phrase.
    ///
    /// # Example
    /// ```
    /// use skimskript::interpreter::lexer::{keywords::KEYWORDS, token::TokenKind};
    ///
    /// assert_eq!(KEYWORDS.lookup("Is At Least"), Some(TokenKind::GreaterEqual));
    /// assert_eq!(KEYWORDS.lookup("is at"), None);
    /// assert_eq!(KEYWORDS.lookup("counter"), None);
    /// ```
    #[must_use]
    pub fn lookup(&self, phrase: &str) -> Option<TokenKind> {
        let mut node = self.root();
        for (index, word) in phrase.split(' ').enumerate() {
            if index > 0 {
                node = self.space(node)?;
            }
            node = self.walk(node, word)?;
        }
        self.kind(node)
    }
}

fn letter_index(ch: char) -> Option<usize> {
    let byte = u8::try_from(ch.to_ascii_lowercase()).ok()?;
    byte.is_ascii_lowercase().then(|| usize::from(byte - b'a'))
}

fn edge_index(ch: char) -> Option<usize> {
    if ch == ' ' { Some(SPACE_EDGE) } else { letter_index(ch) }
}
