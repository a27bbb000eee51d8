use std::fmt;

/// The resolved kind of a token.
///
/// Keyword kinds are produced by the keyword trie and may cover several
/// space-separated words (`is greater than` is a single `Greater` token).
/// Symbol kinds come straight from operator and delimiter lexemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Integer literal, such as `42`.
    Integer,
    /// Float literal, such as `3.14`.
    Float,
    /// String literal. The token text excludes the quotes.
    String,
    /// `true`
    True,
    /// `false`
    False,
    /// Variable or function name.
    Identifier,

    /// `int`, `integer`
    IntType,
    /// `float`, `decimal`
    FloatType,
    /// `bool`, `boolean`
    BoolType,
    /// `string`, `text`
    StringType,
    /// `list`
    ListType,
    /// `void`, `nothing`
    VoidType,

    /// `declare`
    Declare,
    /// `as`
    As,
    /// `set`
    Set,
    /// `to`
    To,
    /// `define`
    Define,
    /// `function`
    Function,
    /// `ref`, `reference`
    Reference,
    /// `run`, `call`
    Run,
    /// `return`, `give`
    Return,
    /// `if`
    If,
    /// `then`
    Then,
    /// `else`, `otherwise`
    Else,
    /// `else if`, `otherwise if`
    ElseIf,
    /// `while`
    While,
    /// `repeat`
    Repeat,
    /// `times`
    Times,
    /// `assert`
    Assert,
    /// `try`
    Try,
    /// `catch`
    Catch,

    /// `and`, `&&`
    And,
    /// `or`, `||`
    Or,
    /// `xor`
    Xor,

    /// `==`, `is`, `equals`, `is equal to`
    Equal,
    /// `!=`, `is not`, `is not equal to`
    NotEqual,
    /// `>`, `is greater than`, `is more than`
    Greater,
    /// `>=`, `is at least`, `is greater than or equal to`
    GreaterEqual,
    /// `<`, `is less than`, `is fewer than`
    Less,
    /// `<=`, `is at most`, `is less than or equal to`
    LessEqual,

    /// `+`, `plus`
    Plus,
    /// `-`, `minus`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`, `mod`
    Modulo,
    /// `^`
    Power,
    /// `=`
    Assign,

    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `,`
    Comma,
}

impl TokenKind {
    /// Returns `true` for the keywords that name a variable data type.
    ///
    /// `list` counts as a data type here so the parser can reject it with a
    /// dedicated error.
    #[must_use]
    pub const fn is_data_type(self) -> bool {
        matches!(self,
                 Self::IntType | Self::FloatType | Self::BoolType | Self::StringType | Self::ListType)
    }

}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Integer => "an integer",
            Self::Float => "a float",
            Self::String => "a string",
            Self::True => "'true'",
            Self::False => "'false'",
            Self::Identifier => "an identifier",
            Self::IntType => "'int'",
            Self::FloatType => "'float'",
            Self::BoolType => "'bool'",
            Self::StringType => "'string'",
            Self::ListType => "'list'",
            Self::VoidType => "'void'",
            Self::Declare => "'declare'",
            Self::As => "'as'",
            Self::Set => "'set'",
            Self::To => "'to'",
            Self::Define => "'define'",
            Self::Function => "'function'",
            Self::Reference => "'ref'",
            Self::Run => "'run'",
            Self::Return => "'return'",
            Self::If => "'if'",
            Self::Then => "'then'",
            Self::Else => "'else'",
            Self::ElseIf => "'else if'",
            Self::While => "'while'",
            Self::Repeat => "'repeat'",
            Self::Times => "'times'",
            Self::Assert => "'assert'",
            Self::Try => "'try'",
            Self::Catch => "'catch'",
            Self::And => "'and'",
            Self::Or => "'or'",
            Self::Xor => "'xor'",
            Self::Equal => "'=='",
            Self::NotEqual => "'!='",
            Self::Greater => "'>'",
            Self::GreaterEqual => "'>='",
            Self::Less => "'<'",
            Self::LessEqual => "'<='",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Multiply => "'*'",
            Self::Divide => "'/'",
            Self::Modulo => "'%'",
            Self::Power => "'^'",
            Self::Assign => "'='",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::Comma => "','",
        };
        write!(f, "{text}")
    }
}

/// A resolved token.
///
/// A token refers back to the lexemes it was built from instead of copying
/// text. `lexeme_end` is inclusive; single-word tokens have
/// `lexeme_start == lexeme_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The resolved kind.
    pub kind:         TokenKind,
    /// Index of the first lexeme covered by this token.
    pub lexeme_start: usize,
    /// Index of the last lexeme covered by this token.
    pub lexeme_end:   usize,
}
