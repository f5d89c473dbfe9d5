use crate::number::format_float;
use compact_str::CompactString;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::LazyLock;

/// The hashmap for keywords
pub static KEYWORD_HASHMAP: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("bruh", TokenKind::Declare);
    map.insert("itsgiving", TokenKind::Print);
    map.insert("twin", TokenKind::Plus);
    map.insert("flop", TokenKind::Minus);
    map.insert("thicc", TokenKind::Multiply);
    map.insert("ratio", TokenKind::Divide);
    map.insert("gyat", TokenKind::Concat);
    map.insert("lethimcook", TokenKind::If);
    map.insert("bet", TokenKind::Then);
    map.insert("naur", TokenKind::Else);
    map.insert("bigflex", TokenKind::Greater);
    map
});

/// A half-open range of character offsets into the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Parentheses
    LeftParenthesis,
    RightParenthesis,
    // Braces
    LeftBrace,
    RightBrace,
    Assign,

    // Literals
    Number,
    String,
    Ident,

    // Statements
    Declare,
    Print,
    If,
    Then,
    Else,

    // Operators
    Plus,
    Minus,
    Multiply,
    Divide,
    Concat,
    Greater,

    // End of file.
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::LeftParenthesis => write!(f, "LPAREN"),
            TokenKind::RightParenthesis => write!(f, "RPAREN"),
            TokenKind::LeftBrace => write!(f, "LBRACE"),
            TokenKind::RightBrace => write!(f, "RBRACE"),
            TokenKind::Assign => write!(f, "ASSIGN"),
            TokenKind::Number => write!(f, "NUMBER"),
            TokenKind::String => write!(f, "STRING"),
            TokenKind::Ident => write!(f, "IDENTIFIER"),
            TokenKind::Declare => write!(f, "DECLARE"),
            TokenKind::Print => write!(f, "PRINT"),
            TokenKind::If => write!(f, "IF"),
            TokenKind::Then => write!(f, "THEN"),
            TokenKind::Else => write!(f, "ELSE"),
            TokenKind::Plus => write!(f, "PLUS"),
            TokenKind::Minus => write!(f, "MINUS"),
            TokenKind::Multiply => write!(f, "MULTIPLY"),
            TokenKind::Divide => write!(f, "DIVIDE"),
            TokenKind::Concat => write!(f, "CONCAT"),
            TokenKind::Greater => write!(f, "GREATER"),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

/// The value carried by a token.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    /// Identifier and keyword spellings, symbol characters and string contents.
    Text(CompactString),
    /// Only the end-of-input token carries nothing.
    Absent,
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Integer(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{}", format_float(*v)),
            Literal::Text(v) => write!(f, "{v}"),
            Literal::Absent => write!(f, "null"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: Literal,
    pub span: Span,
    /// Line at the point the token was recognized.
    pub line: u32,
    /// Column at the point the token was recognized.
    pub column: u32,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// The token's value as text, used as the key of a declaration.
    pub fn text(&self) -> Option<CompactString> {
        match &self.literal {
            Literal::Absent => None,
            Literal::Text(v) => Some(v.clone()),
            Literal::Integer(v) => Some(compact_str::format_compact!("{v}")),
            Literal::Float(v) => Some(format_float(*v).into()),
        }
    }
}
