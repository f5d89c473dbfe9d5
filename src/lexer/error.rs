use crate::token::Span;
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexicalErrorKind {
    #[error("Invalid character {0}")]
    Unrecognized(char),
    #[error("Could not convert {lexeme:?} to a number")]
    MalformedNumber { lexeme: CompactString },
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind} at line {line}, column {column}")]
pub struct LexicalError {
    #[source]
    pub kind: LexicalErrorKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

impl LexicalError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            LexicalErrorKind::Unrecognized(_) => "LX001",
            LexicalErrorKind::MalformedNumber { .. } => "LX002",
        }
    }
}
