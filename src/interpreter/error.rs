use super::expression::Operator;
use super::value::Value;
use crate::lexer::{LexicalError, LexicalErrorKind};
use crate::token::{Span, Token};
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("Ran past the end of the program looking for token {index}")]
    UnexpectedEnd { index: usize },
    #[error("Could not convert {lexeme:?} to a number")]
    MalformedNumber { lexeme: CompactString },
    #[error("Unsupported operand types for {operator}: {} and {}", .lhs.type_name(), .rhs.type_name())]
    NonNumerics {
        operator: Operator,
        lhs: Value,
        rhs: Value,
    },
    #[error("Cannot compare {} with {}", .lhs.type_name(), .rhs.type_name())]
    Incomparable { lhs: Value, rhs: Value },
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

impl RuntimeError {
    /// Attaches an error to the position of the token where it arose.
    pub fn at(kind: RuntimeErrorKind, token: &Token) -> Self {
        Self {
            kind,
            span: token.span,
            line: token.line,
            column: token.column,
        }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            RuntimeErrorKind::UnexpectedEnd { .. } => "RT001",
            RuntimeErrorKind::MalformedNumber { .. } => "RT002",
            RuntimeErrorKind::NonNumerics { .. } => "RT003",
            RuntimeErrorKind::Incomparable { .. } => "RT004",
        }
    }
}

/// A fatal error from one run: either the text could not be scanned or the token walk
/// could not continue.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InterpretError {
    #[error(transparent)]
    Lexical(LexicalError),
    #[error(transparent)]
    Runtime(RuntimeError),
}

impl InterpretError {
    pub fn code(&self) -> &'static str {
        match self {
            InterpretError::Lexical(e) => e.code(),
            InterpretError::Runtime(e) => e.code(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            InterpretError::Lexical(e) => e.span,
            InterpretError::Runtime(e) => e.span,
        }
    }
}

/// A number literal that fails to convert is a runtime fault even though the lexer
/// finds it.
impl From<LexicalError> for InterpretError {
    fn from(error: LexicalError) -> Self {
        match error.kind {
            LexicalErrorKind::MalformedNumber { ref lexeme } => {
                InterpretError::Runtime(RuntimeError {
                    kind: RuntimeErrorKind::MalformedNumber {
                        lexeme: lexeme.clone(),
                    },
                    span: error.span,
                    line: error.line,
                    column: error.column,
                })
            }
            LexicalErrorKind::Unrecognized(_) => InterpretError::Lexical(error),
        }
    }
}

impl From<RuntimeError> for InterpretError {
    fn from(error: RuntimeError) -> Self {
        InterpretError::Runtime(error)
    }
}
