use super::{LexicalError, LexicalErrorKind};
use crate::number::format_float_literal;
use crate::token::{Literal, Token, TokenKind};

/// Interface for creating new token formatters.
pub trait TokenFormatter {
    /// Formats a token into a string.
    fn format(&self, token: &Token) -> String;
    /// Formats a lexer error into a string.
    fn format_lexical_error(&self, error: &LexicalError) -> String;
}

/// `KIND lexeme value`, one token per line.
pub struct BasicFormatter {
    chars: Vec<char>,
}

impl BasicFormatter {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
        }
    }

    fn lexeme(&self, token: &Token) -> String {
        let end = token.span.end.min(self.chars.len());
        let start = token.span.start.min(end);
        self.chars[start..end].iter().collect()
    }

    fn format_body(&self, token: &Token) -> String {
        match token.kind {
            TokenKind::Eof => "EOF  null".into(),
            TokenKind::Number | TokenKind::String => {
                format!("{} {} {}", token.kind, self.lexeme(token), token.literal)
            }
            kind => format!("{kind} {} null", token.literal),
        }
    }
}

impl TokenFormatter for BasicFormatter {
    fn format(&self, token: &Token) -> String {
        self.format_body(token)
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        let (line, column) = (error.line, error.column);
        match error.kind {
            LexicalErrorKind::Unrecognized(c) => {
                format!("[line {line}, column {column}] Error: Invalid character: {c}")
            }
            LexicalErrorKind::MalformedNumber { ref lexeme } => {
                format!("[line {line}, column {column}] Error: Malformed number: {lexeme}")
            }
        }
    }
}

/// Same as [`BasicFormatter`] but prefixed with the recorded line and column.
pub struct LineFormatter {
    basic: BasicFormatter,
}

impl LineFormatter {
    pub fn new(source: &str) -> Self {
        Self {
            basic: BasicFormatter::new(source),
        }
    }
}

impl TokenFormatter for LineFormatter {
    fn format(&self, token: &Token) -> String {
        format!(
            "({}:{}) {}",
            token.line,
            token.column,
            self.basic.format_body(token)
        )
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        match error.kind {
            LexicalErrorKind::Unrecognized(c) => {
                format!("({}:{}) ERROR INVALID_CHAR {c}", error.line, error.column)
            }
            LexicalErrorKind::MalformedNumber { ref lexeme } => {
                format!(
                    "({}:{}) ERROR MALFORMED_NUMBER {lexeme}",
                    error.line, error.column
                )
            }
        }
    }
}

pub struct DebugFormatter;

impl TokenFormatter for DebugFormatter {
    fn format(&self, token: &Token) -> String {
        format!("{token:?}")
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        format!("{error:?}")
    }
}

/// Renders tokens back into program text that scans to the same kinds and values.
pub struct SourceFormatter;

impl SourceFormatter {
    /// Joins the canonical spelling of every token before EOF with single spaces.
    pub fn render(&self, tokens: &[Token]) -> String {
        tokens
            .iter()
            .filter(|token| !token.is(TokenKind::Eof))
            .map(|token| self.format(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TokenFormatter for SourceFormatter {
    fn format(&self, token: &Token) -> String {
        match (&token.kind, &token.literal) {
            (TokenKind::Eof, _) => String::new(),
            (TokenKind::String, literal) => format!("\"{literal}\""),
            (_, Literal::Float(v)) => format_float_literal(*v),
            (_, literal) => format!("{literal}"),
        }
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        format!("# {error}")
    }
}
