mod cursor;
mod error;
pub mod formatter;

use crate::token::{Literal, Span, KEYWORD_HASHMAP};
use compact_str::{format_compact, CompactString};
use cursor::Cursor;
pub use error::{LexicalError, LexicalErrorKind};
use tracing::trace;

pub use crate::token::{Token, TokenKind};

/// The word that opens a line comment, besides `#`.
///
/// It is matched on the raw characters at a token boundary, so an identifier such as
/// `teapot` is read as this word followed by comment text.
const COMMENT_WORD: &str = "tea";

/// Scans the whole source and returns its tokens, ending with exactly one EOF token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
    Lexer::new(source).tokenize()
}

#[derive(Debug)]
pub struct Lexer {
    cursor: Cursor,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexicalError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is(TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    /// Produces the next token. Once the input is exhausted every call yields EOF.
    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        while let Some(c) = self.cursor.current() {
            if c.is_whitespace() {
                self.skip_whitespace();
                continue;
            }

            if c == '#' || (c == 't' && self.cursor.starts_with(COMMENT_WORD)) {
                if c == 't' {
                    self.cursor.jump(COMMENT_WORD.len());
                }
                self.skip_comment();
                continue;
            }

            let start = self.cursor.position();

            if c.is_ascii_digit() {
                return self.lex_number(start);
            }

            if c.is_alphabetic() {
                return Ok(self.lex_ident_or_keyword(start));
            }

            if c == '"' {
                return Ok(self.lex_string(start));
            }

            let kind = match c {
                '(' => TokenKind::LeftParenthesis,
                ')' => TokenKind::RightParenthesis,
                '{' => TokenKind::LeftBrace,
                '}' => TokenKind::RightBrace,
                '=' => TokenKind::Assign,
                _ => {
                    return Err(LexicalError {
                        kind: LexicalErrorKind::Unrecognized(c),
                        span: Span::new(start, start + 1),
                        line: self.cursor.line(),
                        column: self.cursor.column(),
                    });
                }
            };
            self.cursor.advance();
            return Ok(self.emit(kind, Literal::Text(format_compact!("{c}")), start));
        }

        let end = self.cursor.position();
        Ok(self.emit(TokenKind::Eof, Literal::Absent, end))
    }
}

impl Lexer {
    fn emit(&self, kind: TokenKind, literal: Literal, start: usize) -> Token {
        let token = Token {
            kind,
            literal,
            span: Span::new(start, self.cursor.position()),
            line: self.cursor.line(),
            column: self.cursor.column(),
        };
        trace!(kind = %token.kind, line = token.line, column = token.column, "token");
        token
    }

    fn skip_whitespace(&mut self) {
        while self.cursor.current().is_some_and(char::is_whitespace) {
            self.cursor.advance();
        }
    }

    fn skip_comment(&mut self) {
        while self.cursor.current().is_some_and(|c| c != '\n') {
            self.cursor.advance();
        }
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> CompactString {
        let mut lexeme = CompactString::default();
        while let Some(c) = self.cursor.current().filter(|&c| predicate(c)) {
            lexeme.push(c);
            self.cursor.advance();
        }
        lexeme
    }

    fn lex_number(&mut self, start: usize) -> Result<Token, LexicalError> {
        let lexeme = self.take_while(|c| c.is_ascii_digit() || c == '.');
        // Integers too wide for i64 are carried on as floats, like overflowing arithmetic.
        let literal = if lexeme.contains('.') {
            lexeme.parse::<f64>().ok().map(Literal::Float)
        } else {
            match lexeme.parse::<i64>() {
                Ok(v) => Some(Literal::Integer(v)),
                Err(_) => lexeme.parse::<f64>().ok().map(Literal::Float),
            }
        };
        match literal {
            Some(literal) => Ok(self.emit(TokenKind::Number, literal, start)),
            None => Err(LexicalError {
                kind: LexicalErrorKind::MalformedNumber { lexeme },
                span: Span::new(start, self.cursor.position()),
                line: self.cursor.line(),
                column: self.cursor.column(),
            }),
        }
    }

    fn lex_ident_or_keyword(&mut self, start: usize) -> Token {
        let lexeme = self.take_while(|c| c.is_alphanumeric() || c == '_');
        let kind = KEYWORD_HASHMAP
            .get(lexeme.as_str())
            .copied()
            .unwrap_or(TokenKind::Ident);
        self.emit(kind, Literal::Text(lexeme), start)
    }

    /// Strings have no escapes and may run unterminated to the end of input.
    fn lex_string(&mut self, start: usize) -> Token {
        self.cursor.advance();
        let contents = self.take_while(|c| c != '"');
        if self.cursor.current() == Some('"') {
            self.cursor.advance();
        }
        self.emit(TokenKind::String, Literal::Text(contents), start)
    }
}
