use super::error::{InterpretError, RuntimeErrorKind};
use crate::lexer::LexicalErrorKind;
use crate::token::Span;
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::ops::Range;
use std::path::Path;

const ARIADNE_MSG: &str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &str = "Write into buffer should not fail.";

pub trait ErrorFormatter {
    fn format_error(&self, error: &InterpretError) -> String;
}

pub struct DebugFormatter;

impl ErrorFormatter for DebugFormatter {
    fn format_error(&self, error: &InterpretError) -> String {
        format!("{error:?}")
    }
}

/// A single line: the error's message.
pub struct BasicFormatter;

impl ErrorFormatter for BasicFormatter {
    fn format_error(&self, error: &InterpretError) -> String {
        match error {
            InterpretError::Lexical(e) => format!("{e}"),
            InterpretError::Runtime(e) => {
                format!("{e} at line {}, column {}", e.line, e.column)
            }
        }
    }
}

/// A source-annotated report.
pub struct PrettyFormatter<'src> {
    text: &'src str,
    path: &'src Path,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self { text, path }
    }

    /// Spans may point one past the end of input, so they are clamped onto the text.
    fn clamp(&self, span: Span) -> Range<usize> {
        let length = self.text.chars().count();
        let start = span.start.min(length);
        let end = span.end.min(length).max(start);
        start..end
    }

    fn label_message(error: &InterpretError) -> String {
        match error {
            InterpretError::Lexical(e) => match e.kind {
                LexicalErrorKind::Unrecognized(c) => {
                    format!("{} cannot start a token", c.fg(Color::BrightRed))
                }
                LexicalErrorKind::MalformedNumber { ref lexeme } => {
                    format!("{} is not a number", lexeme.fg(Color::BrightRed))
                }
            },
            InterpretError::Runtime(e) => match e.kind {
                RuntimeErrorKind::UnexpectedEnd { index } => format!(
                    "The statement needs token {} but the program ends here",
                    index.fg(Color::BrightCyan)
                ),
                RuntimeErrorKind::MalformedNumber { ref lexeme } => {
                    format!("{} is not a number", lexeme.fg(Color::BrightRed))
                }
                RuntimeErrorKind::NonNumerics {
                    operator,
                    ref lhs,
                    ref rhs,
                } => format!(
                    "{operator} needs numbers but got {} and {}",
                    lhs.type_name().fg(Color::BrightRed),
                    rhs.type_name().fg(Color::BrightRed),
                ),
                RuntimeErrorKind::Incomparable { ref lhs, ref rhs } => format!(
                    "{} and {} cannot be compared",
                    lhs.type_name().fg(Color::BrightRed),
                    rhs.type_name().fg(Color::BrightRed),
                ),
            },
        }
    }
}

impl<'src> ErrorFormatter for PrettyFormatter<'src> {
    fn format_error(&self, error: &InterpretError) -> String {
        let path = self.path.to_string_lossy();
        let path: &str = &path;
        let range = self.clamp(error.span());
        let mut output = std::io::Cursor::new(Vec::new());
        Report::build(ReportKind::Error, (path, range.clone()))
            .with_code(error.code())
            .with_message(error.to_string())
            .with_label(
                Label::new((path, range))
                    .with_message(Self::label_message(error))
                    .with_color(Color::BrightRed),
            )
            .finish()
            .write((path, Source::from(self.text)), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}
