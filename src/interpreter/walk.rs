use super::environment::Environment;
use super::error::{RuntimeError, RuntimeErrorKind};
use super::expression::{evaluate_condition, evaluate_expression, Operator};
use super::value::Value;
use super::SystemContext;
use crate::token::{Token, TokenKind};
use tracing::{debug, trace};

/// Progress through `IF cond THEN { ... } [ELSE { ... }]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConditionalState {
    ReadCondition,
    SeekThen { condition: bool },
    ExecuteTrueBlock,
    SkipFalseBlock,
    ExecuteElseBlock,
    Done,
}

/// Walks a token sequence with an explicit cursor, executing statements as it
/// recognizes them.
///
/// Every handler takes the cursor at its leading token and returns the cursor just past
/// what it consumed.
pub struct TokenWalkInterpreter<'a, C: SystemContext> {
    tokens: &'a [Token],
    environment: &'a mut Environment,
    context: &'a mut C,
}

impl<'a, C> TokenWalkInterpreter<'a, C>
where
    C: SystemContext,
{
    pub fn new(tokens: &'a [Token], environment: &'a mut Environment, context: &'a mut C) -> Self {
        Self {
            tokens,
            environment,
            context,
        }
    }

    pub fn run(mut self) -> Result<(), RuntimeError> {
        let tokens = self.tokens;
        let mut index = 0;
        while let Some(token) = tokens.get(index) {
            index = match token.kind {
                TokenKind::If => self.interpret_if(index)?,
                TokenKind::Print => self.interpret_print(index)?,
                TokenKind::Declare => self.interpret_declaration(index)?,
                kind => {
                    trace!(index, %kind, "skipped token");
                    index + 1
                }
            };
        }
        Ok(())
    }
}

// Cursor access
impl<'a, C> TokenWalkInterpreter<'a, C>
where
    C: SystemContext,
{
    fn token(&self, index: usize) -> Result<&'a Token, RuntimeError> {
        let tokens = self.tokens;
        tokens.get(index).ok_or_else(|| self.unexpected_end(index))
    }

    fn kind_at(&self, index: usize) -> Option<TokenKind> {
        self.tokens.get(index).map(|token| token.kind)
    }

    fn unexpected_end(&self, index: usize) -> RuntimeError {
        let kind = RuntimeErrorKind::UnexpectedEnd { index };
        match self.tokens.last() {
            Some(last) => RuntimeError::at(kind, last),
            None => RuntimeError {
                kind,
                span: Default::default(),
                line: 1,
                column: 1,
            },
        }
    }

    fn evaluate(&self, index: usize) -> Result<Value, RuntimeError> {
        let token = self.token(index)?;
        Ok(evaluate_expression(token, &*self.environment))
    }
}

// Statement handlers
impl<'a, C> TokenWalkInterpreter<'a, C>
where
    C: SystemContext,
{
    /// `PRINT [(] expr [)]`. Only one token is ever evaluated and a missing right
    /// parenthesis is tolerated.
    fn interpret_print(&mut self, index: usize) -> Result<usize, RuntimeError> {
        debug!(index, "print");
        let mut index = index + 1;
        if self.kind_at(index) == Some(TokenKind::LeftParenthesis) {
            index += 1;
            let value = self.evaluate(index)?;
            self.context.writeln(&value.to_string());
            index += 1;
            if self.kind_at(index) == Some(TokenKind::RightParenthesis) {
                index += 1;
            }
        } else {
            let value = self.evaluate(index)?;
            self.context.writeln(&value.to_string());
            index += 1;
        }
        Ok(index)
    }

    /// `DECLARE name = expr [operator expr]`. The token in the `=` slot is skipped
    /// without being checked.
    fn interpret_declaration(&mut self, index: usize) -> Result<usize, RuntimeError> {
        let name_token = self.token(index + 1)?;
        // Only EOF has no text, and a declaration naming it always runs out of tokens.
        let name = name_token.text().unwrap_or_default();
        debug!(index, %name, "declare");

        let mut index = index + 3;
        let first = self.evaluate(index)?;
        index += 1;

        let tokens = self.tokens;
        let operator = tokens
            .get(index)
            .and_then(|token| Operator::from_kind(token.kind).map(|operator| (operator, token)));
        let value = match operator {
            Some((operator, operator_token)) => {
                index += 1;
                let second = self.evaluate(index)?;
                index += 1;
                operator
                    .apply(&first, &second)
                    .map_err(|kind| RuntimeError::at(kind, operator_token))?
            }
            None => first,
        };

        self.environment.declare(name, value);
        Ok(index)
    }

    fn interpret_if(&mut self, index: usize) -> Result<usize, RuntimeError> {
        debug!(index, "conditional");
        let mut index = index + 1;
        let mut state = ConditionalState::ReadCondition;
        loop {
            trace!(?state, index, "conditional state");
            state = match state {
                ConditionalState::ReadCondition => {
                    let lhs = self.evaluate(index)?;
                    let operator = self.token(index + 1)?;
                    let rhs = self.evaluate(index + 2)?;
                    let condition = evaluate_condition(&lhs, operator.kind, &rhs)
                        .map_err(|kind| RuntimeError::at(kind, operator))?;
                    index += 3;
                    ConditionalState::SeekThen { condition }
                }
                ConditionalState::SeekThen { condition } => {
                    // Whatever lies between the condition and THEN is discarded.
                    while !self.token(index)?.is(TokenKind::Then) {
                        trace!(index, "discarded before THEN");
                        index += 1;
                    }
                    // THEN, then the opening brace, which is assumed rather than checked.
                    index += 2;
                    if condition {
                        ConditionalState::ExecuteTrueBlock
                    } else {
                        ConditionalState::SkipFalseBlock
                    }
                }
                ConditionalState::ExecuteTrueBlock | ConditionalState::ExecuteElseBlock => {
                    index = self.execute_block(index)?;
                    ConditionalState::Done
                }
                ConditionalState::SkipFalseBlock => {
                    index = self.skip_block(index)?;
                    if self.kind_at(index) == Some(TokenKind::Else) {
                        index += 2;
                        ConditionalState::ExecuteElseBlock
                    } else {
                        ConditionalState::Done
                    }
                }
                ConditionalState::Done => return Ok(index),
            };
        }
    }

    /// Runs the statements of a block up to the first right brace at any depth.
    ///
    /// Only `PRINT` and `DECLARE` are dispatched. Anything else, a nested `IF` included,
    /// is stepped over one token at a time, so an inner block's closing brace ends the
    /// outer block.
    fn execute_block(&mut self, mut index: usize) -> Result<usize, RuntimeError> {
        let tokens = self.tokens;
        while let Some(token) = tokens.get(index) {
            index = match token.kind {
                TokenKind::RightBrace => break,
                TokenKind::Print => self.interpret_print(index)?,
                TokenKind::Declare => self.interpret_declaration(index)?,
                kind => {
                    trace!(index, %kind, "skipped token in block");
                    index + 1
                }
            };
        }
        Ok(index + 1)
    }

    /// Skips a block whose opening brace is already consumed, balancing nested braces.
    fn skip_block(&self, mut index: usize) -> Result<usize, RuntimeError> {
        let mut depth = 1usize;
        while depth > 0 {
            match self.token(index)?.kind {
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => depth -= 1,
                _ => {}
            }
            index += 1;
        }
        trace!(index, "skipped block");
        Ok(index)
    }
}
