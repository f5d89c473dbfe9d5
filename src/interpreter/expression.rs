use super::environment::Environment;
use super::error::RuntimeErrorKind;
use super::value::Value;
use crate::token::{Literal, Token, TokenKind};

/// Evaluates the single token that makes up an expression.
///
/// Unbound identifiers and tokens that carry no value evaluate to integer zero.
pub fn evaluate_expression(token: &Token, environment: &Environment) -> Value {
    match (token.kind, &token.literal) {
        (TokenKind::Number, Literal::Integer(v)) => Value::Integer(*v),
        (TokenKind::Number, Literal::Float(v)) => Value::Float(*v),
        (TokenKind::String, Literal::Text(v)) => Value::String(v.clone()),
        (TokenKind::Ident, Literal::Text(name)) => environment.read(name),
        _ => Value::default(),
    }
}

/// Only `GREATER` is ever evaluated; any other token in the operator slot is false and
/// the operands are not compared.
pub fn evaluate_condition(
    lhs: &Value,
    operator: TokenKind,
    rhs: &Value,
) -> Result<bool, RuntimeErrorKind> {
    match operator {
        TokenKind::Greater => lhs.greater_than(rhs),
        _ => Ok(false),
    }
}

/// Binary operators allowed after the first operand of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Concat,
}

impl Operator {
    pub fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Operator::Plus),
            TokenKind::Minus => Some(Operator::Minus),
            TokenKind::Multiply => Some(Operator::Multiply),
            TokenKind::Divide => Some(Operator::Divide),
            TokenKind::Concat => Some(Operator::Concat),
            _ => None,
        }
    }

    pub fn apply(&self, lhs: &Value, rhs: &Value) -> Result<Value, RuntimeErrorKind> {
        match self {
            Operator::Plus => lhs.add(rhs),
            Operator::Minus => lhs.subtract(rhs),
            Operator::Multiply => lhs.multiply(rhs),
            Operator::Divide => lhs.divide(rhs),
            Operator::Concat => Ok(lhs.concat(rhs)),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Plus => write!(f, "PLUS"),
            Operator::Minus => write!(f, "MINUS"),
            Operator::Multiply => write!(f, "MULTIPLY"),
            Operator::Divide => write!(f, "DIVIDE"),
            Operator::Concat => write!(f, "CONCAT"),
        }
    }
}
