use super::error::RuntimeErrorKind;
use super::expression::Operator;
use crate::number::format_float;
use compact_str::{format_compact, CompactString};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(CompactString),
    Bool(bool),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{}", format_float(*v)),
            Value::String(v) => write!(f, "{v}"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Integer(0)
    }
}

#[derive(Debug, Clone, Copy)]
enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    fn to_f64(self) -> f64 {
        match self {
            Number::Integer(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
        }
    }

    /// Booleans take part in arithmetic as 0 and 1.
    fn as_number(&self) -> Option<Number> {
        match self {
            Value::Integer(v) => Some(Number::Integer(*v)),
            Value::Float(v) => Some(Number::Float(*v)),
            Value::Bool(v) => Some(Number::Integer(i64::from(*v))),
            Value::String(_) => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self.as_number() {
            Some(Number::Integer(v)) => v == 0,
            Some(Number::Float(v)) => v == 0.0,
            None => false,
        }
    }

    fn numeric_operands(
        &self,
        other: &Value,
        operator: Operator,
    ) -> Result<(Number, Number), RuntimeErrorKind> {
        match (self.as_number(), other.as_number()) {
            (Some(lhs), Some(rhs)) => Ok((lhs, rhs)),
            _ => Err(RuntimeErrorKind::NonNumerics {
                operator,
                lhs: self.clone(),
                rhs: other.clone(),
            }),
        }
    }

    /// Integer results that overflow are carried on as floats.
    fn arithmetic(
        &self,
        other: &Value,
        operator: Operator,
        integer: fn(i64, i64) -> Option<i64>,
        float: fn(f64, f64) -> f64,
    ) -> Result<Value, RuntimeErrorKind> {
        let (lhs, rhs) = self.numeric_operands(other, operator)?;
        let value = match (lhs, rhs) {
            (Number::Integer(l), Number::Integer(r)) => match integer(l, r) {
                Some(v) => Value::Integer(v),
                None => Value::Float(float(l as f64, r as f64)),
            },
            (lhs, rhs) => Value::Float(float(lhs.to_f64(), rhs.to_f64())),
        };
        Ok(value)
    }
}

impl Value {
    pub fn add(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        self.arithmetic(other, Operator::Plus, i64::checked_add, |l, r| l + r)
    }

    pub fn subtract(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        self.arithmetic(other, Operator::Minus, i64::checked_sub, |l, r| l - r)
    }

    pub fn multiply(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        self.arithmetic(other, Operator::Multiply, i64::checked_mul, |l, r| l * r)
    }

    /// Division by any zero yields integer zero. Otherwise the quotient is always a float.
    pub fn divide(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        if other.is_zero() {
            return Ok(Value::Integer(0));
        }
        let (lhs, rhs) = self.numeric_operands(other, Operator::Divide)?;
        Ok(Value::Float(lhs.to_f64() / rhs.to_f64()))
    }

    pub fn concat(&self, other: &Value) -> Value {
        Value::String(format_compact!("{self}{other}"))
    }

    pub fn greater_than(&self, other: &Value) -> Result<bool, RuntimeErrorKind> {
        match (self, other) {
            (Value::String(lhs), Value::String(rhs)) => Ok(lhs.as_str() > rhs.as_str()),
            _ => match (self.as_number(), other.as_number()) {
                (Some(Number::Integer(l)), Some(Number::Integer(r))) => Ok(l > r),
                (Some(l), Some(r)) => Ok(l.to_f64() > r.to_f64()),
                _ => Err(RuntimeErrorKind::Incomparable {
                    lhs: self.clone(),
                    rhs: other.clone(),
                }),
            },
        }
    }
}
