use super::errors::{RuntimeError, RuntimeResult};
use crate::egg_frontend::grammar::{DataType, InfixOperator, Literal, PrefixOperator};

use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::String(_) => DataType::String,
            Value::Number(_) => DataType::Number,
            Value::Boolean(_) => DataType::Boolean,
        }
    }

    pub fn apply_infix_op(op: InfixOperator, lhs: Value, rhs: Value) -> RuntimeResult<Value> {
        match op {
            InfixOperator::Add => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                (a, b) => Err(illegal_infix(op, &a, &b)),
            },
            InfixOperator::Subtract => numerical_binop(op, lhs, rhs, |a, b| Value::Number(a - b)),
            InfixOperator::Multiply => numerical_binop(op, lhs, rhs, |a, b| Value::Number(a * b)),
            InfixOperator::Divide => numerical_binop(op, lhs, rhs, |a, b| Value::Number(a / b)),
            InfixOperator::And => logical_binop(op, lhs, rhs, |a, b| a && b),
            InfixOperator::Or => logical_binop(op, lhs, rhs, |a, b| a || b),
            InfixOperator::EqualTo => Ok(Value::Boolean(strict_equals(op, &lhs, &rhs)?)),
            InfixOperator::NotEqualTo => Ok(Value::Boolean(!strict_equals(op, &lhs, &rhs)?)),
            InfixOperator::GreaterEq => {
                numerical_binop(op, lhs, rhs, |a, b| Value::Boolean(a >= b))
            }
            InfixOperator::GreaterThan => {
                numerical_binop(op, lhs, rhs, |a, b| Value::Boolean(a > b))
            }
            InfixOperator::LessEq => numerical_binop(op, lhs, rhs, |a, b| Value::Boolean(a <= b)),
            InfixOperator::LessThan => numerical_binop(op, lhs, rhs, |a, b| Value::Boolean(a < b)),
        }
    }

    pub fn apply_prefix_op(op: PrefixOperator, value: Value) -> RuntimeResult<Value> {
        match (op, value) {
            (PrefixOperator::Identity, Value::Number(n)) => Ok(Value::Number(n)),
            (PrefixOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
            (PrefixOperator::LogicalNot, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
            (op, value) => Err(RuntimeError::IllegalPrefixOperation(op, value.data_type())),
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Number(n) => Value::Number(*n),
            Literal::Boolean(b) => Value::Boolean(*b),
            Literal::Str(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

fn illegal_infix(op: InfixOperator, lhs: &Value, rhs: &Value) -> RuntimeError {
    RuntimeError::IllegalInfixOperation(op, lhs.data_type(), rhs.data_type())
}

/// Equality never crosses types: comparing a string with a number is an error.
fn strict_equals(op: InfixOperator, lhs: &Value, rhs: &Value) -> RuntimeResult<bool> {
    match (lhs, rhs) {
        (Value::String(a), Value::String(b)) => Ok(a == b),
        (Value::Number(a), Value::Number(b)) => Ok(a == b),
        (Value::Boolean(a), Value::Boolean(b)) => Ok(a == b),
        (a, b) => Err(illegal_infix(op, a, b)),
    }
}

fn numerical_binop<F>(op: InfixOperator, lhs: Value, rhs: Value, func: F) -> RuntimeResult<Value>
where
    F: Fn(f64, f64) -> Value,
{
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(func(a, b)),
        (a, b) => Err(illegal_infix(op, &a, &b)),
    }
}

fn logical_binop<F>(op: InfixOperator, lhs: Value, rhs: Value, func: F) -> RuntimeResult<Value>
where
    F: Fn(bool, bool) -> bool,
{
    match (lhs, rhs) {
        (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(func(a, b))),
        (a, b) => Err(illegal_infix(op, &a, &b)),
    }
}
