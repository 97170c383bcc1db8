use crate::egg_frontend::grammar::{DataType, InfixOperator, PrefixOperator};

use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum RuntimeError {
    #[error("Variable {0} was not declared in this scope")]
    UndeclaredVariable(String),
    #[error("Variable {0} was already declared in this scope")]
    AlreadyDeclared(String),
    #[error("Variable {0} was used before being initialized")]
    UninitializedVariable(String),
    #[error("Cannot modify constant variable {0}")]
    ConstantReassignment(String),
    #[error("Cannot change variable {name}'s type (tried to change {expected} to {found})")]
    TypeMismatch {
        name: String,
        expected: DataType,
        found: DataType,
    },
    #[error("Invalid data types in operator `{0}`: {1} and {2}")]
    IllegalInfixOperation(InfixOperator, DataType, DataType),
    #[error("Invalid data type in operator `{0}`: {1}")]
    IllegalPrefixOperation(PrefixOperator, DataType),
    #[error("Condition must be a bool, but was {0}")]
    NonBooleanCondition(DataType),
    #[error("Failed to write output: {0}")]
    Output(String),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
