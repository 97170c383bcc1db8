use super::span::{CodePosition, Span};

use std::fmt;
use thiserror::Error;

/// No recognizer matched at `position`.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
#[error(
    "Unexpected character '{character}' at offset {} ({})",
    .position.byte_pos,
    .position
)]
pub struct LexError {
    pub position: CodePosition,
    pub character: char,
}

/// A parser expectation that was not met, what was found instead and where.
#[derive(Debug, PartialEq, Clone, Error)]
#[error("{error}, but instead got {found} at {}", .span.start_pos)]
pub struct ParserError {
    pub error: ParserErrorType,
    pub found: String,
    pub span: Span,
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ParserErrorType {
    #[error("Expected `{0}` after {1}")]
    ExpectedAfter(&'static str, Item),
    #[error("Expected `{0}` before {1}")]
    ExpectedBefore(&'static str, Item),
    #[error("Expected expression")]
    ExpectedExpr,
    #[error("Expected identifier as {0}")]
    ExpectedIdentifier(Item),
    #[error("Expected type name (string, num or bool)")]
    ExpectedTypeName,
    #[error("Expected an assignment or a statement keyword")]
    ExpectedStatement,
    #[error("Expected identifier on the left of `=`")]
    ExpectedLValue,
    #[error("Constant `{0}` must be initialized")]
    UninitializedConstant(String),
    #[error("Expected `}}` to close block")]
    UnclosedBrace,
    #[error("Expected end of input")]
    ExpectedEndOfInput,
    #[error("Invalid number literal")]
    InvalidNumber,
}

/// Grammar items referenced by error messages.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Item {
    Print,
    PrintValue,
    Statement,
    VariableName,
    TypeName,
    Expression,
}

pub type LexerResult<T> = Result<T, LexError>;
pub type ParserResult<T> = Result<T, ParserError>;

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let item = match self {
            Item::Print => "print",
            Item::PrintValue => "print value",
            Item::Statement => "statement",
            Item::VariableName => "variable name",
            Item::TypeName => "type name",
            Item::Expression => "expression",
        };
        write!(f, "{}", item)
    }
}
