use super::span::Span;

use std::fmt;

/// Category of a token. Decides which grammar rule may consume it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenType {
    // Starts a statement: print, if, var, const.
    Keyword,
    // Reserved words usable inside expressions: true, false, else and type names.
    FreeKeyword,
    Punctuation,
    Operator,
    Number,
    String,
    Identifier,
    EndOfFile,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, value: impl Into<String>) -> Self {
        Token {
            token_type,
            value: value.into(),
        }
    }

    pub fn end_of_file() -> Self {
        Token::new(TokenType::EndOfFile, "")
    }

    /// Checks both the category and the literal text.
    pub fn is(&self, token_type: TokenType, value: &str) -> bool {
        self.token_type == token_type && self.value == value
    }
}

impl SpannedToken {
    pub fn new(token: Token, span: Span) -> Self {
        SpannedToken { token, span }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenType::Keyword => "keyword",
            TokenType::FreeKeyword => "free keyword",
            TokenType::Punctuation => "punctuation",
            TokenType::Operator => "operator",
            TokenType::Number => "number",
            TokenType::String => "string",
            TokenType::Identifier => "identifier",
            TokenType::EndOfFile => "end of file",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.token_type {
            TokenType::EndOfFile => write!(f, "end of file"),
            TokenType::String => write!(f, "string \"{}\"", self.value),
            _ => write!(f, "{} `{}`", self.token_type, self.value),
        }
    }
}
