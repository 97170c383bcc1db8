use super::errors::{LexError, LexerResult};
use super::span::{CodePosition, Span};
use super::token::{SpannedToken, Token, TokenType};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// What a recognizer produces when its pattern matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Token(TokenType),
    Whitespace,
    Comment,
}

/// Recognizers in the order they are tried. The first match wins, which is
/// what lets keywords beat identifiers and `==` beat `=`.
static RECOGNIZERS: Lazy<Vec<(Lexeme, Regex)>> = Lazy::new(|| {
    let patterns = [
        (Lexeme::Token(TokenType::Keyword), r"^(print|if|var|const)\b"),
        (
            Lexeme::Token(TokenType::FreeKeyword),
            r"^(true|false|else|string|num|bool)\b",
        ),
        (Lexeme::Whitespace, r"^\s+"),
        (Lexeme::Comment, r"^(//.*|/\*[\s\S]*?\*/)"),
        (Lexeme::Token(TokenType::Punctuation), r"^[()\[\]{};]"),
        (
            Lexeme::Token(TokenType::Operator),
            r"^(\+\+|\+|-|\*|/|==|!=|!|&|\||>=|<=|>|<|=)",
        ),
        (Lexeme::Token(TokenType::Number), r"^[0-9]*\.?[0-9]+"),
        (Lexeme::Token(TokenType::String), r#"^"[^"]*""#),
        (Lexeme::Token(TokenType::Identifier), r"^\w+"),
    ];

    patterns
        .into_iter()
        .map(|(lexeme, pattern)| {
            let regex = Regex::new(pattern)
                .unwrap_or_else(|e| panic!("invalid recognizer pattern {}: {}", pattern, e));
            (lexeme, regex)
        })
        .collect()
});

pub struct Lexer<'src> {
    source: &'src str,
    position: CodePosition,
    seen_eof: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer from source code.
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            position: CodePosition::start(),
            seen_eof: false,
        }
    }

    /// Returns the next meaningful token, skipping whitespace and comments.
    /// Once the source is exhausted this keeps returning end of file.
    pub fn next_token(&mut self) -> LexerResult<SpannedToken> {
        loop {
            let rest = &self.source[self.position.byte_pos..];
            if rest.is_empty() {
                self.seen_eof = true;
                let span = Span::new(self.position, self.position);
                return Ok(SpannedToken::new(Token::end_of_file(), span));
            }

            let (lexeme, matched) = match recognize(rest) {
                Some(found) => found,
                None => {
                    return Err(LexError {
                        position: self.position,
                        character: rest.chars().next().unwrap_or_default(),
                    })
                }
            };

            let start_pos = self.position;
            self.position = start_pos.advance(matched);

            if let Lexeme::Token(token_type) = lexeme {
                let value = match token_type {
                    // Strip the surrounding quotes.
                    TokenType::String => &matched[1..matched.len() - 1],
                    _ => matched,
                };
                let token = Token::new(token_type, value);
                return Ok(SpannedToken::new(token, Span::new(start_pos, self.position)));
            }
        }
    }

    /// Returns an iterator version of lexer. The final item is the end of file token.
    pub fn iter(self) -> LexerIterator<'src> {
        LexerIterator { lexer: self }
    }
}

pub struct LexerIterator<'src> {
    lexer: Lexer<'src>,
}

impl<'src> Iterator for LexerIterator<'src> {
    type Item = LexerResult<SpannedToken>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.lexer.seen_eof {
            return None;
        }

        let result = self.lexer.next_token();
        if result.is_err() {
            // Nothing sensible follows an unrecognized character.
            self.lexer.seen_eof = true;
        }
        Some(result)
    }
}

/// Tries every recognizer in order against the start of `text`.
fn recognize(text: &str) -> Option<(Lexeme, &str)> {
    RECOGNIZERS.iter().find_map(|(lexeme, regex)| {
        regex
            .find(text)
            .filter(|m| !m.as_str().is_empty())
            .map(|m| (*lexeme, m.as_str()))
    })
}

/// Converts source text into tokens, terminated by a single end of file token.
pub fn tokenize(source: &str) -> LexerResult<Vec<SpannedToken>> {
    let tokens: LexerResult<Vec<_>> = Lexer::new(source).iter().collect();
    let tokens = tokens?;
    trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_values(source: &str) -> Vec<(TokenType, String)> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| (t.token.token_type, t.token.value))
            .collect()
    }

    fn tok(token_type: TokenType, value: &str) -> (TokenType, String) {
        (token_type, value.to_owned())
    }

    #[test]
    fn test_assigns_token_types() {
        use TokenType::*;

        assert_eq!(
            kinds_and_values("print(2.5 > 7 & true);"),
            vec![
                tok(Keyword, "print"),
                tok(Punctuation, "("),
                tok(Number, "2.5"),
                tok(Operator, ">"),
                tok(Number, "7"),
                tok(Operator, "&"),
                tok(FreeKeyword, "true"),
                tok(Punctuation, ")"),
                tok(Punctuation, ";"),
                tok(EndOfFile, ""),
            ]
        );
    }

    #[test]
    fn test_marks_end_of_file() {
        let tokens = tokenize("2").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].token, Token::end_of_file());

        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token.token_type, TokenType::EndOfFile);
    }

    #[test]
    fn test_keywords_need_word_boundary() {
        use TokenType::*;

        assert_eq!(
            kinds_and_values("printer iffy constant truest"),
            vec![
                tok(Identifier, "printer"),
                tok(Identifier, "iffy"),
                tok(Identifier, "constant"),
                tok(Identifier, "truest"),
                tok(EndOfFile, ""),
            ]
        );
        assert_eq!(
            kinds_and_values("var x [num]"),
            vec![
                tok(Keyword, "var"),
                tok(Identifier, "x"),
                tok(Punctuation, "["),
                tok(FreeKeyword, "num"),
                tok(Punctuation, "]"),
                tok(EndOfFile, ""),
            ]
        );
    }

    #[test]
    fn test_longer_operators_first() {
        use TokenType::*;

        assert_eq!(
            kinds_and_values("a == b != c >= d <= e x++ --"),
            vec![
                tok(Identifier, "a"),
                tok(Operator, "=="),
                tok(Identifier, "b"),
                tok(Operator, "!="),
                tok(Identifier, "c"),
                tok(Operator, ">="),
                tok(Identifier, "d"),
                tok(Operator, "<="),
                tok(Identifier, "e"),
                tok(Identifier, "x"),
                tok(Operator, "++"),
                tok(Operator, "-"),
                tok(Operator, "-"),
                tok(EndOfFile, ""),
            ]
        );
    }

    #[test]
    fn test_strings_and_numbers() {
        use TokenType::*;

        assert_eq!(
            kinds_and_values(r#""hello world" .5 12 "" 3.25"#),
            vec![
                tok(String, "hello world"),
                tok(Number, ".5"),
                tok(Number, "12"),
                tok(String, ""),
                tok(Number, "3.25"),
                tok(EndOfFile, ""),
            ]
        );
    }

    #[test]
    fn test_skips_comments() {
        use TokenType::*;

        let source = "// line comment\nprint /* block\ncomment */ 1";
        assert_eq!(
            kinds_and_values(source),
            vec![tok(Keyword, "print"), tok(Number, "1"), tok(EndOfFile, "")]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("print\n  x").unwrap();
        assert_eq!(tokens[1].span.start_pos, CodePosition::new(8, 2, 3));
        assert_eq!(tokens[1].span.end_pos, CodePosition::new(9, 2, 4));
    }

    #[test]
    fn test_invalid_character() {
        let error = tokenize("print(1 $ 2);").unwrap_err();
        assert_eq!(error.character, '$');
        assert_eq!(error.position.byte_pos, 8);

        // Unterminated strings fall through to the same error.
        let error = tokenize("x = \"abc").unwrap_err();
        assert_eq!(error.character, '"');
        assert_eq!(error.position, CodePosition::new(4, 1, 5));
    }
}
