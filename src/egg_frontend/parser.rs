use super::errors::{Item, ParserError, ParserErrorType, ParserResult};
use super::grammar::{DataType, Expr, ExprType, Identifier, Literal, Stmt, StmtType};
use super::grammar::{InfixOperator, PrefixOperator, VariableDecl};
use super::parser_utils::{ParserOperator, Precedence};
use super::span::Span;
use super::token::{SpannedToken, Token, TokenType};

use tracing::debug;

pub struct Parser {
    tokens: std::vec::IntoIter<SpannedToken>,
    current: SpannedToken,
    previous: SpannedToken,
}

impl Parser {
    /// Creates a parser over a token sequence produced by the lexer.
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        let mut tokens = tokens.into_iter();
        let eof = SpannedToken::new(Token::end_of_file(), Span::default());
        let current = tokens.next().unwrap_or_else(|| eof.clone());

        Parser {
            tokens,
            current,
            previous: eof,
        }
    }

    /// Advances the stream. Past the end it keeps yielding end of file.
    fn bump(&mut self) {
        let next = match self.tokens.next() {
            Some(token) => token,
            None => {
                let end = self.current.span.end_pos;
                SpannedToken::new(Token::end_of_file(), Span::new(end, end))
            }
        };
        self.previous = std::mem::replace(&mut self.current, next);
    }

    /// Checks whether or not the current token matches type and text.
    fn check(&self, token_type: TokenType, value: &str) -> bool {
        self.current.token.is(token_type, value)
    }

    fn check_type(&self, token_type: TokenType) -> bool {
        self.current.token.token_type == token_type
    }

    /// Checks whether or not the current token matches the given token.
    /// If true consume it and return true, else return false.
    fn check_consume(&mut self, token_type: TokenType, value: &str) -> bool {
        if self.check(token_type, value) {
            self.bump();
            return true;
        }
        false
    }

    /// Consumes a token the caller has already checked for.
    fn expect(&mut self, token_type: TokenType, value: &str) {
        debug_assert!(self.check(token_type, value));
        self.bump();
    }

    fn consume(
        &mut self,
        token_type: TokenType,
        value: &str,
        error: ParserErrorType,
    ) -> ParserResult<()> {
        if self.check_consume(token_type, value) {
            Ok(())
        } else {
            Err(self.error(error))
        }
    }

    /// Builds an error pointing at the current token.
    fn error(&self, error: ParserErrorType) -> ParserError {
        ParserError {
            error,
            found: self.current.token.to_string(),
            span: self.current.span,
        }
    }

    /// Parses the whole program as a sequence of statements.
    pub fn parse(mut self) -> ParserResult<Vec<Stmt>> {
        let mut stmts = vec![];

        while !self.check_type(TokenType::EndOfFile) {
            stmts.push(self.parse_statement()?);
        }

        debug!(statements = stmts.len(), "parsed program");
        Ok(stmts)
    }

    /// Parses exactly one statement followed by end of input.
    pub fn parse_single_statement(mut self) -> ParserResult<Stmt> {
        let stmt = self.parse_statement()?;
        self.expect_end_of_input()?;
        Ok(stmt)
    }

    /// Parses exactly one expression followed by end of input.
    pub fn parse_single_expression(mut self) -> ParserResult<Expr> {
        let expr = self.parse_expression()?;
        self.expect_end_of_input()?;
        Ok(expr)
    }

    fn expect_end_of_input(&self) -> ParserResult<()> {
        if self.check_type(TokenType::EndOfFile) {
            Ok(())
        } else {
            Err(self.error(ParserErrorType::ExpectedEndOfInput))
        }
    }

    fn parse_statement(&mut self) -> ParserResult<Stmt> {
        let curr_span = self.current.span;
        let token = self.current.token.clone();

        let stmt_type = match (token.token_type, token.value.as_str()) {
            (TokenType::Keyword, "print") => self.parse_print()?,
            (TokenType::Keyword, "if") => self.parse_if_else()?,
            (TokenType::Keyword, "var") | (TokenType::Keyword, "const") => {
                self.parse_variable_decl()?
            }
            (TokenType::FreeKeyword, value) if DataType::from_keyword(value).is_some() => {
                self.parse_variable_decl()?
            }
            (TokenType::Punctuation, "{") => {
                self.bump();
                StmtType::Block(self.parse_block_stmts()?)
            }
            _ => self.parse_expression_statement()?,
        };

        Ok(Stmt::new(stmt_type, curr_span.extend(self.previous.span)))
    }

    fn parse_print(&mut self) -> ParserResult<StmtType> {
        self.expect(TokenType::Keyword, "print");
        self.consume(
            TokenType::Punctuation,
            "(",
            ParserErrorType::ExpectedAfter("(", Item::Print),
        )?;
        let expr = self.parse_expression()?;
        self.consume(
            TokenType::Punctuation,
            ")",
            ParserErrorType::ExpectedAfter(")", Item::PrintValue),
        )?;
        self.consume_terminator()?;

        Ok(StmtType::Print(expr))
    }

    /// Handles both `var NAME [TYPE] = EXPR;` and `TYPE NAME = EXPR;`, each
    /// optionally led by `const`.
    fn parse_variable_decl(&mut self) -> ParserResult<StmtType> {
        let constant = self.check_consume(TokenType::Keyword, "const");
        let bracketed = if constant {
            self.check_type(TokenType::Identifier)
        } else {
            self.check_consume(TokenType::Keyword, "var")
        };

        let (ident, data_type) = if bracketed {
            let ident = self.parse_identifier(Item::VariableName)?;
            self.consume(
                TokenType::Punctuation,
                "[",
                ParserErrorType::ExpectedBefore("[", Item::TypeName),
            )?;
            let data_type = self.parse_data_type()?;
            self.consume(
                TokenType::Punctuation,
                "]",
                ParserErrorType::ExpectedAfter("]", Item::TypeName),
            )?;
            (ident, data_type)
        } else {
            let data_type = self.parse_data_type()?;
            let ident = self.parse_identifier(Item::VariableName)?;
            (ident, data_type)
        };

        let initializer = if self.check_consume(TokenType::Operator, "=") {
            Some(self.parse_expression()?)
        } else {
            None
        };

        if constant && initializer.is_none() {
            return Err(self.error(ParserErrorType::UninitializedConstant(ident.name)));
        }
        self.consume_terminator()?;

        Ok(StmtType::VariableDecl(VariableDecl {
            ident,
            data_type,
            initializer,
            constant,
        }))
    }

    fn parse_if_else(&mut self) -> ParserResult<StmtType> {
        self.expect(TokenType::Keyword, "if");

        // Parentheses around the condition are just a grouped expression.
        let condition = self.parse_expression()?;
        let body = self.parse_body()?;

        // An `else if` chain is a body made of a single nested conditional.
        let otherwise = if self.check_consume(TokenType::FreeKeyword, "else") {
            Some(self.parse_body()?)
        } else {
            None
        };

        Ok(StmtType::IfElse(condition, body, otherwise))
    }

    /// A braced block, or exactly one unbraced statement.
    fn parse_body(&mut self) -> ParserResult<Vec<Stmt>> {
        if self.check_consume(TokenType::Punctuation, "{") {
            self.parse_block_stmts()
        } else {
            Ok(vec![self.parse_statement()?])
        }
    }

    fn parse_block_stmts(&mut self) -> ParserResult<Vec<Stmt>> {
        let mut stmts = vec![];

        while !self.check(TokenType::Punctuation, "}") && !self.check_type(TokenType::EndOfFile)
        {
            stmts.push(self.parse_statement()?);
        }

        if self.check_type(TokenType::EndOfFile) {
            Err(self.error(ParserErrorType::UnclosedBrace))
        } else {
            self.expect(TokenType::Punctuation, "}");
            Ok(stmts)
        }
    }

    /// A bare expression is only a statement when it is an assignment or an
    /// increment (`NAME++`).
    fn parse_expression_statement(&mut self) -> ParserResult<StmtType> {
        let expr = self.parse_expression()?;

        let stmt_type = match expr.expr {
            ExprType::Assignment(var, value) => StmtType::Assignment(var, *value),
            ExprType::Variable(var) if self.check(TokenType::Operator, "++") => {
                self.bump();
                desugar_increment(var, self.previous.span)
            }
            other => {
                let expr = to_expr(other, expr.span);
                return Err(ParserError {
                    error: ParserErrorType::ExpectedStatement,
                    found: format!("expression {}", expr.ast_string()),
                    span: expr.span,
                });
            }
        };

        self.consume_terminator()?;
        Ok(stmt_type)
    }

    fn consume_terminator(&mut self) -> ParserResult<()> {
        self.consume(
            TokenType::Punctuation,
            ";",
            ParserErrorType::ExpectedAfter(";", Item::Statement),
        )
    }

    /// Parse expression with precedence.
    pub fn parse_expression(&mut self) -> ParserResult<Expr> {
        self.run_pratt_parse_algo(Precedence::Lowest)
    }

    /// Pratt parsing algo.
    fn run_pratt_parse_algo(&mut self, min_precedence: Precedence) -> ParserResult<Expr> {
        let prefix_op = if self.check_type(TokenType::Operator) {
            PrefixOperator::from_symbol(&self.current.token.value)
        } else {
            None
        };

        let mut lhs = match prefix_op {
            Some(op) => {
                let curr_span = self.current.span;
                self.bump();
                let expr = self.run_pratt_parse_algo(Precedence::Unary)?;
                to_expr(
                    ExprType::Prefix(op, Box::new(expr)),
                    curr_span.extend(self.previous.span),
                )
            }
            None => self.parse_primary()?,
        };

        while let Some(op) = ParserOperator::from_token(&self.current.token) {
            if !op.is_higher_precedence(min_precedence) {
                break;
            }

            let op_span = self.current.span;
            self.bump();

            let precedence = op.precedence();
            let lhs_span = lhs.span;

            let new_lhs = match op {
                ParserOperator::Infix(op) => {
                    let rhs = self.run_pratt_parse_algo(precedence)?;
                    ExprType::Infix(op, Box::new(lhs), Box::new(rhs))
                }
                ParserOperator::Assignment => {
                    let rhs_box = Box::new(self.run_pratt_parse_algo(precedence)?);
                    match lhs.expr {
                        ExprType::Variable(var) => ExprType::Assignment(var, rhs_box),
                        other => {
                            let target = to_expr(other, lhs_span);
                            return Err(ParserError {
                                error: ParserErrorType::ExpectedLValue,
                                found: format!("expression {}", target.ast_string()),
                                span: op_span,
                            });
                        }
                    }
                }
            };

            lhs = to_expr(new_lhs, lhs_span.extend(self.previous.span));
        }

        Ok(lhs)
    }

    /// Parse primary token.
    fn parse_primary(&mut self) -> ParserResult<Expr> {
        let curr_span = self.current.span;
        let token = self.current.token.clone();

        let expr = match (token.token_type, token.value.as_str()) {
            (TokenType::Number, value) => match value.parse() {
                Ok(n) => from_literal(Literal::Number(n)),
                Err(_) => return Err(self.error(ParserErrorType::InvalidNumber)),
            },
            (TokenType::String, _) => from_literal(Literal::Str(token.value)),
            (TokenType::FreeKeyword, "true") => from_literal(Literal::Boolean(true)),
            (TokenType::FreeKeyword, "false") => from_literal(Literal::Boolean(false)),
            (TokenType::Identifier, _) => {
                ExprType::Variable(Identifier::new(token.value, curr_span))
            }
            (TokenType::Punctuation, "(") => {
                self.bump();
                let sub_expr = self.parse_expression()?;
                self.consume(
                    TokenType::Punctuation,
                    ")",
                    ParserErrorType::ExpectedAfter(")", Item::Expression),
                )?;
                return Ok(sub_expr);
            }
            _ => return Err(self.error(ParserErrorType::ExpectedExpr)),
        };

        self.bump();
        Ok(to_expr(expr, curr_span))
    }

    fn parse_identifier(&mut self, item: Item) -> ParserResult<Identifier> {
        if !self.check_type(TokenType::Identifier) {
            return Err(self.error(ParserErrorType::ExpectedIdentifier(item)));
        }

        let ident = Identifier::new(self.current.token.value.clone(), self.current.span);
        self.bump();
        Ok(ident)
    }

    fn parse_data_type(&mut self) -> ParserResult<DataType> {
        let data_type = if self.check_type(TokenType::FreeKeyword) {
            DataType::from_keyword(&self.current.token.value)
        } else {
            None
        };

        match data_type {
            Some(data_type) => {
                self.bump();
                Ok(data_type)
            }
            None => Err(self.error(ParserErrorType::ExpectedTypeName)),
        }
    }
}

/// `NAME++` becomes `NAME = NAME + 1`, built from fresh nodes.
fn desugar_increment(var: Identifier, op_span: Span) -> StmtType {
    let span = var.span.extend(op_span);
    let current = to_expr(ExprType::Variable(var.clone()), var.span);
    let one = to_expr(from_literal(Literal::Number(1.0)), op_span);
    let sum = to_expr(
        ExprType::Infix(InfixOperator::Add, Box::new(current), Box::new(one)),
        span,
    );
    StmtType::Assignment(var, sum)
}

fn from_literal(l: Literal) -> ExprType {
    ExprType::Literal(l)
}

fn to_expr(expr: ExprType, span: Span) -> Expr {
    Expr::new(expr, span)
}
