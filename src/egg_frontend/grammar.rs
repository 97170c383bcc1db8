use super::span::Span;

use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrefixOperator {
    Identity,
    Negate,
    LogicalNot,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InfixOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    And,
    Or,
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterEq,
    LessThan,
    LessEq,
}

/// The closed set of primitive types a variable can be declared with.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DataType {
    String,
    Number,
    Boolean,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Stmt {
    pub stmt: StmtType,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone)]
pub enum StmtType {
    Print(Expr),
    VariableDecl(VariableDecl),
    Assignment(Identifier, Expr),
    IfElse(Expr, Vec<Stmt>, Option<Vec<Stmt>>),
    Block(Vec<Stmt>),
}

#[derive(Debug, PartialEq, Clone)]
pub struct VariableDecl {
    pub ident: Identifier,
    pub data_type: DataType,
    pub initializer: Option<Expr>,
    pub constant: bool,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Expr {
    pub expr: ExprType,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ExprType {
    Literal(Literal),
    Variable(Identifier),
    Infix(InfixOperator, Box<Expr>, Box<Expr>),
    Prefix(PrefixOperator, Box<Expr>),
    Assignment(Identifier, Box<Expr>),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Number(f64),
    Boolean(bool),
    Str(String),
}

impl PrefixOperator {
    pub fn from_symbol(symbol: &str) -> Option<PrefixOperator> {
        let op = match symbol {
            "+" => PrefixOperator::Identity,
            "-" => PrefixOperator::Negate,
            "!" => PrefixOperator::LogicalNot,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(&self) -> &str {
        match self {
            PrefixOperator::Identity => "+",
            PrefixOperator::Negate => "-",
            PrefixOperator::LogicalNot => "!",
        }
    }
}

impl InfixOperator {
    pub fn from_symbol(symbol: &str) -> Option<InfixOperator> {
        let op = match symbol {
            "+" => InfixOperator::Add,
            "-" => InfixOperator::Subtract,
            "*" => InfixOperator::Multiply,
            "/" => InfixOperator::Divide,
            "&" => InfixOperator::And,
            "|" => InfixOperator::Or,
            "==" => InfixOperator::EqualTo,
            "!=" => InfixOperator::NotEqualTo,
            ">" => InfixOperator::GreaterThan,
            ">=" => InfixOperator::GreaterEq,
            "<" => InfixOperator::LessThan,
            "<=" => InfixOperator::LessEq,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(&self) -> &str {
        match self {
            InfixOperator::Add => "+",
            InfixOperator::Subtract => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::And => "&",
            InfixOperator::Or => "|",
            InfixOperator::EqualTo => "==",
            InfixOperator::NotEqualTo => "!=",
            InfixOperator::GreaterThan => ">",
            InfixOperator::GreaterEq => ">=",
            InfixOperator::LessThan => "<",
            InfixOperator::LessEq => "<=",
        }
    }
}

impl DataType {
    /// Maps a type keyword (`string`, `num`, `bool`) to its type.
    pub fn from_keyword(keyword: &str) -> Option<DataType> {
        match keyword {
            "string" => Some(DataType::String),
            "num" => Some(DataType::Number),
            "bool" => Some(DataType::Boolean),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            DataType::String => "string",
            DataType::Number => "num",
            DataType::Boolean => "bool",
        }
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl Identifier {
    pub fn new(name: String, span: Span) -> Self {
        Self { name, span }
    }
}

impl Stmt {
    pub fn new(stmt: StmtType, span: Span) -> Self {
        Stmt { stmt, span }
    }

    pub fn ast_string(&self) -> String {
        match &self.stmt {
            StmtType::Print(expr) => format!("(print {})", expr.ast_string()),
            StmtType::VariableDecl(decl) => {
                let keyword = if decl.constant { "const" } else { "var" };
                match &decl.initializer {
                    Some(expr) => format!(
                        "({} {} {} {})",
                        keyword,
                        decl.data_type,
                        decl.ident.name,
                        expr.ast_string()
                    ),
                    None => format!("({} {} {})", keyword, decl.data_type, decl.ident.name),
                }
            }
            StmtType::Assignment(var, expr) => format!("(set {} {})", var.name, expr.ast_string()),
            StmtType::IfElse(condition, body, otherwise) => {
                let body = block_string(body);
                match otherwise {
                    Some(otherwise) => format!(
                        "(if {} {} {})",
                        condition.ast_string(),
                        body,
                        block_string(otherwise)
                    ),
                    None => format!("(if {} {})", condition.ast_string(), body),
                }
            }
            StmtType::Block(stmts) => block_string(stmts),
        }
    }
}

impl Expr {
    pub fn new(expr: ExprType, span: Span) -> Self {
        Expr { expr, span }
    }

    pub fn ast_string(&self) -> String {
        match &self.expr {
            ExprType::Literal(l) => match l {
                Literal::Number(n) => n.to_string(),
                Literal::Boolean(b) => b.to_string(),
                Literal::Str(s) => format!("\"{}\"", s),
            },
            ExprType::Variable(var) => var.name.clone(),
            ExprType::Infix(op, lhs, rhs) => format!(
                "({} {} {})",
                op.symbol(),
                lhs.ast_string(),
                rhs.ast_string()
            ),
            ExprType::Prefix(op, expr) => format!("({} {})", op.symbol(), expr.ast_string()),
            ExprType::Assignment(var, expr) => format!("(set {} {})", var.name, expr.ast_string()),
        }
    }
}

fn block_string(stmts: &[Stmt]) -> String {
    let mut result = String::from("(block");
    for stmt in stmts.iter() {
        result.push(' ');
        result.push_str(&stmt.ast_string());
    }
    result.push(')');
    result
}
