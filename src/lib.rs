pub mod egg_frontend;
pub mod treewalk_interpreter;

use egg_frontend::errors::{LexError, ParserError};
use egg_frontend::grammar::{Expr, Stmt};
use egg_frontend::Parser;
use treewalk_interpreter::{Interpreter, RuntimeError, Value};

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub use egg_frontend::tokenize;

/// File extension accepted by [`execute_file`].
pub const SOURCE_EXTENSION: &str = "egg";

#[derive(Debug, Error)]
pub enum EggError {
    #[error("Expected a .egg file, got {}", .0.display())]
    Filetype(PathBuf),
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] ParserError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type EggResult<T> = Result<T, EggError>;

fn parser_for(source: &str) -> EggResult<Parser> {
    Ok(Parser::new(tokenize(source)?))
}

pub fn parse_program(source: &str) -> EggResult<Vec<Stmt>> {
    Ok(parser_for(source)?.parse()?)
}

/// Parses exactly one statement. Anything after it is a syntax error.
pub fn parse_one_statement(source: &str) -> EggResult<Stmt> {
    Ok(parser_for(source)?.parse_single_statement()?)
}

/// Parses exactly one expression. Anything after it is a syntax error.
pub fn parse_one_expression(source: &str) -> EggResult<Expr> {
    Ok(parser_for(source)?.parse_single_expression()?)
}

/// Runs a program, printing to stdout.
pub fn execute_program(source: &str) -> EggResult<()> {
    execute_program_with_output(source, io::stdout())
}

/// Runs a program, printing to `output`. Nothing runs unless the whole
/// program parses; a runtime error stops at the failing statement.
pub fn execute_program_with_output<W: Write>(source: &str, output: W) -> EggResult<()> {
    let stmts = parse_program(source)?;
    let mut interpreter = Interpreter::new_with_output(output);
    interpreter.eval_statements(&stmts)?;
    Ok(())
}

/// Reads a script, rejecting anything without the `.egg` extension before
/// touching the file system.
pub fn read_source_file<P: AsRef<Path>>(path: P) -> EggResult<String> {
    let path = path.as_ref();
    if path.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
        return Err(EggError::Filetype(path.to_owned()));
    }

    let source = std::fs::read_to_string(path).map_err(|source| EggError::Io {
        path: path.to_owned(),
        source,
    })?;
    info!(path = %path.display(), bytes = source.len(), "loaded script");
    Ok(source)
}

pub fn execute_file<P: AsRef<Path>>(path: P) -> EggResult<()> {
    let source = read_source_file(path)?;
    execute_program(&source)
}

/// Evaluates an expression with no variables in scope.
pub fn evaluate_one_expression(expr: &Expr) -> EggResult<Value> {
    let mut interpreter = Interpreter::new_with_output(io::sink());
    Ok(interpreter.eval_expression(expr)?)
}
