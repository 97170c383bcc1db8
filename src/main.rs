use eggscript::treewalk_interpreter::Interpreter;
use eggscript::{execute_program, parse_one_expression, parse_program, read_source_file, tokenize};
use eggscript::{EggError, EggResult};

use clap::Parser;
use nu_ansi_term::Color;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Statement keywords that mark a REPL line as a statement.
const STATEMENT_STARTS: [&str; 7] = ["print", "if", "var", "const", "string", "num", "bool"];

/// Run EggScript programs
#[derive(Parser, Debug)]
#[clap(name = "egg", version, about = "Run EggScript programs", long_about = None)]
struct Args {
    /// Print the token stream instead of running
    #[clap(long)]
    tokens: bool,

    /// Print the parsed program as S-expressions instead of running
    #[clap(long)]
    ast: bool,

    /// Script to run (starts an interactive session if not provided)
    #[clap(parse(from_os_str))]
    script: Option<PathBuf>,
}

impl Args {
    fn dump_only(&self) -> bool {
        self.tokens || self.ast
    }
}

fn main() {
    init_logging();
    let args = Args::parse();
    debug!(?args, "starting");

    match &args.script {
        Some(path) => run_file(path, &args),
        None => run_prompt(&args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("EGG_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_file(path: &Path, args: &Args) {
    let result = read_source_file(path).and_then(|source| {
        if args.dump_only() {
            dump(&source, args)
        } else {
            execute_program(&source)
        }
    });

    if let Err(e) = result {
        report_error(&e);
        process::exit(exit_code(&e));
    }
}

fn run_prompt(args: &Args) {
    println!("EggScript interactive session. Type `exit` to quit.");
    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("{}", Color::Red.paint(format!("Error: {}", e)));
                break;
            }
        }

        let line = input.trim();
        match line {
            "" => continue,
            "exit" => break,
            _ => {}
        }

        let result = if args.dump_only() {
            dump(line, args)
        } else {
            run_line(&mut interpreter, line)
        };
        if let Err(e) = result {
            report_error(&e);
        }
    }
}

/// Statements run against the session's interpreter; a bare expression has
/// its value echoed.
fn run_line(interpreter: &mut Interpreter, line: &str) -> EggResult<()> {
    if is_statement(line) {
        let stmts = parse_program(line)?;
        interpreter.eval_statements(&stmts)?;
    } else {
        let expr = parse_one_expression(line)?;
        println!("{}", interpreter.eval_expression(&expr)?);
    }
    Ok(())
}

fn is_statement(line: &str) -> bool {
    if line.ends_with(';') || line.ends_with('}') || line.starts_with('{') {
        return true;
    }

    let first_word = line
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .next()
        .unwrap_or_default();
    STATEMENT_STARTS.contains(&first_word)
}

fn dump(source: &str, args: &Args) -> EggResult<()> {
    if args.tokens {
        for spanned in tokenize(source)? {
            let position = spanned.span.start_pos.to_string();
            println!("{:>8}  {}", position, spanned.token);
        }
    }
    if args.ast {
        for stmt in parse_program(source)? {
            println!("{}", stmt.ast_string());
        }
    }
    Ok(())
}

fn report_error(error: &EggError) {
    eprintln!("{}", Color::Red.paint(format!("Error: {}", error)));
}

fn exit_code(error: &EggError) -> i32 {
    match error {
        EggError::Lex(_) | EggError::Syntax(_) => 65,
        EggError::Runtime(_) => 70,
        EggError::Filetype(_) | EggError::Io { .. } => 66,
    }
}
