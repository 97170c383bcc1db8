use super::environment::{Environment, Variable};
use super::errors::{RuntimeError, RuntimeResult};
use super::value::Value;
use crate::egg_frontend::grammar::{
    Expr, ExprType, Identifier, InfixOperator, PrefixOperator, Stmt, StmtType, VariableDecl,
};

use std::io::{self, Write};
use tracing::{debug, trace};

/// Tree-walk interpreter. Variables persist across calls, so one instance can
/// run a whole program or a REPL session line by line.
pub struct Interpreter<W: Write = io::Stdout> {
    env: Environment,
    output: W,
}

impl Interpreter<io::Stdout> {
    pub fn new() -> Self {
        Self::new_with_output(io::stdout())
    }
}

impl Default for Interpreter<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    /// Sends `print` output to `output` instead of stdout.
    pub fn new_with_output(output: W) -> Self {
        Interpreter {
            env: Environment::new(),
            output,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn eval_statements(&mut self, stmts: &[Stmt]) -> RuntimeResult<()> {
        debug!(count = stmts.len(), "evaluating statements");
        for stmt in stmts.iter() {
            self.eval_statement(stmt)?;
        }
        Ok(())
    }

    pub fn eval_statement(&mut self, stmt: &Stmt) -> RuntimeResult<()> {
        trace!(stmt = %stmt.ast_string(), "evaluating statement");
        match &stmt.stmt {
            StmtType::Print(expr) => {
                let value = self.eval_expression(expr)?;
                writeln!(self.output, "{}", value)
                    .map_err(|e| RuntimeError::Output(e.to_string()))?;
            }
            StmtType::VariableDecl(decl) => self.eval_variable_decl(decl)?,
            StmtType::Assignment(var, expr) => {
                self.eval_assignment(var, expr)?;
            }
            StmtType::IfElse(condition, if_body, else_body) => {
                self.eval_if_else(condition, if_body, else_body.as_deref())?
            }
            StmtType::Block(stmts) => self.eval_block(stmts)?,
        }

        Ok(())
    }

    fn eval_variable_decl(&mut self, decl: &VariableDecl) -> RuntimeResult<()> {
        let name = &decl.ident.name;
        let variable = Variable::new(decl.data_type, decl.constant);
        match &decl.initializer {
            Some(expr) => {
                let value = self.eval_expression(expr)?;
                self.env.initialize(name, variable, value)
            }
            None => self.env.declare(name, variable),
        }
    }

    fn eval_assignment(&mut self, var: &Identifier, expr: &Expr) -> RuntimeResult<Value> {
        let value = self.eval_expression(expr)?;
        self.env.assign(&var.name, value.clone())?;
        Ok(value)
    }

    pub fn eval_if_else(
        &mut self,
        condition: &Expr,
        if_body: &[Stmt],
        else_body: Option<&[Stmt]>,
    ) -> RuntimeResult<()> {
        let condition = match self.eval_expression(condition)? {
            Value::Boolean(b) => b,
            other => return Err(RuntimeError::NonBooleanCondition(other.data_type())),
        };

        if condition {
            return self.eval_block(if_body);
        }
        if let Some(else_body) = else_body {
            return self.eval_block(else_body);
        }

        Ok(())
    }

    pub fn eval_block(&mut self, stmts: &[Stmt]) -> RuntimeResult<()> {
        self.env.push_scope();

        for stmt in stmts.iter() {
            if let Err(e) = self.eval_statement(stmt) {
                self.env.pop_scope();
                return Err(e);
            }
        }

        // Drop everything declared inside the block.
        self.env.pop_scope();
        Ok(())
    }

    pub fn eval_expression(&mut self, expr: &Expr) -> RuntimeResult<Value> {
        match &expr.expr {
            ExprType::Literal(l) => Ok(Value::from(l)),
            ExprType::Variable(var) => self.env.get(&var.name),
            ExprType::Infix(op, lhs, rhs) => self.eval_infix_operator(*op, lhs, rhs),
            ExprType::Prefix(op, expr) => self.eval_prefix_operator(*op, expr),
            ExprType::Assignment(var, expr) => self.eval_assignment(var, expr),
        }
    }

    /// Both operands are always evaluated, `&` and `|` included.
    pub fn eval_infix_operator(
        &mut self,
        op: InfixOperator,
        lhs: &Expr,
        rhs: &Expr,
    ) -> RuntimeResult<Value> {
        let lhs = self.eval_expression(lhs)?;
        let rhs = self.eval_expression(rhs)?;
        Value::apply_infix_op(op, lhs, rhs)
    }

    pub fn eval_prefix_operator(
        &mut self,
        op: PrefixOperator,
        expr: &Expr,
    ) -> RuntimeResult<Value> {
        let value = self.eval_expression(expr)?;
        Value::apply_prefix_op(op, value)
    }
}
