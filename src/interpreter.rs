use std::io::{self, Write};

use tracing::{debug, trace};

use crate::{
    ast,
    common::Error,
    environment::{Environment, ScopeId},
    token::{Token, TokenKind},
    value::Value,
};

type EvalResult<T> = Result<T, Error>;

fn unary_op(op: &Token, operand: Value) -> EvalResult<Value> {
    match (op.kind, operand) {
        (TokenKind::Bang, operand) => Ok(Value::Bool(!operand.is_truthy())),
        (TokenKind::Minus, Value::Number(number)) => Ok(Value::Number(-number)),
        _ => Err(Error::runtime(op.line, "Operand must be a number.")),
    }
}

fn binary_op(op: &Token, left: Value, right: Value) -> EvalResult<Value> {
    use TokenKind::{
        BangEqual, EqualEqual, Greater, GreaterEqual, Less, LessEqual, Minus, Plus, Slash, Star,
    };
    use Value::{Bool, Number};

    let value = match (op.kind, left, right) {
        (EqualEqual, left, right) => Bool(left == right),
        (BangEqual, left, right) => Bool(left != right),

        (Plus, Number(left), Number(right)) => Number(left + right),
        (Plus, Value::String(left), Value::String(right)) => Value::String(left + &right),
        (Plus, _, _) => {
            return Err(Error::runtime(
                op.line,
                "Operands must be two numbers or two strings.",
            ))
        }

        (Minus, Number(left), Number(right)) => Number(left - right),
        (Star, Number(left), Number(right)) => Number(left * right),
        (Slash, Number(left), Number(right)) => Number(left / right),
        (Greater, Number(left), Number(right)) => Bool(left > right),
        (GreaterEqual, Number(left), Number(right)) => Bool(left >= right),
        (Less, Number(left), Number(right)) => Bool(left < right),
        (LessEqual, Number(left), Number(right)) => Bool(left <= right),

        _ => return Err(Error::runtime(op.line, "Operands must be numbers.")),
    };

    Ok(value)
}

/// Walks statement trees against a chain of scopes, writing `print` output
/// to `out`.
pub struct Interpreter<W: Write> {
    env: Environment,
    scope: ScopeId,
    out: W,
}

impl Interpreter<io::Stdout> {
    pub fn stdout() -> Self {
        Interpreter::new(io::stdout())
    }
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        let env = Environment::new();
        let scope = env.global();
        Interpreter { env, scope, out }
    }

    #[cfg(test)]
    pub(crate) fn environment(&self) -> &Environment {
        &self.env
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.out
    }

    /// Runs `stmts` in order; the first runtime error ends the run.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn interpret(&mut self, stmts: &[ast::Stmt]) -> EvalResult<()> {
        debug!(stmts = stmts.len(), "interpreting");
        for stmt in stmts {
            self.execute(stmt).map_err(|err| {
                debug!(%err, "runtime error");
                err
            })?;
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &ast::Stmt) -> EvalResult<()> {
        match stmt {
            ast::Stmt::Expression(expr_stmt) => {
                self.evaluate(&expr_stmt.expr)?;
            }
            ast::Stmt::Print(print_stmt) => {
                let value = self.evaluate(&print_stmt.expr)?;
                writeln!(self.out, "{}", value)
                    .and_then(|_| self.out.flush())
                    .map_err(|err| Error::Output(format!("Failed to write output: {}", err)))?;
            }
            ast::Stmt::Var(var_stmt) => {
                let value = match &var_stmt.init {
                    Some(init) => self.evaluate(init)?,
                    None => Value::Nil,
                };
                trace!(name = %var_stmt.ident.lexeme, %value, "define");
                self.env.define(self.scope, &var_stmt.ident.lexeme, value);
            }
            ast::Stmt::Block(block) => {
                let enclosing = self.scope;
                self.scope = self.env.nest(enclosing);

                let result = block.stmts.iter().try_for_each(|stmt| self.execute(stmt));

                self.env.unnest(self.scope);
                self.scope = enclosing;
                result?;
            }
        }

        Ok(())
    }

    pub fn evaluate(&mut self, expr: &ast::Expr) -> EvalResult<Value> {
        match expr {
            ast::Expr::Literal(lit) => Ok(Value::from(&lit.value)),
            ast::Expr::Grouping(grouping) => self.evaluate(&grouping.expr),
            ast::Expr::Unary(unary) => {
                let operand = self.evaluate(&unary.expr)?;
                unary_op(&unary.op, operand)
            }
            ast::Expr::Binary(bin) => {
                let left = self.evaluate(&bin.left)?;
                let right = self.evaluate(&bin.right)?;
                binary_op(&bin.op, left, right)
            }
            ast::Expr::Ternary(ternary) => {
                if self.evaluate(&ternary.condition)?.is_truthy() {
                    self.evaluate(&ternary.then_expr)
                } else {
                    self.evaluate(&ternary.else_expr)
                }
            }
            ast::Expr::Variable(var) => self.env.get(self.scope, &var.ident),
            ast::Expr::Assign(assign) => {
                let value = self.evaluate(&assign.value)?;
                self.env.assign(self.scope, &assign.ident, value.clone())?;
                Ok(value)
            }
        }
    }
}

/// Runs a program against a fresh global scope, printing to stdout.
pub fn interpret(stmts: &[ast::Stmt]) -> Result<(), Error> {
    Interpreter::stdout().interpret(stmts)
}
