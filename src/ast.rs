use std::fmt;

use derive_more::From;

use crate::{common::format_number, token};

#[derive(Debug, Clone, PartialEq)]
pub enum LitValue {
    Number(f64),
    String(String),
    Bool(bool),
    Nil,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LitExpr {
    pub value: LitValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    pub expr: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: token::Token,
    pub expr: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: token::Token,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// `condition ? then_expr : else_expr`
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpr {
    pub condition: Box<Expr>,
    pub then_expr: Box<Expr>,
    pub else_expr: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarExpr {
    pub ident: token::Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub ident: token::Token,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, From)]
pub enum Expr {
    Literal(LitExpr),
    Grouping(GroupingExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Ternary(TernaryExpr),
    Variable(VarExpr),
    Assign(AssignExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarStmt {
    pub ident: token::Token,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, From)]
pub enum Stmt {
    Block(BlockStmt),
    Expression(ExprStmt),
    Print(PrintStmt),
    Var(VarStmt),
}

// The `parse` command prints trees in a parenthesized prefix form.

impl fmt::Display for LitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LitValue::Number(number) => f.write_str(&format_number(*number)),
            LitValue::String(string) => f.write_str(string),
            LitValue::Bool(boolean) => write!(f, "{}", boolean),
            LitValue::Nil => f.write_str("nil"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(lit) => write!(f, "{}", lit.value),
            Expr::Grouping(grouping) => write!(f, "(group {})", grouping.expr),
            Expr::Unary(unary) => write!(f, "({} {})", unary.op.lexeme, unary.expr),
            Expr::Binary(binary) => write!(
                f,
                "({} {} {})",
                binary.op.lexeme, binary.left, binary.right
            ),
            Expr::Ternary(ternary) => write!(
                f,
                "(?: {} {} {})",
                ternary.condition, ternary.then_expr, ternary.else_expr
            ),
            Expr::Variable(var) => f.write_str(&var.ident.lexeme),
            Expr::Assign(assign) => write!(f, "(= {} {})", assign.ident.lexeme, assign.value),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Block(block) => {
                f.write_str("(block")?;
                for stmt in &block.stmts {
                    write!(f, " {}", stmt)?;
                }
                f.write_str(")")
            }
            Stmt::Expression(expr_stmt) => write!(f, "(; {})", expr_stmt.expr),
            Stmt::Print(print_stmt) => write!(f, "(print {})", print_stmt.expr),
            Stmt::Var(var_stmt) => match &var_stmt.init {
                Some(init) => write!(f, "(var {} {})", var_stmt.ident.lexeme, init),
                None => write!(f, "(var {})", var_stmt.ident.lexeme),
            },
        }
    }
}
