//! Scanner, parser and tree-walking interpreter for a small Lox-like
//! language: literals, unary/binary/ternary expressions, variables, blocks
//! and `print`.
//!
//! The pipeline is staged: [`scan`] turns text into tokens, [`parse_program`]
//! turns tokens into statements and [`Interpreter`] executes them. Each stage
//! returns its own diagnostics.

pub mod ast;
pub mod common;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod value;

#[cfg(test)]
mod tests;

use std::io::Write;

pub use common::Error;
pub use interpreter::{interpret, Interpreter};
pub use lexer::scan;
pub use parser::{parse_expression, parse_program};
pub use value::Value;

/// Scans, parses and runs `source`, writing `print` output to `out`.
///
/// Stops after the first stage that reports diagnostics and returns all of
/// them; a runtime error is always reported alone.
pub fn run<W: Write>(source: &str, out: &mut W) -> Result<(), Vec<Error>> {
    let (tokens, errors) = scan(source);
    if !errors.is_empty() {
        return Err(errors);
    }

    let (stmts, errors) = parse_program(&tokens);
    if !errors.is_empty() {
        return Err(errors);
    }

    Interpreter::new(out).interpret(&stmts).map_err(|err| vec![err])
}
