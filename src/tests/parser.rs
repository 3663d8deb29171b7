use pretty_assertions::assert_eq;

use crate::ast::{Expr, Stmt};
use crate::common::Error;
use crate::lexer::scan;
use crate::parser::{parse_expression, parse_program};

fn program(source: &str) -> (Vec<Stmt>, Vec<Error>) {
    let (tokens, errors) = scan(source);
    assert!(errors.is_empty(), "{:?}", errors);
    parse_program(&tokens)
}

fn printed(source: &str) -> Vec<String> {
    let (stmts, errors) = program(source);
    assert!(errors.is_empty(), "{:?}", errors);
    stmts.iter().map(Stmt::to_string).collect()
}

fn expr(source: &str) -> String {
    let (tokens, _) = scan(source);
    parse_expression(&tokens).map(|expr| expr.to_string()).unwrap()
}

fn error_messages(source: &str) -> Vec<String> {
    program(source).1.iter().map(Error::to_string).collect()
}

#[test]
fn literals() {
    assert_eq!(expr("true"), "true");
    assert_eq!(expr("false"), "false");
    assert_eq!(expr("nil"), "nil");
    assert_eq!(expr("42"), "42.0");
    assert_eq!(expr("0.5"), "0.5");
    assert_eq!(expr("\"hi there\""), "hi there");
}

#[test]
fn precedence() {
    assert_eq!(expr("1 + 2 * 3"), "(+ 1.0 (* 2.0 3.0))");
    assert_eq!(expr("(1 + 2) * 3"), "(* (group (+ 1.0 2.0)) 3.0)");
    assert_eq!(expr("1 < 2 == 3 >= 4"), "(== (< 1.0 2.0) (>= 3.0 4.0))");
    assert_eq!(expr("-1 - -2"), "(- (- 1.0) (- 2.0))");
    assert_eq!(expr("!!true"), "(! (! true))");
    assert_eq!(expr("1 != 2 / 4"), "(!= 1.0 (/ 2.0 4.0))");
}

#[test]
fn binary_operators_associate_left() {
    assert_eq!(expr("1 - 2 - 3"), "(- (- 1.0 2.0) 3.0)");
    assert_eq!(expr("8 / 4 / 2"), "(/ (/ 8.0 4.0) 2.0)");
    assert_eq!(expr("1 == 1 == true"), "(== (== 1.0 1.0) true)");
}

#[test]
fn assignment_chains_right() {
    assert_eq!(expr("a = b = 3"), "(= a (= b 3.0))");
    assert_eq!(expr("a = 1 + 2"), "(= a (+ 1.0 2.0))");
}

#[test]
fn ternary() {
    assert_eq!(expr("a ? 1 : 2"), "(?: a 1.0 2.0)");
    assert_eq!(expr("a ? b : c ? d : e"), "(?: a b (?: c d e))");
    assert_eq!(expr("x = a == b ? 1 : 2"), "(= x (?: (== a b) 1.0 2.0))");
}

#[test]
fn statements() {
    assert_eq!(
        printed("var a; var b = 1; print a + b; a = 2; { var c = 3; print c; } {}"),
        vec![
            "(var a)",
            "(var b 1.0)",
            "(print (+ a b))",
            "(; (= a 2.0))",
            "(block (var c 3.0) (print c))",
            "(block)",
        ]
    );
}

#[test]
fn nested_blocks() {
    let (stmts, errors) = program("{ { print 1; } }");
    assert!(errors.is_empty());
    match &stmts[..] {
        [Stmt::Block(outer)] => match &outer.stmts[..] {
            [Stmt::Block(inner)] => assert_eq!(inner.stmts.len(), 1),
            other => panic!("unexpected inner statements: {:?}", other),
        },
        other => panic!("unexpected statements: {:?}", other),
    }
}

#[test]
fn missing_paren_is_a_single_error() {
    assert_eq!(
        error_messages("(1 + 2"),
        vec!["[line 1] Error at end: Expect ')' after expression."]
    );
}

#[test]
fn expect_expression() {
    assert_eq!(
        error_messages("print ;"),
        vec!["[line 1] Error at ';': Expect expression."]
    );
    assert_eq!(
        error_messages("var x = class;"),
        vec!["[line 1] Error at 'class': Expect expression."]
    );
}

#[test]
fn missing_semicolons_and_braces() {
    assert_eq!(
        error_messages("print 1"),
        vec!["[line 1] Error at end: Expect ';' after value."]
    );
    assert_eq!(
        error_messages("1 + 2\n"),
        vec!["[line 2] Error at end: Expect ';' after expression."]
    );
    assert_eq!(
        error_messages("var 1;"),
        vec!["[line 1] Error at '1': Expect variable name."]
    );
    assert_eq!(
        error_messages("var a = 1"),
        vec!["[line 1] Error at end: Expect ';' after variable declaration."]
    );
    assert_eq!(
        error_messages("{ print 1;"),
        vec!["[line 1] Error at end: Expect '}' after block."]
    );
    assert_eq!(
        error_messages("print true ? 1;"),
        vec!["[line 1] Error at ';': Expect ':' after then branch of conditional expression."]
    );
}

#[test]
fn invalid_assignment_target() {
    let (stmts, errors) = program("1 + a = 3; print 2;");
    assert_eq!(
        errors.iter().map(Error::to_string).collect::<Vec<_>>(),
        vec!["[line 1] Error at '=': Invalid assignment target."]
    );
    // the statement is kept and parsing carries on
    assert_eq!(stmts.len(), 2);
    assert!(matches!(&stmts[0], Stmt::Expression(stmt) if matches!(stmt.expr, Expr::Binary(_))));
}

#[test]
fn recovers_at_statement_boundaries() {
    let (stmts, errors) = program("print (1;\nvar a = 1;\nprint a +;\nprint a;");
    assert_eq!(
        errors.iter().map(Error::to_string).collect::<Vec<_>>(),
        vec![
            "[line 1] Error at ';': Expect ')' after expression.",
            "[line 3] Error at ';': Expect expression.",
        ]
    );
    assert_eq!(
        stmts.iter().map(Stmt::to_string).collect::<Vec<_>>(),
        vec!["(var a 1.0)", "(print a)"]
    );
}

#[test]
fn recovers_before_statement_keywords() {
    let (stmts, errors) = program("var = 1 print 2;");
    assert_eq!(
        errors.iter().map(Error::to_string).collect::<Vec<_>>(),
        vec!["[line 1] Error at '=': Expect variable name."]
    );
    assert_eq!(errors[0].line(), Some(1));
    assert_eq!(
        stmts.iter().map(Stmt::to_string).collect::<Vec<_>>(),
        vec!["(print 2.0)"]
    );
}

#[test]
fn parse_expression_rejects_trailing_tokens() {
    let (tokens, _) = scan("1 2");
    assert_eq!(
        parse_expression(&tokens).map_err(|err| err.to_string()),
        Err("[line 1] Error at '2': Expect end of expression.".to_string())
    );
}

#[test]
fn token_stream_without_eof() {
    let (mut tokens, _) = scan("print 1;");
    tokens.pop();
    let (stmts, errors) = parse_program(&tokens);
    assert!(errors.is_empty());
    assert_eq!(stmts.len(), 1);

    let (stmts, errors) = parse_program(&[]);
    assert!(stmts.is_empty() && errors.is_empty());
}

#[test]
fn recovers_inside_blocks() {
    let (stmts, errors) = program("{ print 1 +; print 2; }");
    assert_eq!(
        errors.iter().map(Error::to_string).collect::<Vec<_>>(),
        vec!["[line 1] Error at ';': Expect expression."]
    );
    assert_eq!(
        stmts.iter().map(Stmt::to_string).collect::<Vec<_>>(),
        vec!["(block (print 2.0))"]
    );

    assert_eq!(
        error_messages("{ var = 1; print 2; }"),
        vec!["[line 1] Error at '=': Expect variable name."]
    );
}

#[test]
fn recovers_inside_nested_blocks() {
    let (stmts, errors) = program("{ { print ; } print 1; }\nprint 2;");
    assert_eq!(
        errors.iter().map(Error::to_string).collect::<Vec<_>>(),
        vec!["[line 1] Error at ';': Expect expression."]
    );
    assert_eq!(
        stmts.iter().map(Stmt::to_string).collect::<Vec<_>>(),
        vec!["(block (block) (print 1.0))", "(print 2.0)"]
    );
}
