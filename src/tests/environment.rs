use pretty_assertions::assert_eq;

use crate::common::Error;
use crate::environment::Environment;
use crate::token::{Token, TokenKind};
use crate::value::Value;

fn name(lexeme: &str) -> Token {
    Token::new(TokenKind::Identifier, lexeme, 7)
}

#[test]
fn define_and_get() {
    let mut env = Environment::new();
    let global = env.global();

    env.define(global, "a", Value::Number(1.0));
    assert_eq!(env.get(global, &name("a")), Ok(Value::Number(1.0)));

    env.define(global, "a", Value::String("again".into()));
    assert_eq!(env.get(global, &name("a")), Ok(Value::String("again".into())));
}

#[test]
fn undefined_lookup() {
    let env = Environment::new();
    assert_eq!(
        env.get(env.global(), &name("missing")),
        Err(Error::runtime(7, "Undefined variable 'missing'."))
    );
}

#[test]
fn lookup_walks_enclosing_scopes() {
    let mut env = Environment::new();
    let global = env.global();
    env.define(global, "outer", Value::Bool(true));

    let middle = env.nest(global);
    let inner = env.nest(middle);
    assert_eq!(env.get(inner, &name("outer")), Ok(Value::Bool(true)));
}

#[test]
fn shadowing_keeps_outer_binding() {
    let mut env = Environment::new();
    let global = env.global();
    env.define(global, "x", Value::Number(1.0));

    let inner = env.nest(global);
    env.define(inner, "x", Value::Number(2.0));
    assert_eq!(env.get(inner, &name("x")), Ok(Value::Number(2.0)));
    assert_eq!(env.get(global, &name("x")), Ok(Value::Number(1.0)));

    env.unnest(inner);
    assert_eq!(env.get(global, &name("x")), Ok(Value::Number(1.0)));
}

#[test]
fn assign_updates_nearest_definition() {
    let mut env = Environment::new();
    let global = env.global();
    env.define(global, "x", Value::Number(1.0));

    let inner = env.nest(global);
    env.assign(inner, &name("x"), Value::Nil).unwrap();
    assert_eq!(env.get(global, &name("x")), Ok(Value::Nil));

    env.define(inner, "x", Value::Number(5.0));
    env.assign(inner, &name("x"), Value::Number(6.0)).unwrap();
    assert_eq!(env.get(inner, &name("x")), Ok(Value::Number(6.0)));
    assert_eq!(env.get(global, &name("x")), Ok(Value::Nil));
}

#[test]
fn assign_never_creates_bindings() {
    let mut env = Environment::new();
    let global = env.global();
    let inner = env.nest(global);

    assert_eq!(
        env.assign(inner, &name("y"), Value::Number(1.0)),
        Err(Error::runtime(7, "Undefined variable 'y'."))
    );
    assert!(env.get(inner, &name("y")).is_err());
    assert!(env.get(global, &name("y")).is_err());
}

#[test]
fn unnest_discards_frames() {
    let mut env = Environment::new();
    let global = env.global();
    assert_eq!(env.depth(), 1);

    let a = env.nest(global);
    let _b = env.nest(a);
    assert_eq!(env.depth(), 3);

    env.unnest(a);
    assert_eq!(env.depth(), 1);

    env.unnest(global);
    assert_eq!(env.depth(), 1);
}
