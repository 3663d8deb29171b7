use tracing::debug;

use crate::{
    ast,
    common::Error,
    token::{Literal, Token, TokenKind},
};

type ParseResult<T> = Result<T, Error>;

#[derive(Debug, Clone)]
struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    // errors that don't unwind the current declaration
    errors: Vec<Error>,
}

impl<'a> Parser<'a> {
    /// `tokens` must end with an `Eof` token, as produced by the lexer.
    fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            current: 0,
            errors: Vec::new(),
        }
    }

    fn peek(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        &tokens[self.current.min(tokens.len() - 1)]
    }

    fn previous(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        &tokens[self.current.saturating_sub(1)]
    }

    fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> &'a Token {
        if !self.at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// Consumes the next token if it is any of `kinds`.
    fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|kind| self.check(*kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> ParseResult<&'a Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(message))
        }
    }

    fn error_at_current(&self, message: &str) -> Error {
        self.peek().error_at(message)
    }

    /// Skips tokens until the start of what is probably the next statement.
    fn synchronize(&mut self) {
        self.advance();

        while !self.at_end() {
            if self.previous().kind == TokenKind::Semicolon || self.peek().kind.starts_statement() {
                return;
            }
            self.advance();
        }
    }

    /// Parses one declaration, or records its error and skips to the next
    /// statement boundary.
    fn parse_declaration_or_recover(&mut self) -> Option<ast::Stmt> {
        match self.parse_declaration() {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                debug!(%err, "syntax error");
                self.errors.push(err);
                self.synchronize();
                None
            }
        }
    }

    fn parse_declaration(&mut self) -> ParseResult<ast::Stmt> {
        if self.matches(&[TokenKind::Var]) {
            self.parse_var_decl()
        } else {
            self.parse_statement()
        }
    }

    fn parse_var_decl(&mut self) -> ParseResult<ast::Stmt> {
        let ident = self.expect(TokenKind::Identifier, "Expect variable name.")?.clone();

        let init = if self.matches(&[TokenKind::Equal]) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        self.expect(
            TokenKind::Semicolon,
            "Expect ';' after variable declaration.",
        )?;

        Ok(ast::VarStmt { ident, init }.into())
    }

    fn parse_statement(&mut self) -> ParseResult<ast::Stmt> {
        if self.matches(&[TokenKind::Print]) {
            let expr = self.parse_expr()?;
            self.expect(TokenKind::Semicolon, "Expect ';' after value.")?;
            return Ok(ast::PrintStmt { expr }.into());
        }

        if self.matches(&[TokenKind::LeftBrace]) {
            return Ok(ast::BlockStmt {
                stmts: self.parse_block()?,
            }
            .into());
        }

        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(ast::ExprStmt { expr }.into())
    }

    fn parse_block(&mut self) -> ParseResult<Vec<ast::Stmt>> {
        let mut stmts = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.at_end() {
            stmts.extend(self.parse_declaration_or_recover());
        }

        self.expect(TokenKind::RightBrace, "Expect '}' after block.")?;

        Ok(stmts)
    }

    fn parse_expr(&mut self) -> ParseResult<ast::Expr> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> ParseResult<ast::Expr> {
        let expr = self.parse_conditional()?;

        if self.matches(&[TokenKind::Equal]) {
            let equals = self.previous();
            let value = self.parse_assignment()?;

            return match expr {
                ast::Expr::Variable(var) => Ok(ast::AssignExpr {
                    ident: var.ident,
                    value: Box::new(value),
                }
                .into()),
                expr => {
                    // Reported, but the statement itself is still well formed.
                    self.errors.push(equals.error_at("Invalid assignment target."));
                    Ok(expr)
                }
            };
        }

        Ok(expr)
    }

    fn parse_conditional(&mut self) -> ParseResult<ast::Expr> {
        let condition = self.parse_equality()?;

        if self.matches(&[TokenKind::Question]) {
            let then_expr = self.parse_expr()?;
            self.expect(
                TokenKind::Colon,
                "Expect ':' after then branch of conditional expression.",
            )?;
            let else_expr = self.parse_conditional()?;

            return Ok(ast::TernaryExpr {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            }
            .into());
        }

        Ok(condition)
    }

    /// One left-associative precedence level: `next ( op next )*`.
    fn parse_binary(
        &mut self,
        ops: &[TokenKind],
        next: fn(&mut Self) -> ParseResult<ast::Expr>,
    ) -> ParseResult<ast::Expr> {
        let mut expr = next(self)?;

        while self.matches(ops) {
            let op = self.previous().clone();
            let right = next(self)?;
            expr = ast::BinaryExpr {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            }
            .into();
        }

        Ok(expr)
    }

    fn parse_equality(&mut self) -> ParseResult<ast::Expr> {
        self.parse_binary(
            &[TokenKind::BangEqual, TokenKind::EqualEqual],
            Self::parse_comparison,
        )
    }

    fn parse_comparison(&mut self) -> ParseResult<ast::Expr> {
        self.parse_binary(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::parse_term,
        )
    }

    fn parse_term(&mut self) -> ParseResult<ast::Expr> {
        self.parse_binary(&[TokenKind::Minus, TokenKind::Plus], Self::parse_factor)
    }

    fn parse_factor(&mut self) -> ParseResult<ast::Expr> {
        self.parse_binary(&[TokenKind::Slash, TokenKind::Star], Self::parse_unary)
    }

    fn parse_unary(&mut self) -> ParseResult<ast::Expr> {
        if self.matches(&[TokenKind::Bang, TokenKind::Minus]) {
            let op = self.previous().clone();
            let expr = self.parse_unary()?;
            return Ok(ast::UnaryExpr {
                op,
                expr: Box::new(expr),
            }
            .into());
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> ParseResult<ast::Expr> {
        let token = self.peek();

        let value = match (&token.kind, &token.literal) {
            (TokenKind::False, _) => ast::LitValue::Bool(false),
            (TokenKind::True, _) => ast::LitValue::Bool(true),
            (TokenKind::Nil, _) => ast::LitValue::Nil,
            (TokenKind::Number, Some(Literal::Number(number))) => {
                ast::LitValue::Number(*number)
            }
            (TokenKind::String, Some(Literal::String(string))) => {
                ast::LitValue::String(string.clone())
            }
            (TokenKind::Identifier, _) => {
                self.advance();
                return Ok(ast::VarExpr {
                    ident: token.clone(),
                }
                .into());
            }
            (TokenKind::LeftParen, _) => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(ast::GroupingExpr {
                    expr: Box::new(expr),
                }
                .into());
            }
            _ => return Err(self.error_at_current("Expect expression.")),
        };

        self.advance();
        Ok(ast::LitExpr { value }.into())
    }
}

fn eof_terminated(tokens: &[Token]) -> Vec<Token> {
    let line = tokens.last().map_or(1, |token| token.line);
    let mut owned = tokens.to_vec();
    owned.push(Token::eof(line));
    owned
}

/// Parses a whole program. A syntax error abandons the declaration it occurs
/// in; parsing resumes at the next statement boundary so later declarations
/// are still checked.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_program(tokens: &[Token]) -> (Vec<ast::Stmt>, Vec<Error>) {
    if tokens.last().map(|token| token.kind) != Some(TokenKind::Eof) {
        return parse_program(&eof_terminated(tokens));
    }

    let mut parser = Parser::new(tokens);
    let mut stmts = Vec::new();

    while !parser.at_end() {
        stmts.extend(parser.parse_declaration_or_recover());
    }

    debug!(
        stmts = stmts.len(),
        errors = parser.errors.len(),
        "parse finished"
    );

    (stmts, parser.errors)
}

/// Parses a single expression that must span the whole token stream.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_expression(tokens: &[Token]) -> Result<ast::Expr, Error> {
    if tokens.last().map(|token| token.kind) != Some(TokenKind::Eof) {
        return parse_expression(&eof_terminated(tokens));
    }

    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expr()?;

    if !parser.at_end() {
        return Err(parser.error_at_current("Expect end of expression."));
    }

    match parser.errors.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(expr),
    }
}
