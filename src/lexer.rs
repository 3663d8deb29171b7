use crate::{
    common::{Error, Line},
    token::{Literal, Token, TokenKind},
};

use tracing::{debug, trace};
use unicode_xid::UnicodeXID;

#[derive(Debug, Clone)]
pub struct Lexer {
    source: Vec<char>,
    tokens: Vec<Token>,
    errors: Vec<Error>,

    start: usize,
    current: usize,
    line: Line,
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_xid_start()
}

fn is_ident_continue(c: char) -> bool {
    c.is_xid_continue()
}

impl Lexer {
    pub fn from_str(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            tokens: Vec::new(),
            errors: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.source.get(self.current + 1).copied()
    }

    /// Consumes the next character only if it is `expected`.
    fn matches(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn push_token(&mut self, kind: TokenKind) {
        let token = Token::new(kind, self.lexeme(), self.line);
        trace!(kind = %token.kind, lexeme = %token.lexeme, line = token.line, "token");
        self.tokens.push(token);
    }

    fn push_literal(&mut self, kind: TokenKind, lexeme: String, literal: Literal) {
        let token = Token {
            kind,
            lexeme,
            literal: Some(literal),
            line: self.line,
        };
        trace!(kind = %token.kind, lexeme = %token.lexeme, line = token.line, "token");
        self.tokens.push(token);
    }

    fn push_two_char(&mut self, second: char, matched: TokenKind, otherwise: TokenKind) {
        let kind = if self.matches(second) { matched } else { otherwise };
        self.push_token(kind);
    }

    fn error(&mut self, message: String) {
        debug!(line = self.line, %message, "lexical error");
        self.errors.push(Error::lexical(self.line, message));
    }

    fn lex_string(&mut self) {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.at_end() {
            self.error("Unterminated string.".into());
            return;
        }

        self.advance(); // the closing '"'

        let value: String = self.source[self.start + 1..self.current - 1].iter().collect();
        self.push_literal(TokenKind::String, value.clone(), Literal::String(value));
    }

    fn lex_number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let lexeme = self.lexeme();
        match lexeme.parse::<f64>() {
            Ok(number) => self.push_literal(TokenKind::Number, lexeme, Literal::Number(number)),
            Err(err) => self.error(format!("Invalid number literal '{}': {}", lexeme, err)),
        }
    }

    fn lex_ident(&mut self) {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }

        let kind = TokenKind::keyword(&self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.push_token(kind);
    }

    fn lex_token(&mut self) {
        let c = self.advance();

        match c {
            '(' => self.push_token(TokenKind::LeftParen),
            ')' => self.push_token(TokenKind::RightParen),
            '{' => self.push_token(TokenKind::LeftBrace),
            '}' => self.push_token(TokenKind::RightBrace),
            ',' => self.push_token(TokenKind::Comma),
            '.' => self.push_token(TokenKind::Dot),
            '-' => self.push_token(TokenKind::Minus),
            '+' => self.push_token(TokenKind::Plus),
            ';' => self.push_token(TokenKind::Semicolon),
            '*' => self.push_token(TokenKind::Star),
            '?' => self.push_token(TokenKind::Question),
            ':' => self.push_token(TokenKind::Colon),

            '!' => self.push_two_char('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.push_two_char('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.push_two_char('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.push_two_char('=', TokenKind::GreaterEqual, TokenKind::Greater),

            '/' => {
                if self.matches('/') {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                } else {
                    self.push_token(TokenKind::Slash)
                }
            }

            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            '"' => self.lex_string(),

            _ if c.is_ascii_digit() => self.lex_number(),
            _ if is_ident_start(c) => self.lex_ident(),

            _ => self.error(format!("Unexpected character: {}", c)),
        }
    }

    pub fn lex(mut self) -> (Vec<Token>, Vec<Error>) {
        while !self.at_end() {
            self.start = self.current;
            self.lex_token();
        }

        self.tokens.push(Token::eof(self.line));
        debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            "scan finished"
        );

        (self.tokens, self.errors)
    }
}

/// Turns source text into tokens, always terminated by a single `Eof`.
/// Lexical errors don't stop the scan; they are collected alongside.
#[tracing::instrument(level = "debug", skip_all)]
pub fn scan(source: &str) -> (Vec<Token>, Vec<Error>) {
    Lexer::from_str(source).lex()
}
