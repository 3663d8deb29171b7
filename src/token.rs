use std::fmt;

use derive_more::Display;

use crate::common::{format_number, Error, Line};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenKind {
    // symbols
    #[display(fmt = "LEFT_PAREN")]
    LeftParen,
    #[display(fmt = "RIGHT_PAREN")]
    RightParen,
    #[display(fmt = "LEFT_BRACE")]
    LeftBrace,
    #[display(fmt = "RIGHT_BRACE")]
    RightBrace,
    #[display(fmt = "COMMA")]
    Comma,
    #[display(fmt = "DOT")]
    Dot,
    #[display(fmt = "MINUS")]
    Minus,
    #[display(fmt = "PLUS")]
    Plus,
    #[display(fmt = "SEMICOLON")]
    Semicolon,
    #[display(fmt = "SLASH")]
    Slash,
    #[display(fmt = "STAR")]
    Star,
    #[display(fmt = "QUESTION")]
    Question,
    #[display(fmt = "COLON")]
    Colon,

    // one or two character operators
    #[display(fmt = "BANG")]
    Bang,
    #[display(fmt = "BANG_EQUAL")]
    BangEqual,
    #[display(fmt = "EQUAL")]
    Equal,
    #[display(fmt = "EQUAL_EQUAL")]
    EqualEqual,
    #[display(fmt = "GREATER")]
    Greater,
    #[display(fmt = "GREATER_EQUAL")]
    GreaterEqual,
    #[display(fmt = "LESS")]
    Less,
    #[display(fmt = "LESS_EQUAL")]
    LessEqual,

    // literals
    #[display(fmt = "IDENTIFIER")]
    Identifier,
    #[display(fmt = "STRING")]
    String,
    #[display(fmt = "NUMBER")]
    Number,

    // keywords
    #[display(fmt = "AND")]
    And,
    #[display(fmt = "CLASS")]
    Class,
    #[display(fmt = "ELSE")]
    Else,
    #[display(fmt = "FALSE")]
    False,
    #[display(fmt = "FUN")]
    Fun,
    #[display(fmt = "FOR")]
    For,
    #[display(fmt = "IF")]
    If,
    #[display(fmt = "NIL")]
    Nil,
    #[display(fmt = "OR")]
    Or,
    #[display(fmt = "PRINT")]
    Print,
    #[display(fmt = "RETURN")]
    Return,
    #[display(fmt = "SUPER")]
    Super,
    #[display(fmt = "THIS")]
    This,
    #[display(fmt = "TRUE")]
    True,
    #[display(fmt = "VAR")]
    Var,
    #[display(fmt = "WHILE")]
    While,

    #[display(fmt = "EOF")]
    Eof,
}

impl TokenKind {
    pub fn keyword(name: &str) -> Option<TokenKind> {
        match name {
            "and" => Some(TokenKind::And),
            "class" => Some(TokenKind::Class),
            "else" => Some(TokenKind::Else),
            "false" => Some(TokenKind::False),
            "fun" => Some(TokenKind::Fun),
            "for" => Some(TokenKind::For),
            "if" => Some(TokenKind::If),
            "nil" => Some(TokenKind::Nil),
            "or" => Some(TokenKind::Or),
            "print" => Some(TokenKind::Print),
            "return" => Some(TokenKind::Return),
            "super" => Some(TokenKind::Super),
            "this" => Some(TokenKind::This),
            "true" => Some(TokenKind::True),
            "var" => Some(TokenKind::Var),
            "while" => Some(TokenKind::While),
            _ => None,
        }
    }

    /// Keywords that can only begin a statement; the parser resumes at these
    /// after a syntax error.
    pub fn starts_statement(&self) -> bool {
        matches!(
            *self,
            Self::Class
                | Self::Fun
                | Self::Var
                | Self::For
                | Self::If
                | Self::While
                | Self::Print
                | Self::Return
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(number) => f.write_str(&format_number(*number)),
            Literal::String(string) => f.write_str(string),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: Line,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: Line) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
        }
    }

    pub fn eof(line: Line) -> Self {
        Token::new(TokenKind::Eof, "", line)
    }

    pub fn error_at(&self, message: &str) -> Error {
        let location = if self.kind == TokenKind::Eof {
            " at end".to_string()
        } else {
            format!(" at '{}'", self.lexeme)
        };

        Error::Syntax {
            line: self.line,
            location,
            message: message.into(),
        }
    }
}

impl fmt::Display for Token {
    /// The `tokenize` listing: `KIND LEXEME LITERAL`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let literal = match &self.literal {
            Some(literal) => literal.to_string(),
            None => "null".to_string(),
        };

        if self.kind == TokenKind::String {
            write!(f, "{} \"{}\" {}", self.kind, self.lexeme, literal)
        } else {
            write!(f, "{} {} {}", self.kind, self.lexeme, literal)
        }
    }
}
