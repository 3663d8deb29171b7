use thiserror::Error;

pub type Line = usize;

/// Diagnostics produced by every stage of the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("[line {line}] Error: {message}")]
    Lexical { line: Line, message: String },

    /// `location` is either empty, ` at end` or ` at 'lexeme'`.
    #[error("[line {line}] Error{location}: {message}")]
    Syntax {
        line: Line,
        location: String,
        message: String,
    },

    #[error("{message}\n[line {line}]")]
    Runtime { line: Line, message: String },

    /// Program output could not be written.
    #[error("{0}")]
    Output(String),
}

impl Error {
    pub fn lexical(line: Line, message: impl Into<String>) -> Self {
        Error::Lexical {
            line,
            message: message.into(),
        }
    }

    pub fn runtime(line: Line, message: impl Into<String>) -> Self {
        Error::Runtime {
            line,
            message: message.into(),
        }
    }

    pub fn line(&self) -> Option<Line> {
        match self {
            Error::Lexical { line, .. } | Error::Syntax { line, .. } | Error::Runtime { line, .. } => {
                Some(*line)
            }
            Error::Output(_) => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Error::Lexical { message, .. }
            | Error::Syntax { message, .. }
            | Error::Runtime { message, .. }
            | Error::Output(message) => message,
        }
    }

    /// Process exit status the driver uses when this error stops a run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Lexical { .. } | Error::Syntax { .. } => 65,
            Error::Runtime { .. } => 70,
            Error::Output(_) => 74,
        }
    }
}

/// Integral values keep exactly one decimal digit (`3` -> `3.0`), everything
/// else uses the shortest representation that round-trips.
pub fn format_number(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 {
        format!("{:.1}", number)
    } else {
        format!("{}", number)
    }
}
