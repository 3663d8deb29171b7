use std::fs;
use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};
use tracing::debug;

use lox::{parse_expression, parse_program, scan, Error, Interpreter};

#[derive(Parser)]
#[command(name = "lox", about = "Scan, parse and run Lox programs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the token stream
    Tokenize { path: PathBuf },
    /// Print the syntax tree of every statement
    Parse { path: PathBuf },
    /// Evaluate a single expression and print its value
    Evaluate { path: PathBuf },
    /// Run a program
    Run { path: PathBuf },
}

impl Command {
    fn path(&self) -> &PathBuf {
        match self {
            Command::Tokenize { path }
            | Command::Parse { path }
            | Command::Evaluate { path }
            | Command::Run { path } => path,
        }
    }
}

/// Logging is opt-in through `RUST_LOG` and always goes to stderr.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn report(errors: &[Error]) -> ! {
    for error in errors {
        eprintln!("{}", error);
    }
    exit(errors.first().map_or(1, Error::exit_code))
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let path = cli.command.path();

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error reading file {}: {}", path.display(), err);
            exit(1);
        }
    };
    debug!(path = %path.display(), bytes = source.len(), "read source");

    let (tokens, scan_errors) = scan(&source);

    if let Command::Tokenize { .. } = cli.command {
        for error in &scan_errors {
            eprintln!("{}", error);
        }
        for token in &tokens {
            println!("{}", token);
        }
        if let Some(error) = scan_errors.first() {
            exit(error.exit_code());
        }
        return;
    }

    if !scan_errors.is_empty() {
        report(&scan_errors);
    }

    match cli.command {
        Command::Tokenize { .. } => {}
        Command::Parse { .. } => {
            let (stmts, errors) = parse_program(&tokens);
            if !errors.is_empty() {
                report(&errors);
            }
            for stmt in &stmts {
                println!("{}", stmt);
            }
        }
        Command::Evaluate { .. } => {
            let expr = parse_expression(&tokens).unwrap_or_else(|err| report(&[err]));
            match Interpreter::stdout().evaluate(&expr) {
                Ok(value) => println!("{}", value),
                Err(err) => report(&[err]),
            }
        }
        Command::Run { .. } => {
            let (stmts, errors) = parse_program(&tokens);
            if !errors.is_empty() {
                report(&errors);
            }
            if let Err(err) = Interpreter::stdout().interpret(&stmts) {
                report(&[err]);
            }
        }
    }
}
