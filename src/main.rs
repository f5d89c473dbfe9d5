use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs::read_to_string, process::ExitCode};

/// Programs run when `run` is given no paths.
const DEFAULT_PROGRAMS: [&str; 3] = ["math.txt", "concat.txt", "conditional.txt"];
const SEPARATOR_WIDTH: usize = 40;

#[derive(Debug, Parser)]
#[clap(name = "goofy", version)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: GoofyCommand,
}

#[derive(Debug, Subcommand)]
pub enum GoofyCommand {
    /// Print the tokens of a program.
    Tokenize {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: TokenFormat,
    },
    /// Run programs one after another.
    Run {
        paths: Vec<PathBuf>,
        /// Give every program its own variables instead of sharing them across runs.
        #[clap(long)]
        fresh: bool,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: ErrorFormat,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TokenFormat {
    Debug,
    Basic,
    Line,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ErrorFormat {
    Debug,
    Basic,
    Pretty,
}

fn main() -> ExitCode {
    goofy_main().expect("Encountered an error!")
}

fn goofy_main() -> Result<ExitCode> {
    color_eyre::install()?;
    init_tracing();
    let args = CLArgs::parse();
    let succeeded = match args.routine {
        GoofyCommand::Tokenize { path, format } => {
            eprintln!("Tokenizing {:?}...", path);
            let src = read_to_string(path)?;
            tokenize(&src, &format)
        }
        GoofyCommand::Run {
            paths,
            fresh,
            format,
        } => run(paths, fresh, &format),
    };
    match succeeded {
        true => Ok(ExitCode::SUCCESS),
        false => Ok(ExitCode::from(65)),
    }
}

/// Diagnostics go to stderr and only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn tokenize(src: &str, format: &TokenFormat) -> bool {
    use goofy::lexer::formatter::{BasicFormatter, DebugFormatter, LineFormatter, TokenFormatter};
    use goofy::lexer::{Lexer, TokenKind};

    let mut lexer = Lexer::new(src);
    let formatter: Box<dyn TokenFormatter> = match format {
        TokenFormat::Debug => Box::new(DebugFormatter),
        TokenFormat::Basic => Box::new(BasicFormatter::new(src)),
        TokenFormat::Line => Box::new(LineFormatter::new(src)),
    };
    loop {
        match lexer.next_token() {
            Ok(token) => {
                println!("{}", formatter.format(&token));
                if token.is(TokenKind::Eof) {
                    return true;
                }
            }
            Err(error) => {
                eprintln!("{}", formatter.format_lexical_error(&error));
                return false;
            }
        }
    }
}

fn run(paths: Vec<PathBuf>, fresh: bool, format: &ErrorFormat) -> bool {
    use goofy::interpreter::{context::StdioContext, Interpreter};

    let paths: Vec<PathBuf> = match paths.is_empty() {
        true => DEFAULT_PROGRAMS.iter().map(PathBuf::from).collect(),
        false => paths,
    };

    let mut interpreter = Interpreter::new();
    let mut context = StdioContext;
    let mut succeeded = true;
    for path in paths.iter() {
        if fresh {
            interpreter = Interpreter::new();
        }
        if !run_program(&mut interpreter, &mut context, path, format) {
            succeeded = false;
        }
        println!("\n{}\n", "=".repeat(SEPARATOR_WIDTH));
    }
    succeeded
}

fn run_program(
    interpreter: &mut goofy::interpreter::Interpreter,
    context: &mut goofy::interpreter::context::StdioContext,
    path: &Path,
    format: &ErrorFormat,
) -> bool {
    use goofy::interpreter::formatter::{
        BasicFormatter, DebugFormatter, ErrorFormatter, PrettyFormatter,
    };

    let name = path.display();
    let src = match read_to_string(path) {
        Ok(src) => src,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            println!("Error: {name} not found. Please create this file first!");
            return false;
        }
        Err(error) => {
            println!("Error running program from {name}: {error}");
            return false;
        }
    };

    println!("\n=== Running Goofy Program from {name} ===\n");
    match interpreter.interpret(&src, context) {
        Ok(()) => {
            println!("\n=== Program from {name} Complete ===\n");
            true
        }
        Err(error) => {
            match format {
                ErrorFormat::Debug => println!(
                    "Error running program from {name}: {}",
                    DebugFormatter.format_error(&error)
                ),
                ErrorFormat::Basic => println!(
                    "Error running program from {name}: {}",
                    BasicFormatter.format_error(&error)
                ),
                ErrorFormat::Pretty => {
                    println!("Error running program from {name}:");
                    eprint!("{}", PrettyFormatter::new(&src, path).format_error(&error));
                }
            }
            false
        }
    }
}
