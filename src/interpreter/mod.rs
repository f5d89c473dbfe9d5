pub mod context;
pub mod environment;
pub mod error;
mod expression;
pub mod formatter;
mod value;
mod walk;

use crate::lexer::tokenize;
use crate::token::Token;
use environment::Environment;
use error::{InterpretError, RuntimeError};
pub use expression::Operator;
pub use value::Value;
use walk::TokenWalkInterpreter;

/// Where program output goes. Each print produces exactly one line.
pub trait SystemContext {
    fn writeln(&mut self, text: &str);
}

/// Executes an already scanned program against the given environment.
///
/// The environment is not reset: bindings made here stay visible to whatever runs
/// against it next.
pub fn run<C: SystemContext>(
    tokens: &[Token],
    environment: &mut Environment,
    context: &mut C,
) -> Result<(), RuntimeError> {
    TokenWalkInterpreter::new(tokens, environment, context).run()
}

/// Owns one environment and runs program texts against it in sequence.
#[derive(Debug, Default)]
pub struct Interpreter {
    environment: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Scans the whole text, then executes it. Nothing runs if scanning fails.
    pub fn interpret<C: SystemContext>(
        &mut self,
        source: &str,
        context: &mut C,
    ) -> Result<(), InterpretError> {
        let tokens = tokenize(source)?;
        run(&tokens, &mut self.environment, context)?;
        Ok(())
    }
}
