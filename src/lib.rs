pub mod interpreter;
pub mod lexer;
pub mod number;
pub mod token;
