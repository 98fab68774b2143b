pub mod ast;
mod derivative;
mod display;
pub mod error;
mod eval;
mod helpers;
pub mod lexer;
mod math;
pub mod parser;
pub mod token;

pub use ast::{BinaryOperator, Expression, Function};
pub use error::{Error, EvaluationError};
pub use eval::Bindings;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Tokenizes and parses `source` into an expression tree.
pub fn parse(source: &str) -> Result<Expression> {
    parser::Parser::new(source).parse()
}
