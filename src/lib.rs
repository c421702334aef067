pub mod ast;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;

pub use error::SlpyError;

/// Lexes and parses a source text in one step.
pub fn parse_source(source_name: &str, source: &str) -> Result<ast::Program, SlpyError> {
    let mut tokens = lexer::lex(source_name, source)?;
    tokens.reset();
    Ok(parser::parse(tokens)?)
}
