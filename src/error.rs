use thiserror::Error;

use crate::token::Locn;

/// Errors raised while breaking the source text into tokens.
///
/// Lexing aborts on the first error; every variant carries the location of
/// the offending character.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("{locn}: unexpected character '{character}'")]
    UnexpectedCharacter { character: char, locn: Locn },
    #[error("{locn}: non-zero integer literal starts with zero digit")]
    LeadingZero { locn: Locn },
    #[error("{locn}: expected a '//' operator")]
    LoneSlash { locn: Locn },
    #[error("{locn}: line ended within string literal")]
    NewlineInString { locn: Locn },
    #[error("{locn}: tab seen within string literal")]
    TabInString { locn: Locn },
    #[error("{locn}: integer literal '{literal}' does not fit in 64 bits")]
    IntegerOverflow { literal: String, locn: Locn },
    #[error("{locn}: unexpected end of input")]
    UnexpectedEndOfInput { locn: Locn },
}

/// Errors raised while matching the token stream against the grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("{locn}: expected '{expected}' but saw '{found}' instead")]
    Expected {
        expected: String,
        found: String,
        locn: Locn,
    },
    #[error("{locn}: expected an identifier but saw '{found}' instead")]
    ExpectedName { found: String, locn: Locn },
    #[error("{locn}: expected an integer constant but saw '{found}' instead")]
    ExpectedNumber { found: String, locn: Locn },
    #[error("{locn}: expected a string literal but saw '{found}' instead")]
    ExpectedString { found: String, locn: Locn },
    #[error("{locn}: expected end-of-line but saw '{found}' instead")]
    ExpectedEndOfLine { found: String, locn: Locn },
    #[error("{locn}: unexpected '{found}' while parsing a leaf expression")]
    UnexpectedLeaf { found: String, locn: Locn },
    #[error("{locn}: unexpected '{found}' after the end of the program")]
    TrailingInput { found: String, locn: Locn },
}

/// Errors raised while executing a parsed program.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{locn}: variable '{name}' is not defined")]
    UndefinedVariable { name: String, locn: Locn },
    #[error("{locn}: integer division by zero")]
    DivisionByZero { locn: Locn },
    #[error("{locn}: input '{line}' is not an integer")]
    InvalidInput { line: String, locn: Locn },
    #[error("{locn}: end of input while reading a number")]
    EndOfInput { locn: Locn },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Any error the pipeline can produce, for callers that drive all three
/// phases at once.
#[derive(Debug, Error)]
pub enum SlpyError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
