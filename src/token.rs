use std::fmt;

use crate::error::SyntaxError;

/// A position within a source file: 1-based row and column, plus the name of
/// the file itself. Used as the diagnostic anchor for every error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locn {
    pub source_name: String,
    pub row: u32,
    pub column: u32,
}

impl Locn {
    pub fn new(source_name: impl Into<String>, row: u32, column: u32) -> Self {
        Self {
            source_name: source_name.into(),
            row,
            column,
        }
    }

    /// Sentinel location (row 0, column 0) for synthesized contexts that have
    /// no place in the source text.
    pub fn none(source_name: impl Into<String>) -> Self {
        Self::new(source_name, 0, 0)
    }
}

impl fmt::Display for Locn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.row > 0 && self.column > 0 {
            write!(f, "{}:{}:{}", self.source_name, self.row, self.column)
        } else {
            write!(f, "{}", self.source_name)
        }
    }
}

/// Token category, decided once when the tokenizer issues the token.
///
/// String literals hold the raw body with the quotes stripped but escape
/// sequences still undecoded; decoding happens in [`TokenStream::eat_string`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Name(String),
    Number(i64),
    Str(String),

    // Reserved words
    Print,
    Pass,
    Input,
    Int,

    // Operators and delimiters
    Assign,     // =
    Plus,       // +
    Minus,      // -
    Star,       // *
    SlashSlash, // //
    LParen,     // (
    RParen,     // )

    // Structural
    Indent(u32),
    Newline,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Name(name) => write!(f, "{name}"),
            TokenKind::Number(value) => write!(f, "{value}"),
            TokenKind::Str(raw) => write!(f, "\"{raw}\""),
            TokenKind::Print => write!(f, "print"),
            TokenKind::Pass => write!(f, "pass"),
            TokenKind::Input => write!(f, "input"),
            TokenKind::Int => write!(f, "int"),
            TokenKind::Assign => write!(f, "="),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::SlashSlash => write!(f, "//"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Indent(width) => write!(f, "[INDENT-{width}]"),
            TokenKind::Newline => write!(f, "[NEWLINE]"),
            TokenKind::Eof => write!(f, "[EOF]"),
        }
    }
}

/// A lexeme and the location of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub locn: Locn,
}

impl Token {
    pub fn new(kind: TokenKind, locn: Locn) -> Self {
        Self { kind, locn }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.locn.row, self.locn.column)
    }
}

/// The sequence of tokens produced by lexing one source file, with a cursor
/// for the parser to walk.
///
/// Invariant: the tokenizer terminates the sequence with exactly one
/// [`TokenKind::Eof`] token, so `current()` is always defined and the cursor
/// never moves past the sentinel.
#[derive(Debug)]
pub struct TokenStream {
    source_name: String,
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    pub(crate) fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            tokens: Vec::new(),
            cursor: 0,
        }
    }

    pub(crate) fn append(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Rewinds the cursor to the first token, the hand-off between the lexing
    /// and parsing phases.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn current(&self) -> &Token {
        &self.tokens[self.cursor]
    }

    pub fn advance(&mut self) {
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
    }

    /// Location of the current token.
    pub fn locate(&self) -> Locn {
        self.current().locn.clone()
    }

    pub fn at(&self, kind: &TokenKind) -> bool {
        self.current().kind == *kind
    }

    pub fn at_name(&self) -> bool {
        matches!(self.current().kind, TokenKind::Name(_))
    }

    pub fn at_number(&self) -> bool {
        matches!(self.current().kind, TokenKind::Number(_))
    }

    pub fn at_string(&self) -> bool {
        matches!(self.current().kind, TokenKind::Str(_))
    }

    pub fn at_eoln(&self) -> bool {
        matches!(self.current().kind, TokenKind::Newline)
    }

    pub fn at_eof(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    /// Consumes the current token if it matches `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> Result<(), SyntaxError> {
        if self.at(&kind) {
            self.advance();
            Ok(())
        } else {
            Err(SyntaxError::Expected {
                expected: kind.to_string(),
                found: self.current().kind.to_string(),
                locn: self.locate(),
            })
        }
    }

    /// Consumes the current token if it is an identifier, returning the name.
    pub fn eat_name(&mut self) -> Result<String, SyntaxError> {
        match &self.current().kind {
            TokenKind::Name(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            other => Err(SyntaxError::ExpectedName {
                found: other.to_string(),
                locn: self.locate(),
            }),
        }
    }

    /// Consumes the current token if it is an integer literal.
    pub fn eat_number(&mut self) -> Result<i64, SyntaxError> {
        match self.current().kind {
            TokenKind::Number(value) => {
                self.advance();
                Ok(value)
            }
            ref other => Err(SyntaxError::ExpectedNumber {
                found: other.to_string(),
                locn: self.locate(),
            }),
        }
    }

    /// Consumes the current token if it is a string literal, decoding the
    /// `\n`, `\t`, `\\`, and `\"` escape sequences.
    pub fn eat_string(&mut self) -> Result<String, SyntaxError> {
        match &self.current().kind {
            TokenKind::Str(raw) => {
                let value = de_escape(raw);
                self.advance();
                Ok(value)
            }
            other => Err(SyntaxError::ExpectedString {
                found: other.to_string(),
                locn: self.locate(),
            }),
        }
    }

    /// Consumes the current token if it is an end-of-line marker.
    pub fn eat_eoln(&mut self) -> Result<(), SyntaxError> {
        if self.at_eoln() {
            self.advance();
            Ok(())
        } else {
            Err(SyntaxError::ExpectedEndOfLine {
                found: self.current().kind.to_string(),
                locn: self.locate(),
            })
        }
    }
}

/// Replaces the escape sequences in a raw string literal body with the
/// characters they denote. Unrecognized escapes are dropped.
fn de_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut escape = false;
    for c in raw.chars() {
        if escape {
            match c {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                '\\' => out.push('\\'),
                '"' => out.push('"'),
                _ => {}
            }
            escape = false;
        } else if c == '\\' {
            escape = true;
        } else {
            out.push(c);
        }
    }
    out
}
