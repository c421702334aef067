use std::str::Chars;

use crate::error::LexError;
use crate::token::{Locn, Token, TokenKind, TokenStream};

/// States of the tokenizer's finite-state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// At the start of a line, no token seen yet.
    LineStart,
    /// Within a line, at least one token seen.
    InLine,
    /// Consuming leading spaces/tabs at the start of a line.
    Indent,
    /// Skipping a comment that began before any token on the line.
    CommentLineStart,
    /// Skipping a comment that began after a token on the line.
    CommentInLine,
    /// Consuming the digits of a literal that began with 1-9.
    Number,
    /// Saw a literal `0`; any further digit is an error.
    ZeroLiteral,
    /// Inside a string literal.
    StringBody,
    /// After a backslash inside a string literal.
    StringEscape,
    /// After a single `/`, expecting the second one.
    SlashSlash,
    /// Consuming letters/digits/underscores of a name or reserved word.
    Identifier,
    /// Saw end of input.
    Halt,
}

/// Character-at-a-time tokenizer for SLPY source text.
///
/// Consumes the source in one pass with no backtracking, tracking the row and
/// column of every character so each issued token carries the location of its
/// first character. Tabs advance the column to the next multiple of 8.
pub struct Tokenizer<'a> {
    source_name: String,
    chars: Chars<'a>,
    curr: Option<char>,
    row: u32,
    column: u32,
    start_row: u32,
    start_column: u32,
    buffer: String,
    tokens: TokenStream,
    state: State,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source_name: &str, source: &'a str) -> Self {
        let mut chars = source.chars();
        let curr = chars.next();
        Self {
            source_name: source_name.to_string(),
            chars,
            curr,
            row: 1,
            column: 1,
            start_row: 1,
            start_column: 1,
            buffer: String::new(),
            tokens: TokenStream::new(source_name),
            state: State::LineStart,
        }
    }

    /// Runs the state machine over the whole source, producing the token
    /// stream terminated by an `Eof` token, or the first lexical error.
    pub fn lex(mut self) -> Result<TokenStream, LexError> {
        loop {
            match self.state {
                State::LineStart | State::InLine => match self.curr {
                    Some('1'..='9') => {
                        self.start_fresh();
                        self.state = State::Number;
                    }
                    Some('0') => {
                        self.start_fresh();
                        self.consume_char();
                        self.state = State::ZeroLiteral;
                    }
                    Some('"') => {
                        self.start_fresh();
                        self.advance_char();
                        self.state = State::StringBody;
                    }
                    Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                        self.start_fresh();
                        self.state = State::Identifier;
                    }
                    Some('\n') => {
                        if self.state == State::InLine {
                            self.start_fresh();
                            self.advance_char();
                            self.issue(TokenKind::Newline);
                        } else {
                            // Blank line: no token.
                            self.advance_char();
                        }
                        self.state = State::LineStart;
                    }
                    Some('#') => {
                        self.state = if self.state == State::LineStart {
                            State::CommentLineStart
                        } else {
                            State::CommentInLine
                        };
                        self.advance_char();
                    }
                    Some(' ') | Some('\t') => {
                        if self.state == State::LineStart {
                            self.start_fresh();
                            self.state = State::Indent;
                        } else {
                            self.advance_char();
                        }
                    }
                    Some('=') => self.issue_single(TokenKind::Assign),
                    Some('+') => self.issue_single(TokenKind::Plus),
                    Some('-') => self.issue_single(TokenKind::Minus),
                    Some('*') => self.issue_single(TokenKind::Star),
                    Some('(') => self.issue_single(TokenKind::LParen),
                    Some(')') => self.issue_single(TokenKind::RParen),
                    Some('/') => {
                        self.start_fresh();
                        self.advance_char();
                        self.state = State::SlashSlash;
                    }
                    Some(c) => {
                        return Err(LexError::UnexpectedCharacter {
                            character: c,
                            locn: self.here(),
                        });
                    }
                    None => self.state = State::Halt,
                },

                State::Indent => match self.curr {
                    Some(' ') | Some('\t') => self.consume_char(),
                    Some('#') | Some('\n') => {
                        // Whitespace-only line: discard the indentation.
                        self.start_fresh();
                        self.state = State::LineStart;
                    }
                    _ => {
                        let width = indent_width(&self.buffer);
                        self.buffer.clear();
                        self.issue(TokenKind::Indent(width));
                        self.state = State::InLine;
                    }
                },

                State::SlashSlash => match self.curr {
                    Some('/') => {
                        self.advance_char();
                        self.issue(TokenKind::SlashSlash);
                        self.state = State::InLine;
                    }
                    _ => return Err(LexError::LoneSlash { locn: self.here() }),
                },

                State::ZeroLiteral => match self.curr {
                    Some('0'..='9') => return Err(LexError::LeadingZero { locn: self.here() }),
                    _ => {
                        self.buffer.clear();
                        self.issue(TokenKind::Number(0));
                        self.state = State::InLine;
                    }
                },

                State::Number => match self.curr {
                    Some('0'..='9') => self.consume_char(),
                    _ => {
                        self.issue_number()?;
                        self.state = State::InLine;
                    }
                },

                State::StringBody => match self.curr {
                    Some('"') => {
                        self.advance_char();
                        let raw = std::mem::take(&mut self.buffer);
                        self.issue(TokenKind::Str(raw));
                        self.state = State::InLine;
                    }
                    Some('\\') => {
                        self.consume_char();
                        self.state = State::StringEscape;
                    }
                    Some('\n') => return Err(LexError::NewlineInString { locn: self.here() }),
                    Some('\t') => return Err(LexError::TabInString { locn: self.here() }),
                    Some(_) => self.consume_char(),
                    None => return Err(LexError::UnexpectedEndOfInput { locn: self.here() }),
                },

                State::StringEscape => match self.curr {
                    // The escaped character is kept verbatim; decoding happens
                    // when the parser consumes the literal.
                    Some(_) => {
                        self.consume_char();
                        self.state = State::StringBody;
                    }
                    None => return Err(LexError::UnexpectedEndOfInput { locn: self.here() }),
                },

                State::Identifier => match self.curr {
                    Some(c) if c.is_ascii_alphanumeric() || c == '_' => self.consume_char(),
                    _ => {
                        let text = std::mem::take(&mut self.buffer);
                        self.issue(keyword_or_name(text));
                        self.state = State::InLine;
                    }
                },

                State::CommentLineStart => match self.curr {
                    Some('\n') => self.state = State::LineStart,
                    Some(_) => self.advance_char(),
                    None => self.state = State::Halt,
                },

                State::CommentInLine => match self.curr {
                    Some('\n') => self.state = State::InLine,
                    Some(_) => self.advance_char(),
                    None => self.state = State::Halt,
                },

                State::Halt => {
                    let locn = self.here();
                    self.tokens.append(Token::new(TokenKind::Eof, locn));
                    return Ok(self.tokens);
                }
            }
        }
    }

    /// Moves past the current character, updating the row/column bookkeeping.
    fn advance_char(&mut self) {
        match self.curr {
            Some('\n') => {
                self.row += 1;
                self.column = 1;
            }
            Some('\t') => self.column += 8 - (self.column - 1) % 8,
            Some(_) => self.column += 1,
            None => {}
        }
        self.curr = self.chars.next();
    }

    /// Appends the current character to the token being built and advances.
    fn consume_char(&mut self) {
        if let Some(c) = self.curr {
            self.buffer.push(c);
        }
        self.advance_char();
    }

    /// Marks the current position as the start of the next token.
    fn start_fresh(&mut self) {
        self.start_row = self.row;
        self.start_column = self.column;
        self.buffer.clear();
    }

    /// Appends a token starting at the marked position to the stream.
    fn issue(&mut self, kind: TokenKind) {
        let locn = Locn::new(&self.source_name, self.start_row, self.start_column);
        self.tokens.append(Token::new(kind, locn));
        self.start_fresh();
    }

    /// Issues a one-character operator or delimiter and stays within the line.
    fn issue_single(&mut self, kind: TokenKind) {
        self.start_fresh();
        self.advance_char();
        self.issue(kind);
        self.state = State::InLine;
    }

    /// Issues the accumulated digits as an integer literal token.
    fn issue_number(&mut self) -> Result<(), LexError> {
        let text = std::mem::take(&mut self.buffer);
        let value = text.parse::<i64>().map_err(|_| LexError::IntegerOverflow {
            literal: text.clone(),
            locn: Locn::new(&self.source_name, self.start_row, self.start_column),
        })?;
        self.issue(TokenKind::Number(value));
        Ok(())
    }

    /// The location of the character currently under the cursor.
    fn here(&self) -> Locn {
        Locn::new(&self.source_name, self.row, self.column)
    }
}

/// Width of a run of leading spaces/tabs, with tabs expanding to the next
/// multiple of 8 columns.
fn indent_width(whitespace: &str) -> u32 {
    let mut width = 0;
    for c in whitespace.chars() {
        if c == '\t' {
            width += 8 - width % 8;
        } else {
            width += 1;
        }
    }
    width
}

fn keyword_or_name(text: String) -> TokenKind {
    match text.as_str() {
        "print" => TokenKind::Print,
        "pass" => TokenKind::Pass,
        "input" => TokenKind::Input,
        "int" => TokenKind::Int,
        _ => TokenKind::Name(text),
    }
}

/// Lexes a whole source text into a [`TokenStream`].
pub fn lex(source_name: &str, source: &str) -> Result<TokenStream, LexError> {
    Tokenizer::new(source_name, source).lex()
}
