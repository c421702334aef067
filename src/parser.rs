use crate::ast::{BinOp, Block, Expn, Program, Stmt};
use crate::error::SyntaxError;
use crate::token::{TokenKind, TokenStream};

/// Recursive-descent parser over a [`TokenStream`], one method per grammar
/// production:
///
/// ```text
/// program        := block EOF
/// block          := statement EOLN { statement EOLN }
/// statement      := name '=' expression | 'print' '(' expression ')' | 'pass'
/// expression     := additive
/// additive       := multiplicative { ('+'|'-') multiplicative }
/// multiplicative := leaf { ('*'|'//') leaf }
/// leaf           := '(' expression ')' | 'input' '(' string ')'
///                 | 'int' '(' expression ')' | number | name
/// ```
pub struct Parser {
    tokens: TokenStream,
}

impl Parser {
    pub fn new(tokens: TokenStream) -> Self {
        Self { tokens }
    }

    pub fn parse_program(mut self) -> Result<Program, SyntaxError> {
        let block = self.parse_block()?;
        if !self.tokens.at_eof() {
            return Err(SyntaxError::TrailingInput {
                found: self.tokens.current().kind.to_string(),
                locn: self.tokens.locate(),
            });
        }
        Ok(Program { block })
    }

    /// One or more statements, each terminated by an end-of-line token.
    fn parse_block(&mut self) -> Result<Block, SyntaxError> {
        let mut stmts = Vec::new();
        loop {
            let stmt = self.parse_statement()?;
            self.tokens.eat_eoln()?;
            stmts.push(stmt);
            if self.tokens.at_eof() {
                break;
            }
        }
        Ok(Block { stmts })
    }

    fn parse_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let locn = self.tokens.locate();
        if self.tokens.at(&TokenKind::Print) {
            self.tokens.eat(TokenKind::Print)?;
            self.tokens.eat(TokenKind::LParen)?;
            let expn = self.parse_expression()?;
            self.tokens.eat(TokenKind::RParen)?;
            Ok(Stmt::Print { expn, locn })
        } else if self.tokens.at(&TokenKind::Pass) {
            self.tokens.eat(TokenKind::Pass)?;
            Ok(Stmt::Pass { locn })
        } else {
            let name = self.tokens.eat_name()?;
            self.tokens.eat(TokenKind::Assign)?;
            let expn = self.parse_expression()?;
            Ok(Stmt::Assign { name, expn, locn })
        }
    }

    fn parse_expression(&mut self) -> Result<Expn, SyntaxError> {
        self.parse_additive()
    }

    /// Left-associative `+` and `-` over multiplicative operands.
    fn parse_additive(&mut self) -> Result<Expn, SyntaxError> {
        let mut expn = self.parse_multiplicative()?;
        loop {
            let op = if self.tokens.at(&TokenKind::Plus) {
                BinOp::Plus
            } else if self.tokens.at(&TokenKind::Minus) {
                BinOp::Minus
            } else {
                break;
            };
            // The node is anchored at the operator token, not the left operand.
            let locn = self.tokens.locate();
            self.tokens.advance();
            let right = self.parse_multiplicative()?;
            expn = Expn::Binary {
                op,
                left: Box::new(expn),
                right: Box::new(right),
                locn,
            };
        }
        Ok(expn)
    }

    /// Left-associative `*` and `//` over leaf operands.
    fn parse_multiplicative(&mut self) -> Result<Expn, SyntaxError> {
        let mut expn = self.parse_leaf()?;
        loop {
            let op = if self.tokens.at(&TokenKind::Star) {
                BinOp::Times
            } else if self.tokens.at(&TokenKind::SlashSlash) {
                BinOp::IntDiv
            } else {
                break;
            };
            let locn = self.tokens.locate();
            self.tokens.advance();
            let right = self.parse_leaf()?;
            expn = Expn::Binary {
                op,
                left: Box::new(expn),
                right: Box::new(right),
                locn,
            };
        }
        Ok(expn)
    }

    fn parse_leaf(&mut self) -> Result<Expn, SyntaxError> {
        let locn = self.tokens.locate();
        if self.tokens.at(&TokenKind::LParen) {
            self.tokens.eat(TokenKind::LParen)?;
            let expn = self.parse_expression()?;
            self.tokens.eat(TokenKind::RParen)?;
            Ok(expn)
        } else if self.tokens.at(&TokenKind::Input) {
            self.tokens.eat(TokenKind::Input)?;
            self.tokens.eat(TokenKind::LParen)?;
            let prompt = self.tokens.eat_string()?;
            self.tokens.eat(TokenKind::RParen)?;
            Ok(Expn::Input { prompt, locn })
        } else if self.tokens.at(&TokenKind::Int) {
            // int(...) performs no conversion here; every value is already an
            // integer. It is parsed and discarded for source compatibility.
            self.tokens.eat(TokenKind::Int)?;
            self.tokens.eat(TokenKind::LParen)?;
            let expn = self.parse_expression()?;
            self.tokens.eat(TokenKind::RParen)?;
            Ok(expn)
        } else if self.tokens.at_number() {
            let value = self.tokens.eat_number()?;
            Ok(Expn::Number { value, locn })
        } else if self.tokens.at_name() {
            let name = self.tokens.eat_name()?;
            Ok(Expn::Lookup { name, locn })
        } else {
            Err(SyntaxError::UnexpectedLeaf {
                found: self.tokens.current().kind.to_string(),
                locn,
            })
        }
    }
}

/// Parses a token stream into a [`Program`].
pub fn parse(tokens: TokenStream) -> Result<Program, SyntaxError> {
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;
    use crate::token::Locn;
    use indoc::indoc;

    fn parse_source(source: &str) -> Result<Program, SyntaxError> {
        let mut tokens = lexer::lex("test.slpy", source).expect("lexing should succeed");
        tokens.reset();
        parse(tokens)
    }

    #[test]
    fn parses_assignment_print_and_pass() {
        let input = indoc! {"
            x = 3
            pass
            print(x)
        "};
        let program = parse_source(input).expect("parse failed");
        let stmts = &program.block.stmts;
        assert_eq!(stmts.len(), 3);
        assert!(matches!(
            &stmts[0],
            Stmt::Assign { name, expn: Expn::Number { value: 3, .. }, .. } if name == "x"
        ));
        assert!(matches!(&stmts[1], Stmt::Pass { .. }));
        assert!(matches!(
            &stmts[2],
            Stmt::Print { expn: Expn::Lookup { name, .. }, .. } if name == "x"
        ));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let program = parse_source("y = x + y * 2\n").expect("parse failed");
        let Stmt::Assign { expn, .. } = &program.block.stmts[0] else {
            panic!("expected assignment");
        };
        let Expn::Binary { op: BinOp::Plus, right, .. } = expn else {
            panic!("expected + at the root, got {expn:?}");
        };
        assert!(matches!(**right, Expn::Binary { op: BinOp::Times, .. }));
    }

    #[test]
    fn subtraction_is_left_associative() {
        let program = parse_source("y = 1 - 2 - 3\n").expect("parse failed");
        let Stmt::Assign { expn, .. } = &program.block.stmts[0] else {
            panic!("expected assignment");
        };
        let Expn::Binary { op: BinOp::Minus, left, right, .. } = expn else {
            panic!("expected - at the root");
        };
        assert!(matches!(**left, Expn::Binary { op: BinOp::Minus, .. }));
        assert!(matches!(**right, Expn::Number { value: 3, .. }));
    }

    #[test]
    fn binary_nodes_are_anchored_at_the_operator_token() {
        let program = parse_source("y = 5 // 0\n").expect("parse failed");
        let Stmt::Assign { expn, .. } = &program.block.stmts[0] else {
            panic!("expected assignment");
        };
        assert_eq!(expn.locn(), &Locn::new("test.slpy", 1, 7));
    }

    #[test]
    fn int_wrapper_is_transparent() {
        let program = parse_source("x = int(4 + 1)\n").expect("parse failed");
        let Stmt::Assign { expn, .. } = &program.block.stmts[0] else {
            panic!("expected assignment");
        };
        assert!(matches!(expn, Expn::Binary { op: BinOp::Plus, .. }));
    }

    #[test]
    fn parses_input_with_a_decoded_prompt() {
        let program = parse_source("x = input(\"n?\\n\")\n").expect("parse failed");
        let Stmt::Assign { expn, .. } = &program.block.stmts[0] else {
            panic!("expected assignment");
        };
        assert!(matches!(expn, Expn::Input { prompt, .. } if prompt == "n?\n"));
    }

    #[test]
    fn input_requires_a_string_literal_prompt() {
        let err = parse_source("x = input(3)\n").expect_err("expected failure");
        assert!(matches!(err, SyntaxError::ExpectedString { .. }));
    }

    #[test]
    fn every_statement_requires_an_end_of_line() {
        let err = parse_source("x = 1").expect_err("expected failure");
        assert_eq!(
            err,
            SyntaxError::ExpectedEndOfLine {
                found: "[EOF]".to_string(),
                locn: Locn::new("test.slpy", 1, 6),
            }
        );
    }

    #[test]
    fn an_empty_program_is_a_syntax_error() {
        let err = parse_source("").expect_err("expected failure");
        assert!(matches!(err, SyntaxError::ExpectedName { .. }));
    }

    #[test]
    fn rejects_an_indented_statement() {
        let err = parse_source("pass\n  pass\n").expect_err("expected failure");
        assert!(matches!(err, SyntaxError::ExpectedName { found, .. } if found == "[INDENT-2]"));
    }

    #[test]
    fn reports_an_unexpected_leaf_token() {
        let err = parse_source("x = )\n").expect_err("expected failure");
        assert_eq!(
            err,
            SyntaxError::UnexpectedLeaf {
                found: ")".to_string(),
                locn: Locn::new("test.slpy", 1, 5),
            }
        );
    }

    #[test]
    fn reserved_words_cannot_be_assignment_targets() {
        let err = parse_source("print = 1\n").expect_err("expected failure");
        assert!(matches!(err, SyntaxError::Expected { expected, .. } if expected == "("));
    }
}
