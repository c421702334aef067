use std::collections::HashMap;
use std::io::{BufRead, Write};

use crate::ast::{BinOp, Block, Expn, Program, Stmt};
use crate::error::RuntimeError;
use crate::token::Locn;

/// The runtime mapping from variable name to its current integer value.
///
/// Created fresh for each run; a variable must be stored before it can be
/// loaded.
pub struct Environment {
    values: HashMap<String, i64>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn load(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    pub fn store(&mut self, name: String, value: i64) {
        self.values.insert(name, value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// Tree-walking executor for a parsed program.
///
/// Statements run in source order and sub-expressions evaluate left operand
/// first. `print` writes the decimal value and a newline to the output sink;
/// `input` writes its prompt, flushes, and blocks for one line from the input
/// source.
pub struct Interpreter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Executes the program against a fresh, empty environment.
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        let mut ctxt = Environment::new();
        self.exec_block(&program.block, &mut ctxt)
    }

    fn exec_block(&mut self, block: &Block, ctxt: &mut Environment) -> Result<(), RuntimeError> {
        for stmt in &block.stmts {
            self.exec_statement(stmt, ctxt)?;
        }
        Ok(())
    }

    fn exec_statement(&mut self, stmt: &Stmt, ctxt: &mut Environment) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Assign { name, expn, .. } => {
                let value = self.eval_expression(expn, ctxt)?;
                ctxt.store(name.clone(), value);
                Ok(())
            }
            Stmt::Print { expn, .. } => {
                let value = self.eval_expression(expn, ctxt)?;
                writeln!(self.output, "{value}")?;
                Ok(())
            }
            Stmt::Pass { .. } => Ok(()),
        }
    }

    fn eval_expression(&mut self, expn: &Expn, ctxt: &mut Environment) -> Result<i64, RuntimeError> {
        match expn {
            Expn::Number { value, .. } => Ok(*value),
            Expn::Lookup { name, locn } => {
                ctxt.load(name).ok_or_else(|| RuntimeError::UndefinedVariable {
                    name: name.clone(),
                    locn: locn.clone(),
                })
            }
            Expn::Input { prompt, locn } => self.read_number(prompt, locn),
            Expn::Binary {
                op,
                left,
                right,
                locn,
            } => {
                let lv = self.eval_expression(left, ctxt)?;
                let rv = self.eval_expression(right, ctxt)?;
                match op {
                    BinOp::Plus => Ok(lv.wrapping_add(rv)),
                    BinOp::Minus => Ok(lv.wrapping_sub(rv)),
                    BinOp::Times => Ok(lv.wrapping_mul(rv)),
                    BinOp::IntDiv => {
                        if rv == 0 {
                            Err(RuntimeError::DivisionByZero { locn: locn.clone() })
                        } else {
                            // Truncating division, like the quotient operator
                            // of C. Wrapping covers i64::MIN // -1.
                            Ok(lv.wrapping_div(rv))
                        }
                    }
                }
            }
        }
    }

    /// Writes the prompt and blocks for one line of numeric input.
    fn read_number(&mut self, prompt: &str, locn: &Locn) -> Result<i64, RuntimeError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(RuntimeError::EndOfInput { locn: locn.clone() });
        }
        let text = line.trim();
        text.parse::<i64>().map_err(|_| RuntimeError::InvalidInput {
            line: text.to_string(),
            locn: locn.clone(),
        })
    }
}
