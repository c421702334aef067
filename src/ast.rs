use crate::token::Locn;

/// A whole SLPY program: one block of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub block: Block,
}

/// An ordered sequence of statements; the order is the execution order.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

/// Statement forms. Each node carries the location of the first token that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign { name: String, expn: Expn, locn: Locn },
    Print { expn: Expn, locn: Locn },
    Pass { locn: Locn },
}

/// Binary arithmetic operators, lowest to highest precedence layer:
/// `+ -` then `* //`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Plus,
    Minus,
    Times,
    IntDiv,
}

impl BinOp {
    /// The operator's spelling in source text.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Plus => "+",
            BinOp::Minus => "-",
            BinOp::Times => "*",
            BinOp::IntDiv => "//",
        }
    }
}

/// Integer expression forms.
///
/// A `Binary` node's location is that of its operator token, not its left
/// operand, so runtime errors like division by zero point at the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Expn {
    Binary {
        op: BinOp,
        left: Box<Expn>,
        right: Box<Expn>,
        locn: Locn,
    },
    Number {
        value: i64,
        locn: Locn,
    },
    Lookup {
        name: String,
        locn: Locn,
    },
    Input {
        prompt: String,
        locn: Locn,
    },
}

impl Expn {
    pub fn locn(&self) -> &Locn {
        match self {
            Expn::Binary { locn, .. }
            | Expn::Number { locn, .. }
            | Expn::Lookup { locn, .. }
            | Expn::Input { locn, .. } => locn,
        }
    }
}
