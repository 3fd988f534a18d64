//! Operator and function kinds that appear in expression trees.

use std::{fmt::{self, Display, Formatter}, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The binary operation is left-associative.
    ///
    /// This means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary operation is right-associative.
    ///
    /// This means `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of exponentiation (`^`).
    Exp,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Precedence {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let left = *self as u8;
        let right = *other as u8;
        left.cmp(&right)
    }
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOpKind {
    /// All binary operations.
    pub const ALL: [BinOpKind; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Div, Self::Pow];

    /// Returns the symbol used to write the operation.
    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }

    /// Returns the operation written with the given symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Pow => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Pow => Associativity::Right,
            Self::Add | Self::Sub | Self::Mul | Self::Div => Associativity::Left,
        }
    }
}

impl Display for BinOpKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An elementary function of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FuncKind {
    Sin,
    Cos,
    Ln,
    Exp,
}

impl FuncKind {
    /// All elementary functions.
    pub const ALL: [FuncKind; 4] = [Self::Sin, Self::Cos, Self::Ln, Self::Exp];

    /// Returns the name of the function.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Ln => "ln",
            Self::Exp => "exp",
        }
    }
}

impl Display for FuncKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The name is not one of the elementary functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFunction(pub String);

impl Display for UnknownFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unknown function `{}`", self.0)
    }
}

impl std::error::Error for UnknownFunction {}

impl FromStr for FuncKind {
    type Err = UnknownFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|func| func.name() == s)
            .ok_or_else(|| UnknownFunction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_order() {
        assert!(Precedence::Any < Precedence::Term);
        assert!(Precedence::Term < Precedence::Factor);
        assert!(Precedence::Factor < Precedence::Exp);
        assert_eq!(BinOpKind::Sub.precedence(), BinOpKind::Add.precedence());
        assert_eq!(BinOpKind::Div.precedence(), BinOpKind::Mul.precedence());
    }

    #[test]
    fn only_pow_is_right_associative() {
        for op in BinOpKind::ALL {
            let expected = if op == BinOpKind::Pow { Associativity::Right } else { Associativity::Left };
            assert_eq!(op.associativity(), expected);
        }
    }

    #[test]
    fn symbols() {
        for op in BinOpKind::ALL {
            assert_eq!(BinOpKind::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(BinOpKind::from_symbol('%'), None);
    }

    #[test]
    fn function_names() {
        assert_eq!("sin".parse(), Ok(FuncKind::Sin));
        assert_eq!("ln".parse(), Ok(FuncKind::Ln));
        assert_eq!("tan".parse::<FuncKind>(), Err(UnknownFunction("tan".to_string())));
        assert!("Sin".parse::<FuncKind>().is_err());
    }
}
