//! Errors that can occur while parsing an expression.

use ariadne::Fmt;
use std::fmt::{self, Display, Formatter};
use symdiff_attrs::ErrorKind;
use symdiff_error::EXPR;

/// A character that cannot appear in an expression was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid character `{}` at position {}", character, position),
    labels = ["this character"],
    help = format!(
        "expressions are made of numbers, variables, the operators {}, parentheses, and the functions {}",
        "+ - * / ^".fg(EXPR),
        "sin cos exp ln".fg(EXPR),
    ),
)]
pub struct InvalidCharacter {
    /// The character that was found.
    pub character: char,

    /// The position of the character in the source, counted in characters from zero.
    pub position: usize,
}

/// The expression is not well-formed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("malformed expression: {}", reason),
    labels = [reason.label()],
    help = reason.help(),
)]
pub struct MalformedExpression {
    /// What is wrong with the expression.
    pub reason: Malformation,
}

/// The ways an expression can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformation {
    /// An operator is missing one of its operands, such as in `2 +`.
    MissingOperand,

    /// Two operands are next to each other without an operator between them, such as in `2 x`.
    MissingOperator,

    /// An opening parenthesis was never closed.
    UnclosedParenthesis,

    /// A closing parenthesis has no matching opening parenthesis.
    UnmatchedParenthesis,

    /// A pair of parentheses contains nothing.
    EmptyParenthesis,

    /// A function name is not followed by its argument in parentheses.
    MissingFunctionArgument,

    /// An imaginary literal was used while parsing in the real domain.
    ImaginaryInRealDomain,

    /// A numeric literal could not be read in the domain.
    InvalidNumber,

    /// There is no expression at all.
    Empty,
}

impl Malformation {
    /// The label attached to the span of the error.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingOperand => "this operator is missing an operand",
            Self::MissingOperator => "expected an operator before this",
            Self::UnclosedParenthesis => "this parenthesis is never closed",
            Self::UnmatchedParenthesis => "this parenthesis has no matching `(`",
            Self::EmptyParenthesis => "these parentheses are empty",
            Self::MissingFunctionArgument => "this function needs an argument",
            Self::ImaginaryInRealDomain => "this is an imaginary number",
            Self::InvalidNumber => "this number",
            Self::Empty => "expected an expression here",
        }
    }

    /// Help text describing how to fix the expression.
    pub fn help(&self) -> String {
        match self {
            Self::MissingOperand => format!(
                "there is no unary minus; write negative numbers as {}",
                "(0 - x)".fg(EXPR),
            ),
            Self::MissingOperator => format!(
                "multiplication must be written explicitly, as in {}",
                "2 * x".fg(EXPR),
            ),
            Self::UnclosedParenthesis => format!("add a {} to close it", "`)`".fg(EXPR)),
            Self::UnmatchedParenthesis => "remove it, or add a matching `(` before it".to_string(),
            Self::EmptyParenthesis => "put an expression between the parentheses".to_string(),
            Self::MissingFunctionArgument => format!(
                "call the function with its argument in parentheses, as in {}",
                "sin(x)".fg(EXPR),
            ),
            Self::ImaginaryInRealDomain => format!(
                "parse in the complex domain to use imaginary numbers, for example with {}",
                "--complex".fg(EXPR),
            ),
            Self::InvalidNumber => "numbers are written like `2`, `0.5`, or `.5`, and must be small enough to fit in a 64-bit float".to_string(),
            Self::Empty => "type an expression, such as `x ^ 2 + 1`".to_string(),
        }
    }
}

impl Display for Malformation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOperand => write!(f, "missing operand"),
            Self::MissingOperator => write!(f, "missing operator"),
            Self::UnclosedParenthesis => write!(f, "unclosed parenthesis"),
            Self::UnmatchedParenthesis => write!(f, "unmatched parenthesis"),
            Self::EmptyParenthesis => write!(f, "empty parentheses"),
            Self::MissingFunctionArgument => write!(f, "missing function argument"),
            Self::ImaginaryInRealDomain => write!(f, "imaginary number in the real domain"),
            Self::InvalidNumber => write!(f, "invalid number"),
            Self::Empty => write!(f, "empty expression"),
        }
    }
}
