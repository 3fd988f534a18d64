//! Errors that can occur while evaluating expressions.

use ariadne::Fmt;
use symdiff_attrs::ErrorKind;
use symdiff_error::EXPR;
use crate::domain::Domain;

/// The variable has no value in the bindings used for evaluation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not bound to a value", self.name),
    labels = ["this variable"],
    help = if self.suggestions.is_empty() {
        format!("to bind it, provide: {}", format!("{}=<value>", self.name).fg(EXPR))
    } else if self.suggestions.len() == 1 {
        format!("did you mean the `{}` variable?", (&*self.suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these variables? {}",
            self.suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
)]
pub struct UnboundVariable {
    /// The name of the variable that was not bound.
    pub name: String,

    /// A list of similarly named variables that are bound, if any.
    pub suggestions: Vec<String>,
}

/// A division had a divisor exactly equal to zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["while evaluating this expression"],
    help = "the divisor of this expression evaluated to exactly zero",
)]
pub struct DivisionByZero;

/// An elementary function was applied outside of its domain, such as the logarithm of a negative
/// real number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined for the argument `{}`", self.function, self.argument),
    labels = ["while evaluating this expression"],
    help = format!(
        "try evaluating in the complex domain with {}",
        "--complex".fg(EXPR),
    ),
)]
pub struct DomainError {
    /// The name of the function.
    pub function: &'static str,

    /// The argument the function was given, formatted for display.
    pub argument: String,
}

/// A value could not be read as a number of the domain.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a valid {} number", self.literal, self.domain),
    labels = ["this value"],
    help = match self.domain {
        Domain::Real => "real numbers are written like `2`, `-0.5`, or `1e3`",
        Domain::Complex => "complex numbers are written like `2`, `-i`, or `1.5-2i`",
    },
)]
pub struct InvalidLiteral {
    /// The text that could not be read.
    pub literal: String,

    /// The domain the text was read in.
    pub domain: Domain,
}
