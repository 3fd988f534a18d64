//! Errors specific to the command-line interface.

use ariadne::Fmt;
use symdiff_attrs::ErrorKind;
use symdiff_error::EXPR;

/// The command line could not be understood.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = reason,
    labels = ["here"],
    help = format!("run {} to see how to use symdiff", "symdiff --help".fg(EXPR)),
)]
pub struct InvalidUsage {
    /// What is wrong with the command line.
    pub reason: String,
}

/// The same variable was bound more than once.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is bound more than once", name),
    labels = ["first bound here", "bound again here"],
    help = "each variable can only be given one value",
)]
pub struct DuplicateBinding {
    /// The name of the variable.
    pub name: String,
}

/// A binding is not of the form `name=value`, or binds a reserved name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid binding `{}`", binding),
    labels = [reason.to_string()],
    help = format!("bindings are written as {}, for example {}", "name=value".fg(EXPR), "x=2".fg(EXPR)),
)]
pub struct InvalidBinding {
    /// The binding as it was written.
    pub binding: String,

    /// What is wrong with the binding.
    pub reason: &'static str,
}

/// The variable to differentiate with respect to is not a valid variable name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate with respect to `{}`", name),
    labels = [reason.to_string()],
    help = "variable names are made of letters only, such as `x` or `theta`",
)]
pub struct InvalidVariable {
    /// The name that was given.
    pub name: String,

    /// What is wrong with the name.
    pub reason: &'static str,
}
