//! The `--eval` and `--diff` commands.

use log::{info, warn};
use std::{collections::HashMap, ops::Range};
use symdiff_error::Error;
use symdiff_expr::{
    domain::is_reserved,
    error::{InvalidLiteral, UnboundVariable},
    Bindings,
    Complex64,
    Domain,
    Expr,
    Pretty,
    Scalar,
};
use symdiff_parser::{tokenizer::{Token, TokenKind}, Parser};
use crate::{
    error::CliError,
    kind::{DuplicateBinding, InvalidBinding, InvalidVariable},
};

/// Checks that `name` can be used as a variable in the domain of `T`, returning the reason it
/// cannot otherwise.
pub fn check_name<T: Scalar>(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        Err("the name is empty")
    } else if !name.chars().all(|c| c.is_ascii_alphabetic()) {
        Err("names can only contain letters")
    } else if is_reserved::<T>(name) {
        Err("`i` is the imaginary unit in the complex domain")
    } else {
        Ok(())
    }
}

/// Points an [`UnboundVariable`] error at the first use of the variable in the source.
pub fn locate_unbound(mut error: Error, tokens: &[Token]) -> Error {
    if let Some(unbound) = error.downcast_ref::<UnboundVariable>() {
        let span = tokens
            .iter()
            .find(|token| token.kind == TokenKind::Name && token.lexeme == unbound.name)
            .map(|token| token.span.clone());
        if let Some(span) = span {
            error.spans = vec![span];
        }
    }
    error
}

/// Converts a region of `text`, given in bytes, into a region in characters.
fn char_span(text: &str, bytes: Range<usize>) -> Range<usize> {
    let start = text[..bytes.start].chars().count();
    start..start + text[bytes].chars().count()
}

/// Parses `name=value` bindings given as separate arguments.
///
/// Errors point into the arguments joined with spaces, which is also the source they are
/// reported against.
pub fn parse_bindings<T: Scalar>(args: &[String]) -> Result<Bindings<T>, CliError> {
    let source = args.join(" ");
    let fail = |error: Error| CliError::new(error, "bindings", source.as_str());

    let mut bindings = Bindings::new();
    let mut seen = HashMap::<&str, Range<usize>>::new();
    let mut offset = 0;

    for arg in args {
        let len = arg.chars().count();
        let whole = offset..offset + len;
        offset += len + 1;

        let Some((name, value)) = arg.split_once('=') else {
            return Err(fail(Error::new(vec![whole], InvalidBinding {
                binding: arg.clone(),
                reason: "expected `name=value`",
            })));
        };

        let name_span = char_span(arg, 0..name.len());
        let name_span = if name.is_empty() {
            whole.clone()
        } else {
            whole.start + name_span.start..whole.start + name_span.end
        };
        if let Err(reason) = check_name::<T>(name) {
            return Err(fail(Error::new(vec![name_span], InvalidBinding {
                binding: arg.clone(),
                reason,
            })));
        }

        if let Some(first) = seen.get(name) {
            return Err(fail(Error::new(vec![first.clone(), name_span], DuplicateBinding {
                name: name.to_string(),
            })));
        }

        let Some(parsed) = T::parse_value(value) else {
            let value_span = char_span(arg, name.len() + 1..arg.len());
            let value_span = if value.is_empty() {
                whole
            } else {
                whole.start + value_span.start..whole.start + value_span.end
            };
            return Err(fail(Error::new(vec![value_span], InvalidLiteral {
                literal: value.to_string(),
                domain: T::DOMAIN,
            })));
        };

        seen.insert(name, name_span);
        bindings.add_var(name, parsed);
    }

    Ok(bindings)
}

/// Parses and evaluates `source` in the domain of `T`, with the given `name=value` bindings.
pub fn evaluate<T: Scalar>(source: &str, args: &[String]) -> Result<T, CliError> {
    let parser = Parser::new(source);
    let expr = parser.parse::<T>()
        .map_err(|err| CliError::new(err, "input", source))?;
    let bindings = parse_bindings::<T>(args)?;

    for (name, _) in bindings.iter() {
        if !expr.contains_variable(name) {
            warn!("`{}` is bound but does not appear in the expression", name);
        }
    }

    expr.eval(&bindings)
        .map_err(|err| CliError::new(locate_unbound(err, parser.tokens()), "input", source))
}

/// Parses `source` in the domain of `T` and differentiates it with respect to `var`.
pub fn differentiate<T: Scalar>(source: &str, var: &str) -> Result<Expr<T>, CliError> {
    if let Err(reason) = check_name::<T>(var) {
        let error = Error::spanless(InvalidVariable { name: var.to_string(), reason });
        return Err(CliError::new(error, "variable", var));
    }

    let expr = symdiff_parser::parse::<T>(source)
        .map_err(|err| CliError::new(err, "input", source))?;
    if !expr.contains_variable(var) {
        info!("`{}` does not appear in the expression, so the derivative is zero", var);
    }

    Ok(expr.derivative(var))
}

/// Runs `--eval` in the given domain, returning the text to print.
pub fn run_eval(domain: Domain, source: &str, args: &[String]) -> Result<String, CliError> {
    info!("evaluating `{}` in the {} domain", source, domain);
    match domain {
        Domain::Real => evaluate::<f64>(source, args).map(|value| Pretty(value).to_string()),
        Domain::Complex => evaluate::<Complex64>(source, args).map(|value| Pretty(value).to_string()),
    }
}

/// Runs `--diff` in the given domain, returning the text to print.
pub fn run_diff(domain: Domain, source: &str, var: &str) -> Result<String, CliError> {
    info!("differentiating `{}` with respect to `{}` in the {} domain", source, var, domain);
    match domain {
        Domain::Real => differentiate::<f64>(source, var).map(|expr| expr.render()),
        Domain::Complex => differentiate::<Complex64>(source, var).map(|expr| expr.render()),
    }
}
