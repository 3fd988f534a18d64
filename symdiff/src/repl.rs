//! Reading expressions from stdin, interactively or one line at a time.

use log::{debug, info};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, BufRead};
use symdiff_error::Error;
use symdiff_expr::{Bindings, Complex64, Domain, Pretty, Scalar};
use symdiff_parser::Parser;
use crate::{
    error::CliError,
    kind::{InvalidBinding, InvalidVariable},
    run::{check_name, locate_unbound},
};

/// Moves the spans of an error raised for `part` of a line to where `part` is in the line.
/// Errors without spans point at the whole of `part`.
fn shift(mut error: Error, part: &str, offset: usize) -> Error {
    if error.spans.is_empty() {
        error.spans.push(0..part.chars().count());
    }
    for span in &mut error.spans {
        *span = span.start + offset..span.end + offset;
    }
    error
}

/// The number of characters before the byte offset `at` of `line`.
fn chars_before(line: &str, at: usize) -> usize {
    line[..at].chars().count()
}

/// The variables bound during a session.
#[derive(Debug, Clone)]
pub struct Session<T> {
    bindings: Bindings<T>,
}

impl<T: Scalar> Session<T> {
    /// Creates a session with no bound variables.
    pub fn new() -> Self {
        Self { bindings: Bindings::new() }
    }

    /// Handles a single line of input, returning the text to print, if any.
    pub fn handle(&mut self, line: &str) -> Result<Option<String>, CliError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        if line == "vars" {
            return Ok(Some(self.list_vars()));
        }

        // two names in a row never form an expression, so `diff` followed by a name is always a
        // command, and `diff` can still be used as a variable
        if let Some(rest) = line.strip_prefix("diff") {
            let args = rest.trim_start();
            if args.len() < rest.len() && args.starts_with(|c: char| c.is_ascii_alphabetic()) {
                return self.diff(line, rest).map(Some);
            }
        }

        if let Some((name, value)) = line.split_once('=') {
            return self.bind(line, name, value).map(Some);
        }

        self.eval_part(line, line, 0).map(|value| Some(Pretty(value).to_string()))
    }

    fn list_vars(&self) -> String {
        if self.bindings.is_empty() {
            return "no variables are bound".to_string();
        }

        self.bindings
            .iter()
            .map(|(name, value)| format!("{} = {}", name, Pretty(value)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Parses and evaluates `part`, which starts at the byte offset `at` of `line`.
    fn eval_part(&self, line: &str, part: &str, at: usize) -> Result<T, CliError> {
        let offset = chars_before(line, at);
        let parser = Parser::new(part);
        let expr = parser.parse::<T>()
            .map_err(|err| CliError::new(shift(err, part, offset), "input", line))?;
        expr.eval(&self.bindings).map_err(|err| {
            let err = locate_unbound(err, parser.tokens());
            CliError::new(shift(err, part, offset), "input", line)
        })
    }

    /// Handles `name = value`, where `value` is a number or an expression over the variables
    /// bound so far.
    fn bind(&mut self, line: &str, name: &str, value: &str) -> Result<String, CliError> {
        let trimmed = name.trim();
        if let Err(reason) = check_name::<T>(trimmed) {
            let start = chars_before(line, name.len() - name.trim_start().len());
            let span = if trimmed.is_empty() {
                0..line.chars().count()
            } else {
                start..start + trimmed.chars().count()
            };
            let error = Error::new(vec![span], InvalidBinding { binding: line.to_string(), reason });
            return Err(CliError::new(error, "input", line));
        }

        let parsed = match T::parse_value(value.trim()) {
            Some(parsed) => parsed,
            None => self.eval_part(line, value, name.len() + 1)?,
        };

        if let Some(previous) = self.bindings.add_var(trimmed, parsed) {
            debug!("rebinding `{}`, previously {}", trimmed, Pretty(previous));
        }
        Ok(format!("{} = {}", trimmed, Pretty(parsed)))
    }

    /// Handles `diff <variable> <expression>`. `rest` is what follows `diff` in `line`.
    fn diff(&self, line: &str, rest: &str) -> Result<String, CliError> {
        let args = rest.trim_start();
        let var_at = line.len() - args.len();
        let var = args.split_whitespace().next().unwrap_or_default();
        let expr_at = var_at + var.len();
        let source = &line[expr_at..];

        if var.is_empty() || source.trim().is_empty() {
            let end = line.chars().count();
            return Err(CliError::usage("`diff` needs a variable and an expression", line, 0..end));
        }

        if let Err(reason) = check_name::<T>(var) {
            let start = chars_before(line, var_at);
            let span = start..start + var.chars().count();
            let error = Error::new(vec![span], InvalidVariable { name: var.to_string(), reason });
            return Err(CliError::new(error, "input", line));
        }

        let offset = chars_before(line, expr_at);
        let expr = symdiff_parser::parse::<T>(source)
            .map_err(|err| CliError::new(shift(err, source, offset), "input", line))?;
        Ok(expr.derivative(var).render())
    }
}

/// Processes each of the `lines` as a separate entry, printing results to stdout and reporting
/// errors to stderr. Returns true if every line succeeded.
pub fn run_lines<T: Scalar>(lines: &[String]) -> bool {
    let mut session = Session::<T>::new();
    let mut ok = true;

    for line in lines {
        match session.handle(line) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => (),
            Err(err) => {
                err.report_to_stderr();
                ok = false;
            },
        }
    }

    ok
}

/// Reads every line of stdin and processes them in order. The domain is chosen over the whole
/// input unless forced.
pub fn run_batch(forced: Option<Domain>) -> io::Result<bool> {
    let lines = io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?;
    let domain = forced.unwrap_or_else(|| {
        if lines.iter().any(|line| symdiff_expr::is_complex(line)) {
            Domain::Complex
        } else {
            Domain::Real
        }
    });
    info!("processing {} lines in the {} domain", lines.len(), domain);

    Ok(match domain {
        Domain::Real => run_lines::<f64>(&lines),
        Domain::Complex => run_lines::<Complex64>(&lines),
    })
}

/// Runs the interactive prompt until end of input.
pub fn run_interactive(domain: Domain) -> Result<(), ReadlineError> {
    match domain {
        Domain::Real => interact(Session::<f64>::new()),
        Domain::Complex => interact(Session::<Complex64>::new()),
    }
}

fn interact<T: Scalar>(mut session: Session<T>) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;

    fn process_line<T: Scalar>(rl: &mut DefaultEditor, session: &mut Session<T>) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        match session.handle(&input) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => (),
            Err(err) => err.report_to_stderr(),
        }
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, &mut session) {
            return match err {
                ReadlineError::Eof | ReadlineError::Interrupted => Ok(()),
                err => Err(err),
            };
        }
    }
}
