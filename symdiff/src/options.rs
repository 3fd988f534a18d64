//! Command-line options.

use clap::{ArgAction, Parser};
use simplelog::LevelFilter;
use symdiff_expr::{is_complex, Domain};

/// Printed after the list of options by `--help`.
const AFTER_HELP: &str = "\
With neither --eval nor --diff, expressions are read from stdin: interactively if stdin is a
terminal, one per line otherwise. In a session, `name = value` binds a variable,
`diff <variable> <expression>` differentiates, and `vars` lists the bound variables.

Expressions use numbers, variables, `+ - * / ^`, parentheses, and the functions `sin`, `cos`,
`exp`, and `ln`. There is no unary minus: write negative numbers as `(0 - 2)`.

If neither --real nor --complex is given, the complex domain is used when an argument contains
a standalone `i`, as in `2i` or `1 - i`.";

/// Evaluate and symbolically differentiate expressions.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "symdiff", version, about, long_about = None, after_help = AFTER_HELP)]
pub struct Options {
    /// Evaluate an expression, with the variables bound by the trailing `NAME=VALUE` arguments.
    #[arg(long, value_name = "EXPRESSION", allow_hyphen_values = true, conflicts_with = "diff")]
    pub eval: Option<String>,

    /// Differentiate an expression with respect to a variable.
    #[arg(long, num_args = 2, value_names = ["EXPRESSION", "VARIABLE"], allow_hyphen_values = true)]
    pub diff: Option<Vec<String>>,

    /// Variable bindings for `--eval`.
    #[arg(value_name = "NAME=VALUE", requires = "eval")]
    pub bindings: Vec<String>,

    /// Evaluate in the real domain.
    #[arg(long, conflicts_with = "complex")]
    pub real: bool,

    /// Evaluate in the complex domain, where `i` is the imaginary unit.
    #[arg(long)]
    pub complex: bool,

    /// Log more details to stderr. Can be repeated up to three times.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// What the program was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Evaluate an expression with the given `name=value` bindings.
    Eval {
        expr: &'a str,
        bindings: &'a [String],
    },

    /// Differentiate an expression with respect to a variable.
    Diff {
        expr: &'a str,
        var: &'a str,
    },

    /// Read expressions from stdin.
    Session,
}

impl Options {
    /// The command selected by the options.
    pub fn command(&self) -> Command<'_> {
        if let Some(expr) = &self.eval {
            return Command::Eval { expr, bindings: &self.bindings };
        }

        match self.diff.as_deref() {
            Some([expr, var]) => Command::Diff { expr, var },
            _ => Command::Session,
        }
    }

    /// The domain forced with `--real` or `--complex`, if any.
    pub fn forced_domain(&self) -> Option<Domain> {
        if self.real {
            Some(Domain::Real)
        } else if self.complex {
            Some(Domain::Complex)
        } else {
            None
        }
    }

    /// The level of the messages to log.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// The domain to use for the given texts: the forced domain if there is one, otherwise the
    /// complex domain if any of the texts contains a standalone `i`.
    pub fn domain_for<'a>(&self, mut texts: impl Iterator<Item = &'a str>) -> Domain {
        self.forced_domain().unwrap_or_else(|| {
            if texts.any(is_complex) {
                Domain::Complex
            } else {
                Domain::Real
            }
        })
    }
}
