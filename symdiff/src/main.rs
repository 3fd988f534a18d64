mod error;
mod kind;
mod options;
mod repl;
mod run;

use clap::Parser;
use options::{Command, Options};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::{io::{self, IsTerminal}, iter, process::ExitCode};
use symdiff_expr::Domain;

fn main() -> ExitCode {
    let options = Options::parse();

    if TermLogger::init(options.log_level(), Config::default(), TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("warning: could not initialize logging");
    }

    let output = match options.command() {
        Command::Eval { expr, bindings } => {
            let texts = iter::once(expr).chain(bindings.iter().map(String::as_str));
            run::run_eval(options.domain_for(texts), expr, bindings)
        },
        Command::Diff { expr, var } => {
            run::run_diff(options.domain_for([expr, var].into_iter()), expr, var)
        },
        Command::Session if io::stdin().is_terminal() => {
            let domain = options.forced_domain().unwrap_or(Domain::Real);
            return match repl::run_interactive(domain) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("{}", err);
                    ExitCode::FAILURE
                },
            };
        },
        Command::Session => {
            return match repl::run_batch(options.forced_domain()) {
                Ok(true) => ExitCode::SUCCESS,
                Ok(false) => ExitCode::FAILURE,
                Err(err) => {
                    eprintln!("error: could not read stdin: {}", err);
                    ExitCode::FAILURE
                },
            };
        },
    };

    match output {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        },
        Err(err) => {
            err.report_to_stderr();
            ExitCode::from(err.exit_code())
        },
    }
}
