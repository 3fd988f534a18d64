use ariadne::Source;
use std::{io::{self, Write}, ops::Range};
use symdiff_error::Error;
use crate::kind::InvalidUsage;

/// An error, packaged with the source text its spans point into.
#[derive(Debug)]
pub struct CliError {
    /// The error that occurred.
    pub error: Error,

    /// The name of the source shown in the report.
    pub src_id: String,

    /// The source text the spans of the error point into.
    pub source: String,
}

impl CliError {
    /// Packages an error with the source text it came from.
    ///
    /// Errors without spans, such as those raised while evaluating, are reported as pointing at
    /// the whole source. There is nothing to point at in an empty source.
    pub fn new(mut error: Error, src_id: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let len = source.chars().count();
        if len == 0 {
            error.spans.clear();
        } else if error.spans.is_empty() {
            error.spans.push(0..len);
        }
        Self { error, src_id: src_id.into(), source }
    }

    /// Creates an error for a session command that could not be understood. The span points into
    /// the line the command was read from.
    pub fn usage(reason: impl Into<String>, line: &str, span: Range<usize>) -> Self {
        let error = Error::new(vec![span], InvalidUsage { reason: reason.into() });
        Self::new(error, "input", line)
    }

    /// The exit status of the process when this error ends it.
    pub fn exit_code(&self) -> u8 {
        if self.error.is::<InvalidUsage>() {
            2
        } else {
            1
        }
    }

    /// Writes the report of this error to the given writer.
    pub fn write_report(&self, writer: impl Write) -> io::Result<()> {
        self.error
            .build_report(&self.src_id)
            .write((self.src_id.as_str(), Source::from(&self.source)), writer)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type actually does not have a `Display` implementation, so
    /// we can only use its `eprint` method to print to stderr.
    ///
    /// [`Report`]: https://docs.rs/ariadne/latest/ariadne/struct.Report.html
    pub fn report_to_stderr(&self) {
        if let Err(err) = self.write_report(io::stderr()) {
            eprintln!("error: {}", self.error);
            log::warn!("could not write the error report: {}", err);
        }
    }
}
