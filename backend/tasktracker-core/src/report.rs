//! Diagnostic lines for failed invocations.
//!
//! Three formats exist: HTTP failures, network failures and everything
//! else. Each writes exactly one line; every category exits with code 1.

use crate::error::{CoreError, DispatchError};

use std::fmt::Display;
use std::io::{self, Stderr, Write};

use log::debug;

pub const FAILURE_EXIT_CODE: u8 = 1;
pub const SUCCESS_EXIT_CODE: u8 = 0;

pub struct ErrorReporter<W: Write> {
    out: W,
}

impl ErrorReporter<Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> ErrorReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn http_error(&mut self, url: &str, status: impl Display, reason: &str, body: &str) {
        self.emit(format_args!(
            "API HTTP error: url={url}, status={status}, reason={reason}, body={body}"
        ));
    }

    pub fn network_error(&mut self, reason: &str) {
        self.emit(format_args!("API network error: reason={reason}"));
    }

    pub fn execution_error(&mut self, error: &dyn Display) {
        self.emit(format_args!("Execution error: {error}"));
    }

    /// Write the line matching the error's category and return the exit code.
    pub fn report(&mut self, error: &CoreError) -> u8 {
        debug!(
            "Reporting {} error raised at {}",
            error.category().as_str(),
            error.location()
        );

        match error.dispatch_error() {
            Some(DispatchError::Http {
                url,
                status,
                reason,
                body,
                ..
            }) => self.http_error(url, status, reason, body),
            Some(DispatchError::Network { reason, .. }) => self.network_error(reason),
            _ => self.execution_error(error),
        }

        FAILURE_EXIT_CODE
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: std::fmt::Arguments<'_>) {
        // Nowhere left to report a failing diagnostic stream
        let _ = writeln!(self.out, "{line}");
        let _ = self.out.flush();
    }
}
