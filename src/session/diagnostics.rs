//! Diagnostic stream
//!
//! Wraps the error writer so every diagnostic is one line, optionally colored
//! through crossterm. Color is decided once by the caller; the session never
//! probes the terminal itself.

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

/// Severity of a diagnostic line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Malformed input; the prompt repeats
    Retry,
    /// A swap precondition failed; the session continues
    Error,
    /// The session is about to stop
    Fatal,
}

impl Severity {
    fn color(self) -> Color {
        match self {
            Severity::Retry => Color::Yellow,
            Severity::Error => Color::Red,
            Severity::Fatal => Color::DarkRed,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Severity::Retry => "",
            Severity::Error => "Error: ",
            Severity::Fatal => "Fatal: ",
        }
    }
}

/// Line-oriented writer for operator-facing diagnostics
pub struct Diagnostics<E: Write> {
    sink: E,
    color: bool,
}

impl<E: Write> Diagnostics<E> {
    pub fn new(sink: E, color: bool) -> Self {
        Diagnostics { sink, color }
    }

    /// Write one diagnostic line
    pub fn report(&mut self, severity: Severity, message: &str) -> io::Result<()> {
        let line = format!("{}{}\n", severity.prefix(), message);
        if self.color {
            queue!(
                self.sink,
                SetForegroundColor(severity.color()),
                Print(line),
                ResetColor
            )?;
        } else {
            self.sink.write_all(line.as_bytes())?;
        }
        self.sink.flush()
    }

    pub fn into_inner(self) -> E {
        self.sink
    }
}
