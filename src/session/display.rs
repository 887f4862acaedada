//! Result line formatting
//!
//! [`display`] renders `message: a, b` with a caller-supplied [`Printer`].
//! Any closure `Fn(&mut dyn Write, &T) -> io::Result<()>` is a printer.

use std::io::{self, Write};

/// Capability to render one value
pub trait Printer<T: ?Sized> {
    fn print(&self, out: &mut dyn Write, value: &T) -> io::Result<()>;
}

impl<T: ?Sized, F> Printer<T> for F
where
    F: Fn(&mut dyn Write, &T) -> io::Result<()>,
{
    fn print(&self, out: &mut dyn Write, value: &T) -> io::Result<()> {
        self(out, value)
    }
}

/// Print an integer in decimal
pub fn print_int(out: &mut dyn Write, value: &i32) -> io::Result<()> {
    write!(out, "{}", value)
}

/// Write `message: a, b` followed by a newline
pub fn display<T, P, W>(out: &mut W, message: &str, a: &T, b: &T, printer: &P) -> io::Result<()>
where
    T: ?Sized,
    P: Printer<T> + ?Sized,
    W: Write,
{
    write!(out, "{}: ", message)?;
    printer.print(&mut *out, a)?;
    out.write_all(b", ")?;
    printer.print(&mut *out, b)?;
    writeln!(out)?;
    out.flush()
}
