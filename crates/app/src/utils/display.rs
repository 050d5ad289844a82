//! Terminal timer display

use std::io::{self, Stdout, Write};

use parking_lot::Mutex;
use t3tracker_core::ElapsedDisplay;
use t3tracker_domain::format_elapsed;

/// Renders elapsed time as `HH:MM:SS`, rewriting the current line.
///
/// A zero value marks a reset and ends the line.
pub struct TerminalDisplay<W: Write + Send = Stdout> {
    out: Mutex<W>,
}

impl TerminalDisplay<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write + Send> ElapsedDisplay for TerminalDisplay<W> {
    fn show_elapsed(&self, elapsed_seconds: u64) {
        let mut out = self.out.lock();
        let line = format_elapsed(elapsed_seconds);
        let written = if elapsed_seconds == 0 {
            writeln!(out, "\r{line}")
        } else {
            write!(out, "\r{line}")
        };

        if let Err(err) = written.and_then(|()| out.flush()) {
            tracing::debug!(error = %err, "Failed to render elapsed time");
        }
    }
}
