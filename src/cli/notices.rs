//! Module for showing the session's notices in the terminal.

use std::io::{self, Write};

use ansi_term::Colour;
use isatty;
use memer::{Notice, Observer, Severity};


/// Observer that prints notices to standard error,
/// in color if that's a terminal.
#[derive(Clone, Copy, Debug)]
pub struct TermObserver {
    colored: bool,
}

impl TermObserver {
    #[inline]
    pub fn new() -> Self {
        TermObserver{colored: isatty::stderr_isatty()}
    }
}

impl Observer for TermObserver {
    fn notify(&self, notice: &Notice) {
        let line = format_notice(notice, self.colored);
        if let Err(e) = writeln!(&mut io::stderr(), "{}", line) {
            warn!("Failed to print notice `{}`: {}", notice, e);
        }
    }
}


/// Format the notice as a single line of text.
fn format_notice(notice: &Notice, colored: bool) -> String {
    if !colored {
        return notice.to_string();
    }
    let style = match notice.severity {
        Severity::Info => Colour::Green.bold(),
        Severity::Warning => Colour::Yellow.bold(),
        Severity::Error => Colour::Red.bold(),
    };
    format!("{}: {}", style.paint(notice.title), notice.message)
}
