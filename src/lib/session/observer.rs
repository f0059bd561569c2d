//! Module defining how a session reports to the user.

use std::fmt;


/// How serious a `Notice` is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Message for the user about the outcome of an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    #[inline]
    pub fn info<M: Into<String>>(title: &'static str, message: M) -> Self {
        Notice{severity: Severity::Info, title, message: message.into()}
    }

    #[inline]
    pub fn warning<M: Into<String>>(message: M) -> Self {
        Notice{severity: Severity::Warning, title: "Warning", message: message.into()}
    }

    #[inline]
    pub fn error<M: Into<String>>(message: M) -> Self {
        Notice{severity: Severity::Error, title: "Error", message: message.into()}
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}: {}", self.title, self.message)
    }
}


/// Receiver of the notices that a `Session` emits.
///
/// This is where a front-end shows message boxes, prints to the terminal, etc.
pub trait Observer {
    fn notify(&self, notice: &Notice);
}

impl<F: Fn(&Notice)> Observer for F {
    fn notify(&self, notice: &Notice) {
        self(notice)
    }
}


/// Observer that just writes the notices to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn notify(&self, notice: &Notice) {
        match notice.severity {
            Severity::Info => info!("{}", notice),
            Severity::Warning => warn!("{}", notice),
            Severity::Error => error!("{}", notice),
        }
    }
}
