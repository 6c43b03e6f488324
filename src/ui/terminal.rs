//! Terminal logger.

use dialoguer::Confirm;

use super::theme::InspectorTheme;
use super::{LogLevel, Logger, CONSOLE_TARGET};
use crate::error::{InspectorError, Result};

/// Logger printing to the terminal.
///
/// Informational output goes to stdout, warnings and errors to stderr.
/// Every message is also mirrored to `tracing` under [`CONSOLE_TARGET`] so a
/// log file captures the full run.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    theme: InspectorTheme,
    show_debug: bool,
}

impl ConsoleLogger {
    /// Create a console logger.
    pub fn new(colors: bool, show_debug: bool) -> Self {
        let theme = if colors {
            InspectorTheme::new()
        } else {
            InspectorTheme::plain()
        };
        Self { theme, show_debug }
    }
}

impl ConsoleLogger {
    fn emit(&self, level: LogLevel, msg: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: CONSOLE_TARGET, "{}", msg),
            LogLevel::Warn => tracing::warn!(target: CONSOLE_TARGET, "{}", msg),
            LogLevel::Error | LogLevel::Failure => {
                tracing::error!(target: CONSOLE_TARGET, "{}", msg)
            }
            _ => tracing::info!(target: CONSOLE_TARGET, "{}", msg),
        }

        let line = self.theme.format(level, msg);
        match level {
            LogLevel::Debug if !self.show_debug => {}
            LogLevel::Debug | LogLevel::Warn | LogLevel::Error | LogLevel::Failure => {
                eprintln!("{}", line)
            }
            _ => println!("{}", line),
        }
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, msg: &str) {
        self.emit(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.emit(LogLevel::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.emit(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.emit(LogLevel::Error, msg);
    }

    fn progress(&self, msg: &str) {
        self.emit(LogLevel::Progress, msg);
    }

    fn success(&self, msg: &str) {
        self.emit(LogLevel::Success, msg);
    }

    fn failure(&self, msg: &str) {
        self.emit(LogLevel::Failure, msg);
    }

    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact()
            .map_err(|e| InspectorError::Io(e.into()))
    }
}
