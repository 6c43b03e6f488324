//! Capturing logger for tests.
//!
//! `MockLogger` is cheaply cloneable; clones share the same capture buffer,
//! so a test can keep one handle while the run context owns another.
//!
//! # Example
//!
//! ```
//! use inspector::ui::{LogLevel, Logger, MockLogger};
//!
//! let logger = MockLogger::new();
//! let handle = logger.clone();
//! logger.error("collect failed");
//!
//! assert!(handle.has_error("collect failed"));
//! assert_eq!(handle.entries()[0].0, LogLevel::Error);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::{LogLevel, Logger};
use crate::error::Result;

#[derive(Debug, Default)]
struct Captured {
    entries: Vec<(LogLevel, String)>,
    answers: VecDeque<bool>,
    questions: Vec<String>,
}

/// Logger that records everything.
#[derive(Debug, Clone, Default)]
pub struct MockLogger {
    inner: Rc<RefCell<Captured>>,
}

impl MockLogger {
    /// Create an empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers for `confirm`, consumed in order. Unqueued questions
    /// get their default.
    pub fn queue_answers(&self, answers: impl IntoIterator<Item = bool>) {
        self.inner.borrow_mut().answers.extend(answers);
    }

    /// All captured entries in order.
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.inner.borrow().entries.clone()
    }

    /// Messages captured at `level`.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Questions asked through `confirm`.
    pub fn questions(&self) -> Vec<String> {
        self.inner.borrow().questions.clone()
    }

    fn has(&self, level: LogLevel, needle: &str) -> bool {
        self.inner
            .borrow()
            .entries
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }

    /// Check if an info message containing `needle` was logged.
    pub fn has_info(&self, needle: &str) -> bool {
        self.has(LogLevel::Info, needle)
    }

    /// Check if a warning containing `needle` was logged.
    pub fn has_warning(&self, needle: &str) -> bool {
        self.has(LogLevel::Warn, needle)
    }

    /// Check if an error containing `needle` was logged.
    pub fn has_error(&self, needle: &str) -> bool {
        self.has(LogLevel::Error, needle)
    }

    /// Check if a progress message containing `needle` was logged.
    pub fn has_progress(&self, needle: &str) -> bool {
        self.has(LogLevel::Progress, needle)
    }

    /// Check if a success message containing `needle` was logged.
    pub fn has_success(&self, needle: &str) -> bool {
        self.has(LogLevel::Success, needle)
    }

    /// Check if a failure message containing `needle` was logged.
    pub fn has_failure(&self, needle: &str) -> bool {
        self.has(LogLevel::Failure, needle)
    }

    fn push(&self, level: LogLevel, msg: &str) {
        self.inner
            .borrow_mut()
            .entries
            .push((level, msg.to_string()));
    }
}

impl Logger for MockLogger {
    fn debug(&self, msg: &str) {
        self.push(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.push(LogLevel::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.push(LogLevel::Error, msg);
    }

    fn progress(&self, msg: &str) {
        self.push(LogLevel::Progress, msg);
    }

    fn success(&self, msg: &str) {
        self.push(LogLevel::Success, msg);
    }

    fn failure(&self, msg: &str) {
        self.push(LogLevel::Failure, msg);
    }

    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        let mut inner = self.inner.borrow_mut();
        inner.questions.push(question.to_string());
        Ok(inner.answers.pop_front().unwrap_or(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_by_level() {
        let logger = MockLogger::new();
        logger.info("hello");
        logger.warn("careful");
        logger.failure("boom");

        assert_eq!(logger.messages(LogLevel::Info), vec!["hello"]);
        assert!(logger.has_warning("care"));
        assert!(logger.has_failure("boom"));
        assert!(!logger.has_error("boom"));
    }

    #[test]
    fn clones_share_buffer() {
        let logger = MockLogger::new();
        let handle = logger.clone();
        logger.success("done");
        assert!(handle.has_success("done"));
    }

    #[test]
    fn confirm_uses_queue_then_default() {
        let logger = MockLogger::new();
        logger.queue_answers([false]);

        assert!(!logger.confirm("first?", true).unwrap());
        assert!(logger.confirm("second?", true).unwrap());
        assert_eq!(logger.questions(), vec!["first?", "second?"]);
    }
}
