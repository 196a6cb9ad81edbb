//! User-facing notices and input requests
//!
//! The library never talks to a terminal or a UI directly. Notices go through
//! a [`Notifier`] and text input is requested from an [`InputSource`], both
//! supplied by the caller.

use log::info;
use std::cell::RefCell;

/// Fire-and-forget user notifications
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Routes notices into the log at `info` level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!("{}", message);
    }
}

/// Prints notices to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}

/// Keeps every notice, for inspection
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// Asks the user for a line of text; `None` means the request was dismissed
pub trait InputSource {
    fn request(&mut self, prompt: &str) -> Option<String>;
}

impl<F> InputSource for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn request(&mut self, prompt: &str) -> Option<String> {
        self(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        notifier.notify("first");
        notifier.notify("second");
        assert_eq!(notifier.messages(), ["first", "second"]);
    }

    #[test]
    fn test_closure_input_source() {
        let mut prompts = Vec::new();
        let mut input = |prompt: &str| {
            prompts.push(prompt.to_string());
            Some("Jane".to_string())
        };
        assert_eq!(input.request("Enter the file name:"), Some("Jane".to_string()));
        assert_eq!(prompts, ["Enter the file name:"]);
    }
}
