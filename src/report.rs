//! Validation report sinks
//!
//! All progress and diagnostic output from the membership engine goes
//! through an injected `ValidationSink`. Sinks are invoked synchronously,
//! in call order, and that order is an observable contract.

/// Channel a report message was emitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// High-level progress, one line per parsed target
    Progress,
    /// Detail lines for groups, exceptions and residual diffs
    Diagnostic,
    /// Non-fatal findings
    Warning,
}

/// One emitted report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMessage {
    pub kind: MessageKind,
    pub text: String,
}

/// Sink for validation progress and diagnostics.
pub trait ValidationSink {
    fn emit(&mut self, message: ReportMessage);

    fn progress(&mut self, text: &str) {
        self.emit(ReportMessage {
            kind: MessageKind::Progress,
            text: text.to_string(),
        });
    }

    fn diagnostic(&mut self, text: &str) {
        self.emit(ReportMessage {
            kind: MessageKind::Diagnostic,
            text: text.to_string(),
        });
    }

    fn warning(&mut self, text: &str) {
        self.emit(ReportMessage {
            kind: MessageKind::Warning,
            text: text.to_string(),
        });
    }
}

/// Sink that records every message, used by tests to assert exact sequences.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub messages: Vec<ReportMessage>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All message texts, in emission order.
    pub fn lines(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.text.as_str()).collect()
    }

    /// Texts of the messages with the given kind, in emission order.
    pub fn lines_of(&self, kind: MessageKind) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.kind == kind)
            .map(|m| m.text.as_str())
            .collect()
    }
}

impl ValidationSink for RecordingSink {
    fn emit(&mut self, message: ReportMessage) {
        self.messages.push(message);
    }
}

/// Sink that forwards every message to a callback, for streaming consumers.
pub struct CallbackSink<F: FnMut(&ReportMessage)> {
    on_message: F,
}

impl<F: FnMut(&ReportMessage)> CallbackSink<F> {
    pub fn new(on_message: F) -> Self {
        Self { on_message }
    }
}

impl<F: FnMut(&ReportMessage)> ValidationSink for CallbackSink<F> {
    fn emit(&mut self, message: ReportMessage) {
        (self.on_message)(&message);
    }
}

/// Sink that prints to the terminal.
///
/// Progress goes to stdout, warnings to stderr, diagnostics to stdout only
/// when verbosity is raised.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    pub verbose: u8,
}

impl ConsoleSink {
    pub fn new(verbose: u8) -> Self {
        Self { verbose }
    }
}

impl ValidationSink for ConsoleSink {
    fn emit(&mut self, message: ReportMessage) {
        match message.kind {
            MessageKind::Progress => println!("{}", message.text),
            MessageKind::Diagnostic => {
                if self.verbose > 0 {
                    println!("  {}", message.text);
                }
            }
            MessageKind::Warning => eprintln!("warning: {}", message.text),
        }
    }
}
