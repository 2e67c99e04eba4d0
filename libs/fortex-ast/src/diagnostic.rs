use serde::{Deserialize, Serialize};

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic message tagged with one or more source lines.
///
/// Most diagnostics point at a single pragma line; merge warnings name
/// both directives involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub lines: Vec<u32>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: String, lines: Vec<u32>) -> Self {
        Self {
            severity,
            message,
            lines,
        }
    }

    pub fn error(message: impl Into<String>, line: u32) -> Self {
        Self::new(Severity::Error, message.into(), vec![line])
    }

    pub fn warning(message: impl Into<String>, line: u32) -> Self {
        Self::new(Severity::Warning, message.into(), vec![line])
    }

    pub fn warning_at(message: impl Into<String>, lines: Vec<u32>) -> Self {
        Self::new(Severity::Warning, message.into(), lines)
    }
}

/// Accumulator for the diagnostics of one driver run.
///
/// Recoverable failures land here instead of aborting the pipeline; the
/// caller inspects the collected list after the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn error(&mut self, message: impl Into<String>, line: u32) {
        self.push(Diagnostic::error(message, line));
    }

    pub fn warning(&mut self, message: impl Into<String>, line: u32) {
        self.push(Diagnostic::warning(message, line));
    }

    pub fn warning_at(&mut self, message: impl Into<String>, lines: Vec<u32>) {
        self.push(Diagnostic::warning_at(message, lines));
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }
}
