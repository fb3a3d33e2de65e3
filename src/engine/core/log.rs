//! Diagnostics sink used for fallback and validation messages.

use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// Host-provided logger. Implementations must not panic.
pub trait Diagnostics {
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Records every message in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    entries: RefCell<Vec<(Level, String)>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Level::Error)
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages(Level::Info)
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    fn messages(&self, level: Level) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn error(&self, message: &str) {
        self.entries
            .borrow_mut()
            .push((Level::Error, message.to_string()));
    }

    fn info(&self, message: &str) {
        self.entries
            .borrow_mut()
            .push((Level::Info, message.to_string()));
    }
}
