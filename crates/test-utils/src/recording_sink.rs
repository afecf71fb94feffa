use std::sync::{Arc, Mutex};

use runlet::exec::DiagnosticSink;

/// A diagnostic sink that:
/// - records every reported failure message
/// - lets tests assert on (or assert the absence of) diagnostics.
///
/// Clones share the underlying record, so a test can hand one clone to an
/// executor and keep another to inspect afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    errors: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Failure messages reported so far, in order.
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    /// True when no failure has been reported.
    pub fn is_empty(&self) -> bool {
        self.errors.lock().unwrap().is_empty()
    }
}

impl DiagnosticSink for RecordingSink {
    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
