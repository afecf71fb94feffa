// src/exec/diag.rs

//! Injected diagnostic collaborator.
//!
//! Every operation reports failure as a plain `false`; the human-readable
//! reason goes through a `DiagnosticSink` instead of a process-wide stream.
//!
//! - [`TracingSink`] is the default implementation used in production.
//! - Tests can provide their own sink that records messages and lets them
//!   assert on (or assert the absence of) diagnostics.

/// Trait abstracting where failure diagnostics are sent.
pub trait DiagnosticSink: Send + Sync {
    /// Report a failure. Called at most once per failed operation, never on
    /// success.
    fn error(&self, message: &str);

    /// Low-priority detail; dropped by default.
    fn debug(&self, _message: &str) {}
}

/// Default sink used in production: forwards to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{message}");
    }
}
