//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::InputSourceError;

/// A diagnostic wrapper for input source errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SourceDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

impl From<InputSourceError> for SourceDiagnostic {
    fn from(e: InputSourceError) -> Self {
        match e {
            InputSourceError::InvalidStream { name, capability } => SourceDiagnostic {
                message: format!("'{name}' cannot back an input source"),
                source: None,
                help: Some(format!(
                    "Open the stream so that it is {capability} before wrapping it"
                )),
                severity: Severity::Error,
            },
            InputSourceError::StreamIo { op, name, source } => SourceDiagnostic {
                message: format!("[{op}] on '{name}'"),
                source: Some(Box::new(source)),
                help: Some("The underlying stream rejected the call".into()),
                severity: Severity::Error,
            },
        }
    }
}

impl From<InputSourceError> for miette::Report {
    fn from(e: InputSourceError) -> Self {
        miette::Report::new(SourceDiagnostic::from(e))
    }
}
