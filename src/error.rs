//! Typed errors shared by the API client and the run orchestrator.

use thiserror::Error;

/// Failure categories, with stable numeric codes for the host log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server rejected or revoked the credential.
    TokenInvalid,
    /// No credential has been stored or supplied.
    TokenMissing,
    /// A mandatory argument was omitted. Programmer error.
    ParameterMissing,
    /// A non-auth failure reported by the API or transport.
    Api,
    /// Everything else.
    Unknown,
}

impl ErrorKind {
    /// Stable code written to the diagnostic log.
    pub fn code(self) -> u16 {
        match self {
            Self::TokenInvalid => 1,
            Self::TokenMissing => 2,
            Self::ParameterMissing => 3,
            Self::Api => 4,
            Self::Unknown => 666,
        }
    }

    fn default_message(self) -> &'static str {
        match self {
            Self::TokenInvalid => "Invalid token",
            Self::ParameterMissing => "A parameter is missing from function call",
            Self::Api => "Error occurred on API server",
            Self::TokenMissing | Self::Unknown => "Error occurred",
        }
    }

    fn default_description(self) -> Option<&'static str> {
        match self {
            Self::TokenInvalid => Some("Please try again…"),
            _ => None,
        }
    }
}

/// Error value created at the failure site and propagated up.
///
/// Constructed bare, it carries the kind's default message. An explicit
/// message overrides the default and drops the default description.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ActionError {
    kind: ErrorKind,
    message: String,
    description: Option<String>,
}

impl ActionError {
    /// Creates an error with the kind's default message and description.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
            description: kind.default_description().map(str::to_string),
        }
    }

    /// Creates an error with an explicit message and no description.
    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            description: None,
        }
    }

    /// Creates an error with an explicit message and supplementary detail.
    pub fn with_description(
        kind: ErrorKind,
        message: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            description: Some(description.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Writes a single formatted line to the process-wide diagnostic sink.
    pub fn log(&self) {
        match &self.description {
            Some(description) => tracing::error!(
                "Error {}: {} ({})",
                self.kind.code(),
                self.message,
                description
            ),
            None => tracing::error!("Error {}: {}", self.kind.code(), self.message),
        }
    }
}
