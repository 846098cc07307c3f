//! Status values reported by validation
//!
//! Statuses are plain values handed back to the caller. They never abort an
//! operation; the host decides whether an `Error` blocks a commit.

use serde::{Deserialize, Serialize};

/// Severity of a status, ordered `Ok < Info < Warning < Error`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Ok,
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Ok => write!(f, "ok"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A severity plus a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Status {
    severity: Severity,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    message: String,
}

impl Status {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_ok(&self) -> bool {
        self.severity == Severity::Ok
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.severity)
        } else {
            write!(f, "{}: {}", self.severity, self.message)
        }
    }
}

/// Pick the most severe status; on ties the earliest one wins
pub fn most_severe<'a, I>(statuses: I) -> Status
where
    I: IntoIterator<Item = &'a Status>,
{
    let mut result: Option<&Status> = None;
    for status in statuses {
        match result {
            Some(current) if current.severity >= status.severity => {}
            _ => result = Some(status),
        }
    }
    result.cloned().unwrap_or_default()
}
