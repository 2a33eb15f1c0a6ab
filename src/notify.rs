use std::fmt;

use serde::Serialize;

use crate::error::InsertError;
use crate::validate::Duplicate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
        }
    }
}

/// A message for the user about a refused or suspicious edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl From<&InsertError> for Notification {
    fn from(err: &InsertError) -> Self {
        Notification::error(err.to_string())
    }
}

impl From<&Duplicate> for Notification {
    fn from(duplicate: &Duplicate) -> Self {
        let message = match duplicate.parent {
            None => format!(
                "duplicate field name \"{}\" among top-level fields",
                duplicate.name
            ),
            Some(parent) => format!(
                "duplicate field name \"{}\" inside field {parent}",
                duplicate.name
            ),
        };
        Notification::error(message)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.as_str(), self.message)
    }
}
