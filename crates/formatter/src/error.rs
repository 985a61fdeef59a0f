// ABOUTME: Error types for the quick guide formatter including ErrorCode enum and FormatError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing different categories of formatting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InputNotFound,
    InvalidInput,
    Read,
    Malformed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InputNotFound => "input not found",
            ErrorCode::InvalidInput => "invalid input",
            ErrorCode::Read => "read error",
            ErrorCode::Malformed => "malformed markup",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for formatter operations.
///
/// `path` names the input the operation worked on; it is empty for in-memory input.
#[derive(Debug, thiserror::Error)]
pub struct FormatError {
    pub code: ErrorCode,
    pub path: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "quickguide: {}: {}", self.op, self.code)?;
        } else {
            write!(f, "quickguide: {} {}: {}", self.op, self.path, self.code)?;
        }
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl FormatError {
    /// Create an InputNotFound error.
    pub fn input_not_found(
        path: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::InputNotFound,
            path: path.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(
        path: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidInput,
            path: path.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Read error.
    pub fn read(
        path: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Read,
            path: path.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Malformed error. Only raised when recovery is switched off.
    pub fn malformed(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::Malformed,
            path: String::new(),
            op: op.into(),
            source,
        }
    }

    /// Attach the input path to an error raised on in-memory content.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Returns true if this is an InputNotFound error.
    pub fn is_input_not_found(&self) -> bool {
        self.code == ErrorCode::InputNotFound
    }

    /// Returns true if this is an InvalidInput error.
    pub fn is_invalid_input(&self) -> bool {
        self.code == ErrorCode::InvalidInput
    }

    /// Returns true if this is a Read error.
    pub fn is_read(&self) -> bool {
        self.code == ErrorCode::Read
    }

    /// Returns true if this is a Malformed error.
    pub fn is_malformed(&self) -> bool {
        self.code == ErrorCode::Malformed
    }
}
