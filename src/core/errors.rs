//! UDY-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::args::value::{Value, ValueKind};

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, UnderstudyError>;

/// Coarse grouping of failures by who is expected to handle them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The test itself is wired wrong: unknown call, empty chain, bad index.
    CallerMisuse,
    /// A slot was read as a type it cannot represent.
    Coercion,
    /// A failure scripted by the test author via a raising behavior.
    Simulated,
    /// Config, filesystem and serialization problems.
    Environment,
}

/// Top-level error type for understudy.
#[derive(Debug, Error)]
pub enum UnderstudyError {
    #[error("[UDY-1001] no registered pattern for call {name} with args {args}")]
    UnregisteredCall { name: String, args: String },

    #[error("[UDY-1002] call {name} matched a pattern with no behaviors attached")]
    EmptyChain { name: String },

    #[error("[UDY-1003] history index {index} out of range (recorded calls: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("[UDY-1004] slice bounds {start}..{end} out of range for length {len}")]
    SliceOutOfRange { start: usize, end: usize, len: usize },

    #[error("[UDY-1005] not slice or array (found {found})")]
    NotACollection { found: ValueKind },

    #[error("[UDY-1006] inject target at slot {index} is not writable (found {found})")]
    InjectTarget { index: usize, found: ValueKind },

    #[error("[UDY-1007] cannot probe keys or properties of {found}")]
    NotAContainer { found: ValueKind },

    #[error("[UDY-1008] invalid regex {pattern:?}: {details}")]
    InvalidRegex { pattern: String, details: String },

    #[error("[UDY-2001] cannot be cast to byte array (found {found})")]
    NotByteSequence { found: ValueKind },

    #[error("[UDY-2002] cannot be cast to string array (found {found})")]
    NotStringSequence { found: ValueKind },

    #[error("[UDY-2003] cannot be cast to error (found {found})")]
    NotAnError { found: ValueKind },

    #[error("[UDY-2004] cannot be cast to bool (found {found})")]
    NotABoolean { found: ValueKind },

    #[error("[UDY-2005] cannot be cast to number (found {found})")]
    NotNumeric { found: ValueKind },

    #[error("[UDY-3001] simulated failure: {payload}")]
    Raised { payload: Value },

    #[error("[UDY-4001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[UDY-4002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[UDY-4003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[UDY-4101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[UDY-4201] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UnderstudyError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnregisteredCall { .. } => "UDY-1001",
            Self::EmptyChain { .. } => "UDY-1002",
            Self::IndexOutOfRange { .. } => "UDY-1003",
            Self::SliceOutOfRange { .. } => "UDY-1004",
            Self::NotACollection { .. } => "UDY-1005",
            Self::InjectTarget { .. } => "UDY-1006",
            Self::NotAContainer { .. } => "UDY-1007",
            Self::InvalidRegex { .. } => "UDY-1008",
            Self::NotByteSequence { .. } => "UDY-2001",
            Self::NotStringSequence { .. } => "UDY-2002",
            Self::NotAnError { .. } => "UDY-2003",
            Self::NotABoolean { .. } => "UDY-2004",
            Self::NotNumeric { .. } => "UDY-2005",
            Self::Raised { .. } => "UDY-3001",
            Self::InvalidConfig { .. } => "UDY-4001",
            Self::MissingConfig { .. } => "UDY-4002",
            Self::ConfigParse { .. } => "UDY-4003",
            Self::Serialization { .. } => "UDY-4101",
            Self::Io { .. } => "UDY-4201",
        }
    }

    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UnregisteredCall { .. }
            | Self::EmptyChain { .. }
            | Self::IndexOutOfRange { .. }
            | Self::SliceOutOfRange { .. }
            | Self::NotACollection { .. }
            | Self::InjectTarget { .. }
            | Self::NotAContainer { .. }
            | Self::InvalidRegex { .. } => ErrorCategory::CallerMisuse,
            Self::NotByteSequence { .. }
            | Self::NotStringSequence { .. }
            | Self::NotAnError { .. }
            | Self::NotABoolean { .. }
            | Self::NotNumeric { .. } => ErrorCategory::Coercion,
            Self::Raised { .. } => ErrorCategory::Simulated,
            Self::InvalidConfig { .. }
            | Self::MissingConfig { .. }
            | Self::ConfigParse { .. }
            | Self::Serialization { .. }
            | Self::Io { .. } => ErrorCategory::Environment,
        }
    }

    /// Whether this failure was scripted by the test author.
    #[must_use]
    pub const fn is_simulated(&self) -> bool {
        matches!(self, Self::Raised { .. })
    }

    /// Payload carried by a scripted failure.
    #[must_use]
    pub const fn payload(&self) -> Option<&Value> {
        match self {
            Self::Raised { payload } => Some(payload),
            _ => None,
        }
    }

    /// Build a scripted failure from any value.
    #[must_use]
    pub fn raised(payload: impl Into<Value>) -> Self {
        Self::Raised {
            payload: payload.into(),
        }
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Abort the current test with this error as the failure message.
    pub fn into_panic(self) -> ! {
        panic!("{self}")
    }
}

impl From<serde_json::Error> for UnderstudyError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for UnderstudyError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
