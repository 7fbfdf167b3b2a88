//! Error types for clock-tree register operations.

use thiserror::Error;

/// Result type alias for clock-tree operations.
pub type Result<T> = std::result::Result<T, ClkError>;

/// Errors that can occur while inspecting or mutating clock registers.
///
/// Everything except `Config` (bad static tables, fatal at startup) and
/// `Io` (window unavailable, fatal for that window) is recoverable at the
/// call site; a failed write is terminal for that attempt and never retried
/// automatically.
#[derive(Debug, Error)]
pub enum ClkError {
    /// Input matched neither an enum option name nor a known code.
    #[error("invalid enum value '{input}' for {field}; options: {options}")]
    InvalidEnumValue {
        /// Field being written.
        field: String,
        /// Rejected input.
        input: String,
        /// Comma-separated legal option names.
        options: String,
    },

    /// Input did not parse as a decimal integer.
    #[error("invalid integer input '{input}' for {field}")]
    InvalidInteger {
        /// Field being written.
        field: String,
        /// Rejected input.
        input: String,
    },

    /// Parsed value lies outside the field's declared range.
    #[error("value {value} out of range {min}..={max} for {field}")]
    OutOfRange {
        /// Field being written.
        field: String,
        /// Rejected value.
        value: u32,
        /// Smallest legal value.
        min: u32,
        /// Largest legal value.
        max: u32,
    },

    /// The write would leave a clock domain without a valid source.
    #[error("cannot write {reset_field} while {mux_field} selects {source}: the cluster would lose its clock")]
    InterlockViolation {
        /// Refused reset field.
        reset_field: String,
        /// Mux currently consuming the PLL.
        mux_field: String,
        /// Selected source name.
        r#source: String,
    },

    /// The targeted PLL is not reporting lock.
    #[error("{lock_field} reads unlocked; release {reset_field} and wait for lock before selecting {source}")]
    PllNotLocked {
        /// Lock-status field that read 0.
        lock_field: String,
        /// Reset field to release first.
        reset_field: String,
        /// Source the caller tried to select.
        r#source: String,
    },

    /// The bus accepted the write but the read-back did not match.
    #[error("verification failed for {field}: wrote {wrote:#x}, read back {read_back:#x}")]
    VerificationFailed {
        /// Field that failed to latch.
        field: String,
        /// Intended field value.
        wrote: u32,
        /// Value extracted from the re-read.
        read_back: u32,
    },

    /// No descriptor with that name in the table.
    #[error("no such field: {name}")]
    FieldNotFound {
        /// Requested name.
        name: String,
    },

    /// Register window access failed (mapping, bounds, permissions).
    #[error("register access failed: {reason}")]
    Io {
        /// What went wrong.
        reason: String,
    },

    /// Malformed static configuration (tables or clock graph).
    #[error("invalid configuration: {reason}")]
    Config {
        /// What is malformed.
        reason: String,
    },
}

impl ClkError {
    /// Create an I/O error.
    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io {
            reason: reason.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create a field-not-found error.
    pub fn field_not_found(name: impl Into<String>) -> Self {
        Self::FieldNotFound { name: name.into() }
    }
}

impl From<std::io::Error> for ClkError {
    fn from(e: std::io::Error) -> Self {
        Self::io(e.to_string())
    }
}
