//! Store error types.
//!
//! Backends translate their own failure shapes (HTTP status codes, vendor
//! error codes, lock poisoning) into this taxonomy. Nothing above the store
//! ever inspects a vendor code.

/// Errors that can occur while talking to the hosted data store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write (e.g. an email already used).
    #[error("duplicate key on '{table}': {message}")]
    DuplicateKey { table: String, message: String },

    /// The store could not be reached or answered with a server-side failure.
    #[error("transient store failure: {reason}")]
    Transient { reason: String },

    /// The store rejected the request for any other reason, or sent a
    /// response that could not be decoded.
    #[error("store rejected request (code {code}): {message}")]
    Unknown { code: String, message: String },

    /// The store client could not be constructed from its settings.
    #[error("invalid store configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// Whether this error is a unique-constraint conflict.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }

    pub(crate) fn unknown(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unknown {
            code: code.into(),
            message: message.into(),
        }
    }
}
