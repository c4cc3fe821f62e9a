//! Error type definitions for key-management operations

#[cfg(not(feature = "std"))]
use alloc::string::String;

use core::fmt;

use crate::types::{KeyId, PrimitiveKind};

/// Primary error type for key-management operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No key manager registered for the type identifier
    UnknownKeyType {
        type_id: String,
    },

    /// A different key manager is already bound to the type identifier
    AlreadyRegistered {
        type_id: String,
    },

    /// Template format parameters rejected by the key manager
    InvalidFormat {
        context: &'static str,
        message: String,
    },

    /// Stored payload is malformed or cannot be converted to a primitive
    InvalidKey {
        context: &'static str,
        message: String,
    },

    /// Key generation failed (entropy exhaustion, unsupported request)
    GenerationFailed {
        context: &'static str,
        message: String,
    },

    /// The key manager does not serve the requested primitive role
    UnsupportedRole {
        requested: PrimitiveKind,
        message: String,
    },

    /// Two enabled keys computed identical non-empty output prefixes
    DuplicatePrefix {
        key_id: KeyId,
    },

    /// The designated primary key is missing, not enabled, or failed to wrap
    PrimaryKeyUnavailable {
        key_id: Option<KeyId>,
        message: String,
    },

    /// Verify/decrypt exhausted every candidate key
    ///
    /// Deliberately carries no detail about which keys were tried or why
    /// each one failed.
    NoMatchingKey,

    /// Invalid length error with context
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Other error
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for key-management operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKeyType { type_id } => {
                write!(f, "no key manager registered for type '{}'", type_id)
            }
            Self::AlreadyRegistered { type_id } => {
                write!(
                    f,
                    "a different key manager is already registered for type '{}'",
                    type_id
                )
            }
            Self::InvalidFormat { context, message } => {
                write!(f, "invalid key format: {}: {}", context, message)
            }
            Self::InvalidKey { context, message } => {
                write!(f, "invalid key: {}: {}", context, message)
            }
            Self::GenerationFailed { context, message } => {
                write!(f, "key generation failed: {}: {}", context, message)
            }
            Self::UnsupportedRole { requested, message } => {
                write!(f, "unsupported primitive role '{}': {}", requested, message)
            }
            Self::DuplicatePrefix { key_id } => {
                write!(f, "duplicate output prefix for key id {}", key_id)
            }
            Self::PrimaryKeyUnavailable { key_id: Some(id), message } => {
                write!(f, "primary key {} unavailable: {}", id, message)
            }
            Self::PrimaryKeyUnavailable { key_id: None, message } => {
                write!(f, "no primary key designated: {}", message)
            }
            Self::NoMatchingKey => {
                write!(f, "no key in the set could process the input")
            }
            Self::InvalidLength {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: invalid length (expected {}, got {})",
                    context, expected, actual
                )
            }
            Self::Other { context, message } => {
                write!(f, "{}: {}", context, message)
            }
        }
    }
}
