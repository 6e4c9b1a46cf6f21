//! Error types for the container core
//!
//! Missing members are not errors: reads report absence through `Option`
//! and invocations through [`InvokeOutcome`](crate::InvokeOutcome). The
//! variants here cover the remaining genuinely exceptional conditions.

use thiserror::Error;

/// Result type for container operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the container core
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// Write-through on a descriptor whose container has been dropped
    #[error("descriptor '{name}' is detached: its container no longer exists")]
    DetachedDescriptor {
        /// Name of the property the descriptor mirrors
        name: String,
    },

    /// Value cannot be represented in JSON
    #[error("cannot serialize {type_name} value: {detail}")]
    UnserializableValue {
        /// Runtime type name of the offending value
        type_name: &'static str,
        /// What made the value unserializable
        detail: String,
    },
}
