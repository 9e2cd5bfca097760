//! # Error Types
//!
//! Terminal conditions raised while selecting, compiling, or loading a
//! schema tree. All errors use `thiserror` for derive-based `Display` and
//! `Error` implementations.
//!
//! Every variant is fatal to the invocation that raised it; no partial
//! output is produced. The data mapper never raises any of these: enum and
//! shape mismatches are tolerated there.

use thiserror::Error;

/// Top-level error type for yangcrd.
#[derive(Error, Debug)]
pub enum CrdError {
    /// The requested root/instance does not exist, or the tree offers
    /// several roots and no disambiguation was supplied.
    #[error("node not found in schema tree: {0}")]
    NodeNotFound(String),

    /// A node was found but has the wrong kind for the request.
    #[error("invalid node '{node}': {reason}")]
    InvalidNode {
        /// Raw schema name of the offending node.
        node: String,
        /// What was expected of it.
        reason: String,
    },

    /// A list declares more than one key and no single-key override was given.
    #[error("multiple keys for node '{node}' ({keys}); specify a key override")]
    MultipleKeys {
        /// Raw schema name of the list node.
        node: String,
        /// The declared key specification.
        keys: String,
    },

    /// A status compilation found nothing read-only to emit.
    #[error("no status fields to generate under '{node}'")]
    NoMappableFields {
        /// Raw schema name of the partitioned root.
        node: String,
    },

    /// The schema tree document is malformed.
    #[error("invalid schema document: {0}")]
    InvalidSchema(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for CrdError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CrdError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl CrdError {
    /// Shorthand for a [`CrdError::InvalidNode`] with a formatted reason.
    pub fn invalid_node(node: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNode {
            node: node.into(),
            reason: reason.into(),
        }
    }
}
