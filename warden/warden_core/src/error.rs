//! Error types for the Warden access-control engine.
//!
//! This module defines the error hierarchy used throughout the system.
//! Validation failures raised by the engine itself are collected in
//! [`AccessError`]; the root [`Error`] type can wrap any subsystem error,
//! allowing uniform handling at the top level.

use thiserror::Error;

/// Root error type for the Warden system.
#[derive(Debug, Error)]
pub enum Error {
    /// Validation failures raised by the access-control engine
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Validation failures raised by the access-control engine.
///
/// Every variant is a local failure of a single operation: none are
/// transient, none are fatal to the process, and the operation that raised
/// one is guaranteed to have left the engine's registries unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// A user with the given name is already registered
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// Registration was attempted with an empty credential
    #[error("Credential cannot be empty")]
    EmptyCredential,

    /// The named user is not registered
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// The supplied credential does not match the stored one
    #[error("Bad credential for user: {0}")]
    BadCredential(String),

    /// A rule referenced a user-group that does not exist
    #[error("Unknown user group: {0}")]
    UnknownUserGroup(String),

    /// A rule referenced an object-group that does not exist
    #[error("Unknown object group: {0}")]
    UnknownObjectGroup(String),

    /// A query named an object that belongs to no object-group
    #[error("Unknown object: {0}")]
    UnknownObject(String),
}

/// Result type used throughout the Warden system.
pub type Result<T> = std::result::Result<T, Error>;
