//! Unified error handling.
//!
//! Every failure in this crate is local and recoverable. Each concern has its
//! own error type; [`Error`] collects them for callers that handle entities
//! from raw documents.

use thiserror::Error;

use crate::config::ConfigError;
use crate::entity::GeoLocationError;
use crate::reference::ReferenceError;
use crate::types::IdError;

/// Crate-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// An identifier is malformed or its timestamp cannot be derived.
    #[error(transparent)]
    Id(#[from] IdError),

    /// A document reference was created with an invalid entity type.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// A latitude/longitude pair is out of range.
    #[error(transparent)]
    GeoLocation(#[from] GeoLocationError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A raw document does not fit the entity it is loaded into.
    #[error("Invalid document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Result alias using the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
