//! Trait to validate semantic errors.
//!
//! A configuration can be well formed TOML and still be unusable, for
//! example a path key that would not fit in a single path segment.
use thiserror::Error;

/// Errors that can occur validating the configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticValidationError {
    #[error("The announce interval must be greater than zero.")]
    ZeroAnnounceInterval,

    #[error("The maximum number of peers per response must be greater than zero.")]
    ZeroPeersPerResponse,

    #[error("The maximum number of peers per response can not be greater than {limit}, got: {max_peers_per_response}.")]
    TooManyPeersPerResponse { max_peers_per_response: usize, limit: usize },

    #[error("The HTTP tracker path key can only contain letters, digits, `-`, `.`, `_` and `~`, got: `{path_key}`.")]
    PathKeyIsNotASegment { path_key: String },
}

pub trait Validator {
    /// # Errors
    ///
    /// Will return an error if the configuration is invalid.
    fn validate(&self) -> Result<(), SemanticValidationError>;
}
