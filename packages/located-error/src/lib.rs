//! Errors that remember where they were raised.
//!
//! Wrapping a source error with [`Located`] and converting it into a
//! [`LocatedError`] captures the caller location, so an error bubbling up
//! from the configuration loader or the HTTP server names the line that
//! produced it.
//!
//! ```rust
//! use std::panic::Location;
//! use swarm_tracker_located_error::{Located, LocatedError};
//!
//! #[derive(thiserror::Error, Debug)]
//! enum LoadError {
//!     #[error("missing file")]
//!     MissingFile,
//! }
//!
//! let located: LocatedError<LoadError> = Located(LoadError::MissingFile).into();
//!
//! assert!(located.to_string().starts_with("missing file, "));
//! assert!(located.to_string().contains("src/lib.rs"));
//! ```
use std::error::Error;
use std::panic::Location;
use std::sync::Arc;

use tracing::debug;

pub type DynError = Arc<dyn std::error::Error + Send + Sync>;

/// A source error waiting to be located.
pub struct Located<E>(pub E);

/// A shared source error plus the location that raised it.
#[derive(Debug)]
pub struct LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync,
{
    source: Arc<E>,
    location: Box<Location<'a>>,
}

impl<'a, E> LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync,
{
    #[must_use]
    pub fn location(&self) -> &Location<'a> {
        &self.location
    }

    #[must_use]
    pub fn inner(&self) -> &E {
        &self.source
    }
}

impl<'a, E> std::fmt::Display for LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.source, self.location)
    }
}

impl<'a, E> Error for LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

impl<'a, E> Clone for LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync,
{
    fn clone(&self) -> Self {
        LocatedError {
            source: self.source.clone(),
            location: self.location.clone(),
        }
    }
}

#[allow(clippy::from_over_into)]
impl<'a, E> Into<LocatedError<'a, E>> for Located<E>
where
    E: Error + Send + Sync,
{
    #[track_caller]
    fn into(self) -> LocatedError<'a, E> {
        let located = LocatedError {
            source: Arc::new(self.0),
            location: Box::new(*Location::caller()),
        };
        debug!("{located}");
        located
    }
}

#[allow(clippy::from_over_into)]
impl<'a> Into<LocatedError<'a, dyn std::error::Error + Send + Sync>> for DynError {
    #[track_caller]
    fn into(self) -> LocatedError<'a, dyn std::error::Error + Send + Sync> {
        LocatedError {
            source: self,
            location: Box::new(*Location::caller()),
        }
    }
}
