//! `Error` responses for the [`HTTP tracker`](crate::servers::http).
//!
//! From the [BEP 03. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html):
//!
//! _"Tracker responses are bencoded dictionaries. If a tracker response has a
//! key failure reason, then that maps to a human readable string which explains
//! why the query failed, and no other keys are required."_
//!
//! Old clients expect a numeric `failure code` instead. The tracker answers
//! with one form or the other depending on the `legacy_failure_codes` option.
//!
//! > **NOTICE**: bencoded error responses always have a `200 OK` status code.
//! > Requests outside the tracker protocol get a plain `404 not found`.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bencode::{ben_bytes, ben_int, ben_map};

use crate::servers::http::v1::requests::announce::AnnounceFailure;

/// Numeric code sent in legacy mode for a torrent outside the allow-list.
pub const NOT_ALLOWED_FAILURE_CODE: i64 = 200;

/// Bencoded failure response.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Human readable string which explains why the request failed.
    Reason(String),
    /// Numeric failure code.
    Code(i64),
}

impl Error {
    /// Builds the failure for a rejected announce in the configured form.
    #[must_use]
    pub fn from_announce_failure(failure: &AnnounceFailure, legacy_failure_codes: bool) -> Self {
        if legacy_failure_codes {
            Self::Code(failure.code())
        } else {
            Self::Reason(failure.to_string())
        }
    }

    /// Returns the bencoded representation of the `Error`.
    ///
    /// ```rust
    /// use swarm_tracker::servers::http::v1::responses::error::Error;
    ///
    /// let err = Error::Reason("error message".to_owned());
    ///
    /// // cspell:disable-next-line
    /// assert_eq!(err.write(), b"d14:failure reason13:error messagee");
    /// ```
    #[must_use]
    pub fn write(&self) -> Vec<u8> {
        match self {
            Error::Reason(reason) => (ben_map! { "failure reason" => ben_bytes!(reason.clone()) }).encode(),
            Error::Code(code) => (ben_map! { "failure code" => ben_int!(*code) }).encode(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.write()).into_response()
    }
}

/// Plain text `404 not found`.
#[derive(Debug, PartialEq, Eq)]
pub struct NotFound;

impl IntoResponse for NotFound {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, "not found").into_response()
    }
}
