//! Time related functions and types.
//!
//! The tracker never reads the system time directly. Everything that needs
//! "now" (the last announce timestamp, the staleness window of a swarm)
//! asks a clock implementing [`clock::Time`], so tests can freeze or move the
//! time without sleeping.
//!
//! Clocks use the type `DurationSinceUnixEpoch` which is a
//! `std::time::Duration` since the Unix Epoch (timestamp). The timestamp does
//! not depend on the time zone of the host.

pub mod clock;
pub mod conv;
pub mod static_time;

#[macro_use]
extern crate lazy_static;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;
