//! Helpers shared by the tests of the swarm tracker crates.
pub mod configuration;
pub mod random;
