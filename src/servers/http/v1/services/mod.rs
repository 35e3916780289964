//! Application services for the HTTP tracker.
//!
//! These modules contain logic that is specific for the HTTP tracker but it
//! does not depend on the Axum web server.
pub mod announce;
pub mod peer_ip_resolver;
