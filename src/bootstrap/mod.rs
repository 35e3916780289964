//! Tracker application bootstrapping.
//!
//! This module includes all the functions to build the application, its
//! dependencies, and run the jobs.
//!
//! Jobs are tasks executed concurrently: the HTTP tracker server and,
//! when it's enabled, the swarm cleanup job.
pub mod app;
pub mod jobs;
pub mod logging;
