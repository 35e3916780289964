//! The time the process started.
use std::time::SystemTime;

lazy_static! {
    /// Captured the first time it is read. The stopped clock starts here in
    /// production builds.
    pub static ref TIME_AT_APP_START: SystemTime = SystemTime::now();
}
