//! TutorHub domain library: the listing discovery engine plus the service's
//! configuration, telemetry, and error plumbing.

pub mod config;
pub mod directory;
pub mod error;
pub mod telemetry;
