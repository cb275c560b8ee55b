//! Shared building blocks for the TaskTracker workspace.
//!
//! Small types used by every crate: error locations, HTTP status codes and
//! a redacting wrapper for secrets.
//!
//! ## Architecture
//!
//! - **common** (this crate): Shared value types
//! - **tasktracker-core**: Authentication, request dispatch and API calls
//! - **tasktracker**: Command-line application wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_secret;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;

#[cfg(test)]
mod tests;
