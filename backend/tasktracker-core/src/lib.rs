//! Core of the TaskTracker command-line client.
//!
//! - [`auth`]: base URL derivation and client-credentials token exchange
//! - [`dispatch`]: single-attempt JSON/form HTTP calls
//! - [`dotenv`]: `.env` loading that never overrides the environment
//! - [`config`]: settings resolved once per invocation
//! - [`input`]: identifier, URL and comment text validation
//! - [`api`]: TaskTracker endpoints and payloads
//! - [`report`]: diagnostic lines and exit codes

pub mod api;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod dotenv;
pub mod error;
pub mod input;
pub mod report;

#[cfg(test)]
mod tests;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
