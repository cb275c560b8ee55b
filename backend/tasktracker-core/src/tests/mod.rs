mod auth;
mod config;
mod dispatch;
mod payloads;
