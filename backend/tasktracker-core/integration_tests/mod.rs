mod helpers;

mod api;
mod auth;
mod dispatch;
mod error;
