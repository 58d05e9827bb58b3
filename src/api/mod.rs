//! HTTP surface: export, download and health endpoints.

pub mod handlers;
pub mod server;

pub use server::{router, run_server, ApiConfig, AppState};
