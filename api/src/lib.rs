//! HTTP surface for Tweetbook identity
//!
//! Routes under `/api/v1/identity` call into `tb_core::AuthGateway`; the
//! binary in `main.rs` wires configuration, stores and tracing around them.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
