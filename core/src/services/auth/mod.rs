//! Identity gateway
//!
//! Registration, login, refresh and revocation behind a single facade that
//! reports refusals as data and store failures as errors.

mod gateway;


pub use gateway::AuthGateway;
