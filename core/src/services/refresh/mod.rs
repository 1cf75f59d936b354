//! Refresh token exchange

mod coordinator;


pub use coordinator::RefreshCoordinator;
