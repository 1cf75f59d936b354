//! Route handlers

pub mod identity;
