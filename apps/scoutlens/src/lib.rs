//! # Scoutlens Application Library
//!
//! Exposes the HTTP API and CLI modules so integration tests can build
//! routers and test handlers without spawning the binary.

pub mod api;
pub mod cli;
