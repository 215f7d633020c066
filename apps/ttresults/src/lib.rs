//! # ttresults Library
//!
//! The network and file side of ttresults, exposed for integration tests.
//! The binary in `main.rs` is a thin wrapper over [`cli::execute`].

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
