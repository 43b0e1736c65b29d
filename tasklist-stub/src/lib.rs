//! `Tasklist` stub server library.
//!
//! An in-memory implementation of the todo REST service, exposed for local
//! development and as the in-process server of integration tests.

pub mod config;
pub mod server;
pub mod store;
