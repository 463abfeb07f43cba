//! Marine Obs - normalized marine weather observation API
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod feeds;
pub mod model;
pub mod routes;
pub mod sync;
