//! Chapterboard HTTP server library
//!
//! Provides the request pipeline, REST API components and startup helpers
//! for the server and import binaries, and for tests.

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod pipeline;
