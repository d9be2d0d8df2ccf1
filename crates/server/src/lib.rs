//! Energy dashboard server internals, exposed for integration tests.

pub mod api;
pub mod config;
pub mod refresh;
pub mod source;
pub mod state;
