//! CLI command implementations

pub mod alerts;
pub mod costs;
pub mod machines;
pub mod recommendations;
pub mod summary;
