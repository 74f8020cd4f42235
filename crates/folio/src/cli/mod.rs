//! Command implementations for the Folio CLI.

pub mod config;
pub mod resolve;
