//! pbridge command-line front end
//!
//! Exposes the command handlers so they can be exercised from tests.

pub mod commands;
pub mod common;
pub mod errors;

pub use common::GlobalOpts;
pub use errors::CliError;
