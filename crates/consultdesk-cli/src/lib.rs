//! CLI, configuration and output rendering.
//!
//! This crate provides the `consultdesk` command-line interface.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use cli::Cli;
pub use error::{CliError, CliResult};
