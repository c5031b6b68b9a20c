//! Work-experience report CLI library.
//!
//! This crate provides the CLI interface for experience time reports.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
