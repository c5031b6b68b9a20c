//! CLI subcommand implementations.

pub mod import;
pub mod report;
pub mod status;
