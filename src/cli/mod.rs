//! Command-line interface for the xiphos driver binary.

pub mod args;
pub mod commands;
