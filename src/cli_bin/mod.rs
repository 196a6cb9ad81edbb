//! CLI-only components: argument parsing and command handlers

pub mod args;
pub mod commands;
