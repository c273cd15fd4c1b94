//! Subcommand implementations. Each returns the text to print on stdout.

pub mod check;
pub mod replay;
