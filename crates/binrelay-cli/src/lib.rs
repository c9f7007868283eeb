//! Command-line front end for the binrelay server.
#![deny(unused_crate_dependencies)]

// Used by main.rs binary
use dotenvy as _;
use tokio as _;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

pub mod commands;
pub mod handlers;
pub mod logging;
pub mod parser;

pub use commands::{Commands, ServeArgs};
pub use parser::Cli;
