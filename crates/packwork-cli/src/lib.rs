//! Command-line driver for packwork build configurations.
//!
//! - [`cli`]: argument definitions
//! - `commands`: `config`, `classify` and `name`
//! - [`error`]: CLI errors and their miette rendering
//! - [`logger`]: tracing subscriber setup

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;

pub use error::{CliError, Result};
