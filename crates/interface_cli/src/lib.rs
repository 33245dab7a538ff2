//! Inventory Sync CLI
//!
//! Thin command-line front end over [`infra_inventory::SessionClient`]. The
//! argument definitions live in [`cli`]; [`commands::run`] executes a parsed
//! command against any connector, so the commands can be exercised against
//! the scripted backend in tests.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command};
pub use commands::run;
