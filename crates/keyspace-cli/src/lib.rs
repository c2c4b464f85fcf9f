//! Keyspace CLI - command-line glue over keyspace-core and keyspace-client
//!
//! `account` derives the initial config data for a private key; `proof`,
//! `recover` and `set` call the registry's `mksr_*` methods.

pub mod commands;

pub use commands::{run, Cli, Commands, LogLevel};
