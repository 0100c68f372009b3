//! CLI command definitions and handlers.
//!
//! Each subcommand group is in its own module; [`AdminCommands`] ties them
//! together.

pub mod admin;
pub mod idp;
pub mod policy;

#[cfg(test)]
pub(crate) mod mock;

pub use admin::AdminCommands;
