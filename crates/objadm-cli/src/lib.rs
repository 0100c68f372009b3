//! objadm CLI (Command Line Interface) utilities.
//!
//! This crate provides the command-line interface for administering the
//! identity and access settings of an object-storage cluster, organized into
//! command groups using clap's derive macros.
//!
//! # Architecture
//!
//! The CLI is structured as:
//!
//! - **[`commands::AdminCommands`]** -- Top-level command enum dispatching to subgroups.
//! - **[`commands::idp`]** -- Identity provider configuration (set, list).
//! - **[`commands::policy`]** -- Policy associations (attach, detach).
//!
//! Supporting modules:
//!
//! - **[`args`]** -- Translation of raw argument lists into typed requests.
//! - **[`connection`]** -- Connection options and the admin environment (`AdminEnv`).
//! - **[`error`]** -- Command error taxonomy and exit codes.
//! - **[`messages`]** -- Outcome messages produced by commands.
//! - **[`output`]** -- Output formatting (styled text, JSON).
//! - **[`style`]** -- Terminal styling primitives and the presentation `Theme`.
//!
//! # Usage
//!
//! This crate is used by the `objadm` binary. Typical usage:
//!
//! ```ignore
//! use clap::Parser;
//! use objadm_cli::commands::AdminCommands;
//! use objadm_cli::connection::{AdminEnv, ConnectionOptions};
//! use objadm_cli::output::{OutputFormat, Printer};
//! use objadm_cli::style::Theme;
//!
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(flatten)]
//!     connection: ConnectionOptions,
//!
//!     #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
//!     format: OutputFormat,
//!
//!     #[command(subcommand)]
//!     command: AdminCommands,
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let cli = Cli::parse();
//!     let env = AdminEnv::new(cli.connection);
//!     let mut printer = Printer::stdio(cli.format, Theme::new(true));
//!     if let Err(e) = cli.command.run(&env, &mut printer).await {
//!         std::process::exit(e.exit_code());
//!     }
//! }
//! ```

pub mod args;
pub mod commands;
pub mod connection;
pub mod error;
pub mod messages;
pub mod output;
pub mod style;

// Re-export the main types for convenience.
pub use commands::AdminCommands;
pub use connection::{AdminEnv, ConnectionOptions};
pub use error::{CommandError, CommandResult};
pub use output::{Message, OutputFormat, Printer};
pub use style::Theme;
