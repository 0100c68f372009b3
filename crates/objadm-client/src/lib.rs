//! Client-side access to a cluster's administrative API.
//!
//! The admin operations are defined as the [`AdminClient`] trait (for
//! testability / mocking) together with [`HttpAdminClient`], the concrete
//! implementation that talks to the cluster over HTTP. A [`SessionProvider`]
//! turns an alias from the command line into a ready client handle.

pub mod admin;
pub mod config;
pub mod error;
pub mod session;

pub use admin::{AdminClient, HttpAdminClient};
pub use config::{AliasConfig, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use session::{alias_name, ConfigSessionProvider, SessionProvider};
