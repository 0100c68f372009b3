//! Connection options and the admin environment.
//!
//! [`AdminEnv`] is the context commands run in. It resolves a target into an
//! admin client only when a command asks for one, so that argument errors
//! never touch the configuration file or the network.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use objadm_client::{AdminClient, ClientConfig, ClientResult, ConfigSessionProvider, SessionProvider};

use crate::error::{CommandError, CommandResult};

/// Default location of the client configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "~/.objadm/config.toml";

/// Global CLI connection options shared across all subcommands.
#[derive(Debug, Clone, clap::Args)]
pub struct ConnectionOptions {
    /// Path to the client configuration file holding the aliases.
    #[arg(long, global = true, env = "OBJADM_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Request timeout in seconds (overrides the configuration file).
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Skip TLS certificate verification.
    #[arg(long, global = true, default_value_t = false)]
    pub insecure: bool,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            config: DEFAULT_CONFIG_PATH.to_string(),
            timeout_secs: None,
            insecure: false,
        }
    }
}

impl ConnectionOptions {
    /// Resolve the config path, expanding `~` to the home directory.
    pub fn resolved_config_path(&self) -> PathBuf {
        let path = &self.config;
        if let Some(rest) = path.strip_prefix("~/") {
            if let Ok(home) = std::env::var("HOME") {
                return PathBuf::from(home).join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Load the configuration file and apply command-line overrides.
    pub fn load_client_config(&self) -> ClientResult<ClientConfig> {
        let config = ClientConfig::load(self.resolved_config_path())?;
        Ok(self.apply_overrides(config))
    }

    fn apply_overrides(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        config.insecure |= self.insecure;
        config
    }
}

/// Admin environment providing access to the cluster.
pub struct AdminEnv {
    /// Connection options from the command line.
    pub options: ConnectionOptions,

    provider: Option<Arc<dyn SessionProvider>>,
}

impl AdminEnv {
    /// Create an environment that loads its configuration on first use.
    pub fn new(options: ConnectionOptions) -> Self {
        Self {
            options,
            provider: None,
        }
    }

    /// Create an environment backed by an explicit session provider.
    pub fn with_provider(options: ConnectionOptions, provider: Arc<dyn SessionProvider>) -> Self {
        Self {
            options,
            provider: Some(provider),
        }
    }

    /// Resolve `target` into an admin client.
    pub fn admin_client(&self, target: &str) -> CommandResult<Arc<dyn AdminClient>> {
        tracing::debug!(target_alias = target, "resolving admin session");
        let client = match &self.provider {
            Some(provider) => provider.resolve(target),
            None => self
                .options
                .load_client_config()
                .and_then(|config| ConfigSessionProvider::new(config).resolve(target)),
        };
        client.map_err(CommandError::Transport)
    }
}

impl fmt::Debug for AdminEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminEnv")
            .field("options", &self.options)
            .field("provider", &self.provider.is_some())
            .finish()
    }
}
