//! Alias-based session resolution.

use std::sync::Arc;

use crate::admin::{AdminClient, HttpAdminClient};
use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Resolves a command-line target into an admin client handle.
pub trait SessionProvider: Send + Sync {
    fn resolve(&self, target: &str) -> ClientResult<Arc<dyn AdminClient>>;
}

/// Alias part of a target: everything before the first `/`.
///
/// `play`, `play/` and `play/bucket/prefix` all name the alias `play`.
pub fn alias_name(target: &str) -> &str {
    target.split('/').next().unwrap_or(target)
}

/// `SessionProvider` backed by a [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ConfigSessionProvider {
    config: ClientConfig,
}

impl ConfigSessionProvider {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

impl SessionProvider for ConfigSessionProvider {
    fn resolve(&self, target: &str) -> ClientResult<Arc<dyn AdminClient>> {
        let alias = alias_name(target);
        let alias_cfg = self.config.alias(alias)?;
        let client = HttpAdminClient::new(alias_cfg, self.config.timeout, self.config.insecure)?;
        tracing::debug!(alias, endpoint = %client.endpoint(), "resolved admin session");
        Ok(Arc::new(client))
    }
}
