//! In-memory admin client and session provider for command tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use objadm_client::{AdminClient, ClientError, ClientResult, SessionProvider};
use objadm_proto::{IdpConfigUpdate, IdpListItem, IdpType, PolicyAssociationReq};

use crate::connection::{AdminEnv, ConnectionOptions};

/// A request that reached the mock client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Recorded {
    SetConfig(IdpConfigUpdate),
    List(IdpType),
    Attach(PolicyAssociationReq),
    Detach(PolicyAssociationReq),
}

#[derive(Default)]
pub(crate) struct MockAdminClient {
    recorded: Mutex<Vec<Recorded>>,
    restart: bool,
    listing: Vec<IdpListItem>,
    failure: Option<(u16, String)>,
    hang: bool,
    cancelled: AtomicBool,
}

/// Marks the owning client as cancelled when a hanging request is dropped.
struct CancelFlag<'a>(&'a AtomicBool);

impl Drop for CancelFlag<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl MockAdminClient {
    pub(crate) fn with_restart(mut self, restart: bool) -> Self {
        self.restart = restart;
        self
    }

    pub(crate) fn with_listing(mut self, listing: Vec<IdpListItem>) -> Self {
        self.listing = listing;
        self
    }

    /// Every request fails with this HTTP status.
    pub(crate) fn failing(mut self, status: u16, message: &str) -> Self {
        self.failure = Some((status, message.to_string()));
        self
    }

    /// Every request is recorded and then never answered.
    pub(crate) fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    /// Whether a hanging request was dropped before completing.
    pub(crate) fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    async fn maybe_hang(&self) {
        if self.hang {
            let _flag = CancelFlag(&self.cancelled);
            std::future::pending::<()>().await;
        }
    }

    pub(crate) fn recorded(&self) -> Vec<Recorded> {
        self.recorded.lock().clone()
    }

    fn record(&self, call: Recorded) -> ClientResult<()> {
        self.recorded.lock().push(call);
        match &self.failure {
            Some((status, message)) => Err(ClientError::Status {
                status: *status,
                code: String::new(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AdminClient for MockAdminClient {
    async fn add_or_update_idp_config(&self, req: &IdpConfigUpdate) -> ClientResult<bool> {
        self.record(Recorded::SetConfig(req.clone()))?;
        self.maybe_hang().await;
        Ok(self.restart)
    }

    async fn list_idp_config(&self, idp_type: IdpType) -> ClientResult<Vec<IdpListItem>> {
        self.record(Recorded::List(idp_type))?;
        self.maybe_hang().await;
        Ok(self.listing.clone())
    }

    async fn attach_policy(&self, req: &PolicyAssociationReq) -> ClientResult<()> {
        req.validate()?;
        self.record(Recorded::Attach(req.clone()))?;
        self.maybe_hang().await;
        Ok(())
    }

    async fn detach_policy(&self, req: &PolicyAssociationReq) -> ClientResult<()> {
        req.validate()?;
        self.record(Recorded::Detach(req.clone()))?;
        self.maybe_hang().await;
        Ok(())
    }
}

/// Session provider handing out one shared [`MockAdminClient`].
pub(crate) struct MockSessionProvider {
    client: Option<Arc<MockAdminClient>>,
    resolved: Mutex<Vec<String>>,
    resolves: AtomicUsize,
}

impl MockSessionProvider {
    pub(crate) fn new(client: MockAdminClient) -> Arc<Self> {
        Arc::new(Self {
            client: Some(Arc::new(client)),
            resolved: Mutex::new(Vec::new()),
            resolves: AtomicUsize::new(0),
        })
    }

    /// A provider for which every alias is unknown.
    pub(crate) fn unresolvable() -> Arc<Self> {
        Arc::new(Self {
            client: None,
            resolved: Mutex::new(Vec::new()),
            resolves: AtomicUsize::new(0),
        })
    }

    pub(crate) fn client(&self) -> Arc<MockAdminClient> {
        match &self.client {
            Some(client) => client.clone(),
            None => Arc::new(MockAdminClient::default()),
        }
    }

    pub(crate) fn resolve_count(&self) -> usize {
        self.resolves.load(Ordering::SeqCst)
    }

    pub(crate) fn resolved_targets(&self) -> Vec<String> {
        self.resolved.lock().clone()
    }
}

impl SessionProvider for MockSessionProvider {
    fn resolve(&self, target: &str) -> ClientResult<Arc<dyn AdminClient>> {
        self.resolves.fetch_add(1, Ordering::SeqCst);
        self.resolved.lock().push(target.to_string());
        match &self.client {
            Some(client) => {
                let client: Arc<dyn AdminClient> = client.clone();
                Ok(client)
            }
            None => Err(ClientError::UnknownAlias(
                objadm_client::alias_name(target).to_string(),
            )),
        }
    }
}

pub(crate) fn env_with(provider: &Arc<MockSessionProvider>) -> AdminEnv {
    let provider: Arc<dyn SessionProvider> = provider.clone();
    AdminEnv::with_provider(ConnectionOptions::default(), provider)
}
