//! Admin API client.
//!
//! Provides IDP configuration management and policy association RPCs.

use std::time::Duration;

use async_trait::async_trait;
use objadm_proto::{IdpConfigUpdate, IdpListItem, IdpType, PolicyAssociationReq, PolicyOp};
use reqwest::{Method, Response, Url};
use serde::Deserialize;

use crate::config::AliasConfig;
use crate::error::{ClientError, ClientResult};

/// Path prefix of every admin API endpoint.
pub const ADMIN_API_PREFIX: &str = "/minio/admin/v3";

/// Response header reporting whether a configuration change took effect.
pub const CONFIG_APPLIED_HEADER: &str = "x-minio-config-applied";

/// Value of [`CONFIG_APPLIED_HEADER`] when no restart is needed.
pub const CONFIG_APPLIED_TRUE: &str = "true";

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Operations against a cluster's administrative API.
#[async_trait]
pub trait AdminClient: Send + Sync {
    /// Create or update an IDP configuration.
    ///
    /// Returns `true` when the server reports that a restart is required for
    /// the change to take effect.
    async fn add_or_update_idp_config(&self, req: &IdpConfigUpdate) -> ClientResult<bool>;

    /// List the configurations of one IDP type, in server order.
    async fn list_idp_config(&self, idp_type: IdpType) -> ClientResult<Vec<IdpListItem>>;

    /// Attach the requested policies to a user or group.
    async fn attach_policy(&self, req: &PolicyAssociationReq) -> ClientResult<()>;

    /// Detach the requested policies from a user or group.
    async fn detach_policy(&self, req: &PolicyAssociationReq) -> ClientResult<()>;
}

// ---------------------------------------------------------------------------
// Implementation
// ---------------------------------------------------------------------------

/// Error body returned by the admin API on failure.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}

/// `AdminClient` speaking the admin REST API over HTTP(S).
///
/// Credentials are sent as HTTP basic auth; request signing and payload
/// encryption are left to the deployment's gateway.
pub struct HttpAdminClient {
    http: reqwest::Client,
    endpoint: Url,
    access_key: String,
    secret_key: String,
}

impl HttpAdminClient {
    /// Build a client for one alias.
    pub fn new(alias: &AliasConfig, timeout: Duration, insecure: bool) -> ClientResult<Self> {
        let endpoint = Url::parse(&alias.url)
            .map_err(|e| ClientError::Config(format!("invalid url '{}': {}", alias.url, e)))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(insecure)
            .build()?;

        Ok(Self {
            http,
            endpoint,
            access_key: alias.access_key.clone(),
            secret_key: alias.secret_key.clone(),
        })
    }

    /// The cluster endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        let base = self.endpoint.as_str().trim_end_matches('/');
        let full = format!("{}{}{}", base, ADMIN_API_PREFIX, path);
        Url::parse(&full).map_err(|e| ClientError::Config(format!("invalid url '{}': {}", full, e)))
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<reqwest::RequestBuilder> {
        let mut builder = self.http.request(method, self.url(path)?);
        if !self.access_key.is_empty() {
            builder = builder.basic_auth(&self.access_key, Some(&self.secret_key));
        }
        Ok(builder)
    }

    /// Turn a non-success response into `ClientError::Status`.
    async fn check(resp: Response) -> ClientResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let (code, message) = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(err) if !err.message.is_empty() => (err.code, err.message),
            _ => {
                let text = body.trim();
                let message = if text.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    text.to_string()
                };
                (String::new(), message)
            }
        };

        Err(ClientError::Status {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn change_policy(&self, op: PolicyOp, req: &PolicyAssociationReq) -> ClientResult<()> {
        req.validate()?;
        let path = format!("/idp/builtin/policy/{}", op.as_str());
        tracing::debug!(
            op = %op,
            policies = req.policies.len(),
            principal = %req.principal(),
            "sending policy association request"
        );
        let resp = self.request(Method::POST, &path)?.json(req).send().await?;
        Self::check(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl AdminClient for HttpAdminClient {
    async fn add_or_update_idp_config(&self, req: &IdpConfigUpdate) -> ClientResult<bool> {
        let method = if req.update { Method::POST } else { Method::PUT };
        let path = format!("/idp-config/{}/{}", req.idp_type, req.path_name());
        tracing::debug!(idp_type = %req.idp_type, name = %req.path_name(), update = req.update, "sending IDP config");

        let resp = self
            .request(method, &path)?
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(req.body.clone())
            .send()
            .await?;
        let resp = Self::check(resp).await?;

        let applied = resp
            .headers()
            .get(CONFIG_APPLIED_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v == CONFIG_APPLIED_TRUE)
            .unwrap_or(false);
        Ok(!applied)
    }

    async fn list_idp_config(&self, idp_type: IdpType) -> ClientResult<Vec<IdpListItem>> {
        let path = format!("/idp-config/{}", idp_type);
        let resp = self.request(Method::GET, &path)?.send().await?;
        let resp = Self::check(resp).await?;
        let body = resp.bytes().await?;
        let items: Vec<IdpListItem> = serde_json::from_slice(&body)?;
        tracing::debug!(idp_type = %idp_type, count = items.len(), "listed IDP configs");
        Ok(items)
    }

    async fn attach_policy(&self, req: &PolicyAssociationReq) -> ClientResult<()> {
        self.change_policy(PolicyOp::Attach, req).await
    }

    async fn detach_policy(&self, req: &PolicyAssociationReq) -> ClientResult<()> {
        self.change_policy(PolicyOp::Detach, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias(url: &str) -> AliasConfig {
        AliasConfig {
            url: url.to_string(),
            access_key: "admin".to_string(),
            secret_key: "secret".to_string(),
        }
    }

    #[test]
    fn test_url_building() {
        let client =
            HttpAdminClient::new(&alias("https://play.example.net/"), Duration::from_secs(5), false)
                .unwrap();
        assert_eq!(
            client.url("/idp-config/openid").unwrap().as_str(),
            "https://play.example.net/minio/admin/v3/idp-config/openid"
        );
    }

    #[test]
    fn test_url_building_keeps_base_path() {
        let client =
            HttpAdminClient::new(&alias("http://gw.local:9000/s3"), Duration::from_secs(5), false)
                .unwrap();
        assert_eq!(
            client.url("/idp/builtin/policy/attach").unwrap().as_str(),
            "http://gw.local:9000/s3/minio/admin/v3/idp/builtin/policy/attach"
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = HttpAdminClient::new(&alias("::nope"), Duration::from_secs(5), false)
            .err()
            .unwrap();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[tokio::test]
    async fn test_invalid_association_never_sent() {
        // Port 9 (discard) is never contacted: validation fails first.
        let client =
            HttpAdminClient::new(&alias("http://127.0.0.1:9"), Duration::from_secs(1), false)
                .unwrap();
        let req = PolicyAssociationReq {
            policies: vec!["readonly".into()],
            user: "bob".into(),
            group: "legal".into(),
        };
        let err = client.attach_policy(&req).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }
}
