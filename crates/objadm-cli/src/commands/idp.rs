//! Identity provider configuration commands.
//!
//! - `idp set TARGET ID_TYPE [CFG_NAME] [CFG_PARAMS...]` creates or updates a
//!   configuration.
//! - `idp {openid|ldap} list TARGET` lists the configurations of one type.

use clap::{Args, Subcommand};

use objadm_proto::IdpType;

use crate::args::{parse_idp_set_args, parse_list_target, IdpSetRequest};
use crate::connection::AdminEnv;
use crate::error::{CommandError, CommandResult};
use crate::messages::{ConfigSetMessage, IdpConfigList, Outcome};

const IDP_SET_EXAMPLES: &str = "\
EXAMPLES:
  1. Create the default OpenID configuration.
     objadm idp set play/ openid \\
          client_id=minio-client-app \\
          client_secret=minio-client-app-secret \\
          config_url=\"http://localhost:5556/dex/.well-known/openid-configuration\" \\
          scopes=\"openid,groups\" \\
          redirect_uri=\"http://127.0.0.1:10000/oauth_callback\" \\
          role_policy=\"consoleAdmin\"

  2. Update the OpenID configuration named \"dex_test\".
     objadm idp set --update play/ openid dex_test \\
          client_id=minio-client-app \\
          scopes=\"openid,groups\"

  3. Create the LDAP configuration (CFG_NAME must be empty for LDAP).
     objadm idp set play/ ldap \\
          server_addr=ldap.corp.min.io:686 \\
          lookup_bind_dn=cn=readonly,ou=service_account,dc=min,dc=io \\
          lookup_bind_password=mysecretpassword \\
          user_dn_search_base_dn=dc=min,dc=io \\
          user_dn_search_filter=\"(uid=%s)\"";

const IDP_LIST_EXAMPLES: &str = "\
EXAMPLES:
  1. List the OpenID configurations on alias 'play'.
     objadm idp openid ls play/";

/// Identity provider subcommands.
#[derive(Debug, Subcommand)]
pub enum IdpCommands {
    /// Create or update an IDP configuration.
    #[command(after_help = IDP_SET_EXAMPLES)]
    Set(IdpSet),

    /// Manage OpenID configurations.
    #[command(subcommand)]
    Openid(IdpTypeCommands),

    /// Manage LDAP configurations.
    #[command(subcommand)]
    Ldap(IdpTypeCommands),
}

/// Subcommands available under each IDP type.
#[derive(Debug, Subcommand)]
pub enum IdpTypeCommands {
    /// List the configurations of this type.
    #[command(visible_alias = "ls", after_help = IDP_LIST_EXAMPLES)]
    List(IdpList),
}

/// Arguments for `idp set`.
#[derive(Debug, Args)]
pub struct IdpSet {
    /// Update an existing configuration instead of creating one.
    #[arg(long, default_value_t = false)]
    pub update: bool,

    /// TARGET ID_TYPE [CFG_NAME] [CFG_PARAMS...]
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Arguments for `idp {openid|ldap} list`.
#[derive(Debug, Args)]
pub struct IdpList {
    /// TARGET
    #[arg(value_name = "TARGET")]
    pub args: Vec<String>,
}

impl IdpCommands {
    pub async fn execute(&self, env: &AdminEnv) -> CommandResult<Vec<Outcome>> {
        match self {
            Self::Set(cmd) => cmd.execute(env).await,
            Self::Openid(cmd) => cmd.execute(env, IdpType::Openid).await,
            Self::Ldap(cmd) => cmd.execute(env, IdpType::Ldap).await,
        }
    }
}

impl IdpTypeCommands {
    pub async fn execute(&self, env: &AdminEnv, idp_type: IdpType) -> CommandResult<Vec<Outcome>> {
        match self {
            Self::List(cmd) => cmd.execute(env, idp_type).await,
        }
    }
}

impl IdpSet {
    pub async fn execute(&self, env: &AdminEnv) -> CommandResult<Vec<Outcome>> {
        let IdpSetRequest { target, config } = parse_idp_set_args(&self.args, self.update)?;
        tracing::debug!(
            target_alias = %target,
            idp_type = %config.idp_type,
            name = config.path_name(),
            update = config.update,
            "idp set"
        );

        let client = env.admin_client(&target)?;
        let restart = client
            .add_or_update_idp_config(&config)
            .await
            .map_err(|source| CommandError::Rpc {
                action: format!(
                    "Unable to set IDP config for '{}' on '{}'",
                    config.idp_type, target
                ),
                source,
            })?;

        tracing::info!(target_alias = %target, idp_type = %config.idp_type, restart, "IDP config applied");
        Ok(vec![Outcome::ConfigSet(ConfigSetMessage::new(target, restart))])
    }
}

impl IdpList {
    pub async fn execute(&self, env: &AdminEnv, idp_type: IdpType) -> CommandResult<Vec<Outcome>> {
        let target = parse_list_target(&self.args)?;
        tracing::debug!(target_alias = target, idp_type = %idp_type, "idp list");

        let client = env.admin_client(target)?;
        let items = client
            .list_idp_config(idp_type)
            .await
            .map_err(|source| CommandError::Rpc {
                action: format!("Unable to list IDP configs for '{}' on '{}'", idp_type, target),
                source,
            })?;

        tracing::info!(target_alias = target, idp_type = %idp_type, count = items.len(), "IDP configs listed");
        Ok(vec![Outcome::IdpList(IdpConfigList(items))])
    }
}
