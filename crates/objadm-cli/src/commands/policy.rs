//! Policy association commands (`policy attach`, `policy detach`).

use clap::{Args, Subcommand};

use objadm_proto::PolicyOp;

use crate::args::{build_policy_association, AssociationRequest, POLICY_ATTACH_USAGE, POLICY_DETACH_USAGE};
use crate::connection::AdminEnv;
use crate::error::{CommandError, CommandResult};
use crate::messages::{Outcome, PolicyMessage};

const ATTACH_EXAMPLES: &str = "\
EXAMPLES:
  1. Attach the \"readonly\" policy to user \"james\".
     objadm policy attach myminio readonly --user james

  2. Attach the \"audit-policy\" and \"acct-policy\" policies to group \"legal\".
     objadm policy attach myminio audit-policy acct-policy --group legal";

const DETACH_EXAMPLES: &str = "\
EXAMPLES:
  1. Detach the \"readonly\" policy from user \"james\".
     objadm policy detach myminio readonly --user james

  2. Detach the \"audit-policy\" and \"acct-policy\" policies from group \"legal\".
     objadm policy detach myminio audit-policy acct-policy --group legal";

/// Policy subcommands.
#[derive(Debug, Subcommand)]
pub enum PolicyCommands {
    /// Attach policies to a user or group.
    #[command(after_help = ATTACH_EXAMPLES)]
    Attach(PolicyAssociationArgs),

    /// Detach policies from a user or group.
    #[command(after_help = DETACH_EXAMPLES)]
    Detach(PolicyAssociationArgs),
}

/// Arguments shared by `policy attach` and `policy detach`.
#[derive(Debug, Args)]
pub struct PolicyAssociationArgs {
    /// TARGET POLICY [POLICY...]
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// User to attach the policies to, or detach them from.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Group to attach the policies to, or detach them from.
    #[arg(short, long)]
    pub group: Option<String>,
}

impl PolicyCommands {
    pub async fn execute(&self, env: &AdminEnv) -> CommandResult<Vec<Outcome>> {
        match self {
            Self::Attach(args) => attach_or_detach(env, args, PolicyOp::Attach).await,
            Self::Detach(args) => attach_or_detach(env, args, PolicyOp::Detach).await,
        }
    }
}

async fn attach_or_detach(
    env: &AdminEnv,
    args: &PolicyAssociationArgs,
    op: PolicyOp,
) -> CommandResult<Vec<Outcome>> {
    let usage = match op {
        PolicyOp::Attach => POLICY_ATTACH_USAGE,
        PolicyOp::Detach => POLICY_DETACH_USAGE,
    };
    let AssociationRequest { target, req } =
        build_policy_association(&args.args, args.user.as_deref(), args.group.as_deref(), usage)?;
    tracing::debug!(
        target_alias = %target,
        %op,
        policies = ?req.policies,
        user = %req.user,
        group = %req.group,
        "policy association"
    );

    let client = env.admin_client(&target)?;
    let result = match op {
        PolicyOp::Attach => client.attach_policy(&req).await,
        PolicyOp::Detach => client.detach_policy(&req).await,
    };
    result.map_err(|source| CommandError::Rpc {
        action: format!("Unable to {} the policy on '{}'", op, target),
        source,
    })?;

    tracing::info!(target_alias = %target, %op, count = req.policies.len(), "policy association changed");
    Ok(PolicyMessage::for_request(op, &req)
        .into_iter()
        .map(Outcome::Policy)
        .collect())
}
