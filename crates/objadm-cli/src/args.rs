//! Translation of raw command-line argument lists into typed requests.
//!
//! The commands take their positional arguments as plain token lists so that
//! arity is checked here, with our own usage messages and exit codes, before
//! any connection is made.

use objadm_proto::{IdpConfigUpdate, IdpType, PolicyAssociationReq};

use crate::error::{CommandError, CommandResult};

pub const IDP_SET_USAGE: &str = "objadm idp set [--update] TARGET ID_TYPE [CFG_NAME] [CFG_PARAMS...]";
pub const IDP_LIST_USAGE: &str = "objadm idp {openid|ldap} list TARGET";
pub const POLICY_ATTACH_USAGE: &str =
    "objadm policy attach TARGET POLICY [POLICY...] [--user USER | --group GROUP]";
pub const POLICY_DETACH_USAGE: &str =
    "objadm policy detach TARGET POLICY [POLICY...] [--user USER | --group GROUP]";

/// Configuration name and body taken from `idp set` arguments.
///
/// A leading token without `=` is the configuration name; otherwise the
/// name is empty and selects the default configuration. A name that itself
/// contains `=` cannot be expressed and is read as the first body pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigString {
    pub name: String,
    /// Remaining tokens joined by single spaces.
    pub body: String,
}

impl ConfigString {
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
        let (name, rest) = match tokens.split_first() {
            Some((first, rest)) if !first.as_ref().contains('=') => {
                (first.as_ref().to_string(), rest)
            }
            _ => (String::new(), tokens),
        };
        let body = rest
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(" ");
        Self { name, body }
    }
}

/// Parsed `idp set` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdpSetRequest {
    pub target: String,
    pub config: IdpConfigUpdate,
}

/// Parse `TARGET ID_TYPE [CFG_NAME] [CFG_PARAMS...]`.
pub fn parse_idp_set_args(args: &[String], update: bool) -> CommandResult<IdpSetRequest> {
    if args.len() < 3 {
        return Err(CommandError::usage(
            format!("expected at least 3 arguments, got {}", args.len()),
            IDP_SET_USAGE,
        ));
    }

    let idp_type = parse_idp_type(&args[1])?;
    let ConfigString { name, body } = ConfigString::parse(&args[2..]);

    Ok(IdpSetRequest {
        target: args[0].clone(),
        config: IdpConfigUpdate {
            idp_type,
            name,
            body,
            update,
        },
    })
}

pub fn parse_idp_type(token: &str) -> CommandResult<IdpType> {
    token.parse::<IdpType>().map_err(|e| {
        CommandError::Validation(format!(
            "{}: IDP type must be one of {}",
            e,
            IdpType::valid_types()
        ))
    })
}

/// Parse the single `TARGET` argument of a listing command.
pub fn parse_list_target(args: &[String]) -> CommandResult<&str> {
    match args {
        [target] => Ok(target.as_str()),
        _ => Err(CommandError::usage(
            format!("expected exactly 1 argument, got {}", args.len()),
            IDP_LIST_USAGE,
        )),
    }
}

/// Parsed `policy attach|detach` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationRequest {
    pub target: String,
    pub req: PolicyAssociationReq,
}

/// Build a policy association from `TARGET POLICY [POLICY...]` and the
/// `--user` / `--group` flags.
///
/// Policies keep their order and duplicates. The principal flags are copied
/// as given; choosing exactly one is checked by the client before sending.
pub fn build_policy_association(
    args: &[String],
    user: Option<&str>,
    group: Option<&str>,
    usage: &'static str,
) -> CommandResult<AssociationRequest> {
    let Some((target, policies)) = args.split_first().filter(|(_, rest)| !rest.is_empty()) else {
        return Err(CommandError::usage(
            format!("expected TARGET and at least one POLICY, got {} argument(s)", args.len()),
            usage,
        ));
    };

    Ok(AssociationRequest {
        target: target.clone(),
        req: PolicyAssociationReq {
            policies: policies.to_vec(),
            user: user.unwrap_or_default().to_string(),
            group: group.unwrap_or_default().to_string(),
        },
    })
}
