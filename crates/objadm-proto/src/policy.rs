//! Policy association types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of a policy association change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyOp {
    Attach,
    Detach,
}

impl PolicyOp {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Attach => "attach",
            Self::Detach => "detach",
        }
    }

    /// Past participle used in confirmations ("attached", "detached").
    pub const fn past_tense(&self) -> &'static str {
        match self {
            Self::Attach => "attached",
            Self::Detach => "detached",
        }
    }
}

impl fmt::Display for PolicyOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of principal a policy is associated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalKind {
    User,
    Group,
}

impl PrincipalKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
        }
    }
}

/// Why a [`PolicyAssociationReq`] cannot be sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAssociation {
    #[error("no policy names were given")]
    NoPolicies,

    #[error("no user or group association was given")]
    NoPrincipal,

    #[error("either a group or a user can be given, but not both")]
    BothPrincipals,
}

/// Request to attach policies to, or detach them from, a user or group.
///
/// `policies` keeps command-line order and may contain duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyAssociationReq {
    pub policies: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,
}

impl PolicyAssociationReq {
    /// Check the request before it is sent: at least one non-empty policy
    /// name and exactly one of `user` / `group`.
    pub fn validate(&self) -> Result<(), InvalidAssociation> {
        if self.policies.iter().all(|p| p.is_empty()) {
            return Err(InvalidAssociation::NoPolicies);
        }
        match (self.user.is_empty(), self.group.is_empty()) {
            (true, true) => Err(InvalidAssociation::NoPrincipal),
            (false, false) => Err(InvalidAssociation::BothPrincipals),
            _ => Ok(()),
        }
    }

    /// The principal kind; anything without a user is treated as a group.
    pub fn principal_kind(&self) -> PrincipalKind {
        if self.user.is_empty() {
            PrincipalKind::Group
        } else {
            PrincipalKind::User
        }
    }

    /// Name of the principal selected by [`Self::principal_kind`].
    pub fn principal(&self) -> &str {
        match self.principal_kind() {
            PrincipalKind::User => &self.user,
            PrincipalKind::Group => &self.group,
        }
    }
}
