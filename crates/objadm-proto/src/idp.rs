//! Identity provider (IDP) configuration types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name the server uses for the unnamed (default) configuration of a type.
pub const DEFAULT_CONFIG_NAME: &str = "_";

/// Kind of identity provider a configuration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdpType {
    Ldap,
    Openid,
}

/// Every IDP configuration type the server accepts.
pub const VALID_IDP_CONFIG_TYPES: &[IdpType] = &[IdpType::Ldap, IdpType::Openid];

impl IdpType {
    /// Wire name of the type, as used in admin API paths.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ldap => "ldap",
            Self::Openid => "openid",
        }
    }

    /// Human-readable list of the valid types, e.g. `[ldap openid]`.
    pub fn valid_types() -> String {
        let names: Vec<&str> = VALID_IDP_CONFIG_TYPES.iter().map(IdpType::as_str).collect();
        format!("[{}]", names.join(" "))
    }
}

impl fmt::Display for IdpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of [`VALID_IDP_CONFIG_TYPES`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid IDP type '{0}'")]
pub struct InvalidIdpType(pub String);

impl FromStr for IdpType {
    type Err = InvalidIdpType;

    /// Exact, case-sensitive match against the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VALID_IDP_CONFIG_TYPES
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| InvalidIdpType(s.to_string()))
    }
}

/// A create-or-update request for one IDP configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdpConfigUpdate {
    pub idp_type: IdpType,
    /// Configuration name; empty selects the default configuration.
    pub name: String,
    /// Space-separated `key=value` pairs, handed to the server verbatim.
    pub body: String,
    /// `false` creates the configuration, `true` updates an existing one.
    pub update: bool,
}

impl IdpConfigUpdate {
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }

    /// Name as it appears in the request path.
    pub fn path_name(&self) -> &str {
        if self.is_default() {
            DEFAULT_CONFIG_NAME
        } else {
            &self.name
        }
    }
}

/// One entry of an IDP configuration listing.
///
/// Deserializes from the server's field names and serializes with the
/// capitalized names used for structured CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdpListItem {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,

    #[serde(rename = "RoleArn", alias = "roleARN", default)]
    pub role_arn: String,

    #[serde(rename = "Enabled", alias = "enabled", default)]
    pub enabled: bool,
}

impl IdpListItem {
    /// Whether this entry is the unnamed (default) configuration.
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_CONFIG_NAME
    }
}
