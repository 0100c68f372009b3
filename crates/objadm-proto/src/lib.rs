//! Admin API request and response types.
//!
//! Shared between the admin client (which puts them on the wire) and the CLI
//! (which builds requests from arguments and renders responses).
//!
//! - [`idp`] -- identity provider configuration types.
//! - [`policy`] -- policy-to-principal association types.

pub mod idp;
pub mod policy;

pub use idp::{
    IdpConfigUpdate, IdpListItem, IdpType, InvalidIdpType, DEFAULT_CONFIG_NAME,
    VALID_IDP_CONFIG_TYPES,
};
pub use policy::{InvalidAssociation, PolicyAssociationReq, PolicyOp, PrincipalKind};
