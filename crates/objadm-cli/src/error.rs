//! Command error types and exit codes.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage or validation error (nothing was sent to the cluster)
//! - 3: Admin connection could not be established
//! - 5: The cluster rejected or failed the request
//! - 130: Interrupted by the operator

use objadm_client::ClientError;

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Wrong argument count or shape; carries the command's usage line.
    #[error("{message}")]
    Usage {
        message: String,
        usage: &'static str,
    },

    /// A recognized argument with a value outside its domain.
    #[error("{0}")]
    Validation(String),

    /// Alias resolution or client construction failed.
    #[error("Unable to initialize admin connection: {0}")]
    Transport(#[source] ClientError),

    /// The admin request failed.
    #[error("{action}: {source}")]
    Rpc {
        action: String,
        #[source]
        source: ClientError,
    },

    /// Writing command output failed.
    #[error("Unable to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Interrupted")]
    Interrupted,
}

impl CommandError {
    pub(crate) fn usage(message: impl Into<String>, usage: &'static str) -> Self {
        Self::Usage {
            message: message.into(),
            usage,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { .. } | Self::Validation(_) | Self::Output(_) => 1,
            Self::Transport(_) => 3,
            Self::Rpc { .. } => 5,
            Self::Interrupted => 130,
        }
    }

    /// Short statement of what failed, without the underlying cause.
    pub fn headline(&self) -> String {
        match self {
            Self::Transport(_) => "Unable to initialize admin connection".to_string(),
            Self::Rpc { action, .. } => action.clone(),
            Self::Output(_) => "Unable to write output".to_string(),
            other => other.to_string(),
        }
    }

    /// Underlying cause, when the failure came from the client.
    pub fn cause(&self) -> Option<String> {
        match self {
            Self::Transport(source) | Self::Rpc { source, .. } => Some(source.to_string()),
            Self::Output(e) => Some(e.to_string()),
            _ => None,
        }
    }
}
