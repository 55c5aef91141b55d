//! Error taxonomy for pdaforge.
//!
//! Every fallible operation in the core returns [`PdaResult`]. Variants map
//! one-to-one onto the failure classes callers are expected to handle:
//!
//! - `InvalidSeeds`: caller error, never retried
//! - `ExhaustedBumpSeeds`: unrecoverable derivation failure
//! - `ChainUnavailable`: transient collaborator failure, retry the whole call
//! - `CreationRejected`: the chain saw the creation and refused it
//!
//! The remaining variants cover configuration, persistence, and funding
//! pre-checks.

use thiserror::Error;

use crate::pubkey::PublicKey;

pub type PdaResult<T> = Result<T, PdaError>;

#[derive(Debug, Error)]
pub enum PdaError {
    #[error("invalid seeds: {0}")]
    InvalidSeeds(String),

    #[error("unable to find a viable program address bump seed")]
    ExhaustedBumpSeeds,

    #[error("chain unavailable: {0}")]
    ChainUnavailable(String),

    #[error("account creation rejected: {0}")]
    CreationRejected(String),

    #[error("payer {payer} holds {balance} lamports, at least {required} required")]
    InsufficientFunds {
        payer: PublicKey,
        balance: u64,
        required: u64,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl PdaError {
    pub fn invalid_seeds(msg: impl Into<String>) -> Self {
        Self::InvalidSeeds(msg.into())
    }

    pub fn chain_unavailable(msg: impl Into<String>) -> Self {
        Self::ChainUnavailable(msg.into())
    }

    pub fn creation_rejected(msg: impl Into<String>) -> Self {
        Self::CreationRejected(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// True when re-running the whole provisioning call is safe and may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ChainUnavailable(_) | Self::CreationRejected(_))
    }

    /// Stable, machine-readable code for CLI/JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSeeds(_) => "invalid_seeds",
            Self::ExhaustedBumpSeeds => "exhausted_bump_seeds",
            Self::ChainUnavailable(_) => "chain_unavailable",
            Self::CreationRejected(_) => "creation_rejected",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Serialization(_) => "serialization",
            Self::Storage(_) => "storage",
        }
    }
}
