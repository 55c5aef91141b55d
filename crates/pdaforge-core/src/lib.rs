//! pdaforge-core
//!
//! Core primitives for pdaforge:
//! - 32-byte public keys with base58 text form
//! - SHA-256 hashing with the program address domain separator
//! - ed25519 point-validity check over GF(2^255 - 19)
//! - canonical program-derived address search and associated account helper
//! - the idempotent account provisioning protocol and its collaborator traits
//!
//! Derivation is pure and thread-safe. Provisioning performs I/O only through
//! the [`ChainStateReader`] and [`TransactionSubmitter`] supplied by the caller.

pub mod config;
pub mod curve;
pub mod derive;
pub mod errors;
pub mod hash;
pub mod ids;
pub mod model;
pub mod provision;
pub mod pubkey;

pub use crate::derive::{
    create_program_address, derive, derive_associated_account, DerivedAddress, MAX_SEEDS,
    MAX_SEED_LEN,
};
pub use crate::errors::{PdaError, PdaResult};
pub use crate::model::{ProvisionResult, SigningMaterial, WalletRecord, WalletRecordStore};
pub use crate::provision::{
    AccountProvisioner, AccountRole, ChainStateReader, CreationInstruction, TransactionSubmitter,
};
pub use crate::pubkey::PublicKey;

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::{
        Cluster, ClusterConfig, Commitment, CreateMode, ProgramIds, ProvisionConfig, RetryPolicy,
    };
    pub use crate::curve::is_on_curve;
    pub use crate::derive::{create_program_address, derive, derive_associated_account, DerivedAddress};
    pub use crate::ids::{
        ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID,
    };
    pub use crate::model::{ProvisionResult, SigningMaterial, WalletRecord, WalletRecordStore};
    pub use crate::provision::{
        AccountProvisioner, ChainStateReader, CreationInstruction, TransactionSubmitter,
    };
    pub use crate::pubkey::PublicKey;
    pub use crate::{PdaError, PdaResult};
}
