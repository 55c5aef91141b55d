//! Configuration structures for pdaforge-core.
//!
//! Plain, explicit configuration objects handed in by the caller (CLI,
//! services). The core crate never reads environment variables or files.

use crate::errors::{PdaError, PdaResult};
use crate::ids::{ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::pubkey::PublicKey;

/// Program identifiers that parameterize associated account derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramIds {
    /// Program that owns holding accounts (SPL Token by default).
    pub holding_program_id: PublicKey,
    /// Program that derives and creates associated accounts.
    pub associated_program_id: PublicKey,
    pub system_program_id: PublicKey,
}

impl Default for ProgramIds {
    fn default() -> Self {
        Self {
            holding_program_id: TOKEN_PROGRAM_ID,
            associated_program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
            system_program_id: SYSTEM_PROGRAM_ID,
        }
    }
}

/// Which creation instruction variant to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateMode {
    /// Fails on-chain if the account already exists.
    Strict,
    /// Succeeds on-chain if the account already exists with the right owner.
    Idempotent,
}

impl CreateMode {
    /// Instruction discriminator understood by the associated account program.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Strict => 0,
            Self::Idempotent => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Idempotent => "idempotent",
        }
    }
}

/// Provisioning behaviour.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    pub programs: ProgramIds,
    /// Funds the creation. Falls back to the owner when unset.
    pub fee_payer: Option<PublicKey>,
    pub create_mode: CreateMode,
    /// Re-read existence after a confirmed submission.
    pub verify_after_create: bool,
    /// Lamport floor for the payer before submitting. Zero disables the check.
    pub min_payer_balance: u64,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            programs: ProgramIds::default(),
            fee_payer: None,
            create_mode: CreateMode::Strict,
            verify_after_create: true,
            min_payer_balance: 0,
        }
    }
}

/// Commitment level used for reads and confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn parse(s: &str) -> PdaResult<Self> {
        match s {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            _ => Err(PdaError::invalid_argument(format!(
                "unsupported commitment: {s}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }
}

/// Named public clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cluster {
    Devnet,
    Testnet,
    MainnetBeta,
    Localnet,
}

impl Cluster {
    pub fn parse(s: &str) -> PdaResult<Self> {
        match s {
            "devnet" => Ok(Self::Devnet),
            "testnet" => Ok(Self::Testnet),
            "mainnet-beta" | "mainnet" => Ok(Self::MainnetBeta),
            "localnet" | "localhost" => Ok(Self::Localnet),
            _ => Err(PdaError::invalid_argument(format!("unknown cluster: {s}"))),
        }
    }

    pub fn rpc_url(&self) -> &'static str {
        match self {
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
            Self::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Self::Localnet => "http://127.0.0.1:8899",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
            Self::MainnetBeta => "mainnet-beta",
            Self::Localnet => "localnet",
        }
    }
}

/// Where and how to talk to the chain.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    pub rpc_url: String,
    pub commitment: Commitment,
}

impl ClusterConfig {
    pub fn for_cluster(cluster: Cluster) -> Self {
        Self {
            rpc_url: cluster.rpc_url().to_string(),
            commitment: Commitment::Confirmed,
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self::for_cluster(Cluster::Devnet)
    }
}

/// Caller-side retry budget for `AccountProvisioner::ensure_with_retries`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// Validate a provisioning configuration.
pub fn validate_config(cfg: &ProvisionConfig) -> PdaResult<()> {
    let p = &cfg.programs;
    if p.holding_program_id == p.associated_program_id {
        return Err(PdaError::invalid_argument(
            "holding and associated program ids must differ",
        ));
    }
    if p.associated_program_id == p.system_program_id || p.holding_program_id == p.system_program_id {
        return Err(PdaError::invalid_argument(
            "system program id must not double as a token program id",
        ));
    }
    Ok(())
}

/// Validate a cluster configuration.
///
/// This is the one place the rpc url scheme is checked, so library callers
/// that build a `ClusterConfig` by hand get the same rejection as the CLI.
pub fn validate_cluster_config(cfg: &ClusterConfig) -> PdaResult<()> {
    let url = cfg.rpc_url.trim();
    if url.is_empty() {
        return Err(PdaError::invalid_argument("rpc url must not be empty"));
    }
    let scheme = url.split_once("://").map(|(s, _)| s.to_ascii_lowercase());
    if !matches!(scheme.as_deref(), Some("http" | "https")) {
        return Err(PdaError::invalid_argument(format!(
            "rpc url must be http(s): {url}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        validate_config(&ProvisionConfig::default()).unwrap();
        validate_cluster_config(&ClusterConfig::default()).unwrap();
    }

    #[test]
    fn identical_program_ids_rejected() {
        let mut cfg = ProvisionConfig::default();
        cfg.programs.associated_program_id = cfg.programs.holding_program_id;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn non_http_url_rejected() {
        let cfg = ClusterConfig {
            rpc_url: "ws://api.devnet.solana.com".to_string(),
            commitment: Commitment::Confirmed,
        };
        assert!(validate_cluster_config(&cfg).is_err());
    }

    #[test]
    fn url_scheme_is_case_insensitive() {
        let mut cfg = ClusterConfig {
            rpc_url: "HTTPS://api.devnet.solana.com".to_string(),
            commitment: Commitment::Confirmed,
        };
        validate_cluster_config(&cfg).unwrap();
        cfg.rpc_url = "ftp://example.com".to_string();
        assert!(validate_cluster_config(&cfg).is_err());
        cfg.rpc_url = "api.devnet.solana.com".to_string();
        assert!(validate_cluster_config(&cfg).is_err());
    }

    #[test]
    fn cluster_names_resolve() {
        assert_eq!(Cluster::parse("devnet").unwrap().rpc_url(), "https://api.devnet.solana.com");
        assert_eq!(Cluster::parse("mainnet").unwrap(), Cluster::MainnetBeta);
        assert!(Cluster::parse("moonnet").is_err());
    }

    #[test]
    fn create_mode_tags() {
        assert_eq!(CreateMode::Strict.tag(), 0);
        assert_eq!(CreateMode::Idempotent.tag(), 1);
    }

    #[test]
    fn commitment_roundtrip() {
        for c in [Commitment::Processed, Commitment::Confirmed, Commitment::Finalized] {
            assert_eq!(Commitment::parse(c.as_str()).unwrap(), c);
        }
    }
}
