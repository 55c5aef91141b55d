//! Idempotent "ensure this associated account exists" protocol.
//!
//! 1. derive the target address (pure)
//! 2. ask the chain whether it exists
//! 3. if it does, return immediately; nothing is submitted
//! 4. otherwise submit one creation instruction and wait for the outcome
//!
//! No lock is taken between steps 2 and 4. Two callers racing on the same
//! (owner, asset) pair build identical instructions, at most one creation
//! lands, and the loser converges by re-running the protocol, which then
//! observes the account at step 2. `ensure` never retries on its own.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{validate_config, CreateMode, ProvisionConfig, RetryPolicy};
use crate::derive::{derive_associated_account, DerivedAddress};
use crate::errors::{PdaError, PdaResult};
use crate::model::ProvisionResult;
use crate::pubkey::PublicKey;

/// Read side of the chain.
pub trait ChainStateReader: Send + Sync {
    fn account_exists(&self, address: &PublicKey) -> PdaResult<bool>;

    /// Lamport balance of `address`; zero when the account does not exist.
    fn balance(&self, address: &PublicKey) -> PdaResult<u64>;
}

/// Write side of the chain.
///
/// `submit` returns once the transaction meets the implementation's
/// confirmation criteria, yielding its signature. A transaction that reached
/// the chain and failed is `CreationRejected`; transport failures are
/// `ChainUnavailable`.
pub trait TransactionSubmitter: Send + Sync {
    fn submit(&self, instruction: &CreationInstruction, signers: &[PublicKey]) -> PdaResult<String>;
}

/// One account reference inside an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRole {
    pub pubkey: PublicKey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountRole {
    fn writable(pubkey: PublicKey, is_signer: bool) -> Self {
        Self { pubkey, is_signer, is_writable: true }
    }

    fn readonly(pubkey: PublicKey) -> Self {
        Self { pubkey, is_signer: false, is_writable: false }
    }
}

/// Chain-agnostic "create associated account" instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationInstruction {
    pub program_id: PublicKey,
    pub payer: PublicKey,
    pub target: PublicKey,
    pub owner: PublicKey,
    pub asset_id: PublicKey,
    pub system_program_id: PublicKey,
    pub holding_program_id: PublicKey,
    pub mode: CreateMode,
}

impl CreationInstruction {
    /// Accounts in the order the associated account program expects:
    /// payer, target, owner, mint, system program, holding program.
    pub fn accounts(&self) -> Vec<AccountRole> {
        vec![
            AccountRole::writable(self.payer, true),
            AccountRole::writable(self.target, false),
            AccountRole::readonly(self.owner),
            AccountRole::readonly(self.asset_id),
            AccountRole::readonly(self.system_program_id),
            AccountRole::readonly(self.holding_program_id),
        ]
    }

    pub fn data(&self) -> Vec<u8> {
        vec![self.mode.tag()]
    }
}

pub struct AccountProvisioner {
    config: ProvisionConfig,
    reader: Arc<dyn ChainStateReader>,
    submitter: Arc<dyn TransactionSubmitter>,
}

impl AccountProvisioner {
    pub fn new(
        config: ProvisionConfig,
        reader: Arc<dyn ChainStateReader>,
        submitter: Arc<dyn TransactionSubmitter>,
    ) -> PdaResult<Self> {
        validate_config(&config)?;
        Ok(Self { config, reader, submitter })
    }

    /// Where the holding account for (owner, asset) lives. No I/O.
    pub fn target_for(&self, owner: &PublicKey, asset_id: &PublicKey) -> PdaResult<DerivedAddress> {
        let p = &self.config.programs;
        derive_associated_account(owner, asset_id, &p.holding_program_id, &p.associated_program_id)
    }

    /// The instruction `ensure` would submit for (owner, asset).
    pub fn creation_instruction(
        &self,
        owner: &PublicKey,
        asset_id: &PublicKey,
        target: &PublicKey,
    ) -> CreationInstruction {
        let p = &self.config.programs;
        CreationInstruction {
            program_id: p.associated_program_id,
            payer: self.config.fee_payer.unwrap_or(*owner),
            target: *target,
            owner: *owner,
            asset_id: *asset_id,
            system_program_id: p.system_program_id,
            holding_program_id: p.holding_program_id,
            mode: self.config.create_mode,
        }
    }

    /// Make sure the holding account for (owner, asset) exists.
    pub fn ensure(&self, owner: &PublicKey, asset_id: &PublicKey) -> PdaResult<ProvisionResult> {
        let target = self.target_for(owner, asset_id)?;
        let span = tracing::info_span!(
            "ensure",
            owner = %owner,
            asset = %asset_id,
            target = %target.address,
        );
        let _enter = span.enter();

        if self.reader.account_exists(&target.address)? {
            debug!("holding account already exists");
            return Ok(ProvisionResult { address: target, already_existed: true });
        }

        let ix = self.creation_instruction(owner, asset_id, &target.address);
        self.check_payer_funds(&ix.payer)?;

        debug!(payer = %ix.payer, mode = ix.mode.as_str(), "submitting creation");
        let signature = self.submitter.submit(&ix, &[ix.payer])?;

        if self.config.verify_after_create {
            // a confirmed creation stands even when the re-read fails
            match self.reader.account_exists(&target.address) {
                Ok(true) => {}
                Ok(false) => {
                    return Err(PdaError::creation_rejected(format!(
                        "transaction {signature} confirmed but {} is still absent",
                        target.address
                    )));
                }
                Err(e) => {
                    warn!(%signature, error = %e, "creation confirmed but re-read failed; treating as created");
                }
            }
        }

        info!(%signature, bump = target.bump, "holding account created");
        Ok(ProvisionResult { address: target, already_existed: false })
    }

    /// Caller-side convergence loop: re-run the whole protocol on retryable
    /// errors, at most `policy.max_attempts` times in total.
    pub fn ensure_with_retries(
        &self,
        owner: &PublicKey,
        asset_id: &PublicKey,
        policy: &RetryPolicy,
    ) -> PdaResult<ProvisionResult> {
        let attempts = policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.ensure(owner, asset_id) {
                Err(e) if e.is_retryable() && attempt < attempts => {
                    warn!(attempt, error = %e, "ensure failed, re-resolving");
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    fn check_payer_funds(&self, payer: &PublicKey) -> PdaResult<()> {
        let required = self.config.min_payer_balance;
        if required == 0 {
            return Ok(());
        }
        let balance = self.reader.balance(payer)?;
        if balance < required {
            return Err(PdaError::InsufficientFunds { payer: *payer, balance, required });
        }
        Ok(())
    }
}
