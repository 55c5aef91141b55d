//! Blocking RPC collaborators for the provisioning protocol.
//!
//! `RpcChain` reads account state and submits creation transactions through
//! a single `RpcClient`. It holds the keypairs it may sign with; asking it to
//! submit with a signer it does not hold is an argument error, not a chain
//! error.

use pdaforge_core::config::{ClusterConfig, Commitment};
use pdaforge_core::{
    ChainStateReader, CreationInstruction, PdaError, PdaResult, PublicKey, TransactionSubmitter,
};
use solana_client::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::Transaction;
use tracing::debug;

use crate::instruction::to_solana_instruction;
use crate::pda::to_pubkey;

pub struct RpcChain {
    rpc: RpcClient,
    commitment: CommitmentConfig,
    signers: Vec<Keypair>,
}

fn commitment_config(c: Commitment) -> CommitmentConfig {
    match c {
        Commitment::Processed => CommitmentConfig::processed(),
        Commitment::Confirmed => CommitmentConfig::confirmed(),
        Commitment::Finalized => CommitmentConfig::finalized(),
    }
}

impl RpcChain {
    pub fn new(cfg: &ClusterConfig, signers: Vec<Keypair>) -> Self {
        let commitment = commitment_config(cfg.commitment);
        Self {
            rpc: RpcClient::new_with_commitment(cfg.rpc_url.clone(), commitment),
            commitment,
            signers,
        }
    }

    /// Node software version; doubles as a reachability probe.
    pub fn node_version(&self) -> PdaResult<String> {
        let v = self
            .rpc
            .get_version()
            .map_err(|e| PdaError::chain_unavailable(format!("get_version: {e}")))?;
        Ok(v.solana_core)
    }

    fn keypair_for(&self, key: &PublicKey) -> PdaResult<&Keypair> {
        let wanted = to_pubkey(key);
        self.signers
            .iter()
            .find(|k| k.pubkey() == wanted)
            .ok_or_else(|| PdaError::invalid_argument(format!("no keypair held for signer {key}")))
    }
}

impl ChainStateReader for RpcChain {
    fn account_exists(&self, address: &PublicKey) -> PdaResult<bool> {
        let resp = self
            .rpc
            .get_account_with_commitment(&to_pubkey(address), self.commitment)
            .map_err(|e| PdaError::chain_unavailable(format!("get_account {address}: {e}")))?;
        Ok(resp.value.is_some())
    }

    fn balance(&self, address: &PublicKey) -> PdaResult<u64> {
        let resp = self
            .rpc
            .get_balance_with_commitment(&to_pubkey(address), self.commitment)
            .map_err(|e| PdaError::chain_unavailable(format!("get_balance {address}: {e}")))?;
        Ok(resp.value)
    }
}

impl TransactionSubmitter for RpcChain {
    fn submit(&self, instruction: &CreationInstruction, signers: &[PublicKey]) -> PdaResult<String> {
        let keypairs = signers
            .iter()
            .map(|k| self.keypair_for(k))
            .collect::<PdaResult<Vec<&Keypair>>>()?;
        let payer = to_pubkey(&instruction.payer);

        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .map_err(|e| PdaError::chain_unavailable(format!("get_latest_blockhash: {e}")))?;
        let tx = Transaction::new_signed_with_payer(
            &[to_solana_instruction(instruction)],
            Some(&payer),
            keypairs.as_slice(),
            blockhash,
        );

        debug!(target = %instruction.target, "sending creation transaction");
        match self.rpc.send_and_confirm_transaction(&tx) {
            Ok(sig) => Ok(sig.to_string()),
            Err(e) => match e.get_transaction_error() {
                Some(tx_err) => Err(PdaError::creation_rejected(format!(
                    "creating {}: {tx_err}",
                    instruction.target
                ))),
                None => Err(PdaError::chain_unavailable(format!(
                    "send_and_confirm_transaction: {e}"
                ))),
            },
        }
    }
}
