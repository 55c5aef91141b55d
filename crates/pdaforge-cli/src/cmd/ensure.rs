use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use pdaforge_core::config::{CreateMode, ProvisionConfig, RetryPolicy};
use pdaforge_core::{AccountProvisioner, PublicKey, WalletRecordStore};
use pdaforge_solana_client::{from_pubkey, keypair_from_record, read_keypair_file, RpcChain};
use pdaforge_store::{JsonWalletStore, StoreConfig};
use serde::Serialize;
use solana_sdk::signature::{Keypair, Signer};

use crate::args::{Cli, EnsureArgs};
use crate::config::{self, parse_key};
use crate::output;

#[derive(Debug, Serialize)]
pub struct EnsureOut {
    pub owner: String,
    pub mint: String,
    pub payer: String,
    pub address: String,
    pub bump: u8,
    pub already_existed: bool,
    pub rpc_url: String,
}

/// Owner key plus, when available, the keypair that can sign for it.
struct Owner {
    key: PublicKey,
    keypair: Option<Keypair>,
    record_mint: Option<PublicKey>,
}

fn resolve_owner(args: &EnsureArgs) -> Result<Owner> {
    if let Some(path) = args.wallet.as_deref() {
        let store = JsonWalletStore::open(StoreConfig::at_path(Path::new(path))?)?;
        let record = store.load()?.ok_or_else(|| anyhow!("no wallet record at {path}"))?;
        let keypair = if record.has_signing_key() { Some(keypair_from_record(&record)?) } else { None };
        return Ok(Owner { key: record.owner, keypair, record_mint: Some(record.mint) });
    }
    if let Some(path) = args.keypair.as_deref() {
        let keypair = read_keypair_file(Path::new(path)).with_context(|| format!("owner keypair {path}"))?;
        return Ok(Owner { key: from_pubkey(&keypair.pubkey()), keypair: Some(keypair), record_mint: None });
    }
    if let Some(owner) = args.owner.as_deref() {
        return Ok(Owner { key: parse_key("owner", owner)?, keypair: None, record_mint: None });
    }
    Err(anyhow!("one of --wallet, --keypair or --owner is required"))
}

pub async fn run(cli: &Cli, args: &EnsureArgs) -> Result<()> {
    let cluster = config::cluster_config(cli)?;
    let owner = resolve_owner(args)?;
    let mint = match (args.mint.as_deref(), owner.record_mint) {
        (Some(m), _) => parse_key("mint", m)?,
        (None, Some(m)) => m,
        (None, None) => config::mint(cli, None)?,
    };

    let payer = match args.fee_payer.as_deref() {
        Some(path) => read_keypair_file(Path::new(path)).with_context(|| format!("fee payer keypair {path}"))?,
        None => owner
            .keypair
            .ok_or_else(|| anyhow!("owner key cannot sign; pass --fee-payer <keypair file>"))?,
    };
    let payer_key = from_pubkey(&payer.pubkey());

    let provision = ProvisionConfig {
        fee_payer: Some(payer_key),
        create_mode: if args.idempotent { CreateMode::Idempotent } else { CreateMode::Strict },
        min_payer_balance: args.min_balance,
        ..ProvisionConfig::default()
    };
    let policy = RetryPolicy { max_attempts: args.retries.max(1) };

    let pb = ProgressBar::new_spinner();
    if !output::is_json() {
        pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(80));
        pb.set_message(format!("ensuring token account via {}", cluster.rpc_url));
    }

    // RpcClient owns a runtime of its own, so it lives entirely on the blocking pool
    let owner_key = owner.key;
    let chain_cfg = cluster.clone();
    let result = tokio::task::spawn_blocking(move || {
        let chain = Arc::new(RpcChain::new(&chain_cfg, vec![payer]));
        AccountProvisioner::new(provision, chain.clone(), chain)?
            .ensure_with_retries(&owner_key, &mint, &policy)
    })
    .await?;
    pb.finish_and_clear();
    let result = result?;

    output::print(&EnsureOut {
        owner: owner.key.to_string(),
        mint: mint.to_string(),
        payer: payer_key.to_string(),
        address: result.address.address.to_string(),
        bump: result.address.bump,
        already_existed: result.already_existed,
        rpc_url: cluster.rpc_url,
    })?;
    Ok(())
}
