use std::path::Path;

use anyhow::Result;
use pdaforge_core::config::ProgramIds;
use pdaforge_core::WalletRecordStore;
use pdaforge_solana_client::{generate_platform_wallet, lamports_to_sol_string, TOKEN_ACCOUNT_RENT_LAMPORTS};
use pdaforge_store::{JsonWalletStore, StoreConfig};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

use crate::args::Cli;
use crate::config;
use crate::output;

pub const ENV_HINT_KEY: &str = "VITE_PLATFORM_TOKEN_ACCOUNT";

#[derive(Debug, Serialize)]
pub struct CreateWalletOut {
    pub public_key: String,
    pub token_account: String,
    pub mint: String,
    pub path: String,
    pub env_hint: String,
}

pub async fn run(cli: &Cli, mint: Option<&str>, out: &str, force: bool) -> Result<()> {
    let mint = config::mint(cli, mint)?;
    let store = JsonWalletStore::open(StoreConfig::at_path(Path::new(out))?.with_overwrite(force))?;

    let created_at = OffsetDateTime::now_utc().unix_timestamp();
    let (_keypair, record) = generate_platform_wallet(&mint, &ProgramIds::default(), created_at)?;
    store.save(&record)?;
    info!(owner = %record.owner, path = %store.path().display(), "platform wallet saved");

    let env_hint = format!("{ENV_HINT_KEY}={}", record.holding_account);
    output::print(&CreateWalletOut {
        public_key: record.owner.to_string(),
        token_account: record.holding_account.to_string(),
        mint: mint.to_string(),
        path: store.path().display().to_string(),
        env_hint: env_hint.clone(),
    })?;

    output::note("add to .env:", &env_hint);
    output::note(
        "fund:",
        &format!(
            "transfer SOL to {} before running `pdaforge ensure` (token account rent is {} SOL)",
            record.owner,
            lamports_to_sol_string(TOKEN_ACCOUNT_RENT_LAMPORTS)
        ),
    );
    output::note("keep secret:", &format!("{} holds the wallet's private key", store.path().display()));
    Ok(())
}
