use std::path::Path;

use anyhow::Result;
use pdaforge_core::config::ProgramIds;
use pdaforge_core::{derive_associated_account, WalletRecord};
use pdaforge_solana_client::RpcChain;
use pdaforge_store::read_record;
use serde::Serialize;

use crate::args::Cli;
use crate::config;
use crate::output;

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub checks: Vec<Check>,
}

pub async fn run(cli: &Cli, wallet: &str, probe_rpc: bool) -> Result<()> {
    let mut checks = Vec::new();

    // Solana tooling is optional; pdaforge talks to RPC directly.
    checks.push(Check {
        name: "solana".to_string(),
        ok: which_ok("solana"),
        detail: "optional (handy for funding and inspecting accounts)".to_string(),
    });

    let cluster = config::cluster_config(cli);
    checks.push(match &cluster {
        Ok(cfg) => Check {
            name: "cluster".to_string(),
            ok: true,
            detail: format!("{} ({})", cfg.rpc_url, cfg.commitment.as_str()),
        },
        Err(e) => Check { name: "cluster".to_string(), ok: false, detail: e.to_string() },
    });

    checks.push(wallet_check(wallet));

    if probe_rpc {
        let check = match cluster {
            Ok(cfg) => {
                let probe = tokio::task::spawn_blocking(move || RpcChain::new(&cfg, Vec::new()).node_version()).await?;
                match probe {
                    Ok(v) => Check { name: "rpc".to_string(), ok: true, detail: format!("solana-core {v}") },
                    Err(e) => Check { name: "rpc".to_string(), ok: false, detail: e.to_string() },
                }
            }
            Err(_) => Check { name: "rpc".to_string(), ok: false, detail: "no valid cluster config".to_string() },
        };
        checks.push(check);
    }

    let ok = checks.iter().all(|c| c.ok || c.name == "solana");
    output::print(&DoctorOut { ok, checks })?;
    Ok(())
}

fn wallet_check(path: &str) -> Check {
    let name = "wallet".to_string();
    match read_record(Path::new(path)) {
        Ok(None) => Check { name, ok: true, detail: format!("{path} not present") },
        Ok(Some(record)) => match holding_matches(&record) {
            Ok(true) => Check { name, ok: true, detail: format!("{path}: owner {}", record.owner) },
            Ok(false) => Check {
                name,
                ok: false,
                detail: format!("{path}: tokenAccount does not match owner and mint"),
            },
            Err(e) => Check { name, ok: false, detail: e.to_string() },
        },
        Err(e) => Check { name, ok: false, detail: e.to_string() },
    }
}

fn holding_matches(record: &WalletRecord) -> pdaforge_core::PdaResult<bool> {
    let p = ProgramIds::default();
    let derived = derive_associated_account(&record.owner, &record.mint, &p.holding_program_id, &p.associated_program_id)?;
    Ok(derived.address == record.holding_account)
}

fn which_ok(cmd: &str) -> bool {
    std::env::var_os("PATH").and_then(|paths| {
        for p in std::env::split_paths(&paths) {
            let full = p.join(cmd);
            if full.exists() {
                return Some(());
            }
            #[cfg(windows)]
            {
                let full_exe = p.join(format!("{cmd}.exe"));
                if full_exe.exists() {
                    return Some(());
                }
            }
        }
        None
    }).is_some()
}
