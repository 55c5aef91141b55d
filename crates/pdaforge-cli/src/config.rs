//! Resolves global flags into core configuration.

use anyhow::{Context, Result};
use pdaforge_core::config::{validate_cluster_config, Cluster, ClusterConfig, Commitment};
use pdaforge_core::PublicKey;
use url::Url;

use crate::args::Cli;

pub fn cluster(cli: &Cli) -> Result<Cluster> {
    Ok(Cluster::parse(&cli.cluster)?)
}

pub fn cluster_config(cli: &Cli) -> Result<ClusterConfig> {
    let commitment = Commitment::parse(&cli.commitment)?;
    let rpc_url = match cli.url.as_deref() {
        Some(raw) => {
            // syntax only; the scheme is checked by validate_cluster_config
            Url::parse(raw).with_context(|| format!("invalid --url {raw:?}"))?;
            raw.to_string()
        }
        None => cluster(cli)?.rpc_url().to_string(),
    };
    let cfg = ClusterConfig { rpc_url, commitment };
    validate_cluster_config(&cfg)?;
    Ok(cfg)
}

/// `--mint` if given, else USDC for the selected cluster.
pub fn mint(cli: &Cli, explicit: Option<&str>) -> Result<PublicKey> {
    match explicit {
        Some(s) => parse_key("mint", s),
        None => Ok(pdaforge_solana_client::usdc_mint(cluster(cli)?)?),
    }
}

pub fn parse_key(what: &str, s: &str) -> Result<PublicKey> {
    s.parse::<PublicKey>().with_context(|| format!("invalid {what} {s:?}"))
}
