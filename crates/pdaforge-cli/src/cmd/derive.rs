use anyhow::{Context, Result};
use pdaforge_core::derive;
use serde::Serialize;

use crate::config::parse_key;
use crate::output;

#[derive(Debug, Serialize)]
pub struct DeriveOut {
    pub program: String,
    pub seeds_hex: Vec<String>,
    pub address: String,
    pub bump: u8,
}

pub async fn run(program: &str, seeds: &[String]) -> Result<()> {
    let program_id = parse_key("program id", program)?;
    let raw = seeds.iter().map(|s| parse_seed(s)).collect::<Result<Vec<_>>>()?;
    let slices: Vec<&[u8]> = raw.iter().map(|s| s.as_slice()).collect();

    let found = derive(&slices, &program_id)?;

    output::print(&DeriveOut {
        program: program_id.to_string(),
        seeds_hex: raw.iter().map(hex::encode).collect(),
        address: found.address.to_string(),
        bump: found.bump,
    })?;
    Ok(())
}

fn parse_seed(token: &str) -> Result<Vec<u8>> {
    match token.split_once(':') {
        Some(("str", text)) => Ok(text.as_bytes().to_vec()),
        Some(("hex", h)) => hex::decode(h).with_context(|| format!("bad hex seed {h:?}")),
        Some(("pubkey", k)) => Ok(parse_key("pubkey seed", k)?.to_bytes().to_vec()),
        _ => Ok(token.as_bytes().to_vec()),
    }
}
