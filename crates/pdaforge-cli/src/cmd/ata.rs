use anyhow::Result;
use pdaforge_core::derive_associated_account;
use pdaforge_core::ids::{ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID};
use serde::Serialize;

use crate::args::Cli;
use crate::config::{self, parse_key};
use crate::output;

#[derive(Debug, Serialize)]
pub struct AtaOut {
    pub owner: String,
    pub mint: String,
    pub token_program: String,
    pub address: String,
    pub bump: u8,
}

pub async fn run(cli: &Cli, owner: &str, mint: Option<&str>, token_2022: bool) -> Result<()> {
    let owner = parse_key("owner", owner)?;
    let mint = config::mint(cli, mint)?;
    let token_program = if token_2022 { TOKEN_2022_PROGRAM_ID } else { TOKEN_PROGRAM_ID };

    let found = derive_associated_account(&owner, &mint, &token_program, &ASSOCIATED_TOKEN_PROGRAM_ID)?;

    output::print(&AtaOut {
        owner: owner.to_string(),
        mint: mint.to_string(),
        token_program: token_program.to_string(),
        address: found.address.to_string(),
        bump: found.bump,
    })?;
    Ok(())
}
