use anyhow::Result;

use crate::args::{Cli, Command};

mod ata;
mod create_wallet;
mod derive;
mod doctor;
mod ensure;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Derive { program, seeds } => derive::run(program, seeds).await,
        Command::Ata { owner, mint, token_2022 } => ata::run(&cli, owner, mint.as_deref(), *token_2022).await,
        Command::CreateWallet { mint, out, force } => {
            create_wallet::run(&cli, mint.as_deref(), out, *force).await
        }
        Command::Ensure(args) => ensure::run(&cli, args).await,
        Command::Doctor { wallet, rpc } => doctor::run(&cli, wallet, *rpc).await,
    }
}
