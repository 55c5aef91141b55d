//! Well-known mints and fees used when provisioning platform wallets.

use pdaforge_core::config::Cluster;
use pdaforge_core::{PdaResult, PublicKey};

/// USDC mint on devnet (Circle's test mint).
pub const USDC_DEVNET_MINT: &str = "4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU";

/// USDC mint on mainnet-beta.
pub const USDC_MAINNET_MINT: &str = "EPjFWdd5AufqSSqeM2qrxekfrRdKNkJmWbwYcGQ2aBWr";

/// Rent-exempt minimum for a 165-byte SPL token account.
pub const TOKEN_ACCOUNT_RENT_LAMPORTS: u64 = 2_039_280;

pub use solana_sdk::native_token::LAMPORTS_PER_SOL;

/// Default USDC mint for `cluster`. Everything but mainnet uses the devnet mint.
pub fn usdc_mint(cluster: Cluster) -> PdaResult<PublicKey> {
    match cluster {
        Cluster::MainnetBeta => USDC_MAINNET_MINT.parse(),
        Cluster::Devnet | Cluster::Testnet | Cluster::Localnet => USDC_DEVNET_MINT.parse(),
    }
}

/// Lamports rendered as SOL with nine decimals.
pub fn lamports_to_sol_string(lamports: u64) -> String {
    format!("{}.{:09}", lamports / LAMPORTS_PER_SOL, lamports % LAMPORTS_PER_SOL)
}
