use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "pdaforge", version, about = "Program-derived addresses and associated account provisioning")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Named cluster: devnet|testnet|mainnet-beta|localnet
    #[arg(long, global = true, env = "PDAFORGE_CLUSTER", default_value = "devnet")]
    pub cluster: String,

    /// RPC endpoint; overrides the cluster's public URL.
    #[arg(long, global = true, env = "PDAFORGE_RPC_URL")]
    pub url: Option<String>,

    /// Commitment for reads and confirmations: processed|confirmed|finalized
    #[arg(long, global = true, default_value = "confirmed")]
    pub commitment: String,

    /// tracing filter directive, e.g. `info` or `pdaforge_core=debug`.
    #[arg(long, global = true, env = "PDAFORGE_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Find the canonical program address for a seed list.
    Derive {
        /// Program id (base58).
        #[arg(long)]
        program: String,

        /// Seeds as `str:<text>`, `hex:<bytes>` or `pubkey:<base58>`.
        /// Untagged seeds are taken as text.
        seeds: Vec<String>,
    },

    /// Associated token account of an owner for a mint. Offline.
    Ata {
        /// Owner public key (base58).
        owner: String,

        /// Mint (default: USDC for the selected cluster).
        #[arg(long)]
        mint: Option<String>,

        /// Derive under Token-2022 instead of SPL Token.
        #[arg(long)]
        token_2022: bool,
    },

    /// Generate a platform wallet and save it with its token account address.
    CreateWallet {
        /// Mint (default: USDC for the selected cluster).
        #[arg(long)]
        mint: Option<String>,

        /// Record file to write.
        #[arg(long, default_value = pdaforge_store::DEFAULT_FILE_NAME)]
        out: String,

        /// Replace an existing record file.
        #[arg(long)]
        force: bool,
    },

    /// Make sure the associated token account exists, creating it if needed.
    Ensure(EnsureArgs),

    /// Run environment and configuration checks.
    Doctor {
        /// Wallet record to inspect.
        #[arg(long, default_value = pdaforge_store::DEFAULT_FILE_NAME)]
        wallet: String,

        /// Also probe the RPC endpoint.
        #[arg(long)]
        rpc: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct EnsureArgs {
    /// Wallet record written by `create-wallet`.
    #[arg(long, conflicts_with_all = ["keypair", "owner"])]
    pub wallet: Option<String>,

    /// Owner keypair file (Solana CLI JSON layout).
    #[arg(long, conflicts_with = "owner")]
    pub keypair: Option<String>,

    /// Owner public key; requires --fee-payer.
    #[arg(long)]
    pub owner: Option<String>,

    /// Mint (default: the record's mint, else USDC for the cluster).
    #[arg(long)]
    pub mint: Option<String>,

    /// Keypair file paying for the creation (default: the owner).
    #[arg(long)]
    pub fee_payer: Option<String>,

    /// Submit the idempotent creation variant.
    #[arg(long)]
    pub idempotent: bool,

    /// Total attempts on transient failures.
    #[arg(long, default_value_t = 1)]
    pub retries: u32,

    /// Lamports the payer must hold before submitting; 0 disables the check.
    #[arg(long, default_value_t = pdaforge_solana_client::TOKEN_ACCOUNT_RENT_LAMPORTS)]
    pub min_balance: u64,
}
