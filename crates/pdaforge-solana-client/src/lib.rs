//! pdaforge-solana-client
//!
//! Solana-facing side of pdaforge. The core crate is chain-agnostic and
//! talks to the network only through its collaborator traits; this crate
//! supplies them:
//! - conversions between `PublicKey` and `solana_program::pubkey::Pubkey`
//! - lowering `CreationInstruction` into a Solana `Instruction`
//! - `RpcChain`, a blocking `RpcClient` wrapper implementing
//!   `ChainStateReader` and `TransactionSubmitter`
//! - keypair generation and loading for platform wallets
//!
//! Everything here is blocking. Async callers should wrap it in
//! `spawn_blocking`.

pub mod constants;
pub mod instruction;
pub mod pda;
pub mod rpc;
pub mod wallet;

pub use constants::*;
pub use instruction::to_solana_instruction;
pub use pda::*;
pub use rpc::RpcChain;
pub use wallet::*;
