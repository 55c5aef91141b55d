//! Conversions between pdaforge keys and Solana keys, plus the associated
//! token address helper in Solana types.

use pdaforge_core::ids::{ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_PROGRAM_ID};
use pdaforge_core::{derive_associated_account, PdaResult, PublicKey};
use solana_program::pubkey::Pubkey;

pub fn to_pubkey(key: &PublicKey) -> Pubkey {
    Pubkey::new_from_array(key.to_bytes())
}

pub fn from_pubkey(key: &Pubkey) -> PublicKey {
    PublicKey::new_from_array(key.to_bytes())
}

/// Associated SPL Token account of `owner` for `mint`.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> PdaResult<(Pubkey, u8)> {
    let (address, bump) = derive_associated_account(
        &from_pubkey(owner),
        &from_pubkey(mint),
        &TOKEN_PROGRAM_ID,
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )?
    .into_parts();
    Ok((to_pubkey(&address), bump))
}
