//! Platform wallet keys.
//!
//! A platform wallet is a freshly generated ed25519 keypair plus its
//! associated holding account for one mint. Keys are exchanged in the
//! Solana CLI layout: a JSON array of 64 bytes, secret half first.

use std::path::Path;

use pdaforge_core::config::ProgramIds;
use pdaforge_core::{
    derive_associated_account, PdaError, PdaResult, PublicKey, SigningMaterial, WalletRecord,
};
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::signer::keypair::{keypair_from_seed, read_keypair_file as read_cli_keypair};

use crate::pda::from_pubkey;

/// Generate a new owner keypair and the record describing its holding
/// account for `mint`. Nothing is written or submitted.
pub fn generate_platform_wallet(
    mint: &PublicKey,
    programs: &ProgramIds,
    created_at: i64,
) -> PdaResult<(Keypair, WalletRecord)> {
    let keypair = Keypair::new();
    let owner = from_pubkey(&keypair.pubkey());
    let holding = derive_associated_account(
        &owner,
        mint,
        &programs.holding_program_id,
        &programs.associated_program_id,
    )?;
    let material = SigningMaterial::new(keypair.to_bytes().to_vec())?;
    let record = WalletRecord::for_generated_owner(material, *mint, holding.address, created_at)?;
    Ok((keypair, record))
}

/// Rebuild a keypair from 64 secret||public bytes, checking that the public
/// half belongs to the secret half.
pub fn keypair_from_bytes(bytes: &[u8]) -> PdaResult<Keypair> {
    let material = SigningMaterial::new(bytes.to_vec())?;
    let keypair = keypair_from_seed(&material.as_bytes()[..32])
        .map_err(|e| PdaError::invalid_argument(format!("bad secret key: {e}")))?;
    if from_pubkey(&keypair.pubkey()) != material.public_key()? {
        return Err(PdaError::invalid_argument(
            "public half of keypair does not match its secret half",
        ));
    }
    Ok(keypair)
}

/// Keypair of a record that carries signing material.
pub fn keypair_from_record(record: &WalletRecord) -> PdaResult<Keypair> {
    let material = record.signing_key.as_ref().ok_or_else(|| {
        PdaError::invalid_argument(format!("record for {} holds no signing key", record.owner))
    })?;
    let keypair = keypair_from_bytes(material.as_bytes())?;
    if from_pubkey(&keypair.pubkey()) != record.owner {
        return Err(PdaError::invalid_argument(format!(
            "signing key does not belong to {}",
            record.owner
        )));
    }
    Ok(keypair)
}

/// Read a Solana CLI keypair file.
///
/// The SDK reader accepts any 64 bytes as a keypair, so the result is run
/// back through [`keypair_from_bytes`] to reject files whose public half was
/// edited or copied from another key.
pub fn read_keypair_file(path: &Path) -> PdaResult<Keypair> {
    let keypair = read_cli_keypair(path)
        .map_err(|e| PdaError::storage(format!("read keypair {}: {e}", path.display())))?;
    keypair_from_bytes(&keypair.to_bytes())
}
