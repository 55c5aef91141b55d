//! Program-derived address search.
//!
//! A program-derived address is a SHA-256 digest of caller seeds, a one-byte
//! bump, and the owning program id that does NOT decode to an ed25519 point,
//! so no private key can exist for it. The canonical bump is the highest
//! value in `[0, 255]` whose digest is off-curve; the search tries bumps in
//! descending order and stops at the first success.
//!
//! Everything here is pure: no I/O, no shared state.

use crate::curve;
use crate::errors::{PdaError, PdaResult};
use crate::hash;
use crate::pubkey::PublicKey;

/// Maximum length of a single seed.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of seeds, bump included.
pub const MAX_SEEDS: usize = 16;

/// A derived address together with its canonical bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedAddress {
    pub address: PublicKey,
    pub bump: u8,
}

impl DerivedAddress {
    pub fn into_parts(self) -> (PublicKey, u8) {
        (self.address, self.bump)
    }
}

/// Find the canonical program address for `seeds` under `program_id`.
///
/// One seed slot is reserved for the bump, so at most `MAX_SEEDS - 1`
/// caller seeds are accepted.
pub fn derive(seeds: &[&[u8]], program_id: &PublicKey) -> PdaResult<DerivedAddress> {
    search(seeds, program_id, curve::is_on_curve)
}

/// Hash `seeds` (bump already included) into a program address without
/// searching. Fails if the digest lands on the curve.
pub fn create_program_address(seeds: &[&[u8]], program_id: &PublicKey) -> PdaResult<PublicKey> {
    validate_seeds(seeds, MAX_SEEDS)?;
    let digest = hash::program_address_digest(seeds, None, program_id);
    if curve::is_on_curve(&digest) {
        return Err(PdaError::invalid_seeds(
            "derived address lies on the ed25519 curve",
        ));
    }
    Ok(PublicKey::new_from_array(digest))
}

/// Associated holding account for `owner` and `asset_id`.
///
/// Seed order `[owner, holding_program_id, asset_id]` is fixed by the
/// associated account program.
pub fn derive_associated_account(
    owner: &PublicKey,
    asset_id: &PublicKey,
    holding_program_id: &PublicKey,
    associated_program_id: &PublicKey,
) -> PdaResult<DerivedAddress> {
    derive(
        &[owner.as_ref(), holding_program_id.as_ref(), asset_id.as_ref()],
        associated_program_id,
    )
}

fn search<F>(seeds: &[&[u8]], program_id: &PublicKey, on_curve: F) -> PdaResult<DerivedAddress>
where
    F: Fn(&[u8; 32]) -> bool,
{
    validate_seeds(seeds, MAX_SEEDS - 1)?;
    for bump in (0..=u8::MAX).rev() {
        let digest = hash::program_address_digest(seeds, Some(bump), program_id);
        if !on_curve(&digest) {
            return Ok(DerivedAddress {
                address: PublicKey::new_from_array(digest),
                bump,
            });
        }
    }
    Err(PdaError::ExhaustedBumpSeeds)
}

fn validate_seeds(seeds: &[&[u8]], max_count: usize) -> PdaResult<()> {
    if seeds.len() > max_count {
        return Err(PdaError::invalid_seeds(format!(
            "too many seeds: {} (max {max_count})",
            seeds.len()
        )));
    }
    if let Some((i, seed)) = seeds.iter().enumerate().find(|(_, s)| s.len() > MAX_SEED_LEN) {
        return Err(PdaError::invalid_seeds(format!(
            "seed {i} is {} bytes (max {MAX_SEED_LEN})",
            seed.len()
        )));
    }
    Ok(())
}
