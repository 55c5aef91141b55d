//! Hashing primitives for address derivation.
//!
//! All digests are SHA-256 and domain-separated with [`PDA_MARKER`]. The
//! byte layout is fixed by the target chain:
//!
//! `sha256(seed_0 || .. || seed_n || [bump] || program_id || PDA_MARKER)`
//!
//! Changing anything here changes every derived address.

use sha2::{Digest, Sha256};

use crate::pubkey::PublicKey;

/// Domain separator appended after the program id.
pub const PDA_MARKER: &[u8; 21] = b"ProgramDerivedAddress";

pub const HASH_BYTES: usize = 32;

/// Hash a sequence of byte slices as if they were concatenated.
pub fn hashv(parts: &[&[u8]]) -> [u8; HASH_BYTES] {
    let mut h = Sha256::new();
    for part in parts {
        h.update(part);
    }
    h.finalize().into()
}

/// Candidate digest for one bump of the program address search.
///
/// `bump` is `None` when the caller already put the bump inside `seeds`
/// (raw `create_program_address`).
pub fn program_address_digest(
    seeds: &[&[u8]],
    bump: Option<u8>,
    program_id: &PublicKey,
) -> [u8; HASH_BYTES] {
    let bump = bump.map(|b| [b]);
    let mut parts: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 3);
    parts.extend_from_slice(seeds);
    if let Some(b) = &bump {
        parts.push(b);
    }
    parts.push(program_id.as_ref());
    parts.push(PDA_MARKER);
    hashv(&parts)
}
