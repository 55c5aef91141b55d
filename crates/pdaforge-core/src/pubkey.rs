//! 32-byte account identifiers.
//!
//! A [`PublicKey`] names an owner wallet, a mint, or a program. All three
//! share one representation; equality is byte-exact and there is no
//! ordering. The text form is base58, matching what wallets and explorers
//! display.

use std::fmt;
use std::str::FromStr;

use crate::curve;
use crate::errors::{PdaError, PdaResult};

/// Number of bytes in a public key.
pub const PUBKEY_BYTES: usize = 32;

/// Longest base58 rendering of 32 bytes.
const MAX_BASE58_LEN: usize = 44;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBKEY_BYTES]);

impl PublicKey {
    pub const fn new_from_array(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> PdaResult<Self> {
        let arr: [u8; PUBKEY_BYTES] = bytes.try_into().map_err(|_| {
            PdaError::invalid_argument(format!(
                "public key must be {PUBKEY_BYTES} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    pub const fn to_bytes(self) -> [u8; PUBKEY_BYTES] {
        self.0
    }

    pub const fn as_array(&self) -> &[u8; PUBKEY_BYTES] {
        &self.0
    }

    /// Whether these bytes decode to a point on the ed25519 curve.
    ///
    /// Program-derived addresses never do.
    pub fn is_on_curve(&self) -> bool {
        curve::is_on_curve(&self.0)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBKEY_BYTES]> for PublicKey {
    fn from(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

impl FromStr for PublicKey {
    type Err = PdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.len() > MAX_BASE58_LEN {
            return Err(PdaError::invalid_argument(format!(
                "invalid public key length: {}",
                s.len()
            )));
        }
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| PdaError::invalid_argument(format!("invalid base58 public key: {e}")))?;
        Self::from_slice(&bytes)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PublicKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PublicKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
