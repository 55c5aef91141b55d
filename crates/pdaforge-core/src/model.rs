//! Provisioning artifacts.

use std::fmt;

use crate::derive::DerivedAddress;
use crate::errors::PdaResult;
use crate::pubkey::PublicKey;

/// Length of an ed25519 keypair in its 64-byte (secret || public) form.
pub const KEYPAIR_BYTES: usize = 64;

/// Secret key bytes of a freshly generated owner. Never printed.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u8>", into = "Vec<u8>"))]
pub struct SigningMaterial(Vec<u8>);

impl SigningMaterial {
    pub fn new(bytes: Vec<u8>) -> PdaResult<Self> {
        if bytes.len() != KEYPAIR_BYTES {
            return Err(crate::PdaError::invalid_argument(format!(
                "signing material must be {KEYPAIR_BYTES} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The public half, stored in the last 32 bytes.
    pub fn public_key(&self) -> PdaResult<PublicKey> {
        PublicKey::from_slice(&self.0[32..])
    }
}

impl TryFrom<Vec<u8>> for SigningMaterial {
    type Error = crate::PdaError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl From<SigningMaterial> for Vec<u8> {
    fn from(m: SigningMaterial) -> Self {
        m.0
    }
}

impl fmt::Debug for SigningMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningMaterial(<redacted>)")
    }
}

/// What provisioning produces for one wallet.
///
/// Serialized field names follow the `platform-wallet.json` layout consumed
/// by the dashboard tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WalletRecord {
    #[cfg_attr(feature = "serde", serde(rename = "publicKey"))]
    pub owner: PublicKey,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "privateKey", default, skip_serializing_if = "Option::is_none")
    )]
    pub signing_key: Option<SigningMaterial>,
    #[cfg_attr(feature = "serde", serde(rename = "tokenAccount"))]
    pub holding_account: PublicKey,
    pub mint: PublicKey,
    pub created_at: i64,
}

impl WalletRecord {
    /// Record for a freshly generated owner. The owner must match the public
    /// half of `signing_key`.
    pub fn for_generated_owner(
        signing_key: SigningMaterial,
        mint: PublicKey,
        holding_account: PublicKey,
        created_at: i64,
    ) -> PdaResult<Self> {
        let owner = signing_key.public_key()?;
        Ok(Self {
            owner,
            signing_key: Some(signing_key),
            holding_account,
            mint,
            created_at,
        })
    }

    /// Record for an owner whose key is held elsewhere.
    pub fn for_existing_owner(
        owner: PublicKey,
        mint: PublicKey,
        holding_account: PublicKey,
        created_at: i64,
    ) -> Self {
        Self {
            owner,
            signing_key: None,
            holding_account,
            mint,
            created_at,
        }
    }

    pub fn has_signing_key(&self) -> bool {
        self.signing_key.is_some()
    }
}

/// Outcome of `AccountProvisioner::ensure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProvisionResult {
    pub address: DerivedAddress,
    pub already_existed: bool,
}

/// Durable sink for wallet records.
pub trait WalletRecordStore {
    /// Persist `record`. Implementations must not silently replace an
    /// existing record.
    fn save(&self, record: &WalletRecord) -> PdaResult<()>;

    fn load(&self) -> PdaResult<Option<WalletRecord>>;
}
