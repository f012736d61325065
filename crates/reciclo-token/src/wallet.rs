//! Identity types for the Reciclo ledgers.
//!
//! Every ledger operation receives the verified caller identity from the
//! execution host as an [`Address`]. Wallets exist to derive fresh
//! identities; the host, not this crate, authenticates callers.

use crate::error::{Result, TokenError};
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An account identity (base58-encoded 32-byte public key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Create an address from a base58-encoded string.
    ///
    /// # Errors
    ///
    /// Returns error if the string is not valid base58 or wrong length.
    pub fn from_base58(s: &str) -> Result<Self> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| TokenError::invalid_address(format!("invalid base58: {e}")))?;

        if bytes.len() != 32 {
            return Err(TokenError::invalid_address(format!(
                "address must be 32 bytes, got {}",
                bytes.len()
            )));
        }

        Ok(Self(s.to_string()))
    }

    /// Create an address from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns error if bytes are not 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(TokenError::invalid_address(format!(
                "address must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(bs58::encode(bytes).into_string()))
    }

    /// The null identity: all 32 bytes zero.
    ///
    /// No funds can be sent to it; transfers and mints targeting it fail
    /// with [`TokenError::InvalidRecipient`].
    #[must_use]
    pub fn zero() -> Self {
        Self(bs58::encode([0u8; 32]).into_string())
    }

    /// Whether this is the null identity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.to_bytes().iter().all(|b| *b == 0)
    }

    /// Get the base58-encoded address string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the raw bytes of the address.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        bs58::decode(&self.0).into_vec().unwrap_or_default()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A keypair-backed identity.
///
/// The marketplace core never verifies signatures (the execution host
/// authenticates callers before invoking it), so the wallet only exposes
/// what identity derivation needs.
pub struct Wallet {
    signing_key: SigningKey,
    address: Address,
}

impl Wallet {
    /// Generate a new random wallet.
    ///
    /// Uses `OsRng` directly instead of `thread_rng()` because cryptographic
    /// key material should come directly from the operating system's CSPRNG
    /// rather than a userspace PRNG that is merely seeded from system entropy.
    ///
    /// # Errors
    ///
    /// Returns error if random generation fails.
    pub fn generate() -> Result<Self> {
        let mut secret_bytes = [0u8; 32];
        OsRng.fill_bytes(&mut secret_bytes);
        Self::from_secret_bytes(&secret_bytes)
    }

    /// Create a wallet from a secret key (32 bytes).
    ///
    /// # Errors
    ///
    /// Returns error if the key is invalid.
    pub fn from_secret_bytes(secret: &[u8]) -> Result<Self> {
        if secret.len() != 32 {
            return Err(TokenError::WalletError {
                message: format!("secret key must be 32 bytes, got {}", secret.len()),
            });
        }

        let secret_array: [u8; 32] = secret.try_into().map_err(|_| TokenError::WalletError {
            message: "failed to convert secret key".to_string(),
        })?;

        let signing_key = SigningKey::from_bytes(&secret_array);
        let verifying_key = signing_key.verifying_key();
        let address = Address::from_bytes(verifying_key.as_bytes())?;

        Ok(Self {
            signing_key,
            address,
        })
    }

    /// Get the wallet address.
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Get the secret key bytes (careful with this!).
    #[must_use]
    pub fn secret_key(&self) -> &[u8; 32] {
        self.signing_key.as_bytes()
    }
}

#[allow(clippy::missing_fields_in_debug)]
impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
