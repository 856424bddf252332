//! Signature-to-key derivation.
//!
//! The derived key is computed with HKDF-SHA256:
//!
//! ```text
//! key = HKDF(
//!     ikm  = authenticator signature,
//!     salt = UTF-8 bytes of the challenge,
//!     info = UTF-8 bytes of the relying party name,
//!     len  = 32
//! )
//! ```
//!
//! Using the relying party name as `info` separates keys of relying parties
//! that happen to receive the same signature bytes.

use std::sync::Arc;

use hkdf::Hkdf;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::{
    error::{Passkey39Error, Passkey39Result},
    private_key::PrivateKey,
};

/// Length in bytes of a [`DerivedKey`].
pub const DERIVED_KEY_LENGTH: usize = 32;

/// A 256-bit key derived from an authenticator signature.
///
/// # Security
///
/// - The key is zeroized on drop.
/// - `Debug` never prints the key bytes.
/// - Equality is evaluated in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; DERIVED_KEY_LENGTH]);

impl DerivedKey {
    /// Wraps raw key bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; DERIVED_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the raw key bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DERIVED_KEY_LENGTH] {
        &self.0
    }
}

impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for DerivedKey {}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derives `length` bytes of key material from an authenticator signature.
///
/// # Errors
///
/// - [`Passkey39Error::InvalidInput`] if `signature` or `challenge` is empty
///   or `length` is zero.
/// - [`Passkey39Error::DerivationFailure`] if HKDF-SHA256 cannot produce
///   `length` bytes (more than 255 blocks).
pub fn derive_key_material(
    signature: &[u8],
    challenge: &str,
    rp_name: &str,
    length: usize,
) -> Passkey39Result<Zeroizing<Vec<u8>>> {
    if signature.is_empty() {
        return Err(Passkey39Error::invalid_input(
            "signature",
            "signature must not be empty",
        ));
    }
    if challenge.is_empty() {
        return Err(Passkey39Error::invalid_input(
            "challenge",
            "challenge must not be empty",
        ));
    }
    if length == 0 {
        return Err(Passkey39Error::invalid_input(
            "length",
            "requested key length must be positive",
        ));
    }

    log::debug!(
        "deriving {length} bytes from a {}-byte signature for rp {rp_name}",
        signature.len()
    );

    let hkdf = Hkdf::<Sha256>::new(Some(challenge.as_bytes()), signature);
    let mut okm = Zeroizing::new(vec![0u8; length]);
    hkdf.expand(rp_name.as_bytes(), &mut okm)
        .map_err(|err| Passkey39Error::DerivationFailure {
            reason: format!("HKDF-SHA256 cannot expand to {length} bytes: {err}"),
        })?;

    Ok(okm)
}

/// Derives the 32-byte [`DerivedKey`] for a ceremony.
///
/// # Errors
///
/// See [`derive_key_material`].
pub fn derive(
    signature: &[u8],
    challenge: &str,
    rp_name: &str,
) -> Passkey39Result<DerivedKey> {
    let okm = derive_key_material(signature, challenge, rp_name, DERIVED_KEY_LENGTH)?;

    let mut bytes = [0u8; DERIVED_KEY_LENGTH];
    bytes.copy_from_slice(&okm);
    let key = DerivedKey::from_bytes(bytes);
    bytes.zeroize();

    Ok(key)
}

/// Derives the private key for a ceremony and returns a handle exposing its
/// raw, hex and mnemonic encodings.
///
/// # Errors
///
/// See [`derive_key_material`].
#[uniffi::export]
pub fn derive_key(
    signature: &[u8],
    challenge: &str,
    rp_name: &str,
) -> Result<Arc<PrivateKey>, Passkey39Error> {
    let key = derive(signature, challenge, rp_name)?;
    Ok(Arc::new(PrivateKey::from(key)))
}
