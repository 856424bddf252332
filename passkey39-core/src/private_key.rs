//! Encodings of a derived private key.
//!
//! A [`PrivateKey`] is a read-only view over a [`DerivedKey`]. The raw bytes,
//! the lowercase hex string and the BIP-39 mnemonic all encode the same
//! 32 bytes, and the mnemonic decodes back to exactly those bytes.

use bip39::{Language, Mnemonic};

use crate::{
    derivation::{DerivedKey, DERIVED_KEY_LENGTH},
    error::{Passkey39Error, Passkey39Result},
};

/// A derived private key and its human-transcribable encodings.
///
/// # Security
/// The handle never persists or logs the key. `UniFFI` copies the bytes when
/// they cross the FFI boundary, so callers are responsible for what happens to
/// them afterwards.
#[derive(uniffi::Object)]
pub struct PrivateKey {
    key: DerivedKey,
}

#[uniffi::export]
impl PrivateKey {
    /// Recovers a key from its 64-character hex encoding.
    ///
    /// # Errors
    /// Returns `InvalidInput` if `hex_key` is not valid hex or does not
    /// decode to 32 bytes.
    #[uniffi::constructor]
    pub fn from_hex(hex_key: &str) -> Result<Self, Passkey39Error> {
        let bytes = hex::decode(hex_key.trim())
            .map_err(|err| Passkey39Error::invalid_input("hex_key", err.to_string()))?;
        Self::from_entropy(&bytes, "hex_key")
    }

    /// Recovers a key from its BIP-39 mnemonic backup.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the phrase has an unknown word, a bad
    /// checksum, or does not encode 32 bytes.
    #[uniffi::constructor]
    pub fn from_mnemonic(phrase: &str) -> Result<Self, Passkey39Error> {
        let bytes = mnemonic_to_entropy(phrase)?;
        Self::from_entropy(&bytes, "mnemonic")
    }

    /// The raw key bytes.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.key.as_bytes().to_vec()
    }

    /// The lowercase hex encoding of the key (64 characters).
    #[must_use]
    pub fn hex(&self) -> String {
        hex::encode(self.key.as_bytes())
    }

    /// The 24-word English BIP-39 mnemonic for the key.
    ///
    /// # Errors
    /// Returns `DerivationFailure` if the key cannot be encoded. A backup
    /// phrase is never silently replaced by an empty string.
    pub fn mnemonic(&self) -> Result<String, Passkey39Error> {
        encode_mnemonic(self.key.as_bytes()).map_err(|err| Passkey39Error::DerivationFailure {
            reason: format!("cannot encode key as a mnemonic: {err}"),
        })
    }

    /// Number of words in [`PrivateKey::mnemonic`] (always 24).
    #[must_use]
    pub fn word_count(&self) -> u32 {
        let bits = DERIVED_KEY_LENGTH * 8;
        // One checksum bit per 32 bits of entropy, 11 bits per word.
        u32::try_from((bits + bits / 32) / 11).unwrap_or(u32::MAX)
    }
}

impl PrivateKey {
    /// Returns the underlying derived key.
    #[must_use]
    pub const fn derived_key(&self) -> &DerivedKey {
        &self.key
    }

    fn from_entropy(bytes: &[u8], attribute: &str) -> Passkey39Result<Self> {
        let bytes: [u8; DERIVED_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            Passkey39Error::invalid_input(
                attribute,
                format!("expected {DERIVED_KEY_LENGTH} bytes, got {}", bytes.len()),
            )
        })?;
        Ok(Self {
            key: DerivedKey::from_bytes(bytes),
        })
    }
}

impl From<DerivedKey> for PrivateKey {
    fn from(key: DerivedKey) -> Self {
        Self { key }
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Encodes entropy as an English BIP-39 mnemonic.
///
/// # Errors
/// Returns `InvalidInput` if the entropy length is not one of the BIP-39
/// lengths (16, 20, 24, 28 or 32 bytes).
#[uniffi::export]
pub fn entropy_to_mnemonic(entropy: &[u8]) -> Result<String, Passkey39Error> {
    encode_mnemonic(entropy).map_err(|err| Passkey39Error::invalid_input("entropy", err.to_string()))
}

fn encode_mnemonic(entropy: &[u8]) -> Result<String, bip39::Error> {
    Mnemonic::from_entropy_in(Language::English, entropy).map(|mnemonic| mnemonic.to_string())
}

/// Decodes an English BIP-39 mnemonic back to its entropy, validating the
/// embedded checksum.
///
/// # Errors
/// Returns `InvalidInput` if the phrase has an unknown word, an invalid word
/// count, or a checksum that does not match.
#[uniffi::export]
pub fn mnemonic_to_entropy(phrase: &str) -> Result<Vec<u8>, Passkey39Error> {
    let mnemonic = Mnemonic::parse_in(Language::English, phrase.trim())
        .map_err(|err| Passkey39Error::invalid_input("mnemonic", err.to_string()))?;
    Ok(mnemonic.to_entropy())
}
