//! Deterministic private keys from passkey signatures.
//!
//! A platform authenticator signs a deterministic challenge bound to
//! `(username, rp_name, origin)`. The signature is fed into HKDF-SHA256 to
//! derive a 32-byte private key, exposed as raw bytes, hex and a 24-word
//! BIP-39 mnemonic. Because the challenge never changes for a given user,
//! every assertion regenerates the same key and nothing has to be stored.
//!
//! ```rust
//! use passkey39_core::{build_challenge, derive_key};
//!
//! let challenge = build_challenge(None, "alice", "example.com", "https://example.com");
//! let signature = [7u8; 64]; // returned by the platform authenticator
//!
//! let key = derive_key(&signature, &challenge, "example.com").unwrap();
//! assert_eq!(key.hex().len(), 64);
//! assert_eq!(key.mnemonic().unwrap().split_whitespace().count(), 24);
//! ```
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]

mod challenge;
pub use challenge::*;

mod config;
pub use config::*;

mod derivation;
pub use derivation::*;

mod error;
pub use error::*;

pub mod logger;
pub use logger::{set_logger, LogLevel, Logger};

mod passkey;
pub use passkey::*;

mod private_key;
pub use private_key::*;

uniffi::setup_scaffolding!("passkey39_core");
