//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use passkey39_core::{
    CredentialCreationOptions, CredentialRequestOptions, Passkey39Error, PlatformAuthenticator,
};
use sha2::{Digest, Sha512};

/// An in-memory platform authenticator.
///
/// Its "signature" is `SHA-512(secret || challenge)`, so it is stable for a
/// given `(credential, challenge)` pair like a deterministic platform signer.
pub struct InMemoryAuthenticator {
    secret: [u8; 32],
    supported: bool,
    fail_with: Option<String>,
    credential_id: Vec<u8>,
    pub created: Mutex<Vec<CredentialCreationOptions>>,
    pub requested: Mutex<Vec<CredentialRequestOptions>>,
}

impl InMemoryAuthenticator {
    pub fn new(secret: [u8; 32]) -> Self {
        Self {
            secret,
            supported: true,
            fail_with: None,
            credential_id: b"credential-1".to_vec(),
            created: Mutex::new(Vec::new()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::new([0u8; 32])
        }
    }

    pub fn returning_credential_id(credential_id: Vec<u8>) -> Self {
        Self {
            credential_id,
            ..Self::new([0u8; 32])
        }
    }

    pub fn signature_for(&self, challenge: &[u8]) -> Vec<u8> {
        let mut hasher = Sha512::new();
        hasher.update(self.secret);
        hasher.update(challenge);
        hasher.finalize().to_vec()
    }

    fn check_failure(&self) -> Result<(), Passkey39Error> {
        match &self.fail_with {
            Some(reason) => Err(Passkey39Error::Authenticator {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl PlatformAuthenticator for InMemoryAuthenticator {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn create_credential(
        &self,
        options: CredentialCreationOptions,
    ) -> Result<Vec<u8>, Passkey39Error> {
        self.created.lock().unwrap().push(options);
        self.check_failure()?;
        Ok(self.credential_id.clone())
    }

    fn get_assertion(
        &self,
        options: CredentialRequestOptions,
    ) -> Result<Vec<u8>, Passkey39Error> {
        let signature = self.signature_for(&options.challenge);
        self.requested.lock().unwrap().push(options);
        self.check_failure()?;
        Ok(signature)
    }
}
