//! Passkey ceremonies.
//!
//! [`Passkey39`] drives the platform authenticator through enrollment and
//! assertion and hands the resulting signature to the key derivation. It holds
//! no cryptographic logic of its own. The platform API lives behind the
//! [`PlatformAuthenticator`] trait, which hosts implement in Swift, Kotlin or
//! JS.
//!
//! Both ceremonies send the same deterministic challenge, so the signature
//! returned by an assertion always derives the same key for a given user.

use std::sync::Arc;

use rand::{rngs::OsRng, RngCore};
use secrecy::{ExposeSecret, SecretBox};
use strum::{Display, EnumString};

use crate::{
    challenge::ChallengeBuilder,
    config::Passkey39Config,
    derivation::derive_key,
    error::Passkey39Error,
    private_key::PrivateKey,
};

/// COSE algorithm identifier for ECDSA with P-256 and SHA-256.
pub const COSE_ALG_ES256: i32 = -7;

/// Length of the random `WebAuthn` user handle.
const USER_ID_LENGTH: usize = 16;

/// User verification policy requested from the authenticator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, uniffi::Enum)]
#[strum(serialize_all = "lowercase")]
pub enum UserVerification {
    /// The user must be verified (biometrics or PIN).
    Required,
    /// Verification is preferred but not required.
    Preferred,
    /// Verification should not be performed.
    Discouraged,
}

/// Which class of authenticator may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, uniffi::Enum)]
#[strum(serialize_all = "kebab-case")]
pub enum AuthenticatorAttachment {
    /// Built into the device (Touch ID, Face ID, Windows Hello, Android).
    Platform,
    /// Roaming authenticator such as a security key.
    CrossPlatform,
}

/// Attestation conveyance preference for enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, uniffi::Enum)]
#[strum(serialize_all = "lowercase")]
pub enum Attestation {
    /// Attestation may be anonymized by the client.
    Indirect,
    /// The authenticator's attestation statement is returned as-is.
    Direct,
    /// Enterprise attestation.
    Enterprise,
}

/// Credential mediation requirement for assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, uniffi::Enum)]
#[strum(serialize_all = "lowercase")]
pub enum Mediation {
    /// No user interaction.
    Silent,
    /// The client decides whether to show UI.
    Optional,
    /// Autofill-style conditional UI.
    Conditional,
    /// The user must always interact.
    Required,
}

/// Parameters of an enrollment ("create credential") ceremony.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct CredentialCreationOptions {
    /// The exact challenge bytes (UTF-8 of the deterministic challenge).
    pub challenge: Vec<u8>,
    /// Relying party name.
    pub rp_name: String,
    /// Random user handle.
    pub user_id: Vec<u8>,
    /// Account name shown by the authenticator.
    pub user_name: String,
    /// Display name shown by the authenticator.
    pub user_display_name: String,
    /// Accepted COSE algorithms, in preference order.
    pub algorithms: Vec<i32>,
    /// Authenticator class.
    pub authenticator_attachment: AuthenticatorAttachment,
    /// User verification policy.
    pub user_verification: UserVerification,
    /// Attestation preference.
    pub attestation: Attestation,
    /// Ceremony timeout in milliseconds.
    pub timeout_ms: u32,
}

/// Parameters of an assertion ("get signature") ceremony.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct CredentialRequestOptions {
    /// The exact challenge bytes (UTF-8 of the deterministic challenge).
    pub challenge: Vec<u8>,
    /// Relying party id the assertion is scoped to.
    pub rp_id: String,
    /// User verification policy.
    pub user_verification: UserVerification,
    /// Mediation requirement.
    pub mediation: Mediation,
    /// Ceremony timeout in milliseconds.
    pub timeout_ms: u32,
}

/// The platform authenticator, implemented by the host.
///
/// Implementations block until the platform ceremony settles. Hosts should
/// therefore call into [`Passkey39`] off their UI thread.
#[uniffi::export(with_foreign)]
pub trait PlatformAuthenticator: Send + Sync {
    /// Whether the platform exposes both credential creation and assertion.
    fn is_supported(&self) -> bool;

    /// Runs an enrollment ceremony and returns the new credential id.
    ///
    /// # Errors
    /// Returns an error if the ceremony fails or is cancelled.
    fn create_credential(
        &self,
        options: CredentialCreationOptions,
    ) -> Result<Vec<u8>, Passkey39Error>;

    /// Runs an assertion ceremony and returns the raw signature.
    ///
    /// # Errors
    /// Returns an error if the ceremony fails or is cancelled.
    fn get_assertion(
        &self,
        options: CredentialRequestOptions,
    ) -> Result<Vec<u8>, Passkey39Error>;
}

/// Derives a deterministic private key from passkey ceremonies.
#[derive(uniffi::Object)]
pub struct Passkey39 {
    config: Passkey39Config,
    challenges: ChallengeBuilder,
    authenticator: Arc<dyn PlatformAuthenticator>,
}

#[uniffi::export]
impl Passkey39 {
    /// Creates a new `Passkey39` for a relying party.
    #[must_use]
    #[uniffi::constructor]
    pub fn new(
        config: Passkey39Config,
        authenticator: Arc<dyn PlatformAuthenticator>,
    ) -> Self {
        let challenges = config.challenge_builder();
        Self {
            config,
            challenges,
            authenticator,
        }
    }

    /// Whether the host platform supports passkeys.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.authenticator.is_supported()
    }

    /// Returns the deterministic challenge used for `username`.
    ///
    /// Retries of a ceremony must reuse this exact value.
    #[must_use]
    pub fn challenge_for(&self, username: &str) -> String {
        self.challenges.build(username)
    }

    /// Enrolls a new platform passkey for `username` and returns its credential id.
    ///
    /// # Errors
    /// - `UnsupportedEnvironment` if the platform has no authenticator.
    /// - `Authenticator` if the ceremony fails or returns no credential.
    pub fn create_passkey(&self, username: &str) -> Result<Vec<u8>, Passkey39Error> {
        self.ensure_supported()?;

        let options = self.creation_options(username);
        let credential_id = self
            .authenticator
            .create_credential(options)
            .and_then(|credential_id| {
                if credential_id.is_empty() {
                    Err(Passkey39Error::Authenticator {
                        reason: "authentication failed: no credential returned".to_string(),
                    })
                } else {
                    Ok(credential_id)
                }
            })
            .inspect_err(|err| {
                log::error!(
                    "passkey creation failed for rp {}: {err}",
                    self.config.rp_name
                );
            })?;

        log::info!("passkey created for rp {}", self.config.rp_name);
        Ok(credential_id)
    }

    /// Authenticates `username` with their passkey and derives the private key.
    ///
    /// # Errors
    /// - `UnsupportedEnvironment` if the platform has no authenticator.
    /// - `Authenticator` if the ceremony fails.
    /// - `InvalidInput` if the authenticator returns an empty signature.
    pub fn authenticate(&self, username: &str) -> Result<Arc<PrivateKey>, Passkey39Error> {
        self.ensure_supported()?;

        let challenge = self.challenge_for(username);
        let options = self.request_options(&challenge);

        let signature = self
            .authenticator
            .get_assertion(options)
            .inspect_err(|err| {
                log::error!(
                    "passkey assertion failed for rp {}: {err}",
                    self.config.rp_name
                );
            })?;
        let signature = hold_signature(signature);

        derive_key(signature.expose_secret(), &challenge, &self.config.rp_name)
    }
}

impl Passkey39 {
    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &Passkey39Config {
        &self.config
    }

    fn ensure_supported(&self) -> Result<(), Passkey39Error> {
        if self.authenticator.is_supported() {
            Ok(())
        } else {
            log::warn!("passkeys are not supported on this platform");
            Err(Passkey39Error::UnsupportedEnvironment)
        }
    }

    fn creation_options(&self, username: &str) -> CredentialCreationOptions {
        let mut user_id = vec![0u8; USER_ID_LENGTH];
        OsRng.fill_bytes(&mut user_id);

        CredentialCreationOptions {
            challenge: self.challenge_for(username).into_bytes(),
            rp_name: self.config.rp_name.clone(),
            user_id,
            user_name: username.to_string(),
            user_display_name: username.to_string(),
            algorithms: vec![COSE_ALG_ES256],
            authenticator_attachment: AuthenticatorAttachment::Platform,
            user_verification: UserVerification::Required,
            attestation: Attestation::Direct,
            timeout_ms: self.config.timeout_ms,
        }
    }

    fn request_options(&self, challenge: &str) -> CredentialRequestOptions {
        CredentialRequestOptions {
            challenge: challenge.as_bytes().to_vec(),
            rp_id: self.config.rp_name.clone(),
            user_verification: UserVerification::Required,
            mediation: Mediation::Optional,
            timeout_ms: self.config.timeout_ms,
        }
    }
}

/// Takes ownership of the signature buffer without reallocating it, so the
/// whole allocation is zeroized on drop.
fn hold_signature(signature: Vec<u8>) -> SecretBox<Vec<u8>> {
    SecretBox::new(Box::new(signature))
}
