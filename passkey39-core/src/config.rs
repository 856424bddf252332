use serde::{Deserialize, Serialize};

use crate::{
    challenge::ChallengeBuilder,
    error::{Passkey39Error, Passkey39Result},
};

/// Default ceremony timeout (60 seconds).
pub const DEFAULT_TIMEOUT_MS: u32 = 60_000;

/// Relying party configuration for passkey ceremonies.
///
/// `origin` must be supplied by the host (e.g. the web page origin or the
/// app's associated domain); it is never read from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct Passkey39Config {
    /// Custom base challenge. `None` selects the default warning phrase.
    #[serde(default)]
    pub challenge: Option<String>,
    /// Relying party name. Used as the ceremony rp id and as the HKDF info label.
    pub rp_name: String,
    /// Origin the challenge is bound to (e.g. `https://example.com`).
    pub origin: String,
    /// Ceremony timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u32,
}

const fn default_timeout_ms() -> u32 {
    DEFAULT_TIMEOUT_MS
}

impl Passkey39Config {
    /// Creates a configuration with the default challenge and timeout.
    #[must_use]
    pub fn new(rp_name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            challenge: None,
            rp_name: rp_name.into(),
            origin: origin.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Sets a custom base challenge.
    #[must_use]
    pub fn with_challenge(mut self, challenge: impl Into<String>) -> Self {
        self.challenge = Some(challenge.into());
        self
    }

    /// Sets the ceremony timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the JSON is malformed or misses a required field.
    pub fn from_json(json: &str) -> Passkey39Result<Self> {
        serde_json::from_str(json)
            .map_err(|err| Passkey39Error::invalid_input("config", err.to_string()))
    }

    /// Returns a [`ChallengeBuilder`] bound to this relying party and origin.
    #[must_use]
    pub fn challenge_builder(&self) -> ChallengeBuilder {
        let builder = ChallengeBuilder::new(self.rp_name.clone(), self.origin.clone());
        match &self.challenge {
            Some(base) => builder.with_base(base.clone()),
            None => builder,
        }
    }
}
