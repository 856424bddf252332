//! Deterministic challenge construction.
//!
//! The same challenge is used when a passkey is enrolled and on every later
//! assertion, which is what binds both ceremonies to the same derived key.
//! The challenge has the shape:
//!
//! ```text
//! <base_challenge>:<username>@<rp_name>@<origin>
//! ```

/// Base phrase used when no custom challenge is configured.
///
/// This string is public. It only provides domain separation; it adds no
/// entropy to the derived key.
pub const DEFAULT_CHALLENGE: &str = "Never share your private key or recovery phrase with anyone. Your financial security depends on keeping these credentials absolutely private and secure. Only you should have access to your Bitcoin wallet.";

/// Builds the deterministic challenge for a `(username, rp_name, origin)` triple.
///
/// When `base_challenge` is `None`, [`DEFAULT_CHALLENGE`] is used. Empty inputs
/// do not fail: the challenge is still assembled so hosts never crash on
/// malformed user input, but a warning is logged naming the empty field.
#[must_use]
#[uniffi::export]
#[allow(clippy::needless_pass_by_value)]
pub fn build_challenge(
    base_challenge: Option<String>,
    username: &str,
    rp_name: &str,
    origin: &str,
) -> String {
    let base = base_challenge.as_deref().unwrap_or(DEFAULT_CHALLENGE);
    assemble(base, username, rp_name, origin)
}

/// Builds challenges for a fixed relying party and origin.
///
/// Each call to [`ChallengeBuilder::build`] is pure; the builder only saves
/// passing the relying-party context around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeBuilder {
    base: String,
    rp_name: String,
    origin: String,
}

impl ChallengeBuilder {
    /// Creates a builder using [`DEFAULT_CHALLENGE`] as the base phrase.
    #[must_use]
    pub fn new(rp_name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            base: DEFAULT_CHALLENGE.to_string(),
            rp_name: rp_name.into(),
            origin: origin.into(),
        }
    }

    /// Replaces the base phrase.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Returns the base phrase in use.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Builds the challenge for `username`.
    #[must_use]
    pub fn build(&self, username: &str) -> String {
        assemble(&self.base, username, &self.rp_name, &self.origin)
    }
}

fn assemble(base: &str, username: &str, rp_name: &str, origin: &str) -> String {
    for (field, value) in [
        ("base_challenge", base),
        ("username", username),
        ("rp_name", rp_name),
        ("origin", origin),
    ] {
        if value.is_empty() {
            log::warn!("building challenge with empty {field}");
        }
    }

    format!("{base}:{username}@{rp_name}@{origin}")
}
