//! Shared-secret authorisation for privileged deposits.
//!
//! Deposits require two secrets, a bot token and an admin password, that must
//! both match the configured values. Configured secrets are reduced to SHA-256
//! digests as soon as they are loaded and the plaintext is zeroised. Presented
//! secrets are hashed the same way and compared in constant time, so neither
//! timing nor error text reveals which of the two failed.

use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

use super::Error;

type SecretDigest = [u8; 32];

/// Message returned for every failed credential check.
const UNAUTHORIZED_MESSAGE: &str = "invalid credentials";

fn digest(secret: &str) -> SecretDigest {
    Sha256::digest(secret.as_bytes()).into()
}

fn digests_match(left: &SecretDigest, right: &SecretDigest) -> bool {
    left.iter()
        .zip(right.iter())
        .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Credential pair presented by a privileged caller.
///
/// Both values are held in zeroising buffers and dropped with the request.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    bot_token: Zeroizing<String>,
    password: Zeroizing<String>,
}

impl AdminCredentials {
    /// Wrap the raw secrets supplied by the caller.
    pub fn new(bot_token: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            bot_token: Zeroizing::new(bot_token.into()),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("bot_token", &"<redacted>")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Proof that a credential pair was verified.
///
/// Only [`AdminSecrets::verify`] can mint a grant, so a deposit cannot be
/// issued without passing the credential check first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminGrant {
    _verified: (),
}

/// Digests of the configured deposit secrets.
///
/// An unset or empty secret is stored as `None`; every verification then
/// fails, so a deployment without secrets cannot accept deposits.
///
/// # Examples
/// ```
/// use starledger::domain::{AdminCredentials, AdminSecrets};
///
/// let secrets = AdminSecrets::from_plaintext(Some("token".into()), Some("hunter2".into()));
/// assert!(secrets.verify(&AdminCredentials::new("token", "hunter2")).is_ok());
/// assert!(secrets.verify(&AdminCredentials::new("token", "wrong")).is_err());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AdminSecrets {
    bot_token: Option<SecretDigest>,
    password: Option<SecretDigest>,
}

impl AdminSecrets {
    /// Hash the configured plaintext secrets, zeroising the inputs.
    pub fn from_plaintext(bot_token: Option<String>, password: Option<String>) -> Self {
        let hash = |secret: Option<String>| {
            secret
                .map(Zeroizing::new)
                .filter(|value| !value.is_empty())
                .map(|value| digest(value.as_str()))
        };
        Self {
            bot_token: hash(bot_token),
            password: hash(password),
        }
    }

    /// Whether both secrets are configured.
    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.password.is_some()
    }

    /// Check a presented credential pair.
    ///
    /// Both digests are always compared so the work done does not depend on
    /// which secret mismatched.
    pub fn verify(&self, credentials: &AdminCredentials) -> Result<AdminGrant, Error> {
        let presented_token = digest(credentials.bot_token.as_str());
        let presented_password = digest(credentials.password.as_str());

        let token_ok = self
            .bot_token
            .as_ref()
            .map(|expected| digests_match(expected, &presented_token));
        let password_ok = self
            .password
            .as_ref()
            .map(|expected| digests_match(expected, &presented_password));

        match (token_ok, password_ok) {
            (Some(true), Some(true)) => Ok(AdminGrant { _verified: () }),
            (None, _) | (_, None) => {
                warn!("deposit rejected: admin secrets are not configured");
                Err(Error::unauthorized(UNAUTHORIZED_MESSAGE))
            }
            _ => {
                warn!("deposit rejected: credential mismatch");
                Err(Error::unauthorized(UNAUTHORIZED_MESSAGE))
            }
        }
    }
}

impl std::fmt::Debug for AdminSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSecrets")
            .field("bot_token_configured", &self.bot_token.is_some())
            .field("password_configured", &self.password.is_some())
            .finish()
    }
}

#[cfg(test)]
impl AdminGrant {
    /// Mint a grant without a credential check, for service tests.
    pub(crate) fn for_tests() -> Self {
        Self { _verified: () }
    }
}
