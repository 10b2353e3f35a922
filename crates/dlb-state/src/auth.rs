//! # Session and Mock Authentication
//!
//! A [`Session`] holds the current user, or nobody. It is an explicit
//! value passed to whatever needs it; there is no process-global slot.
//!
//! [`AuthService::login()`] simulates a remote round-trip with a fixed
//! delay, then matches the email case-insensitively against the catalog's
//! users. Any non-blank password is accepted.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use dlb_catalog::Catalog;
use dlb_core::User;

use crate::error::AuthError;

/// Authentication settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Simulated network latency before a login completes.
    #[serde(with = "millis")]
    pub login_delay: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_delay: Duration::from_millis(1000),
        }
    }
}

impl AuthConfig {
    /// Config with no login delay.
    pub fn instant() -> Self {
        Self {
            login_delay: Duration::ZERO,
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis().try_into().unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// The signed-in user, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// An unauthenticated session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The signed-in user, or [`AuthError::NotAuthenticated`].
    pub fn require_user(&self) -> Result<&User, AuthError> {
        self.user.as_ref().ok_or(AuthError::NotAuthenticated)
    }
}

/// Mock authentication against the catalog's user list.
#[derive(Debug, Clone)]
pub struct AuthService {
    catalog: Arc<Catalog>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(catalog: Arc<Catalog>, config: AuthConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Sign in by email.
    ///
    /// On success the session holds the matched user. On failure the
    /// session is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredentials`] if either field is blank. Returned
    ///   immediately, without the simulated delay.
    /// - [`AuthError::InvalidCredentials`] if no user has this email.
    pub async fn login(
        &self,
        session: &mut Session,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        if !self.config.login_delay.is_zero() {
            tokio::time::sleep(self.config.login_delay).await;
        }

        match self.catalog.user_by_email(email) {
            Some(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "login succeeded");
                session.user = Some(user.clone());
                Ok(user.clone())
            }
            None => {
                tracing::warn!(email = %email.trim(), "login failed: unknown email");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Clear the session. Logging out an anonymous session is a no-op.
    pub fn logout(&self, session: &mut Session) {
        if let Some(user) = session.user.take() {
            tracing::info!(user_id = %user.id, "logged out");
        }
    }
}
