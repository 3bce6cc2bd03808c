//! Session and user identity.
//!
//! An [`Identity`] is an immutable snapshot of the session, user, and
//! anonymous identifiers attached to every event. The client never mutates
//! one in place: session transitions (`start_session`, login, logout)
//! produce a fresh instance and the held reference is swapped wholesale,
//! so concurrent event builders always read a consistent snapshot.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Error, Result};

/// Prefix for generated anonymous identifiers.
const ANONYMOUS_PREFIX: &str = "anonymous_";

/// Immutable session/user/anonymous identifier snapshot.
///
/// Invariants, enforced at construction:
/// - `session_id` is non-empty
/// - at least one of `user_id` / `anonymous_id` is present and non-empty
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Current session identifier. Regenerated on session start, login,
    /// and logout.
    pub session_id: String,
    /// Authenticated user identifier, if any.
    pub user_id: Option<String>,
    /// Generated anonymous identifier, used when no user id is available.
    pub anonymous_id: Option<String>,
}

impl Identity {
    /// Create an identity, validating the mandatory-field invariants.
    pub fn new(
        session_id: impl Into<String>,
        user_id: Option<String>,
        anonymous_id: Option<String>,
    ) -> Result<Self> {
        let session_id = session_id.into();
        if session_id.is_empty() {
            return Err(Error::Validation("sessionId is mandatory".to_string()));
        }

        let user_id = user_id.filter(|id| !id.is_empty());
        let anonymous_id = anonymous_id.filter(|id| !id.is_empty());
        if user_id.is_none() && anonymous_id.is_none() {
            return Err(Error::Validation(
                "either userId or anonymousId must be provided".to_string(),
            ));
        }

        Ok(Self {
            session_id,
            user_id,
            anonymous_id,
        })
    }

    /// Start building an identity fluently.
    pub fn builder() -> IdentityBuilder {
        IdentityBuilder::default()
    }

    /// Same identifiers under a freshly generated session id.
    pub fn with_new_session(&self) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id: self.user_id.clone(),
            anonymous_id: self.anonymous_id.clone(),
        }
    }

    /// New session bound to an authenticated user; anonymous id is cleared.
    pub fn with_login(&self, user_id: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id: Some(user_id.into()),
            anonymous_id: None,
        }
    }

    /// New anonymous session; user id is cleared and a prefixed anonymous
    /// id is generated.
    pub fn with_logout(&self) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id: None,
            anonymous_id: Some(format!("{ANONYMOUS_PREFIX}{}", Uuid::new_v4())),
        }
    }
}

/// Fluent builder for [`Identity`].
///
/// Validation happens once, in [`IdentityBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct IdentityBuilder {
    session_id: Option<String>,
    user_id: Option<String>,
    anonymous_id: Option<String>,
}

impl IdentityBuilder {
    /// Set the session identifier.
    #[must_use]
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set the authenticated user identifier.
    #[must_use]
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set the anonymous identifier.
    #[must_use]
    pub fn anonymous_id(mut self, anonymous_id: impl Into<String>) -> Self {
        self.anonymous_id = Some(anonymous_id.into());
        self
    }

    /// Validate and construct the [`Identity`].
    pub fn build(self) -> Result<Identity> {
        Identity::new(
            self.session_id.unwrap_or_default(),
            self.user_id,
            self.anonymous_id,
        )
    }
}
