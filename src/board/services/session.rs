//! Sign-in state: who is acting, remembered across restarts.

use crate::board::{
    domain::{User, Viewer},
    ports::{Collection, RecordStore, StoreError},
    records::{RecordError, SessionRecord},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by [`SessionService`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// No user is registered under the email address.
    #[error("no user registered with email {0}")]
    UnknownEmail(String),

    /// The operation needs a signed-in user.
    #[error("no user is signed in")]
    NotSignedIn,

    /// The session record could not be read or written.
    #[error(transparent)]
    Persistence(#[from] StoreError),

    /// The session record could not be encoded.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Tracks the signed-in viewer and persists it in the session collection.
///
/// Sign-in is identification only: the email address selects a registered
/// user and there is no credential check.
pub struct SessionService<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    current: Option<Viewer>,
}

impl<S, C> SessionService<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    /// Creates a signed-out session.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            current: None,
        }
    }

    /// Restores the persisted sign-in, if it still names a registered user.
    ///
    /// A malformed or stale session record is ignored and the session stays
    /// signed out.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Persistence`] when the record cannot be read.
    pub async fn restore(&mut self, users: &[User]) -> Result<Option<&Viewer>, SessionError> {
        let stored = self.store.load(Collection::Session).await?;
        self.current = stored.into_iter().next().and_then(|value| {
            SessionRecord::decode(value)
                .inspect_err(|err| tracing::warn!(error = %err, "ignoring malformed session"))
                .ok()
                .and_then(|record| {
                    let user = users.iter().find(|user| *user.id() == record.user_id);
                    if user.is_none() {
                        tracing::warn!(user_id = %record.user_id, "ignoring session for unknown user");
                    }
                    user.map(User::viewer)
                })
        });
        Ok(self.current.as_ref())
    }

    /// Signs in the user registered under `email`, compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownEmail`] when no user matches, or a
    /// persistence error when the sign-in cannot be saved. The session is
    /// signed in either way once a user matched.
    pub async fn login(&mut self, users: &[User], email: &str) -> Result<Viewer, SessionError> {
        let needle = email.trim();
        let user = users
            .iter()
            .find(|user| user.email().eq_ignore_ascii_case(needle))
            .ok_or_else(|| SessionError::UnknownEmail(needle.to_owned()))?;
        let viewer = user.viewer();
        self.current = Some(viewer.clone());
        tracing::info!(user_id = %user.id(), role = user.role().as_str(), "signed in");

        let record = SessionRecord {
            user_id: user.id().clone(),
            signed_in_at: self.clock.utc(),
        };
        self.store
            .save(Collection::Session, &[record.encode()?])
            .await?;
        Ok(viewer)
    }

    /// Signs out and clears the persisted sign-in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Persistence`] when the cleared session cannot
    /// be saved.
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        if let Some(viewer) = self.current.take() {
            tracing::info!(user_id = %viewer.user_id(), "signed out");
        }
        self.store.save(Collection::Session, &[]).await?;
        Ok(())
    }

    /// Returns the signed-in viewer.
    #[must_use]
    pub const fn current(&self) -> Option<&Viewer> {
        self.current.as_ref()
    }

    /// Returns the signed-in viewer or fails when signed out.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotSignedIn`] when nobody is signed in.
    pub fn require(&self) -> Result<&Viewer, SessionError> {
        self.current.as_ref().ok_or(SessionError::NotSignedIn)
    }
}
