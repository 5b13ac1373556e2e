//! Users, roles, and the viewer identity handed to the view engine.

use super::{BoardDomainError, ParseEnumError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Role granted to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Creates, edits, assigns, and deletes any task.
    Admin,
    /// Sees and updates only the tasks assigned to them.
    Client,
}

impl UserRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Client => "client",
        }
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseEnumError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "client" => Ok(Self::Client),
            _ => Err(ParseEnumError::new("user role", value)),
        }
    }
}

/// Validated input for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
    role: UserRole,
}

impl NewUser {
    /// Creates validated user input.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyUserName`] for a blank name and
    /// [`BoardDomainError::InvalidEmail`] for a malformed address.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, BoardDomainError> {
        Ok(Self {
            name: normalize_name(name.into())?,
            email: normalize_email(email.into())?,
            role,
        })
    }

    /// Returns the normalized email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A person who can sign in to the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: UserRole,
    created_at: DateTime<Utc>,
}

impl User {
    /// Registers a new user.
    #[must_use]
    pub fn create(new_user: NewUser, clock: &impl Clock) -> Self {
        Self {
            id: UserId::new(),
            name: new_user.name,
            email: new_user.email,
            role: new_user.role,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a user from persisted fields already validated into a
    /// [`NewUser`].
    #[must_use]
    pub fn from_persisted(
        id: UserId,
        new_user: NewUser,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: new_user.name,
            email: new_user.email,
            role: new_user.role,
            created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` for client users.
    #[must_use]
    pub fn is_client(&self) -> bool {
        self.role == UserRole::Client
    }

    /// Returns the identity this user acts under.
    #[must_use]
    pub fn viewer(&self) -> Viewer {
        Viewer::new(self.id.clone(), self.role)
    }
}

/// Identity of the acting user, as supplied by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Viewer {
    user_id: UserId,
    role: UserRole,
}

impl Viewer {
    /// Creates a viewer identity.
    #[must_use]
    pub const fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the acting user's role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns `true` for administrators.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

fn normalize_name(name: String) -> Result<String, BoardDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyUserName);
    }
    Ok(trimmed.to_owned())
}

fn normalize_email(email: String) -> Result<String, BoardDomainError> {
    let trimmed = email.trim();
    let is_valid = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        })
        && !trimmed.chars().any(char::is_whitespace);
    if !is_valid {
        return Err(BoardDomainError::InvalidEmail(email));
    }
    Ok(trimmed.to_owned())
}
