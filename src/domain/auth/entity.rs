//! Magic link and session credentials

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::club::{ClubId, ClubMemberId};
use crate::domain::storage::{StorageEntity, StorageKey};
use thiserror::Error;

/// Errors for credential token handling
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthTokenError {
    #[error("Token cannot be empty")]
    EmptyToken,
}

/// Magic link token - opaque, single-use
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MagicToken(String);

impl MagicToken {
    /// Wrap a generated token string
    pub fn new(token: impl Into<String>) -> Result<Self, AuthTokenError> {
        let token = token.into();
        if token.is_empty() {
            return Err(AuthTokenError::EmptyToken);
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MagicToken {
    type Error = AuthTokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MagicToken> for String {
    fn from(token: MagicToken) -> Self {
        token.0
    }
}

impl std::fmt::Display for MagicToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for MagicToken {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Session token - opaque, long-lived
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a generated token string
    pub fn new(token: impl Into<String>) -> Result<Self, AuthTokenError> {
        let token = token.into();
        if token.is_empty() {
            return Err(AuthTokenError::EmptyToken);
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionToken {
    type Error = AuthTokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for SessionToken {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Single-use emailed login credential
///
/// Redemption deletes the record; an expired link stays inert until the
/// parent member is deleted (cascade handled by the owning service).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagicLink {
    /// Unique credential token
    token: MagicToken,
    /// Owning member
    member_id: ClubMemberId,
    /// Club of the owning member
    club_id: ClubId,
    /// Absolute expiry
    valid_until: DateTime<Utc>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl MagicLink {
    /// Create a new magic link
    pub fn new(
        token: MagicToken,
        member_id: ClubMemberId,
        club_id: ClubId,
        valid_until: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            member_id,
            club_id,
            valid_until,
            created_at: Utc::now(),
        }
    }

    pub fn token(&self) -> &MagicToken {
        &self.token
    }

    pub fn member_id(&self) -> &ClubMemberId {
        &self.member_id
    }

    pub fn club_id(&self) -> &ClubId {
        &self.club_id
    }

    pub fn valid_until(&self) -> DateTime<Utc> {
        self.valid_until
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check if the link is past its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.valid_until
    }

    /// Check if the link can be redeemed by the given member
    pub fn is_redeemable_by(&self, member_id: &ClubMemberId) -> bool {
        &self.member_id == member_id && !self.is_expired()
    }
}

impl StorageEntity for MagicLink {
    type Key = MagicToken;

    fn key(&self) -> &Self::Key {
        &self.token
    }
}

/// Long-lived credential created only by magic-link redemption
///
/// A member may hold several concurrent sessions (one per device); the
/// session store maps each client's (club, member) pair to one of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubSession {
    /// Unique credential token
    token: SessionToken,
    /// Owning member
    member_id: ClubMemberId,
    /// Club of the owning member
    club_id: ClubId,
    /// Absolute expiry
    valid_until: DateTime<Utc>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl ClubSession {
    /// Create a new session
    pub fn new(
        token: SessionToken,
        member_id: ClubMemberId,
        club_id: ClubId,
        valid_until: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            member_id,
            club_id,
            valid_until,
            created_at: Utc::now(),
        }
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn member_id(&self) -> &ClubMemberId {
        &self.member_id
    }

    pub fn club_id(&self) -> &ClubId {
        &self.club_id
    }

    pub fn valid_until(&self) -> DateTime<Utc> {
        self.valid_until
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check if the session is past its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.valid_until
    }
}

impl StorageEntity for ClubSession {
    type Key = SessionToken;

    fn key(&self) -> &Self::Key {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn magic_link(valid_for: Duration) -> (MagicLink, ClubMemberId) {
        let member_id = ClubMemberId::generate();
        let link = MagicLink::new(
            MagicToken::new("mlk_test").unwrap(),
            member_id.clone(),
            ClubId::generate(),
            Utc::now() + valid_for,
        );
        (link, member_id)
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(MagicToken::new("").is_err());
        assert!(SessionToken::new("").is_err());
    }

    #[test]
    fn test_magic_link_redeemable() {
        let (link, member_id) = magic_link(Duration::days(7));

        assert!(!link.is_expired());
        assert!(link.is_redeemable_by(&member_id));
    }

    #[test]
    fn test_magic_link_expired() {
        let (link, member_id) = magic_link(Duration::hours(-1));

        assert!(link.is_expired());
        assert!(!link.is_redeemable_by(&member_id));
    }

    #[test]
    fn test_magic_link_wrong_member() {
        let (link, _) = magic_link(Duration::days(7));

        assert!(!link.is_redeemable_by(&ClubMemberId::generate()));
    }

    #[test]
    fn test_session_expiry() {
        let session = ClubSession::new(
            SessionToken::new("ses_test").unwrap(),
            ClubMemberId::generate(),
            ClubId::generate(),
            Utc::now() + Duration::days(180),
        );
        assert!(!session.is_expired());

        let expired = ClubSession::new(
            SessionToken::new("ses_old").unwrap(),
            ClubMemberId::generate(),
            ClubId::generate(),
            Utc::now() - Duration::seconds(1),
        );
        assert!(expired.is_expired());
    }
}
