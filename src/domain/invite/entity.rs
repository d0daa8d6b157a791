//! Invite entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_uuid, InviteValidationError};
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::TeamId;

/// Invite identifier - UUID backed, distinct from the shareable token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InviteId(String);

impl InviteId {
    /// Create a new InviteId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, InviteValidationError> {
        let id = id.into();
        validate_uuid(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random InviteId
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for InviteId {
    type Error = InviteValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InviteId> for String {
    fn from(id: InviteId) -> Self {
        id.0
    }
}

impl std::fmt::Display for InviteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for InviteId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Derived invite state
///
/// Not stored; computed from the counters and the clock. `Exhausted` and
/// `Expired` are terminal for acceptance but the record itself survives
/// until an admin deletes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteState {
    /// Has uses left and is not past its expiry
    Active,
    /// No uses left
    Exhausted,
    /// Past its expiry timestamp
    Expired,
}

/// Invite entity - shareable, rate-limited, time-limited team admission token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invite {
    /// Unique identifier
    id: InviteId,
    /// Team this invite admits to
    team_id: TeamId,
    /// Shareable redemption token
    token: String,
    /// Remaining uses
    uses_left: u32,
    /// Successful redemptions so far
    uses_used: u32,
    /// Free-text note for admins
    note: String,
    /// Expiry timestamp (None = never expires)
    #[serde(skip_serializing_if = "Option::is_none")]
    valid_until: Option<DateTime<Utc>>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl Invite {
    /// Create a new invite with a fresh counter
    pub fn new(team_id: TeamId, token: impl Into<String>, uses_left: u32) -> Self {
        let now = Utc::now();

        Self {
            id: InviteId::generate(),
            team_id,
            token: token.into(),
            uses_left,
            uses_used: 0,
            note: String::new(),
            valid_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set note (builder pattern)
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Set expiry (builder pattern)
    pub fn with_valid_until(mut self, valid_until: Option<DateTime<Utc>>) -> Self {
        self.valid_until = valid_until;
        self
    }

    // Getters

    pub fn id(&self) -> &InviteId {
        &self.id
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn uses_left(&self) -> u32 {
        self.uses_left
    }

    pub fn uses_used(&self) -> u32 {
        self.uses_used
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn valid_until(&self) -> Option<DateTime<Utc>> {
        self.valid_until
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // State

    /// Derive the current state from counters and clock
    pub fn state(&self) -> InviteState {
        if self.uses_left == 0 {
            return InviteState::Exhausted;
        }

        if let Some(valid_until) = self.valid_until {
            if Utc::now() >= valid_until {
                return InviteState::Expired;
            }
        }

        InviteState::Active
    }

    /// Check if the invite can currently be redeemed
    ///
    /// Pure function of persisted state and the clock; no side effects.
    pub fn is_valid(&self) -> bool {
        self.state() == InviteState::Active
    }

    // Mutators

    /// Record a redemption: decrement `uses_left`, increment `uses_used`.
    ///
    /// Returns false without mutating anything if no uses remain. Callers
    /// must apply this inside a single atomic storage mutation so that two
    /// concurrent redemptions of the last use cannot both succeed.
    pub fn record_use(&mut self) -> bool {
        if self.uses_left == 0 {
            return false;
        }

        self.uses_left -= 1;
        self.uses_used += 1;
        self.touch();
        true
    }

    /// Return a previously recorded use, the inverse of
    /// [`record_use`](Self::record_use).
    ///
    /// Applied when a write that must follow the decrement fails and the
    /// redemption has to be rolled back.
    pub fn restore_use(&mut self) {
        self.uses_left += 1;
        self.uses_used = self.uses_used.saturating_sub(1);
        self.touch();
    }

    /// Update the remaining uses
    pub fn set_uses_left(&mut self, uses_left: u32) {
        self.uses_left = uses_left;
        self.touch();
    }

    /// Update the note
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
        self.touch();
    }

    /// Update the expiry
    pub fn set_valid_until(&mut self, valid_until: Option<DateTime<Utc>>) {
        self.valid_until = valid_until;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Invite {
    type Key = InviteId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
