//! Club and club member entities
//!
//! Clubs are separate from teams: their members are external people reached
//! by email, without accounts of their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    validate_club_name, validate_email, validate_member_name, validate_uuid, ClubValidationError,
};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Club identifier - UUID backed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClubId(String);

impl ClubId {
    /// Create a new ClubId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, ClubValidationError> {
        let id = id.into();
        validate_uuid(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random ClubId
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClubId {
    type Error = ClubValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClubId> for String {
    fn from(id: ClubId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ClubId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ClubId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Club member identifier - UUID backed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClubMemberId(String);

impl ClubMemberId {
    pub fn new(id: impl Into<String>) -> Result<Self, ClubValidationError> {
        let id = id.into();
        validate_uuid(&id)?;
        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClubMemberId {
    type Error = ClubValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClubMemberId> for String {
    fn from(id: ClubMemberId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ClubMemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ClubMemberId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Club entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Club {
    /// Unique identifier
    id: ClubId,
    /// Display name
    name: String,
    /// Description, shown on the login page
    description: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl Club {
    /// Create a new club
    pub fn new(id: ClubId, name: impl Into<String>) -> Result<Self, ClubValidationError> {
        let name = name.into();
        validate_club_name(&name)?;
        let now = Utc::now();

        Ok(Self {
            id,
            name,
            description: String::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Set description (builder pattern)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    // Getters

    pub fn id(&self) -> &ClubId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Update the name
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ClubValidationError> {
        let name = name.into();
        validate_club_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    /// Update the description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Club {
    type Key = ClubId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Contact and note fields of a club member, updatable as a block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClubMemberContact {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub notes: String,
}

/// Club member entity - unique per (club, email)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubMember {
    /// Unique identifier
    id: ClubMemberId,
    /// Club this member belongs to
    club_id: ClubId,
    /// Email address, lowercased; unique within the club
    email: String,
    /// First name
    first_name: String,
    /// Last name
    last_name: String,
    /// Contact fields
    #[serde(default)]
    contact: ClubMemberContact,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl ClubMember {
    /// Create a new club member
    pub fn new(
        club_id: ClubId,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, ClubValidationError> {
        let email = email.into().to_lowercase();
        validate_email(&email)?;

        let first_name = first_name.into();
        validate_member_name(&first_name)?;

        let last_name = last_name.into();
        validate_member_name(&last_name)?;

        let now = Utc::now();

        Ok(Self {
            id: ClubMemberId::generate(),
            club_id,
            email,
            first_name,
            last_name,
            contact: ClubMemberContact::default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Set contact fields (builder pattern)
    pub fn with_contact(mut self, contact: ClubMemberContact) -> Self {
        self.contact = contact;
        self
    }

    // Getters

    pub fn id(&self) -> &ClubMemberId {
        &self.id
    }

    pub fn club_id(&self) -> &ClubId {
        &self.club_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn contact(&self) -> &ClubMemberContact {
        &self.contact
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Update the email address
    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), ClubValidationError> {
        let email = email.into().to_lowercase();
        validate_email(&email)?;
        self.email = email;
        self.touch();
        Ok(())
    }

    /// Update the first name
    pub fn set_first_name(&mut self, name: impl Into<String>) -> Result<(), ClubValidationError> {
        let name = name.into();
        validate_member_name(&name)?;
        self.first_name = name;
        self.touch();
        Ok(())
    }

    /// Update the last name
    pub fn set_last_name(&mut self, name: impl Into<String>) -> Result<(), ClubValidationError> {
        let name = name.into();
        validate_member_name(&name)?;
        self.last_name = name;
        self.touch();
        Ok(())
    }

    /// Update the contact fields
    pub fn set_contact(&mut self, contact: ClubMemberContact) {
        self.contact = contact;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for ClubMember {
    type Key = ClubMemberId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
