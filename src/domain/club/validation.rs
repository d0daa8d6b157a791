//! Club validation

use thiserror::Error;

/// Errors that can occur during club validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClubValidationError {
    #[error("Identifier is not a valid UUID")]
    InvalidUuid,

    #[error("Club name cannot be empty")]
    EmptyName,

    #[error("Club name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("Member name cannot be empty")]
    EmptyMemberName,

    #[error("Field cannot exceed {0} characters")]
    FieldTooLong(usize),
}

const MAX_CLUB_NAME_LENGTH: usize = 50;
const MAX_FIELD_LENGTH: usize = 50;

/// Validate a UUID-backed identifier
pub fn validate_uuid(id: &str) -> Result<(), ClubValidationError> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| ClubValidationError::InvalidUuid)
}

/// Validate a club name
pub fn validate_club_name(name: &str) -> Result<(), ClubValidationError> {
    if name.trim().is_empty() {
        return Err(ClubValidationError::EmptyName);
    }

    if name.len() > MAX_CLUB_NAME_LENGTH {
        return Err(ClubValidationError::NameTooLong(MAX_CLUB_NAME_LENGTH));
    }

    Ok(())
}

/// Validate an email address
///
/// Deliberately loose: one '@' with a non-empty local part and a domain
/// containing a dot. Deliverability is the mailer's problem.
pub fn validate_email(email: &str) -> Result<(), ClubValidationError> {
    let invalid = || ClubValidationError::InvalidEmail(email.to_string());

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;

    if local.is_empty() || domain.len() < 3 || !domain.contains('.') || domain.contains('@') {
        return Err(invalid());
    }

    Ok(())
}

/// Validate a member's first or last name
pub fn validate_member_name(name: &str) -> Result<(), ClubValidationError> {
    if name.trim().is_empty() {
        return Err(ClubValidationError::EmptyMemberName);
    }

    if name.len() > MAX_FIELD_LENGTH {
        return Err(ClubValidationError::FieldTooLong(MAX_FIELD_LENGTH));
    }

    Ok(())
}
