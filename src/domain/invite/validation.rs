//! Invite input validation and encoding rules

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// Errors that can occur during invite validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InviteValidationError {
    #[error("Identifier is not a valid UUID")]
    InvalidUuid,

    #[error("Invite token cannot be empty")]
    EmptyToken,

    #[error("Invite note cannot exceed {0} characters")]
    NoteTooLong(usize),

    #[error("Invite uses cannot exceed {0}")]
    TooManyUses(u32),
}

const MAX_NOTE_LENGTH: usize = 200;
const MAX_USES: u32 = 1_000_000;

/// Validate a UUID-backed identifier
pub fn validate_uuid(id: &str) -> Result<(), InviteValidationError> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| InviteValidationError::InvalidUuid)
}

/// Validate an invite note
pub fn validate_note(note: &str) -> Result<(), InviteValidationError> {
    if note.len() > MAX_NOTE_LENGTH {
        return Err(InviteValidationError::NoteTooLong(MAX_NOTE_LENGTH));
    }

    Ok(())
}

/// Resolve a requested `uses_left` value against the configured default.
///
/// `None` and negative values are the "use the default" sentinel; zero and
/// positive values are taken as-is (zero produces an invite that is already
/// exhausted, which the admin UI uses to park an invite).
pub fn resolve_uses_left(
    requested: Option<i64>,
    default_uses: u32,
) -> Result<u32, InviteValidationError> {
    let uses = match requested {
        None => default_uses,
        Some(n) if n < 0 => default_uses,
        Some(n) => {
            u32::try_from(n).map_err(|_| InviteValidationError::TooManyUses(MAX_USES))?
        }
    };

    if uses > MAX_USES {
        return Err(InviteValidationError::TooManyUses(MAX_USES));
    }

    Ok(uses)
}

/// Resolve a `days_valid` request into an absolute expiry timestamp.
///
/// Negative means the invite never expires, zero applies the configured
/// default window, positive means that many days (fractional allowed) from
/// `now`.
pub fn resolve_valid_until(
    days_valid: f64,
    default_days: f64,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let days = if days_valid == 0.0 {
        default_days
    } else {
        days_valid
    };

    if days < 0.0 {
        return None;
    }

    Some(now + Duration::milliseconds((days * 86_400_000.0) as i64))
}
