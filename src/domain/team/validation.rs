//! Team validation

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Identifier is not a valid UUID")]
    InvalidUuid,

    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Team description cannot exceed {0} characters")]
    DescriptionTooLong(usize),
}

const MAX_TEAM_NAME_LENGTH: usize = 100;
const MAX_TEAM_DESCRIPTION_LENGTH: usize = 1000;

/// Validate a UUID-backed identifier
pub fn validate_uuid(id: &str) -> Result<(), TeamValidationError> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| TeamValidationError::InvalidUuid)
}

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.len() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a team description
pub fn validate_team_description(description: &str) -> Result<(), TeamValidationError> {
    if description.len() > MAX_TEAM_DESCRIPTION_LENGTH {
        return Err(TeamValidationError::DescriptionTooLong(
            MAX_TEAM_DESCRIPTION_LENGTH,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
    }

    #[test]
    fn test_invalid_uuid() {
        assert_eq!(validate_uuid(""), Err(TeamValidationError::InvalidUuid));
        assert_eq!(
            validate_uuid("not-a-uuid"),
            Err(TeamValidationError::InvalidUuid)
        );
    }

    #[test]
    fn test_valid_team_name() {
        assert!(validate_team_name("My Team").is_ok());
        assert!(validate_team_name("Team with spaces & symbols!").is_ok());
    }

    #[test]
    fn test_empty_team_name() {
        assert_eq!(validate_team_name(""), Err(TeamValidationError::EmptyName));
        assert_eq!(
            validate_team_name("   "),
            Err(TeamValidationError::EmptyName)
        );
    }

    #[test]
    fn test_team_name_too_long() {
        let long_name = "a".repeat(101);
        assert_eq!(
            validate_team_name(&long_name),
            Err(TeamValidationError::NameTooLong(100))
        );
    }

    #[test]
    fn test_description_too_long() {
        let long = "a".repeat(1001);
        assert_eq!(
            validate_team_description(&long),
            Err(TeamValidationError::DescriptionTooLong(1000))
        );
    }
}
