//! Team domain module
//!
//! Teams are the tenant boundary: every invite and membership belongs to a
//! team. A team is created with exactly one owner and keeps at least one
//! member for as long as it exists.

mod entity;
mod repository;
mod validation;

pub use entity::{AccountId, Member, MemberId, Team, TeamId, TeamRole};
pub use repository::{MemberRepository, TeamRepository};
pub use validation::{
    validate_team_description, validate_team_name, validate_uuid, TeamValidationError,
};
