//! Club domain module
//!
//! Club members are external people without accounts. They authenticate via
//! emailed magic links (see the auth module) rather than passwords.

mod entity;
mod repository;
mod validation;

pub use entity::{Club, ClubId, ClubMember, ClubMemberContact, ClubMemberId};
pub use repository::{ClubMemberRepository, ClubRepository};
pub use validation::{
    validate_club_name, validate_email, validate_member_name, ClubValidationError,
};
