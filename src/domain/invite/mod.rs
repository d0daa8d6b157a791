//! Invite domain module
//!
//! An invite converts a shareable token into team membership, bounded by a
//! remaining-uses counter and an optional absolute expiry. Exhausted and
//! expired invites persist but are rejected on use.

mod entity;
mod repository;
mod validation;

pub use entity::{Invite, InviteId, InviteState};
pub use repository::InviteRepository;
pub use validation::{
    resolve_uses_left, resolve_valid_until, validate_note, InviteValidationError,
};
