//! Club auth domain module
//!
//! Passwordless authentication for club members: a single-use emailed magic
//! link is traded for a long-lived session. Both credentials are guarded by
//! absolute expiry timestamps; the magic link is deleted on redemption.

mod entity;
mod repository;

pub use entity::{AuthTokenError, ClubSession, MagicLink, MagicToken, SessionToken};
pub use repository::{Mailer, MagicLinkRepository, SessionRepository, SessionStore};
