//! Domain layer - Core business logic and entities

pub mod auth;
pub mod club;
pub mod error;
pub mod invite;
pub mod storage;
pub mod team;

pub use auth::{ClubSession, MagicLink, MagicToken, Mailer, SessionStore, SessionToken};
pub use club::{Club, ClubId, ClubMember, ClubMemberId};
pub use error::DomainError;
pub use invite::{Invite, InviteId, InviteState};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use team::{AccountId, Member, MemberId, Team, TeamId, TeamRole};
