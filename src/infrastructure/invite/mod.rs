//! Invite infrastructure

mod repository;
mod service;

pub use repository::StorageInviteRepository;
pub use service::{CreateInviteRequest, InviteService, UpdateInviteRequest};
