//! Team infrastructure

mod repository;
mod service;

pub use repository::{StorageMemberRepository, StorageTeamRepository};
pub use service::{CreateTeamRequest, TeamService, UpdateTeamRequest};
