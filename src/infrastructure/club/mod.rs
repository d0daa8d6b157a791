//! Club infrastructure

mod repository;
mod service;

pub use repository::{StorageClubMemberRepository, StorageClubRepository};
pub use service::{
    ClubService, CreateClubRequest, RegisterMemberRequest, UpdateClubRequest, UpdateMemberRequest,
};
