//! Infrastructure layer: storage, repositories, services and collaborators

pub mod auth;
pub mod club;
pub mod invite;
pub mod logging;
pub mod storage;
pub mod team;
pub mod token;
