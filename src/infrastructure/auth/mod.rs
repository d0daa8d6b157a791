//! Club auth infrastructure

pub(crate) mod mailer;
mod repository;
mod service;
mod session_store;

pub use mailer::TracingMailer;
pub use repository::{StorageMagicLinkRepository, StorageSessionRepository};
pub use service::ClubAuthService;
pub use session_store::InMemorySessionStore;
