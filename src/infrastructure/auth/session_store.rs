//! In-memory session store

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::auth::{SessionStore, SessionToken};
use crate::domain::club::{ClubId, ClubMemberId};

/// Thread-safe in-memory SessionStore implementation
///
/// Stands in for whatever client-side state the hosting environment uses
/// (signed cookie, server-side session table). One entry per (club, member)
/// pair.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<(String, String), SessionToken>>,
}

impl InMemorySessionStore {
    /// Create a new empty session store
    pub fn new() -> Self {
        Self::default()
    }

    fn key(club_id: &ClubId, member_id: &ClubMemberId) -> (String, String) {
        (club_id.as_str().to_string(), member_id.as_str().to_string())
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, club_id: &ClubId, member_id: &ClubMemberId) -> Option<SessionToken> {
        let entries = self.entries.read().ok()?;
        entries.get(&Self::key(club_id, member_id)).cloned()
    }

    fn set(&self, club_id: &ClubId, member_id: &ClubMemberId, token: SessionToken) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(Self::key(club_id, member_id), token);
        }
    }

    fn remove(&self, club_id: &ClubId, member_id: &ClubMemberId) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(&Self::key(club_id, member_id));
        }
    }
}
