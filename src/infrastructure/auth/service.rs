//! Passwordless club login flow

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info};

use crate::config::ClubAuthConfig;
use crate::domain::auth::{
    ClubSession, MagicLink, MagicLinkRepository, MagicToken, Mailer, SessionRepository,
    SessionStore, SessionToken,
};
use crate::domain::club::{ClubId, ClubMemberId, ClubMemberRepository, ClubRepository};
use crate::domain::DomainError;
use crate::infrastructure::token::TokenGenerator;

fn days(days: f64) -> Duration {
    Duration::milliseconds((days * 86_400_000.0) as i64)
}

/// Club auth service: magic-link issuance, redemption and session checks
pub struct ClubAuthService {
    clubs: Arc<dyn ClubRepository>,
    members: Arc<dyn ClubMemberRepository>,
    links: Arc<dyn MagicLinkRepository>,
    sessions: Arc<dyn SessionRepository>,
    mailer: Arc<dyn Mailer>,
    magic_tokens: TokenGenerator,
    session_tokens: TokenGenerator,
    config: ClubAuthConfig,
}

impl ClubAuthService {
    /// Create a new club auth service
    pub fn new(
        clubs: Arc<dyn ClubRepository>,
        members: Arc<dyn ClubMemberRepository>,
        links: Arc<dyn MagicLinkRepository>,
        sessions: Arc<dyn SessionRepository>,
        mailer: Arc<dyn Mailer>,
        config: ClubAuthConfig,
    ) -> Self {
        Self {
            clubs,
            members,
            links,
            sessions,
            mailer,
            magic_tokens: TokenGenerator::magic_link(),
            session_tokens: TokenGenerator::session(),
            config,
        }
    }

    /// Create a magic link for a club member and mail it to them.
    ///
    /// Fails with `NotFound` when no member with that address is registered
    /// in the club. Outstanding links are not invalidated; several may
    /// coexist until redeemed or expired.
    pub async fn request_magic_link(&self, club_id: &str, email: &str) -> Result<(), DomainError> {
        info!(club_id = %club_id, "Magic link requested");

        let club_id = ClubId::new(club_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let club = self
            .clubs
            .get(&club_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Club '{}' not found", club_id)))?;

        let member = self
            .members
            .find_by_email(&club_id, email)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "No member with that email is registered in club '{}'",
                    club_id
                ))
            })?;

        let token = MagicToken::new(self.magic_tokens.generate())
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let link = self
            .links
            .create(MagicLink::new(
                token,
                member.id().clone(),
                club_id,
                Utc::now() + days(self.config.magic_link_valid_days),
            ))
            .await?;

        self.mailer
            .send(
                member.email(),
                &format!("Your login link for {}", club.name()),
                &format!(
                    "Hello {},\n\nuse this token to log in to {}: {}\n\nThe link expires on {}.",
                    member.first_name(),
                    club.name(),
                    link.token(),
                    link.valid_until().format("%Y-%m-%d %H:%M UTC"),
                ),
            )
            .await?;

        debug!(member_id = %member.id(), "Magic link issued");
        Ok(())
    }

    /// Check whether a magic link token permits login for a member.
    ///
    /// Pure check: the link must exist, belong to the member, and be
    /// unexpired. No state is mutated.
    pub async fn can_login_with_token(
        &self,
        member_id: &str,
        token: &str,
    ) -> Result<bool, DomainError> {
        let member_id =
            ClubMemberId::new(member_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let token = match MagicToken::new(token) {
            Ok(token) => token,
            Err(_) => return Ok(false),
        };

        Ok(self
            .links
            .get(&token)
            .await?
            .is_some_and(|link| link.is_redeemable_by(&member_id)))
    }

    /// Redeem a magic link: delete it, create a session, record it in the
    /// session store.
    ///
    /// Returns false without side effects when the link does not permit
    /// login. The link is single use; deleting it is the consumption
    /// claim, so of two concurrent redemptions of the same token only one
    /// ever reaches session creation.
    pub async fn session_login(
        &self,
        member_id: &str,
        token: &str,
        store: &dyn SessionStore,
    ) -> Result<bool, DomainError> {
        let member_id =
            ClubMemberId::new(member_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let token = match MagicToken::new(token) {
            Ok(token) => token,
            Err(_) => return Ok(false),
        };

        let link = match self.links.get(&token).await? {
            Some(link) if link.is_redeemable_by(&member_id) => link,
            _ => {
                debug!(member_id = %member_id, "Magic link refused");
                return Ok(false);
            }
        };

        // A false here means a parallel redemption already consumed the
        // link between our read and this delete
        if !self.links.delete(&token).await? {
            debug!(member_id = %member_id, "Magic link already consumed");
            return Ok(false);
        }

        let session_token = SessionToken::new(self.session_tokens.generate())
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let session = self
            .sessions
            .create(ClubSession::new(
                session_token,
                member_id.clone(),
                link.club_id().clone(),
                Utc::now() + days(self.config.session_valid_days),
            ))
            .await?;

        store.set(link.club_id(), &member_id, session.token().clone());

        info!(member_id = %member_id, club_id = %link.club_id(), "Member logged in");
        Ok(true)
    }

    /// Check whether a member holds a live session.
    ///
    /// A store entry pointing at a missing or expired session is removed
    /// (self-heal), and the expired record is deleted from storage.
    pub async fn session_is_logged_in(
        &self,
        club_id: &str,
        member_id: &str,
        store: &dyn SessionStore,
    ) -> Result<bool, DomainError> {
        let club_id = ClubId::new(club_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        let member_id =
            ClubMemberId::new(member_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let Some(token) = store.get(&club_id, &member_id) else {
            return Ok(false);
        };

        match self.sessions.get(&token).await? {
            None => {
                debug!(member_id = %member_id, "Stale session entry removed");
                store.remove(&club_id, &member_id);
                Ok(false)
            }
            Some(session) if session.is_expired() => {
                debug!(member_id = %member_id, "Expired session removed");
                self.sessions.delete(&token).await?;
                store.remove(&club_id, &member_id);
                Ok(false)
            }
            Some(_) => Ok(true),
        }
    }

    /// Log a member out: remove the store entry and delete the persisted
    /// session record if present.
    pub async fn session_logout(
        &self,
        club_id: &str,
        member_id: &str,
        store: &dyn SessionStore,
    ) -> Result<(), DomainError> {
        let club_id = ClubId::new(club_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        let member_id =
            ClubMemberId::new(member_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        if let Some(token) = store.get(&club_id, &member_id) {
            self.sessions.delete(&token).await?;
        }

        store.remove(&club_id, &member_id);

        info!(member_id = %member_id, club_id = %club_id, "Member logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::club::{Club, ClubMember};
    use crate::infrastructure::auth::mailer::RecordingMailer;
    use crate::infrastructure::auth::{
        InMemorySessionStore, StorageMagicLinkRepository, StorageSessionRepository,
    };
    use crate::infrastructure::club::{StorageClubMemberRepository, StorageClubRepository};
    use crate::infrastructure::storage::InMemoryStorage;

    struct Fixture {
        service: ClubAuthService,
        links: Arc<StorageMagicLinkRepository>,
        sessions: Arc<StorageSessionRepository>,
        mailer: Arc<RecordingMailer>,
        store: InMemorySessionStore,
        club: Club,
        member: ClubMember,
    }

    async fn fixture() -> Fixture {
        let clubs = Arc::new(StorageClubRepository::new(Arc::new(
            InMemoryStorage::<Club>::new(),
        )));
        let members = Arc::new(StorageClubMemberRepository::new(Arc::new(
            InMemoryStorage::<ClubMember>::new(),
        )));
        let links = Arc::new(StorageMagicLinkRepository::new(Arc::new(
            InMemoryStorage::<MagicLink>::new(),
        )));
        let sessions = Arc::new(StorageSessionRepository::new(Arc::new(
            InMemoryStorage::<ClubSession>::new(),
        )));
        let mailer = Arc::new(RecordingMailer::new());

        let club = clubs
            .create(Club::new(ClubId::generate(), "Chess Club").unwrap())
            .await
            .unwrap();
        let member = members
            .create(ClubMember::new(club.id().clone(), "a@example.com", "Alice", "Smith").unwrap())
            .await
            .unwrap();

        let service = ClubAuthService::new(
            clubs,
            members,
            Arc::clone(&links) as Arc<dyn MagicLinkRepository>,
            Arc::clone(&sessions) as Arc<dyn SessionRepository>,
            Arc::clone(&mailer) as Arc<dyn Mailer>,
            ClubAuthConfig::default(),
        );

        Fixture {
            service,
            links,
            sessions,
            mailer,
            store: InMemorySessionStore::new(),
            club,
            member,
        }
    }

    async fn issued_token(fx: &Fixture) -> MagicToken {
        fx.service
            .request_magic_link(fx.club.id().as_str(), "a@example.com")
            .await
            .unwrap();

        let links = fx.links.list_by_member(fx.member.id()).await.unwrap();
        links.last().unwrap().token().clone()
    }

    #[tokio::test]
    async fn test_request_magic_link_sends_mail() {
        let fx = fixture().await;

        fx.service
            .request_magic_link(fx.club.id().as_str(), "A@Example.COM")
            .await
            .unwrap();

        let sent = fx.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "a@example.com");
        assert!(sent[0].1.contains("Chess Club"));
        assert!(sent[0].2.contains("mlk_"));

        // Link expiry is ~7 days out
        let links = fx.links.list_by_member(fx.member.id()).await.unwrap();
        assert_eq!(links.len(), 1);
        let expected = Utc::now() + Duration::days(7);
        assert!((links[0].valid_until() - expected).num_seconds().abs() < 5);
    }

    #[tokio::test]
    async fn test_request_magic_link_unknown_member() {
        let fx = fixture().await;

        let result = fx
            .service
            .request_magic_link(fx.club.id().as_str(), "nobody@example.com")
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert!(fx.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_multiple_outstanding_links_coexist() {
        let fx = fixture().await;

        let first = issued_token(&fx).await;
        let second = issued_token(&fx).await;
        assert_ne!(first, second);

        // Issuing the second link did not invalidate the first
        assert!(fx
            .service
            .can_login_with_token(fx.member.id().as_str(), first.as_str())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_can_login_checks_ownership() {
        let fx = fixture().await;
        let token = issued_token(&fx).await;

        assert!(fx
            .service
            .can_login_with_token(fx.member.id().as_str(), token.as_str())
            .await
            .unwrap());

        // Someone else's member id does not match
        assert!(!fx
            .service
            .can_login_with_token(ClubMemberId::generate().as_str(), token.as_str())
            .await
            .unwrap());

        // Unknown token
        assert!(!fx
            .service
            .can_login_with_token(fx.member.id().as_str(), "mlk_unknown")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_expired_link_never_permits_login() {
        let fx = fixture().await;

        let token = MagicToken::new("mlk_expired").unwrap();
        fx.links
            .create(MagicLink::new(
                token.clone(),
                fx.member.id().clone(),
                fx.club.id().clone(),
                Utc::now() - Duration::seconds(1),
            ))
            .await
            .unwrap();

        assert!(!fx
            .service
            .can_login_with_token(fx.member.id().as_str(), token.as_str())
            .await
            .unwrap());
        assert!(!fx
            .service
            .session_login(fx.member.id().as_str(), token.as_str(), &fx.store)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_session_login_flow() {
        let fx = fixture().await;
        let token = issued_token(&fx).await;

        let logged_in = fx
            .service
            .session_login(fx.member.id().as_str(), token.as_str(), &fx.store)
            .await
            .unwrap();
        assert!(logged_in);

        // The link is gone, the session exists, the store points at it
        assert!(fx.links.get(&token).await.unwrap().is_none());

        let session_token = fx.store.get(fx.club.id(), fx.member.id()).unwrap();
        let session = fx.sessions.get(&session_token).await.unwrap().unwrap();
        assert_eq!(session.member_id(), fx.member.id());
        assert_eq!(session.club_id(), fx.club.id());

        // Session expiry is ~180 days out
        let expected = Utc::now() + Duration::days(180);
        assert!((session.valid_until() - expected).num_seconds().abs() < 5);

        assert!(fx
            .service
            .session_is_logged_in(fx.club.id().as_str(), fx.member.id().as_str(), &fx.store)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_magic_link_is_single_use() {
        let fx = fixture().await;
        let token = issued_token(&fx).await;

        assert!(fx
            .service
            .session_login(fx.member.id().as_str(), token.as_str(), &fx.store)
            .await
            .unwrap());

        // Immediately after redemption the token is dead
        assert!(!fx
            .service
            .can_login_with_token(fx.member.id().as_str(), token.as_str())
            .await
            .unwrap());
        assert!(!fx
            .service
            .session_login(fx.member.id().as_str(), token.as_str(), &fx.store)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_redemption_creates_one_session() {
        let fx = fixture().await;
        let token = issued_token(&fx).await;

        let service = Arc::new(fx.service);
        let store = Arc::new(fx.store);
        let mut handles = Vec::new();

        for _ in 0..8 {
            let service = Arc::clone(&service);
            let store = Arc::clone(&store);
            let member_id = fx.member.id().as_str().to_string();
            let token = token.clone();
            handles.push(tokio::spawn(async move {
                service
                    .session_login(&member_id, token.as_str(), store.as_ref())
                    .await
            }));
        }

        let mut logins = 0;

        for handle in handles {
            if handle.await.unwrap().unwrap() {
                logins += 1;
            }
        }

        // The link is consumed exactly once, so exactly one session exists
        assert_eq!(logins, 1);

        let sessions = fx.sessions.list_by_member(fx.member.id()).await.unwrap();
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_logout_removes_session_and_entry() {
        let fx = fixture().await;
        let token = issued_token(&fx).await;

        fx.service
            .session_login(fx.member.id().as_str(), token.as_str(), &fx.store)
            .await
            .unwrap();
        let session_token = fx.store.get(fx.club.id(), fx.member.id()).unwrap();

        fx.service
            .session_logout(fx.club.id().as_str(), fx.member.id().as_str(), &fx.store)
            .await
            .unwrap();

        assert!(!fx
            .service
            .session_is_logged_in(fx.club.id().as_str(), fx.member.id().as_str(), &fx.store)
            .await
            .unwrap());
        assert!(fx.store.get(fx.club.id(), fx.member.id()).is_none());
        assert!(fx.sessions.get(&session_token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_self_heals_store() {
        let fx = fixture().await;

        let token = SessionToken::new("ses_expired").unwrap();
        fx.sessions
            .create(ClubSession::new(
                token.clone(),
                fx.member.id().clone(),
                fx.club.id().clone(),
                Utc::now() - Duration::seconds(1),
            ))
            .await
            .unwrap();
        fx.store.set(fx.club.id(), fx.member.id(), token.clone());

        assert!(!fx
            .service
            .session_is_logged_in(fx.club.id().as_str(), fx.member.id().as_str(), &fx.store)
            .await
            .unwrap());

        // The stale entry and the expired record are both gone
        assert!(fx.store.get(fx.club.id(), fx.member.id()).is_none());
        assert!(fx.sessions.get(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dangling_store_entry_self_heals() {
        let fx = fixture().await;

        fx.store.set(
            fx.club.id(),
            fx.member.id(),
            SessionToken::new("ses_gone").unwrap(),
        );

        assert!(!fx
            .service
            .session_is_logged_in(fx.club.id().as_str(), fx.member.id().as_str(), &fx.store)
            .await
            .unwrap());
        assert!(fx.store.get(fx.club.id(), fx.member.id()).is_none());
    }

    #[tokio::test]
    async fn test_logged_in_without_session() {
        let fx = fixture().await;

        assert!(!fx
            .service
            .session_is_logged_in(fx.club.id().as_str(), fx.member.id().as_str(), &fx.store)
            .await
            .unwrap());
    }
}
