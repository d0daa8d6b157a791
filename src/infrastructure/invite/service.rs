//! Invite service for the team invite lifecycle

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::InviteConfig;
use crate::domain::invite::{
    resolve_uses_left, resolve_valid_until, validate_note, Invite, InviteId, InviteRepository,
};
use crate::domain::team::{AccountId, Member, MemberRepository, TeamId, TeamRepository, TeamRole};
use crate::domain::DomainError;
use crate::infrastructure::token::TokenGenerator;

/// Request for creating a new invite
///
/// `uses_left` of `None` or a negative value applies the configured default.
/// `days_valid < 0` means the invite never expires, `0` applies the
/// configured default window, positive values (fractional allowed) count
/// from now.
#[derive(Debug, Clone)]
pub struct CreateInviteRequest {
    pub uses_left: Option<i64>,
    pub days_valid: f64,
    pub note: Option<String>,
}

/// Request for partially updating an invite; unset fields are preserved
#[derive(Debug, Clone, Default)]
pub struct UpdateInviteRequest {
    pub uses_left: Option<i64>,
    pub days_valid: Option<f64>,
    pub note: Option<String>,
}

/// Invite service managing creation, validation and redemption
#[derive(Debug)]
pub struct InviteService {
    invites: Arc<dyn InviteRepository>,
    members: Arc<dyn MemberRepository>,
    teams: Arc<dyn TeamRepository>,
    tokens: TokenGenerator,
    config: InviteConfig,
}

impl InviteService {
    /// Create a new invite service
    pub fn new(
        invites: Arc<dyn InviteRepository>,
        members: Arc<dyn MemberRepository>,
        teams: Arc<dyn TeamRepository>,
        config: InviteConfig,
    ) -> Self {
        Self {
            invites,
            members,
            teams,
            tokens: TokenGenerator::invite(),
            config,
        }
    }

    /// Check that an account holds an admin-capable role in a team
    pub async fn ensure_can_manage(
        &self,
        team_id: &str,
        account_id: &str,
    ) -> Result<(), DomainError> {
        let team_id = TeamId::new(team_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        let account_id =
            AccountId::new(account_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let membership = self
            .members
            .find_by_account(&team_id, &account_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "Account '{}' is not a member of team '{}'",
                    account_id, team_id
                ))
            })?;

        if !membership.role().can_manage_team() {
            return Err(DomainError::validation(
                "Only owners and admins can manage invites",
            ));
        }

        Ok(())
    }

    /// Create a new invite for a team
    pub async fn create(
        &self,
        team_id: &str,
        request: CreateInviteRequest,
    ) -> Result<Invite, DomainError> {
        info!(team_id = %team_id, "Creating invite");

        let team_id = TeamId::new(team_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        if !self.teams.exists(&team_id).await? {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team_id
            )));
        }

        let uses_left = resolve_uses_left(request.uses_left, self.config.default_uses)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        let valid_until =
            resolve_valid_until(request.days_valid, self.config.default_valid_days, Utc::now());

        let mut invite =
            Invite::new(team_id, self.tokens.generate(), uses_left).with_valid_until(valid_until);

        if let Some(note) = request.note {
            validate_note(&note).map_err(|e| DomainError::validation(e.to_string()))?;
            invite = invite.with_note(note);
        }

        self.invites.create(invite).await
    }

    /// Get an invite by ID
    pub async fn get(&self, id: &str) -> Result<Option<Invite>, DomainError> {
        let invite_id = InviteId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.invites.get(&invite_id).await
    }

    /// List a team's invites, soonest expiry first
    pub async fn list(&self, team_id: &str) -> Result<Vec<Invite>, DomainError> {
        let team_id = TeamId::new(team_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        if !self.teams.exists(&team_id).await? {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team_id
            )));
        }

        self.invites.list_by_team(&team_id).await
    }

    /// Check whether an account may redeem an invite.
    ///
    /// Must be called and succeed before [`accept`](Self::accept); fails
    /// with `AlreadyMember` when the account already belongs to the
    /// invite's team and with `InviteInvalid` when the invite is exhausted
    /// or expired.
    pub async fn check_validity_for_user(
        &self,
        invite: &Invite,
        account_id: &AccountId,
    ) -> Result<(), DomainError> {
        if self
            .members
            .find_by_account(invite.team_id(), account_id)
            .await?
            .is_some()
        {
            return Err(DomainError::already_member(format!(
                "Account '{}' already belongs to team '{}'",
                account_id,
                invite.team_id()
            )));
        }

        if !invite.is_valid() {
            return Err(DomainError::invite_invalid(format!(
                "Invite '{}' is {:?}",
                invite.id(),
                invite.state()
            )));
        }

        Ok(())
    }

    /// Redeem an invite token and join the account to the team.
    ///
    /// Validates first, then consumes one use as a single atomic storage
    /// mutation, then creates the membership. If a concurrent redemption
    /// already created the membership, the existing record is returned.
    pub async fn accept(&self, token: &str, account_id: &str) -> Result<Member, DomainError> {
        info!(account_id = %account_id, "Accepting invite");

        let account_id =
            AccountId::new(account_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let invite = self
            .invites
            .find_by_token(token)
            .await?
            .ok_or_else(|| DomainError::not_found("No invite matches that token"))?;

        self.check_validity_for_user(&invite, &account_id).await?;

        let invite = self.invites.consume_use(invite.id()).await?;

        debug!(
            invite_id = %invite.id(),
            uses_left = invite.uses_left(),
            uses_used = invite.uses_used(),
            "Invite use consumed"
        );

        match self
            .members
            .create(Member::new(
                invite.team_id().clone(),
                account_id.clone(),
                TeamRole::Member,
            ))
            .await
        {
            Ok(member) => Ok(member),
            Err(DomainError::Conflict { .. }) => self
                .members
                .find_by_account(invite.team_id(), &account_id)
                .await?
                .ok_or_else(|| DomainError::internal("Membership vanished during invite accept")),
            Err(e) => {
                // The join failed after the decrement; roll the use back so
                // the counters match the memberships actually created
                if let Err(restore_err) = self.invites.restore_use(invite.id()).await {
                    warn!(
                        invite_id = %invite.id(),
                        error = %restore_err,
                        "Failed to restore invite use after join error"
                    );
                }

                Err(e)
            }
        }
    }

    /// Partially update an invite; unset fields are preserved
    pub async fn update(&self, id: &str, request: UpdateInviteRequest) -> Result<Invite, DomainError> {
        info!(id = %id, "Updating invite");

        let invite_id = InviteId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut invite = self
            .invites
            .get(&invite_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Invite '{}' not found", id)))?;

        if let Some(uses) = request.uses_left {
            let uses = resolve_uses_left(Some(uses), self.config.default_uses)
                .map_err(|e| DomainError::validation(e.to_string()))?;
            invite.set_uses_left(uses);
        }

        if let Some(days) = request.days_valid {
            invite.set_valid_until(resolve_valid_until(
                days,
                self.config.default_valid_days,
                Utc::now(),
            ));
        }

        if let Some(note) = request.note {
            validate_note(&note).map_err(|e| DomainError::validation(e.to_string()))?;
            invite.set_note(note);
        }

        self.invites.update(invite).await
    }

    /// Delete an invite
    ///
    /// Exhausted and expired invites are never deleted automatically; this
    /// is the only removal path.
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        info!(id = %id, "Deleting invite");

        let invite_id = InviteId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.invites.delete(&invite_id).await
    }
}
