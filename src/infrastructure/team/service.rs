//! Team service for team and membership management

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::team::{
    AccountId, Member, MemberId, MemberRepository, Team, TeamId, TeamRepository, TeamRole,
};
use crate::domain::DomainError;

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Request for updating a team
#[derive(Debug, Clone)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Team service for managing teams and their memberships
#[derive(Debug)]
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
    members: Arc<dyn MemberRepository>,
}

impl TeamService {
    /// Create a new team service
    pub fn new(teams: Arc<dyn TeamRepository>, members: Arc<dyn MemberRepository>) -> Self {
        Self { teams, members }
    }

    /// Create a new team and provision its owner membership
    pub async fn create(
        &self,
        account_id: &str,
        request: CreateTeamRequest,
    ) -> Result<(Team, Member), DomainError> {
        info!(account_id = %account_id, name = %request.name, "Creating team");

        let account_id =
            AccountId::new(account_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut team = Team::new(TeamId::generate(), &request.name)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(desc) = request.description {
            team.set_description(Some(desc))
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        let team = self.teams.create(team).await?;

        // The creator holds the owner role from the start
        let owner = self
            .members
            .create(Member::new(team.id().clone(), account_id, TeamRole::Owner))
            .await?;

        Ok((team, owner))
    }

    /// Get a team by ID
    pub async fn get(&self, id: &str) -> Result<Option<Team>, DomainError> {
        let team_id = TeamId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.teams.get(&team_id).await
    }

    /// List the teams an account belongs to
    pub async fn list_for_account(&self, account_id: &str) -> Result<Vec<Team>, DomainError> {
        let account_id =
            AccountId::new(account_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut teams = Vec::new();

        for membership in self.members.list_by_account(&account_id).await? {
            if let Some(team) = self.teams.get(membership.team_id()).await? {
                teams.push(team);
            }
        }

        teams.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(teams)
    }

    /// Update a team
    pub async fn update(&self, id: &str, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        info!(id = %id, "Updating team");

        let team_id = TeamId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut team = self
            .teams
            .get(&team_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", id)))?;

        if let Some(name) = request.name {
            team.set_name(&name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(desc) = request.description {
            team.set_description(Some(desc))
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        self.teams.update(team).await
    }

    /// Delete a team
    ///
    /// Refused while members besides the owner remain; the remaining owner
    /// membership is removed together with the team.
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        info!(id = %id, "Deleting team");

        let team_id = TeamId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        if self.teams.get(&team_id).await?.is_none() {
            return Ok(false);
        }

        let members = self.members.list_by_team(&team_id).await?;

        if members.iter().any(|m| !m.role().is_owner()) {
            return Err(DomainError::validation(
                "Cannot delete a team that still has members besides the owner",
            ));
        }

        for member in members {
            self.members.delete(member.id()).await?;
        }

        self.teams.delete(&team_id).await
    }

    /// Leave a team
    ///
    /// The owner cannot leave; ownership stays with the team for its lifetime.
    pub async fn leave(&self, team_id: &str, account_id: &str) -> Result<(), DomainError> {
        info!(team_id = %team_id, account_id = %account_id, "Leaving team");

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

        if membership.role().is_owner() {
            return Err(DomainError::validation("The team owner cannot leave"));
        }

        self.members.delete(membership.id()).await?;
        Ok(())
    }

    /// List the members of a team
    pub async fn members(&self, team_id: &str) -> Result<Vec<Member>, DomainError> {
        let team_id = TeamId::new(team_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        if !self.teams.exists(&team_id).await? {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team_id
            )));
        }

        self.members.list_by_team(&team_id).await
    }

    /// Change a member's role
    ///
    /// The owner role is fixed: it can neither be granted nor revoked here.
    pub async fn change_role(
        &self,
        team_id: &str,
        member_id: &str,
        role: TeamRole,
    ) -> Result<Member, DomainError> {
        info!(team_id = %team_id, member_id = %member_id, role = %role, "Changing member role");

        let mut member = self.membership_in_team(team_id, member_id).await?;

        if member.role().is_owner() {
            return Err(DomainError::validation(
                "The owner's role cannot be changed",
            ));
        }

        if role.is_owner() {
            return Err(DomainError::validation(
                "Ownership cannot be granted through a role change",
            ));
        }

        member.set_role(role);
        self.members.update(member).await
    }

    /// Remove a member from a team
    pub async fn remove_member(&self, team_id: &str, member_id: &str) -> Result<(), DomainError> {
        info!(team_id = %team_id, member_id = %member_id, "Removing member");

        let member = self.membership_in_team(team_id, member_id).await?;

        if member.role().is_owner() {
            return Err(DomainError::validation("The owner cannot be removed"));
        }

        self.members.delete(member.id()).await?;
        Ok(())
    }

    async fn membership_in_team(
        &self,
        team_id: &str,
        member_id: &str,
    ) -> Result<Member, DomainError> {
        let team_id = TeamId::new(team_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        let member_id =
            MemberId::new(member_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let member = self.members.get(&member_id).await?.ok_or_else(|| {
            DomainError::not_found(format!("Member '{}' not found", member_id))
        })?;

        if member.team_id() != &team_id {
            debug!(member_id = %member_id, team_id = %team_id, "Member belongs to another team");
            return Err(DomainError::not_found(format!(
                "Member '{}' not found in team '{}'",
                member_id, team_id
            )));
        }

        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::team::{StorageMemberRepository, StorageTeamRepository};

    fn create_service() -> TeamService {
        let teams = Arc::new(StorageTeamRepository::new(Arc::new(
            InMemoryStorage::<Team>::new(),
        )));
        let members = Arc::new(StorageMemberRepository::new(Arc::new(
            InMemoryStorage::<Member>::new(),
        )));
        TeamService::new(teams, members)
    }

    fn create_request(name: &str) -> CreateTeamRequest {
        CreateTeamRequest {
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_provisions_owner() {
        let service = create_service();
        let account = AccountId::generate();

        let (team, owner) = service
            .create(account.as_str(), create_request("Test Team"))
            .await
            .unwrap();

        assert_eq!(team.name(), "Test Team");
        assert_eq!(owner.team_id(), team.id());
        assert_eq!(owner.account_id(), &account);
        assert_eq!(owner.role(), TeamRole::Owner);

        let members = service.members(team.id().as_str()).await.unwrap();
        assert_eq!(members.len(), 1);
    }

    #[tokio::test]
    async fn test_create_invalid_name() {
        let service = create_service();

        let result = service
            .create(AccountId::generate().as_str(), create_request(""))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_list_for_account() {
        let service = create_service();
        let account = AccountId::generate();

        service
            .create(account.as_str(), create_request("Zebra"))
            .await
            .unwrap();
        service
            .create(account.as_str(), create_request("Alpha"))
            .await
            .unwrap();
        service
            .create(AccountId::generate().as_str(), create_request("Other"))
            .await
            .unwrap();

        let teams = service.list_for_account(account.as_str()).await.unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name(), "Alpha");
        assert_eq!(teams[1].name(), "Zebra");
    }

    #[tokio::test]
    async fn test_update_team() {
        let service = create_service();
        let (team, _) = service
            .create(AccountId::generate().as_str(), create_request("Old"))
            .await
            .unwrap();

        let updated = service
            .update(
                team.id().as_str(),
                UpdateTeamRequest {
                    name: Some("New".to_string()),
                    description: Some("Fresh description".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name(), "New");
        assert_eq!(updated.description(), Some("Fresh description"));
    }

    #[tokio::test]
    async fn test_delete_refused_with_other_members() {
        let service = create_service();
        let (team, _) = service
            .create(AccountId::generate().as_str(), create_request("Team"))
            .await
            .unwrap();

        service
            .members
            .create(Member::new(
                team.id().clone(),
                AccountId::generate(),
                TeamRole::Member,
            ))
            .await
            .unwrap();

        let result = service.delete(team.id().as_str()).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_delete_owner_only_team() {
        let service = create_service();
        let account = AccountId::generate();
        let (team, _) = service
            .create(account.as_str(), create_request("Team"))
            .await
            .unwrap();

        assert!(service.delete(team.id().as_str()).await.unwrap());
        assert!(service.get(team.id().as_str()).await.unwrap().is_none());
        assert!(service
            .list_for_account(account.as_str())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_team() {
        let service = create_service();
        assert!(!service.delete(TeamId::generate().as_str()).await.unwrap());
    }

    #[tokio::test]
    async fn test_owner_cannot_leave() {
        let service = create_service();
        let account = AccountId::generate();
        let (team, _) = service
            .create(account.as_str(), create_request("Team"))
            .await
            .unwrap();

        let result = service.leave(team.id().as_str(), account.as_str()).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_member_can_leave() {
        let service = create_service();
        let (team, _) = service
            .create(AccountId::generate().as_str(), create_request("Team"))
            .await
            .unwrap();

        let account = AccountId::generate();
        service
            .members
            .create(Member::new(
                team.id().clone(),
                account.clone(),
                TeamRole::Member,
            ))
            .await
            .unwrap();

        service
            .leave(team.id().as_str(), account.as_str())
            .await
            .unwrap();

        assert_eq!(service.members(team.id().as_str()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_change_role() {
        let service = create_service();
        let (team, _) = service
            .create(AccountId::generate().as_str(), create_request("Team"))
            .await
            .unwrap();

        let member = service
            .members
            .create(Member::new(
                team.id().clone(),
                AccountId::generate(),
                TeamRole::Member,
            ))
            .await
            .unwrap();

        let updated = service
            .change_role(team.id().as_str(), member.id().as_str(), TeamRole::Admin)
            .await
            .unwrap();
        assert_eq!(updated.role(), TeamRole::Admin);
    }

    #[tokio::test]
    async fn test_owner_role_is_fixed() {
        let service = create_service();
        let (team, owner) = service
            .create(AccountId::generate().as_str(), create_request("Team"))
            .await
            .unwrap();

        let demote = service
            .change_role(team.id().as_str(), owner.id().as_str(), TeamRole::Member)
            .await;
        assert!(matches!(demote, Err(DomainError::Validation { .. })));

        let member = service
            .members
            .create(Member::new(
                team.id().clone(),
                AccountId::generate(),
                TeamRole::Admin,
            ))
            .await
            .unwrap();

        let promote = service
            .change_role(team.id().as_str(), member.id().as_str(), TeamRole::Owner)
            .await;
        assert!(matches!(promote, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_remove_member() {
        let service = create_service();
        let (team, owner) = service
            .create(AccountId::generate().as_str(), create_request("Team"))
            .await
            .unwrap();

        let member = service
            .members
            .create(Member::new(
                team.id().clone(),
                AccountId::generate(),
                TeamRole::Member,
            ))
            .await
            .unwrap();

        service
            .remove_member(team.id().as_str(), member.id().as_str())
            .await
            .unwrap();
        assert_eq!(service.members(team.id().as_str()).await.unwrap().len(), 1);

        let result = service
            .remove_member(team.id().as_str(), owner.id().as_str())
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_member_from_other_team_not_found() {
        let service = create_service();
        let (team_a, _) = service
            .create(AccountId::generate().as_str(), create_request("A"))
            .await
            .unwrap();
        let (_, owner_b) = service
            .create(AccountId::generate().as_str(), create_request("B"))
            .await
            .unwrap();

        let result = service
            .remove_member(team_a.id().as_str(), owner_b.id().as_str())
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
