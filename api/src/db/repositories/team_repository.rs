// Team repository

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

use crate::db::error::DbError;
use crate::entity::prelude::{TeamMembers, Teams};
use crate::entity::{team_members, teams};

const STATUS_RECRUITING: &str = "recruiting";
const MEMBER_PENDING: &str = "pending";
const MEMBER_APPROVED: &str = "approved";
const ROLE_LEADER: &str = "leader";
const ROLE_MEMBER: &str = "member";

/// Repository for managing teams and membership requests
pub struct TeamRepository {
    conn: DatabaseConnection,
}

impl TeamRepository {
    /// Creates a new team repository with the given database connection
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Creates a team around an idea. The creator becomes the leader with
    /// an approved member row; both inserts share one transaction.
    pub async fn create(
        &self,
        leader_id: &str,
        idea_id: &str,
        name: &str,
        description: &str,
        max_members: i32,
        required_skills: Vec<String>,
    ) -> Result<teams::Model, DbError> {
        let leader_id = leader_id.to_string();
        let idea_id = idea_id.to_string();
        let name = name.to_string();
        let description = description.to_string();
        self.conn
            .transaction::<_, teams::Model, DbError>(move |txn| {
                Box::pin(async move {
                    let now = Utc::now().naive_utc();
                    let team = teams::ActiveModel {
                        id: Set(Uuid::new_v4().to_string()),
                        idea_id: Set(idea_id),
                        name: Set(name),
                        description: Set(description),
                        max_members: Set(max_members),
                        current_members: Set(1),
                        required_skills: Set(json!(required_skills)),
                        leader_id: Set(leader_id.clone()),
                        status: Set(STATUS_RECRUITING.to_string()),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await?;

                    team_members::ActiveModel {
                        id: Set(Uuid::new_v4().to_string()),
                        team_id: Set(team.id.clone()),
                        user_id: Set(leader_id),
                        role: Set(ROLE_LEADER.to_string()),
                        skills: Set(json!([])),
                        status: Set(MEMBER_APPROVED.to_string()),
                        created_at: Set(now),
                    }
                    .insert(txn)
                    .await?;

                    Ok(team)
                })
            })
            .await
            .map_err(Into::into)
    }

    /// Lists all teams, newest first
    pub async fn list(&self) -> Result<Vec<teams::Model>, DbError> {
        Teams::find()
            .order_by_desc(teams::Column::CreatedAt)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Files a membership request. The request starts out pending and does
    /// not count towards current_members until the leader approves it.
    /// Duplicate requests and full teams are rejected; the team row is
    /// locked so the capacity check cannot race a concurrent join.
    pub async fn join(
        &self,
        team_id: &str,
        user_id: &str,
        skills: Vec<String>,
    ) -> Result<team_members::Model, DbError> {
        let team_id = team_id.to_string();
        let user_id = user_id.to_string();
        self.conn
            .transaction::<_, team_members::Model, DbError>(move |txn| {
                Box::pin(async move {
                    let team = Teams::find_by_id(team_id.clone())
                        .lock_exclusive()
                        .one(txn)
                        .await?
                        .ok_or_else(|| DbError::NotFound(format!("Team {} not found", team_id)))?;

                    let already_member = TeamMembers::find()
                        .filter(team_members::Column::TeamId.eq(team_id.as_str()))
                        .filter(team_members::Column::UserId.eq(user_id.as_str()))
                        .count(txn)
                        .await?;
                    if already_member > 0 {
                        return Err(DbError::Conflict(
                            "You already have a membership request for this team".to_string(),
                        ));
                    }

                    let approved = TeamMembers::find()
                        .filter(team_members::Column::TeamId.eq(team_id.as_str()))
                        .filter(team_members::Column::Status.eq(MEMBER_APPROVED))
                        .count(txn)
                        .await?;
                    if approved >= team.max_members as u64 {
                        return Err(DbError::Conflict("Team is full".to_string()));
                    }

                    team_members::ActiveModel {
                        id: Set(Uuid::new_v4().to_string()),
                        team_id: Set(team_id),
                        user_id: Set(user_id),
                        role: Set(ROLE_MEMBER.to_string()),
                        skills: Set(json!(skills)),
                        status: Set(MEMBER_PENDING.to_string()),
                        created_at: Set(Utc::now().naive_utc()),
                    }
                    .insert(txn)
                    .await
                    .map_err(Into::into)
                })
            })
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_join_missing_team_is_not_found() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<teams::Model>::new()])
            .into_connection();

        let repo = TeamRepository::new(conn);
        let err = repo.join("team-404", "user-1", vec![]).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }
}
