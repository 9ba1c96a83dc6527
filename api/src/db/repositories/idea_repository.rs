// Idea repository

use chrono::Utc;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

use crate::db::error::DbError;
use crate::entity::ideas;
use crate::entity::prelude::Ideas;
use crate::models::json_string_list;

/// Stage assigned to freshly submitted ideas
const INITIAL_STAGE: &str = "idea";

/// Repository for managing ideas in the database
pub struct IdeaRepository {
    conn: DatabaseConnection,
}

impl IdeaRepository {
    /// Creates a new idea repository with the given database connection
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a new idea submitted by a user
    pub async fn insert(
        &self,
        user_id: &str,
        title: &str,
        domain: &str,
        problem: &str,
        ai_solution: &str,
        tags: Vec<String>,
    ) -> Result<ideas::Model, DbError> {
        let now = Utc::now().naive_utc();
        let idea = ideas::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(title.to_string()),
            domain: Set(domain.to_string()),
            problem: Set(problem.to_string()),
            ai_solution: Set(ai_solution.to_string()),
            tags: Set(json!(tags)),
            user_id: Set(user_id.to_string()),
            stage: Set(INITIAL_STAGE.to_string()),
            is_visible: Set(true),
            like_user_ids: Set(json!([])),
            created_at: Set(now),
            updated_at: Set(now),
        };

        idea.insert(&self.conn).await.map_err(Into::into)
    }

    /// Lists visible ideas newest-first, optionally filtered by a search
    /// term matched case-insensitively against the text columns
    pub async fn list_visible(&self, query: Option<&str>) -> Result<Vec<ideas::Model>, DbError> {
        let mut select = Ideas::find().filter(ideas::Column::IsVisible.eq(true));

        if let Some(term) = query {
            let pattern = format!("%{}%", term);
            select = select.filter(
                Condition::any()
                    .add(Expr::col(ideas::Column::Title).ilike(pattern.clone()))
                    .add(Expr::col(ideas::Column::Domain).ilike(pattern.clone()))
                    .add(Expr::col(ideas::Column::Problem).ilike(pattern.clone()))
                    .add(Expr::col(ideas::Column::AiSolution).ilike(pattern)),
            );
        }

        select
            .order_by_desc(ideas::Column::CreatedAt)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Gets an idea by id
    pub async fn get_by_id(&self, idea_id: &str) -> Result<Option<ideas::Model>, DbError> {
        Ideas::find_by_id(idea_id.to_string())
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Batch get ideas by id (single query)
    pub async fn get_by_ids(&self, idea_ids: &[String]) -> Result<Vec<ideas::Model>, DbError> {
        if idea_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ideas::find()
            .filter(ideas::Column::Id.is_in(idea_ids.to_vec()))
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Toggles the acting user in an idea's like list. The row is locked
    /// for the read-modify-write, so concurrent toggles cannot drop each
    /// other. Returns the updated idea and whether it is now liked.
    pub async fn toggle_like(
        &self,
        idea_id: &str,
        user_id: &str,
    ) -> Result<(ideas::Model, bool), DbError> {
        let idea_id = idea_id.to_string();
        let user_id = user_id.to_string();
        self.conn
            .transaction::<_, (ideas::Model, bool), DbError>(move |txn| {
                Box::pin(async move {
                    let idea = Ideas::find_by_id(idea_id.clone())
                        .lock_exclusive()
                        .one(txn)
                        .await?
                        .ok_or_else(|| DbError::NotFound(format!("Idea {} not found", idea_id)))?;

                    let mut like_user_ids = json_string_list(&idea.like_user_ids);
                    let liked = if like_user_ids.contains(&user_id) {
                        like_user_ids.retain(|id| id != &user_id);
                        false
                    } else {
                        like_user_ids.push(user_id.clone());
                        true
                    };

                    let mut active: ideas::ActiveModel = idea.into();
                    active.like_user_ids = Set(json!(like_user_ids));
                    let updated = active.update(txn).await?;

                    Ok((updated, liked))
                })
            })
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn idea_row(id: &str, liked_by: &[&str]) -> ideas::Model {
        let now = NaiveDateTime::default();
        ideas::Model {
            id: id.to_string(),
            title: "Smart tutoring".to_string(),
            domain: "education".to_string(),
            problem: "One-size-fits-all lessons".to_string(),
            ai_solution: "Adaptive curriculum".to_string(),
            tags: json!(["edtech"]),
            user_id: "author-1".to_string(),
            stage: INITIAL_STAGE.to_string(),
            is_visible: true,
            like_user_ids: json!(liked_by),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_get_by_ids_empty_input_skips_query() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let repo = IdeaRepository::new(conn);
        assert!(repo.get_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_visible_returns_rows() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![idea_row("idea-1", &[])]])
            .into_connection();

        let repo = IdeaRepository::new(conn);
        let ideas = repo.list_visible(None).await.unwrap();
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].id, "idea-1");
    }

    #[tokio::test]
    async fn test_toggle_like_missing_idea_is_not_found() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<ideas::Model>::new()])
            .into_connection();

        let repo = IdeaRepository::new(conn);
        let err = repo.toggle_like("idea-404", "user-1").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }
}
