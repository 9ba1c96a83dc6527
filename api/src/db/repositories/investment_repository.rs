// Investment accounting repository
//
// One row per (idea, investor); repeat investments accumulate on the
// existing row. The invest path debits the token ledger and upserts the
// investment row inside a single database transaction, so an investment
// can never be recorded without its matching debit (or vice versa).

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::db::error::DbError;
use crate::db::repositories::token_repository;
use crate::entity::idea_investments;
use crate::entity::prelude::IdeaInvestments;
use crate::models::TransactionType;

/// Repository for idea investments
pub struct InvestmentRepository {
    conn: DatabaseConnection,
}

impl InvestmentRepository {
    /// Creates a new investment repository with the given database connection
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Commits `amount` tokens from the user to the idea. Inside one
    /// transaction: sufficiency-checked ledger debit (type `investment`,
    /// reference = idea id) first, then the (idea, user) row upsert. An
    /// existing row keeps its created_at and gains `amount`. Returns the
    /// investment row and the remaining balance.
    pub async fn invest(
        &self,
        user_id: &str,
        idea_id: &str,
        amount: i64,
    ) -> Result<(idea_investments::Model, i64), DbError> {
        let user_id = user_id.to_string();
        let idea_id = idea_id.to_string();
        self.conn
            .transaction::<_, (idea_investments::Model, i64), DbError>(move |txn| {
                Box::pin(async move {
                    let (_entry, balance) = token_repository::debit_entry(
                        txn,
                        &user_id,
                        amount,
                        TransactionType::Investment,
                        Some("Idea investment".to_string()),
                        Some(idea_id.clone()),
                    )
                    .await?;

                    let existing = IdeaInvestments::find()
                        .filter(idea_investments::Column::IdeaId.eq(idea_id.as_str()))
                        .filter(idea_investments::Column::UserId.eq(user_id.as_str()))
                        .lock_exclusive()
                        .one(txn)
                        .await?;

                    let investment = match existing {
                        Some(row) => {
                            let total = row.amount + amount;
                            let mut row: idea_investments::ActiveModel = row.into();
                            row.amount = Set(total);
                            row.update(txn).await?
                        }
                        None => {
                            idea_investments::ActiveModel {
                                id: Set(Uuid::new_v4().to_string()),
                                idea_id: Set(idea_id.clone()),
                                user_id: Set(user_id.clone()),
                                amount: Set(amount),
                                created_at: Set(Utc::now().naive_utc()),
                            }
                            .insert(txn)
                            .await?
                        }
                    };

                    Ok((investment, balance))
                })
            })
            .await
            .map_err(Into::into)
    }

    /// All investment rows for an idea, highest amount first
    pub async fn get_by_idea(
        &self,
        idea_id: &str,
    ) -> Result<Vec<idea_investments::Model>, DbError> {
        IdeaInvestments::find()
            .filter(idea_investments::Column::IdeaId.eq(idea_id))
            .order_by_desc(idea_investments::Column::Amount)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// The user's investments across ideas, newest first
    pub async fn get_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<idea_investments::Model>, DbError> {
        IdeaInvestments::find()
            .filter(idea_investments::Column::UserId.eq(user_id))
            .order_by_desc(idea_investments::Column::CreatedAt)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Batch get investment rows for multiple ideas (single query),
    /// grouped by idea id. Used to decorate idea listings with aggregates.
    pub async fn get_by_idea_batch(
        &self,
        idea_ids: &[String],
    ) -> Result<HashMap<String, Vec<idea_investments::Model>>, DbError> {
        if idea_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = IdeaInvestments::find()
            .filter(idea_investments::Column::IdeaId.is_in(idea_ids.to_vec()))
            .all(&self.conn)
            .await?;

        let mut grouped: HashMap<String, Vec<idea_investments::Model>> = HashMap::new();
        for row in rows {
            grouped.entry(row.idea_id.clone()).or_default().push(row);
        }

        Ok(grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn investment_row(idea_id: &str, user_id: &str, amount: i64) -> idea_investments::Model {
        idea_investments::Model {
            id: format!("inv-{idea_id}-{user_id}"),
            idea_id: idea_id.to_string(),
            user_id: user_id.to_string(),
            amount,
            created_at: NaiveDateTime::default(),
        }
    }

    fn empty_balance() -> Vec<crate::entity::user_tokens::Model> {
        Vec::new()
    }

    #[tokio::test]
    async fn test_invest_fails_with_insufficient_funds_before_any_write() {
        // Balance row absent: balance 0, so the debit aborts the whole
        // transaction before the investment upsert is reached.
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([empty_balance()])
            .into_connection();

        let repo = InvestmentRepository::new(conn);
        let err = repo.invest("user-1", "idea-1", 100).await.unwrap_err();

        assert!(matches!(
            err,
            DbError::InsufficientFunds {
                balance: 0,
                requested: 100
            }
        ));
    }

    #[tokio::test]
    async fn test_get_by_idea_orders_by_amount() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                investment_row("idea-1", "user-a", 500),
                investment_row("idea-1", "user-b", 100),
            ]])
            .into_connection();

        let repo = InvestmentRepository::new(conn);
        let rows = repo.get_by_idea("idea-1").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].amount, 500);
    }

    #[tokio::test]
    async fn test_get_by_idea_batch_groups_rows() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                investment_row("idea-1", "user-a", 300),
                investment_row("idea-2", "user-a", 200),
                investment_row("idea-1", "user-b", 100),
            ]])
            .into_connection();

        let repo = InvestmentRepository::new(conn);
        let grouped = repo
            .get_by_idea_batch(&["idea-1".to_string(), "idea-2".to_string()])
            .await
            .unwrap();

        assert_eq!(grouped.get("idea-1").map(Vec::len), Some(2));
        assert_eq!(grouped.get("idea-2").map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_get_by_idea_batch_empty_input_skips_query() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let repo = InvestmentRepository::new(conn);
        let grouped = repo.get_by_idea_batch(&[]).await.unwrap();
        assert!(grouped.is_empty());
    }
}
