// Token ledger repository
//
// The ledger is the append-only token_transactions table plus the
// per-user user_tokens balance row. Every append and its balance update
// happen in one database transaction with the balance row taken
// FOR UPDATE, so balance == sum(amounts) holds at all times and
// concurrent debits cannot jointly overdraw an account.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::db::error::DbError;
use crate::entity::prelude::{TokenTransactions, UserTokens};
use crate::entity::{token_transactions, user_tokens};
use crate::models::TransactionType;

/// Repository for the token ledger
pub struct TokenRepository {
    conn: DatabaseConnection,
}

impl TokenRepository {
    /// Creates a new token repository with the given database connection
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Current balance for a user. A missing balance row is a normal
    /// zero-balance state, not an error.
    pub async fn get_balance(&self, user_id: &str) -> Result<i64, DbError> {
        let row = UserTokens::find()
            .filter(user_tokens::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await?;

        Ok(row.map(|r| r.balance).unwrap_or(0))
    }

    /// The user's ledger entries, newest first, truncated to `limit`
    pub async fn get_transactions(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<token_transactions::Model>, DbError> {
        TokenTransactions::find()
            .filter(token_transactions::Column::UserId.eq(user_id))
            .order_by_desc(token_transactions::Column::CreatedAt)
            .limit(limit)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Appends a ledger entry and adjusts the balance in one transaction.
    /// No sign or magnitude validation happens here; debits that must be
    /// covered go through `debit`.
    #[allow(dead_code)] // Reserved for purchase/refund flows
    pub async fn record_transaction(
        &self,
        user_id: &str,
        amount: i64,
        transaction_type: TransactionType,
        description: Option<String>,
        reference_id: Option<String>,
    ) -> Result<token_transactions::Model, DbError> {
        let user_id = user_id.to_string();
        self.conn
            .transaction::<_, (token_transactions::Model, i64), DbError>(move |txn| {
                Box::pin(async move {
                    apply_entry(
                        txn,
                        &user_id,
                        amount,
                        transaction_type,
                        description,
                        reference_id,
                    )
                    .await
                })
            })
            .await
            .map(|(entry, _)| entry)
            .map_err(Into::into)
    }

    /// Debits `amount` (positive) from the user if covered, recording a
    /// negative ledger entry of the given type. Fails with
    /// `InsufficientFunds` before anything is written.
    #[allow(dead_code)] // Invest debits via debit_entry; reserved for usage-type spends
    pub async fn debit(
        &self,
        user_id: &str,
        amount: i64,
        transaction_type: TransactionType,
        description: Option<String>,
        reference_id: Option<String>,
    ) -> Result<(token_transactions::Model, i64), DbError> {
        let user_id = user_id.to_string();
        self.conn
            .transaction::<_, (token_transactions::Model, i64), DbError>(move |txn| {
                Box::pin(async move {
                    debit_entry(
                        txn,
                        &user_id,
                        amount,
                        transaction_type,
                        description,
                        reference_id,
                    )
                    .await
                })
            })
            .await
            .map_err(Into::into)
    }

    /// Credits the one-time signup bonus. Returns `(granted, balance)`;
    /// a repeat claim grants nothing and reports the current balance.
    pub async fn grant_signup_bonus(
        &self,
        user_id: &str,
        amount: i64,
    ) -> Result<(bool, i64), DbError> {
        let user_id = user_id.to_string();
        self.conn
            .transaction::<_, (bool, i64), DbError>(move |txn| {
                Box::pin(async move {
                    let already_granted = TokenTransactions::find()
                        .filter(token_transactions::Column::UserId.eq(user_id.as_str()))
                        .filter(
                            token_transactions::Column::TransactionType
                                .eq(TransactionType::SignupBonus.as_str()),
                        )
                        .one(txn)
                        .await?;

                    if already_granted.is_some() {
                        let balance = UserTokens::find()
                            .filter(user_tokens::Column::UserId.eq(user_id.as_str()))
                            .one(txn)
                            .await?
                            .map(|r| r.balance)
                            .unwrap_or(0);
                        return Ok((false, balance));
                    }

                    let (_, balance) = apply_entry(
                        txn,
                        &user_id,
                        amount,
                        TransactionType::SignupBonus,
                        Some("Welcome bonus".to_string()),
                        None,
                    )
                    .await?;

                    Ok((true, balance))
                })
            })
            .await
            .map_err(Into::into)
    }
}

/// Appends one ledger entry and folds it into the balance row, creating
/// the row on first use. Must run inside an open transaction; takes the
/// balance row FOR UPDATE so appends for one user serialize.
/// Returns the entry and the resulting balance.
pub(crate) async fn apply_entry(
    txn: &DatabaseTransaction,
    user_id: &str,
    amount: i64,
    transaction_type: TransactionType,
    description: Option<String>,
    reference_id: Option<String>,
) -> Result<(token_transactions::Model, i64), DbError> {
    let now = Utc::now().naive_utc();

    let existing = UserTokens::find()
        .filter(user_tokens::Column::UserId.eq(user_id))
        .lock_exclusive()
        .one(txn)
        .await?;

    let balance = match existing {
        Some(row) => {
            let balance = row.balance + amount;
            let mut row: user_tokens::ActiveModel = row.into();
            row.balance = Set(balance);
            row.updated_at = Set(now);
            row.update(txn).await?;
            balance
        }
        None => {
            user_tokens::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                user_id: Set(user_id.to_string()),
                balance: Set(amount),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(txn)
            .await?;
            amount
        }
    };

    let entry = token_transactions::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        amount: Set(amount),
        transaction_type: Set(transaction_type.as_str().to_string()),
        description: Set(description),
        reference_id: Set(reference_id),
        created_at: Set(now),
    }
    .insert(txn)
    .await?;

    Ok((entry, balance))
}

/// Sufficiency-checked debit inside an open transaction. The balance row
/// is locked before the check, so two concurrent debits observe each
/// other's writes instead of a shared stale balance.
pub(crate) async fn debit_entry(
    txn: &DatabaseTransaction,
    user_id: &str,
    amount: i64,
    transaction_type: TransactionType,
    description: Option<String>,
    reference_id: Option<String>,
) -> Result<(token_transactions::Model, i64), DbError> {
    let balance = UserTokens::find()
        .filter(user_tokens::Column::UserId.eq(user_id))
        .lock_exclusive()
        .one(txn)
        .await?
        .map(|r| r.balance)
        .unwrap_or(0);

    if balance < amount {
        return Err(DbError::InsufficientFunds {
            balance,
            requested: amount,
        });
    }

    apply_entry(
        txn,
        user_id,
        -amount,
        transaction_type,
        description,
        reference_id,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn balance_row(user_id: &str, balance: i64) -> user_tokens::Model {
        let now = NaiveDateTime::default();
        user_tokens::Model {
            id: "token-row-1".to_string(),
            user_id: user_id.to_string(),
            balance,
            created_at: now,
            updated_at: now,
        }
    }

    fn ledger_row(user_id: &str, amount: i64, transaction_type: &str) -> token_transactions::Model {
        token_transactions::Model {
            id: "entry-1".to_string(),
            user_id: user_id.to_string(),
            amount,
            transaction_type: transaction_type.to_string(),
            description: None,
            reference_id: None,
            created_at: NaiveDateTime::default(),
        }
    }

    #[tokio::test]
    async fn test_get_balance_defaults_to_zero_without_row() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user_tokens::Model>::new()])
            .into_connection();

        let repo = TokenRepository::new(conn);
        assert_eq!(repo.get_balance("user-1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_balance_reads_existing_row() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![balance_row("user-1", 700)]])
            .into_connection();

        let repo = TokenRepository::new(conn);
        assert_eq!(repo.get_balance("user-1").await.unwrap(), 700);
    }

    #[tokio::test]
    async fn test_get_transactions_returns_rows() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                ledger_row("user-1", -300, "investment"),
                ledger_row("user-1", 1000, "signup_bonus"),
            ]])
            .into_connection();

        let repo = TokenRepository::new(conn);
        let entries = repo.get_transactions("user-1", 50).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].amount, -300);
    }

    #[tokio::test]
    async fn test_debit_beyond_balance_fails_without_writing() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![balance_row("user-1", 50)]])
            .into_connection();

        let repo = TokenRepository::new(conn);
        let err = repo
            .debit("user-1", 100, TransactionType::Usage, None, None)
            .await
            .unwrap_err();

        match err {
            DbError::InsufficientFunds { balance, requested } => {
                assert_eq!(balance, 50);
                assert_eq!(requested, 100);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_debit_with_empty_ledger_fails() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user_tokens::Model>::new()])
            .into_connection();

        let repo = TokenRepository::new(conn);
        let err = repo
            .debit("user-1", 1, TransactionType::Usage, None, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::InsufficientFunds {
                balance: 0,
                requested: 1
            }
        ));
    }

    #[tokio::test]
    async fn test_signup_bonus_is_not_granted_twice() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ledger_row("user-1", 1000, "signup_bonus")]])
            .append_query_results([vec![balance_row("user-1", 700)]])
            .into_connection();

        let repo = TokenRepository::new(conn);
        let (granted, balance) = repo.grant_signup_bonus("user-1", 1000).await.unwrap();
        assert!(!granted);
        assert_eq!(balance, 700);
    }
}
