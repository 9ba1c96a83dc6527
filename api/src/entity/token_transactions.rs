//! SeaORM Entity for token_transactions table - append-only ledger
//!
//! Rows are immutable once inserted; amount is signed (positive = credit,
//! negative = debit). For every user, the sum of amounts equals the
//! user_tokens balance.

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "token_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    #[sea_orm(column_type = "Text")]
    pub user_id: String,

    pub amount: i64,

    /// signup_bonus | purchase | investment | usage | refund
    #[sea_orm(column_type = "Text")]
    pub transaction_type: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Related entity, e.g. the idea id for an investment debit
    #[sea_orm(column_type = "Text", nullable)]
    pub reference_id: Option<String>,

    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
