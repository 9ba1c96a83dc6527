//! SeaORM Entity for idea_investments table
//!
//! At most one row per (idea_id, user_id); repeat investments increase
//! amount on the existing row. Rows are never deleted and amount never
//! decreases.

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "idea_investments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    #[sea_orm(column_type = "Text")]
    pub idea_id: String,
    #[sea_orm(column_type = "Text")]
    pub user_id: String,

    /// Cumulative contribution, strictly positive
    pub amount: i64,

    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
