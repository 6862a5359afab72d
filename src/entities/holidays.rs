use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Paid-leave record. `worker_id` is a plain reference: holidays outlive the
/// worker row, which is why the listing uses a left join.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "holidays")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub worker_id: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`, never before `start_date`
    pub end_date: String,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
