//! Customer entity - one dimension row per distinct buyer in the source data.
//!
//! Customers are registered the first time their ID appears during a CSV
//! load and are immutable afterwards.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Natural key carried over from the source system (e.g. `"C1023"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub customer_id: String,
    /// Customer display name
    pub name: String,
    /// Contact email as exported
    pub email: String,
    /// Free-form postal address
    #[sea_orm(column_type = "Text")]
    pub address: String,
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer places many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
