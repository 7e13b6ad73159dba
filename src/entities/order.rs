//! Order entity - immutable sales facts loaded from the CSV export.
//!
//! Every monetary column is a fixed-scale decimal; the reporting engine
//! depends on that to keep aggregate sums exact. Orders are never updated
//! or deleted after load.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: i64,
    /// Product sold on this order line
    pub product_id: String,
    /// Customer who placed the order
    pub customer_id: String,
    /// Sales region (e.g. `"North"`)
    pub region: String,
    /// When the sale happened
    pub date_of_sale: DateTimeUtc,
    /// Units sold, never negative
    pub quantity_sold: i32,
    /// Price per unit before discount
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub unit_price: Decimal,
    /// Fractional discount in `[0, 1]` applied to the line
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub discount: Decimal,
    /// Shipping cost charged against the line's profit
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub shipping_cost: Decimal,
    /// Payment method as exported (e.g. `"Credit Card"`)
    pub payment_method: String,
}

/// Defines relationships between Order and the dimension entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::ProductId"
    )]
    Product,
    /// Each order references one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::CustomerId"
    )]
    Customer,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
