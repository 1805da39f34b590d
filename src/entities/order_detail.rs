//! Order detail entity - one product line within an order.
//!
//! Line items snapshot the product name and price at the time they are
//! written, so later catalog edits do not rewrite history. Gift lines created
//! by cart reconciliation carry a `description` marker.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order detail database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_details")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the order this line belongs to
    pub order_id: i64,
    /// ID of the product this line references
    pub product_id: i64,
    /// Product name snapshot taken when the line was created
    pub product_name: String,
    /// Unit price of the line (zero is valid, e.g. for gifts)
    pub price: f64,
    /// Number of units
    pub quantity: i32,
    /// Optional free-text tag, `"gift"` for reconciler-created gift lines
    pub description: Option<String>,
}

/// Defines relationships between OrderDetail and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line item belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    /// Each line item references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
