//! Product entity - the catalog row that cart items and line items reference.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product
    pub name: String,
    /// Current unit price
    pub price: f64,
    /// When the product was created
    pub created_at: DateTimeUtc,
    /// When the product was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product appears in many order lines
    #[sea_orm(has_many = "super::order_detail::Entity")]
    OrderDetails,
    /// One product may carry many gift rules (as the triggering product)
    #[sea_orm(has_many = "super::product_gift::Entity")]
    ProductGifts,
}

impl Related<super::order_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderDetails.def()
    }
}

impl Related<super::product_gift::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductGifts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
