//! Product gift entity - a product-level promotion rule.
//!
//! A rule on product P granting gift product G means: every unit of P in a
//! cart grants `quantity` units of G at `price` (usually zero). The per-unit
//! multiplier lives in [`Model::total_quantity`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product gift rule database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_gifts")]
pub struct Model {
    /// Unique identifier for the rule
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product that triggers the rule when purchased
    pub product_id: i64,
    /// ID of the product granted as a gift
    pub gift_id: i64,
    /// Gift units granted per unit of the triggering product
    pub quantity: i32,
    /// Unit price the gift line carries (zero for a true giveaway)
    pub price: f64,
}

impl Model {
    /// Total gift units granted for `purchased` units of the triggering
    /// product.
    pub const fn total_quantity(&self, purchased: i32) -> i32 {
        self.quantity * purchased
    }
}

/// Defines relationships between ProductGift and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each rule belongs to one triggering product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
