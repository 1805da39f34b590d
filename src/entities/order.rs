//! Order entity - the customer purchase record at the heart of the module.
//!
//! Each order carries a human-readable `code` (assigned exactly once at
//! creation), the customer contact fields, a lifecycle [`Status`], and
//! `cache_total`, the denormalized sum of `price * quantity` over its line
//! items. The cache is recomputed inside the same database transaction as
//! every save so it never drifts from the line items.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order lifecycle status, stored as a string column.
///
/// No transition graph is enforced: any status may be set directly to any
/// other. This mirrors admin-override behavior and is deliberate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Initial status of a freshly created order
    #[default]
    #[sea_orm(string_value = "new")]
    New,
    /// Awaiting confirmation
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Confirmed by the back office
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Fulfilled
    #[sea_orm(string_value = "done")]
    Done,
    /// Canceled
    #[sea_orm(string_value = "canceled")]
    Canceled,
}

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable order code (`DH` + 2-digit year + 5 unambiguous chars),
    /// assigned once at creation and never regenerated
    pub code: String,
    /// Customer's full name
    pub customer_name: String,
    /// Customer's phone number
    pub phone: String,
    /// Customer's email address
    pub email: String,
    /// Lifecycle status, defaults to [`Status::New`]
    pub status: Status,
    /// Denormalized sum of `price * quantity` over current line items
    pub cache_total: f64,
    /// When the order was created
    pub created_at: DateTimeUtc,
    /// When the order was last modified
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// Whether the order is awaiting confirmation.
    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }

    /// Whether the order has been confirmed.
    pub fn is_confirmed(&self) -> bool {
        self.status == Status::Confirmed
    }

    /// Whether the order has been fulfilled.
    pub fn is_done(&self) -> bool {
        self.status == Status::Done
    }

    /// Whether the order has been canceled.
    pub fn is_canceled(&self) -> bool {
        self.status == Status::Canceled
    }
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order owns many line items
    #[sea_orm(has_many = "super::order_detail::Entity")]
    OrderDetails,
}

impl Related<super::order_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
