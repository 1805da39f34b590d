//! Shared test utilities for `QuickOrders`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::order::{self, NewOrder},
    entities::{self, Order, order as order_entity, product, product_gift},
    errors::Result,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    prelude::DateTimeUtc, sea_query::Expr,
};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test order with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `customer_name` - Customer name for the order
///
/// # Defaults
/// * `phone`: "0901234567"
/// * `email`: "customer@example.com"
pub async fn create_test_order(
    db: &DatabaseConnection,
    customer_name: &str,
) -> Result<entities::order::Model> {
    order::create_order(
        db,
        NewOrder {
            customer_name: customer_name.to_string(),
            phone: "0901234567".to_string(),
            email: "customer@example.com".to_string(),
        },
    )
    .await
}

/// Creates a test product with the given name and price.
///
/// The catalog is an external collaborator in production, so tests insert
/// products directly rather than through a core operation.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
) -> Result<entities::product::Model> {
    let now = chrono::Utc::now();
    product::ActiveModel {
        name: Set(name.to_string()),
        price: Set(price),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a gift rule: buying `product_id` grants `quantity` units of
/// `gift_id` per unit purchased, at `price` per gifted unit.
pub async fn create_gift_rule(
    db: &DatabaseConnection,
    product_id: i64,
    gift_id: i64,
    quantity: i32,
    price: f64,
) -> Result<entities::product_gift::Model> {
    product_gift::ActiveModel {
        product_id: Set(product_id),
        gift_id: Set(gift_id),
        quantity: Set(quantity),
        price: Set(price),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Rewrites an order's creation timestamp so ordering tests get
/// deterministic, distinct values.
pub async fn set_created_at(
    db: &DatabaseConnection,
    order_id: i64,
    created_at: DateTimeUtc,
) -> Result<()> {
    Order::update_many()
        .col_expr(order_entity::Column::CreatedAt, Expr::value(created_at))
        .filter(order_entity::Column::Id.eq(order_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Blanks an order's email with a raw column write, bypassing validation.
/// Used to simulate a record that no longer passes presence checks.
pub async fn clear_order_email(db: &DatabaseConnection, order_id: i64) -> Result<()> {
    Order::update_many()
        .col_expr(order_entity::Column::Email, Expr::value(""))
        .filter(order_entity::Column::Id.eq(order_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Sets up a complete test environment with an order.
/// Returns (db, order) for common test scenarios.
pub async fn setup_with_order() -> Result<(DatabaseConnection, entities::order::Model)> {
    let db = setup_test_db().await?;
    let order = create_test_order(&db, "Test Customer").await?;
    Ok((db, order))
}
