//! Cart-to-order reconciliation.
//!
//! Converts a transient shopping cart into the line items of an order. Two
//! cart entries for the same product collapse into one line, and every
//! purchased product's gift rules are expanded into bonus lines. The whole
//! conversion runs in one database transaction: an unresolvable product
//! aborts the call with nothing persisted.
//!
//! Gift accumulation is asymmetric on purpose, matching the promotion
//! behavior this module was ported from: a brand-new gift line starts at
//! `rule.total_quantity(item.quantity)`, but when a gift line already exists
//! (because another purchased product granted the same gift) it only grows by
//! the flat `rule.quantity`.

use crate::{
    core::order as order_ops,
    entities::{Order, Product, ProductGift, order_detail, product_gift},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::debug;

/// Description tag carried by reconciler-created gift lines.
pub const GIFT_DESCRIPTION: &str = "gift";

/// One product/quantity entry of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartItem {
    /// Referenced product
    pub product_id: i64,
    /// Units of the product in the cart
    pub quantity: i32,
}

/// A transient pre-order collection of cart items.
///
/// Carts are never persisted by this module and never mutated by
/// reconciliation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cart {
    /// The cart's items; order is irrelevant
    pub items: Vec<CartItem>,
}

/// A line item accumulated in memory before anything is written.
struct PendingLine {
    product_id: i64,
    product_name: String,
    price: f64,
    quantity: i32,
    description: Option<String>,
}

/// Converts `cart` into line items of the order identified by `order_id`.
///
/// Duplicate cart entries for one product merge into a single line with the
/// summed quantity. Gift rules of every purchased product are expanded; gifts
/// granted by multiple purchased products compose through the shared
/// accumulating lookup by product id. Finishes by recomputing the order's
/// `cache_total` and committing; returns the persisted line items.
///
/// # Errors
/// `ProductNotFound` when a cart item or gift rule references a product that
/// does not exist; in that case the transaction is rolled back and no line
/// items are persisted.
pub async fn save_from_cart(
    db: &DatabaseConnection,
    order_id: i64,
    cart: &Cart,
) -> Result<Vec<order_detail::Model>> {
    let txn = db.begin().await?;

    Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let mut pending: Vec<PendingLine> = Vec::new();

    for item in &cart.items {
        if item.quantity < 1 {
            return Err(Error::InvalidQuantity {
                quantity: item.quantity,
            });
        }

        let product = Product::find_by_id(item.product_id)
            .one(&txn)
            .await?
            .ok_or(Error::ProductNotFound {
                id: item.product_id,
            })?;

        match pending.iter_mut().find(|l| l.product_id == item.product_id) {
            Some(line) => line.quantity += item.quantity,
            None => pending.push(PendingLine {
                product_id: item.product_id,
                product_name: product.name.clone(),
                price: product.price,
                quantity: item.quantity,
                description: None,
            }),
        }

        let rules = ProductGift::find()
            .filter(product_gift::Column::ProductId.eq(item.product_id))
            .all(&txn)
            .await?;

        for rule in rules {
            match pending.iter_mut().find(|l| l.product_id == rule.gift_id) {
                // Existing gift line grows by the flat rule quantity, not by
                // total_quantity.
                Some(line) => line.quantity += rule.quantity,
                None => {
                    let gift_product = Product::find_by_id(rule.gift_id)
                        .one(&txn)
                        .await?
                        .ok_or(Error::ProductNotFound { id: rule.gift_id })?;

                    pending.push(PendingLine {
                        product_id: rule.gift_id,
                        product_name: gift_product.name,
                        price: rule.price,
                        quantity: rule.total_quantity(item.quantity),
                        description: Some(GIFT_DESCRIPTION.to_string()),
                    });
                }
            }
        }
    }

    let mut saved = Vec::with_capacity(pending.len());
    for line in pending {
        let detail = order_detail::ActiveModel {
            order_id: Set(order_id),
            product_id: Set(line.product_id),
            product_name: Set(line.product_name),
            price: Set(line.price),
            quantity: Set(line.quantity),
            description: Set(line.description),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        saved.push(detail);
    }

    let total = order_ops::refresh_cache_total(&txn, order_id).await?;
    txn.commit().await?;

    debug!(order_id, lines = saved.len(), total, "reconciled cart into order");
    Ok(saved)
}
